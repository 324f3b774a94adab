//! Benchmarks for the three full reverb models.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use reverb_engine::{new_revmodel, ParamMask, ReverbParams, ReverbType};

use crate::BLOCK_SIZES;

pub fn bench_reverb(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/reverb");

    let sample_rate = 48_000.0;
    let models = [
        ("freeverb", ReverbType::Freeverb),
        ("lexverb", ReverbType::Lexverb),
        ("dattorro", ReverbType::Fdn),
    ];

    for &size in BLOCK_SIZES {
        let input: Vec<f32> = (0..size)
            .map(|i| {
                if i < 10 {
                    1.0 - (i as f32 / 10.0)
                } else {
                    (i as f32 * 0.05).sin() * 0.1
                }
            })
            .collect();
        let mut left = vec![0.0f32; size];
        let mut right = vec![0.0f32; size];

        for (name, reverb_type) in models {
            let mut model = new_revmodel(sample_rate, sample_rate, reverb_type).unwrap();
            model.set_params(
                ParamMask::SET_ALL,
                &ReverbParams {
                    roomsize: 0.7,
                    damping: 0.4,
                    width: 100.0,
                    level: 0.9,
                },
            );
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| {
                    model.process_replace(black_box(&input), &mut left, &mut right);
                    left[0] + right[0]
                })
            });
        }
    }

    group.finish();
}
