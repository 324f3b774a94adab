//! Benchmarks for the comb filter.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use reverb_engine::dsp::CombFilter;

use crate::BLOCK_SIZES;

pub fn bench_comb(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/comb");

    for &size in BLOCK_SIZES {
        let input: Vec<f32> = (0..size).map(|i| (i as f32 * 0.05).sin()).collect();

        let mut comb = CombFilter::new(1116);
        comb.set_feedback(0.84);
        comb.set_damp(0.2);
        group.bench_with_input(BenchmarkId::new("process", size), &size, |b, _| {
            b.iter(|| {
                let mut sum = 0.0f32;
                for &x in &input {
                    sum += comb.process(black_box(x));
                }
                sum
            })
        });
    }

    group.finish();
}
