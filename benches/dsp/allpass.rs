//! Benchmarks for the allpass filter, both variants.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use reverb_engine::dsp::{AllpassFilter, AllpassMode};

use crate::BLOCK_SIZES;

pub fn bench_allpass(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/allpass");

    for &size in BLOCK_SIZES {
        let input: Vec<f32> = (0..size).map(|i| (i as f32 * 0.07).sin()).collect();

        let mut freeverb = AllpassFilter::new(556, 0.5, AllpassMode::Freeverb);
        group.bench_with_input(BenchmarkId::new("freeverb", size), &size, |b, _| {
            b.iter(|| {
                let mut sum = 0.0f32;
                for &x in &input {
                    sum += freeverb.process(black_box(x));
                }
                sum
            })
        });

        let mut schroeder = AllpassFilter::new(556, 0.7, AllpassMode::Schroeder);
        group.bench_with_input(BenchmarkId::new("schroeder", size), &size, |b, _| {
            b.iter(|| {
                let mut sum = 0.0f32;
                for &x in &input {
                    sum += schroeder.process(black_box(x));
                }
                sum
            })
        });
    }

    group.finish();
}
