//! Benchmarks for sine partials.

use std::hint::black_box;

use additive_synth::dsp::oscillator::PartialOscillator;
use criterion::{BenchmarkId, Criterion};

use crate::BLOCK_SIZES;

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");
    let sample_rate = 48_000.0;

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Steady pitch
        let mut osc = PartialOscillator::new(440.0);
        group.bench_with_input(BenchmarkId::new("sine", size), &size, |b, _| {
            b.iter(|| {
                osc.render_add(black_box(&mut buffer), 0.5, sample_rate);
            })
        });

        // Long glide, so every sample pays for the ramp
        let mut osc = PartialOscillator::new(110.0);
        osc.set_frequency(880.0, 60_000.0, sample_rate);
        group.bench_with_input(BenchmarkId::new("glide", size), &size, |b, _| {
            b.iter(|| {
                osc.render_add(black_box(&mut buffer), 0.5, sample_rate);
            })
        });
    }

    group.finish();
}
