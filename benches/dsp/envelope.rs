//! Benchmarks for the breakpoint envelope.

use std::hint::black_box;

use additive_synth::dsp::breakpoint::{BreakpointCurve, BreakpointEnvelope};
use additive_synth::graph::node::RenderCtx;
use criterion::{BenchmarkId, Criterion};

use crate::BLOCK_SIZES;

pub fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/envelope");
    let ctx = RenderCtx::from_freq(48_000.0, 440.0, 100.0);

    // A hand-drawn looking attack: many breakpoints to search through
    let dense: Vec<(f32, f32)> = (0..64)
        .map(|i| (i as f32 * 0.05, 0.5 + 0.5 * (i as f32 * 0.7).sin()))
        .collect();

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Two-point ramp
        let mut env = BreakpointEnvelope::new(
            BreakpointCurve::ramp_up(10.0),
            BreakpointCurve::ramp_down(0.3),
        );
        env.note_on();
        group.bench_with_input(BenchmarkId::new("ramp", size), &size, |b, _| {
            b.iter(|| {
                env.render(black_box(&mut buffer), black_box(&ctx));
            })
        });

        // 64 breakpoints
        let mut env = BreakpointEnvelope::new(
            BreakpointCurve::new(dense.iter().copied()),
            BreakpointCurve::ramp_down(0.3),
        );
        env.note_on();
        group.bench_with_input(BenchmarkId::new("dense", size), &size, |b, _| {
            b.iter(|| {
                env.render(black_box(&mut buffer), black_box(&ctx));
            })
        });
    }

    group.finish();
}
