//! Benchmarks for the additive voice.

use std::hint::black_box;

use additive_synth::{
    graph::{GraphNode, RenderCtx},
    synth::{AdditiveVoice, VoiceOptions},
};
use criterion::{BenchmarkId, Criterion};

use crate::BLOCK_SIZES;

pub fn bench_voices(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/voices");

    for &size in BLOCK_SIZES {
        let mut left = vec![0.0f32; size];
        let mut right = vec![0.0f32; size];

        for overtones in [10, 32] {
            let mut voice = AdditiveVoice::new(
                48_000.0,
                VoiceOptions {
                    num_overtones: overtones,
                    glide_ms: 0.0,
                },
            );
            voice.play_note(45, 100, None);

            group.bench_with_input(
                BenchmarkId::new(format!("additive_{overtones}"), size),
                &size,
                |b, _| {
                    b.iter(|| {
                        voice.render_stereo(black_box(&mut left), black_box(&mut right));
                    })
                },
            );
        }
    }

    group.finish();
}

pub fn bench_voice_node(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/voice_node");
    let ctx = RenderCtx::from_freq(48_000.0, 110.0, 100.0);

    for &size in BLOCK_SIZES {
        let mut out = vec![0.0f32; size];
        let mut node: Box<dyn GraphNode> =
            Box::new(AdditiveVoice::new(48_000.0, VoiceOptions::default()));
        node.note_on(&ctx);

        group.bench_with_input(BenchmarkId::new("mono", size), &size, |b, _| {
            b.iter(|| {
                node.render_block(black_box(&mut out), &ctx);
            })
        });
    }

    group.finish();
}
