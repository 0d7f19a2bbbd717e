//! Benchmarks for curve editor repaints.

use std::hint::black_box;

use additive_synth::editor::{CurveEditor, DisplayList, EditorConfig};
use criterion::{BenchmarkId, Criterion};

pub fn bench_editor(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/editor");

    for points in [8, 64, 512] {
        let mut editor =
            CurveEditor::new(DisplayList::new(800.0, 600.0), EditorConfig::default()).unwrap();
        for i in 0..points {
            editor.add_point(((i * 31) % points) as f64 * 100.0 / points as f64, 50.0);
        }

        group.bench_with_input(BenchmarkId::new("render", points), &points, |b, _| {
            b.iter(|| {
                editor.surface_mut().clear();
                black_box(&mut editor).render();
            })
        });
    }

    group.finish();
}
