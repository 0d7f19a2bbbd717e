//! Real-world scenario benchmarks.
//!
//! Full additive voices at typical overtone counts, and repaints of
//! curves with as many points as a user would plausibly click.

mod editor;
mod voices;

pub use editor::bench_editor;
pub use voices::{bench_voice_node, bench_voices};
