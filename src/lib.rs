pub mod dsp; // Envelopes, oscillators, gain and pan primitives
pub mod editor; // Piecewise-linear curve editor
pub mod graph; // Node trait shared by renderable voices
pub mod io;
pub mod synth; // Additive voice and its control messages

pub const MAX_BLOCK_SIZE: usize = 2048;
