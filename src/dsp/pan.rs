use std::f32::consts::FRAC_PI_4;

/// Output gain and stereo position for a mono source.
///
/// Panning is equal-power: `left = cos(θ)`, `right = sin(θ)` with
/// `θ = (pan + 1) · π/4`, so centre sends ~0.707 to each side and the
/// perceived loudness stays constant across the field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelStrip {
    gain: f32,
    pan: f32,
}

impl ChannelStrip {
    pub fn new() -> Self {
        Self { gain: 1.0, pan: 0.0 }
    }

    pub fn gain(&self) -> f32 {
        self.gain
    }

    /// Output gain, clamped to `[0, 1]`.
    pub fn set_gain(&mut self, gain: f32) {
        self.gain = gain.clamp(0.0, 1.0);
    }

    pub fn pan(&self) -> f32 {
        self.pan
    }

    /// Stereo position, clamped to `[-1, 1]` (left to right).
    pub fn set_pan(&mut self, pan: f32) {
        self.pan = pan.clamp(-1.0, 1.0);
    }

    /// Left and right multipliers, output gain included.
    pub fn channel_gains(&self) -> (f32, f32) {
        let theta = (self.pan + 1.0) * FRAC_PI_4;
        (self.gain * theta.cos(), self.gain * theta.sin())
    }

    /// Spread a mono block over two channels.
    pub fn process_stereo(&self, mono: &[f32], left: &mut [f32], right: &mut [f32]) {
        debug_assert_eq!(mono.len(), left.len());
        debug_assert_eq!(mono.len(), right.len());

        let (gl, gr) = self.channel_gains();
        for ((&m, l), r) in mono.iter().zip(left.iter_mut()).zip(right.iter_mut()) {
            *l = m * gl;
            *r = m * gr;
        }
    }
}

impl Default for ChannelStrip {
    fn default() -> Self {
        Self::new()
    }
}
