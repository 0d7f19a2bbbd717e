use crate::{
    dsp::{
        breakpoint::{BreakpointCurve, BreakpointEnvelope},
        oscillator::PartialOscillator,
    },
    graph::node::RenderCtx,
};

/// One sine partial of an additive voice, with its own level and envelope.
///
/// The per-overtone envelope defaults to a flat line at full level, so
/// overtones follow the voice's main envelope unless given a shape of
/// their own.
pub struct Overtone {
    osc: PartialOscillator,
    gain: f32,
    envelope: BreakpointEnvelope,
}

impl Overtone {
    pub fn new(frequency: f32, gain: f32) -> Self {
        Self {
            osc: PartialOscillator::new(frequency),
            gain: gain.clamp(0.0, 1.0),
            envelope: BreakpointEnvelope::new(
                BreakpointCurve::constant(1.0),
                BreakpointCurve::constant(1.0),
            ),
        }
    }

    pub fn frequency(&self) -> f32 {
        self.osc.frequency()
    }

    pub fn set_frequency(&mut self, frequency: f32, glide_ms: f32, sample_rate: f32) {
        self.osc.set_frequency(frequency, glide_ms, sample_rate);
    }

    pub fn gain(&self) -> f32 {
        self.gain
    }

    /// Clamped to `[0, 1]`.
    pub fn set_gain(&mut self, gain: f32) {
        self.gain = gain.clamp(0.0, 1.0);
    }

    pub fn envelope(&self) -> &BreakpointEnvelope {
        &self.envelope
    }

    pub fn envelope_mut(&mut self) -> &mut BreakpointEnvelope {
        &mut self.envelope
    }

    pub fn attack(&mut self) {
        self.osc.reset_phase();
        self.envelope.note_on();
    }

    pub fn release(&mut self) {
        self.envelope.note_off();
    }

    /// Add this partial onto `out`. `scratch` receives the envelope block.
    pub fn render_add(&mut self, out: &mut [f32], scratch: &mut [f32], ctx: &RenderCtx) {
        debug_assert_eq!(out.len(), scratch.len());

        self.envelope.render(scratch, ctx);
        for (o, &env) in out.iter_mut().zip(scratch.iter()) {
            *o += self.osc.next_sample(ctx.sample_rate) * self.gain * env;
        }
    }
}
