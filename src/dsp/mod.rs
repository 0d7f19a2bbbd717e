//! Low-level DSP primitives used by the additive voice.
//!
//! These components are allocation-free once built and realtime-safe, so the
//! voice can own them directly. They stay focused on the signal math; the
//! voice layers note handling and routing on top.

/// Gain and summing helpers.
pub mod amplify;
/// Piecewise-linear breakpoint envelopes.
pub mod breakpoint;
/// Sine partials with frequency glide.
pub mod oscillator;
/// Output gain and equal-power panning.
pub mod pan;

pub use breakpoint::{BreakpointCurve, BreakpointEnvelope, EnvelopeStage};
