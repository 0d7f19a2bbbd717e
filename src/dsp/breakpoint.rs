#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{editor::Point, graph::node::RenderCtx};

/*
Breakpoint Envelope
===================

A breakpoint envelope is a list of (time, amplitude) pairs joined by
straight lines. It is the data a curve editor produces: the x axis is time
in seconds, the y axis is amplitude.

  amp
  1.0 ┐    ●
      │   ╱ ╲
      │  ╱   ●───────●        attack curve: played from t = 0 on note_on,
      │ ╱                     the last amplitude is held while the gate
  0.0 └●──────────────────▶ t stays high
       0   0.05  0.1  0.3

  amp
  L   ┐●                      release curve: played from t = 0 on note_off,
      │ ╲                     with the first amplitude replaced by the level
      │  ╲                    at the moment of release (L), so releasing
      │   ●                   mid-attack does not click
  0.0 └────●──────────────▶ t

Stages
------

    Idle ──note_on──▶ Attack ──curve ends──▶ Sustain
      ▲                 │                      │
      │              note_off               note_off
      │                 ▼                      │
      └──curve ends── Release ◀────────────────┘

Between breakpoints the level is interpolated linearly. Before the first
breakpoint the first amplitude holds, after the last the last one does.
Time advances by 1 / sample_rate per sample.

Idle keeps whatever level the release curve ended on. A release curve
that ends at 0 (the usual case) leaves silence; a flat single-point curve
such as `constant(1.0)` leaves the level where note_off found it, which is
what per-overtone envelopes want when the main envelope does the fading.
*/

/// Piecewise-linear (time, amplitude) curve.
///
/// Breakpoints are sorted by time, times are non-negative and amplitudes lie
/// in `[0, 1]`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct BreakpointCurve {
    points: Vec<(f32, f32)>,
}

impl BreakpointCurve {
    pub fn new(points: impl IntoIterator<Item = (f32, f32)>) -> Self {
        let mut points: Vec<(f32, f32)> = points
            .into_iter()
            .filter(|(t, a)| t.is_finite() && a.is_finite())
            .map(|(t, a)| (t.max(0.0), a.clamp(0.0, 1.0)))
            .collect();
        points.sort_by(|a, b| a.0.total_cmp(&b.0));
        Self { points }
    }

    /// Build from editor vertices: x is seconds, y is amplitude.
    pub fn from_points(points: &[Point]) -> Self {
        Self::new(points.iter().map(|p| (p.x as f32, p.y as f32)))
    }

    /// Linear ramp from 0 up to full level over `seconds`.
    pub fn ramp_up(seconds: f32) -> Self {
        Self::new([(0.0, 0.0), (seconds, 1.0)])
    }

    /// Linear ramp from full level down to 0 over `seconds`.
    pub fn ramp_down(seconds: f32) -> Self {
        Self::new([(0.0, 1.0), (seconds, 0.0)])
    }

    /// A single breakpoint: the level never moves.
    pub fn constant(amplitude: f32) -> Self {
        Self::new([(0.0, amplitude)])
    }

    pub fn points(&self) -> &[(f32, f32)] {
        &self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Time of the last breakpoint.
    pub fn duration(&self) -> f32 {
        self.points.last().map_or(0.0, |&(t, _)| t)
    }

    pub fn first_amplitude(&self) -> f32 {
        self.points.first().map_or(0.0, |&(_, a)| a)
    }

    pub fn last_amplitude(&self) -> f32 {
        self.points.last().map_or(0.0, |&(_, a)| a)
    }

    /// Amplitude at `time` seconds.
    pub fn value_at(&self, time: f32) -> f32 {
        self.value_from(self.first_amplitude(), time)
    }

    /// Amplitude at `time`, with the first breakpoint's amplitude replaced
    /// by `start`.
    fn value_from(&self, start: f32, time: f32) -> f32 {
        let Some(&(first_t, _)) = self.points.first() else {
            return 0.0;
        };
        if time <= first_t {
            return start;
        }

        // Index of the first breakpoint strictly after `time`
        let next = self.points.partition_point(|&(t, _)| t <= time);
        if next >= self.points.len() {
            return self.last_amplitude();
        }

        let amp = |i: usize| if i == 0 { start } else { self.points[i].1 };
        let (t0, t1) = (self.points[next - 1].0, self.points[next].0);
        let (a0, a1) = (amp(next - 1), amp(next));
        let progress = (time - t0) / (t1 - t0);
        a0 + (a1 - a0) * progress
    }
}

impl Default for BreakpointCurve {
    fn default() -> Self {
        Self::ramp_up(0.01)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeStage {
    Idle,
    Attack,
    Sustain,
    Release,
}

pub struct BreakpointEnvelope {
    attack: BreakpointCurve,
    release: BreakpointCurve,

    stage: EnvelopeStage,
    level: f32,
    // seconds since the current stage began
    elapsed: f32,
    release_start_level: f32,
}

impl BreakpointEnvelope {
    pub fn new(attack: BreakpointCurve, release: BreakpointCurve) -> Self {
        Self {
            attack,
            release,
            stage: EnvelopeStage::Idle,
            level: 0.0,
            elapsed: 0.0,
            release_start_level: 0.0,
        }
    }

    pub fn attack_curve(&self) -> &BreakpointCurve {
        &self.attack
    }

    pub fn release_curve(&self) -> &BreakpointCurve {
        &self.release
    }

    /// Takes effect on the next note_on.
    pub fn set_attack_curve(&mut self, curve: BreakpointCurve) {
        self.attack = curve;
    }

    /// Takes effect on the next note_off.
    pub fn set_release_curve(&mut self, curve: BreakpointCurve) {
        self.release = curve;
    }

    /// Gate high: restart the attack curve from its beginning.
    pub fn note_on(&mut self) {
        self.stage = EnvelopeStage::Attack;
        self.elapsed = 0.0;
        self.level = self.attack.value_at(0.0);
    }

    /// Gate low: play the release curve from the current level.
    pub fn note_off(&mut self) {
        if self.stage == EnvelopeStage::Idle {
            return;
        }
        self.release_start_level = self.level;
        self.elapsed = 0.0;
        self.stage = EnvelopeStage::Release;
    }

    /// Advance by one sample.
    pub fn next_sample(&mut self, ctx: &RenderCtx) {
        let dt = 1.0 / ctx.sample_rate;

        match self.stage {
            EnvelopeStage::Idle => {}

            EnvelopeStage::Attack => {
                self.level = self.attack.value_at(self.elapsed);
                self.elapsed += dt;

                if self.elapsed > self.attack.duration() {
                    self.level = self.attack.last_amplitude();
                    self.stage = EnvelopeStage::Sustain;
                }
            }

            EnvelopeStage::Sustain => {
                self.level = self.attack.last_amplitude();
            }

            EnvelopeStage::Release => {
                self.level = self
                    .release
                    .value_from(self.release_start_level, self.elapsed);
                self.elapsed += dt;

                let duration = self.release.duration();
                if self.elapsed > duration {
                    self.level = self.release.value_from(self.release_start_level, duration);
                    self.stage = EnvelopeStage::Idle;
                }
            }
        }

        debug_assert!((0.0..=1.0).contains(&self.level));
    }

    /// Render a block of envelope values into the buffer.
    pub fn render(&mut self, buffer: &mut [f32], ctx: &RenderCtx) {
        for sample in buffer.iter_mut() {
            self.next_sample(ctx);
            *sample = self.level;
        }
    }

    pub fn is_active(&self) -> bool {
        self.stage != EnvelopeStage::Idle
    }

    pub fn reset(&mut self) {
        self.stage = EnvelopeStage::Idle;
        self.level = 0.0;
        self.elapsed = 0.0;
        self.release_start_level = 0.0;
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn stage(&self) -> EnvelopeStage {
        self.stage
    }
}

impl Default for BreakpointEnvelope {
    fn default() -> Self {
        Self::new(BreakpointCurve::ramp_up(0.01), BreakpointCurve::ramp_down(0.1))
    }
}
