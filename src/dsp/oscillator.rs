use std::f32::consts::TAU;

/*
Partial Oscillator
==================

Each overtone of an additive voice is one sine partial. A partial is a phase
accumulator:

    phase += frequency / sample_rate      (wrapped into [0, 1))
    out    = sin(TAU * phase)

Glide
-----

Changing frequency can either jump or slide. With a glide time g the
frequency moves linearly from where it is now to the target over g seconds:

  freq
  880 ┐          ┌──────────   glide = 0: immediate jump
      │         ╱
      │        ╱               glide > 0: linear ramp
  440 ┴───────┘
             |← g →|

The increment is recomputed whenever a new target is set, so a retarget
mid-glide starts a fresh ramp from the current frequency.
*/

pub struct PartialOscillator {
    phase: f32,
    frequency: f32,
    target_frequency: f32,
    // Hz per sample while gliding
    glide_step: f32,
}

impl PartialOscillator {
    pub fn new(frequency: f32) -> Self {
        Self {
            phase: 0.0,
            frequency,
            target_frequency: frequency,
            glide_step: 0.0,
        }
    }

    /// Target frequency. During a glide this is where the ramp ends.
    pub fn frequency(&self) -> f32 {
        self.target_frequency
    }

    /// Frequency actually being rendered right now.
    pub fn current_frequency(&self) -> f32 {
        self.frequency
    }

    /// Move to `frequency`, sliding over `glide_ms` milliseconds.
    pub fn set_frequency(&mut self, frequency: f32, glide_ms: f32, sample_rate: f32) {
        let frequency = frequency.max(0.0);
        self.target_frequency = frequency;

        let glide_samples = glide_ms.max(0.0) * 0.001 * sample_rate;
        if glide_samples < 1.0 {
            self.frequency = frequency;
            self.glide_step = 0.0;
        } else {
            self.glide_step = (frequency - self.frequency) / glide_samples;
        }
    }

    pub fn reset_phase(&mut self) {
        self.phase = 0.0;
    }

    #[inline]
    pub fn next_sample(&mut self, sample_rate: f32) -> f32 {
        let out = (TAU * self.phase).sin();

        self.phase += self.frequency / sample_rate;
        self.phase -= self.phase.floor();

        if self.glide_step != 0.0 {
            self.frequency += self.glide_step;
            let arrived = if self.glide_step > 0.0 {
                self.frequency >= self.target_frequency
            } else {
                self.frequency <= self.target_frequency
            };
            if arrived {
                self.frequency = self.target_frequency;
                self.glide_step = 0.0;
            }
        }

        out
    }

    /// Add this partial, scaled by `gain`, onto `out`.
    pub fn render_add(&mut self, out: &mut [f32], gain: f32, sample_rate: f32) {
        for sample in out.iter_mut() {
            *sample += self.next_sample(sample_rate) * gain;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_sine() {
        let sample_rate = 48_000.0;
        let mut osc = PartialOscillator::new(440.0);

        let samples: Vec<f32> = (0..64).map(|_| osc.next_sample(sample_rate)).collect();

        let n = 12;
        let expected = (TAU * 440.0 * n as f32 / sample_rate).sin();
        assert!(
            (samples[n] - expected).abs() < 1e-4,
            "expected {expected}, got {}",
            samples[n]
        );
    }

    #[test]
    fn zero_glide_jumps() {
        let mut osc = PartialOscillator::new(220.0);
        osc.set_frequency(440.0, 0.0, 48_000.0);
        assert_eq!(osc.current_frequency(), 440.0);
    }

    #[test]
    fn glide_reaches_target() {
        let sample_rate = 1_000.0;
        let mut osc = PartialOscillator::new(100.0);
        osc.set_frequency(200.0, 10.0, sample_rate);

        assert_eq!(osc.frequency(), 200.0);
        assert_eq!(osc.current_frequency(), 100.0);

        for _ in 0..5 {
            osc.next_sample(sample_rate);
        }
        let midway = osc.current_frequency();
        assert!(midway > 140.0 && midway < 160.0, "got {midway}");

        for _ in 0..10 {
            osc.next_sample(sample_rate);
        }
        assert_eq!(osc.current_frequency(), 200.0);
    }
}
