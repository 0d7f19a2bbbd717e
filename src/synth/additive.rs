#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use log::{debug, warn};

use crate::{
    dsp::{
        amplify::{apply_gain, multiply_in_place},
        breakpoint::{BreakpointCurve, BreakpointEnvelope},
        pan::ChannelStrip,
    },
    graph::node::{GraphNode, RenderCtx},
    io::converter::{midi_note_to_freq, midi_velocity_to_gain},
    synth::{
        error::VoiceError,
        message::{MessageReceiver, VoiceMessage},
        overtone::Overtone,
        voice::VoiceState,
    },
    MAX_BLOCK_SIZE,
};

/*
Additive Voice
==============

Additive synthesis builds a tone by summing sine partials at integer
multiples of a fundamental:

    overtone 1   f        (fundamental)
    overtone 2   2f       (octave)
    overtone 3   3f       (octave + fifth)
    ...

Signal flow
-----------

    overtone 1 ─┐   (sine × gain × own envelope)
    overtone 2 ─┤
       ...      ├─ Σ ──▶ main envelope ──▶ channel strip ──▶ out (mono / L,R)
    overtone n ─┘                          (gain, pan)

Each overtone has its own breakpoint envelope, so brightness can evolve
independently of loudness (e.g. upper partials dying away faster). By
default the per-overtone envelopes are flat and only the main envelope
shapes the note.

Default overtone gains follow the harmonic series 1/n normalised so that
they sum to 1, which keeps the summed signal inside [-1, 1]. Overtones
added later with set_num_overtones start silent.

Lifecycle
---------

    Free ──attack()──▶ Active ──release()──▶ Releasing ──main env idle──▶ Free
*/

/// Construction options for an [`AdditiveVoice`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoiceOptions {
    pub num_overtones: usize,
    /// Default glide time in milliseconds for frequency changes.
    pub glide_ms: f32,
}

impl Default for VoiceOptions {
    fn default() -> Self {
        Self {
            num_overtones: 10,
            glide_ms: 0.0,
        }
    }
}

/// Which envelope an envelope accessor refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeTarget {
    /// The envelope applied to the summed signal.
    Main,
    /// The envelope of a single overtone (0-based).
    Overtone(usize),
}

pub struct AdditiveVoice {
    sample_rate: f32,
    options: VoiceOptions,
    overtones: Vec<Overtone>,
    envelope: BreakpointEnvelope,
    strip: ChannelStrip,
    state: VoiceState,
    note: u8,
    base_frequency: f32,
    env_buffer: Vec<f32>,
    mix_buffer: Vec<f32>,
}

impl AdditiveVoice {
    pub fn new(sample_rate: f32, options: VoiceOptions) -> Self {
        let base_frequency = 440.0;
        let harmonic_sum: f32 = (1..=options.num_overtones).map(|n| 1.0 / n as f32).sum();

        let overtones = (0..options.num_overtones)
            .map(|i| {
                let n = (i + 1) as f32;
                Overtone::new(base_frequency * n, (1.0 / n) / harmonic_sum)
            })
            .collect();

        Self {
            sample_rate,
            options,
            overtones,
            envelope: BreakpointEnvelope::default(),
            strip: ChannelStrip::new(),
            state: VoiceState::Free,
            note: 0,
            base_frequency,
            env_buffer: vec![0.0; MAX_BLOCK_SIZE],
            mix_buffer: vec![0.0; MAX_BLOCK_SIZE],
        }
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn state(&self) -> VoiceState {
        self.state
    }

    /// MIDI note of the last `play_note`, 0 when none.
    pub fn note(&self) -> u8 {
        self.note
    }

    pub fn gain(&self) -> f32 {
        self.strip.gain()
    }

    /// Output gain in `[0, 1]`.
    pub fn set_gain(&mut self, gain: f32) -> &mut Self {
        self.strip.set_gain(gain);
        self
    }

    pub fn pan(&self) -> f32 {
        self.strip.pan()
    }

    /// Stereo position in `[-1, 1]` (left to right).
    pub fn set_pan(&mut self, pan: f32) -> &mut Self {
        self.strip.set_pan(pan);
        self
    }

    pub fn glide_ms(&self) -> f32 {
        self.options.glide_ms
    }

    pub fn set_glide_ms(&mut self, glide_ms: f32) -> &mut Self {
        self.options.glide_ms = glide_ms.max(0.0);
        self
    }

    /// Fundamental frequency, i.e. that of the first overtone.
    pub fn frequency(&self) -> f32 {
        self.overtones
            .first()
            .map_or(self.base_frequency, Overtone::frequency)
    }

    /// Tune overtone `i` to `frequency * (i + 1)`.
    ///
    /// `glide_ms` of `None` uses the voice's default glide.
    pub fn set_frequency(&mut self, frequency: f32, glide_ms: Option<f32>) -> &mut Self {
        let glide = glide_ms.unwrap_or(self.options.glide_ms);
        self.base_frequency = frequency;

        for (i, overtone) in self.overtones.iter_mut().enumerate() {
            overtone.set_frequency(frequency * (i + 1) as f32, glide, self.sample_rate);
        }
        self
    }

    pub fn attack_envelope(&self, target: EnvelopeTarget) -> Result<&BreakpointCurve, VoiceError> {
        Ok(self.envelope_for(target)?.attack_curve())
    }

    /// Replace an attack curve. Takes effect on the next attack.
    pub fn set_attack_envelope(
        &mut self,
        curve: BreakpointCurve,
        target: EnvelopeTarget,
    ) -> Result<&mut Self, VoiceError> {
        self.envelope_for_mut(target)?.set_attack_curve(curve);
        Ok(self)
    }

    pub fn release_envelope(&self, target: EnvelopeTarget) -> Result<&BreakpointCurve, VoiceError> {
        Ok(self.envelope_for(target)?.release_curve())
    }

    /// Replace a release curve. Takes effect on the next release.
    pub fn set_release_envelope(
        &mut self,
        curve: BreakpointCurve,
        target: EnvelopeTarget,
    ) -> Result<&mut Self, VoiceError> {
        self.envelope_for_mut(target)?.set_release_curve(curve);
        Ok(self)
    }

    /// Gain of one overtone, clamped to `[0, 1]`. Out-of-range indices are
    /// ignored.
    pub fn set_overtone_gain(&mut self, gain: f32, index: usize) {
        if let Some(overtone) = self.overtones.get_mut(index) {
            overtone.set_gain(gain);
        }
    }

    /// Set gains for the first `min(gains.len(), num_overtones)` overtones.
    pub fn set_overtone_gains(&mut self, gains: &[f32]) {
        for (overtone, &gain) in self.overtones.iter_mut().zip(gains) {
            overtone.set_gain(gain);
        }
    }

    pub fn overtone_gains(&self) -> Vec<f32> {
        self.overtones.iter().map(Overtone::gain).collect()
    }

    pub fn overtone_frequencies(&self) -> Vec<f32> {
        self.overtones.iter().map(Overtone::frequency).collect()
    }

    pub fn num_overtones(&self) -> usize {
        self.overtones.len()
    }

    /// Grow or shrink the overtone series.
    ///
    /// New overtones are tuned to `(i + 1) × frequency()` and start silent.
    pub fn set_num_overtones(&mut self, count: usize) {
        let current = self.overtones.len();
        if count < current {
            self.overtones.truncate(count);
        } else if count > current {
            let base = self.frequency();
            self.overtones
                .extend((current..count).map(|i| Overtone::new(base * (i + 1) as f32, 0.0)));
        }
        self.options.num_overtones = count;
        debug!("voice now has {count} overtones");
    }

    /// Start every envelope.
    pub fn attack(&mut self) {
        for overtone in &mut self.overtones {
            overtone.attack();
        }
        self.envelope.note_on();
        self.state = VoiceState::Active;
    }

    /// Release every envelope.
    pub fn release(&mut self) {
        for overtone in &mut self.overtones {
            overtone.release();
        }
        self.envelope.note_off();
        if self.state == VoiceState::Active {
            self.state = VoiceState::Releasing;
        }
    }

    /// Play a MIDI note. Velocity 0 releases instead, as note-off.
    pub fn play_note(&mut self, pitch: u8, velocity: u8, glide_ms: Option<f32>) {
        if velocity == 0 {
            self.release();
            return;
        }

        self.note = pitch;
        self.set_frequency(midi_note_to_freq(pitch), glide_ms);
        self.set_gain(midi_velocity_to_gain(velocity));
        self.attack();
    }

    /// Drain pending messages from a control thread.
    pub fn process_messages(&mut self, rx: &mut impl MessageReceiver) {
        while let Some(msg) = rx.pop() {
            self.apply_message(msg);
        }
    }

    pub fn apply_message(&mut self, msg: VoiceMessage) {
        let result = match msg {
            VoiceMessage::NoteOn { note, velocity } => {
                self.play_note(note, velocity, None);
                Ok(())
            }
            VoiceMessage::NoteOff { note } => {
                if note == self.note {
                    self.release();
                }
                Ok(())
            }
            VoiceMessage::AllNotesOff => {
                self.release();
                Ok(())
            }
            VoiceMessage::SetAttackEnvelope { curve, target } => {
                self.set_attack_envelope(curve, target).map(|_| ())
            }
            VoiceMessage::SetReleaseEnvelope { curve, target } => {
                self.set_release_envelope(curve, target).map(|_| ())
            }
            VoiceMessage::SetOvertoneGains(gains) => {
                self.set_overtone_gains(&gains);
                Ok(())
            }
            VoiceMessage::SetGain(gain) => {
                self.set_gain(gain);
                Ok(())
            }
            VoiceMessage::SetPan(pan) => {
                self.set_pan(pan);
                Ok(())
            }
            VoiceMessage::SetGlide(glide) => {
                self.set_glide_ms(glide);
                Ok(())
            }
        };

        if let Err(err) = result {
            warn!("dropped voice message: {err}");
        }
    }

    /// Render mono output, channel strip gain applied, pan ignored.
    pub fn render(&mut self, out: &mut [f32]) {
        let ctx = self.ctx();
        self.render_block(out, &ctx);
    }

    /// Render through the channel strip into two channels.
    pub fn render_stereo(&mut self, left: &mut [f32], right: &mut [f32]) {
        debug_assert_eq!(left.len(), right.len());

        let ctx = self.ctx();
        let mut mono = std::mem::take(&mut self.mix_buffer);

        for (l, r) in left
            .chunks_mut(MAX_BLOCK_SIZE)
            .zip(right.chunks_mut(MAX_BLOCK_SIZE))
        {
            let block = &mut mono[..l.len()];
            self.render_dry(block, &ctx);
            self.strip.process_stereo(block, l, r);
        }

        self.mix_buffer = mono;
    }

    fn ctx(&self) -> RenderCtx {
        RenderCtx::from_freq(self.sample_rate, self.frequency(), 127.0)
    }

    /// Overtone sum times main envelope, before the channel strip.
    /// `out` must fit in MAX_BLOCK_SIZE.
    fn render_dry(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        out.fill(0.0);

        let env = &mut self.env_buffer[..out.len()];
        for overtone in &mut self.overtones {
            overtone.render_add(out, env, ctx);
        }

        self.envelope.render(env, ctx);
        multiply_in_place(out, env);

        if self.state == VoiceState::Releasing && !self.envelope.is_active() {
            self.state = VoiceState::Free;
        }
    }

    fn envelope_for(&self, target: EnvelopeTarget) -> Result<&BreakpointEnvelope, VoiceError> {
        match target {
            EnvelopeTarget::Main => Ok(&self.envelope),
            EnvelopeTarget::Overtone(index) => self
                .overtones
                .get(index)
                .map(Overtone::envelope)
                .ok_or(VoiceError::OvertoneOutOfRange {
                    index,
                    count: self.overtones.len(),
                }),
        }
    }

    fn envelope_for_mut(
        &mut self,
        target: EnvelopeTarget,
    ) -> Result<&mut BreakpointEnvelope, VoiceError> {
        let count = self.overtones.len();
        match target {
            EnvelopeTarget::Main => Ok(&mut self.envelope),
            EnvelopeTarget::Overtone(index) => self
                .overtones
                .get_mut(index)
                .map(Overtone::envelope_mut)
                .ok_or(VoiceError::OvertoneOutOfRange { index, count }),
        }
    }
}

/// Driven as a node, the context carries pitch and velocity on `note_on`;
/// during rendering only its sample rate matters.
impl GraphNode for AdditiveVoice {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        for block in out.chunks_mut(MAX_BLOCK_SIZE) {
            self.render_dry(block, ctx);
            apply_gain(block, self.strip.gain());
        }
    }

    fn note_on(&mut self, ctx: &RenderCtx) {
        self.set_frequency(ctx.frequency, None);
        self.set_gain(ctx.velocity / 127.0);
        self.attack();
    }

    fn note_off(&mut self, _ctx: &RenderCtx) {
        self.release();
    }

    fn get_envelope_level(&self) -> Option<f32> {
        Some(self.envelope.level())
    }

    fn is_active(&self) -> bool {
        self.envelope.is_active()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    const SAMPLE_RATE: f32 = 48_000.0;

    fn voice() -> AdditiveVoice {
        AdditiveVoice::new(SAMPLE_RATE, VoiceOptions::default())
    }

    #[test]
    fn default_gains_sum_to_one() {
        let voice = voice();
        assert_eq!(voice.num_overtones(), 10);
        assert_abs_diff_eq!(voice.overtone_gains().iter().sum::<f32>(), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn overtones_track_harmonics() {
        let mut voice = voice();
        voice.set_frequency(100.0, None);

        assert_eq!(voice.frequency(), 100.0);
        let expected: Vec<f32> = (1..=10).map(|n| 100.0 * n as f32).collect();
        assert_eq!(voice.overtone_frequencies(), expected);
    }

    #[test]
    fn growing_adds_silent_tuned_overtones() {
        let mut voice = voice();
        voice.set_frequency(50.0, None);
        voice.set_num_overtones(12);

        assert_eq!(voice.num_overtones(), 12);
        assert_eq!(voice.overtone_frequencies()[11], 600.0);
        assert_eq!(voice.overtone_gains()[10], 0.0);

        voice.set_num_overtones(3);
        assert_eq!(voice.overtone_frequencies(), vec![50.0, 100.0, 150.0]);
    }

    #[test]
    fn overtone_gain_out_of_range_is_ignored() {
        let mut voice = voice();
        let before = voice.overtone_gains();
        voice.set_overtone_gain(0.5, 99);
        assert_eq!(voice.overtone_gains(), before);

        voice.set_overtone_gains(&[1.0, 0.0]);
        let gains = voice.overtone_gains();
        assert_eq!(&gains[..2], &[1.0, 0.0]);
        assert_eq!(&gains[2..], &before[2..]);
    }

    #[test]
    fn envelope_target_out_of_range_errors() {
        let mut voice = voice();
        let err = voice
            .set_attack_envelope(BreakpointCurve::ramp_up(0.1), EnvelopeTarget::Overtone(10))
            .err();
        assert_eq!(
            err,
            Some(VoiceError::OvertoneOutOfRange {
                index: 10,
                count: 10
            })
        );
        assert!(voice.release_envelope(EnvelopeTarget::Overtone(9)).is_ok());
    }

    #[test]
    fn envelopes_round_trip_per_target() {
        let mut voice = voice();
        let curve = BreakpointCurve::new([(0.0, 0.0), (0.2, 1.0), (0.4, 0.5)]);

        voice
            .set_attack_envelope(curve.clone(), EnvelopeTarget::Overtone(2))
            .unwrap();

        assert_eq!(voice.attack_envelope(EnvelopeTarget::Overtone(2)), Ok(&curve));
        assert_ne!(voice.attack_envelope(EnvelopeTarget::Main), Ok(&curve));
    }

    #[test]
    fn velocity_zero_releases() {
        let mut voice = voice();
        voice.play_note(60, 100, None);
        assert_eq!(voice.state(), VoiceState::Active);
        assert_abs_diff_eq!(voice.gain(), 100.0 / 127.0, epsilon = 1e-6);

        voice.play_note(60, 0, None);
        assert_eq!(voice.state(), VoiceState::Releasing);
    }

    #[test]
    fn voice_frees_itself_after_release() {
        let mut voice = voice();
        voice.play_note(69, 127, None);

        let mut buffer = vec![0.0; 512];
        voice.render(&mut buffer);
        assert!(buffer.iter().any(|s| s.abs() > 0.0));

        voice.release();
        // default release is 100 ms
        let mut tail = vec![0.0; (SAMPLE_RATE * 0.12) as usize];
        voice.render(&mut tail);

        assert_eq!(voice.state(), VoiceState::Free);
        assert!(tail.last().is_some_and(|s| s.abs() < 1e-6));
    }

    #[test]
    fn drives_as_graph_node() {
        let mut voice = voice();
        let node: &mut dyn GraphNode = &mut voice;
        let ctx = RenderCtx::from_freq(SAMPLE_RATE, 220.0, 100.0);

        node.note_on(&ctx);
        let mut buffer = vec![0.0; 1024];
        node.render_block(&mut buffer, &ctx);
        assert!(buffer.iter().any(|s| s.abs() > 0.0));
        assert!(node.is_active());
        assert!(node.get_envelope_level().is_some_and(|level| level > 0.9));

        node.note_off(&ctx);
        let mut rendered = 0;
        while node.is_active() {
            node.render_block(&mut buffer, &ctx);
            rendered += buffer.len();
            assert!(rendered < SAMPLE_RATE as usize, "release never finished");
        }
        assert_eq!(node.get_envelope_level(), Some(0.0));

        assert_abs_diff_eq!(voice.frequency(), 220.0, epsilon = 1e-3);
        assert_abs_diff_eq!(voice.gain(), 100.0 / 127.0, epsilon = 1e-6);
        assert_eq!(voice.state(), VoiceState::Free);
    }

    #[test]
    fn stereo_follows_pan() {
        let mut voice = voice();
        voice.set_pan(-1.0);
        voice.play_note(69, 127, None);

        let mut left = vec![0.0; 256];
        let mut right = vec![0.0; 256];
        voice.render_stereo(&mut left, &mut right);

        assert!(left.iter().any(|s| s.abs() > 0.0));
        assert!(right.iter().all(|s| s.abs() < 1e-6));
    }

    #[test]
    fn note_off_for_other_note_is_ignored() {
        let mut voice = voice();
        voice.apply_message(VoiceMessage::NoteOn {
            note: 60,
            velocity: 90,
        });
        voice.apply_message(VoiceMessage::NoteOff { note: 61 });
        assert_eq!(voice.state(), VoiceState::Active);

        voice.apply_message(VoiceMessage::NoteOff { note: 60 });
        assert_eq!(voice.state(), VoiceState::Releasing);
    }
}
