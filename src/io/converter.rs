/// Convert MIDI note number to frequency in Hz.
/// A4 = 440 Hz = MIDI note 69
#[inline]
pub fn midi_note_to_freq(note: u8) -> f32 {
    440.0 * 2.0_f32.powf((note as f32 - 69.0) / 12.0)
}

/// Map MIDI velocity (0-127) linearly onto a gain in `[0, 1]`.
#[inline]
pub fn midi_velocity_to_gain(velocity: u8) -> f32 {
    (velocity as f32 / 127.0).clamp(0.0, 1.0)
}
