//! Gain and summing primitives.

/*
Gain and Summing
================

An additive voice is nothing but these two operations:

    summing     out[i] += partial[i] × partial_gain     (one per overtone)
    gain        out[i] ×= envelope[i]                   (shape over time)
                out[i] ×= output_gain                   (channel strip)

Multiplying by a value in [0, 1] attenuates; 0.5 is roughly -6 dB.
Summing N partials at full gain can reach N in amplitude, which is why the
default overtone gains fall off as 1/n.
*/

/// Multiply a signal by a constant gain factor (in-place).
#[inline]
pub fn apply_gain(signal: &mut [f32], gain: f32) {
    for sample in signal.iter_mut() {
        *sample *= gain;
    }
}

/// Multiply a signal by a modulator, writing the result into the signal.
#[inline]
pub fn multiply_in_place(signal: &mut [f32], modulator: &[f32]) {
    debug_assert_eq!(signal.len(), modulator.len());

    for (s, &m) in signal.iter_mut().zip(modulator.iter()) {
        *s *= m;
    }
}
