// MIDI pitch and velocity conversions

pub mod converter;
