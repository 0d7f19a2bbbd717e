#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceState {
    Free,      // Silent, ready for the next note
    Active,    // Playing, envelope in attack or sustain
    Releasing, // Key released, envelope in release phase
}
