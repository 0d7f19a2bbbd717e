use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VoiceError {
    #[error("overtone {index} out of range (voice has {count})")]
    OvertoneOutOfRange { index: usize, count: usize },
}
