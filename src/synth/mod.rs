// Purpose: the additive voice and the plumbing that drives it
// This layer sits above the dsp primitives and graph nodes

pub mod additive;
pub mod error;
pub mod message;
pub mod overtone;
pub mod voice;

pub use additive::{AdditiveVoice, EnvelopeTarget, VoiceOptions};
pub use error::VoiceError;
pub use message::{MessageReceiver, VoiceMessage};
pub use voice::VoiceState;
