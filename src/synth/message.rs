#[cfg(feature = "rtrb")]
use rtrb::Consumer;

use crate::{dsp::breakpoint::BreakpointCurve, synth::additive::EnvelopeTarget};

/// Commands sent from a control thread to the thread that owns the voice.
#[derive(Debug, Clone, PartialEq)]
pub enum VoiceMessage {
    NoteOn { note: u8, velocity: u8 },
    /// Releases only if `note` is the one currently playing.
    NoteOff { note: u8 },
    AllNotesOff,
    SetAttackEnvelope {
        curve: BreakpointCurve,
        target: EnvelopeTarget,
    },
    SetReleaseEnvelope {
        curve: BreakpointCurve,
        target: EnvelopeTarget,
    },
    SetOvertoneGains(Vec<f32>),
    SetGain(f32),
    SetPan(f32),
    SetGlide(f32),
}

pub trait MessageReceiver {
    fn pop(&mut self) -> Option<VoiceMessage>;
}

#[cfg(feature = "rtrb")]
impl MessageReceiver for Consumer<VoiceMessage> {
    fn pop(&mut self) -> Option<VoiceMessage> {
        Consumer::pop(self).ok()
    }
}

/// Plain queues, for tests and offline rendering.
impl MessageReceiver for std::collections::VecDeque<VoiceMessage> {
    fn pop(&mut self) -> Option<VoiceMessage> {
        self.pop_front()
    }
}
