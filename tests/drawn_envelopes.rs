use std::collections::VecDeque;

use approx::assert_abs_diff_eq;

use additive_synth::{
    dsp::BreakpointCurve,
    editor::{CurveEditor, DisplayList, EditorConfig, PointerPress, SurfaceRect},
    synth::{AdditiveVoice, EnvelopeTarget, VoiceMessage, VoiceOptions, VoiceState},
};

const SAMPLE_RATE: f32 = 8_000.0;

/// Draw an attack curve by clicking on a 100x100 surface spanning 1 s × [0, 1].
fn drawn_attack() -> BreakpointCurve {
    let config = EditorConfig::default().x_bounds(0.0, 1.0).y_bounds(0.0, 1.0);
    let mut editor = CurveEditor::new(DisplayList::new(100.0, 100.0), config).unwrap();
    let target = SurfaceRect {
        left: 0.0,
        top: 0.0,
    };

    // clicked out of order on purpose
    for (px, py) in [(20.0, 0.0), (0.0, 100.0), (50.0, 50.0)] {
        editor.handle_press(PointerPress::primary(px, py, target));
    }

    BreakpointCurve::from_points(editor.points())
}

fn peak(block: &[f32]) -> f32 {
    block.iter().fold(0.0f32, |acc, &s| acc.max(s.abs()))
}

#[test]
fn clicked_points_become_a_sorted_envelope() {
    let curve = drawn_attack();
    assert_eq!(curve.points(), &[(0.0, 0.0), (0.2, 1.0), (0.5, 0.5)]);
    assert_abs_diff_eq!(curve.value_at(0.1), 0.5, epsilon = 1e-6);
}

#[test]
fn voice_follows_the_drawn_attack() {
    let mut voice = AdditiveVoice::new(
        SAMPLE_RATE,
        VoiceOptions {
            num_overtones: 1,
            glide_ms: 0.0,
        },
    );
    voice
        .set_attack_envelope(drawn_attack(), EnvelopeTarget::Main)
        .unwrap();
    voice.play_note(69, 127, None);

    // 50 ms blocks
    let block_len = (SAMPLE_RATE * 0.05) as usize;
    let mut blocks = Vec::new();
    for _ in 0..12 {
        let mut block = vec![0.0; block_len];
        voice.render(&mut block);
        blocks.push(peak(&block));
    }

    // rising to the 0.2 s peak, then falling towards the 0.5 held level
    assert!(blocks[0] < blocks[2], "{blocks:?}");
    assert!(blocks[3] > 0.9, "{blocks:?}");
    assert!(blocks[8] < blocks[4], "{blocks:?}");
    assert_abs_diff_eq!(blocks[11], 0.5, epsilon = 0.02);
}

#[test]
fn messages_drive_the_voice() {
    let mut voice = AdditiveVoice::new(SAMPLE_RATE, VoiceOptions::default());
    let mut queue = VecDeque::from([
        VoiceMessage::SetGain(0.5),
        VoiceMessage::SetPan(0.25),
        VoiceMessage::SetOvertoneGains(vec![1.0; 3]),
        VoiceMessage::SetReleaseEnvelope {
            curve: BreakpointCurve::ramp_down(0.01),
            target: EnvelopeTarget::Overtone(42),
        },
        VoiceMessage::NoteOn {
            note: 57,
            velocity: 127,
        },
    ]);

    voice.process_messages(&mut queue);

    assert!(queue.is_empty());
    assert_eq!(voice.state(), VoiceState::Active);
    assert_eq!(voice.pan(), 0.25);
    assert_abs_diff_eq!(voice.frequency(), 220.0, epsilon = 1e-3);
    // note on sets gain from velocity after SetGain
    assert_eq!(voice.gain(), 1.0);
    assert_eq!(&voice.overtone_gains()[..3], &[1.0, 1.0, 1.0]);

    queue.push_back(VoiceMessage::AllNotesOff);
    voice.process_messages(&mut queue);
    assert_eq!(voice.state(), VoiceState::Releasing);
}
