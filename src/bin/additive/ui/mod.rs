//! TUI module for additive
//!
//! Two envelope editors (attack, release) and the overtone gains. Every edit
//! is pushed to the audio thread as a `VoiceMessage`.

mod envelope;
mod overtones;

use color_eyre::eyre::{Result as EyreResult, WrapErr};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, MouseEvent, MouseEventKind};
use log::{debug, warn};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color as TuiColor, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use rtrb::Producer;
use std::time::Duration;

use additive_synth::{
    dsp::breakpoint::BreakpointCurve,
    editor::{Color, EditorConfig, EditorError},
    synth::{EnvelopeTarget, VoiceMessage, VoiceOptions},
};

use envelope::EnvelopePanel;
use overtones::render_overtones;

/// Attack curves span one second, release curves two
const ATTACK_SECONDS: f64 = 1.0;
const RELEASE_SECONDS: f64 = 2.0;

/// Gain change per arrow key press
const GAIN_STEP: f32 = 0.05;

/// Computer keyboard row mapped to a C major scale from middle C
const NOTE_KEYS: [(char, u8); 8] = [
    ('a', 60),
    ('s', 62),
    ('d', 64),
    ('f', 65),
    ('g', 67),
    ('h', 69),
    ('j', 71),
    ('k', 72),
];

#[derive(Clone, Copy, PartialEq, Eq)]
enum Focus {
    Attack,
    Release,
}

/// UI application state
pub struct UiApp {
    /// Ring buffer sender for voice messages
    tx: Producer<VoiceMessage>,
    attack: EnvelopePanel,
    release: EnvelopePanel,
    focus: Focus,
    /// Local copy of the voice's overtone gains
    gains: Vec<f32>,
    selected_overtone: usize,
    options: VoiceOptions,
    should_quit: bool,
}

fn editor_config(max_seconds: f64) -> EditorConfig {
    EditorConfig::default()
        .x_bounds(0.0, max_seconds)
        .y_bounds(0.0, 1.0)
        .background_color(Color::rgb(0x10, 0x14, 0x18))
        .line_color(Color::rgb(0x4f, 0xc3, 0xf7))
        .vertex_color(Color::WHITE)
        .vertex_radius(0.4)
}

impl UiApp {
    pub fn new(
        tx: Producer<VoiceMessage>,
        options: VoiceOptions,
        gains: Vec<f32>,
    ) -> Result<Self, EditorError> {
        Ok(Self {
            tx,
            attack: EnvelopePanel::new("Attack", editor_config(ATTACK_SECONDS))?,
            release: EnvelopePanel::new("Release", editor_config(RELEASE_SECONDS))?,
            focus: Focus::Attack,
            gains,
            selected_overtone: 0,
            options,
            should_quit: false,
        })
    }

    /// Run the UI event loop
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            terminal
                .draw(|frame| self.render(frame))
                .wrap_err("failed to draw frame")?;

            if event::poll(Duration::from_millis(16))? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        self.handle_key(key.code)
                    }
                    Event::Mouse(mouse) => self.handle_mouse(mouse),
                    _ => {}
                }
            }
        }

        self.send(VoiceMessage::AllNotesOff);
        Ok(())
    }

    fn send(&mut self, msg: VoiceMessage) {
        if self.tx.push(msg).is_err() {
            warn!("voice message queue full, message dropped");
        }
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char(' ') => self.send(VoiceMessage::AllNotesOff),
            KeyCode::Tab => {
                self.focus = match self.focus {
                    Focus::Attack => Focus::Release,
                    Focus::Release => Focus::Attack,
                };
            }
            KeyCode::Char('c') => {
                match self.focus {
                    Focus::Attack => self.attack.clear(),
                    Focus::Release => self.release.clear(),
                }
                self.push_curve(self.focus);
            }
            KeyCode::Left => {
                self.selected_overtone = self.selected_overtone.saturating_sub(1);
            }
            KeyCode::Right => {
                let last = self.gains.len().saturating_sub(1);
                self.selected_overtone = (self.selected_overtone + 1).min(last);
            }
            KeyCode::Up => self.nudge_gain(GAIN_STEP),
            KeyCode::Down => self.nudge_gain(-GAIN_STEP),
            KeyCode::Char(c) => {
                if let Some(&(_, note)) = NOTE_KEYS.iter().find(|(k, _)| *k == c) {
                    debug!("note on {note}");
                    self.send(VoiceMessage::NoteOn { note, velocity: 100 });
                }
            }
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if !matches!(mouse.kind, MouseEventKind::Down(_)) {
            return;
        }

        let focus = if self.attack.contains(mouse.column, mouse.row) {
            Focus::Attack
        } else if self.release.contains(mouse.column, mouse.row) {
            Focus::Release
        } else {
            return;
        };
        self.focus = focus;

        let added = match focus {
            Focus::Attack => self.attack.handle_mouse(mouse),
            Focus::Release => self.release.handle_mouse(mouse),
        };
        if added {
            self.push_curve(focus);
        }
    }

    /// Send the drawn curve of a panel to the voice's main envelope
    fn push_curve(&mut self, which: Focus) {
        let msg = match which {
            Focus::Attack => VoiceMessage::SetAttackEnvelope {
                curve: self.attack.curve_or(BreakpointCurve::default()),
                target: EnvelopeTarget::Main,
            },
            Focus::Release => VoiceMessage::SetReleaseEnvelope {
                curve: self.release.curve_or(BreakpointCurve::ramp_down(0.1)),
                target: EnvelopeTarget::Main,
            },
        };
        self.send(msg);
    }

    fn nudge_gain(&mut self, delta: f32) {
        if let Some(gain) = self.gains.get_mut(self.selected_overtone) {
            *gain = (*gain + delta).clamp(0.0, 1.0);
            let gains = self.gains.clone();
            self.send(VoiceMessage::SetOvertoneGains(gains));
        }
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(8),    // Envelope editors
                Constraint::Length(8), // Overtones
                Constraint::Length(1), // Help bar
            ])
            .split(frame.area());

        let editors = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[0]);

        self.attack
            .render(frame, editors[0], self.focus == Focus::Attack);
        self.release
            .render(frame, editors[1], self.focus == Focus::Release);

        render_overtones(frame, chunks[1], &self.gains, self.selected_overtone);

        let help = Paragraph::new(format!(
            " [click] add point  [Tab] focus  [c] clear  [a-k] play  [Space] release  [Q] quit   glide {:.0} ms",
            self.options.glide_ms
        ))
        .style(Style::default().fg(TuiColor::DarkGray));
        frame.render_widget(help, chunks[2]);
    }
}
