//! Additive - application builder and runner

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use log::{error, info};
use rtrb::RingBuffer;

use additive_synth::{
    synth::{AdditiveVoice, VoiceMessage, VoiceOptions},
    MAX_BLOCK_SIZE,
};

use super::ui::UiApp;

/// Capacity of the UI → audio message queue
const MESSAGE_QUEUE_SIZE: usize = 256;

/// Main application builder
pub struct Additive {
    options: VoiceOptions,
}

impl Additive {
    pub fn new() -> Self {
        Self {
            options: VoiceOptions::default(),
        }
    }

    /// Number of sine partials in the voice
    pub fn overtones(mut self, count: usize) -> Self {
        self.options.num_overtones = count;
        self
    }

    /// Default glide between notes, in milliseconds
    pub fn glide_ms(mut self, glide: f32) -> Self {
        self.options.glide_ms = glide;
        self
    }

    /// Run the application (takes over the terminal, plays audio)
    pub fn run(self) -> EyreResult<()> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let config = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;

        let sample_rate = config.sample_rate().0 as f32;
        let channels = config.channels() as usize;
        info!("audio out: {sample_rate} Hz, {channels} channel(s)");

        let mut voice = AdditiveVoice::new(sample_rate, self.options);
        let initial_gains = voice.overtone_gains();

        let (tx, mut rx) = RingBuffer::<VoiceMessage>::new(MESSAGE_QUEUE_SIZE);

        let mut left = vec![0.0f32; MAX_BLOCK_SIZE];
        let mut right = vec![0.0f32; MAX_BLOCK_SIZE];

        let stream = device.build_output_stream(
            &config.into(),
            move |data: &mut [f32], _| {
                voice.process_messages(&mut rx);

                for frame_block in data.chunks_mut(MAX_BLOCK_SIZE * channels) {
                    let frames = frame_block.len() / channels;
                    let (l, r) = (&mut left[..frames], &mut right[..frames]);
                    voice.render_stereo(l, r);

                    // Interleave; mono devices get the sum, extra channels repeat L/R
                    for (i, frame) in frame_block.chunks_mut(channels).enumerate() {
                        if channels == 1 {
                            frame[0] = 0.5 * (l[i] + r[i]);
                            continue;
                        }
                        for (ch, sample) in frame.iter_mut().enumerate() {
                            *sample = if ch % 2 == 0 { l[i] } else { r[i] };
                        }
                    }
                }
            },
            |err| error!("audio stream error: {err}"),
            None,
        )?;

        stream.play()?;

        let mut ui = UiApp::new(tx, self.options, initial_gains)?;

        let mut terminal = ratatui::init();
        crossterm::execute!(std::io::stdout(), EnableMouseCapture)?;

        let result = ui.run(&mut terminal);

        crossterm::execute!(std::io::stdout(), DisableMouseCapture)?;
        ratatui::restore();
        result
    }
}

impl Default for Additive {
    fn default() -> Self {
        Self::new()
    }
}
