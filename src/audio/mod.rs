use std::path::Path;

use anyhow::Context;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use crossbeam_channel::{Receiver, Sender};

use crate::audio_api::{AudioCommand, AudioEvent};
use crate::errors::AssetError;

mod engine;
mod frame;
mod player;
mod player_id;
mod sample_buffer;
mod voice;

#[cfg(test)]
mod timing_tests;

pub use frame::StereoFrame;
pub use player::EnginePlayer;
pub use player_id::{PlayerId, next_player_id};
pub use sample_buffer::SampleBuffer;

use engine::Engine;

// frames rendered per engine pass; cpal callbacks larger than this are split
const MAX_BLOCK_FRAMES: usize = 1024;

pub struct AudioHandle {
    tx: Sender<AudioCommand>,
    events_rx: Receiver<AudioEvent>,
    sample_rate: u32,
    _output_stream: cpal::Stream,
}

impl AudioHandle {
    pub fn poll_event(&self) -> Option<AudioEvent> {
        self.events_rx.try_recv().ok()
    }

    /// Decode a WAV at the output rate and register it with the engine.
    pub fn prepare(&self, path: &Path) -> Result<EnginePlayer, AssetError> {
        let buffer = SampleBuffer::load_wav(path, self.sample_rate)?;
        log::debug!("prepared {} ({} frames)", path.display(), buffer.len());
        Ok(EnginePlayer::register(self.tx.clone(), buffer))
    }
}

pub fn start_audio() -> anyhow::Result<AudioHandle> {
    let (tx, rx) = crossbeam_channel::bounded::<AudioCommand>(1024);
    let (events_tx, events_rx) = crossbeam_channel::bounded::<AudioEvent>(256);

    let host = cpal::default_host();
    let device = host.default_output_device().context("no default output device")?;
    let config = device.default_output_config().context("no default output config")?;

    let sample_rate = config.sample_rate();
    let channels = config.channels() as usize;
    log::info!("starting audio output ({} ch @ {} Hz)", channels, sample_rate);

    match config.sample_format() {
        cpal::SampleFormat::F32 => {
            let output_stream =
                build_output_stream_f32(&device, &config.into(), rx, events_tx, channels)?;
            output_stream.play().context("failed to play output stream")?;

            Ok(AudioHandle {
                tx,
                events_rx,
                sample_rate,
                _output_stream: output_stream,
            })
        }
        other => anyhow::bail!("unsupported sample format {other:?} (only f32 supported)"),
    }
}

fn build_output_stream_f32(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    rx: Receiver<AudioCommand>,
    events_tx: Sender<AudioEvent>,
    channels: usize,
) -> anyhow::Result<cpal::Stream> {
    let mut engine = Engine::new();
    engine.set_events_tx(events_tx);
    let mut scratch = vec![StereoFrame::zero(); MAX_BLOCK_FRAMES];

    let err_fn = |err| log::error!("audio output stream error: {err}");

    let stream = device.build_output_stream(
        config,
        move |data: &mut [f32], _info| {
            while let Ok(cmd) = rx.try_recv() {
                engine.handle_cmd(cmd);
            }
            if channels == 0 {
                return;
            }
            for chunk in data.chunks_mut(MAX_BLOCK_FRAMES * channels) {
                let frames = &mut scratch[..chunk.len() / channels];
                engine.render_block(frames);
                write_interleaved(frames, chunk, channels);
            }
        },
        err_fn,
        None,
    )?;

    Ok(stream)
}

// Spread stereo frames over the device's channel layout. Mono devices get the
// average; channels past the second are left silent.
fn write_interleaved(frames: &[StereoFrame], out: &mut [f32], channels: usize) {
    for (frame, out) in frames.iter().zip(out.chunks_exact_mut(channels)) {
        let left = frame.left.clamp(-1.0, 1.0);
        let right = frame.right.clamp(-1.0, 1.0);
        match out {
            [mono] => *mono = (left + right) * 0.5,
            [l, r, rest @ ..] => {
                *l = left;
                *r = right;
                rest.fill(0.0);
            }
            [] => {}
        }
    }
}
