use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crossbeam_channel::Sender;

use super::frame::StereoFrame;
use super::player_id::PlayerId;
use super::sample_buffer::SampleBuffer;
use super::voice::Voice;
use crate::audio_api::{AudioCommand, AudioEvent};

pub const MAX_PLAYERS: usize = 32; // hard cap so the callback never reallocates or frees

struct Slot {
    id: PlayerId,
    buffer: SampleBuffer,
    voice: Voice,
    playback: u64, // number of the start the voice is playing
    playing: Arc<AtomicBool>,
}

impl Slot {
    fn set_active(&mut self, active: bool) {
        self.voice.active = active;
        self.playing.store(active, Ordering::Release);
    }
}

pub struct Engine {
    slots: Vec<Slot>,
    // Released slots are parked here instead of dropped, so their buffers are
    // freed with the engine and not inside the audio callback. Registration
    // counts them against MAX_PLAYERS, so this never grows past capacity.
    retired: Vec<Slot>,
    events_tx: Option<Sender<AudioEvent>>,
}

impl Engine {
    pub fn new() -> Self {
        Self {
            slots: Vec::with_capacity(MAX_PLAYERS),
            retired: Vec::with_capacity(MAX_PLAYERS),
            events_tx: None,
        }
    }

    pub fn set_events_tx(&mut self, tx: Sender<AudioEvent>) {
        self.events_tx = Some(tx);
    }

    pub fn handle_cmd(&mut self, cmd: AudioCommand) {
        match cmd {
            AudioCommand::Register { id, buffer, playing } => {
                playing.store(false, Ordering::Release);
                if self.slots.len() + self.retired.len() >= MAX_PLAYERS {
                    return; // the handle stays silent
                }
                self.slots.push(Slot {
                    id,
                    buffer,
                    voice: Voice::default(),
                    playback: 0,
                    playing,
                });
            }
            AudioCommand::Start { id, playback } => {
                if let Some(slot) = self.slot_mut(id) {
                    slot.playback = playback;
                    slot.set_active(true);
                }
            }
            AudioCommand::Pause(id) => {
                if let Some(slot) = self.slot_mut(id) {
                    slot.set_active(false);
                }
            }
            AudioCommand::Seek { id, frame } => {
                if let Some(slot) = self.slot_mut(id) {
                    let length = slot.buffer.len();
                    slot.voice.set_pos(frame, length);
                }
            }
            AudioCommand::SetLooping { id, looping } => {
                if let Some(slot) = self.slot_mut(id) {
                    slot.voice.looping = looping;
                }
            }
            AudioCommand::SetSpeed { id, speed } => {
                if let Some(slot) = self.slot_mut(id) {
                    slot.voice.speed = speed;
                }
            }
            AudioCommand::SetGain { id, gain } => {
                if let Some(slot) = self.slot_mut(id) {
                    slot.voice.gain = gain;
                }
            }
            AudioCommand::Release(id) => {
                if let Some(idx) = self.slots.iter().position(|s| s.id == id) {
                    let slot = self.slots.swap_remove(idx);
                    slot.playing.store(false, Ordering::Release);
                    self.retired.push(slot);
                }
            }
        }
    }

    pub fn render_block(&mut self, out: &mut [StereoFrame]) {
        out.fill(StereoFrame::zero());
        for slot in &mut self.slots {
            if slot.voice.render_into(&slot.buffer, out) {
                slot.playing.store(false, Ordering::Release);
                if let Some(tx) = &self.events_tx {
                    let _ = tx.try_send(AudioEvent::Completed {
                        id: slot.id,
                        playback: slot.playback,
                    });
                }
            }
        }
    }

    #[cfg(test)]
    pub fn num_players(&self) -> usize {
        self.slots.len()
    }

    fn slot_mut(&mut self, id: PlayerId) -> Option<&mut Slot> {
        self.slots.iter_mut().find(|s| s.id == id)
    }
}
