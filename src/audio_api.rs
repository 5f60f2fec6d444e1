use std::sync::Arc;
use std::sync::atomic::AtomicBool;

pub use crate::audio::{PlayerId, SampleBuffer};

// What the controller plays through. The engine-backed implementation is
// `audio::EnginePlayer`; nothing above this trait knows about cpal.
pub trait Player {
    fn id(&self) -> PlayerId;
    fn start(&mut self);
    fn pause(&mut self);
    fn seek_to(&mut self, frame: usize);
    fn is_playing(&self) -> bool;
    fn set_looping(&mut self, looping: bool);
    fn set_speed(&mut self, speed: f32);
    fn set_gain(&mut self, gain: f32);
    fn release(&mut self);

    /// Number of the most recent `start`. A completion carries the number of
    /// the playback it ended, so one that arrives after a restart is stale.
    fn playback(&self) -> u64;
}

#[derive(Clone, Debug)]
pub enum AudioCommand {
    // The engine can't load files (interrupts thread), so buffers are decoded
    // up front (see SampleBuffer::load_wav) and handed over here. `playing` is
    // shared with the player handle so it can answer is_playing without a
    // round trip.
    Register {
        id: PlayerId,
        buffer: SampleBuffer,
        playing: Arc<AtomicBool>,
    },

    // Transport, addressed by player id
    Start { id: PlayerId, playback: u64 },
    Pause(PlayerId),
    Seek { id: PlayerId, frame: usize },
    SetLooping { id: PlayerId, looping: bool },
    SetSpeed { id: PlayerId, speed: f32 },
    SetGain { id: PlayerId, gain: f32 },

    // Stop and retire the slot; the id is dead afterwards
    Release(PlayerId),
}

// Sent from the audio thread back to the UI loop
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AudioEvent {
    // a non-looping player ran off the end of its buffer and rewound
    Completed { id: PlayerId, playback: u64 },
}
