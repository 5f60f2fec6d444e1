use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crossbeam_channel::Sender;

use super::player_id::{PlayerId, next_player_id};
use super::sample_buffer::SampleBuffer;
use crate::audio_api::{AudioCommand, Player};

/// Player handle backed by a slot in the audio engine. Every call is a
/// command on the engine's queue; `is_playing` reads a flag the engine clears
/// when the sample runs out or is paused.
pub struct EnginePlayer {
    id: PlayerId,
    tx: Sender<AudioCommand>,
    playing: Arc<AtomicBool>,
    playback: u64,
    released: bool,
}

impl EnginePlayer {
    pub fn register(tx: Sender<AudioCommand>, buffer: SampleBuffer) -> Self {
        let id = next_player_id();
        let playing = Arc::new(AtomicBool::new(false));
        let _ = tx.try_send(AudioCommand::Register {
            id,
            buffer,
            playing: playing.clone(),
        });
        Self { id, tx, playing, playback: 0, released: false }
    }

    fn send(&self, cmd: AudioCommand) {
        if self.released {
            return;
        }
        if self.tx.try_send(cmd).is_err() {
            log::warn!("{}: audio command queue full or closed, dropping command", self.id);
        }
    }
}

impl Player for EnginePlayer {
    fn id(&self) -> PlayerId {
        self.id
    }

    fn start(&mut self) {
        // set before the engine gets to it so a tap right after start sees a playing sample
        self.playing.store(true, Ordering::Release);
        self.playback += 1;
        self.send(AudioCommand::Start { id: self.id, playback: self.playback });
    }

    fn pause(&mut self) {
        self.playing.store(false, Ordering::Release);
        self.send(AudioCommand::Pause(self.id));
    }

    fn seek_to(&mut self, frame: usize) {
        self.send(AudioCommand::Seek { id: self.id, frame });
    }

    fn is_playing(&self) -> bool {
        !self.released && self.playing.load(Ordering::Acquire)
    }

    fn set_looping(&mut self, looping: bool) {
        self.send(AudioCommand::SetLooping { id: self.id, looping });
    }

    fn set_speed(&mut self, speed: f32) {
        self.send(AudioCommand::SetSpeed { id: self.id, speed });
    }

    fn set_gain(&mut self, gain: f32) {
        self.send(AudioCommand::SetGain { id: self.id, gain });
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.send(AudioCommand::Release(self.id));
        self.released = true;
    }

    fn playback(&self) -> u64 {
        self.playback
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::Receiver;

    fn player() -> (EnginePlayer, Receiver<AudioCommand>) {
        let (tx, rx) = crossbeam_channel::bounded(16);
        let player = EnginePlayer::register(tx, SampleBuffer::default());
        (player, rx)
    }

    #[test]
    fn registers_itself_with_the_engine() {
        let (player, rx) = player();
        match rx.try_recv() {
            Ok(AudioCommand::Register { id, .. }) => assert_eq!(id, player.id()),
            other => panic!("expected Register, got {other:?}"),
        }
    }

    #[test]
    fn transport_calls_become_commands() {
        let (mut player, rx) = player();
        let _ = rx.try_recv();

        player.start();
        assert!(player.is_playing());
        player.seek_to(0);
        player.pause();
        assert!(!player.is_playing());

        let cmds: Vec<AudioCommand> = rx.try_iter().collect();
        assert!(matches!(cmds[0], AudioCommand::Start { id, playback: 1 } if id == player.id()));
        assert!(matches!(cmds[1], AudioCommand::Seek { frame: 0, .. }));
        assert!(matches!(cmds[2], AudioCommand::Pause(_)));
    }

    #[test]
    fn every_start_opens_a_new_playback() {
        let (mut player, rx) = player();
        let _ = rx.try_recv();
        assert_eq!(player.playback(), 0);

        player.start();
        player.start();
        assert_eq!(player.playback(), 2);
        let numbers: Vec<u64> = rx
            .try_iter()
            .filter_map(|cmd| match cmd {
                AudioCommand::Start { playback, .. } => Some(playback),
                _ => None,
            })
            .collect();
        assert_eq!(numbers, vec![1, 2]);
    }

    #[test]
    fn release_is_sent_once_and_silences_the_handle() {
        let (mut player, rx) = player();
        let _ = rx.try_recv();

        player.release();
        player.release();
        player.start();
        assert!(!player.is_playing());

        let cmds: Vec<AudioCommand> = rx.try_iter().collect();
        assert_eq!(cmds.len(), 1);
        assert!(matches!(cmds[0], AudioCommand::Release(_)));
    }
}
