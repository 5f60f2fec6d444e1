// Controller and engine stepped by hand in the order the UI loop and the audio
// callback can interleave. Commands only reach the engine when a callback
// drains its queue, and completions only reach the controller when the UI
// drains events, so each test spells out one such ordering.

use crossbeam_channel::Receiver;

use super::engine::Engine;
use super::{EnginePlayer, SampleBuffer, StereoFrame};
use crate::audio_api::{AudioCommand, AudioEvent};
use crate::config::Settings;
use crate::controller::Controller;
use crate::shared::RegionId;

const PAD: RegionId = RegionId::pad(0);

struct Rig {
    controller: Controller<EnginePlayer>,
    engine: Engine,
    commands: Receiver<AudioCommand>,
    events: Receiver<AudioEvent>,
}

impl Rig {
    // pad 0 plays `data` at speed 1.0, every other region is inert
    fn new(data: Vec<StereoFrame>) -> Self {
        let (tx, commands) = crossbeam_channel::bounded(256);
        let (events_tx, events) = crossbeam_channel::bounded(16);
        let mut engine = Engine::new();
        engine.set_events_tx(events_tx);

        let settings = Settings { pad_speed: 1.0, ..Settings::default() };
        let controller = Controller::build(&settings, |id| {
            (id == PAD).then(|| EnginePlayer::register(tx.clone(), SampleBuffer { data: data.clone() }))
        });
        Self { controller, engine, commands, events }
    }

    fn with_frames(frames: usize) -> Self {
        Self::new(vec![StereoFrame::mono(0.5); frames])
    }

    fn tap(&mut self) {
        self.controller.tap(PAD);
    }

    // one audio callback: drain the queue, then render
    fn callback(&mut self, frames: usize) -> Vec<StereoFrame> {
        while let Ok(cmd) = self.commands.try_recv() {
            self.engine.handle_cmd(cmd);
        }
        self.render(frames)
    }

    // render without draining, i.e. commands sent now land in the next callback
    fn render(&mut self, frames: usize) -> Vec<StereoFrame> {
        let mut out = vec![StereoFrame::zero(); frames];
        self.engine.render_block(&mut out);
        out
    }

    // the UI loop's per-tick drain
    fn drain_events(&mut self) {
        while let Ok(AudioEvent::Completed { id, playback }) = self.events.try_recv() {
            self.controller.on_completion(id, playback);
        }
    }

    fn pad_active(&self) -> bool {
        self.controller.is_active(PAD)
    }
}

fn audible(block: &[StereoFrame]) -> bool {
    block.iter().any(|f| *f != StereoFrame::zero())
}

#[test]
fn completion_clears_the_pad_once_playback_ends() {
    let mut rig = Rig::with_frames(4);
    rig.tap();
    assert!(audible(&rig.callback(2)));
    rig.drain_events();
    assert!(rig.pad_active());

    rig.callback(4);
    rig.drain_events();
    assert!(!rig.pad_active());
}

#[test]
fn retrigger_queued_behind_the_final_block_still_plays() {
    let mut rig = Rig::with_frames(4);
    rig.tap();
    assert!(audible(&rig.callback(2)));

    // tapped while the callback that runs the sample out is already rendering
    rig.tap();
    rig.render(2);

    let next = rig.callback(2);
    assert!(audible(&next), "retrigger went silent");
    assert_eq!(next[0], StereoFrame::mono(0.5));

    rig.drain_events();
    assert!(rig.pad_active());
    rig.callback(4);
    rig.drain_events();
    assert!(!rig.pad_active());
}

#[test]
fn completion_delivered_after_a_retrigger_keeps_the_pad_lit() {
    let mut rig = Rig::with_frames(4);
    rig.tap();
    rig.callback(8); // first playback ends, its completion is queued

    rig.tap(); // before the UI drained that completion
    assert!(audible(&rig.callback(2)));
    rig.drain_events();
    assert!(rig.pad_active(), "stale completion cleared a playing pad");

    rig.callback(8);
    rig.drain_events();
    assert!(!rig.pad_active());
}

#[test]
fn retrigger_mid_playback_restarts_from_the_top() {
    let ramp = (0..8).map(|i| StereoFrame::mono(0.125 * (i + 1) as f32)).collect();
    let mut rig = Rig::new(ramp);
    rig.tap();
    let first = rig.callback(3);
    assert_eq!(first[2], StereoFrame::mono(0.375));

    rig.tap();
    let second = rig.callback(1);
    assert_eq!(second[0], StereoFrame::mono(0.125));
    rig.drain_events();
    assert!(rig.pad_active());
}

#[test]
fn stop_all_wins_over_a_start_still_in_the_queue() {
    let mut rig = Rig::with_frames(4);
    rig.tap();
    rig.callback(2);

    rig.tap();
    rig.render(2); // engine clears the playing flag here, the new start is still queued
    rig.controller.stop_all();

    assert!(!audible(&rig.callback(4)));
    rig.drain_events();
    assert!(!rig.pad_active());
}
