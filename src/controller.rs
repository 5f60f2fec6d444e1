// Per-region playback state.
//
// Every region is one record: identity, rectangle, optional player and the
// `active` flag that drives the pressed overlay. Records are built in a single
// pass over the geometry table, so a region's index, its rectangle and its
// audio resource can't drift apart.
//
// Loops toggle: Off -> On starts looped playback from 0, On -> Off pauses and
// rewinds so the next start is clean. Pads trigger: a tap always sends a rewind
// and a start, whatever the player last reported, and marks the pad active.
// Only the completion of the latest start clears it, so rapid retriggers keep
// the pad lit.
//
// A region without a player is inert. Tapping it does nothing at all: no
// state change, no overlay.

use crate::audio_api::{Player, PlayerId};
use crate::config::Settings;
use crate::geometry::{self, ImageRect};
use crate::shared::{NUM_LOOPS, NUM_PADS, RegionId, RegionKind};

pub struct Region<P> {
    pub id: RegionId,
    pub rect: ImageRect,
    pub active: bool,
    player: Option<P>,
}

impl<P: Player> Region<P> {
    fn new(id: RegionId, rect: ImageRect, player: Option<P>) -> Self {
        Self { id, rect, active: false, player }
    }

    pub fn is_inert(&self) -> bool {
        self.player.is_none()
    }

    #[cfg(test)]
    pub fn player(&self) -> Option<&P> {
        self.player.as_ref()
    }
}

pub struct Controller<P: Player> {
    loops: Vec<Region<P>>,
    pads: Vec<Region<P>>,
}

impl<P: Player> Controller<P> {
    /// Build every region in table order, asking `prepare` for each one's
    /// player. `None` makes the region inert.
    pub fn build<F>(settings: &Settings, mut prepare: F) -> Self
    where
        F: FnMut(RegionId) -> Option<P>,
    {
        let mut loops = Vec::with_capacity(NUM_LOOPS);
        let mut pads = Vec::with_capacity(NUM_PADS);
        for (id, rect) in geometry::regions() {
            let mut player = prepare(id);
            match id.kind {
                RegionKind::Loop => {
                    if let Some(p) = player.as_mut() {
                        p.set_looping(true);
                        p.set_speed(1.0);
                        p.set_gain(settings.loop_gain);
                    }
                    loops.push(Region::new(id, rect, player));
                }
                RegionKind::Pad => {
                    if let Some(p) = player.as_mut() {
                        p.set_looping(false);
                        p.set_speed(settings.pad_speed);
                        p.set_gain(settings.pad_gain);
                    }
                    pads.push(Region::new(id, rect, player));
                }
            }
        }
        let inert = loops.iter().chain(&pads).filter(|r| r.is_inert()).count();
        log::info!(
            "{} loops, {} pads ready ({} inert)",
            loops.len(),
            pads.len(),
            inert
        );
        Self { loops, pads }
    }

    /// Apply a tap on a region. Returns true if any state changed.
    pub fn tap(&mut self, id: RegionId) -> bool {
        match id.kind {
            RegionKind::Loop => self.toggle_loop(id.index),
            RegionKind::Pad => self.trigger_pad(id.index),
        }
    }

    fn toggle_loop(&mut self, index: usize) -> bool {
        let Some(region) = self.loops.get_mut(index) else {
            return false;
        };
        let Some(player) = region.player.as_mut() else {
            log::debug!("{} is inert, ignoring tap", region.id);
            return false;
        };
        region.active = !region.active;
        if region.active {
            player.seek_to(0);
            player.start();
            log::debug!("{} on", region.id);
        } else {
            if player.is_playing() {
                player.pause();
                player.seek_to(0);
            }
            log::debug!("{} off", region.id);
        }
        true
    }

    fn trigger_pad(&mut self, index: usize) -> bool {
        let Some(region) = self.pads.get_mut(index) else {
            return false;
        };
        let Some(player) = region.player.as_mut() else {
            log::debug!("{} is inert, ignoring tap", region.id);
            return false;
        };
        // is_playing can be stale by the time the engine sees these, so no branching on it
        player.seek_to(0);
        player.start();
        let changed = !region.active;
        region.active = true;
        changed
    }

    /// A player finished playback number `playback`. Clears the pad it
    /// belongs to unless the pad was retriggered since; returns true if that
    /// changed anything.
    pub fn on_completion(&mut self, player_id: PlayerId, playback: u64) -> bool {
        let pad = self
            .pads
            .iter_mut()
            .find(|r| r.player.as_ref().is_some_and(|p| p.id() == player_id));
        let Some(region) = pad else {
            return false; // loops never complete; stale ids after release are ignored
        };
        if region.player.as_ref().is_some_and(|p| p.playback() != playback) {
            log::debug!("{}: ignoring completion of superseded playback {playback}", region.id);
            return false;
        }
        let changed = region.active;
        region.active = false;
        changed
    }

    /// Silence everything and clear all state. Players stay prepared.
    pub fn stop_all(&mut self) -> bool {
        let mut changed = false;
        for region in self.loops.iter_mut().chain(self.pads.iter_mut()) {
            // a start may still be queued behind a stale is_playing, so always pause
            if let Some(player) = region.player.as_mut() {
                player.pause();
                player.seek_to(0);
            }
            changed |= region.active;
            region.active = false;
        }
        changed
    }

    /// Stop and free every player. Regions are inert afterwards.
    pub fn release(&mut self) {
        for region in self.loops.iter_mut().chain(self.pads.iter_mut()) {
            if let Some(mut player) = region.player.take() {
                player.release();
            }
            region.active = false;
        }
    }

    /// All regions in table order.
    pub fn regions(&self) -> impl Iterator<Item = &Region<P>> {
        self.loops.iter().chain(self.pads.iter())
    }

    pub fn region(&self, id: RegionId) -> Option<&Region<P>> {
        match id.kind {
            RegionKind::Loop => self.loops.get(id.index),
            RegionKind::Pad => self.pads.get(id.index),
        }
    }

    pub fn is_active(&self, id: RegionId) -> bool {
        self.region(id).is_some_and(|r| r.active)
    }

    pub fn is_inert(&self, id: RegionId) -> bool {
        self.region(id).is_none_or(|r| r.is_inert())
    }

    pub fn loop_states(&self) -> Vec<bool> {
        self.loops.iter().map(|r| r.active).collect()
    }

    pub fn pad_states(&self) -> Vec<bool> {
        self.pads.iter().map(|r| r.active).collect()
    }
}

impl<P: Player> Drop for Controller<P> {
    fn drop(&mut self) {
        self.release();
    }
}
