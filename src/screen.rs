// The one screen of the app: panel images, region controller, debug toggle.
//
// Everything here runs on the UI loop. A fresh projection is computed from the
// idle image and the current surface size for every tap and every frame; with
// no idle image there is no projection, so nothing is drawn and every tap
// misses.

use image::{Rgba, RgbaImage};

use crate::audio_api::{AudioEvent, Player};
use crate::controller::Controller;
use crate::geometry;
use crate::hit_test;
use crate::projection::{Projection, Size};
use crate::render::{self, RenderOptions};
use crate::shared::{InputEvent, RegionId};

pub struct Screen<P: Player> {
    idle: Option<RgbaImage>,
    pressed: Option<RgbaImage>,
    controller: Controller<P>,
    options: RenderOptions,
}

impl<P: Player> Screen<P> {
    pub fn new(
        idle: Option<RgbaImage>,
        pressed: Option<RgbaImage>,
        controller: Controller<P>,
        options: RenderOptions,
    ) -> Self {
        Self { idle, pressed, controller, options }
    }

    pub fn controller(&self) -> &Controller<P> {
        &self.controller
    }

    pub fn debug_overlay(&self) -> bool {
        self.options.debug_overlay
    }

    pub fn projection(&self, surface: Size) -> Option<Projection> {
        let idle = self.idle.as_ref()?;
        Projection::fit(Size::new(idle.width() as f32, idle.height() as f32), surface)
    }

    /// Apply one input event. Returns true if the next frame will look
    /// different. `Quit` is the caller's business and is ignored here.
    pub fn handle_input(&mut self, event: InputEvent, surface: Size) -> bool {
        match event {
            InputEvent::Tap { x, y } => self.tap(x, y, surface).is_some(),
            InputEvent::Press(id) => self.press(id, surface),
            InputEvent::ToggleDebug => {
                self.options.debug_overlay = !self.options.debug_overlay;
                log::debug!("debug overlay {}", if self.options.debug_overlay { "on" } else { "off" });
                true
            }
            InputEvent::StopAll => self.controller.stop_all(),
            InputEvent::Quit => false,
        }
    }

    /// Hit-test a tap and hand the region to the controller. Returns the region
    /// that was hit, if any.
    pub fn tap(&mut self, x: f32, y: f32, surface: Size) -> Option<RegionId> {
        let projection = self.projection(surface)?;
        let regions = self.controller.regions().map(|r| (r.id, r.rect));
        let id = hit_test::locate(x, y, &projection, regions)?;
        self.controller.tap(id);
        Some(id)
    }

    // keyboard shortcut: tap the middle of the region so it goes through the
    // same hit test a click would
    fn press(&mut self, id: RegionId, surface: Size) -> bool {
        let (Some(projection), Some(rect)) = (self.projection(surface), geometry::rect_for(id)) else {
            return false;
        };
        let (cx, cy) = rect.center();
        let (x, y) = projection.project_point(cx, cy);
        self.tap(x, y, surface).is_some()
    }

    pub fn on_audio_event(&mut self, event: AudioEvent) -> bool {
        match event {
            AudioEvent::Completed { id, playback } => self.controller.on_completion(id, playback),
        }
    }

    /// Paint the current state into `surface`, which must already have the
    /// surface size.
    pub fn render(&self, surface: &mut RgbaImage) {
        let size = Size::new(surface.width() as f32, surface.height() as f32);
        let (Some(idle), Some(projection)) = (self.idle.as_ref(), self.projection(size)) else {
            render::clear(surface, self.options.background);
            return;
        };
        let regions = self.controller.regions().map(|r| (r.rect, r.active));
        render::render_panel(
            surface,
            idle,
            self.pressed.as_ref(),
            &projection,
            regions,
            &self.options,
        );
    }
}

pub fn background_color(rgb: [u8; 3]) -> Rgba<u8> {
    Rgba([rgb[0], rgb[1], rgb[2], 255])
}
