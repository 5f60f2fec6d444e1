use crate::shared::{NUM_LOOPS, NUM_PADS, RegionId, RegionKind};

/// Axis-aligned rectangle in panel image pixels. `right` and `bottom` are
/// exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageRect {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl ImageRect {
    pub const fn new(left: u32, top: u32, right: u32, bottom: u32) -> Self {
        Self { left, top, right, bottom }
    }

    // artwork coordinates come as origin + size
    pub const fn from_origin(left: u32, top: u32, width: u32, height: u32) -> Self {
        Self::new(left, top, left + width, top + height)
    }

    pub const fn width(&self) -> u32 {
        self.right.saturating_sub(self.left)
    }

    pub const fn height(&self) -> u32 {
        self.bottom.saturating_sub(self.top)
    }

    pub fn center(&self) -> (f32, f32) {
        (
            (self.left + self.right) as f32 / 2.0,
            (self.top + self.bottom) as f32 / 2.0,
        )
    }
}

const LOOP_W: u32 = 242;
const LOOP_H: u32 = 148;
const PAD_SIZE: u32 = 250;

// Coordinates from the panel artwork
pub const LOOP_BUTTON_RECTS: [ImageRect; NUM_LOOPS] = [
    ImageRect::from_origin(70, 239, LOOP_W, LOOP_H),  // Loop 1
    ImageRect::from_origin(323, 239, LOOP_W, LOOP_H), // Loop 2
    ImageRect::from_origin(576, 239, LOOP_W, LOOP_H), // Loop 3
    ImageRect::from_origin(829, 239, LOOP_W, LOOP_H), // Loop 4
];

pub const DRUM_PAD_RECTS: [ImageRect; NUM_PADS] = [
    // Row 1
    ImageRect::from_origin(68, 429, PAD_SIZE, PAD_SIZE),
    ImageRect::from_origin(320, 429, PAD_SIZE, PAD_SIZE),
    ImageRect::from_origin(572, 429, PAD_SIZE, PAD_SIZE),
    ImageRect::from_origin(823, 429, PAD_SIZE, PAD_SIZE),
    // Row 2
    ImageRect::from_origin(68, 684, PAD_SIZE, PAD_SIZE),
    ImageRect::from_origin(320, 684, PAD_SIZE, PAD_SIZE),
    ImageRect::from_origin(572, 684, PAD_SIZE, PAD_SIZE),
    ImageRect::from_origin(823, 684, PAD_SIZE, PAD_SIZE),
    // Row 3
    ImageRect::from_origin(68, 939, PAD_SIZE, PAD_SIZE),
    ImageRect::from_origin(320, 939, PAD_SIZE, PAD_SIZE),
    ImageRect::from_origin(572, 939, PAD_SIZE, PAD_SIZE),
    ImageRect::from_origin(823, 939, PAD_SIZE, PAD_SIZE),
];

pub fn rect_for(id: RegionId) -> Option<ImageRect> {
    match id.kind {
        RegionKind::Loop => LOOP_BUTTON_RECTS.get(id.index).copied(),
        RegionKind::Pad => DRUM_PAD_RECTS.get(id.index).copied(),
    }
}

/// Every region in table order: loop buttons first, then pads row by row.
pub fn regions() -> impl Iterator<Item = (RegionId, ImageRect)> {
    let loops = LOOP_BUTTON_RECTS
        .iter()
        .enumerate()
        .map(|(i, r)| (RegionId::loop_button(i), *r));
    let pads = DRUM_PAD_RECTS
        .iter()
        .enumerate()
        .map(|(i, r)| (RegionId::pad(i), *r));
    loops.chain(pads)
}
