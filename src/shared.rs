// How input reaches the screen:
//
// Mouse:
//   left click    //  Tap { x, y }, the clicked cell's center in surface pixels
//                 //  (one pixel per column, two pixels per row)
//
// Keyboard, same as tapping the middle of a region:
//   1 2 3 4       //  Press(loop 0 ... loop 3)
//   q w e r       //  Press(pad 0 ... pad 3)
//   a s d f       //  Press(pad 4 ... pad 7)
//   z x c v       //  Press(pad 8 ... pad 11)
//
// Other keys:
//   `             //  ToggleDebug (hit region outlines)
//   0             //  StopAll
//   Esc           //  Quit
//
// The screen owns all region state. The TUI only turns terminal events into
// InputEvents and paints whatever surface the screen rendered last.

use std::fmt;

pub const NUM_LOOPS: usize = 4;
pub const NUM_PADS: usize = 12;
pub const NUM_REGIONS: usize = NUM_LOOPS + NUM_PADS;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RegionKind {
    Loop,
    Pad,
}

/// Stable identity of a tappable region: its kind plus its position in that
/// kind's geometry table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RegionId {
    pub kind: RegionKind,
    pub index: usize,
}

impl RegionId {
    pub const fn loop_button(index: usize) -> Self {
        Self { kind: RegionKind::Loop, index }
    }

    pub const fn pad(index: usize) -> Self {
        Self { kind: RegionKind::Pad, index }
    }

    /// Base name of the audio resource bound to this region, 1-based:
    /// `loop1`..`loop4`, `sound1`..`sound12`.
    pub fn resource_name(&self) -> String {
        match self.kind {
            RegionKind::Loop => format!("loop{}", self.index + 1),
            RegionKind::Pad => format!("sound{}", self.index + 1),
        }
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            RegionKind::Loop => write!(f, "loop #{}", self.index + 1),
            RegionKind::Pad => write!(f, "pad #{}", self.index + 1),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    // tap gesture in surface coordinates
    Tap { x: f32, y: f32 },

    // keyboard shortcut for a region, resolved to a tap on its center
    Press(RegionId),

    ToggleDebug,
    StopAll,
    Quit,
}
