//! Panel rendering.
//!
//! [`render_panel`] paints one frame into an RGBA surface: background fill,
//! the idle image letterboxed into the surface, then the pressed image's
//! sub-rectangle over every active region. The output depends only on the
//! arguments.

use image::{Pixel, Rgba, RgbaImage};

use crate::geometry::ImageRect;
use crate::projection::Projection;

const DEBUG_OUTLINE: Rgba<u8> = Rgba([255, 0, 64, 140]);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderOptions {
    pub background: Rgba<u8>,
    pub debug_overlay: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            background: Rgba([255, 255, 255, 255]),
            debug_overlay: false,
        }
    }
}

/// Integer placement of the panel on the surface. Sizes and offsets are
/// truncated the same way for the base image and for every region so the
/// overlays line up with the artwork underneath.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

impl Placement {
    pub fn of_image(projection: &Projection, surface: (u32, u32), image: (u32, u32)) -> Self {
        let width = (image.0 as f32 * projection.scale) as u32;
        let height = (image.1 as f32 * projection.scale) as u32;
        Self {
            x: ((surface.0 as f32 - width as f32) / 2.0) as i64,
            y: ((surface.1 as f32 - height as f32) / 2.0) as i64,
            width,
            height,
        }
    }

    pub fn of_region(&self, projection: &Projection, rect: &ImageRect) -> Self {
        Self {
            x: self.x + (rect.left as f32 * projection.scale) as i64,
            y: self.y + (rect.top as f32 * projection.scale) as i64,
            width: (rect.width() as f32 * projection.scale) as u32,
            height: (rect.height() as f32 * projection.scale) as u32,
        }
    }
}

/// Paint the panel into `surface`.
///
/// `regions` yields every region's rectangle with its active flag. Overlays
/// need `pressed`; without it only the idle image is drawn.
pub fn render_panel<I>(
    surface: &mut RgbaImage,
    idle: &RgbaImage,
    pressed: Option<&RgbaImage>,
    projection: &Projection,
    regions: I,
    options: &RenderOptions,
) where
    I: IntoIterator<Item = (ImageRect, bool)>,
{
    clear(surface, options.background);

    let base = Placement::of_image(projection, surface.dimensions(), idle.dimensions());
    let whole = ImageRect::new(0, 0, idle.width(), idle.height());
    blit_scaled(idle, &whole, surface, base);

    for (rect, active) in regions {
        let dst = base.of_region(projection, &rect);
        if active {
            if let Some(pressed) = pressed {
                blit_scaled(pressed, &rect, surface, dst);
            }
        }
        if options.debug_overlay {
            outline(surface, dst, DEBUG_OUTLINE);
        }
    }
}

pub fn clear(surface: &mut RgbaImage, color: Rgba<u8>) {
    for px in surface.pixels_mut() {
        *px = color;
    }
}

// Nearest-neighbour copy of `src_rect` from `src` onto `dst`, alpha blended.
// Source rows/columns are clipped to the source image, destination pixels to
// the surface.
fn blit_scaled(src: &RgbaImage, src_rect: &ImageRect, dst: &mut RgbaImage, at: Placement) {
    let src_right = src_rect.right.min(src.width());
    let src_bottom = src_rect.bottom.min(src.height());
    if src_right <= src_rect.left || src_bottom <= src_rect.top || at.width == 0 || at.height == 0 {
        return;
    }
    let src_w = (src_right - src_rect.left) as f32;
    let src_h = (src_bottom - src_rect.top) as f32;

    for dy in 0..at.height {
        let ty = at.y + dy as i64;
        if ty < 0 || ty >= dst.height() as i64 {
            continue;
        }
        let sy = src_rect.top + (((dy as f32 + 0.5) * src_h / at.height as f32) as u32);
        let sy = sy.min(src_bottom - 1);
        for dx in 0..at.width {
            let tx = at.x + dx as i64;
            if tx < 0 || tx >= dst.width() as i64 {
                continue;
            }
            let sx = src_rect.left + (((dx as f32 + 0.5) * src_w / at.width as f32) as u32);
            let sx = sx.min(src_right - 1);
            let px = *src.get_pixel(sx, sy);
            dst.get_pixel_mut(tx as u32, ty as u32).blend(&px);
        }
    }
}

fn outline(dst: &mut RgbaImage, at: Placement, color: Rgba<u8>) {
    if at.width == 0 || at.height == 0 {
        return;
    }
    let right = at.x + at.width as i64 - 1;
    let bottom = at.y + at.height as i64 - 1;
    let mut plot = |x: i64, y: i64| {
        if x >= 0 && y >= 0 && x < dst.width() as i64 && y < dst.height() as i64 {
            dst.get_pixel_mut(x as u32, y as u32).blend(&color);
        }
    };
    for x in at.x..=right {
        plot(x, at.y);
        if bottom != at.y {
            plot(x, bottom);
        }
    }
    for y in (at.y + 1)..bottom {
        plot(at.x, y);
        if right != at.x {
            plot(right, y);
        }
    }
}
