// Letterbox fit of the panel image into the drawable surface.
//
// The panel is scaled uniformly by the smaller of the two axis ratios and then
// centered, so nothing is cropped or stretched. A projection only exists while
// both the image and the surface have a real size; without one nothing is drawn
// and no tap can hit.

use crate::geometry::ImageRect;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    fn is_drawable(&self) -> bool {
        // also rejects NaN
        self.width > 0.0 && self.height > 0.0
    }
}

/// Rectangle in surface coordinates. Containment is half-open: the left and
/// top edges belong to the rectangle, the right and bottom edges don't.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceRect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl SurfaceRect {
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.left && x < self.right && y >= self.top && y < self.bottom
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    pub scale: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl Projection {
    pub fn fit(image: Size, surface: Size) -> Option<Self> {
        if !image.is_drawable() || !surface.is_drawable() {
            return None;
        }
        let scale_x = surface.width / image.width;
        let scale_y = surface.height / image.height;
        let scale = scale_x.min(scale_y);
        Some(Self {
            scale,
            offset_x: (surface.width - image.width * scale) / 2.0,
            offset_y: (surface.height - image.height * scale) / 2.0,
        })
    }

    pub fn scaled_size(&self, image: Size) -> Size {
        Size::new(image.width * self.scale, image.height * self.scale)
    }

    pub fn project_point(&self, x: f32, y: f32) -> (f32, f32) {
        (self.offset_x + x * self.scale, self.offset_y + y * self.scale)
    }

    pub fn unproject_point(&self, x: f32, y: f32) -> (f32, f32) {
        ((x - self.offset_x) / self.scale, (y - self.offset_y) / self.scale)
    }

    pub fn project_rect(&self, rect: &ImageRect) -> SurfaceRect {
        let (left, top) = self.project_point(rect.left as f32, rect.top as f32);
        let (right, bottom) = self.project_point(rect.right as f32, rect.bottom as f32);
        SurfaceRect { left, top, right, bottom }
    }
}
