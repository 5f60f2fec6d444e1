// Presents a rendered panel surface in the terminal.
//
// Each cell shows two surface pixels stacked vertically with an upper
// half-block: foreground is the top pixel, background the bottom one. So a
// terminal area of W x H cells is a W x 2H pixel surface, and terminal cells
// being about twice as tall as wide keeps those pixels roughly square.

use image::{Rgba, RgbaImage};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::widgets::Widget;
use ratatui::Frame;

use crate::projection::Size;

const UPPER_HALF: &str = "▀";

pub fn surface_size(area: Rect) -> Size {
    Size::new(area.width as f32, area.height as f32 * 2.0)
}

pub fn surface_dimensions(area: Rect) -> (u32, u32) {
    (area.width as u32, area.height as u32 * 2)
}

// center of a cell in surface pixels
pub fn tap_point(column: u16, row: u16) -> (f32, f32) {
    (column as f32 + 0.5, row as f32 * 2.0 + 1.0)
}

pub fn draw_surface(frame: &mut Frame, area: Rect, surface: &RgbaImage) {
    frame.render_widget(SurfaceWidget(surface), area);
}

struct SurfaceWidget<'a>(&'a RgbaImage);

impl Widget for SurfaceWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let surface = self.0;
        for row in 0..area.height {
            for col in 0..area.width {
                let x = col as u32;
                let top = surface.get_pixel_checked(x, row as u32 * 2);
                let bottom = surface.get_pixel_checked(x, row as u32 * 2 + 1);
                if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
                    cell.set_symbol(UPPER_HALF)
                        .set_fg(to_color(top))
                        .set_bg(to_color(bottom));
                }
            }
        }
    }
}

fn to_color(px: Option<&Rgba<u8>>) -> Color {
    match px {
        Some(Rgba([r, g, b, _])) => Color::Rgb(*r, *g, *b),
        None => Color::Reset,
    }
}
