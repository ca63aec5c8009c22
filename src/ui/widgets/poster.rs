//! Poster widget rendering a decoded image as half-block cells

use image::{DynamicImage, GenericImageView};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// Upper half block; foreground paints the top pixel, background the bottom
const HALF_BLOCK: char = '▀';

/// A widget drawing a poster image into terminal cells, two vertically
/// stacked pixels per cell. Falls back to a placeholder message while the
/// poster is unresolved or after its fetch failed.
pub struct Poster<'a> {
    /// Decoded image to draw, when resolved
    image: Option<&'a DynamicImage>,
    /// Whether the poster fetch failed
    failed: bool,
    /// Style for placeholder text
    placeholder_style: Style,
}

impl<'a> Poster<'a> {
    pub fn new(image: Option<&'a DynamicImage>) -> Self {
        Self {
            image,
            failed: false,
            placeholder_style: Style::default().fg(Color::DarkGray),
        }
    }

    pub fn failed(mut self, failed: bool) -> Self {
        self.failed = failed;
        self
    }

    fn placeholder_text(&self) -> &'static str {
        if self.failed {
            "No poster"
        } else {
            "Loading poster..."
        }
    }
}

impl<'a> Widget for Poster<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let Some(image) = self.image else {
            render_placeholder(self.placeholder_text(), self.placeholder_style, area, buf);
            return;
        };

        // Fit the image into the cell grid; each cell holds two pixel rows
        let thumb = image.thumbnail(u32::from(area.width), u32::from(area.height) * 2);
        let (width, height) = thumb.dimensions();
        let cell_rows = height.div_ceil(2);

        // Center the thumbnail in the area
        let x_offset = (u32::from(area.width).saturating_sub(width) / 2) as u16;
        let y_offset = (u32::from(area.height).saturating_sub(cell_rows) / 2) as u16;

        for row in 0..cell_rows.min(u32::from(area.height)) {
            for col in 0..width.min(u32::from(area.width)) {
                let top = thumb.get_pixel(col, row * 2);
                let bottom = if row * 2 + 1 < height {
                    thumb.get_pixel(col, row * 2 + 1)
                } else {
                    top
                };

                let x = area.x + x_offset + col as u16;
                let y = area.y + y_offset + row as u16;
                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.set_char(HALF_BLOCK).set_style(
                        Style::default()
                            .fg(Color::Rgb(top[0], top[1], top[2]))
                            .bg(Color::Rgb(bottom[0], bottom[1], bottom[2])),
                    );
                }
            }
        }
    }
}

/// Draws the placeholder message centered in the area
fn render_placeholder(text: &str, style: Style, area: Rect, buf: &mut Buffer) {
    let y = area.y + area.height / 2;
    let len = text.len() as u16;
    let x = area.x + area.width.saturating_sub(len) / 2;

    for (i, c) in text.chars().enumerate() {
        let cx = x + i as u16;
        if cx >= area.x + area.width {
            break;
        }
        if let Some(cell) = buf.cell_mut((cx, y)) {
            cell.set_char(c).set_style(style);
        }
    }
}
