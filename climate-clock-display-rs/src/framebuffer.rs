//! Page-organised frame buffer with per-page change detection.
//!
//! The SSD1306 stores 128×64 pixels as 8 pages of 128 column bytes; bit 0
//! of each byte is the top pixel of the page. One page is exactly one
//! character row, so the buffer is addressed in character cells and the
//! dirty set is a bitmask of pages.

use core::convert::Infallible;

use embedded_graphics::{
    mono_font::{ascii::FONT_5X8, MonoFont, MonoTextStyle},
    pixelcolor::BinaryColor,
    prelude::*,
    text::{Baseline, Text},
};

/// Panel width in pixels.
pub const WIDTH: usize = 128;
/// Panel height in pixels.
pub const HEIGHT: usize = 64;
/// Number of 8-pixel pages; also the number of character rows.
pub const PAGES: usize = HEIGHT / 8;
/// Character pitch in pixels.
pub const CELL_WIDTH: usize = 8;

/// `FONT_5X8` padded to an 8 px pitch, giving 16 columns across the panel.
const GRID_FONT: MonoFont<'static> = MonoFont {
    character_spacing: 3,
    ..FONT_5X8
};

/// In-memory copy of the panel RAM.
pub struct FrameBuffer {
    pages: [[u8; WIDTH]; PAGES],
    /// Bit `n` set: page `n` differs from what the panel shows.
    dirty: u8,
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBuffer {
    /// An all-dark buffer with nothing pending.
    pub const fn new() -> Self {
        Self {
            pages: [[0; WIDTH]; PAGES],
            dirty: 0,
        }
    }

    /// Raw column bytes of one page.
    pub fn page(&self, page: usize) -> &[u8; WIDTH] {
        &self.pages[page]
    }

    pub fn is_dirty(&self, page: usize) -> bool {
        self.dirty & (1 << page) != 0
    }

    pub fn has_dirty(&self) -> bool {
        self.dirty != 0
    }

    /// Force pages `first..=last` to be resent on the next flush.
    pub fn mark_dirty(&mut self, first: usize, last: usize) {
        for page in first..=last.min(PAGES - 1) {
            self.dirty |= 1 << page;
        }
    }

    /// Record that `page` now matches the panel.
    pub fn mark_clean(&mut self, page: usize) {
        self.dirty &= !(1 << page);
    }

    /// Turn every pixel off. Only pages that had lit pixels become dirty.
    pub fn clear(&mut self) {
        for (n, page) in self.pages.iter_mut().enumerate() {
            if page.iter().any(|&b| b != 0) {
                page.fill(0);
                self.dirty |= 1 << n;
            }
        }
    }

    /// Replace the character cell at (`row`, `col`) with `ch`.
    ///
    /// The whole 8×8 cell is rewritten, so the previous glyph never shows
    /// through. Characters outside ASCII render as `?`. The page is marked
    /// dirty only if its bytes actually changed.
    pub fn draw_cell(&mut self, row: usize, col: usize, ch: char) {
        let x = col * CELL_WIDTH;
        if row >= PAGES || x + CELL_WIDTH > WIDTH {
            return;
        }

        let glyph = Cell::render(ch);
        let slot = &mut self.pages[row][x..x + CELL_WIDTH];
        if *slot != glyph.0 {
            slot.copy_from_slice(&glyph.0);
            self.dirty |= 1 << row;
        }
    }
}

/// Scratch target for rasterising one glyph as page bytes.
struct Cell([u8; CELL_WIDTH]);

impl Cell {
    fn render(ch: char) -> Self {
        let mut cell = Cell([0; CELL_WIDTH]);
        let mut utf8 = [0u8; 4];
        let style = MonoTextStyle::new(&GRID_FONT, BinaryColor::On);
        let _ = Text::with_baseline(ch.encode_utf8(&mut utf8), Point::zero(), style, Baseline::Top)
            .draw(&mut cell);
        cell
    }
}

impl DrawTarget for Cell {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            let (Ok(x), Ok(y)) = (usize::try_from(point.x), usize::try_from(point.y)) else {
                continue;
            };
            if x >= CELL_WIDTH || y >= 8 {
                continue;
            }
            if color.is_on() {
                self.0[x] |= 1 << y;
            } else {
                self.0[x] &= !(1 << y);
            }
        }
        Ok(())
    }
}

impl OriginDimensions for Cell {
    fn size(&self) -> Size {
        Size::new(CELL_WIDTH as u32, 8)
    }
}

// ── Unit Tests ───────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(buffer: &FrameBuffer, row: usize, col: usize) -> &[u8] {
        &buffer.page(row)[col * CELL_WIDTH..(col + 1) * CELL_WIDTH]
    }

    #[test]
    fn new_buffer_is_dark_and_clean() {
        let buffer = FrameBuffer::new();
        assert!(!buffer.has_dirty());
        assert!((0..PAGES).all(|p| buffer.page(p).iter().all(|&b| b == 0)));
    }

    #[test]
    fn glyph_lights_only_its_cell() {
        let mut buffer = FrameBuffer::new();
        buffer.draw_cell(3, 2, 'A');

        assert!(cell(&buffer, 3, 2).iter().any(|&b| b != 0));
        assert!(cell(&buffer, 3, 1).iter().all(|&b| b == 0));
        assert!(cell(&buffer, 3, 3).iter().all(|&b| b == 0));
        assert!(buffer.is_dirty(3));
        assert!(!buffer.is_dirty(2));
    }

    #[test]
    fn glyph_leaves_spacing_columns_dark() {
        let mut buffer = FrameBuffer::new();
        buffer.draw_cell(0, 0, 'W');
        assert_eq!(&cell(&buffer, 0, 0)[5..], &[0, 0, 0]);
    }

    #[test]
    fn space_erases_previous_glyph() {
        let mut buffer = FrameBuffer::new();
        buffer.draw_cell(5, 7, '8');
        buffer.mark_clean(5);

        buffer.draw_cell(5, 7, ' ');

        assert!(cell(&buffer, 5, 7).iter().all(|&b| b == 0));
        assert!(buffer.is_dirty(5));
    }

    #[test]
    fn redrawing_same_glyph_keeps_page_clean() {
        let mut buffer = FrameBuffer::new();
        buffer.draw_cell(1, 4, 'x');
        buffer.mark_clean(1);

        buffer.draw_cell(1, 4, 'x');

        assert!(!buffer.has_dirty());
    }

    #[test]
    fn cells_outside_grid_are_ignored() {
        let mut buffer = FrameBuffer::new();
        buffer.draw_cell(8, 0, 'A');
        buffer.draw_cell(0, 16, 'A');
        assert!(!buffer.has_dirty());
    }

    #[test]
    fn clear_marks_only_lit_pages() {
        let mut buffer = FrameBuffer::new();
        buffer.draw_cell(6, 0, 'T');
        buffer.mark_clean(6);

        buffer.clear();

        assert!(buffer.is_dirty(6));
        assert!(!buffer.is_dirty(0));
        assert!(buffer.page(6).iter().all(|&b| b == 0));
    }

    #[test]
    fn mark_dirty_is_inclusive_and_bounded() {
        let mut buffer = FrameBuffer::new();
        buffer.mark_dirty(6, 20);
        assert!(buffer.is_dirty(6));
        assert!(buffer.is_dirty(7));
        assert!(!buffer.is_dirty(5));
    }
}
