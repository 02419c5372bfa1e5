#![forbid(unsafe_code)]

//! Drawing surfaces sized from layout frames.
//!
//! A [`Canvas`] owns a [`Buffer`] exactly as large as its frame's resolved
//! bounds and remembers where that frame sits on screen. Drawing happens in
//! canvas-local coordinates `(y, x)`; [`Screen::stage`](crate::screen::Screen::stage)
//! later copies the buffer to the frame's absolute position.
//!
//! Canvases don't track resizes on their own. After the layout changes, call
//! [`Canvas::sync`] to re-resolve the frame and reallocate if needed.

use tessera_layout::{Bounds, FrameId, Layout};
use unicode_width::UnicodeWidthChar;

use crate::buffer::Buffer;
use crate::cell::{Cell, StyleFlags};
use crate::error::RenderError;

/// Box-drawing glyphs used by [`Canvas::border`].
pub mod glyphs {
    pub const HLINE: char = '─';
    pub const VLINE: char = '│';
    pub const TOP_LEFT: char = '┌';
    pub const TOP_RIGHT: char = '┐';
    pub const BOTTOM_LEFT: char = '└';
    pub const BOTTOM_RIGHT: char = '┘';
}

/// A rectangular drawing surface bound to a layout frame.
#[derive(Debug, Clone)]
pub struct Canvas {
    frame: FrameId,
    bounds: Bounds,
    buffer: Buffer,
    cursor_y: u16,
    cursor_x: u16,
    attrs: StyleFlags,
    background: Cell,
    scroll_ok: bool,
    repaint: bool,
}

fn checked_size(frame: FrameId, bounds: Bounds) -> Result<(u16, u16), RenderError> {
    let invalid = RenderError::InvalidGeometry { frame, bounds };
    if bounds.is_degenerate() {
        return Err(invalid);
    }
    let width = u16::try_from(bounds.width()).map_err(|_| invalid)?;
    let height = u16::try_from(bounds.height()).map_err(|_| invalid)?;
    Ok((width, height))
}

impl Canvas {
    /// A blank canvas covering `frame`'s current bounds.
    ///
    /// # Errors
    ///
    /// [`RenderError::Layout`] if the frame can't be resolved,
    /// [`RenderError::InvalidGeometry`] if it resolves to an empty or
    /// inverted rectangle.
    pub fn new(layout: &Layout, frame: FrameId) -> Result<Self, RenderError> {
        let bounds = layout.bounds(frame)?;
        let (width, height) = checked_size(frame, bounds)?;
        tessera_core::trace!(frame = %frame, width, height, "canvas created");
        Ok(Self {
            frame,
            bounds,
            buffer: Buffer::new(width, height),
            cursor_y: 0,
            cursor_x: 0,
            attrs: StyleFlags::empty(),
            background: Cell::BLANK,
            scroll_ok: false,
            repaint: false,
        })
    }

    /// Re-resolve the frame and adopt its new geometry.
    ///
    /// Content in the overlapping top-left region is kept; new cells get the
    /// background. Returns whether anything changed.
    ///
    /// # Errors
    ///
    /// As [`Canvas::new`]. On error the canvas is left unchanged.
    pub fn sync(&mut self, layout: &Layout) -> Result<bool, RenderError> {
        let bounds = layout.bounds(self.frame)?;
        if bounds == self.bounds {
            return Ok(false);
        }
        let (width, height) = checked_size(self.frame, bounds)?;
        if (width, height) != (self.buffer.width(), self.buffer.height()) {
            self.buffer = self.buffer.resized(width, height, self.background);
            self.cursor_y = self.cursor_y.min(height - 1);
            self.cursor_x = self.cursor_x.min(width - 1);
        }
        self.bounds = bounds;
        self.repaint = true;
        tessera_core::debug!(frame = %self.frame, width, height, "canvas resynced");
        Ok(true)
    }

    /// The frame this canvas follows.
    #[inline]
    pub const fn frame(&self) -> FrameId {
        self.frame
    }

    /// Absolute bounds as of creation or the last [`Canvas::sync`].
    #[inline]
    pub const fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Width in cells.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.buffer.width()
    }

    /// Height in cells.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.buffer.height()
    }

    /// The backing buffer.
    #[inline]
    pub const fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    /// Cell at canvas-local `(y, x)`.
    pub fn cell(&self, y: u16, x: u16) -> Option<&Cell> {
        self.buffer.get(x, y)
    }

    /// Row `y` as text, for inspection.
    pub fn line_text(&self, y: u16) -> String {
        self.buffer.row_text(y)
    }

    /// Paint every cell with the background and home the cursor.
    pub fn erase(&mut self) {
        self.buffer.clear_with(self.background);
        self.cursor_y = 0;
        self.cursor_x = 0;
    }

    /// Like [`Canvas::erase`], and also force the screen to repaint this
    /// region from scratch on the next present.
    pub fn clear(&mut self) {
        self.erase();
        self.repaint = true;
    }

    pub(crate) fn take_repaint(&mut self) -> bool {
        std::mem::take(&mut self.repaint)
    }

    /// Move the cursor, clamped to the canvas.
    pub fn move_to(&mut self, y: i32, x: i32) {
        let max_y = i32::from(self.height()) - 1;
        let max_x = i32::from(self.width()) - 1;
        self.cursor_y = y.clamp(0, max_y) as u16;
        self.cursor_x = x.clamp(0, max_x) as u16;
    }

    /// Cursor position `(y, x)` in canvas coordinates.
    #[inline]
    pub const fn cursor(&self) -> (u16, u16) {
        (self.cursor_y, self.cursor_x)
    }

    /// Cursor position `(y, x)` in screen coordinates.
    pub fn screen_cursor(&self) -> (i32, i32) {
        (
            self.bounds.y1 + i32::from(self.cursor_y),
            self.bounds.x1 + i32::from(self.cursor_x),
        )
    }

    /// Turn attributes on for subsequent writes.
    pub fn attr_on(&mut self, attrs: StyleFlags) {
        self.attrs.insert(attrs);
    }

    /// Turn attributes off for subsequent writes.
    pub fn attr_off(&mut self, attrs: StyleFlags) {
        self.attrs.remove(attrs);
    }

    /// Attributes applied to writes that don't pass their own.
    #[inline]
    pub const fn attrs(&self) -> StyleFlags {
        self.attrs
    }

    /// Current background cell.
    #[inline]
    pub const fn background(&self) -> Cell {
        self.background
    }

    /// Replace the background and repaint.
    ///
    /// Cells showing the old background character take the new one; every
    /// cell swaps the old background attributes for the new ones.
    pub fn set_background(&mut self, ch: char, attrs: StyleFlags) {
        let old = self.background;
        let new = Cell { ch, attrs };
        for y in 0..self.height() {
            for cell in self.buffer.row_cells_mut(y) {
                if cell.is_continuation() {
                    continue;
                }
                if cell.ch == old.ch {
                    cell.ch = new.ch;
                }
                cell.attrs = cell.attrs.difference(old.attrs).union(new.attrs);
            }
        }
        self.background = new;
    }

    /// Allow writes past the bottom-right corner to scroll the content.
    pub fn set_scroll_ok(&mut self, ok: bool) {
        self.scroll_ok = ok;
    }

    /// Whether scrolling is enabled.
    #[inline]
    pub const fn scroll_ok(&self) -> bool {
        self.scroll_ok
    }

    /// Scroll the content up by `dy` lines (down when negative). Vacated
    /// lines are filled with the background.
    ///
    /// # Errors
    ///
    /// [`RenderError::ScrollDisabled`] unless [`Canvas::set_scroll_ok`] was
    /// enabled.
    pub fn scroll(&mut self, dy: i32) -> Result<(), RenderError> {
        if !self.scroll_ok {
            return Err(RenderError::ScrollDisabled);
        }
        self.scroll_lines(dy);
        Ok(())
    }

    fn scroll_lines(&mut self, dy: i32) {
        if dy == 0 {
            return;
        }
        let mut shifted = Buffer::filled(self.width(), self.height(), self.background);
        shifted.copy_from(&self.buffer, 0, dy.saturating_neg());
        self.buffer = shifted;
    }

    fn effective_attrs(&self, attrs: Option<StyleFlags>) -> StyleFlags {
        attrs.unwrap_or(self.attrs) | self.background.attrs
    }

    /// Advance to the start of the next line, scrolling at the bottom when
    /// allowed. Returns `false` when the cursor is stuck on the last line.
    fn newline(&mut self) -> bool {
        if self.cursor_y + 1 < self.height() {
            self.cursor_y += 1;
        } else if self.scroll_ok {
            self.scroll_lines(1);
        } else {
            return false;
        }
        self.cursor_x = 0;
        true
    }

    /// Write one character at the cursor and advance, wrapping at the right
    /// edge. Returns `false` once nothing more can be written.
    fn put(&mut self, ch: char, attrs: StyleFlags) -> bool {
        if ch == '\n' {
            self.clear_to_eol();
            return self.newline();
        }
        let w = UnicodeWidthChar::width(ch).unwrap_or(0) as u16;
        if w == 0 || w > self.width() {
            return true;
        }
        if self.cursor_x + w > self.width() && !self.newline() {
            return false;
        }

        let (y, x) = (self.cursor_y, self.cursor_x);
        self.buffer.set(x, y, Cell { ch, attrs });
        if w == 2 {
            self.buffer.set(x + 1, y, Cell::CONTINUATION);
        }

        self.cursor_x += w;
        if self.cursor_x >= self.width() && !self.newline() {
            self.cursor_x = self.width() - 1;
            return false;
        }
        true
    }

    /// Position for a write at `pos`. Returns the number of leading columns
    /// to drop for a start left of the canvas, or `None` when the write
    /// misses the canvas entirely.
    fn start_at(&mut self, pos: Option<(i32, i32)>) -> Option<usize> {
        let Some((y, x)) = pos else {
            return Some(0);
        };
        if y < 0 || y >= i32::from(self.height()) || x >= i32::from(self.width()) {
            return None;
        }
        self.cursor_y = y as u16;
        self.cursor_x = x.max(0) as u16;
        Some(x.min(0).unsigned_abs() as usize)
    }

    /// Draw `ch` at `pos` (or the cursor) and advance the cursor.
    pub fn add_char(&mut self, ch: char, pos: Option<(i32, i32)>, attrs: Option<StyleFlags>) {
        let mut buf = [0u8; 4];
        self.add_str(ch.encode_utf8(&mut buf), pos, attrs);
    }

    /// Draw `text` at `pos` (or the cursor), wrapping at the right edge.
    ///
    /// `attrs` replaces the current attributes for this write only. Text
    /// that runs off the canvas is dropped; a start left of the canvas
    /// drops the leading columns.
    pub fn add_str(&mut self, text: &str, pos: Option<(i32, i32)>, attrs: Option<StyleFlags>) {
        let Some(mut skip) = self.start_at(pos) else {
            return;
        };
        let attrs = self.effective_attrs(attrs);
        for ch in text.chars() {
            if skip > 0 {
                skip = skip.saturating_sub(UnicodeWidthChar::width(ch).unwrap_or(0));
                continue;
            }
            if !self.put(ch, attrs) {
                break;
            }
        }
    }

    /// Draw `text` centered in the canvas.
    pub fn add_str_center(&mut self, text: &str) {
        let text_width: usize = text
            .chars()
            .map(|c| UnicodeWidthChar::width(c).unwrap_or(0))
            .sum();
        let text_width = i32::try_from(text_width).unwrap_or(i32::MAX);
        let x = (i32::from(self.width()) - text_width) / 2;
        let y = i32::from(self.height()) / 2;
        self.add_str(text, Some((y, x)), None);
    }

    /// Draw a one-cell box around the edges. The cursor doesn't move.
    pub fn border(&mut self) {
        let attrs = self.effective_attrs(None);
        let (w, h) = (self.width(), self.height());
        let glyph = |ch| Cell { ch, attrs };

        for x in 1..w.saturating_sub(1) {
            self.buffer.set(x, 0, glyph(glyphs::HLINE));
            self.buffer.set(x, h - 1, glyph(glyphs::HLINE));
        }
        for y in 1..h.saturating_sub(1) {
            self.buffer.set(0, y, glyph(glyphs::VLINE));
            self.buffer.set(w - 1, y, glyph(glyphs::VLINE));
        }
        self.buffer.set(0, 0, glyph(glyphs::TOP_LEFT));
        self.buffer.set(w - 1, 0, glyph(glyphs::TOP_RIGHT));
        self.buffer.set(0, h - 1, glyph(glyphs::BOTTOM_LEFT));
        self.buffer.set(w - 1, h - 1, glyph(glyphs::BOTTOM_RIGHT));
    }

    fn clear_to_eol(&mut self) {
        let (y, x) = (self.cursor_y, self.cursor_x);
        for col in x..self.width() {
            self.buffer.set(col, y, self.background);
        }
    }

    /// Blank row `y` and leave the cursor at its start.
    pub fn clear_line(&mut self, y: i32) {
        if y < 0 || y >= i32::from(self.height()) {
            return;
        }
        self.cursor_y = y as u16;
        self.cursor_x = 0;
        self.clear_to_eol();
    }

    /// Draw `n` copies of `ch` (a horizontal rule by default) rightwards from
    /// `pos` or the cursor, stopping at the edge. The cursor doesn't move.
    pub fn hline(&mut self, n: u16, ch: Option<char>, pos: Option<(i32, i32)>) {
        let (y, x) = pos.unwrap_or((i32::from(self.cursor_y), i32::from(self.cursor_x)));
        let cell = Cell {
            ch: ch.unwrap_or(glyphs::HLINE),
            attrs: self.effective_attrs(None),
        };
        for i in 0..i32::from(n) {
            self.buffer.set_signed(x + i, y, cell);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas(height: i32, width: i32) -> (Layout, Canvas) {
        let mut layout = Layout::new();
        let root = layout.add_static(height, width, 0, 0);
        let canvas = Canvas::new(&layout, root).expect("canvas");
        (layout, canvas)
    }

    #[test]
    fn sized_from_frame() {
        let mut layout = Layout::new();
        let root = layout.add_static(24, 80, 0, 0);
        let inner = layout.make_inset_frame(root, 2, 3).expect("inset");
        let canvas = Canvas::new(&layout, inner).expect("canvas");
        assert_eq!((canvas.height(), canvas.width()), (20, 74));
        assert_eq!(canvas.bounds(), Bounds::new(3, 2, 77, 22));
    }

    #[test]
    fn degenerate_frame_rejected() {
        let mut layout = Layout::new();
        let root = layout.add_static(2, 2, 0, 0);
        let inner = layout.make_inset_frame(root, 1, 1).expect("inset");
        assert_eq!(
            Canvas::new(&layout, inner).unwrap_err(),
            RenderError::InvalidGeometry {
                frame: inner,
                bounds: Bounds::new(1, 1, 1, 1)
            }
        );
    }

    #[test]
    fn add_str_at_position_with_attrs() {
        let (_, mut c) = canvas(3, 10);
        c.add_str("hi", Some((1, 2)), Some(StyleFlags::REVERSE));
        assert_eq!(c.line_text(1), "  hi      ");
        assert_eq!(c.cell(1, 2).map(|x| x.attrs), Some(StyleFlags::REVERSE));
        assert_eq!(c.cursor(), (1, 4));
    }

    #[test]
    fn add_str_wraps_and_clips_at_bottom() {
        let (_, mut c) = canvas(2, 3);
        c.add_str("abcdefgh", Some((0, 0)), None);
        assert_eq!(c.line_text(0), "abc");
        assert_eq!(c.line_text(1), "def");
        assert_eq!(c.cursor(), (1, 2));
    }

    #[test]
    fn add_str_scrolls_when_allowed() {
        let (_, mut c) = canvas(2, 3);
        c.set_scroll_ok(true);
        c.add_str("abcdefg", Some((0, 0)), None);
        assert_eq!(c.line_text(0), "def");
        assert_eq!(c.line_text(1), "g  ");
    }

    #[test]
    fn add_str_left_of_canvas_drops_leading_columns() {
        let (_, mut c) = canvas(1, 5);
        c.add_str("abcd", Some((0, -2)), None);
        assert_eq!(c.line_text(0), "cd   ");
        c.add_str("zz", Some((4, 0)), None);
        assert_eq!(c.line_text(0), "cd   ");
    }

    #[test]
    fn current_attrs_apply_to_plain_writes() {
        let (_, mut c) = canvas(1, 4);
        c.attr_on(StyleFlags::BOLD | StyleFlags::UNDERLINE);
        c.attr_off(StyleFlags::UNDERLINE);
        c.add_char('x', Some((0, 0)), None);
        assert_eq!(c.cell(0, 0).map(|x| x.attrs), Some(StyleFlags::BOLD));
        assert_eq!(c.attrs(), StyleFlags::BOLD);
    }

    #[test]
    fn newline_clears_rest_of_line() {
        let (_, mut c) = canvas(2, 4);
        c.add_str("wxyz", Some((0, 0)), None);
        c.add_str("a\nb", Some((0, 0)), None);
        assert_eq!(c.line_text(0), "a   ");
        assert_eq!(c.line_text(1), "b   ");
    }

    #[test]
    fn wide_chars_take_two_cells() {
        let (_, mut c) = canvas(1, 4);
        c.add_str("中a", Some((0, 0)), None);
        assert_eq!(c.cell(0, 1), Some(&Cell::CONTINUATION));
        assert_eq!(c.line_text(0), "中a ");
        assert_eq!(c.cursor(), (0, 3));
    }

    #[test]
    fn center_text() {
        let (_, mut c) = canvas(3, 9);
        c.add_str_center("abc");
        assert_eq!(c.line_text(1), "   abc   ");
    }

    #[test]
    fn border_draws_box() {
        let (_, mut c) = canvas(3, 4);
        c.border();
        assert_eq!(c.line_text(0), "┌──┐");
        assert_eq!(c.line_text(1), "│  │");
        assert_eq!(c.line_text(2), "└──┘");
        assert_eq!(c.cursor(), (0, 0));
    }

    #[test]
    fn scroll_requires_opt_in() {
        let (_, mut c) = canvas(3, 2);
        assert_eq!(c.scroll(1), Err(RenderError::ScrollDisabled));
        c.add_str("aabbcc", Some((0, 0)), None);
        c.set_scroll_ok(true);
        c.scroll(1).expect("scroll up");
        assert_eq!(c.line_text(0), "bb");
        assert_eq!(c.line_text(2), "  ");
        c.scroll(-2).expect("scroll down");
        assert_eq!(c.line_text(0), "  ");
        assert_eq!(c.line_text(2), "bb");
    }

    #[test]
    fn background_repaints_blanks() {
        let (_, mut c) = canvas(1, 3);
        c.add_char('x', Some((0, 1)), None);
        c.set_background('.', StyleFlags::DIM);
        assert_eq!(c.line_text(0), ".x.");
        assert_eq!(c.cell(0, 1).map(|x| x.attrs), Some(StyleFlags::DIM));
        c.erase();
        assert_eq!(c.line_text(0), "...");
    }

    #[test]
    fn clear_line_and_hline() {
        let (_, mut c) = canvas(2, 5);
        c.add_str("abcdefghij", Some((0, 0)), None);
        c.clear_line(1);
        assert_eq!(c.line_text(1), "     ");
        assert_eq!(c.cursor(), (1, 0));

        c.hline(10, None, Some((1, 2)));
        assert_eq!(c.line_text(1), "  ───");
        c.hline(2, Some('='), None);
        assert_eq!(c.line_text(1), "==───");
        assert_eq!(c.cursor(), (1, 0));
    }

    #[test]
    fn move_to_clamps() {
        let (_, mut c) = canvas(3, 4);
        c.move_to(10, -5);
        assert_eq!(c.cursor(), (2, 0));
    }

    #[test]
    fn clear_flags_repaint() {
        let (_, mut c) = canvas(1, 1);
        assert!(!c.take_repaint());
        c.clear();
        assert!(c.take_repaint());
        assert!(!c.take_repaint());
    }

    #[test]
    fn sync_follows_resize() {
        let (mut layout, mut c) = canvas(3, 4);
        let root = c.frame();
        c.add_str("ab", Some((0, 0)), None);
        assert_eq!(c.sync(&layout), Ok(false));

        layout.resize(root, 2, 6, 1, 1).expect("resize");
        assert_eq!(c.sync(&layout), Ok(true));
        assert_eq!((c.height(), c.width()), (2, 6));
        assert_eq!(c.line_text(0), "ab    ");
        assert_eq!(c.screen_cursor(), (1, 3));
    }

    #[test]
    fn sync_rejects_collapsed_frame() {
        let (mut layout, mut c) = canvas(3, 4);
        let root = c.frame();
        layout.resize(root, 0, 4, 0, 0).expect("resize");
        assert!(matches!(
            c.sync(&layout),
            Err(RenderError::InvalidGeometry { .. })
        ));
        assert_eq!(c.height(), 3);
    }
}
