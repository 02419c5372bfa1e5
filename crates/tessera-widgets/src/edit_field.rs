#![forbid(unsafe_code)]

//! Single-line text entry.

use tessera_core::event::{KeyCode, KeyEvent};
use tessera_render::canvas::Canvas;
use tessera_render::cell::StyleFlags;

/// A fixed-width, single-line text field at `(y, x)` of some canvas.
///
/// The field holds text and an insertion point; drawing goes to whichever
/// canvas the caller passes in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditField {
    pos: (i32, i32),
    width: usize,
    text: String,
    /// Insertion point in characters, `0..=len`.
    cursor: usize,
}

impl EditField {
    /// An empty field `width` cells wide at `pos = (y, x)`.
    pub fn new(pos: (i32, i32), width: usize) -> Self {
        Self::with_text(pos, width, "")
    }

    /// A field pre-filled with `text`, insertion point at the start.
    pub fn with_text(pos: (i32, i32), width: usize, text: impl Into<String>) -> Self {
        Self {
            pos,
            width,
            text: text.into(),
            cursor: 0,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn pos(&self) -> (i32, i32) {
        self.pos
    }

    /// Insertion point in characters.
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    fn len(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map_or(self.text.len(), |(i, _)| i)
    }

    /// Draw the text underlined, padded to the field width.
    pub fn show(&self, canvas: &mut Canvas) {
        let width = self.width;
        let padded = format!("{:<width$}", self.text);
        canvas.add_str(&padded, Some(self.pos), Some(StyleFlags::UNDERLINE));
    }

    /// Blank the field.
    pub fn hide(&self, canvas: &mut Canvas) {
        canvas.add_str(&" ".repeat(self.width), Some(self.pos), Some(StyleFlags::empty()));
    }

    /// Put the canvas cursor at the insertion point.
    pub fn place_cursor(&self, canvas: &mut Canvas) {
        let offset = i32::try_from(self.cursor).unwrap_or(i32::MAX);
        canvas.move_to(self.pos.0, self.pos.1.saturating_add(offset));
    }

    /// Apply an editing key. Returns whether the text or insertion point
    /// changed.
    ///
    /// Backspace deletes before the insertion point, Left/Right move it
    /// within the text, and printable characters are inserted while the
    /// text is shorter than the field.
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if !key.is_press() {
            return false;
        }
        match key.code {
            KeyCode::Backspace => {
                if self.cursor == 0 {
                    return false;
                }
                let at = self.byte_offset(self.cursor - 1);
                self.text.remove(at);
                self.cursor -= 1;
                true
            }
            KeyCode::Left => {
                let before = self.cursor;
                self.cursor = self.cursor.saturating_sub(1);
                before != self.cursor
            }
            KeyCode::Right => {
                let before = self.cursor;
                self.cursor = (self.cursor + 1).min(self.len());
                before != self.cursor
            }
            KeyCode::Char(c) if !key.ctrl() && !key.alt() && !c.is_control() => {
                if self.len() >= self.width {
                    return false;
                }
                let at = self.byte_offset(self.cursor);
                self.text.insert(at, c);
                self.cursor += 1;
                true
            }
            _ => false,
        }
    }
}
