#![forbid(unsafe_code)]

//! Virtual screen and diffing output.
//!
//! Drawing is two-phase. [`Screen::stage`] copies a canvas into the virtual
//! screen at the canvas frame's absolute position; nothing reaches the
//! terminal yet, so any number of canvases can be batched. [`Screen::present`]
//! then compares the virtual screen with what was last presented and writes
//! only the cells that differ.
//!
//! ```
//! use tessera_layout::Layout;
//! use tessera_render::canvas::Canvas;
//! use tessera_render::screen::Screen;
//!
//! let mut layout = Layout::new();
//! let root = layout.add_static(3, 10, 0, 0);
//! let mut canvas = Canvas::new(&layout, root)?;
//! canvas.add_str("hello", Some((1, 2)), None);
//!
//! let mut screen = Screen::new(10, 3);
//! let mut out = Vec::new();
//! screen.stage(&mut canvas);
//! screen.present(&mut out)?;
//! assert_eq!(screen.buffer().row_text(1), "  hello   ");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Attribute, Print, SetAttribute};
use crossterm::terminal::{BeginSynchronizedUpdate, Clear, ClearType, EndSynchronizedUpdate};
use tessera_layout::Bounds;

use crate::buffer::Buffer;
use crate::canvas::Canvas;
use crate::cell::{Cell, StyleFlags};

const ATTRIBUTE_MAP: [(StyleFlags, Attribute); 8] = [
    (StyleFlags::BOLD, Attribute::Bold),
    (StyleFlags::DIM, Attribute::Dim),
    (StyleFlags::ITALIC, Attribute::Italic),
    (StyleFlags::UNDERLINE, Attribute::Underlined),
    (StyleFlags::BLINK, Attribute::SlowBlink),
    (StyleFlags::REVERSE, Attribute::Reverse),
    (StyleFlags::STRIKETHROUGH, Attribute::CrossedOut),
    (StyleFlags::HIDDEN, Attribute::Hidden),
];

/// Full-terminal virtual screen.
#[derive(Debug, Clone)]
pub struct Screen {
    /// Staged content, written by `stage`.
    back: Buffer,
    /// What the terminal shows as of the last `present`.
    front: Buffer,
    /// Regions to rewrite regardless of the diff.
    dirty: Vec<Bounds>,
    full_repaint: bool,
    /// Terminal cursor `(y, x)` to leave behind after presenting.
    cursor: Option<(u16, u16)>,
}

impl Screen {
    /// A blank screen of `width` x `height`. The first present repaints
    /// everything.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            back: Buffer::new(width, height),
            front: Buffer::new(width, height),
            dirty: Vec::new(),
            full_repaint: true,
            cursor: None,
        }
    }

    /// Width in cells.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.back.width()
    }

    /// Height in cells.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.back.height()
    }

    /// The staged virtual screen.
    #[inline]
    pub const fn buffer(&self) -> &Buffer {
        &self.back
    }

    /// Reallocate for a new terminal size and force a full repaint.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.back = Buffer::new(width, height);
        self.front = Buffer::new(width, height);
        self.dirty.clear();
        self.full_repaint = true;
        tessera_core::debug!(width, height, "screen resized");
    }

    /// Blank the staged content.
    pub fn erase(&mut self) {
        self.back.clear();
    }

    /// Copy `canvas` into the virtual screen at its absolute position.
    /// Parts off-screen are clipped. Nothing is written to the terminal.
    pub fn stage(&mut self, canvas: &mut Canvas) {
        let bounds = canvas.bounds();
        self.back.copy_from(canvas.buffer(), bounds.x1, bounds.y1);
        if canvas.take_repaint() {
            self.dirty.push(bounds);
        }
    }

    /// Leave the terminal cursor at absolute `(y, x)` after presenting, or
    /// don't move it when `None` or off-screen.
    pub fn set_cursor(&mut self, pos: Option<(i32, i32)>) {
        self.cursor = pos.and_then(|(y, x)| {
            let (y, x) = (u16::try_from(y).ok()?, u16::try_from(x).ok()?);
            (y < self.height() && x < self.width()).then_some((y, x))
        });
    }

    /// Where the cursor will be left, if anywhere.
    #[inline]
    pub const fn cursor(&self) -> Option<(u16, u16)> {
        self.cursor
    }

    fn is_dirty(&self, x: u16, y: u16) -> bool {
        let (x, y) = (i32::from(x), i32::from(y));
        self.dirty.iter().any(|b| b.contains_point(x, y))
    }

    /// Write every cell that differs from the last present, then flush.
    ///
    /// Returns the number of cells written.
    ///
    /// # Errors
    ///
    /// Any I/O error from `out`.
    pub fn present<W: Write>(&mut self, out: &mut W) -> io::Result<usize> {
        queue!(out, BeginSynchronizedUpdate)?;
        if self.full_repaint {
            queue!(out, SetAttribute(Attribute::Reset), Clear(ClearType::All))?;
        }

        let mut written = 0usize;
        let mut style: Option<StyleFlags> = if self.full_repaint {
            Some(StyleFlags::empty())
        } else {
            None
        };
        let mut pen: Option<(u16, u16)> = None;

        for y in 0..self.height() {
            let mut x = 0;
            while x < self.width() {
                let cell = self.back.get(x, y).copied().unwrap_or(Cell::BLANK);
                let step = cell.width().max(1) as u16;
                if cell.is_continuation() {
                    x += 1;
                    continue;
                }
                let changed = self.full_repaint
                    || self.front.get(x, y) != Some(&cell)
                    || self.is_dirty(x, y);
                if changed {
                    if pen != Some((x, y)) {
                        queue!(out, MoveTo(x, y))?;
                    }
                    if style != Some(cell.attrs) {
                        emit_style(out, cell.attrs)?;
                        style = Some(cell.attrs);
                    }
                    queue!(out, Print(cell.ch))?;
                    written += 1;
                    pen = Some((x.saturating_add(step), y));
                }
                x = x.saturating_add(step);
            }
        }

        if style.is_some_and(|s| !s.is_empty()) {
            queue!(out, SetAttribute(Attribute::Reset))?;
        }
        if let Some((y, x)) = self.cursor {
            queue!(out, MoveTo(x, y))?;
        }
        queue!(out, EndSynchronizedUpdate)?;
        out.flush()?;

        self.front.clone_from(&self.back);
        self.dirty.clear();
        self.full_repaint = false;
        tessera_core::trace!(cells = written, "screen presented");
        Ok(written)
    }

    /// [`Screen::stage`] then [`Screen::present`].
    pub fn refresh<W: Write>(
        &mut self,
        canvas: &mut Canvas,
        out: &mut W,
    ) -> io::Result<usize> {
        self.stage(canvas);
        self.present(out)
    }
}

fn emit_style<W: Write>(out: &mut W, attrs: StyleFlags) -> io::Result<()> {
    queue!(out, SetAttribute(Attribute::Reset))?;
    for (flag, attr) in ATTRIBUTE_MAP {
        if attrs.contains(flag) {
            queue!(out, SetAttribute(attr))?;
        }
    }
    Ok(())
}
