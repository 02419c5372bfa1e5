#![forbid(unsafe_code)]

//! Cell types.

use unicode_width::UnicodeWidthChar;

bitflags::bitflags! {
    /// 8-bit cell style flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StyleFlags: u8 {
        /// Bold / increased intensity.
        const BOLD          = 0b0000_0001;
        /// Dim / decreased intensity.
        const DIM           = 0b0000_0010;
        /// Italic text.
        const ITALIC        = 0b0000_0100;
        /// Underlined text.
        const UNDERLINE     = 0b0000_1000;
        /// Blinking text.
        const BLINK         = 0b0001_0000;
        /// Reverse video (swap fg/bg).
        const REVERSE       = 0b0010_0000;
        /// Strikethrough text.
        const STRIKETHROUGH = 0b0100_0000;
        /// Hidden / invisible text.
        const HIDDEN        = 0b1000_0000;
    }
}

/// A single character cell.
///
/// Wide characters occupy their own cell followed by
/// [`Cell::CONTINUATION`] cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    /// Character content. `'\0'` marks a continuation cell.
    pub ch: char,
    /// Style attributes.
    pub attrs: StyleFlags,
}

impl Cell {
    /// A blank cell: space, no attributes.
    pub const BLANK: Self = Self {
        ch: ' ',
        attrs: StyleFlags::empty(),
    };

    /// Placeholder for the trailing half of a wide character.
    pub const CONTINUATION: Self = Self {
        ch: '\0',
        attrs: StyleFlags::empty(),
    };

    /// A plain cell holding `ch`.
    #[inline]
    #[must_use]
    pub const fn from_char(ch: char) -> Self {
        Self {
            ch,
            attrs: StyleFlags::empty(),
        }
    }

    /// This cell with `attrs` replacing its attributes.
    #[inline]
    #[must_use]
    pub const fn with_attrs(mut self, attrs: StyleFlags) -> Self {
        self.attrs = attrs;
        self
    }

    /// Whether this is the trailing half of a wide character.
    #[inline]
    pub const fn is_continuation(&self) -> bool {
        self.ch == '\0'
    }

    /// Display width in columns: 0 for continuations and zero-width
    /// characters, 2 for wide characters, otherwise 1.
    #[inline]
    pub fn width(&self) -> usize {
        if self.is_continuation() {
            0
        } else {
            UnicodeWidthChar::width(self.ch).unwrap_or(0)
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::BLANK
    }
}
