#![forbid(unsafe_code)]

//! Buffer grid storage.
//!
//! A `Buffer` is a 2D grid of [`Cell`]s stored row-major:
//! `index = y * width + x`. Writes outside the grid are dropped.
//!
//! # Invariants
//!
//! 1. `cells.len() == width * height`
//! 2. Width and height never change after creation

use tessera_core::geometry::Bounds;

use crate::cell::Cell;

/// A 2D grid of terminal cells.
///
/// ```
/// use tessera_render::buffer::Buffer;
/// use tessera_render::cell::Cell;
///
/// let mut buffer = Buffer::new(80, 24);
/// buffer.set(0, 0, Cell::from_char('H'));
/// buffer.set(1, 0, Cell::from_char('i'));
/// assert_eq!(buffer.row_text(0).trim_end(), "Hi");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Buffer {
    /// A blank buffer. Zero dimensions give an empty buffer.
    pub fn new(width: u16, height: u16) -> Self {
        Self::filled(width, height, Cell::BLANK)
    }

    /// A buffer with every cell set to `cell`.
    pub fn filled(width: u16, height: u16, cell: Cell) -> Self {
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![cell; size],
        }
    }

    /// Buffer width in cells.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Buffer height in cells.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the buffer holds no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The whole buffer as bounds at the origin.
    #[inline]
    pub fn bounds(&self) -> Bounds {
        Bounds::new(0, 0, i32::from(self.width), i32::from(self.height))
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| y as usize * self.width as usize + x as usize)
    }

    /// Cell at `(x, y)`, or `None` outside the grid.
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    /// Mutable cell at `(x, y)`, or `None` outside the grid.
    #[inline]
    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        self.index(x, y).map(|i| &mut self.cells[i])
    }

    /// Write `cell` at `(x, y)`; out-of-range writes are ignored.
    #[inline]
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(slot) = self.get_mut(x, y) {
            *slot = cell;
        }
    }

    /// Write `cell` at signed coordinates, clipping anything off-grid.
    #[inline]
    pub fn set_signed(&mut self, x: i32, y: i32, cell: Cell) {
        if let (Ok(x), Ok(y)) = (u16::try_from(x), u16::try_from(y)) {
            self.set(x, y, cell);
        }
    }

    /// Fill `rect` (clipped to the grid) with `cell`.
    pub fn fill(&mut self, rect: Bounds, cell: Cell) {
        let Some(area) = rect.intersection(&self.bounds()) else {
            return;
        };
        for y in area.y1..area.y2 {
            for x in area.x1..area.x2 {
                self.set_signed(x, y, cell);
            }
        }
    }

    /// Reset every cell to blank.
    pub fn clear(&mut self) {
        self.clear_with(Cell::BLANK);
    }

    /// Set every cell to `cell`.
    pub fn clear_with(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    /// All cells in row-major order.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Cells of row `y`; empty outside the grid.
    pub fn row_cells(&self, y: u16) -> &[Cell] {
        if y >= self.height {
            return &[];
        }
        let start = y as usize * self.width as usize;
        &self.cells[start..start + self.width as usize]
    }

    /// Mutable cells of row `y`; empty outside the grid.
    pub fn row_cells_mut(&mut self, y: u16) -> &mut [Cell] {
        if y >= self.height {
            return &mut [];
        }
        let start = y as usize * self.width as usize;
        let width = self.width as usize;
        &mut self.cells[start..start + width]
    }

    /// Row `y` as text, continuation cells skipped.
    pub fn row_text(&self, y: u16) -> String {
        self.row_cells(y)
            .iter()
            .filter(|c| !c.is_continuation())
            .map(|c| c.ch)
            .collect()
    }

    /// Copy all of `src` with its top-left corner at `(dst_x, dst_y)`,
    /// clipping whatever falls outside this buffer.
    pub fn copy_from(&mut self, src: &Buffer, dst_x: i32, dst_y: i32) {
        let target = src.bounds().translate(dst_x, dst_y);
        let Some(area) = target.intersection(&self.bounds()) else {
            return;
        };
        for y in area.y1..area.y2 {
            for x in area.x1..area.x2 {
                let (sx, sy) = ((x - dst_x) as u16, (y - dst_y) as u16);
                if let Some(cell) = src.get(sx, sy) {
                    self.set_signed(x, y, *cell);
                }
            }
        }
    }

    /// Copy of this buffer resized to `width` x `height`, keeping the
    /// overlapping top-left region and filling the rest with `fill`.
    pub fn resized(&self, width: u16, height: u16, fill: Cell) -> Buffer {
        let mut out = Buffer::filled(width, height, fill);
        out.copy_from(self, 0, 0);
        out
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::StyleFlags;

    #[test]
    fn new_is_blank() {
        let buf = Buffer::new(4, 3);
        assert_eq!(buf.len(), 12);
        assert!(buf.cells().iter().all(|c| *c == Cell::BLANK));
    }

    #[test]
    fn zero_sized_is_empty() {
        let buf = Buffer::new(0, 5);
        assert!(buf.is_empty());
        assert_eq!(buf.get(0, 0), None);
        assert_eq!(buf.row_cells(0), &[]);
    }

    #[test]
    fn out_of_range_writes_ignored() {
        let mut buf = Buffer::new(2, 2);
        buf.set(5, 0, Cell::from_char('x'));
        buf.set_signed(-1, 0, Cell::from_char('x'));
        assert!(buf.cells().iter().all(|c| *c == Cell::BLANK));
    }

    #[test]
    fn fill_clips() {
        let mut buf = Buffer::new(4, 4);
        buf.fill(Bounds::new(2, 2, 10, 10), Cell::from_char('#'));
        assert_eq!(buf.row_text(1), "    ");
        assert_eq!(buf.row_text(2), "  ##");
        assert_eq!(buf.row_text(3), "  ##");
    }

    #[test]
    fn copy_from_at_offset_clips() {
        let mut src = Buffer::new(3, 2);
        src.clear_with(Cell::from_char('a').with_attrs(StyleFlags::BOLD));
        let mut dst = Buffer::new(4, 3);
        dst.copy_from(&src, 2, 2);
        assert_eq!(dst.row_text(2), "  aa");
        assert_eq!(dst.get(2, 2).map(|c| c.attrs), Some(StyleFlags::BOLD));
        assert_eq!(dst.row_text(1), "    ");

        let mut dst = Buffer::new(4, 3);
        dst.copy_from(&src, -2, -1);
        assert_eq!(dst.row_text(0), "a   ");
    }

    #[test]
    fn resized_keeps_overlap() {
        let mut buf = Buffer::new(3, 1);
        buf.set(0, 0, Cell::from_char('x'));
        let grown = buf.resized(5, 2, Cell::from_char('.'));
        assert_eq!(grown.row_text(0), "x  ..");
        assert_eq!(grown.row_text(1), ".....");
        let shrunk = buf.resized(1, 1, Cell::BLANK);
        assert_eq!(shrunk.row_text(0), "x");
    }

    #[test]
    fn row_text_skips_continuations() {
        let mut buf = Buffer::new(3, 1);
        buf.set(0, 0, Cell::from_char('中'));
        buf.set(1, 0, Cell::CONTINUATION);
        buf.set(2, 0, Cell::from_char('!'));
        assert_eq!(buf.row_text(0), "中!");
    }
}
