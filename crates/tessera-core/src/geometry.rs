#![forbid(unsafe_code)]

//! Geometric primitives.

/// An axis-aligned rectangle in screen cells, stored as its four edges.
///
/// Uses terminal coordinates (0-indexed, origin at top-left). `x1`/`y1` are
/// the inclusive left/top edges and `x2`/`y2` the exclusive right/bottom
/// edges. Coordinates are signed: layouts may legitimately place a region
/// partly off-screen, and misordered edges produce negative sizes rather
/// than wrapping.
///
/// `Bounds` is a plain value. Geometry changes build a new one; nothing
/// mutates it in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Bounds {
    /// Left edge (inclusive).
    pub x1: i32,
    /// Top edge (inclusive).
    pub y1: i32,
    /// Right edge (exclusive).
    pub x2: i32,
    /// Bottom edge (exclusive).
    pub y2: i32,
}

impl Bounds {
    /// Create bounds from four edges. No ordering is enforced.
    #[inline]
    pub const fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Create bounds from a `(height, width, y, x)` quadruple, the order
    /// used throughout the frame and canvas APIs. Far edges saturate at the
    /// `i32` range.
    #[inline]
    pub const fn from_size_at(height: i32, width: i32, y: i32, x: i32) -> Self {
        Self::new(x, y, x.saturating_add(width), y.saturating_add(height))
    }

    /// Width in cells. Negative when `x2 < x1`; saturates at the `i32` range.
    #[inline]
    pub const fn width(&self) -> i32 {
        self.x2.saturating_sub(self.x1)
    }

    /// Height in cells. Negative when `y2 < y1`; saturates at the `i32` range.
    #[inline]
    pub const fn height(&self) -> i32 {
        self.y2.saturating_sub(self.y1)
    }

    /// True when width or height is zero or negative.
    #[inline]
    pub const fn is_degenerate(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }

    /// Area in cells, or 0 for degenerate bounds.
    #[inline]
    pub const fn area(&self) -> u64 {
        if self.is_degenerate() {
            0
        } else {
            self.width() as u64 * self.height() as u64
        }
    }

    /// Test whether `other`, given relative to this rectangle's top-left
    /// corner, fits inside it: `0 <= other.x1 < other.x2 <= width` and the
    /// same for y. This is the frame of reference `make_sub_frame` takes.
    ///
    /// A degenerate `other` is never contained, and a degenerate `self`
    /// contains nothing.
    #[inline]
    pub const fn contains(&self, other: &Bounds) -> bool {
        !self.is_degenerate()
            && !other.is_degenerate()
            && other.x1 >= 0
            && other.y1 >= 0
            && other.x2 <= self.width()
            && other.y2 <= self.height()
    }

    /// Check whether the cell at `(x, y)` lies inside the rectangle.
    #[inline]
    pub const fn contains_point(&self, x: i32, y: i32) -> bool {
        x >= self.x1 && x < self.x2 && y >= self.y1 && y < self.y2
    }

    /// Return these bounds shifted by `(dx, dy)`.
    #[inline]
    #[must_use]
    pub const fn translate(&self, dx: i32, dy: i32) -> Self {
        Self::new(
            self.x1.saturating_add(dx),
            self.y1.saturating_add(dy),
            self.x2.saturating_add(dx),
            self.y2.saturating_add(dy),
        )
    }

    /// Overlap with another rectangle, or `None` when they don't overlap.
    pub fn intersection(&self, other: &Bounds) -> Option<Bounds> {
        let x1 = self.x1.max(other.x1);
        let y1 = self.y1.max(other.y1);
        let x2 = self.x2.min(other.x2);
        let y2 = self.y2.min(other.y2);

        if x1 < x2 && y1 < y2 {
            Some(Bounds::new(x1, y1, x2, y2))
        } else {
            None
        }
    }
}
