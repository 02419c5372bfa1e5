//! Edges and anchors.

use std::fmt;

use crate::error::LayoutError;
use crate::layout::{FrameId, Layout};

/// Layout axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Left/right edges, width.
    Horizontal,
    /// Top/bottom edges, height.
    Vertical,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Horizontal => f.write_str("horizontal"),
            Self::Vertical => f.write_str("vertical"),
        }
    }
}

/// One side of a rectangular region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Edge {
    Left,
    Top,
    Right,
    Bottom,
}

impl Edge {
    /// All four edges in `Bounds` field order.
    pub const ALL: [Edge; 4] = [Edge::Left, Edge::Top, Edge::Right, Edge::Bottom];

    /// The axis this edge constrains.
    #[must_use]
    pub const fn axis(self) -> Axis {
        match self {
            Self::Left | Self::Right => Axis::Horizontal,
            Self::Top | Self::Bottom => Axis::Vertical,
        }
    }

    /// The edge across from this one.
    #[must_use]
    pub const fn opposite(self) -> Edge {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
        }
    }

    /// Dense index (`Left=0, Top=1, Right=2, Bottom=3`).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Left => 0,
            Self::Top => 1,
            Self::Right => 2,
            Self::Bottom => 3,
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => f.write_str("left"),
            Self::Top => f.write_str("top"),
            Self::Right => f.write_str("right"),
            Self::Bottom => f.write_str("bottom"),
        }
    }
}

/// A reference to one edge of a frame-like node, plus a signed offset.
///
/// Anchors are created through the factory methods on [`FrameId`]
/// (`left_anchor`, `right_anchor`, ...). They hold a handle, not the node,
/// and are resolved against a [`Layout`] on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Anchor {
    frame: FrameId,
    edge: Edge,
    offset: i32,
}

impl Anchor {
    pub(crate) const fn new(frame: FrameId, edge: Edge, offset: i32) -> Self {
        Self {
            frame,
            edge,
            offset,
        }
    }

    /// The referenced node.
    #[must_use]
    pub const fn frame(&self) -> FrameId {
        self.frame
    }

    /// Which edge of the referenced node this anchor follows.
    #[must_use]
    pub const fn edge(&self) -> Edge {
        self.edge
    }

    /// Cells added to the referenced edge.
    #[must_use]
    pub const fn offset(&self) -> i32 {
        self.offset
    }

    /// The same anchor with `delta` added to its offset.
    #[must_use]
    pub const fn shifted(self, delta: i32) -> Self {
        Self::new(self.frame, self.edge, self.offset.saturating_add(delta))
    }

    /// Resolve to an absolute coordinate: the referenced edge plus offset.
    ///
    /// Walks the reference graph from this point on every call.
    ///
    /// # Errors
    ///
    /// [`LayoutError::UnsupportedNode`] if `layout` does not hold the
    /// referenced node (an anchor built against a different layout).
    pub fn compute(&self, layout: &Layout) -> Result<i32, LayoutError> {
        let edge = layout.compute_edge(self.frame, self.edge)?;
        Ok(edge.saturating_add(self.offset))
    }
}
