//! Frame-like nodes: relative [`Frame`]s and absolute [`StaticFrame`]s.

use tessera_core::geometry::Bounds;

use crate::anchor::{Anchor, Axis, Edge};
use crate::error::{ConfigError, LayoutError};
use crate::layout::{FrameId, Layout};

/// Capabilities shared by every node in a [`Layout`].
///
/// Implementors supply [`compute_edge`](FrameLike::compute_edge) and their
/// minimum size; bounds and validity are derived. Nothing is cached: each
/// call re-resolves against `layout`.
pub trait FrameLike {
    /// Absolute coordinate of `edge`.
    ///
    /// # Errors
    ///
    /// [`LayoutError::UnsupportedNode`] when an anchor on the way names a
    /// node `layout` doesn't hold.
    fn compute_edge(&self, edge: Edge, layout: &Layout) -> Result<i32, LayoutError>;

    /// Smallest acceptable width.
    fn min_width(&self) -> i32;

    /// Smallest acceptable height.
    fn min_height(&self) -> i32;

    /// Absolute x of the left edge.
    fn compute_left_edge(&self, layout: &Layout) -> Result<i32, LayoutError> {
        self.compute_edge(Edge::Left, layout)
    }

    /// Absolute y of the top edge.
    fn compute_top_edge(&self, layout: &Layout) -> Result<i32, LayoutError> {
        self.compute_edge(Edge::Top, layout)
    }

    /// Absolute x of the right edge (exclusive).
    fn compute_right_edge(&self, layout: &Layout) -> Result<i32, LayoutError> {
        self.compute_edge(Edge::Right, layout)
    }

    /// Absolute y of the bottom edge (exclusive).
    fn compute_bottom_edge(&self, layout: &Layout) -> Result<i32, LayoutError> {
        self.compute_edge(Edge::Bottom, layout)
    }

    /// Resolve all four edges into fresh [`Bounds`].
    fn bounds(&self, layout: &Layout) -> Result<Bounds, LayoutError> {
        let x1 = self.compute_left_edge(layout)?;
        let x2 = self.compute_right_edge(layout)?;
        let y1 = self.compute_top_edge(layout)?;
        let y2 = self.compute_bottom_edge(layout)?;
        Ok(Bounds::new(x1, y1, x2, y2))
    }

    /// Whether the resolved size meets the minimums.
    ///
    /// A frame that no longer fits (e.g. after the terminal shrank) reports
    /// `false`; that is a value, not an error.
    fn is_size_valid(&self, layout: &Layout) -> Result<bool, LayoutError> {
        let b = self.bounds(layout)?;
        Ok(b.width() >= self.min_width() && b.height() >= self.min_height())
    }
}

/// A node fixed at absolute coordinates.
///
/// Typically the root of a layout, covering the physical screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticFrame {
    x1: i32,
    y1: i32,
    x2: i32,
    y2: i32,
    min_width: i32,
    min_height: i32,
}

impl StaticFrame {
    /// A frame of `height` x `width` cells whose top-left corner is `(y, x)`.
    ///
    /// The initial size doubles as the minimum size.
    #[must_use]
    pub const fn new(height: i32, width: i32, y: i32, x: i32) -> Self {
        let b = Bounds::from_size_at(height, width, y, x);
        Self {
            x1: b.x1,
            y1: b.y1,
            x2: b.x2,
            y2: b.y2,
            min_width: width,
            min_height: height,
        }
    }

    /// Replace all four coordinates at once. Minimum sizes are unchanged.
    pub fn resize(&mut self, height: i32, width: i32, y: i32, x: i32) {
        let b = Bounds::from_size_at(height, width, y, x);
        self.x1 = b.x1;
        self.y1 = b.y1;
        self.x2 = b.x2;
        self.y2 = b.y2;
    }

    /// Current rectangle. Needs no layout, since nothing is anchored.
    #[must_use]
    pub const fn rect(&self) -> Bounds {
        Bounds::new(self.x1, self.y1, self.x2, self.y2)
    }

    pub(crate) const fn edge(&self, edge: Edge) -> i32 {
        match edge {
            Edge::Left => self.x1,
            Edge::Top => self.y1,
            Edge::Right => self.x2,
            Edge::Bottom => self.y2,
        }
    }
}

impl FrameLike for StaticFrame {
    fn compute_edge(&self, edge: Edge, _layout: &Layout) -> Result<i32, LayoutError> {
        Ok(self.edge(edge))
    }

    fn min_width(&self) -> i32 {
        self.min_width
    }

    fn min_height(&self) -> i32 {
        self.min_height
    }
}

/// How one axis of a [`Frame`] is pinned down.
///
/// Exactly one of these holds per axis, so every edge has exactly one way
/// to be computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisConstraint {
    /// Both edges anchored; the size follows.
    Both { start: Anchor, end: Anchor },
    /// Start edge (left/top) anchored plus an explicit size.
    Start { anchor: Anchor, size: i32 },
    /// End edge (right/bottom) anchored plus an explicit size.
    End { anchor: Anchor, size: i32 },
}

impl AxisConstraint {
    fn new(
        axis: Axis,
        start: Option<Anchor>,
        end: Option<Anchor>,
        size: Option<i32>,
    ) -> Result<Self, ConfigError> {
        match (start, end, size) {
            (Some(_), Some(_), Some(_)) => Err(ConfigError::Overconstrained { axis }),
            (_, _, Some(0)) => Err(ConfigError::ZeroSize { axis }),
            (Some(start), Some(end), None) => Ok(Self::Both { start, end }),
            (Some(anchor), None, Some(size)) => Ok(Self::Start { anchor, size }),
            (None, Some(anchor), Some(size)) => Ok(Self::End { anchor, size }),
            (Some(_), None, None) | (None, Some(_), None) => Err(ConfigError::MissingSize { axis }),
            (None, None, _) => Err(match axis {
                Axis::Horizontal => ConfigError::MissingHorizontalAnchor,
                Axis::Vertical => ConfigError::MissingVerticalAnchor,
            }),
        }
    }

    /// Resolve the start edge, looking anchors up through `resolve`.
    pub(crate) fn start<E>(&self, resolve: impl Fn(&Anchor) -> Result<i32, E>) -> Result<i32, E> {
        match self {
            Self::Both { start, .. } | Self::Start { anchor: start, .. } => resolve(start),
            Self::End { anchor, size } => Ok(resolve(anchor)?.saturating_sub(*size)),
        }
    }

    /// Resolve the end edge, looking anchors up through `resolve`.
    pub(crate) fn end<E>(&self, resolve: impl Fn(&Anchor) -> Result<i32, E>) -> Result<i32, E> {
        match self {
            Self::Both { end, .. } | Self::End { anchor: end, .. } => resolve(end),
            Self::Start { anchor, size } => Ok(resolve(anchor)?.saturating_add(*size)),
        }
    }

    /// The anchors this axis depends on.
    pub fn anchors(&self) -> impl Iterator<Item = &Anchor> {
        let (first, second) = match self {
            Self::Both { start, end } => (start, Some(end)),
            Self::Start { anchor, .. } | Self::End { anchor, .. } => (anchor, None),
        };
        std::iter::once(first).chain(second)
    }

    /// The explicit size, if this axis has one.
    #[must_use]
    pub const fn size(&self) -> Option<i32> {
        match self {
            Self::Both { .. } => None,
            Self::Start { size, .. } | Self::End { size, .. } => Some(*size),
        }
    }
}

/// Anchors and sizes for a new [`Frame`], collected before validation.
///
/// ```
/// use tessera_layout::{FrameSpec, Layout};
///
/// let mut layout = Layout::new();
/// let root = layout.add_static(24, 80, 0, 0);
/// // Right-aligned column, 20 cells wide, full height.
/// let spec = FrameSpec::new()
///     .right(root.right_anchor(0))
///     .top(root.top_anchor(0))
///     .bottom(root.bottom_anchor(0))
///     .width(20);
/// let column = layout.add_frame(spec)?;
/// assert_eq!(layout.bounds(column)?.x1, 60);
/// # Ok::<(), tessera_layout::LayoutError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSpec {
    pub left: Option<Anchor>,
    pub right: Option<Anchor>,
    pub top: Option<Anchor>,
    pub bottom: Option<Anchor>,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub min_width: i32,
    pub min_height: i32,
}

impl Default for FrameSpec {
    fn default() -> Self {
        Self {
            left: None,
            right: None,
            top: None,
            bottom: None,
            width: None,
            height: None,
            min_width: 1,
            min_height: 1,
        }
    }
}

impl FrameSpec {
    /// An empty spec with 1x1 minimum size.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Anchor the left edge.
    #[must_use]
    pub fn left(mut self, anchor: Anchor) -> Self {
        self.left = Some(anchor);
        self
    }

    /// Anchor the right edge.
    #[must_use]
    pub fn right(mut self, anchor: Anchor) -> Self {
        self.right = Some(anchor);
        self
    }

    /// Anchor the top edge.
    #[must_use]
    pub fn top(mut self, anchor: Anchor) -> Self {
        self.top = Some(anchor);
        self
    }

    /// Anchor the bottom edge.
    #[must_use]
    pub fn bottom(mut self, anchor: Anchor) -> Self {
        self.bottom = Some(anchor);
        self
    }

    /// Explicit width.
    #[must_use]
    pub fn width(mut self, width: i32) -> Self {
        self.width = Some(width);
        self
    }

    /// Explicit height.
    #[must_use]
    pub fn height(mut self, height: i32) -> Self {
        self.height = Some(height);
        self
    }

    /// Minimum width for [`FrameLike::is_size_valid`].
    #[must_use]
    pub fn min_width(mut self, min_width: i32) -> Self {
        self.min_width = min_width;
        self
    }

    /// Minimum height for [`FrameLike::is_size_valid`].
    #[must_use]
    pub fn min_height(mut self, min_height: i32) -> Self {
        self.min_height = min_height;
        self
    }

    /// A spec snapped to the edges of `parent`.
    ///
    /// | size       | placement                                   |
    /// |------------|---------------------------------------------|
    /// | positive   | aligned to the top/left edge, that size     |
    /// | negative   | aligned to the bottom/right edge, `abs(size)` |
    /// | `None`     | both edges anchored; size tracks the parent |
    #[must_use]
    pub fn snapped(parent: FrameId, height: Option<i32>, width: Option<i32>) -> Self {
        let mut spec = Self::new();

        match width {
            None => {
                spec.left = Some(parent.left_anchor(0));
                spec.right = Some(parent.right_anchor(0));
            }
            Some(w) if w >= 0 => {
                spec.left = Some(parent.left_anchor(0));
                spec.width = Some(w);
            }
            Some(w) => {
                spec.right = Some(parent.right_anchor(0));
                spec.width = Some(w.saturating_abs());
            }
        }

        match height {
            None => {
                spec.top = Some(parent.top_anchor(0));
                spec.bottom = Some(parent.bottom_anchor(0));
            }
            Some(h) if h >= 0 => {
                spec.top = Some(parent.top_anchor(0));
                spec.height = Some(h);
            }
            Some(h) => {
                spec.bottom = Some(parent.bottom_anchor(0));
                spec.height = Some(h.saturating_abs());
            }
        }

        spec
    }

    /// All supplied anchors with the slot they were given for.
    pub fn anchors(&self) -> impl Iterator<Item = (Edge, Anchor)> {
        [
            (Edge::Left, self.left),
            (Edge::Top, self.top),
            (Edge::Right, self.right),
            (Edge::Bottom, self.bottom),
        ]
        .into_iter()
        .filter_map(|(slot, anchor)| anchor.map(|a| (slot, a)))
    }
}

/// A node whose edges follow other nodes' edges.
///
/// Built from a [`FrameSpec`]; immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    horizontal: AxisConstraint,
    vertical: AxisConstraint,
    min_width: i32,
    min_height: i32,
}

impl Frame {
    /// Validate `spec` and build the frame.
    ///
    /// # Errors
    ///
    /// A [`ConfigError`] when an axis has no anchor, an anchor sits in a slot
    /// of the other axis, an axis has both anchors and a size, an axis has
    /// one anchor and no size, or a size is zero.
    pub fn new(spec: FrameSpec) -> Result<Self, ConfigError> {
        if spec.left.is_none() && spec.right.is_none() {
            return Err(ConfigError::MissingHorizontalAnchor);
        }
        if spec.top.is_none() && spec.bottom.is_none() {
            return Err(ConfigError::MissingVerticalAnchor);
        }
        for (slot, anchor) in spec.anchors() {
            if anchor.edge().axis() != slot.axis() {
                return Err(ConfigError::MisplacedAnchor {
                    slot,
                    anchor_edge: anchor.edge(),
                });
            }
        }

        let horizontal =
            AxisConstraint::new(Axis::Horizontal, spec.left, spec.right, spec.width)?;
        let vertical = AxisConstraint::new(Axis::Vertical, spec.top, spec.bottom, spec.height)?;

        Ok(Self {
            horizontal,
            vertical,
            min_width: spec.min_width,
            min_height: spec.min_height,
        })
    }

    /// Constraint on the left/right edges.
    #[must_use]
    pub const fn horizontal(&self) -> &AxisConstraint {
        &self.horizontal
    }

    /// Constraint on the top/bottom edges.
    #[must_use]
    pub const fn vertical(&self) -> &AxisConstraint {
        &self.vertical
    }

    /// Every anchor this frame depends on.
    pub fn anchors(&self) -> impl Iterator<Item = &Anchor> {
        self.horizontal.anchors().chain(self.vertical.anchors())
    }

    /// Every anchor paired with the edge slot it constrains.
    pub(crate) fn slotted_anchors(&self) -> impl Iterator<Item = (Edge, Anchor)> {
        fn slots(c: &AxisConstraint, start: Edge) -> [Option<(Edge, Anchor)>; 2] {
            let end = start.opposite();
            match *c {
                AxisConstraint::Both { start: s, end: e } => [Some((start, s)), Some((end, e))],
                AxisConstraint::Start { anchor, .. } => [Some((start, anchor)), None],
                AxisConstraint::End { anchor, .. } => [Some((end, anchor)), None],
            }
        }
        slots(&self.horizontal, Edge::Left)
            .into_iter()
            .chain(slots(&self.vertical, Edge::Top))
            .flatten()
    }

    /// Resolve `edge` using `resolve` to evaluate anchors.
    pub(crate) fn edge_with<E>(
        &self,
        edge: Edge,
        resolve: impl Fn(&Anchor) -> Result<i32, E>,
    ) -> Result<i32, E> {
        match edge {
            Edge::Left => self.horizontal.start(resolve),
            Edge::Right => self.horizontal.end(resolve),
            Edge::Top => self.vertical.start(resolve),
            Edge::Bottom => self.vertical.end(resolve),
        }
    }
}

impl FrameLike for Frame {
    fn compute_edge(&self, edge: Edge, layout: &Layout) -> Result<i32, LayoutError> {
        self.edge_with(edge, |anchor| anchor.compute(layout))
    }

    fn min_width(&self) -> i32 {
        self.min_width
    }

    fn min_height(&self) -> i32 {
        self.min_height
    }
}

impl TryFrom<FrameSpec> for Frame {
    type Error = ConfigError;

    fn try_from(spec: FrameSpec) -> Result<Self, Self::Error> {
        Self::new(spec)
    }
}

/// A node stored in a [`Layout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node {
    Static(StaticFrame),
    Relative(Frame),
}

impl Node {
    /// The static frame, if this is one.
    #[must_use]
    pub const fn as_static(&self) -> Option<&StaticFrame> {
        match self {
            Self::Static(frame) => Some(frame),
            Self::Relative(_) => None,
        }
    }

    /// The relative frame, if this is one.
    #[must_use]
    pub const fn as_relative(&self) -> Option<&Frame> {
        match self {
            Self::Static(_) => None,
            Self::Relative(frame) => Some(frame),
        }
    }
}

impl FrameLike for Node {
    fn compute_edge(&self, edge: Edge, layout: &Layout) -> Result<i32, LayoutError> {
        match self {
            Self::Static(frame) => frame.compute_edge(edge, layout),
            Self::Relative(frame) => frame.compute_edge(edge, layout),
        }
    }

    fn min_width(&self) -> i32 {
        match self {
            Self::Static(frame) => frame.min_width(),
            Self::Relative(frame) => frame.min_width(),
        }
    }

    fn min_height(&self) -> i32 {
        match self {
            Self::Static(frame) => frame.min_height(),
            Self::Relative(frame) => frame.min_height(),
        }
    }
}
