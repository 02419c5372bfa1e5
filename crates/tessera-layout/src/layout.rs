//! The frame arena.
//!
//! [`Layout`] owns every node; callers hold [`FrameId`] handles and anchors
//! refer to nodes by handle. Handles carry the tag of the layout that issued
//! them, so a handle from one layout is rejected by another instead of
//! silently naming an unrelated node.

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

use tessera_core::geometry::Bounds;

use crate::anchor::{Anchor, Edge};
use crate::error::{ConfigError, LayoutError};
use crate::frame::{Frame, FrameLike, FrameSpec, Node, StaticFrame};

static NEXT_LAYOUT_TAG: AtomicU32 = AtomicU32::new(1);

/// Handle to a node in a [`Layout`].
///
/// Cheap to copy. Also the factory for [`Anchor`]s on the node's edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameId {
    layout: u32,
    index: u32,
}

impl FrameId {
    /// Position of the node in its layout's insertion order.
    #[must_use]
    pub const fn index(self) -> usize {
        self.index as usize
    }

    /// An anchor on `edge` of this node.
    #[must_use]
    pub const fn anchor(self, edge: Edge, offset: i32) -> Anchor {
        Anchor::new(self, edge, offset)
    }

    /// Anchor on the left edge.
    #[must_use]
    pub const fn left_anchor(self, offset: i32) -> Anchor {
        self.anchor(Edge::Left, offset)
    }

    /// Anchor on the right edge.
    #[must_use]
    pub const fn right_anchor(self, offset: i32) -> Anchor {
        self.anchor(Edge::Right, offset)
    }

    /// Anchor on the top edge.
    #[must_use]
    pub const fn top_anchor(self, offset: i32) -> Anchor {
        self.anchor(Edge::Top, offset)
    }

    /// Anchor on the bottom edge.
    #[must_use]
    pub const fn bottom_anchor(self, offset: i32) -> Anchor {
        self.anchor(Edge::Bottom, offset)
    }

    /// Spec for a frame at `bounds`, given relative to this node's top-left
    /// corner. The child keeps its size when the parent moves or grows.
    #[must_use]
    pub fn sub_frame_spec(self, bounds: Bounds) -> FrameSpec {
        FrameSpec::new()
            .left(self.left_anchor(bounds.x1))
            .top(self.top_anchor(bounds.y1))
            .width(bounds.width())
            .height(bounds.height())
    }

    /// Spec for a frame following all four edges of this node, pulled in by
    /// `dx` columns on the left and right and `dy` rows on the top and bottom.
    #[must_use]
    pub fn inset_frame_spec(self, dy: i32, dx: i32) -> FrameSpec {
        FrameSpec::new()
            .left(self.left_anchor(dx))
            .right(self.right_anchor(dx.saturating_neg()))
            .top(self.top_anchor(dy))
            .bottom(self.bottom_anchor(dy.saturating_neg()))
    }
}

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}@{}", self.index, self.layout)
    }
}

/// Arena of frame-like nodes.
///
/// Append-only: nodes are never removed, and a frame may only anchor to
/// nodes already present. The only mutation after insertion is
/// [`Layout::resize`] on a static frame.
#[derive(Debug)]
pub struct Layout {
    tag: u32,
    nodes: Vec<Node>,
    generation: u64,
}

impl Default for Layout {
    fn default() -> Self {
        Self::new()
    }
}

impl Layout {
    /// An empty layout with a fresh tag.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tag: NEXT_LAYOUT_TAG.fetch_add(1, Ordering::Relaxed),
            nodes: Vec::new(),
            generation: 0,
        }
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the layout holds no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Bumped by every insert and resize.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Handles of all nodes in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = FrameId> + '_ {
        (0..self.nodes.len()).map(|i| self.id_at(i))
    }

    fn id_at(&self, index: usize) -> FrameId {
        FrameId {
            layout: self.tag,
            index: index as u32,
        }
    }

    fn owns(&self, id: FrameId) -> bool {
        id.layout == self.tag && id.index() < self.nodes.len()
    }

    fn push(&mut self, node: Node) -> FrameId {
        let id = self.id_at(self.nodes.len());
        self.nodes.push(node);
        self.generation = self.generation.wrapping_add(1);
        id
    }

    /// Add a static frame of `height` x `width` at `(y, x)`.
    pub fn add_static(&mut self, height: i32, width: i32, y: i32, x: i32) -> FrameId {
        let id = self.push(Node::Static(StaticFrame::new(height, width, y, x)));
        tessera_core::debug!(frame = %id, height, width, y, x, "static frame added");
        id
    }

    /// Validate `spec` and add the resulting frame.
    ///
    /// # Errors
    ///
    /// [`LayoutError::Config`] when the spec is invalid or one of its
    /// anchors names a node this layout doesn't hold.
    pub fn add_frame(&mut self, spec: FrameSpec) -> Result<FrameId, LayoutError> {
        let frame = Frame::new(spec)?;
        self.insert_frame(frame)
    }

    /// Add an already-validated frame.
    ///
    /// # Errors
    ///
    /// [`ConfigError::DanglingAnchor`] when an anchor names a node from
    /// another layout.
    pub fn insert_frame(&mut self, frame: Frame) -> Result<FrameId, LayoutError> {
        if let Some((slot, anchor)) = frame
            .slotted_anchors()
            .find(|(_, anchor)| !self.owns(anchor.frame()))
        {
            tessera_core::warn!(%slot, target = %anchor.frame(), "rejected dangling anchor");
            return Err(ConfigError::DanglingAnchor {
                slot,
                target: anchor.frame(),
            }
            .into());
        }
        let id = self.push(Node::Relative(frame));
        tessera_core::debug!(frame = %id, "relative frame added");
        Ok(id)
    }

    /// A frame at `bounds` relative to `parent`'s top-left corner.
    ///
    /// # Errors
    ///
    /// As [`Layout::add_frame`]; a zero-sized `bounds` is a
    /// [`ConfigError::ZeroSize`].
    pub fn make_sub_frame(&mut self, parent: FrameId, bounds: Bounds) -> Result<FrameId, LayoutError> {
        self.add_frame(parent.sub_frame_spec(bounds))
    }

    /// A frame following `parent`'s edges, inset by `dy` rows and `dx`
    /// columns on each side.
    ///
    /// # Errors
    ///
    /// As [`Layout::add_frame`].
    pub fn make_inset_frame(
        &mut self,
        parent: FrameId,
        dy: i32,
        dx: i32,
    ) -> Result<FrameId, LayoutError> {
        self.add_frame(parent.inset_frame_spec(dy, dx))
    }

    /// Move and resize a static frame. Every frame anchored to it, directly
    /// or transitively, sees the new geometry on its next query.
    ///
    /// # Errors
    ///
    /// [`LayoutError::UnsupportedNode`] for a foreign handle,
    /// [`LayoutError::NotStatic`] for a relative frame.
    pub fn resize(
        &mut self,
        id: FrameId,
        height: i32,
        width: i32,
        y: i32,
        x: i32,
    ) -> Result<(), LayoutError> {
        if !self.owns(id) {
            return Err(LayoutError::UnsupportedNode { frame: id });
        }
        match &mut self.nodes[id.index()] {
            Node::Static(frame) => frame.resize(height, width, y, x),
            Node::Relative(_) => return Err(LayoutError::NotStatic { frame: id }),
        }
        self.generation = self.generation.wrapping_add(1);
        tessera_core::debug!(frame = %id, height, width, y, x, "static frame resized");
        Ok(())
    }

    /// The node behind `id`.
    ///
    /// # Errors
    ///
    /// [`LayoutError::UnsupportedNode`] for a foreign handle.
    pub fn node(&self, id: FrameId) -> Result<&Node, LayoutError> {
        if !self.owns(id) {
            return Err(LayoutError::UnsupportedNode { frame: id });
        }
        Ok(&self.nodes[id.index()])
    }

    /// Absolute coordinate of `edge` on `id`, resolved from scratch.
    ///
    /// # Errors
    ///
    /// [`LayoutError::UnsupportedNode`] for a foreign handle.
    pub fn compute_edge(&self, id: FrameId, edge: Edge) -> Result<i32, LayoutError> {
        self.node(id)?.compute_edge(edge, self)
    }

    /// Left edge of `id`.
    pub fn compute_left_edge(&self, id: FrameId) -> Result<i32, LayoutError> {
        self.compute_edge(id, Edge::Left)
    }

    /// Top edge of `id`.
    pub fn compute_top_edge(&self, id: FrameId) -> Result<i32, LayoutError> {
        self.compute_edge(id, Edge::Top)
    }

    /// Right edge of `id`.
    pub fn compute_right_edge(&self, id: FrameId) -> Result<i32, LayoutError> {
        self.compute_edge(id, Edge::Right)
    }

    /// Bottom edge of `id`.
    pub fn compute_bottom_edge(&self, id: FrameId) -> Result<i32, LayoutError> {
        self.compute_edge(id, Edge::Bottom)
    }

    /// Current bounds of `id`.
    ///
    /// # Errors
    ///
    /// [`LayoutError::UnsupportedNode`] for a foreign handle.
    pub fn bounds(&self, id: FrameId) -> Result<Bounds, LayoutError> {
        self.node(id)?.bounds(self)
    }

    /// Whether `id` currently meets its minimum size.
    pub fn is_size_valid(&self, id: FrameId) -> Result<bool, LayoutError> {
        self.node(id)?.is_size_valid(self)
    }

    /// Minimum width of `id`.
    pub fn min_width(&self, id: FrameId) -> Result<i32, LayoutError> {
        Ok(self.node(id)?.min_width())
    }

    /// Minimum height of `id`.
    pub fn min_height(&self, id: FrameId) -> Result<i32, LayoutError> {
        Ok(self.node(id)?.min_height())
    }

    /// Resolve every node in one pass.
    ///
    /// Anchors only ever name earlier nodes, so walking in insertion order
    /// sees every dependency already resolved.
    ///
    /// Complexity:
    /// - Time: `O(node_count)`
    /// - Space: `O(node_count)`
    pub fn solve(&self) -> Result<ResolvedLayout, LayoutError> {
        #[cfg(feature = "tracing")]
        let _span = tessera_core::trace_span!("layout.solve", nodes = self.nodes.len()).entered();

        let mut edges: Vec<[i32; 4]> = Vec::with_capacity(self.nodes.len());
        let mut undersized = Vec::new();

        for (i, node) in self.nodes.iter().enumerate() {
            let resolved = match node {
                Node::Static(frame) => Edge::ALL.map(|edge| frame.edge(edge)),
                Node::Relative(frame) => {
                    let lookup = |anchor: &Anchor| -> Result<i32, LayoutError> {
                        let target = anchor.frame();
                        if !self.owns(target) || target.index() >= i {
                            return Err(LayoutError::UnsupportedNode { frame: target });
                        }
                        Ok(edges[target.index()][anchor.edge().index()].saturating_add(anchor.offset()))
                    };
                    let mut out = [0; 4];
                    for edge in Edge::ALL {
                        out[edge.index()] = frame.edge_with(edge, lookup)?;
                    }
                    out
                }
            };
            let [x1, y1, x2, y2] = resolved;
            let b = Bounds::new(x1, y1, x2, y2);
            if b.width() < node.min_width() || b.height() < node.min_height() {
                undersized.push(self.id_at(i));
            }
            edges.push(resolved);
        }

        if !undersized.is_empty() {
            tessera_core::debug!(count = undersized.len(), "frames below minimum size");
        }

        Ok(ResolvedLayout {
            tag: self.tag,
            generation: self.generation,
            bounds: edges
                .into_iter()
                .map(|[x1, y1, x2, y2]| Bounds::new(x1, y1, x2, y2))
                .collect(),
            undersized,
        })
    }
}

/// Snapshot of every node's bounds, as produced by [`Layout::solve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLayout {
    tag: u32,
    generation: u64,
    bounds: Vec<Bounds>,
    undersized: Vec<FrameId>,
}

impl ResolvedLayout {
    /// Bounds of `id`, or `None` for a handle from another layout.
    #[must_use]
    pub fn get(&self, id: FrameId) -> Option<Bounds> {
        if id.layout != self.tag {
            return None;
        }
        self.bounds.get(id.index()).copied()
    }

    /// All bounds in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (FrameId, Bounds)> + '_ {
        let tag = self.tag;
        self.bounds.iter().enumerate().map(move |(i, b)| {
            (
                FrameId {
                    layout: tag,
                    index: i as u32,
                },
                *b,
            )
        })
    }

    /// Generation of the layout when this snapshot was taken.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether `layout` is the source of this snapshot and unchanged since.
    #[must_use]
    pub fn is_current(&self, layout: &Layout) -> bool {
        self.tag == layout.tag && self.generation == layout.generation
    }

    /// Number of resolved nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bounds.len()
    }

    /// Whether the snapshot is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty()
    }

    /// Nodes that fell below their minimum size.
    #[must_use]
    pub fn undersized(&self) -> &[FrameId] {
        &self.undersized
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anchor::Axis;

    fn screen() -> (Layout, FrameId) {
        let mut layout = Layout::new();
        let root = layout.add_static(24, 80, 0, 0);
        (layout, root)
    }

    #[test]
    fn static_frame_reports_its_coordinates() {
        let mut layout = Layout::new();
        let s = layout.add_static(10, 20, 3, 5);
        assert_eq!(layout.bounds(s), Ok(Bounds::new(5, 3, 25, 13)));
        assert_eq!(layout.compute_left_edge(s), Ok(5));
        assert_eq!(layout.compute_top_edge(s), Ok(3));
        assert_eq!(layout.compute_right_edge(s), Ok(25));
        assert_eq!(layout.compute_bottom_edge(s), Ok(13));
    }

    #[test]
    fn left_top_width_height() {
        let (mut layout, root) = screen();
        let a = layout
            .add_frame(
                FrameSpec::new()
                    .left(root.left_anchor(0))
                    .top(root.top_anchor(0))
                    .width(15)
                    .height(7),
            )
            .expect("valid");
        assert_eq!(layout.bounds(a), Ok(Bounds::new(0, 0, 15, 7)));
    }

    #[test]
    fn side_by_side_chain() {
        let (mut layout, root) = screen();
        let a = layout
            .add_frame(FrameSpec::snapped(root, Some(7), Some(15)))
            .expect("valid");
        let b = layout
            .add_frame(
                FrameSpec::new()
                    .left(a.right_anchor(0))
                    .top(a.top_anchor(0))
                    .width(15)
                    .height(7),
            )
            .expect("valid");
        assert_eq!(layout.bounds(b), Ok(Bounds::new(15, 0, 30, 7)));
    }

    #[test]
    fn inset_follows_all_edges() {
        let (mut layout, root) = screen();
        let inner = layout.make_inset_frame(root, 1, 2).expect("valid");
        assert_eq!(layout.bounds(inner), Ok(Bounds::new(2, 1, 78, 23)));
    }

    #[test]
    fn sub_frame_is_relative_to_parent_origin() {
        let mut layout = Layout::new();
        let parent = layout.add_static(10, 20, 5, 10);
        let child = layout
            .make_sub_frame(parent, Bounds::new(2, 1, 6, 4))
            .expect("valid");
        assert_eq!(layout.bounds(child), Ok(Bounds::new(12, 6, 16, 9)));
    }

    #[test]
    fn zero_sized_sub_frame_rejected() {
        let (mut layout, root) = screen();
        assert_eq!(
            layout.make_sub_frame(root, Bounds::new(2, 2, 2, 5)),
            Err(LayoutError::Config(ConfigError::ZeroSize {
                axis: Axis::Horizontal
            }))
        );
    }

    #[test]
    fn resize_propagates_through_chain() {
        let (mut layout, root) = screen();
        let inner = layout.make_inset_frame(root, 1, 1).expect("valid");
        let grandchild = layout.make_inset_frame(inner, 1, 1).expect("valid");
        let right_col = layout
            .add_frame(
                FrameSpec::new()
                    .right(grandchild.right_anchor(0))
                    .top(grandchild.top_anchor(0))
                    .bottom(grandchild.bottom_anchor(0))
                    .width(10),
            )
            .expect("valid");

        layout.resize(root, 40, 120, 0, 0).expect("resize");

        assert_eq!(layout.bounds(inner), Ok(Bounds::new(1, 1, 119, 39)));
        assert_eq!(layout.bounds(grandchild), Ok(Bounds::new(2, 2, 118, 38)));
        assert_eq!(layout.bounds(right_col), Ok(Bounds::new(108, 2, 118, 38)));
    }

    #[test]
    fn resize_relative_frame_is_not_static() {
        let (mut layout, root) = screen();
        let inner = layout.make_inset_frame(root, 1, 1).expect("valid");
        assert_eq!(
            layout.resize(inner, 1, 1, 0, 0),
            Err(LayoutError::NotStatic { frame: inner })
        );
    }

    #[test]
    fn foreign_handles_are_unsupported() {
        let (_, root) = screen();
        let (mut other, _) = screen();
        assert_eq!(
            other.bounds(root),
            Err(LayoutError::UnsupportedNode { frame: root })
        );
        assert_eq!(
            other.resize(root, 1, 1, 0, 0),
            Err(LayoutError::UnsupportedNode { frame: root })
        );
    }

    #[test]
    fn foreign_anchor_is_dangling() {
        let (_, foreign_root) = screen();
        let (mut layout, root) = screen();
        let err = layout
            .add_frame(
                FrameSpec::new()
                    .left(root.left_anchor(0))
                    .top(foreign_root.top_anchor(0))
                    .width(5)
                    .height(5),
            )
            .unwrap_err();
        assert_eq!(
            err,
            LayoutError::Config(ConfigError::DanglingAnchor {
                slot: Edge::Top,
                target: foreign_root,
            })
        );
        assert_eq!(layout.len(), 1);
    }

    #[test]
    fn config_errors_leave_layout_untouched() {
        let (mut layout, root) = screen();
        let generation = layout.generation();
        let err = layout.add_frame(FrameSpec::new().left(root.left_anchor(0)));
        assert_eq!(
            err,
            Err(LayoutError::Config(ConfigError::MissingVerticalAnchor))
        );
        assert_eq!(layout.len(), 1);
        assert_eq!(layout.generation(), generation);
    }

    #[test]
    fn undersized_after_shrink() {
        let (mut layout, root) = screen();
        let inner = layout
            .add_frame(root.inset_frame_spec(1, 1).min_width(20).min_height(5))
            .expect("valid");
        assert_eq!(layout.is_size_valid(inner), Ok(true));

        layout.resize(root, 6, 10, 0, 0).expect("resize");
        assert_eq!(layout.is_size_valid(inner), Ok(false));
        assert_eq!(layout.is_size_valid(root), Ok(false));
        assert_eq!(layout.min_width(inner), Ok(20));
        assert_eq!(layout.min_height(root), Ok(24));
    }

    #[test]
    fn negative_sizes_are_reported_not_clamped() {
        let mut layout = Layout::new();
        let root = layout.add_static(4, 4, 0, 0);
        let inner = layout.make_inset_frame(root, 3, 3).expect("valid");
        let b = layout.bounds(inner).expect("bounds");
        assert_eq!(b, Bounds::new(3, 3, 1, 1));
        assert_eq!(b.width(), -2);
        assert_eq!(layout.is_size_valid(inner), Ok(false));
    }

    #[test]
    fn extreme_offsets_saturate_instead_of_panicking() {
        let mut layout = Layout::new();
        let root = layout.add_static(1, i32::MAX, 0, 1);
        assert_eq!(layout.bounds(root), Ok(Bounds::new(1, 0, i32::MAX, 1)));
        assert_eq!(layout.is_size_valid(root), Ok(false));

        let wide = layout
            .add_frame(
                FrameSpec::new()
                    .left(root.left_anchor(i32::MIN))
                    .right(root.right_anchor(i32::MAX))
                    .top(root.top_anchor(0))
                    .bottom(root.bottom_anchor(0)),
            )
            .expect("valid");
        let b = layout.bounds(wide).expect("bounds");
        assert_eq!(b.x2, i32::MAX);
        assert_eq!(b.width(), i32::MAX);
        assert_eq!(layout.is_size_valid(wide), Ok(true));
        assert!(layout.solve().is_ok());
    }

    #[test]
    fn solve_matches_per_node_resolution() {
        let (mut layout, root) = screen();
        let a = layout
            .add_frame(FrameSpec::snapped(root, Some(-3), None))
            .expect("valid");
        let b = layout.make_inset_frame(a, 1, 1).expect("valid");
        let c = layout
            .add_frame(
                FrameSpec::new()
                    .right(b.right_anchor(0))
                    .bottom(b.bottom_anchor(0))
                    .width(4)
                    .height(1),
            )
            .expect("valid");

        let solved = layout.solve().expect("solve");
        assert_eq!(solved.len(), layout.len());
        for id in [root, a, b, c] {
            assert_eq!(solved.get(id), layout.bounds(id).ok());
        }
        for (id, bounds) in solved.iter() {
            assert_eq!(layout.bounds(id), Ok(bounds));
        }
    }

    #[test]
    fn solve_generation_tracks_changes() {
        let (mut layout, root) = screen();
        let solved = layout.solve().expect("solve");
        assert!(solved.is_current(&layout));

        layout.resize(root, 10, 10, 0, 0).expect("resize");
        assert!(!solved.is_current(&layout));

        let again = layout.solve().expect("solve");
        assert!(again.is_current(&layout));
        assert!(again.generation() > solved.generation());

        let (other, _) = screen();
        assert!(!again.is_current(&other));
        assert_eq!(again.get(other.ids().next().expect("root")), None);
    }

    #[test]
    fn solve_lists_undersized() {
        let (mut layout, root) = screen();
        let inner = layout
            .add_frame(root.inset_frame_spec(0, 0).min_width(100))
            .expect("valid");
        let solved = layout.solve().expect("solve");
        assert_eq!(solved.undersized(), &[inner]);
    }

    #[test]
    fn ids_in_insertion_order() {
        let (mut layout, root) = screen();
        let inner = layout.make_inset_frame(root, 1, 1).expect("valid");
        let ids: Vec<_> = layout.ids().collect();
        assert_eq!(ids, vec![root, inner]);
        assert!(matches!(layout.node(inner), Ok(Node::Relative(_))));
        assert!(!layout.is_empty());
    }

    #[test]
    fn display_names_index_and_layout() {
        let (_, root) = screen();
        let text = root.to_string();
        assert!(text.starts_with("#0@"), "{text}");
    }
}
