#![forbid(unsafe_code)]

//! Anchor-based frame layout.
//!
//! A [`Layout`] is an arena of frame-like nodes. [`StaticFrame`]s sit at
//! absolute screen coordinates and can be resized in place; relative
//! [`Frame`]s derive each of their four edges from [`Anchor`]s on other
//! nodes' edges plus an optional explicit width/height.
//!
//! ```
//! use tessera_layout::{FrameSpec, Layout};
//! use tessera_core::geometry::Bounds;
//!
//! let mut layout = Layout::new();
//! let root = layout.add_static(24, 80, 0, 0);
//! let a = layout.add_frame(
//!     FrameSpec::new()
//!         .left(root.left_anchor(0))
//!         .top(root.top_anchor(0))
//!         .width(15)
//!         .height(7),
//! )?;
//! let b = layout.add_frame(
//!     FrameSpec::new()
//!         .left(a.right_anchor(0))
//!         .top(a.top_anchor(0))
//!         .width(15)
//!         .height(7),
//! )?;
//! assert_eq!(layout.bounds(a)?, Bounds::new(0, 0, 15, 7));
//! assert_eq!(layout.bounds(b)?, Bounds::new(15, 0, 30, 7));
//! # Ok::<(), tessera_layout::LayoutError>(())
//! ```
//!
//! # Resolution
//!
//! Bounds are never cached on the nodes: every query walks the anchors back to
//! the static roots. Resizing a [`StaticFrame`] therefore shows up in every
//! dependent frame on its next query with no notification step. Callers that
//! draw many frames per pass can use [`Layout::solve`] to resolve the whole
//! arena once; the resulting [`ResolvedLayout`] records the generation it was
//! computed at so staleness is detectable.
//!
//! # Acyclicity
//!
//! Nodes are append-only and a frame may only anchor to nodes already in the
//! same arena, so the reference graph is acyclic by construction and
//! resolution always terminates.

pub mod anchor;
pub mod error;
pub mod frame;
pub mod layout;

pub use anchor::{Anchor, Axis, Edge};
pub use error::{ConfigError, LayoutError};
pub use frame::{AxisConstraint, Frame, FrameLike, FrameSpec, Node, StaticFrame};
pub use layout::{FrameId, Layout, ResolvedLayout};
pub use tessera_core::geometry::Bounds;
