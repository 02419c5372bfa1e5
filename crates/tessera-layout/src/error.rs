//! Layout errors.

use std::fmt;

use crate::anchor::{Axis, Edge};
use crate::layout::FrameId;

/// A frame's anchors and sizes don't describe exactly one rectangle.
///
/// Raised when a [`Frame`](crate::Frame) is built; the call site has to be
/// fixed, retrying cannot help.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Neither a left nor a right anchor was given.
    MissingHorizontalAnchor,
    /// Neither a top nor a bottom anchor was given.
    MissingVerticalAnchor,
    /// An anchor on the wrong axis was given for `slot` (e.g. a top anchor
    /// passed as the left anchor).
    MisplacedAnchor { slot: Edge, anchor_edge: Edge },
    /// Both anchors of `axis` were given together with an explicit size.
    Overconstrained { axis: Axis },
    /// Only one anchor of `axis` was given and no explicit size.
    MissingSize { axis: Axis },
    /// An explicit size of zero was given for `axis`.
    ZeroSize { axis: Axis },
    /// The `slot` anchor names a node that isn't in the layout receiving the
    /// frame.
    DanglingAnchor { slot: Edge, target: FrameId },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingHorizontalAnchor => {
                write!(f, "frame needs a left or right anchor")
            }
            Self::MissingVerticalAnchor => write!(f, "frame needs a top or bottom anchor"),
            Self::MisplacedAnchor { slot, anchor_edge } => write!(
                f,
                "{anchor_edge} anchor cannot be used as the {slot} anchor ({} axis expected)",
                slot.axis()
            ),
            Self::Overconstrained { axis } => {
                let size = size_name(*axis);
                write!(f, "{axis} axis is over-constrained: both anchors and a {size}")
            }
            Self::MissingSize { axis } => {
                let size = size_name(*axis);
                write!(f, "{axis} axis has a single anchor and no {size}")
            }
            Self::ZeroSize { axis } => write!(f, "{} must be non-zero", size_name(*axis)),
            Self::DanglingAnchor { slot, target } => {
                write!(f, "{slot} anchor references unknown frame {target}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

const fn size_name(axis: Axis) -> &'static str {
    match axis {
        Axis::Horizontal => "width",
        Axis::Vertical => "height",
    }
}

/// Errors from building, resizing, or resolving a [`Layout`](crate::Layout).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutError {
    /// Frame construction rejected the anchor/size combination.
    Config(ConfigError),
    /// The layout holds no node for `frame` (a handle or anchor from a
    /// different layout).
    UnsupportedNode { frame: FrameId },
    /// `frame` is a relative frame; only static frames can be resized.
    NotStatic { frame: FrameId },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "invalid frame configuration: {err}"),
            Self::UnsupportedNode { frame } => {
                write!(f, "frame {frame} does not belong to this layout")
            }
            Self::NotStatic { frame } => {
                write!(f, "frame {frame} is relative and cannot be resized")
            }
        }
    }
}

impl std::error::Error for LayoutError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ConfigError> for LayoutError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn config_messages_name_the_axis() {
        let msg = ConfigError::Overconstrained {
            axis: Axis::Horizontal,
        }
        .to_string();
        assert!(msg.contains("horizontal"), "{msg}");
        assert!(msg.contains("width"), "{msg}");

        let msg = ConfigError::ZeroSize {
            axis: Axis::Vertical,
        }
        .to_string();
        assert_eq!(msg, "height must be non-zero");
    }

    #[test]
    fn misplaced_anchor_message() {
        let msg = ConfigError::MisplacedAnchor {
            slot: Edge::Left,
            anchor_edge: Edge::Top,
        }
        .to_string();
        assert_eq!(
            msg,
            "top anchor cannot be used as the left anchor (horizontal axis expected)"
        );
    }

    #[test]
    fn layout_error_wraps_config_as_source() {
        let err = LayoutError::from(ConfigError::MissingVerticalAnchor);
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("invalid frame configuration"));
    }
}
