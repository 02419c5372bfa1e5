//! Rendering errors.

use std::fmt;

use tessera_layout::{Bounds, FrameId, LayoutError};

/// Errors from canvas construction and drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderError {
    /// Resolving the canvas frame failed.
    Layout(LayoutError),
    /// The frame resolved to a rectangle that can't back a canvas: empty,
    /// inverted, or larger than a terminal can address.
    InvalidGeometry { frame: FrameId, bounds: Bounds },
    /// `scroll` was called on a canvas with scrolling disabled.
    ScrollDisabled,
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Layout(err) => write!(f, "layout error: {err}"),
            Self::InvalidGeometry { frame, bounds } => write!(
                f,
                "frame {frame} resolved to unusable bounds ({}, {}, {}, {}) of size {}x{}",
                bounds.x1,
                bounds.y1,
                bounds.x2,
                bounds.y2,
                bounds.width(),
                bounds.height()
            ),
            Self::ScrollDisabled => write!(f, "scrolling is disabled for this canvas"),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Layout(err) => Some(err),
            _ => None,
        }
    }
}

impl From<LayoutError> for RenderError {
    fn from(err: LayoutError) -> Self {
        Self::Layout(err)
    }
}
