//! Widget errors.

use std::fmt;

use tessera_layout::LayoutError;
use tessera_render::RenderError;

/// Errors from building or driving widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetError {
    /// Creating or syncing a canvas failed.
    Render(RenderError),
    /// A check operation targeted a menu item without a check box.
    NotCheckable { index: usize },
    /// A menu index past the last item.
    IndexOutOfRange { index: usize, len: usize },
}

impl fmt::Display for WidgetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Render(err) => write!(f, "render error: {err}"),
            Self::NotCheckable { index } => write!(f, "menu item {index} is not checkable"),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "menu index {index} out of range for {len} items")
            }
        }
    }
}

impl std::error::Error for WidgetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RenderError> for WidgetError {
    fn from(err: RenderError) -> Self {
        Self::Render(err)
    }
}

impl From<LayoutError> for WidgetError {
    fn from(err: LayoutError) -> Self {
        Self::Render(RenderError::Layout(err))
    }
}
