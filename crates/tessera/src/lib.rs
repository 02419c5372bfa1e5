#![forbid(unsafe_code)]

//! Tessera public facade crate.
//!
//! Re-exports the types most applications touch, a unified [`Error`], and
//! [`run`], which wraps a terminal session around a [`Workspace`] sized to
//! the terminal.

use std::fmt;
use std::io;

// --- Core re-exports -------------------------------------------------------

pub use tessera_core::event::{Event, KeyCode, KeyEvent, KeyEventKind, Modifiers};
pub use tessera_core::geometry::Bounds;
pub use tessera_core::terminal_session::{CursorVisibility, SessionOptions, TerminalSession};

// --- Layout re-exports -----------------------------------------------------

pub use tessera_layout::{
    Anchor, Axis, ConfigError, Edge, Frame, FrameId, FrameLike, FrameSpec, Layout, LayoutError,
    ResolvedLayout, StaticFrame,
};

// --- Render re-exports -----------------------------------------------------

pub use tessera_render::RenderError;
pub use tessera_render::buffer::Buffer;
pub use tessera_render::canvas::Canvas;
pub use tessera_render::cell::{Cell, StyleFlags};
pub use tessera_render::screen::Screen;

// --- Widget re-exports -----------------------------------------------------

pub use tessera_widgets::{EditField, Menu, MenuItem, WidgetError, Window, Workspace};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for Tessera apps.
#[derive(Debug)]
pub enum Error {
    /// I/O failure during terminal operations.
    Io(io::Error),
    /// A frame description was rejected.
    Config(ConfigError),
    /// A layout operation failed.
    Layout(LayoutError),
    /// A canvas couldn't be created or synced.
    Render(RenderError),
    /// A widget operation failed.
    Widget(WidgetError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Config(err) => write!(f, "{err}"),
            Self::Layout(err) => write!(f, "{err}"),
            Self::Render(err) => write!(f, "{err}"),
            Self::Widget(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Config(err) => Some(err),
            Self::Layout(err) => Some(err),
            Self::Render(err) => Some(err),
            Self::Widget(err) => Some(err),
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<LayoutError> for Error {
    fn from(err: LayoutError) -> Self {
        Self::Layout(err)
    }
}

impl From<RenderError> for Error {
    fn from(err: RenderError) -> Self {
        Self::Render(err)
    }
}

impl From<WidgetError> for Error {
    fn from(err: WidgetError) -> Self {
        Self::Widget(err)
    }
}

/// Standard result type for Tessera APIs.
pub type Result<T> = std::result::Result<T, Error>;

/// Open a terminal session, build a [`Workspace`] covering the terminal,
/// and hand both to `app`. The terminal is restored when `app` returns,
/// whether it succeeded or not.
///
/// # Errors
///
/// Session setup failures, or whatever `app` returns.
pub fn run<T>(
    options: SessionOptions,
    app: impl FnOnce(&TerminalSession, &mut Workspace) -> Result<T>,
) -> Result<T> {
    let session = TerminalSession::new(options)?;
    let (width, height) = session.size()?;
    tessera_core::info!(width, height, "session started");
    let mut workspace = Workspace::new(width, height);
    app(&session, &mut workspace)
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Anchor, Bounds, Canvas, Edge, EditField, Error, Event, FrameId, FrameSpec, KeyCode,
        KeyEvent, Layout, Menu, Modifiers, Result, Screen, SessionOptions, StyleFlags,
        TerminalSession, Window, Workspace, run,
    };

    pub use crate::{core, layout, render, widgets};
}

pub use tessera_core as core;
pub use tessera_layout as layout;
pub use tessera_render as render;
pub use tessera_widgets as widgets;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn conversions_keep_source() {
        let err: Error = ConfigError::MissingHorizontalAnchor.into();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.source().is_some());

        let err: Error = io::Error::other("boom").into();
        assert_eq!(err.to_string(), "boom");
    }

    #[test]
    fn widget_errors_propagate_with_question_mark() {
        fn build() -> Result<Window> {
            let mut ws = Workspace::new(10, 4);
            Ok(ws.make_static_window("t", 0, 0, 2, 2)?)
        }
        assert!(matches!(build(), Err(Error::Widget(_))));
    }
}
