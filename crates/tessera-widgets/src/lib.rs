#![forbid(unsafe_code)]

//! Widgets built on layout frames and canvases.
//!
//! - [`Window`](window::Window): border and title around a content canvas.
//! - [`Menu`](menu::Menu): selectable, optionally checkable list in a window.
//! - [`EditField`](edit_field::EditField): single-line text entry.
//! - [`Workspace`](workspace::Workspace): owns the layout and screen, and
//!   creates windows anchored to the terminal edges.

pub mod edit_field;
pub mod error;
pub mod menu;
pub mod window;
pub mod workspace;

pub use edit_field::EditField;
pub use error::WidgetError;
pub use menu::{Menu, MenuItem};
pub use window::Window;
pub use workspace::Workspace;
