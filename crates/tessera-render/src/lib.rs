#![forbid(unsafe_code)]

//! Render: cells, buffers, frame-sized canvases, and the diffing screen.
//!
//! A [`Canvas`](canvas::Canvas) is a drawing surface whose size and position
//! come from a layout frame. Canvases are staged onto a
//! [`Screen`](screen::Screen), which presents only the cells that changed
//! since the previous frame.

pub mod buffer;
pub mod canvas;
pub mod cell;
pub mod error;
pub mod screen;

pub use error::RenderError;
