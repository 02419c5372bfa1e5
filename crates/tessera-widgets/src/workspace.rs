#![forbid(unsafe_code)]

//! The screen-sized window factory.

use std::io::{self, Write};

use tessera_layout::{Bounds, FrameId, FrameSpec, Layout};
use tessera_render::canvas::Canvas;
use tessera_render::screen::Screen;

use crate::error::WidgetError;
use crate::window::Window;

/// Owns the layout, a static root frame covering the terminal, and the
/// virtual screen. Windows created here are anchored, directly or not, to
/// the root, so [`Workspace::resize`] reflows all of them.
#[derive(Debug)]
pub struct Workspace {
    layout: Layout,
    root: FrameId,
    screen: Screen,
}

impl Workspace {
    /// A workspace for a terminal of `width` x `height`.
    pub fn new(width: u16, height: u16) -> Self {
        let mut layout = Layout::new();
        let root = layout.add_static(i32::from(height), i32::from(width), 0, 0);
        tessera_core::debug!(width, height, "workspace created");
        Self {
            layout,
            root,
            screen: Screen::new(width, height),
        }
    }

    pub const fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn layout_mut(&mut self) -> &mut Layout {
        &mut self.layout
    }

    /// The static frame covering the terminal.
    pub const fn root(&self) -> FrameId {
        self.root
    }

    pub const fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn screen_mut(&mut self) -> &mut Screen {
        &mut self.screen
    }

    /// A bare canvas over `frame`.
    ///
    /// # Errors
    ///
    /// [`WidgetError::Render`] when the frame can't back a canvas.
    pub fn make_canvas(&self, frame: FrameId) -> Result<Canvas, WidgetError> {
        Ok(Canvas::new(&self.layout, frame)?)
    }

    /// A window over an existing frame.
    ///
    /// # Errors
    ///
    /// As [`Window::new`].
    pub fn make_window(
        &mut self,
        title: impl Into<String>,
        frame: FrameId,
    ) -> Result<Window, WidgetError> {
        Window::new(&mut self.layout, title, frame)
    }

    /// A window of `h` x `w` cells, border included, at `(y, x)` relative
    /// to the root. It keeps its size when the terminal resizes.
    ///
    /// # Errors
    ///
    /// Layout errors for a zero size; render errors when under 3x3.
    pub fn make_static_window(
        &mut self,
        title: impl Into<String>,
        y: i32,
        x: i32,
        h: i32,
        w: i32,
    ) -> Result<Window, WidgetError> {
        let bounds = Bounds::from_size_at(h, w, y, x);
        let frame = self.layout.make_sub_frame(self.root, bounds)?;
        self.make_window(title, frame)
    }

    /// A window over a new frame built from `spec`.
    ///
    /// # Errors
    ///
    /// Layout errors for an invalid spec; render errors as [`Window::new`].
    pub fn make_anchored_window(
        &mut self,
        title: impl Into<String>,
        spec: FrameSpec,
    ) -> Result<Window, WidgetError> {
        let frame = self.layout.add_frame(spec)?;
        self.make_window(title, frame)
    }

    /// A window snapped to the root's edges; see [`FrameSpec::snapped`] for
    /// how positive, negative and absent sizes place it.
    ///
    /// # Errors
    ///
    /// As [`Workspace::make_anchored_window`].
    pub fn make_edge_window(
        &mut self,
        title: impl Into<String>,
        h: Option<i32>,
        w: Option<i32>,
    ) -> Result<Window, WidgetError> {
        self.make_anchored_window(title, FrameSpec::snapped(self.root, h, w))
    }

    /// Resize the root frame and the screen. Windows pick the change up on
    /// their next `sync`.
    ///
    /// # Errors
    ///
    /// Only if the root handle were foreign, which can't happen here.
    pub fn resize(&mut self, width: u16, height: u16) -> Result<(), WidgetError> {
        self.layout
            .resize(self.root, i32::from(height), i32::from(width), 0, 0)?;
        self.screen.resize(width, height);
        tessera_core::info!(width, height, "workspace resized");
        Ok(())
    }

    /// Stage a window onto the virtual screen.
    pub fn stage(&mut self, window: &mut Window) {
        window.stage(&mut self.screen);
    }

    /// Write staged changes to `out`.
    ///
    /// # Errors
    ///
    /// Any I/O error from `out`.
    pub fn present<W: Write>(&mut self, out: &mut W) -> io::Result<usize> {
        self.screen.present(out)
    }
}
