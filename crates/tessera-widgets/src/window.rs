#![forbid(unsafe_code)]

//! Bordered, titled windows.

use tessera_layout::{Bounds, FrameId, Layout};
use tessera_render::RenderError;
use tessera_render::canvas::Canvas;
use tessera_render::cell::StyleFlags;
use tessera_render::screen::Screen;

use crate::error::WidgetError;

/// Column of the top border where the title starts.
const TITLE_COLUMN: i32 = 3;

/// A frame with a one-cell border and a title on the top edge.
///
/// The window owns two canvases: `border`, covering the whole frame, and
/// `content`, covering the frame inset by one cell on every side. Client
/// drawing goes to the content canvas.
#[derive(Debug, Clone)]
pub struct Window {
    title: String,
    frame: FrameId,
    content_frame: FrameId,
    border: Canvas,
    content: Canvas,
    highlighted: bool,
    visible: bool,
}

impl Window {
    /// A visible, unhighlighted window over `frame`.
    ///
    /// Adds the inset content frame to `layout`. On error nothing is added.
    ///
    /// # Errors
    ///
    /// [`WidgetError::Render`] if either frame can't back a canvas (e.g. a
    /// frame under 3x3 leaves no content area).
    pub fn new(
        layout: &mut Layout,
        title: impl Into<String>,
        frame: FrameId,
    ) -> Result<Self, WidgetError> {
        let border = Canvas::new(layout, frame)?;
        let outer = border.bounds();
        let inner = Bounds::new(
            outer.x1.saturating_add(1),
            outer.y1.saturating_add(1),
            outer.x2.saturating_sub(1),
            outer.y2.saturating_sub(1),
        );
        if inner.is_degenerate() {
            return Err(RenderError::InvalidGeometry { frame, bounds: outer }.into());
        }
        let content_frame = layout.make_inset_frame(frame, 1, 1)?;
        let content = Canvas::new(layout, content_frame)?;
        let mut window = Self {
            title: title.into(),
            frame,
            content_frame,
            border,
            content,
            highlighted: false,
            visible: false,
        };
        window.show();
        Ok(window)
    }

    /// The full title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The outer frame.
    pub const fn frame(&self) -> FrameId {
        self.frame
    }

    /// The frame inside the border.
    pub const fn content_frame(&self) -> FrameId {
        self.content_frame
    }

    /// The border canvas.
    pub const fn border(&self) -> &Canvas {
        &self.border
    }

    /// The content canvas.
    pub const fn content(&self) -> &Canvas {
        &self.content
    }

    /// The content canvas, for drawing.
    pub fn content_mut(&mut self) -> &mut Canvas {
        &mut self.content
    }

    pub const fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// The title as drawn: cut to `width - 5` characters plus `…` when it
    /// doesn't fit in `width - 4`.
    pub fn display_title(&self) -> String {
        let max = usize::from(self.border.width()).saturating_sub(4);
        if self.title.chars().count() <= max {
            return self.title.clone();
        }
        if max == 0 {
            return String::new();
        }
        let mut title: String = self.title.chars().take(max - 1).collect();
        title.push('…');
        title
    }

    /// Draw the border and title.
    pub fn show(&mut self) {
        self.visible = true;
        self.border.border();
        self.draw_title();
    }

    /// Blank the border canvas; the window disappears on the next present.
    pub fn hide(&mut self) {
        self.visible = false;
        self.border.erase();
    }

    /// Draw the title in reverse video.
    pub fn highlight(&mut self) {
        self.highlighted = true;
        self.draw_title();
    }

    /// Draw the title plainly.
    pub fn unhighlight(&mut self) {
        self.highlighted = false;
        self.draw_title();
    }

    fn draw_title(&mut self) {
        if !self.visible {
            return;
        }
        let attrs = if self.highlighted {
            StyleFlags::REVERSE
        } else {
            StyleFlags::empty()
        };
        let title = self.display_title();
        self.border.add_str(&title, Some((0, TITLE_COLUMN)), Some(attrs));
    }

    /// Follow layout changes. Redraws the chrome when the geometry moved;
    /// content must be redrawn by the owner. Returns whether anything
    /// changed.
    ///
    /// # Errors
    ///
    /// [`WidgetError::Render`] when the frame collapsed below a usable size.
    pub fn sync(&mut self, layout: &Layout) -> Result<bool, WidgetError> {
        let border_changed = self.border.sync(layout)?;
        let content_changed = self.content.sync(layout)?;
        if border_changed && self.visible {
            self.border.erase();
            self.show();
        }
        Ok(border_changed || content_changed)
    }

    /// Stage the border and, while visible, the content.
    pub fn stage(&mut self, screen: &mut Screen) {
        screen.stage(&mut self.border);
        if self.visible {
            screen.stage(&mut self.content);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(title: &str, height: i32, width: i32) -> (Layout, Window) {
        let mut layout = Layout::new();
        let root = layout.add_static(height, width, 0, 0);
        let window = Window::new(&mut layout, title, root).expect("window");
        (layout, window)
    }

    #[test]
    fn border_and_title_drawn() {
        let (_, w) = window("Menu", 4, 12);
        assert_eq!(w.border().line_text(0), "┌──Menu────┐");
        assert_eq!(w.border().line_text(3), "└──────────┘");
        assert!(w.is_visible());
    }

    #[test]
    fn content_is_inset() {
        let (layout, w) = window("x", 5, 10);
        assert_eq!((w.content().height(), w.content().width()), (3, 8));
        assert_eq!(
            layout.bounds(w.content_frame()).map(|b| (b.x1, b.y1)),
            Ok((1, 1))
        );
    }

    #[test]
    fn long_title_truncated_with_ellipsis() {
        let (_, w) = window("A very long window title", 3, 12);
        // width 12: room for 8 characters, so 7 plus the ellipsis.
        assert_eq!(w.display_title(), "A very …");
        assert_eq!(w.display_title().chars().count(), 8);
    }

    #[test]
    fn title_exactly_fitting_kept() {
        let (_, w) = window("12345678", 3, 12);
        assert_eq!(w.display_title(), "12345678");
    }

    #[test]
    fn highlight_toggles_reverse_title() {
        let (_, mut w) = window("Tab", 3, 10);
        w.highlight();
        assert!(w.is_highlighted());
        assert_eq!(
            w.border().cell(0, 3).map(|c| c.attrs),
            Some(StyleFlags::REVERSE)
        );
        w.unhighlight();
        assert_eq!(
            w.border().cell(0, 3).map(|c| c.attrs),
            Some(StyleFlags::empty())
        );
    }

    #[test]
    fn hide_erases_and_show_redraws() {
        let (_, mut w) = window("T", 3, 6);
        w.hide();
        assert!(!w.is_visible());
        assert_eq!(w.border().line_text(0), "      ");
        w.show();
        assert_eq!(w.border().line_text(0), "┌──T─┐");
    }

    #[test]
    fn too_small_frame_rejected() {
        let mut layout = Layout::new();
        let root = layout.add_static(2, 10, 0, 0);
        assert!(matches!(
            Window::new(&mut layout, "t", root),
            Err(WidgetError::Render(_))
        ));
    }

    #[test]
    fn failed_window_leaves_layout_unchanged() {
        let mut layout = Layout::new();
        let root = layout.add_static(2, 10, 0, 0);
        let before = (layout.len(), layout.generation());
        assert_eq!(
            Window::new(&mut layout, "t", root).map(|w| w.frame()),
            Err(WidgetError::Render(RenderError::InvalidGeometry {
                frame: root,
                bounds: Bounds::new(0, 0, 10, 2),
            }))
        );
        assert_eq!((layout.len(), layout.generation()), before);
    }

    #[test]
    fn sync_redraws_chrome_after_resize() {
        let (mut layout, mut w) = window("T", 3, 6);
        let root = w.frame();
        layout.resize(root, 4, 8, 0, 0).expect("resize");
        assert_eq!(w.sync(&layout), Ok(true));
        assert_eq!(w.border().line_text(0), "┌──T───┐");
        assert_eq!(w.border().line_text(3), "└──────┘");
        assert_eq!(w.content().width(), 6);
        assert_eq!(w.sync(&layout), Ok(false));
    }
}
