#![forbid(unsafe_code)]

//! Demo state: two menus side by side above a status bar.

use tessera::{Event, FrameSpec, KeyCode, KeyEvent, Menu, WidgetError, Window, Workspace};
use tracing::{debug, info, warn};

/// Width of the left menu, border included.
const LEFT_WIDTH: i32 = 24;
/// Height of the status bar, border included.
const STATUS_HEIGHT: i32 = 3;

const FRUIT: [&str; 5] = ["apple", "banana", "cherry", "durian", "elderberry"];
const TOPPINGS: [&str; 4] = ["cream", "honey", "nuts", "sprinkles"];

/// Whether the event loop should keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// The demo's windows and focus.
#[derive(Debug)]
pub struct DemoApp {
    menus: [Menu; 2],
    status: Window,
    message: String,
    focus: usize,
    /// False while the terminal is too small to hold every window.
    fits: bool,
}

impl DemoApp {
    /// Build the windows in `ws`.
    ///
    /// The status bar is snapped to the bottom, the left menu has a fixed
    /// width and runs down to the status bar, and the right menu fills the
    /// space between the left menu and the terminal's right edge.
    ///
    /// # Errors
    ///
    /// Widget errors when the terminal is too small for the initial layout.
    pub fn new(ws: &mut Workspace) -> tessera::Result<Self> {
        let root = ws.root();
        let status = ws.make_edge_window("Status", Some(-STATUS_HEIGHT), None)?;
        let above_status = status.frame().top_anchor(0);

        let left = ws.make_anchored_window(
            "Fruit",
            FrameSpec::new()
                .left(root.left_anchor(0))
                .width(LEFT_WIDTH)
                .top(root.top_anchor(0))
                .bottom(above_status),
        )?;
        let right = ws.make_anchored_window(
            "Toppings",
            FrameSpec::new()
                .left(left.frame().right_anchor(0))
                .right(root.right_anchor(0))
                .top(root.top_anchor(0))
                .bottom(above_status),
        )?;

        let mut menus = [
            Menu::from_names(left, FRUIT, None),
            Menu::from_names(right, TOPPINGS, Some(&[1usize][..])),
        ];
        menus[0].window_mut().highlight();

        let mut app = Self {
            menus,
            status,
            message: String::new(),
            focus: 0,
            fits: true,
        };
        app.set_message("Tab: focus  Up/Down: select  x: toggle  q: quit");
        Ok(app)
    }

    /// Index of the focused menu.
    pub const fn focus(&self) -> usize {
        self.focus
    }

    pub fn menus(&self) -> &[Menu] {
        &self.menus
    }

    pub const fn status(&self) -> &Window {
        &self.status
    }

    /// The status bar text.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether every window currently fits the terminal.
    pub const fn fits(&self) -> bool {
        self.fits
    }

    fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
        let content = self.status.content_mut();
        content.clear_line(0);
        content.add_str(&self.message, Some((0, 1)), None);
    }

    fn move_focus(&mut self, forward: bool) {
        let count = self.menus.len();
        let next = if forward {
            (self.focus + 1) % count
        } else {
            (self.focus + count - 1) % count
        };
        self.menus[self.focus].window_mut().unhighlight();
        self.menus[next].window_mut().highlight();
        self.focus = next;
        debug!(focus = next, "focus moved");
    }

    fn toggle_selected(&mut self) -> tessera::Result<()> {
        let menu = &mut self.menus[self.focus];
        let index = menu.selection();
        match menu.toggle_item(index) {
            Ok(()) => {
                let item = &menu.items()[index];
                let message = format!("{item}");
                self.set_message(message);
                Ok(())
            }
            Err(WidgetError::NotCheckable { .. }) => {
                let name = menu.items()[index].name().to_owned();
                self.set_message(format!("{name} has no check box"));
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) -> tessera::Result<Flow> {
        if !key.is_press() {
            return Ok(Flow::Continue);
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Escape => return Ok(Flow::Quit),
            KeyCode::Char('c') if key.ctrl() => return Ok(Flow::Quit),
            KeyCode::Tab => self.move_focus(true),
            KeyCode::BackTab => self.move_focus(false),
            KeyCode::Char('x' | ' ') | KeyCode::Enter => self.toggle_selected()?,
            _ => {
                let menu = &mut self.menus[self.focus];
                if menu.handle_key(key) {
                    let name = menu.items()[menu.selection()].name().to_owned();
                    self.set_message(format!("selected {name}"));
                }
            }
        }
        Ok(Flow::Continue)
    }

    /// Resize the workspace and let every window follow.
    ///
    /// # Errors
    ///
    /// Only layout errors from the workspace itself. Windows that no longer
    /// fit are reported through [`DemoApp::fits`].
    pub fn resize(&mut self, ws: &mut Workspace, width: u16, height: u16) -> tessera::Result<()> {
        ws.resize(width, height)?;
        let mut fits = true;
        for menu in &mut self.menus {
            if let Err(err) = menu.sync(ws.layout()) {
                warn!(%err, "menu doesn't fit");
                fits = false;
            }
        }
        match self.status.sync(ws.layout()) {
            Ok(true) => {
                let message = std::mem::take(&mut self.message);
                self.set_message(message);
            }
            Ok(false) => {}
            Err(err) => {
                warn!(%err, "status bar doesn't fit");
                fits = false;
            }
        }
        self.fits = fits;
        info!(width, height, fits, "demo resized");
        Ok(())
    }

    /// Apply one input event.
    ///
    /// # Errors
    ///
    /// Layout or widget errors from the handlers.
    pub fn handle_event(&mut self, ws: &mut Workspace, event: &Event) -> tessera::Result<Flow> {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Resize { width, height } => {
                self.resize(ws, *width, *height)?;
                Ok(Flow::Continue)
            }
            Event::Focus(_) => Ok(Flow::Continue),
        }
    }

    /// Stage every window onto the workspace screen, or a blank screen
    /// while the terminal is too small.
    pub fn draw(&mut self, ws: &mut Workspace) {
        let screen = ws.screen_mut();
        screen.erase();
        if !self.fits {
            return;
        }
        for menu in &mut self.menus {
            menu.stage(screen);
        }
        self.status.stage(screen);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera::{Bounds, StyleFlags};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code))
    }

    fn app(width: u16, height: u16) -> (Workspace, DemoApp) {
        let mut ws = Workspace::new(width, height);
        let app = DemoApp::new(&mut ws).expect("demo fits");
        (ws, app)
    }

    fn title_attrs(app: &DemoApp, menu: usize) -> Option<StyleFlags> {
        app.menus()[menu].window().border().cell(0, 3).map(|c| c.attrs)
    }

    #[test]
    fn initial_layout() {
        let (ws, app) = app(60, 20);
        let layout = ws.layout();
        assert_eq!(
            layout.bounds(app.menus()[0].window().frame()),
            Ok(Bounds::new(0, 0, 24, 17))
        );
        assert_eq!(
            layout.bounds(app.menus()[1].window().frame()),
            Ok(Bounds::new(24, 0, 60, 17))
        );
        assert_eq!(
            layout.bounds(app.status().frame()),
            Ok(Bounds::new(0, 17, 60, 20))
        );
        assert_eq!(app.focus(), 0);
        assert_eq!(title_attrs(&app, 0), Some(StyleFlags::REVERSE));
    }

    #[test]
    fn tab_cycles_focus() {
        let (mut ws, mut app) = app(60, 20);
        app.handle_event(&mut ws, &key(KeyCode::Tab)).expect("tab");
        assert_eq!(app.focus(), 1);
        assert_eq!(title_attrs(&app, 0), Some(StyleFlags::empty()));
        assert_eq!(title_attrs(&app, 1), Some(StyleFlags::REVERSE));
        app.handle_event(&mut ws, &key(KeyCode::Tab)).expect("tab");
        assert_eq!(app.focus(), 0);
        app.handle_event(&mut ws, &key(KeyCode::BackTab)).expect("backtab");
        assert_eq!(app.focus(), 1);
    }

    #[test]
    fn select_and_toggle() {
        let (mut ws, mut app) = app(60, 20);
        app.handle_event(&mut ws, &key(KeyCode::Down)).expect("down");
        assert_eq!(app.menus()[0].selection(), 1);
        assert_eq!(app.message(), "selected banana");

        app.handle_event(&mut ws, &key(KeyCode::Char('x'))).expect("x");
        assert_eq!(app.message(), "banana has no check box");

        app.handle_event(&mut ws, &key(KeyCode::Tab)).expect("tab");
        app.handle_event(&mut ws, &key(KeyCode::Char('x'))).expect("x");
        assert_eq!(app.menus()[1].items()[0].checked(), Some(true));
        assert_eq!(app.message(), "[x] cream");
        assert!(app.status().content().line_text(0).starts_with(" [x] cream"));
    }

    #[test]
    fn quit_keys() {
        let (mut ws, mut app) = app(60, 20);
        assert_eq!(
            app.handle_event(&mut ws, &key(KeyCode::Char('q'))).ok(),
            Some(Flow::Quit)
        );
        let ctrl_c = Event::Key(
            KeyEvent::new(KeyCode::Char('c')).with_modifiers(tessera::Modifiers::CTRL),
        );
        assert_eq!(app.handle_event(&mut ws, &ctrl_c).ok(), Some(Flow::Quit));
        assert_eq!(
            app.handle_event(&mut ws, &Event::Focus(true)).ok(),
            Some(Flow::Continue)
        );
    }

    #[test]
    fn resize_reflows_windows() {
        let (mut ws, mut app) = app(60, 20);
        let resize = Event::Resize {
            width: 80,
            height: 30,
        };
        app.handle_event(&mut ws, &resize).expect("resize");
        assert!(app.fits());
        assert_eq!(
            ws.layout().bounds(app.menus()[1].window().frame()),
            Ok(Bounds::new(24, 0, 80, 27))
        );
        assert_eq!(app.status().content().width(), 78);
        assert!(app.status().content().line_text(0).starts_with(" Tab: focus"));
    }

    #[test]
    fn too_small_then_recovered() {
        let (mut ws, mut app) = app(60, 20);
        app.resize(&mut ws, 10, 4).expect("resize");
        assert!(!app.fits());
        app.draw(&mut ws);
        assert_eq!(ws.screen().buffer().row_text(0), " ".repeat(10));

        app.resize(&mut ws, 60, 20).expect("resize");
        assert!(app.fits());
        app.draw(&mut ws);
        assert!(ws.screen().buffer().row_text(0).starts_with("┌──Fruit"));
    }

    #[test]
    fn draw_and_present() {
        let (mut ws, mut app) = app(40, 12);
        app.draw(&mut ws);
        let mut out = Vec::new();
        let written = ws.present(&mut out).expect("present");
        assert_eq!(written, 40 * 12);
        assert!(ws.screen().buffer().row_text(1).contains("apple"));
        assert!(ws.screen().buffer().row_text(1).contains("[ ] cream"));
    }
}
