#![forbid(unsafe_code)]

//! Selectable, optionally checkable menus drawn inside a [`Window`].

use std::fmt;

use tessera_core::event::{KeyCode, KeyEvent};
use tessera_render::cell::StyleFlags;
use tessera_render::screen::Screen;
use unicode_width::UnicodeWidthStr;

use crate::error::WidgetError;
use crate::window::Window;

/// One menu entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    name: String,
    checked: Option<bool>,
}

impl MenuItem {
    /// A plain entry without a check box.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            checked: None,
        }
    }

    /// An entry with a check box.
    pub fn checkable(name: impl Into<String>, checked: bool) -> Self {
        Self {
            name: name.into(),
            checked: Some(checked),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Check state, or `None` for plain entries.
    pub const fn checked(&self) -> Option<bool> {
        self.checked
    }

    fn set_checked(&mut self, f: impl FnOnce(bool) -> bool) -> bool {
        match &mut self.checked {
            Some(state) => {
                *state = f(*state);
                true
            }
            None => false,
        }
    }
}

impl fmt::Display for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.checked {
            Some(true) => write!(f, "[x] {}", self.name),
            Some(false) => write!(f, "[ ] {}", self.name),
            None => f.write_str(&self.name),
        }
    }
}

/// A vertical list of items, one per content row, with a single selection
/// shown in reverse video.
#[derive(Debug, Clone)]
pub struct Menu {
    window: Window,
    items: Vec<MenuItem>,
    selection: usize,
}

impl Menu {
    /// A menu showing `items` in `window`, first item selected.
    pub fn new(window: Window, items: impl IntoIterator<Item = MenuItem>) -> Self {
        let mut menu = Self {
            window,
            items: items.into_iter().collect(),
            selection: 0,
        };
        menu.draw();
        menu
    }

    /// A menu from plain names. With `checked`, every item gets a check
    /// box, ticked for the listed indices.
    pub fn from_names<S: Into<String>>(
        window: Window,
        names: impl IntoIterator<Item = S>,
        checked: Option<&[usize]>,
    ) -> Self {
        let items = names.into_iter().enumerate().map(|(i, name)| match checked {
            Some(ticked) => MenuItem::checkable(name, ticked.contains(&i)),
            None => MenuItem::new(name),
        });
        Self::new(window, items)
    }

    pub const fn window(&self) -> &Window {
        &self.window
    }

    pub fn window_mut(&mut self) -> &mut Window {
        &mut self.window
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Index of the selected item.
    pub const fn selection(&self) -> usize {
        self.selection
    }

    fn check_index(&self, index: usize) -> Result<(), WidgetError> {
        if index < self.items.len() {
            Ok(())
        } else {
            Err(WidgetError::IndexOutOfRange {
                index,
                len: self.items.len(),
            })
        }
    }

    /// Draw row `index`, padded to the content width.
    pub fn draw_item(&mut self, index: usize) {
        let Some(item) = self.items.get(index) else {
            return;
        };
        let attrs = if index == self.selection {
            StyleFlags::REVERSE
        } else {
            StyleFlags::empty()
        };
        let mut text = item.to_string();
        let pad = usize::from(self.window.content().width()).saturating_sub(text.width());
        text.extend(std::iter::repeat_n(' ', pad));
        let row = i32::try_from(index).unwrap_or(i32::MAX);
        self.window
            .content_mut()
            .add_str(&text, Some((row, 0)), Some(attrs));
    }

    /// Draw every row.
    pub fn draw(&mut self) {
        for i in 0..self.items.len() {
            self.draw_item(i);
        }
    }

    /// Move the selection to `index`, redrawing the old and new rows.
    ///
    /// # Errors
    ///
    /// [`WidgetError::IndexOutOfRange`] past the last item.
    pub fn select(&mut self, index: usize) -> Result<(), WidgetError> {
        self.check_index(index)?;
        let previous = self.selection;
        self.selection = index;
        self.draw_item(previous);
        self.draw_item(index);
        Ok(())
    }

    /// Select the next item. Returns `false` at the end.
    pub fn select_next(&mut self) -> bool {
        let next = self.selection + 1;
        next < self.items.len() && self.select(next).is_ok()
    }

    /// Select the previous item. Returns `false` at the start.
    pub fn select_prev(&mut self) -> bool {
        match self.selection.checked_sub(1) {
            Some(prev) => self.select(prev).is_ok(),
            None => false,
        }
    }

    fn update_check(
        &mut self,
        index: usize,
        f: impl FnOnce(bool) -> bool,
    ) -> Result<(), WidgetError> {
        self.check_index(index)?;
        if !self.items[index].set_checked(f) {
            return Err(WidgetError::NotCheckable { index });
        }
        self.draw_item(index);
        Ok(())
    }

    /// Tick item `index`.
    ///
    /// # Errors
    ///
    /// [`WidgetError::NotCheckable`] for plain items,
    /// [`WidgetError::IndexOutOfRange`] past the last item.
    pub fn check_item(&mut self, index: usize) -> Result<(), WidgetError> {
        self.update_check(index, |_| true)
    }

    /// Untick item `index`. Errors as [`Menu::check_item`].
    pub fn uncheck_item(&mut self, index: usize) -> Result<(), WidgetError> {
        self.update_check(index, |_| false)
    }

    /// Flip item `index`. Errors as [`Menu::check_item`].
    pub fn toggle_item(&mut self, index: usize) -> Result<(), WidgetError> {
        self.update_check(index, |checked| !checked)
    }

    /// Up/Down move the selection. Returns whether the selection changed.
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if !key.is_press() {
            return false;
        }
        match key.code {
            KeyCode::Up => self.select_prev(),
            KeyCode::Down => self.select_next(),
            _ => false,
        }
    }

    /// Follow layout changes, redrawing the rows if the window moved.
    ///
    /// # Errors
    ///
    /// As [`Window::sync`].
    pub fn sync(&mut self, layout: &tessera_layout::Layout) -> Result<bool, WidgetError> {
        let changed = self.window.sync(layout)?;
        if changed {
            self.window.content_mut().erase();
            self.draw();
        }
        Ok(changed)
    }

    /// Stage the window and its rows.
    pub fn stage(&mut self, screen: &mut Screen) {
        self.window.stage(screen);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_layout::Layout;

    fn window(height: i32, width: i32) -> Window {
        let mut layout = Layout::new();
        let root = layout.add_static(height, width, 0, 0);
        Window::new(&mut layout, "menu", root).expect("window")
    }

    #[test]
    fn item_display() {
        assert_eq!(MenuItem::new("plain").to_string(), "plain");
        assert_eq!(MenuItem::checkable("on", true).to_string(), "[x] on");
        assert_eq!(MenuItem::checkable("off", false).to_string(), "[ ] off");
    }

    #[test]
    fn rows_padded_and_selection_reversed() {
        let menu = Menu::from_names(window(5, 10), ["one", "two"], None);
        let content = menu.window().content();
        assert_eq!(content.line_text(0), "one     ");
        assert_eq!(content.line_text(1), "two     ");
        assert_eq!(content.cell(0, 7).map(|c| c.attrs), Some(StyleFlags::REVERSE));
        assert_eq!(content.cell(1, 0).map(|c| c.attrs), Some(StyleFlags::empty()));
    }

    #[test]
    fn wide_names_padded_by_display_width() {
        let menu = Menu::from_names(window(4, 10), ["日本"], None);
        assert_eq!(menu.window().content().cell(0, 4).map(|c| c.ch), Some(' '));
        assert_eq!(
            menu.window().content().cell(0, 7).map(|c| c.attrs),
            Some(StyleFlags::REVERSE)
        );
    }

    #[test]
    fn select_next_and_prev_stop_at_ends() {
        let mut menu = Menu::from_names(window(5, 10), ["a", "b"], None);
        assert!(!menu.select_prev());
        assert!(menu.select_next());
        assert_eq!(menu.selection(), 1);
        assert!(!menu.select_next());
        assert_eq!(
            menu.window().content().cell(1, 0).map(|c| c.attrs),
            Some(StyleFlags::REVERSE)
        );
        assert_eq!(
            menu.window().content().cell(0, 0).map(|c| c.attrs),
            Some(StyleFlags::empty())
        );
        assert!(menu.select_prev());
        assert_eq!(menu.selection(), 0);
    }

    #[test]
    fn select_out_of_range() {
        let mut menu = Menu::from_names(window(5, 10), ["a"], None);
        assert_eq!(
            menu.select(3),
            Err(WidgetError::IndexOutOfRange { index: 3, len: 1 })
        );
    }

    #[test]
    fn check_operations() {
        let mut menu = Menu::from_names(window(5, 12), ["a", "b"], Some(&[1][..]));
        assert_eq!(menu.items()[1].checked(), Some(true));
        menu.check_item(0).expect("checkable");
        assert_eq!(menu.window().content().line_text(0), "[x] a     ");
        menu.uncheck_item(1).expect("checkable");
        assert_eq!(menu.items()[1].checked(), Some(false));
        menu.toggle_item(1).expect("checkable");
        assert_eq!(menu.items()[1].checked(), Some(true));
    }

    #[test]
    fn plain_items_not_checkable() {
        let mut menu = Menu::from_names(window(5, 10), ["a"], None);
        assert_eq!(
            menu.toggle_item(0),
            Err(WidgetError::NotCheckable { index: 0 })
        );
    }

    #[test]
    fn keys_move_selection() {
        let mut menu = Menu::from_names(window(5, 10), ["a", "b"], None);
        assert!(menu.handle_key(&KeyEvent::new(KeyCode::Down)));
        assert!(!menu.handle_key(&KeyEvent::new(KeyCode::Down)));
        assert!(menu.handle_key(&KeyEvent::new(KeyCode::Up)));
        assert!(!menu.handle_key(&KeyEvent::new(KeyCode::Enter)));
    }
}
