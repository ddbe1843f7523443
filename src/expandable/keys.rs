//! Key bindings for the expandable list.
//!
//! - **Cursor movement**: `↑/k` (up), `↓/j` (down)
//! - **Jumps**: `g/home` (first item), `G/end` (last item)
//! - **Expand/collapse**: `enter/space` toggles the highlighted item
//!
//! ```rust
//! use bubbletea_expandable::expandable::ListKeyMap;
//! use bubbletea_expandable::key::KeyMap;
//!
//! let keymap = ListKeyMap::default();
//! assert_eq!(keymap.short_help().len(), 3);
//! ```

use crate::key;
use crossterm::event::KeyCode;

/// Key bindings for navigating the list and toggling items.
#[derive(Debug, Clone)]
pub struct ListKeyMap {
    /// Move the cursor up one item.
    pub cursor_up: key::Binding,
    /// Move the cursor down one item.
    pub cursor_down: key::Binding,
    /// Jump to the first item.
    pub go_to_start: key::Binding,
    /// Jump to the last item.
    pub go_to_end: key::Binding,
    /// Expand or collapse the highlighted item.
    pub toggle: key::Binding,
}

impl Default for ListKeyMap {
    fn default() -> Self {
        Self {
            cursor_up: key::Binding::new(vec![KeyCode::Up, KeyCode::Char('k')])
                .with_help("↑/k", "up"),
            cursor_down: key::Binding::new(vec![KeyCode::Down, KeyCode::Char('j')])
                .with_help("↓/j", "down"),
            go_to_start: key::Binding::new(vec![KeyCode::Home, KeyCode::Char('g')])
                .with_help("g/home", "go to start"),
            go_to_end: key::Binding::new(vec![KeyCode::End, KeyCode::Char('G')])
                .with_help("G/end", "go to end"),
            toggle: key::Binding::new(vec![KeyCode::Enter, KeyCode::Char(' ')])
                .with_help("enter", "expand/collapse"),
        }
    }
}

impl key::KeyMap for ListKeyMap {
    fn short_help(&self) -> Vec<&key::Binding> {
        vec![&self.cursor_up, &self.cursor_down, &self.toggle]
    }

    fn full_help(&self) -> Vec<Vec<&key::Binding>> {
        vec![
            vec![
                &self.cursor_up,
                &self.cursor_down,
                &self.go_to_start,
                &self.go_to_end,
            ],
            vec![&self.toggle],
        ]
    }
}
