//! Styles for the expandable list.
//!
//! Cells style their own regions. The list only draws what lives outside the
//! cells: the cursor marker in the left inset, and the empty-list message.
//!
//! ```rust
//! use bubbletea_expandable::expandable::ListStyles;
//! use lipgloss_extras::prelude::*;
//!
//! let mut styles = ListStyles::default();
//! styles.cursor_marker = Style::new().foreground(Color::from("#04B575"));
//! ```

use lipgloss_extras::prelude::*;

/// Glyph drawn in the left inset next to the highlighted item.
pub const CURSOR_MARKER: &str = "│";

/// Glyph drawn in the left inset next to expanded items.
pub const EXPANDED_MARKER: &str = "┃";

/// Styles for the parts of the list that are not cells.
#[derive(Debug, Clone)]
pub struct ListStyles {
    /// Marker next to the highlighted item.
    pub cursor_marker: Style,
    /// Marker next to selected, expanded items.
    pub expanded_marker: Style,
    /// The "No items." message.
    pub no_items: Style,
}

impl Default for ListStyles {
    fn default() -> Self {
        Self {
            cursor_marker: Style::new().foreground(AdaptiveColor {
                Light: "#EE6FF8",
                Dark: "#AD58B4",
            }),
            expanded_marker: Style::new().foreground(AdaptiveColor {
                Light: "#9B9B9B",
                Dark: "#5C5C5C",
            }),
            no_items: Style::new().foreground(AdaptiveColor {
                Light: "#909090",
                Dark: "#626262",
            }),
        }
    }
}
