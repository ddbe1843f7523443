//! View rendering for the expandable list.
//!
//! Only the rows inside the viewport are allocated. Items intersecting it are
//! painted at their content row minus the scroll offset.

use super::style::{CURSOR_MARKER, EXPANDED_MARKER};
use super::types::IndexPath;
use super::Model;

impl Model {
    /// Renders the rows inside the viewport.
    pub(super) fn view_items(&self) -> String {
        let bounds = self.state.bounds;
        if bounds.height == 0 || bounds.width == 0 {
            return String::new();
        }
        if self.state.len() == 0 {
            return self.styles.no_items.render("No items.");
        }

        let (frames, content_height) = self.state.frames();
        let top = self.state.scroll_offset;
        let bottom = (top + bounds.height).min(content_height);
        let margin = self.state.config.content_inset.left + self.state.config.section_inset.left;
        let mut viewport = vec![String::new(); bottom.saturating_sub(top)];

        for frame in frames {
            // Rows entirely outside the viewport are never rendered.
            if frame.y + frame.height <= top || frame.y >= bottom {
                continue;
            }
            let Some(item) = self.state.item(frame.index_path) else {
                continue;
            };

            let gutter = self.gutter(frame.index_path, margin);
            for (offset, line) in item.render().into_iter().take(frame.height).enumerate() {
                let Some(y) = (frame.y + offset).checked_sub(top) else {
                    continue;
                };
                if let Some(row) = viewport.get_mut(y) {
                    *row = format!("{gutter}{line}");
                }
            }
        }

        viewport.join("\n")
    }

    /// The left inset of an item's rows, carrying its marker when there is room.
    fn gutter(&self, index_path: IndexPath, margin: usize) -> String {
        if margin == 0 {
            return String::new();
        }
        let pad = " ".repeat(margin - 1);
        if self.focus && self.cursor == Some(index_path) {
            format!("{}{pad}", self.styles.cursor_marker.render(CURSOR_MARKER))
        } else if self.state.is_selected(index_path) {
            format!("{}{pad}", self.styles.expanded_marker.render(EXPANDED_MARKER))
        } else {
            " ".repeat(margin)
        }
    }
}
