//! Traits implemented by applications that host an expandable list.

use super::types::{IndexPath, Notification};
use crate::cell::ExpandCell;

/// Observer and gatekeeper of list events.
///
/// Every method has a default: predicates allow, notifications do nothing.
/// Implement only what you need, and report it from [`ListDelegate::responds_to`]
/// so capability probes see it.
///
/// The list keeps only a weak reference to its delegate. Callbacks take
/// `&self`; use interior mutability to record state.
///
/// # Examples
///
/// ```rust
/// use bubbletea_expandable::expandable::{IndexPath, ListDelegate, Notification};
/// use std::sync::Mutex;
///
/// #[derive(Default)]
/// struct SelectionLog(Mutex<Vec<IndexPath>>);
///
/// impl ListDelegate for SelectionLog {
///     fn responds_to(&self, notification: Notification) -> bool {
///         notification == Notification::DidSelect
///     }
///
///     fn did_select(&self, index_path: IndexPath) {
///         self.0.lock().unwrap().push(index_path);
///     }
/// }
/// ```
pub trait ListDelegate: Send + Sync {
    /// Whether this delegate implements `notification`.
    fn responds_to(&self, _notification: Notification) -> bool {
        false
    }

    /// `cell` is about to enter the viewport. Its width is already adopted.
    fn will_display(&self, _cell: &ExpandCell, _index_path: IndexPath) {}

    /// The item left the viewport.
    fn did_end_displaying(&self, _index_path: IndexPath) {}

    /// May the cursor highlight this item?
    fn should_highlight(&self, _index_path: IndexPath) -> bool {
        true
    }

    /// The cursor highlighted this item.
    fn did_highlight(&self, _index_path: IndexPath) {}

    /// The cursor left this item.
    fn did_unhighlight(&self, _index_path: IndexPath) {}

    /// May this item become selected? Asked when its transition starts.
    fn should_select(&self, _index_path: IndexPath) -> bool {
        true
    }

    /// The item is selected and its expanded layout is committed.
    fn did_select(&self, _index_path: IndexPath) {}

    /// May this item become deselected? Asked when its transition starts.
    fn should_deselect(&self, _index_path: IndexPath) -> bool {
        true
    }

    /// The item is deselected and its collapsed layout is committed.
    fn did_deselect(&self, _index_path: IndexPath) {}

    /// The scroll offset changed to `offset` rows.
    fn did_scroll(&self, _offset: usize) {}
}

/// Supplies the list's items.
pub trait DataSource: Send {
    /// Number of sections.
    fn number_of_sections(&self) -> usize {
        1
    }

    /// Number of items in `section`.
    fn number_of_items(&self, section: usize) -> usize;

    /// Reuse identifier of the cell type for `index_path`.
    fn reuse_identifier(&self, index_path: IndexPath) -> String;

    /// Fills a dequeued cell with the content for `index_path`.
    fn configure(&self, cell: &mut ExpandCell, index_path: IndexPath);
}
