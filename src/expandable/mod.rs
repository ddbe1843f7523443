//! Expandable list component.
//!
//! A virtualized, scrollable list of [`ExpandCell`](crate::cell::ExpandCell)s.
//! Selecting an item expands it to reveal its secondary region; deselecting it
//! collapses it again. Every expand and collapse runs as a transition on a
//! single animation lane, so transitions never overlap and always run in the
//! order they were requested.
//!
//! ## Architecture
//!
//! - [`Model`]: the list. Owns rows, selection, scrolling and the animation queue.
//! - [`DelegateInterceptor`]: sits between the list and your [`ListDelegate`].
//!   It adopts the available width for every cell about to be displayed, and
//!   turns select/deselect decisions into queued transitions.
//! - [`ListDelegate`]: optional observer and gatekeeper, held weakly.
//! - [`DataSource`]: optional provider of items by reuse identifier.
//!
//! ## Selection flow
//!
//! 1. A tap (or the toggle key on the highlighted item) asks the interceptor
//!    whether the item should be selected.
//! 2. The interceptor runs the cell's immediate-appearance hook, queues the
//!    transition and answers "no", so nothing changes yet.
//! 3. When the transition's turn comes, the delegate's predicate is consulted,
//!    the selection changes, the cell flips its layout and the list commits
//!    one batch update. The delegate hears `did_select` / `did_deselect` last.
//! 4. The lane stays busy for the configured [`AnimationSpeed`], then picks up
//!    the next queued transition.
//!
//! ## Messages
//!
//! - `KeyMsg`: cursor movement and toggling, while focused.
//! - `WindowSizeMsg`: resizes the list.
//! - [`AnimationMsg`](crate::animation::AnimationMsg): advances the animation lane.
//! - [`ContentSizeChangedMsg`]: deselects everything and re-lays out.
//!
//! ## Example
//!
//! ```rust
//! use bubbletea_expandable::cell::ExpandCell;
//! use bubbletea_expandable::expandable::{
//!     DataSource, EdgeInsets, IndexPath, ListConfig, Model,
//! };
//!
//! struct Faq(Vec<(&'static str, &'static str)>);
//!
//! impl DataSource for Faq {
//!     fn number_of_items(&self, _section: usize) -> usize {
//!         self.0.len()
//!     }
//!
//!     fn reuse_identifier(&self, _index_path: IndexPath) -> String {
//!         "faq".to_string()
//!     }
//!
//!     fn configure(&self, cell: &mut ExpandCell, index_path: IndexPath) {
//!         let (question, answer) = self.0[index_path.item];
//!         cell.regions_mut().primary.set_content(question);
//!         cell.regions_mut().secondary.set_content(answer);
//!         cell.layout_if_needed();
//!     }
//! }
//!
//! let config = ListConfig::default().with_section_inset(EdgeInsets::symmetric(0, 2));
//! let mut list = Model::new(config, 40, 10);
//! list.register("faq", ExpandCell::new);
//! list.set_data_source(Faq(vec![
//!     ("What is it?", "An expandable list."),
//!     ("Does it animate?", "One transition at a time."),
//! ]));
//!
//! assert_eq!(list.len(), 2);
//! assert_eq!(list.cell_for_item(IndexPath::item(0)).unwrap().width(), 36);
//! ```

mod api;
pub mod config;
mod delegate;
mod interceptor;
pub mod keys;
mod model;
mod registry;
mod rendering;
pub mod style;
pub mod types;

#[cfg(test)]
mod tests;

pub use config::ListConfig;
pub use delegate::{DataSource, ListDelegate};
pub use interceptor::DelegateInterceptor;
pub use keys::ListKeyMap;
pub use model::Model;
pub use registry::CellFactory;
pub use style::ListStyles;
pub use types::{AnimationSpeed, ContentSizeChangedMsg, EdgeInsets, IndexPath, Notification, Size};

use crate::animation::AnimationMsg;
use crate::key::{self, KeyMap};
use bubbletea_rs::{Cmd, KeyMsg, Model as BubbleTeaModel, Msg, WindowSizeMsg};

impl KeyMap for Model {
    fn short_help(&self) -> Vec<&key::Binding> {
        self.keymap.short_help()
    }

    fn full_help(&self) -> Vec<Vec<&key::Binding>> {
        self.keymap.full_help()
    }
}

impl BubbleTeaModel for Model {
    /// An empty list, 80 by 24, with a two column gutter for the cursor marker.
    fn init() -> (Self, Option<Cmd>) {
        let config = ListConfig::default().with_section_inset(EdgeInsets::symmetric(0, 2));
        (Self::new(config, 80, 24), None)
    }

    /// Routes animation, resize, content size and key messages.
    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if msg.downcast_ref::<AnimationMsg>().is_some() {
            return self.queue.update(&msg, &mut self.state);
        }

        if let Some(size) = msg.downcast_ref::<WindowSizeMsg>() {
            self.set_bounds(Size::new(size.width as usize, size.height as usize));
            return None;
        }

        if msg.downcast_ref::<ContentSizeChangedMsg>().is_some() {
            self.content_size_category_changed();
            return None;
        }

        if !self.focus {
            return None;
        }
        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            if self.keymap.cursor_up.matches(key_msg) {
                self.move_cursor(-1);
            } else if self.keymap.cursor_down.matches(key_msg) {
                self.move_cursor(1);
            } else if self.keymap.go_to_start.matches(key_msg) {
                self.cursor_to_start();
            } else if self.keymap.go_to_end.matches(key_msg) {
                self.cursor_to_end();
            } else if self.keymap.toggle.matches(key_msg) {
                let index_path = self.cursor?;
                return self.tap(index_path);
            }
        }
        None
    }

    fn view(&self) -> String {
        self.view_items()
    }
}

impl crate::Component for Model {
    fn focus(&mut self) -> Option<Cmd> {
        self.focus = true;
        None
    }

    fn blur(&mut self) {
        self.focus = false;
    }

    fn focused(&self) -> bool {
        self.focus
    }
}
