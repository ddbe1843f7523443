#![warn(missing_docs)]
#![doc(html_root_url = "https://docs.rs/bubbletea-expandable/")]

//! # bubbletea-expandable
//!
//! Expandable list cells for [bubbletea-rs](https://github.com/joshka/bubbletea-rs)
//! applications. Selecting an item reveals its secondary content; every expand
//! and collapse runs as an animated transition, one at a time, in the order it
//! was requested.
//!
//! ## Overview
//!
//! - [`cell`]: [`ExpandCell`], a two-region cell with a collapsed and an expanded layout.
//! - [`animation`]: [`SelectionAnimationQueue`], a FIFO single-lane sequencer
//!   driven by bubbletea-rs messages.
//! - [`expandable`]: [`ExpandableList`], the list component, and the
//!   [`DelegateInterceptor`] between it and your delegate.
//! - [`key`]: type-safe key bindings with help text.
//!
//! Like every bubbletea-rs component, the list follows the Elm Architecture:
//! route messages through `update()`, render with `view()`, and execute the
//! commands it hands back.
//!
//! ## Focus Management
//!
//! The list implements the [`Component`] trait:
//!
//! ```rust
//! use bubbletea_expandable::prelude::*;
//! use bubbletea_rs::Cmd;
//!
//! fn handle_focus<T: Component>(component: &mut T) {
//!     let _cmd: Option<Cmd> = component.focus();
//!     assert!(component.focused());
//!     component.blur();
//!     assert!(!component.focused());
//! }
//!
//! let mut list = ExpandableList::new(ListConfig::default(), 80, 24);
//! handle_focus(&mut list);
//! ```
//!
//! ## Integration
//!
//! ```rust
//! use bubbletea_expandable::prelude::*;
//! use bubbletea_rs::{Cmd, Model, Msg};
//!
//! struct App {
//!     list: ExpandableList,
//! }
//!
//! impl Model for App {
//!     fn init() -> (Self, Option<Cmd>) {
//!         let config = ListConfig::default()
//!             .with_section_inset(EdgeInsets::symmetric(0, 2))
//!             .with_animation_speed(AnimationSpeed::Fast);
//!         let mut list = ExpandableList::new(config, 80, 24);
//!         list.register("row", || {
//!             ExpandCell::new()
//!                 .with_primary(Region::with_content("Shipping"))
//!                 .with_secondary(Region::with_content("Ships within two days."))
//!         });
//!         list.append_item(0, "row");
//!         (Self { list }, None)
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         // Animation messages must reach the list, so forward everything.
//!         self.list.update(msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         self.list.view()
//!     }
//! }
//! ```

pub mod animation;
pub mod cell;
pub mod expandable;
pub mod key;

use bubbletea_rs::Cmd;

/// Focus management shared by interactive components.
///
/// A focused component reacts to keyboard input; a blurred one ignores it
/// but still processes every other message.
pub trait Component {
    /// Sets the component to focused state.
    ///
    /// Returns an optional command to run on focus.
    fn focus(&mut self) -> Option<Cmd>;

    /// Sets the component to blurred (unfocused) state.
    fn blur(&mut self);

    /// Returns the current focus state of the component.
    fn focused(&self) -> bool;
}

pub use animation::Queue as SelectionAnimationQueue;
pub use cell::{ExpandCell, ListItem};
pub use expandable::DelegateInterceptor;
pub use expandable::Model as ExpandableList;

/// Commonly used types, importable with a single `use`.
///
/// ```rust
/// use bubbletea_expandable::prelude::*;
///
/// let config = ListConfig::default().with_line_spacing(1);
/// let list = ExpandableList::new(config, 40, 10);
/// assert!(list.is_empty());
/// ```
pub mod prelude {
    pub use crate::animation::{
        AnimationMsg, Phase as AnimationPhase, Queue as SelectionAnimationQueue, Scheduler,
        TickScheduler,
    };
    pub use crate::cell::{
        Anchor, CellHooks, ExpandCell, Layout, ListItem, NoHooks, Region, Regions,
    };
    pub use crate::expandable::{
        AnimationSpeed, ContentSizeChangedMsg, DataSource, DelegateInterceptor, EdgeInsets,
        IndexPath, ListConfig, ListDelegate, ListKeyMap, ListStyles, Model as ExpandableList,
        Notification, Size,
    };
    pub use crate::key::{Binding, Help as KeyHelp, KeyMap, KeyPress};
    pub use crate::Component;
}
