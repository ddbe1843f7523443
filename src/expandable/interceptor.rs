//! The proxy between the list and the application's delegate.
//!
//! The list never talks to the application's [`ListDelegate`] directly. It talks
//! to a [`DelegateInterceptor`], which implements the same callbacks. Three of
//! them carry the list's own behaviour:
//!
//! - **will display**: adopt the available width before the delegate sees the cell;
//! - **should select** / **should deselect**: run the immediate-appearance hook,
//!   then queue the actual selection change as an animated transition, and refuse
//!   the host's own immediate selection.
//!
//! Everything else is forwarded untouched. The delegate is held weakly and may
//! be replaced or dropped at any time; an absent delegate behaves like one that
//! implements nothing.

use super::model::ListState;
use super::types::{IndexPath, Notification};
use super::ListDelegate;
use crate::animation::Queue;
use crate::cell::{Layout, ListItem};
use bubbletea_rs::Cmd;
use std::fmt;
use std::sync::{Arc, Weak};

/// Outcome of an intercepted should-select / should-deselect callback.
pub(crate) struct Decision {
    /// Whether the host should change the selection immediately itself.
    pub(crate) allow: bool,
    /// Command that starts the animation lane, if the submission woke it.
    pub(crate) cmd: Option<Cmd>,
}

impl Decision {
    fn refuse(cmd: Option<Cmd>) -> Self {
        Self { allow: false, cmd }
    }

    fn allow() -> Self {
        Self {
            allow: true,
            cmd: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Intent {
    /// Select if unselected, deselect if selected, decided when the task runs.
    Toggle,
    /// Deselect if still selected when the task runs.
    Deselect,
}

/// Sits between the list and an optional, weakly held [`ListDelegate`].
#[derive(Clone, Default)]
pub struct DelegateInterceptor {
    external: Option<Weak<dyn ListDelegate>>,
}

impl fmt::Debug for DelegateInterceptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DelegateInterceptor")
            .field("has_external_delegate", &self.has_external_delegate())
            .finish()
    }
}

impl DelegateInterceptor {
    pub(crate) fn set_external(&mut self, external: Option<Weak<dyn ListDelegate>>) {
        self.external = external;
    }

    /// The application's delegate, if one is set and still alive.
    pub fn external(&self) -> Option<Arc<dyn ListDelegate>> {
        self.external.as_ref().and_then(Weak::upgrade)
    }

    /// Returns true if a live delegate is attached.
    pub fn has_external_delegate(&self) -> bool {
        self.external().is_some()
    }

    /// True if either the interceptor or the attached delegate implements `notification`.
    pub fn responds_to(&self, notification: Notification) -> bool {
        notification.is_intercepted()
            || self
                .external()
                .is_some_and(|delegate| delegate.responds_to(notification))
    }

    /// Width adoption: resizes the cell, then forwards the resized cell.
    pub(crate) fn will_display(
        &self,
        item: &mut dyn ListItem,
        index_path: IndexPath,
        available_width: usize,
    ) {
        let Some(cell) = item.as_expand_cell_mut() else {
            log::error!(
                "row at {index_path} is not an ExpandCell; skipping width adoption"
            );
            return;
        };

        log::trace!("adopting width {available_width} for {index_path}");
        cell.set_width(available_width);
        if let Some(delegate) = self.external() {
            delegate.will_display(cell, index_path);
        }
    }

    /// Intercepts the host's select decision.
    ///
    /// Runs the immediate-appearance hook now and queues the selection change.
    /// The host is always told not to select by itself, unless the row is not
    /// an expandable cell, in which case plain selection is allowed.
    pub(crate) fn should_select(
        &self,
        state: &mut ListState,
        queue: &mut Queue<ListState>,
        index_path: IndexPath,
    ) -> Decision {
        let selected = state.is_selected(index_path);
        let Some(cell) = state.expand_cell_mut(index_path) else {
            log::error!(
                "row at {index_path} is not an ExpandCell; allowing plain selection"
            );
            return Decision::allow();
        };

        cell.will_apply(if selected {
            Layout::Collapsed
        } else {
            Layout::Expanded
        });
        let duration = state.config.animation_speed.duration();
        Decision::refuse(queue.submit(duration, move |state: &mut ListState| {
            run_transition(state, index_path, Intent::Toggle);
        }))
    }

    /// Intercepts the host's deselect decision. Only used with multiple selection.
    pub(crate) fn should_deselect(
        &self,
        state: &mut ListState,
        queue: &mut Queue<ListState>,
        index_path: IndexPath,
    ) -> Decision {
        if !state.allows_multiple_selection {
            return Decision::refuse(None);
        }
        let Some(cell) = state.expand_cell_mut(index_path) else {
            log::error!(
                "row at {index_path} is not an ExpandCell; allowing plain deselection"
            );
            return Decision::allow();
        };

        cell.will_apply(Layout::Collapsed);
        let duration = state.config.animation_speed.duration();
        Decision::refuse(queue.submit(duration, move |state: &mut ListState| {
            run_transition(state, index_path, Intent::Deselect);
        }))
    }

    pub(crate) fn delegate_should_select(&self, index_path: IndexPath) -> bool {
        self.external()
            .map_or(true, |delegate| delegate.should_select(index_path))
    }

    pub(crate) fn delegate_should_deselect(&self, index_path: IndexPath) -> bool {
        self.external()
            .map_or(true, |delegate| delegate.should_deselect(index_path))
    }

    pub(crate) fn did_select(&self, index_path: IndexPath) {
        if let Some(delegate) = self.external() {
            delegate.did_select(index_path);
        }
    }

    pub(crate) fn did_deselect(&self, index_path: IndexPath) {
        if let Some(delegate) = self.external() {
            delegate.did_deselect(index_path);
        }
    }

    pub(crate) fn did_end_displaying(&self, index_path: IndexPath) {
        if let Some(delegate) = self.external() {
            delegate.did_end_displaying(index_path);
        }
    }

    pub(crate) fn should_highlight(&self, index_path: IndexPath) -> bool {
        self.external()
            .map_or(true, |delegate| delegate.should_highlight(index_path))
    }

    pub(crate) fn did_highlight(&self, index_path: IndexPath) {
        if let Some(delegate) = self.external() {
            delegate.did_highlight(index_path);
        }
    }

    pub(crate) fn did_unhighlight(&self, index_path: IndexPath) {
        if let Some(delegate) = self.external() {
            delegate.did_unhighlight(index_path);
        }
    }

    pub(crate) fn did_scroll(&self, offset: usize) {
        if let Some(delegate) = self.external() {
            delegate.did_scroll(offset);
        }
    }
}

/// Body of a queued transition. Predicates are asked when the task runs,
/// against the selection and delegate of that moment.
fn run_transition(state: &mut ListState, index_path: IndexPath, intent: Intent) {
    if !state.contains(index_path) {
        log::debug!("{index_path} disappeared while its transition was queued");
        return;
    }

    let interceptor = state.interceptor.clone();
    let selected = state.is_selected(index_path);

    let notify = match (intent, selected) {
        (_, true) if interceptor.delegate_should_deselect(index_path) => {
            state.deselect(index_path);
            Some(false)
        }
        (Intent::Toggle, false) if interceptor.delegate_should_select(index_path) => {
            state.select(index_path);
            Some(true)
        }
        _ => None,
    };

    state.perform_batch_updates(None);

    match notify {
        Some(true) => interceptor.did_select(index_path),
        Some(false) => interceptor.did_deselect(index_path),
        None => {}
    }
}
