//! Public operations of the expandable list.

use super::model::{Model, Slot};
use super::types::{IndexPath, Notification, Size};
use super::{DataSource, DelegateInterceptor, ListConfig, ListDelegate};
use crate::animation::AnimationMsg;
use crate::cell::{ExpandCell, ListItem};
use bubbletea_rs::{Cmd, Msg};
use std::sync::{Arc, Weak};

impl Model {
    // Registration

    /// Registers an [`ExpandCell`] factory under a reuse identifier.
    pub fn register<F>(&mut self, identifier: &str, factory: F)
    where
        F: Fn() -> ExpandCell + Send + 'static,
    {
        self.state.registry.register(
            identifier,
            Box::new(move || Box::new(factory()) as Box<dyn ListItem>),
        );
    }

    /// Registers a factory for arbitrary rows.
    ///
    /// # Panics
    ///
    /// The list only hosts expandable cells. If the factory does not build an
    /// [`ExpandCell`], registration fails immediately.
    ///
    /// The check builds one row and discards it, so `factory` runs once more
    /// than the number of rows the list ends up holding.
    pub fn register_item<F>(&mut self, identifier: &str, factory: F)
    where
        F: Fn() -> Box<dyn ListItem> + Send + 'static,
    {
        if factory().as_expand_cell().is_none() {
            log::error!("cell type registered as {identifier:?} is not an ExpandCell");
            panic!("ExpandableList only accepts ExpandCell rows, {identifier:?} builds something else");
        }
        self.state.registry.register(identifier, Box::new(factory));
    }

    /// Returns true if `identifier` has a registered factory.
    pub fn is_registered(&self, identifier: &str) -> bool {
        self.state.registry.is_registered(identifier)
    }

    // Data

    /// Sets the data source and reloads every item from it.
    pub fn set_data_source<D: DataSource + 'static>(&mut self, data_source: D) {
        self.data_source = Some(Box::new(data_source));
        self.reload_data();
    }

    /// Rebuilds every item from the data source.
    ///
    /// Rows are dequeued by reuse identifier and configured by the data source.
    /// Selection is cleared; queued transitions for rows that no longer exist
    /// resolve without effect.
    ///
    /// # Panics
    ///
    /// Panics if the data source names a reuse identifier that was never registered.
    pub fn reload_data(&mut self) {
        self.state.clear_items();
        let Some(data_source) = self.data_source.as_ref() else {
            self.after_items_changed();
            return;
        };

        let width = self.state.item_width();
        for section in 0..data_source.number_of_sections() {
            let mut slots = Vec::new();
            for item in 0..data_source.number_of_items(section) {
                let index_path = IndexPath::new(section, item);
                let identifier = data_source.reuse_identifier(index_path);
                let Some(mut row) = self.state.registry.dequeue(&identifier) else {
                    log::error!("no cell registered for reuse identifier {identifier:?}");
                    panic!("no cell registered for reuse identifier {identifier:?}");
                };
                if let Some(cell) = row.as_expand_cell_mut() {
                    data_source.configure(cell, index_path);
                    cell.set_width(width);
                }
                slots.push(Slot {
                    identifier,
                    item: row,
                });
            }
            self.state.sections.push(slots);
        }
        log::debug!(
            "reloaded {} items in {} sections",
            self.state.len(),
            self.state.sections.len()
        );
        self.after_items_changed();
    }

    /// Appends a fresh row built for `identifier` to `section`.
    ///
    /// Missing sections up to `section` are created. Returns `None` if
    /// `identifier` is not registered.
    pub fn append_item(&mut self, section: usize, identifier: &str) -> Option<IndexPath> {
        let Some(mut row) = self.state.registry.dequeue(identifier) else {
            log::error!("no cell registered for reuse identifier {identifier:?}");
            return None;
        };
        if let Some(cell) = row.as_expand_cell_mut() {
            cell.set_width(self.state.item_width());
        }

        while self.state.sections.len() <= section {
            self.state.sections.push(Vec::new());
        }
        let slots = &mut self.state.sections[section];
        slots.push(Slot {
            identifier: identifier.to_string(),
            item: row,
        });
        let index_path = IndexPath::new(section, slots.len() - 1);

        self.after_items_changed();
        Some(index_path)
    }

    fn after_items_changed(&mut self) {
        if !self.cursor.is_some_and(|cursor| self.state.contains(cursor)) {
            self.cursor = self.state.index_paths().first().copied();
        }
        self.state.clamp_scroll_offset();
        self.state.update_visible_items();
    }

    /// Number of sections.
    pub fn number_of_sections(&self) -> usize {
        self.state.sections.len()
    }

    /// Number of items in `section`, zero for a missing section.
    pub fn number_of_items(&self, section: usize) -> usize {
        self.state.sections.get(section).map_or(0, Vec::len)
    }

    /// Total number of items.
    pub fn len(&self) -> usize {
        self.state.len()
    }

    /// Returns true if the list has no items.
    pub fn is_empty(&self) -> bool {
        self.state.len() == 0
    }

    // Cells

    /// The cell at `index_path`.
    pub fn cell_for_item(&self, index_path: IndexPath) -> Option<&ExpandCell> {
        self.state.expand_cell(index_path)
    }

    /// Mutable access to the cell at `index_path`.
    pub fn cell_for_item_mut(&mut self, index_path: IndexPath) -> Option<&mut ExpandCell> {
        self.state.expand_cell_mut(index_path)
    }

    /// Cells currently intersecting the viewport, top to bottom.
    pub fn visible_cells(&self) -> Vec<(IndexPath, &ExpandCell)> {
        self.state
            .displayed
            .iter()
            .filter_map(|index_path| {
                self.state
                    .expand_cell(*index_path)
                    .map(|cell| (*index_path, cell))
            })
            .collect()
    }

    /// Index paths currently intersecting the viewport.
    pub fn visible_index_paths(&self) -> Vec<IndexPath> {
        self.state.displayed.iter().copied().collect()
    }

    // Selection

    /// Whether several items may be selected and expanded at once. Off by default.
    pub fn allows_multiple_selection(&self) -> bool {
        self.state.allows_multiple_selection
    }

    /// Switches multiple selection on or off.
    ///
    /// Turning it off deselects and collapses everything, without notifying
    /// the delegate, in a single batch update.
    pub fn set_allows_multiple_selection(&mut self, allows: bool) {
        self.state.allows_multiple_selection = allows;
        if !allows {
            let cleared = self.state.deselect_all();
            log::debug!("multiple selection disabled, cleared {} items", cleared.len());
            self.state.perform_batch_updates(None);
        }
    }

    /// Selected index paths, top to bottom.
    pub fn selected_index_paths(&self) -> Vec<IndexPath> {
        self.state.selection.iter().copied().collect()
    }

    /// Returns true if `index_path` is selected.
    pub fn is_selected(&self, index_path: IndexPath) -> bool {
        self.state.is_selected(index_path)
    }

    /// Selects and expands `index_path` right away, without animation or
    /// delegate notifications.
    pub fn select_item(&mut self, index_path: IndexPath) {
        if !self.state.contains(index_path) {
            return;
        }
        self.state.select(index_path);
        self.state.perform_batch_updates(None);
    }

    /// Deselects and collapses `index_path` right away, without animation or
    /// delegate notifications.
    pub fn deselect_item(&mut self, index_path: IndexPath) {
        if !self.state.is_selected(index_path) {
            return;
        }
        self.state.deselect(index_path);
        self.state.perform_batch_updates(None);
    }

    /// Handles a user tap on `index_path`.
    ///
    /// The selection itself changes later, inside an animated transition. The
    /// returned command starts the animation lane; route its messages back
    /// through [`Model::update`](bubbletea_rs::Model::update).
    pub fn tap(&mut self, index_path: IndexPath) -> Option<Cmd> {
        if !self.state.contains(index_path) {
            return None;
        }

        let interceptor = self.state.interceptor.clone();
        let deselecting =
            self.state.allows_multiple_selection && self.state.is_selected(index_path);
        let decision = if deselecting {
            interceptor.should_deselect(&mut self.state, &mut self.queue, index_path)
        } else {
            interceptor.should_select(&mut self.state, &mut self.queue, index_path)
        };

        if decision.allow {
            // Plain rows select immediately, the way a bare list would.
            if deselecting {
                self.state.deselect(index_path);
                interceptor.did_deselect(index_path);
            } else if !self.state.is_selected(index_path) {
                self.state.select(index_path);
                interceptor.did_select(index_path);
            }
        }
        if self.queue.pending() > 1 {
            log::debug!("{} selection transitions waiting", self.queue.pending());
        }
        decision.cmd
    }

    /// Runs a batch of size changes and re-lays out once.
    ///
    /// `completion` receives `true` once the new layout is committed.
    pub fn perform_batch_updates<U, F>(&mut self, updates: U, completion: F)
    where
        U: FnOnce(&mut Self),
        F: FnOnce(bool) + 'static,
    {
        updates(self);
        self.state.perform_batch_updates(Some(Box::new(completion)));
    }

    /// Reacts to a change of the preferred content size: deselects everything
    /// without notifications and invalidates the layout.
    pub fn content_size_category_changed(&mut self) {
        let cleared = self.state.deselect_all();
        log::debug!(
            "content size changed, cleared {} selected items",
            cleared.len()
        );
        self.state.invalidate_layout();
    }

    /// Number of layout batch updates committed so far.
    pub fn batch_update_count(&self) -> usize {
        self.state.batch_updates
    }

    /// Number of full layout invalidations so far.
    pub fn layout_invalidation_count(&self) -> usize {
        self.state.layout_invalidations
    }

    // Delegate

    /// Attaches `delegate`. The list keeps only a weak reference.
    pub fn set_delegate<D: ListDelegate + 'static>(&mut self, delegate: &Arc<D>) {
        let delegate: Arc<dyn ListDelegate> = delegate.clone();
        let weak: Weak<dyn ListDelegate> = Arc::downgrade(&delegate);
        self.state.interceptor.set_external(Some(weak));
    }

    /// Detaches the delegate.
    pub fn clear_delegate(&mut self) {
        self.state.interceptor.set_external(None);
    }

    /// Returns true if a live delegate is attached.
    pub fn has_delegate(&self) -> bool {
        self.state.interceptor.has_external_delegate()
    }

    /// The interceptor standing between the list and its delegate.
    pub fn interceptor(&self) -> &DelegateInterceptor {
        &self.state.interceptor
    }

    /// Capability probe: does the list, or its delegate, implement `notification`?
    pub fn delegate_responds_to(&self, notification: Notification) -> bool {
        self.state.interceptor.responds_to(notification)
    }

    // Geometry

    /// The configuration the list was built with.
    pub fn config(&self) -> &ListConfig {
        &self.state.config
    }

    /// Outer size of the list.
    pub fn bounds(&self) -> Size {
        self.state.bounds
    }

    /// Resizes the list. Visible cells adopt the new width.
    pub fn set_bounds(&mut self, bounds: Size) {
        let width_changed = bounds.width != self.state.bounds.width;
        self.state.bounds = bounds;
        if width_changed {
            self.state.resize_displayed_cells();
        }
        self.state.clamp_scroll_offset();
        self.state.update_visible_items();
    }

    /// Width every cell is given.
    pub fn item_width(&self) -> usize {
        self.state.item_width()
    }

    /// Total height of the scrollable content, insets included.
    pub fn content_height(&self) -> usize {
        self.state.content_height()
    }

    /// First content row shown at the top of the viewport.
    pub fn scroll_offset(&self) -> usize {
        self.state.scroll_offset
    }

    /// Scrolls so that content row `offset` is at the top, clamped to the content.
    pub fn scroll_to(&mut self, offset: usize) {
        self.state.scroll_to(offset);
    }

    /// Scrolls the minimum distance needed to show `index_path` entirely.
    pub fn scroll_to_item(&mut self, index_path: IndexPath) {
        let (frames, _) = self.state.frames();
        let Some(frame) = frames.iter().find(|frame| frame.index_path == index_path) else {
            return;
        };
        let top = self.state.scroll_offset;
        let height = self.state.bounds.height;
        if frame.y < top {
            self.state.scroll_to(frame.y);
        } else if frame.y + frame.height > top + height {
            self.state.scroll_to((frame.y + frame.height).saturating_sub(height));
        }
    }

    // Cursor

    /// The highlighted item.
    pub fn cursor(&self) -> Option<IndexPath> {
        self.cursor
    }

    /// Moves the highlight to `index_path` if the delegate allows it.
    ///
    /// Returns true if the cursor moved.
    pub fn set_cursor(&mut self, index_path: IndexPath) -> bool {
        if !self.state.contains(index_path) || self.cursor == Some(index_path) {
            return false;
        }
        let interceptor = self.state.interceptor.clone();
        if !interceptor.should_highlight(index_path) {
            return false;
        }
        if let Some(previous) = self.cursor.replace(index_path) {
            interceptor.did_unhighlight(previous);
        }
        interceptor.did_highlight(index_path);
        self.scroll_to_item(index_path);
        true
    }

    pub(super) fn move_cursor(&mut self, delta: isize) {
        let order = self.state.index_paths();
        if order.is_empty() {
            return;
        }
        let current = self
            .cursor
            .and_then(|cursor| order.iter().position(|ip| *ip == cursor))
            .unwrap_or(0);
        let target = current.saturating_add_signed(delta).min(order.len() - 1);
        self.set_cursor(order[target]);
    }

    pub(super) fn cursor_to_start(&mut self) {
        if let Some(first) = self.state.index_paths().first().copied() {
            self.set_cursor(first);
        }
    }

    pub(super) fn cursor_to_end(&mut self) {
        if let Some(last) = self.state.index_paths().last().copied() {
            self.set_cursor(last);
        }
    }

    // Animation

    /// The message the animation lane is waiting for, if any.
    ///
    /// Lets callers drive transitions without a clock.
    pub fn animation_msg(&self) -> Option<AnimationMsg> {
        self.queue.due_msg()
    }

    /// Routes an animation message to the queue.
    pub fn deliver_animation(&mut self, msg: AnimationMsg) -> Option<Cmd> {
        self.queue.update(&(Box::new(msg) as Msg), &mut self.state)
    }

    /// Number of queued transitions that have not started yet.
    pub fn pending_animations(&self) -> usize {
        self.queue.pending()
    }

    /// Returns true while a transition is queued or running.
    pub fn is_animating(&self) -> bool {
        !self.queue.is_idle()
    }
}
