//! The list model and the state its queued transitions mutate.
//!
//! [`ListState`] is everything an animation task may touch: rows, selection,
//! geometry and the interceptor. [`Model`] wraps it together with the
//! animation queue, the data source and presentation concerns.

use super::config::ListConfig;
use super::interceptor::DelegateInterceptor;
use super::keys::ListKeyMap;
use super::registry::CellRegistry;
use super::style::ListStyles;
use super::types::{IndexPath, Size};
use super::DataSource;
use crate::animation::Queue;
use crate::cell::{ExpandCell, ListItem};
use std::collections::BTreeSet;

/// A row and the identifier it was dequeued under.
pub(crate) struct Slot {
    pub(crate) identifier: String,
    pub(crate) item: Box<dyn ListItem>,
}

/// Vertical placement of an item inside the scrollable content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ItemFrame {
    pub(crate) index_path: IndexPath,
    pub(crate) y: usize,
    pub(crate) height: usize,
}

/// State shared between the model and its queued transitions.
pub(crate) struct ListState {
    pub(crate) config: ListConfig,
    pub(crate) bounds: Size,
    pub(crate) sections: Vec<Vec<Slot>>,
    pub(crate) selection: BTreeSet<IndexPath>,
    pub(crate) allows_multiple_selection: bool,
    pub(crate) interceptor: DelegateInterceptor,
    pub(crate) registry: CellRegistry,
    pub(crate) displayed: BTreeSet<IndexPath>,
    pub(crate) scroll_offset: usize,
    pub(crate) batch_updates: usize,
    pub(crate) layout_invalidations: usize,
}

impl ListState {
    pub(crate) fn new(config: ListConfig, bounds: Size) -> Self {
        Self {
            config,
            bounds,
            sections: Vec::new(),
            selection: BTreeSet::new(),
            allows_multiple_selection: false,
            interceptor: DelegateInterceptor::default(),
            registry: CellRegistry::default(),
            displayed: BTreeSet::new(),
            scroll_offset: 0,
            batch_updates: 0,
            layout_invalidations: 0,
        }
    }

    pub(crate) fn contains(&self, index_path: IndexPath) -> bool {
        self.sections
            .get(index_path.section)
            .is_some_and(|section| index_path.item < section.len())
    }

    pub(crate) fn item(&self, index_path: IndexPath) -> Option<&dyn ListItem> {
        self.sections
            .get(index_path.section)?
            .get(index_path.item)
            .map(|slot| slot.item.as_ref())
    }

    pub(crate) fn expand_cell(&self, index_path: IndexPath) -> Option<&ExpandCell> {
        self.item(index_path)?.as_expand_cell()
    }

    pub(crate) fn expand_cell_mut(&mut self, index_path: IndexPath) -> Option<&mut ExpandCell> {
        self.sections
            .get_mut(index_path.section)?
            .get_mut(index_path.item)?
            .item
            .as_expand_cell_mut()
    }

    /// Every index path, top to bottom.
    pub(crate) fn index_paths(&self) -> Vec<IndexPath> {
        self.sections
            .iter()
            .enumerate()
            .flat_map(|(section, slots)| {
                (0..slots.len()).map(move |item| IndexPath::new(section, item))
            })
            .collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.sections.iter().map(Vec::len).sum()
    }

    pub(crate) fn is_selected(&self, index_path: IndexPath) -> bool {
        self.selection.contains(&index_path)
    }

    pub(crate) fn item_width(&self) -> usize {
        self.config.item_width(self.bounds.width)
    }

    /// Adds `index_path` to the selection and expands its cell.
    ///
    /// With single selection, every other selected item is deselected and
    /// collapsed first, without notifying the delegate.
    pub(crate) fn select(&mut self, index_path: IndexPath) {
        if !self.allows_multiple_selection {
            let others: Vec<IndexPath> = self
                .selection
                .iter()
                .copied()
                .filter(|other| *other != index_path)
                .collect();
            for other in others {
                self.deselect(other);
            }
        }

        self.selection.insert(index_path);
        if let Some(cell) = self.expand_cell_mut(index_path) {
            cell.set_expanded(true);
        }
    }

    /// Removes `index_path` from the selection and collapses its cell.
    pub(crate) fn deselect(&mut self, index_path: IndexPath) {
        self.selection.remove(&index_path);
        if let Some(cell) = self.expand_cell_mut(index_path) {
            cell.set_expanded(false);
        }
    }

    /// Deselects everything without notifying the delegate.
    pub(crate) fn deselect_all(&mut self) -> Vec<IndexPath> {
        let selected: Vec<IndexPath> = self.selection.iter().copied().collect();
        for index_path in &selected {
            self.deselect(*index_path);
        }
        selected
    }

    /// Commits pending size changes: re-measures every expandable cell, then
    /// refreshes scrolling and visibility.
    pub(crate) fn perform_batch_updates(&mut self, completion: Option<Box<dyn FnOnce(bool)>>) {
        self.batch_updates += 1;
        for cell in self.expand_cells_mut() {
            cell.layout_if_needed();
        }
        self.clamp_scroll_offset();
        self.update_visible_items();
        log::trace!("batch update {} committed", self.batch_updates);

        if let Some(completion) = completion {
            completion(true);
        }
    }

    /// Drops every cached measurement and lays everything out again.
    pub(crate) fn invalidate_layout(&mut self) {
        self.layout_invalidations += 1;
        let width = self.item_width();
        for cell in self.expand_cells_mut() {
            cell.set_width(width);
        }
        self.clamp_scroll_offset();
        self.update_visible_items();
    }

    fn expand_cells_mut(&mut self) -> impl Iterator<Item = &mut ExpandCell> {
        self.sections
            .iter_mut()
            .flatten()
            .filter_map(|slot| slot.item.as_expand_cell_mut())
    }

    /// Item frames in content coordinates, and the total content height.
    pub(crate) fn frames(&self) -> (Vec<ItemFrame>, usize) {
        let content = self.config.content_inset;
        let section_inset = self.config.section_inset;

        let mut frames = Vec::with_capacity(self.len());
        let mut y = content.top;
        for (section, slots) in self.sections.iter().enumerate() {
            y += section_inset.top;
            for (item, slot) in slots.iter().enumerate() {
                if item > 0 {
                    y += self.config.line_spacing;
                }
                let height = slot.item.height();
                frames.push(ItemFrame {
                    index_path: IndexPath::new(section, item),
                    y,
                    height,
                });
                y += height;
            }
            y += section_inset.bottom;
        }
        (frames, y + content.bottom)
    }

    pub(crate) fn content_height(&self) -> usize {
        self.frames().1
    }

    pub(crate) fn max_scroll_offset(&self) -> usize {
        self.content_height().saturating_sub(self.bounds.height)
    }

    /// Keeps the scroll offset within the content after a size change.
    pub(crate) fn clamp_scroll_offset(&mut self) {
        let max = self.max_scroll_offset();
        if self.scroll_offset > max {
            self.scroll_offset = max;
            self.interceptor.did_scroll(max);
        }
    }

    /// Moves the viewport to `offset`, clamped to the content.
    pub(crate) fn scroll_to(&mut self, offset: usize) {
        let offset = offset.min(self.max_scroll_offset());
        if offset == self.scroll_offset {
            return;
        }
        self.scroll_offset = offset;
        self.interceptor.did_scroll(offset);
        self.update_visible_items();
    }

    /// Index paths whose frames intersect the viewport.
    pub(crate) fn visible_index_paths(&self) -> BTreeSet<IndexPath> {
        if self.bounds.height == 0 {
            return BTreeSet::new();
        }
        let top = self.scroll_offset;
        let bottom = top + self.bounds.height;
        self.frames()
            .0
            .into_iter()
            .filter(|frame| frame.y < bottom && frame.y + frame.height.max(1) > top)
            .map(|frame| frame.index_path)
            .collect()
    }

    /// Sends display notifications for items entering and leaving the viewport.
    pub(crate) fn update_visible_items(&mut self) {
        let visible = self.visible_index_paths();
        let interceptor = self.interceptor.clone();

        let gone: Vec<IndexPath> = self.displayed.difference(&visible).copied().collect();
        for index_path in gone {
            self.displayed.remove(&index_path);
            interceptor.did_end_displaying(index_path);
        }

        let width = self.item_width();
        let appearing: Vec<IndexPath> = visible.difference(&self.displayed).copied().collect();
        for index_path in appearing {
            self.displayed.insert(index_path);
            if let Some(slot) = self
                .sections
                .get_mut(index_path.section)
                .and_then(|section| section.get_mut(index_path.item))
            {
                interceptor.will_display(slot.item.as_mut(), index_path, width);
            }
        }
    }

    /// Gives every displayed cell the current item width, after the bounds
    /// changed width. Cells stay displayed, so the delegate is not notified.
    pub(crate) fn resize_displayed_cells(&mut self) {
        let width = self.item_width();
        let displayed: Vec<IndexPath> = self.displayed.iter().copied().collect();
        for index_path in displayed {
            if let Some(cell) = self.expand_cell_mut(index_path) {
                cell.set_width(width);
            }
        }
    }

    /// Clears rows, selection and display state, returning rows to the reuse pool.
    pub(crate) fn clear_items(&mut self) {
        let interceptor = self.interceptor.clone();
        for index_path in std::mem::take(&mut self.displayed) {
            interceptor.did_end_displaying(index_path);
        }
        self.selection.clear();
        for slot in self.sections.drain(..).flatten() {
            self.registry.recycle(slot.identifier, slot.item);
        }
    }
}

/// An expandable list: a virtualized, scrollable list of [`ExpandCell`]s in
/// which selecting an item expands it with an animated transition.
///
/// # Examples
///
/// ```rust
/// use bubbletea_expandable::cell::{ExpandCell, Region};
/// use bubbletea_expandable::expandable::{AnimationSpeed, IndexPath, ListConfig, Model};
///
/// let config = ListConfig::default().with_animation_speed(AnimationSpeed::Fast);
/// let mut list = Model::new(config, 40, 10);
/// list.register("row", || {
///     ExpandCell::new()
///         .with_primary(Region::with_content("Title"))
///         .with_secondary(Region::with_content("Details"))
/// });
/// let first = list.append_item(0, "row").unwrap();
///
/// // Selection goes through the animation queue.
/// let _cmd = list.tap(first);
/// assert!(!list.is_selected(first));
///
/// while let Some(msg) = list.animation_msg() {
///     list.deliver_animation(msg);
/// }
/// assert!(list.is_selected(first));
/// assert_eq!(list.cell_for_item(first).unwrap().height(), 2);
/// ```
pub struct Model {
    pub(super) state: ListState,
    pub(super) queue: Queue<ListState>,
    pub(super) data_source: Option<Box<dyn DataSource>>,
    pub(super) cursor: Option<IndexPath>,
    pub(super) focus: bool,
    /// Key bindings.
    pub keymap: ListKeyMap,
    /// Visual styles.
    pub styles: ListStyles,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("config", &self.state.config)
            .field("bounds", &self.state.bounds)
            .field("items", &self.state.len())
            .field("selection", &self.state.selection)
            .field("cursor", &self.cursor)
            .field("queue", &self.queue)
            .finish_non_exhaustive()
    }
}

impl Model {
    /// Creates an empty, focused list `width` columns by `height` rows.
    pub fn new(config: ListConfig, width: usize, height: usize) -> Self {
        Self {
            state: ListState::new(config, Size::new(width, height)),
            queue: Queue::new(),
            data_source: None,
            cursor: None,
            focus: true,
            keymap: ListKeyMap::default(),
            styles: ListStyles::default(),
        }
    }

    /// Replaces the animation queue's scheduler. Queued transitions are kept.
    pub fn with_scheduler<S: crate::animation::Scheduler + 'static>(mut self, scheduler: S) -> Self {
        self.queue.set_scheduler(scheduler);
        self
    }

    /// Sets the key bindings.
    pub fn with_keymap(mut self, keymap: ListKeyMap) -> Self {
        self.keymap = keymap;
        self
    }

    /// Sets the styles.
    pub fn with_styles(mut self, styles: ListStyles) -> Self {
        self.styles = styles;
        self
    }
}
