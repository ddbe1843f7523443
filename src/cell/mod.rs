//! Expandable list cells.
//!
//! An [`ExpandCell`] has two regions: a primary region that is always laid out,
//! and a secondary region that only participates in layout while the cell is
//! expanded. Which region anchors the bottom edge of the cell is decided by a
//! two-state [`Layout`]; there is never a moment where both layouts apply.
//!
//! Cells are composed rather than subclassed. Content lives in [`Regions`],
//! and custom behaviour plugs in through the [`CellHooks`] strategy:
//!
//! ```rust
//! use bubbletea_expandable::cell::{CellHooks, ExpandCell, Regions};
//!
//! struct Chevron;
//!
//! impl CellHooks for Chevron {
//!     fn on_will_apply_expanded(&mut self, regions: &mut Regions) {
//!         regions.primary.set_content("▾ Details");
//!     }
//!
//!     fn on_will_apply_collapsed(&mut self, regions: &mut Regions) {
//!         regions.primary.set_content("▸ Details");
//!     }
//! }
//!
//! let mut cell = ExpandCell::with_hooks(Chevron);
//! cell.regions_mut().primary.set_content("▸ Details");
//! cell.regions_mut().secondary.set_content("More text");
//! cell.set_width(20);
//!
//! assert!(!cell.is_expanded());
//! assert_eq!(cell.height(), 1);
//!
//! cell.set_expanded(true);
//! assert_eq!(cell.height(), 2);
//! ```

mod region;

#[cfg(test)]
mod tests;

pub use region::{Region, ELLIPSIS};

/// Generic capability interface for anything the list can host as a row.
///
/// The list stores rows as `Box<dyn ListItem>`. Only [`ExpandCell`] narrows
/// to the expandable capability; any other implementation is treated as a
/// plain row and gets default behaviour from the list.
pub trait ListItem: Send {
    /// Rendered lines at the item's current width.
    fn render(&self) -> Vec<String>;

    /// Number of terminal rows the item occupies.
    fn height(&self) -> usize;

    /// Resets transient state before the item is handed out again by the reuse pool.
    fn prepare_for_reuse(&mut self) {}

    /// Narrows to an expandable cell.
    fn as_expand_cell(&self) -> Option<&ExpandCell> {
        None
    }

    /// Narrows to a mutable expandable cell.
    fn as_expand_cell_mut(&mut self) -> Option<&mut ExpandCell> {
        None
    }
}

/// The two layout states of an expandable cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// Only the primary region is laid out.
    #[default]
    Collapsed,
    /// The secondary region is laid out below the primary region.
    Expanded,
}

impl Layout {
    /// The region whose bottom edge is pinned to the bottom of the cell.
    pub fn bottom_anchor(self) -> Anchor {
        match self {
            Layout::Collapsed => Anchor::Primary,
            Layout::Expanded => Anchor::Secondary,
        }
    }

    /// Returns true for [`Layout::Expanded`].
    pub fn is_expanded(self) -> bool {
        self == Layout::Expanded
    }
}

/// A region of the cell used as a layout anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// The always-visible region.
    Primary,
    /// The region revealed on expansion.
    Secondary,
}

/// Content of an expandable cell.
#[derive(Debug, Clone, Default)]
pub struct Regions {
    /// Always visible, regardless of the cell's layout.
    pub primary: Region,
    /// Visible only while the cell is expanded.
    pub secondary: Region,
}

/// Lifecycle callbacks of an expandable cell.
///
/// All methods default to no-ops. `on_expand` and `on_collapse` run when the
/// layout flips, before the layout pass, inside the list's animation block.
/// The `on_will_apply_*` pair runs earlier, when the list decides to expand or
/// collapse, so content can snap to its final appearance without animating.
pub trait CellHooks: Send {
    /// The cell is about to lay out its expanded state.
    fn on_expand(&mut self, _regions: &mut Regions) {}

    /// The cell is about to lay out its collapsed state.
    fn on_collapse(&mut self, _regions: &mut Regions) {}

    /// The list decided to expand this cell; the animation has not started yet.
    fn on_will_apply_expanded(&mut self, _regions: &mut Regions) {}

    /// The list decided to collapse this cell; the animation has not started yet.
    fn on_will_apply_collapsed(&mut self, _regions: &mut Regions) {}
}

/// Hooks that do nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHooks;

impl CellHooks for NoHooks {}

/// A list cell that toggles between a collapsed and an expanded layout.
///
/// A new cell is collapsed with a width of zero; the hosting list assigns the
/// width every time the cell is about to be displayed.
pub struct ExpandCell {
    regions: Regions,
    layout: Layout,
    width: usize,
    height: usize,
    layout_passes: usize,
    hooks: Box<dyn CellHooks>,
}

impl std::fmt::Debug for ExpandCell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpandCell")
            .field("regions", &self.regions)
            .field("layout", &self.layout)
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl Default for ExpandCell {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpandCell {
    /// Creates a collapsed cell without hooks.
    pub fn new() -> Self {
        Self::with_hooks(NoHooks)
    }

    /// Creates a collapsed cell driven by `hooks`.
    pub fn with_hooks<H: CellHooks + 'static>(hooks: H) -> Self {
        let mut cell = Self {
            regions: Regions::default(),
            layout: Layout::Collapsed,
            width: 0,
            height: 0,
            layout_passes: 0,
            hooks: Box::new(hooks),
        };
        cell.layout_if_needed();
        cell
    }

    /// Sets the primary region.
    pub fn with_primary(mut self, region: Region) -> Self {
        self.regions.primary = region;
        self.layout_if_needed();
        self
    }

    /// Sets the secondary region.
    pub fn with_secondary(mut self, region: Region) -> Self {
        self.regions.secondary = region;
        self.layout_if_needed();
        self
    }

    /// Replaces the hooks.
    pub fn set_hooks<H: CellHooks + 'static>(&mut self, hooks: H) {
        self.hooks = Box::new(hooks);
    }

    /// Both regions.
    pub fn regions(&self) -> &Regions {
        &self.regions
    }

    /// Mutable access to the regions. Call [`ExpandCell::layout_if_needed`]
    /// afterwards if the height should be re-measured right away.
    pub fn regions_mut(&mut self) -> &mut Regions {
        &mut self.regions
    }

    /// Current layout state.
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Returns true while the secondary region is laid out.
    pub fn is_expanded(&self) -> bool {
        self.layout.is_expanded()
    }

    /// The region currently pinned to the bottom edge.
    pub fn bottom_anchor(&self) -> Anchor {
        self.layout.bottom_anchor()
    }

    /// Width in terminal columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Measured height of the current layout, in terminal rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of layout passes performed since construction.
    pub fn layout_passes(&self) -> usize {
        self.layout_passes
    }

    /// Sets the cell width, then re-applies the current layout.
    ///
    /// No clamping is done: a width narrower than the content truncates it.
    pub fn set_width(&mut self, width: usize) {
        self.width = width;
        self.layout_if_needed();
    }

    /// Switches the layout to match `expanded`.
    ///
    /// Returns true if the layout changed. On a change exactly one of
    /// [`CellHooks::on_expand`] / [`CellHooks::on_collapse`] runs before the
    /// layout pass.
    pub fn set_expanded(&mut self, expanded: bool) -> bool {
        let target = if expanded {
            Layout::Expanded
        } else {
            Layout::Collapsed
        };
        if target == self.layout {
            return false;
        }

        self.layout = target;
        match target {
            Layout::Expanded => self.hooks.on_expand(&mut self.regions),
            Layout::Collapsed => self.hooks.on_collapse(&mut self.regions),
        }
        self.layout_if_needed();
        true
    }

    /// Runs the immediate-appearance hook for `target` without changing the layout.
    pub fn will_apply(&mut self, target: Layout) {
        match target {
            Layout::Expanded => self.hooks.on_will_apply_expanded(&mut self.regions),
            Layout::Collapsed => self.hooks.on_will_apply_collapsed(&mut self.regions),
        }
    }

    /// Re-measures the cell for its current layout.
    pub fn layout_if_needed(&mut self) {
        self.height = match self.layout.bottom_anchor() {
            Anchor::Primary => self.regions.primary.height(),
            Anchor::Secondary => self.regions.primary.height() + self.regions.secondary.height(),
        };
        self.layout_passes += 1;
    }
}

impl ListItem for ExpandCell {
    fn render(&self) -> Vec<String> {
        let mut lines = self.regions.primary.render(self.width);
        if self.layout.is_expanded() {
            lines.extend(self.regions.secondary.render(self.width));
        }
        lines
    }

    fn height(&self) -> usize {
        ExpandCell::height(self)
    }

    fn prepare_for_reuse(&mut self) {
        self.layout = Layout::Collapsed;
        self.layout_if_needed();
    }

    fn as_expand_cell(&self) -> Option<&ExpandCell> {
        Some(self)
    }

    fn as_expand_cell_mut(&mut self) -> Option<&mut ExpandCell> {
        Some(self)
    }
}
