//! Tests for the expandable cell.

use super::*;
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
struct HookLog(Arc<Mutex<Vec<&'static str>>>);

impl HookLog {
    fn take(&self) -> Vec<&'static str> {
        std::mem::take(&mut *self.0.lock().unwrap())
    }
}

impl CellHooks for HookLog {
    fn on_expand(&mut self, regions: &mut Regions) {
        // Content mutated here must be measured by the following layout pass.
        regions.secondary.push_line("added on expand");
        self.0.lock().unwrap().push("expand");
    }

    fn on_collapse(&mut self, _regions: &mut Regions) {
        self.0.lock().unwrap().push("collapse");
    }

    fn on_will_apply_expanded(&mut self, _regions: &mut Regions) {
        self.0.lock().unwrap().push("will_expand");
    }

    fn on_will_apply_collapsed(&mut self, _regions: &mut Regions) {
        self.0.lock().unwrap().push("will_collapse");
    }
}

fn sample_cell() -> ExpandCell {
    ExpandCell::new()
        .with_primary(Region::with_content("Title"))
        .with_secondary(Region::with_content("Line one\nLine two"))
}

fn assert_anchor_matches(cell: &ExpandCell) {
    let expected = if cell.is_expanded() {
        Anchor::Secondary
    } else {
        Anchor::Primary
    };
    assert_eq!(cell.bottom_anchor(), expected);
}

#[test]
fn test_new_cell_is_collapsed_with_zero_width() {
    let cell = ExpandCell::new();
    assert!(!cell.is_expanded());
    assert_eq!(cell.layout(), Layout::Collapsed);
    assert_eq!(cell.width(), 0);
    assert_eq!(cell.bottom_anchor(), Anchor::Primary);
}

#[test]
fn test_collapsed_height_only_counts_primary() {
    let cell = sample_cell();
    assert_eq!(cell.height(), 1);
    assert_eq!(ListItem::height(&cell), 1);
}

#[test]
fn test_expand_adds_secondary_height() {
    let mut cell = sample_cell();
    assert!(cell.set_expanded(true));
    assert_eq!(cell.height(), 3);
    assert!(cell.set_expanded(false));
    assert_eq!(cell.height(), 1);
}

#[test]
fn test_anchor_always_matches_expansion() {
    let mut cell = sample_cell();
    for expanded in [true, true, false, true, false, false] {
        cell.set_expanded(expanded);
        assert_anchor_matches(&cell);
        cell.set_width(12);
        assert_anchor_matches(&cell);
    }
}

#[test]
fn test_exactly_one_hook_per_transition() {
    let log = HookLog::default();
    let mut cell = ExpandCell::with_hooks(log.clone());

    assert!(cell.set_expanded(true));
    assert_eq!(log.take(), vec!["expand"]);

    // No transition, no hook.
    assert!(!cell.set_expanded(true));
    assert!(log.take().is_empty());

    assert!(cell.set_expanded(false));
    assert_eq!(log.take(), vec!["collapse"]);
}

#[test]
fn test_hook_runs_before_layout_pass() {
    let log = HookLog::default();
    let mut cell = ExpandCell::with_hooks(log).with_primary(Region::with_content("Title"));
    cell.set_expanded(true);
    // The line pushed by on_expand is already part of the measured height.
    assert_eq!(cell.height(), 2);
}

#[test]
fn test_will_apply_does_not_change_layout() {
    let log = HookLog::default();
    let mut cell = ExpandCell::with_hooks(log.clone());
    cell.will_apply(Layout::Expanded);
    cell.will_apply(Layout::Collapsed);
    assert_eq!(log.take(), vec!["will_expand", "will_collapse"]);
    assert!(!cell.is_expanded());
}

#[test]
fn test_set_width_reapplies_layout_without_hooks() {
    let log = HookLog::default();
    let mut cell = ExpandCell::with_hooks(log.clone());
    cell.set_expanded(true);
    log.take();

    let passes = cell.layout_passes();
    cell.set_width(327);
    assert_eq!(cell.width(), 327);
    assert_eq!(cell.layout_passes(), passes + 1);
    assert!(cell.is_expanded());
    assert!(log.take().is_empty());
}

#[test]
fn test_render_fits_lines_to_width() {
    let mut cell = sample_cell();
    cell.set_width(6);

    let plain = |lines: Vec<String>| -> Vec<String> {
        lines
            .into_iter()
            .map(|l| String::from_utf8_lossy(&strip_ansi_escapes::strip(l)).trim_end().to_string())
            .collect()
    };

    assert_eq!(plain(cell.render()), vec!["Title"]);
    cell.set_expanded(true);
    assert_eq!(plain(cell.render()), vec!["Title", "Line …", "Line …"]);
}

#[test]
fn test_prepare_for_reuse_collapses() {
    let log = HookLog::default();
    let mut cell = ExpandCell::with_hooks(log.clone());
    cell.set_expanded(true);
    log.take();

    cell.prepare_for_reuse();
    assert!(!cell.is_expanded());
    assert_anchor_matches(&cell);
    assert!(log.take().is_empty());
}

#[test]
fn test_narrowing_to_expand_cell() {
    let mut boxed: Box<dyn ListItem> = Box::new(sample_cell());
    assert!(boxed.as_expand_cell().is_some());
    boxed
        .as_expand_cell_mut()
        .map(|cell| cell.set_expanded(true));
    assert_eq!(boxed.height(), 3);
}
