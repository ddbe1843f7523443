use super::model::Slot;
use super::*;
use crate::animation::{AnimationMsg, Scheduler};
use crate::cell::{CellHooks, ExpandCell, ListItem, Region, Regions};
use bubbletea_rs::{Cmd, KeyMsg, Model as BubbleTeaModel, Msg, WindowSizeMsg};
use crossterm::event::{KeyCode, KeyModifiers};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Event {
    WillDisplay(IndexPath, usize),
    EndDisplay(IndexPath),
    ShouldSelect(IndexPath),
    DidSelect(IndexPath),
    ShouldDeselect(IndexPath),
    DidDeselect(IndexPath),
    Highlight(IndexPath),
    Unhighlight(IndexPath),
    Scroll(usize),
}

#[derive(Default)]
struct Recorder {
    events: Mutex<Vec<Event>>,
    deny_select: AtomicBool,
}

impl Recorder {
    fn push(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }

    fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    fn clear(&self) {
        self.events.lock().unwrap().clear();
    }

    /// Only the selection related events.
    fn selection_events(&self) -> Vec<Event> {
        self.events()
            .into_iter()
            .filter(|event| {
                matches!(
                    event,
                    Event::ShouldSelect(_)
                        | Event::DidSelect(_)
                        | Event::ShouldDeselect(_)
                        | Event::DidDeselect(_)
                )
            })
            .collect()
    }

    fn did_selects(&self) -> Vec<IndexPath> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::DidSelect(ip) => Some(ip),
                _ => None,
            })
            .collect()
    }

    fn did_deselects(&self) -> Vec<IndexPath> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::DidDeselect(ip) => Some(ip),
                _ => None,
            })
            .collect()
    }
}

impl ListDelegate for Recorder {
    fn responds_to(&self, _notification: Notification) -> bool {
        true
    }

    fn will_display(&self, cell: &ExpandCell, index_path: IndexPath) {
        self.push(Event::WillDisplay(index_path, cell.width()));
    }

    fn did_end_displaying(&self, index_path: IndexPath) {
        self.push(Event::EndDisplay(index_path));
    }

    fn did_highlight(&self, index_path: IndexPath) {
        self.push(Event::Highlight(index_path));
    }

    fn did_unhighlight(&self, index_path: IndexPath) {
        self.push(Event::Unhighlight(index_path));
    }

    fn should_select(&self, index_path: IndexPath) -> bool {
        self.push(Event::ShouldSelect(index_path));
        !self.deny_select.load(Ordering::SeqCst)
    }

    fn did_select(&self, index_path: IndexPath) {
        self.push(Event::DidSelect(index_path));
    }

    fn should_deselect(&self, index_path: IndexPath) -> bool {
        self.push(Event::ShouldDeselect(index_path));
        true
    }

    fn did_deselect(&self, index_path: IndexPath) {
        self.push(Event::DidDeselect(index_path));
    }

    fn did_scroll(&self, offset: usize) {
        self.push(Event::Scroll(offset));
    }
}

struct OnlyDidSelect;

impl ListDelegate for OnlyDidSelect {
    fn responds_to(&self, notification: Notification) -> bool {
        notification == Notification::DidSelect
    }
}

struct Plain;

impl ListItem for Plain {
    fn render(&self) -> Vec<String> {
        vec!["plain".to_string()]
    }

    fn height(&self) -> usize {
        1
    }
}

struct HookLog(Arc<Mutex<Vec<&'static str>>>);

impl CellHooks for HookLog {
    fn on_expand(&mut self, _regions: &mut Regions) {
        self.0.lock().unwrap().push("expand");
    }

    fn on_collapse(&mut self, _regions: &mut Regions) {
        self.0.lock().unwrap().push("collapse");
    }

    fn on_will_apply_expanded(&mut self, _regions: &mut Regions) {
        self.0.lock().unwrap().push("will_apply_expanded");
    }

    fn on_will_apply_collapsed(&mut self, _regions: &mut Regions) {
        self.0.lock().unwrap().push("will_apply_collapsed");
    }
}

#[derive(Clone, Default)]
struct RecordingScheduler {
    durations: Arc<Mutex<Vec<Duration>>>,
}

impl Scheduler for RecordingScheduler {
    fn next_turn(&self, msg: AnimationMsg) -> Cmd {
        Box::pin(async move { Some(Box::new(msg) as Msg) })
    }

    fn after(&self, duration: Duration, msg: AnimationMsg) -> Cmd {
        self.durations.lock().unwrap().push(duration);
        Box::pin(async move { Some(Box::new(msg) as Msg) })
    }
}

/// Counts its items from a shared counter so tests can shrink the list.
struct Rows(Arc<AtomicUsize>);

impl DataSource for Rows {
    fn number_of_items(&self, _section: usize) -> usize {
        self.0.load(Ordering::SeqCst)
    }

    fn reuse_identifier(&self, _index_path: IndexPath) -> String {
        "row".to_string()
    }

    fn configure(&self, cell: &mut ExpandCell, index_path: IndexPath) {
        cell.regions_mut()
            .primary
            .set_content(format!("row {}", index_path.item));
        cell.layout_if_needed();
    }
}

fn row() -> ExpandCell {
    ExpandCell::new()
        .with_primary(Region::with_content("title"))
        .with_secondary(Region::with_content("details"))
}

fn list_with(items: usize, config: ListConfig, width: usize, height: usize) -> Model {
    let mut list = Model::new(config, width, height);
    list.register("row", row);
    for _ in 0..items {
        list.append_item(0, "row").unwrap();
    }
    list
}

fn delegated(items: usize, config: ListConfig) -> (Model, Arc<Recorder>) {
    let recorder = Arc::new(Recorder::default());
    let mut list = Model::new(config, 40, 20);
    list.set_delegate(&recorder);
    list.register("row", row);
    for _ in 0..items {
        list.append_item(0, "row").unwrap();
    }
    (list, recorder)
}

/// Runs every queued transition to completion, returning the number of steps.
fn drain(list: &mut Model) -> usize {
    let mut steps = 0;
    while let Some(msg) = list.animation_msg() {
        list.deliver_animation(msg);
        steps += 1;
    }
    steps
}

fn item(index: usize) -> IndexPath {
    IndexPath::item(index)
}

fn key(code: KeyCode) -> Msg {
    Box::new(KeyMsg {
        key: code,
        modifiers: KeyModifiers::NONE,
    }) as Msg
}

fn plain_view(list: &Model) -> Vec<String> {
    let view = list.view();
    let stripped = strip_ansi_escapes::strip(view.as_bytes());
    String::from_utf8(stripped)
        .unwrap()
        .lines()
        .map(|line| line.trim_end().to_string())
        .collect()
}

#[test]
fn test_cell_width_adopts_available_width() {
    let config = ListConfig::default().with_section_inset(EdgeInsets::new(0, 24, 0, 24));
    let list = list_with(1, config, 375, 100);
    assert_eq!(list.item_width(), 327);
    assert_eq!(list.cell_for_item(item(0)).unwrap().width(), 327);

    let config = config.with_content_inset(EdgeInsets::new(0, 2, 0, 3));
    let list = list_with(1, config, 375, 100);
    assert_eq!(list.cell_for_item(item(0)).unwrap().width(), 375 - 2 - 3 - 24 - 24);
}

#[test]
fn test_will_display_forwards_resized_cell() {
    let config = ListConfig::default().with_section_inset(EdgeInsets::symmetric(0, 2));
    let (_list, recorder) = delegated(2, config);
    let displays: Vec<Event> = recorder
        .events()
        .into_iter()
        .filter(|event| matches!(event, Event::WillDisplay(..)))
        .collect();
    assert_eq!(
        displays,
        vec![Event::WillDisplay(item(0), 36), Event::WillDisplay(item(1), 36)]
    );
}

#[test]
fn test_window_resize_readopts_width() {
    let config = ListConfig::default().with_section_inset(EdgeInsets::symmetric(0, 2));
    let mut list = list_with(2, config, 40, 10);
    list.update(Box::new(WindowSizeMsg {
        width: 60,
        height: 10,
    }) as Msg);
    assert_eq!(list.bounds(), Size::new(60, 10));
    assert_eq!(list.cell_for_item(item(0)).unwrap().width(), 56);
    assert_eq!(list.cell_for_item(item(1)).unwrap().width(), 56);
}

#[test]
fn test_resize_does_not_repeat_display_notifications() {
    let config = ListConfig::default().with_section_inset(EdgeInsets::symmetric(0, 2));
    let (mut list, recorder) = delegated(2, config);
    recorder.clear();

    list.update(Box::new(WindowSizeMsg {
        width: 60,
        height: 20,
    }) as Msg);
    assert_eq!(list.cell_for_item(item(0)).unwrap().width(), 56);
    assert_eq!(list.cell_for_item(item(1)).unwrap().width(), 56);
    assert!(recorder.events().is_empty());
}

#[test]
fn test_tap_defers_selection_to_transition() {
    let (mut list, recorder) = delegated(1, ListConfig::default());

    let cmd = list.tap(item(0));
    assert!(cmd.is_some());
    assert!(!list.is_selected(item(0)));
    assert!(recorder.selection_events().is_empty());
    assert!(list.is_animating());

    drain(&mut list);
    assert!(list.is_selected(item(0)));
    assert!(list.cell_for_item(item(0)).unwrap().is_expanded());
    assert_eq!(
        recorder.selection_events(),
        vec![Event::ShouldSelect(item(0)), Event::DidSelect(item(0))]
    );
    assert!(!list.is_animating());
}

#[test]
fn test_hooks_fire_at_decision_and_in_transition() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut list = Model::new(ListConfig::default(), 40, 10);
    let hooks = log.clone();
    list.register("row", move || {
        ExpandCell::with_hooks(HookLog(hooks.clone()))
            .with_primary(Region::with_content("title"))
            .with_secondary(Region::with_content("details"))
    });
    list.append_item(0, "row").unwrap();

    let _ = list.tap(item(0));
    assert_eq!(*log.lock().unwrap(), vec!["will_apply_expanded"]);

    drain(&mut list);
    assert_eq!(*log.lock().unwrap(), vec!["will_apply_expanded", "expand"]);
}

#[test]
fn test_end_to_end_multiple_selection() {
    let scheduler = RecordingScheduler::default();
    let durations = scheduler.durations.clone();
    let config = ListConfig::default().with_animation_speed(AnimationSpeed::None);
    let recorder = Arc::new(Recorder::default());
    let mut list = Model::new(config, 40, 20).with_scheduler(scheduler);
    list.set_delegate(&recorder);
    list.register("row", row);
    for _ in 0..3 {
        list.append_item(0, "row").unwrap();
    }
    list.set_allows_multiple_selection(true);

    assert!(list.tap(item(0)).is_some());
    assert!(list.tap(item(1)).is_none());
    assert!(list.tap(item(2)).is_none());
    assert_eq!(list.pending_animations(), 3);

    drain(&mut list);
    assert_eq!(list.selected_index_paths(), vec![item(0), item(1), item(2)]);
    assert_eq!(
        recorder.selection_events(),
        vec![
            Event::ShouldSelect(item(0)),
            Event::DidSelect(item(0)),
            Event::ShouldSelect(item(1)),
            Event::DidSelect(item(1)),
            Event::ShouldSelect(item(2)),
            Event::DidSelect(item(2)),
        ]
    );
    for index in 0..3 {
        assert_eq!(list.cell_for_item(item(index)).unwrap().height(), 2);
    }
    assert_eq!(*durations.lock().unwrap(), vec![Duration::from_millis(10); 3]);

    recorder.clear();
    let _ = list.tap(item(1));
    drain(&mut list);
    assert_eq!(list.selected_index_paths(), vec![item(0), item(2)]);
    assert_eq!(recorder.did_deselects(), vec![item(1)]);
    assert!(!list.cell_for_item(item(1)).unwrap().is_expanded());
}

#[test]
fn test_tap_select_select_deselect_scenario() {
    let config = ListConfig::default()
        .with_section_inset(EdgeInsets::symmetric(0, 4))
        .with_animation_speed(AnimationSpeed::None);
    let (mut list, recorder) = delegated(3, config);
    list.set_allows_multiple_selection(true);

    let _ = list.tap(item(0));
    drain(&mut list);
    let first = list.cell_for_item(item(0)).unwrap();
    assert!(list.is_selected(item(0)));
    assert!(first.is_expanded());
    assert_eq!(first.width(), 32);

    let _ = list.tap(item(1));
    drain(&mut list);
    assert_eq!(list.selected_index_paths(), vec![item(0), item(1)]);
    assert!(list.cell_for_item(item(1)).unwrap().is_expanded());

    let _ = list.tap(item(0));
    drain(&mut list);
    assert_eq!(list.selected_index_paths(), vec![item(1)]);
    assert!(!list.cell_for_item(item(0)).unwrap().is_expanded());
    assert!(list.cell_for_item(item(1)).unwrap().is_expanded());
    assert_eq!(recorder.did_deselects(), vec![item(0)]);
}

#[test]
fn test_rapid_taps_queue_without_coalescing() {
    let (mut list, recorder) = delegated(1, ListConfig::default());

    for _ in 0..3 {
        let _ = list.tap(item(0));
    }
    assert_eq!(list.pending_animations(), 3);

    drain(&mut list);
    assert!(list.is_selected(item(0)));
    assert_eq!(recorder.did_selects(), vec![item(0), item(0)]);
    assert_eq!(recorder.did_deselects(), vec![item(0)]);
    assert_eq!(
        recorder.selection_events(),
        vec![
            Event::ShouldSelect(item(0)),
            Event::DidSelect(item(0)),
            Event::ShouldDeselect(item(0)),
            Event::DidDeselect(item(0)),
            Event::ShouldSelect(item(0)),
            Event::DidSelect(item(0)),
        ]
    );
}

#[test]
fn test_swapping_scheduler_keeps_queued_transition() {
    let mut list = list_with(1, ListConfig::default(), 40, 10);
    let _ = list.tap(item(0));
    assert_eq!(list.pending_animations(), 1);

    let scheduler = RecordingScheduler::default();
    let durations = scheduler.durations.clone();
    let mut list = list.with_scheduler(scheduler);
    assert!(list.is_animating());

    drain(&mut list);
    assert!(list.is_selected(item(0)));
    assert!(list.cell_for_item(item(0)).unwrap().is_expanded());
    assert_eq!(
        *durations.lock().unwrap(),
        vec![list.config().animation_speed.duration()]
    );
}

#[test]
fn test_denied_select_releases_lane() {
    let (mut list, recorder) = delegated(2, ListConfig::default());
    recorder.deny_select.store(true, Ordering::SeqCst);

    let _ = list.tap(item(0));
    drain(&mut list);
    assert!(!list.is_selected(item(0)));
    assert!(!list.cell_for_item(item(0)).unwrap().is_expanded());
    assert!(recorder.did_selects().is_empty());
    assert!(!list.is_animating());

    recorder.deny_select.store(false, Ordering::SeqCst);
    let _ = list.tap(item(1));
    drain(&mut list);
    assert_eq!(list.selected_index_paths(), vec![item(1)]);
}

#[test]
fn test_single_selection_replaces_previous() {
    let (mut list, recorder) = delegated(2, ListConfig::default());

    let _ = list.tap(item(0));
    drain(&mut list);
    let _ = list.tap(item(1));
    drain(&mut list);

    assert_eq!(list.selected_index_paths(), vec![item(1)]);
    assert!(!list.cell_for_item(item(0)).unwrap().is_expanded());
    assert!(list.cell_for_item(item(1)).unwrap().is_expanded());
    assert_eq!(recorder.did_selects(), vec![item(0), item(1)]);
    assert!(recorder.did_deselects().is_empty());
}

#[test]
fn test_disabling_multiple_selection_is_one_batch_update() {
    let (mut list, recorder) = delegated(3, ListConfig::default());
    list.set_allows_multiple_selection(true);
    let _ = list.tap(item(0));
    let _ = list.tap(item(1));
    drain(&mut list);
    assert_eq!(list.selected_index_paths(), vec![item(0), item(1)]);

    let before = list.batch_update_count();
    list.set_allows_multiple_selection(false);
    assert_eq!(list.batch_update_count(), before + 1);
    assert!(list.selected_index_paths().is_empty());
    assert!(!list.cell_for_item(item(0)).unwrap().is_expanded());
    assert!(!list.cell_for_item(item(1)).unwrap().is_expanded());
    assert!(recorder.did_deselects().is_empty());

    // Turning it off again with nothing selected still commits one update.
    list.set_allows_multiple_selection(false);
    assert_eq!(list.batch_update_count(), before + 2);
}

#[test]
fn test_content_size_change_clears_selection() {
    let (mut list, recorder) = delegated(2, ListConfig::default());
    list.set_allows_multiple_selection(true);
    let _ = list.tap(item(0));
    let _ = list.tap(item(1));
    drain(&mut list);

    let cmd = list.update(Box::new(ContentSizeChangedMsg) as Msg);
    assert!(cmd.is_none());
    assert!(list.selected_index_paths().is_empty());
    assert_eq!(list.layout_invalidation_count(), 1);
    assert!(!list.cell_for_item(item(0)).unwrap().is_expanded());
    assert!(recorder.did_deselects().is_empty());
}

#[test]
#[should_panic(expected = "ExpandCell")]
fn test_registering_plain_rows_panics() {
    let mut list = Model::new(ListConfig::default(), 40, 10);
    list.register_item("plain", || Box::new(Plain) as Box<dyn ListItem>);
}

#[test]
fn test_plain_row_falls_back_to_immediate_selection() {
    let (mut list, recorder) = delegated(0, ListConfig::default());
    list.state.sections.push(vec![Slot {
        identifier: "plain".to_string(),
        item: Box::new(Plain),
    }]);

    let cmd = list.tap(item(0));
    assert!(cmd.is_none());
    assert!(list.is_selected(item(0)));
    assert_eq!(recorder.did_selects(), vec![item(0)]);
    assert!(!list.is_animating());
}

#[test]
fn test_plain_row_entering_view_skips_width_adoption() {
    let (mut list, recorder) = delegated(0, ListConfig::default());
    let built = AtomicBool::new(false);
    // The registration check gets an ExpandCell, every later row is plain.
    list.register_item("mixed", move || {
        let next: Box<dyn ListItem> = if built.swap(true, Ordering::SeqCst) {
            Box::new(Plain)
        } else {
            Box::new(row())
        };
        next
    });

    assert_eq!(list.append_item(0, "mixed"), Some(item(0)));
    assert_eq!(list.append_item(0, "row"), Some(item(1)));

    assert_eq!(list.visible_index_paths(), vec![item(0), item(1)]);
    assert!(list.cell_for_item(item(0)).is_none());
    assert_eq!(recorder.events(), vec![Event::WillDisplay(item(1), 40)]);
    assert_eq!(plain_view(&list), vec!["plain", "title"]);
}

#[test]
fn test_dropped_delegate_is_treated_as_absent() {
    let recorder = Arc::new(Recorder::default());
    let mut list = list_with(1, ListConfig::default(), 40, 10);
    list.set_delegate(&recorder);
    assert!(list.has_delegate());

    drop(recorder);
    assert!(!list.has_delegate());

    let _ = list.tap(item(0));
    drain(&mut list);
    assert!(list.is_selected(item(0)));
}

#[test]
fn test_delegate_replaced_while_transition_waits() {
    let first = Arc::new(Recorder::default());
    let second = Arc::new(Recorder::default());
    let mut list = list_with(1, ListConfig::default(), 40, 10);
    list.set_delegate(&first);

    let _ = list.tap(item(0));
    list.set_delegate(&second);
    drain(&mut list);

    assert!(first.selection_events().is_empty());
    assert_eq!(second.did_selects(), vec![item(0)]);
}

#[test]
fn test_capability_probing() {
    let mut list = list_with(0, ListConfig::default(), 40, 10);
    assert!(list.delegate_responds_to(Notification::WillDisplay));
    assert!(list.delegate_responds_to(Notification::ShouldSelect));
    assert!(list.delegate_responds_to(Notification::ShouldDeselect));
    assert!(!list.delegate_responds_to(Notification::DidSelect));

    assert!(!list.interceptor().has_external_delegate());
    let delegate = Arc::new(OnlyDidSelect);
    list.set_delegate(&delegate);
    assert!(list.delegate_responds_to(Notification::DidSelect));
    assert!(list.interceptor().has_external_delegate());
    assert!(list.interceptor().responds_to(Notification::WillDisplay));
    assert!(list.interceptor().external().is_some());
    assert!(!list.delegate_responds_to(Notification::DidScroll));

    list.clear_delegate();
    assert!(!list.delegate_responds_to(Notification::DidSelect));
}

#[test]
fn test_should_deselect_refused_without_multiple_selection() {
    let (mut list, _recorder) = delegated(1, ListConfig::default());
    list.select_item(item(0));
    let decision = list.state.interceptor.clone().should_deselect(
        &mut list.state,
        &mut list.queue,
        item(0),
    );
    assert!(!decision.allow);
    assert!(decision.cmd.is_none());
    assert_eq!(list.pending_animations(), 0);
}

#[test]
fn test_scrolling_updates_displayed_items() {
    let recorder = Arc::new(Recorder::default());
    let mut list = Model::new(ListConfig::default(), 20, 3);
    list.set_delegate(&recorder);
    list.register("row", row);
    for _ in 0..5 {
        list.append_item(0, "row").unwrap();
    }
    assert_eq!(list.visible_index_paths(), vec![item(0), item(1), item(2)]);

    recorder.clear();
    list.scroll_to(10);
    assert_eq!(list.scroll_offset(), 2);
    assert_eq!(list.visible_index_paths(), vec![item(2), item(3), item(4)]);
    assert_eq!(
        recorder.events(),
        vec![
            Event::Scroll(2),
            Event::EndDisplay(item(0)),
            Event::EndDisplay(item(1)),
            Event::WillDisplay(item(3), 20),
            Event::WillDisplay(item(4), 20),
        ]
    );
}

#[test]
fn test_expansion_pushes_items_out_of_view() {
    let (mut list, recorder) = delegated(0, ListConfig::default());
    list.set_bounds(Size::new(40, 3));
    for _ in 0..3 {
        list.append_item(0, "row").unwrap();
    }
    recorder.clear();

    list.select_item(item(0));
    assert_eq!(list.content_height(), 4);
    assert_eq!(list.visible_index_paths(), vec![item(0), item(1)]);
    assert_eq!(recorder.events(), vec![Event::EndDisplay(item(2))]);
}

#[test]
fn test_insets_and_spacing_shape_content() {
    let config = ListConfig::new(EdgeInsets::new(1, 0, 1, 0), EdgeInsets::new(2, 0, 2, 0), 1);
    let list = list_with(3, config, 40, 50);
    // 1 + 2 + (1 + 1 + 1 + 1 + 1) + 2 + 1
    assert_eq!(list.content_height(), 11);
}

#[test]
fn test_keys_move_cursor_and_toggle() {
    let (mut list, recorder) = delegated(3, ListConfig::default());
    assert_eq!(list.cursor(), Some(item(0)));

    assert!(list.update(key(KeyCode::Down)).is_none());
    assert_eq!(list.cursor(), Some(item(1)));
    assert!(recorder.events().contains(&Event::Unhighlight(item(0))));
    assert!(recorder.events().contains(&Event::Highlight(item(1))));

    assert!(list.update(key(KeyCode::Enter)).is_some());
    drain(&mut list);
    assert_eq!(list.selected_index_paths(), vec![item(1)]);

    list.update(key(KeyCode::End));
    assert_eq!(list.cursor(), Some(item(2)));
    list.update(key(KeyCode::Char('g')));
    assert_eq!(list.cursor(), Some(item(0)));
    list.update(key(KeyCode::Up));
    assert_eq!(list.cursor(), Some(item(0)));
}

#[test]
fn test_blurred_list_ignores_keys() {
    use crate::Component;
    let mut list = list_with(2, ListConfig::default(), 40, 10);
    list.blur();
    assert!(!list.focused());
    assert!(list.update(key(KeyCode::Enter)).is_none());
    assert!(list.update(key(KeyCode::Down)).is_none());
    assert_eq!(list.cursor(), Some(item(0)));
    assert_eq!(list.pending_animations(), 0);
}

#[test]
fn test_view_renders_viewport() {
    let config = ListConfig::default().with_section_inset(EdgeInsets::symmetric(0, 2));
    let mut list = list_with(2, config, 20, 5);
    assert_eq!(plain_view(&list), vec!["│ title", "  title"]);

    list.select_item(item(1));
    assert_eq!(plain_view(&list), vec!["│ title", "┃ title", "┃ details"]);
}

#[test]
fn test_view_renders_scrolled_viewport() {
    let config = ListConfig::default().with_section_inset(EdgeInsets::symmetric(0, 2));
    let mut list = list_with(4, config, 20, 2);
    list.scroll_to(2);
    assert_eq!(plain_view(&list), vec!["  title", "  title"]);

    // Item 3 expands past the bottom edge and is clipped.
    list.select_item(item(3));
    assert_eq!(list.scroll_offset(), 2);
    assert_eq!(plain_view(&list), vec!["  title", "┃ title"]);
}

#[test]
fn test_view_empty_list() {
    let list = list_with(0, ListConfig::default(), 20, 5);
    assert!(plain_view(&list).join("\n").contains("No items."));
}

#[test]
fn test_reload_data_rebuilds_rows() {
    let count = Arc::new(AtomicUsize::new(3));
    let mut list = Model::new(ListConfig::default(), 40, 10);
    list.register("row", row);
    list.set_data_source(Rows(count.clone()));
    assert_eq!(list.len(), 3);
    assert_eq!(
        list.cell_for_item(item(2)).unwrap().regions().primary.lines().to_vec(),
        vec!["row 2".to_string()]
    );

    list.select_item(item(0));
    list.reload_data();
    assert!(list.selected_index_paths().is_empty());
    assert!(!list.cell_for_item(item(0)).unwrap().is_expanded());
}

#[test]
fn test_transition_for_removed_item_resolves() {
    let count = Arc::new(AtomicUsize::new(3));
    let mut list = Model::new(ListConfig::default(), 40, 10);
    list.register("row", row);
    list.set_data_source(Rows(count.clone()));

    let _ = list.tap(item(2));
    count.store(1, Ordering::SeqCst);
    list.reload_data();
    drain(&mut list);

    assert!(list.selected_index_paths().is_empty());
    assert!(!list.is_animating());
}

#[test]
#[should_panic(expected = "no cell registered")]
fn test_unregistered_identifier_in_data_source_panics() {
    let mut list = Model::new(ListConfig::default(), 40, 10);
    list.set_data_source(Rows(Arc::new(AtomicUsize::new(1))));
}

#[test]
fn test_append_unknown_identifier() {
    let mut list = Model::new(ListConfig::default(), 40, 10);
    assert!(list.append_item(0, "missing").is_none());
    assert!(list.is_empty());
}

#[test]
fn test_batch_updates_run_completion() {
    let mut list = list_with(1, ListConfig::default(), 40, 10);
    let done = Arc::new(AtomicBool::new(false));
    let flag = done.clone();
    let before = list.batch_update_count();

    list.perform_batch_updates(
        |list| {
            list.cell_for_item_mut(item(0))
                .unwrap()
                .regions_mut()
                .primary
                .push_line("second line");
        },
        move |finished| flag.store(finished, Ordering::SeqCst),
    );

    assert!(done.load(Ordering::SeqCst));
    assert_eq!(list.batch_update_count(), before + 1);
    assert_eq!(list.cell_for_item(item(0)).unwrap().height(), 2);
}

#[tokio::test]
async fn test_commands_drive_transition() {
    let config = ListConfig::default().with_animation_speed(AnimationSpeed::None);
    let mut list = list_with(1, config, 40, 10);

    let run = list.tap(item(0)).expect("idle lane starts");
    let msg = run.await.expect("run message");
    let settle = list.update(msg).expect("transition holds the lane");
    assert!(list.is_selected(item(0)));
    assert!(list.is_animating());

    let msg = settle.await.expect("settle message");
    assert!(list.update(msg).is_none());
    assert!(!list.is_animating());
}
