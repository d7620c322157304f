//! Tests for the paging mediator.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Weak};

use lattice_paging_core::SharedTaskQueue;
use parking_lot::Mutex;

use super::*;
use crate::model::{Color, HorizontalAlignment};

/// A widget that records what the mediator does to it.
#[derive(Default)]
struct RecordingWidget {
    reloads: AtomicUsize,
    provider: Mutex<Option<Weak<dyn ContentProvider>>>,
    observer: Mutex<Option<Weak<dyn EventObserver>>>,
    refresh_control: Mutex<Option<Arc<RefreshControl>>>,
}

impl RecordingWidget {
    fn reloads(&self) -> usize {
        self.reloads.load(Ordering::SeqCst)
    }
}

impl ListWidget for RecordingWidget {
    fn reload_data(&self) {
        self.reloads.fetch_add(1, Ordering::SeqCst);
    }

    fn default_row_height(&self) -> f32 {
        44.0
    }

    fn set_content_provider(&self, provider: Weak<dyn ContentProvider>) {
        *self.provider.lock() = Some(provider);
    }

    fn set_event_observer(&self, observer: Weak<dyn EventObserver>) {
        *self.observer.lock() = Some(observer);
    }

    fn attach_refresh_control(&self, control: Arc<RefreshControl>) {
        *self.refresh_control.lock() = Some(control);
    }
}

/// A screen that records every call it receives.
struct RecordingScreen {
    sections: Option<usize>,
    answer: AtomicBool,
    custom_height: Option<f32>,
    load_calls: Mutex<Vec<bool>>,
    structural_calls: AtomicUsize,
    height_calls: AtomicUsize,
    scrolls: AtomicUsize,
    selected: Mutex<Vec<IndexPath>>,
    displayed: AtomicUsize,
}

impl RecordingScreen {
    fn new(sections: Option<usize>, answer: bool) -> Arc<Self> {
        Arc::new(Self {
            sections,
            answer: AtomicBool::new(answer),
            custom_height: None,
            load_calls: Mutex::new(Vec::new()),
            structural_calls: AtomicUsize::new(0),
            height_calls: AtomicUsize::new(0),
            scrolls: AtomicUsize::new(0),
            selected: Mutex::new(Vec::new()),
            displayed: AtomicUsize::new(0),
        })
    }

    fn load_calls(&self) -> Vec<bool> {
        self.load_calls.lock().clone()
    }
}

impl ContentProvider for RecordingScreen {
    fn section_count(&self) -> Option<usize> {
        self.sections
    }

    fn row_count(&self, section: usize) -> usize {
        self.structural_calls.fetch_add(1, Ordering::SeqCst);
        section + 5
    }

    fn cell(&self, index: &IndexPath) -> Cell {
        self.structural_calls.fetch_add(1, Ordering::SeqCst);
        Cell::new(format!("Item {index}"))
    }

    fn section_title(&self, section: usize) -> Option<String> {
        Some(format!("Section {section}"))
    }

    fn responds_to(&self, selector: Selector) -> bool {
        selector.is_required() || matches!(selector, Selector::SectionCount | Selector::SectionTitle)
    }
}

impl EventObserver for RecordingScreen {
    fn row_height(&self, _index: &IndexPath) -> Option<f32> {
        self.height_calls.fetch_add(1, Ordering::SeqCst);
        self.custom_height
    }

    fn load_more(&self, more: bool) -> bool {
        self.load_calls.lock().push(more);
        self.answer.load(Ordering::SeqCst)
    }

    fn did_scroll(&self, _geometry: &ScrollGeometry) {
        self.scrolls.fetch_add(1, Ordering::SeqCst);
    }

    fn did_select_row(&self, index: &IndexPath) {
        self.selected.lock().push(*index);
    }

    fn will_display_cell(&self, _cell: &Cell, _index: &IndexPath) {
        self.displayed.fetch_add(1, Ordering::SeqCst);
    }

    fn responds_to(&self, selector: Selector) -> bool {
        matches!(
            selector,
            Selector::RowHeight
                | Selector::LoadMore
                | Selector::DidScroll
                | Selector::DidSelectRow
                | Selector::WillDisplayCell
        )
    }
}

fn setup(
    sections: Option<usize>,
    answer: bool,
) -> (Arc<RecordingWidget>, Arc<RecordingScreen>, Arc<PagingMediator>) {
    let widget = Arc::new(RecordingWidget::default());
    let screen = RecordingScreen::new(sections, answer);
    let mediator = PagingMediator::new(&widget);
    mediator.register(&screen, &screen);
    (widget, screen, mediator)
}

fn at_end() -> ScrollGeometry {
    ScrollGeometry::new(200.0, 500.0, 300.0)
}

// =============================================================================
// Binding
// =============================================================================

#[test]
fn test_bind_installs_mediator_and_refresh_control() {
    let (widget, _screen, mediator) = setup(Some(1), true);

    let provider = widget.provider.lock().as_ref().and_then(Weak::upgrade);
    let observer = widget.observer.lock().as_ref().and_then(Weak::upgrade);
    assert!(provider.is_some_and(|p| p.responds_to(Selector::SectionCount)));
    assert!(observer.is_some_and(|o| o.responds_to(Selector::RowHeight)));

    let control = widget.refresh_control.lock().clone();
    assert!(control.is_some_and(|c| Arc::ptr_eq(&c, mediator.refresh_control())));
}

#[test]
fn test_dropping_mediator_releases_widget_slots() {
    let (widget, _screen, mediator) = setup(Some(1), true);
    let control = mediator.refresh_control().clone();
    drop(mediator);

    assert!(widget.provider.lock().as_ref().and_then(Weak::upgrade).is_none());
    // The gesture slot holds the mediator weakly and does nothing now.
    assert!(control.trigger());
}

// =============================================================================
// Synthetic section
// =============================================================================

#[test]
fn test_section_count_adds_synthetic_section() {
    for n in 0..5 {
        let (_widget, _screen, mediator) = setup(Some(n), true);
        assert_eq!(mediator.section_count(), Some(n + 1));
        assert_eq!(mediator.loading_indicator_section_index(), Some(n));
    }
}

#[test]
fn test_two_real_sections() {
    let (_widget, screen, mediator) = setup(Some(2), true);
    assert_eq!(mediator.section_count(), Some(3));
    assert_eq!(mediator.loading_indicator_section_index(), Some(2));
    assert_eq!(mediator.row_count(2), 1);
    assert_eq!(screen.structural_calls.load(Ordering::SeqCst), 0);

    assert_eq!(mediator.row_count(1), 6);
    assert_eq!(screen.structural_calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_unreported_section_count_means_one() {
    let (_widget, _screen, mediator) = setup(None, true);
    assert_eq!(mediator.section_count(), Some(2));
    assert_eq!(mediator.loading_indicator_section_index(), Some(1));
}

#[test]
fn test_no_synthetic_index_before_first_count() {
    let (_widget, _screen, mediator) = setup(Some(2), true);
    assert_eq!(mediator.loading_indicator_section_index(), None);
}

#[test]
fn test_synthetic_queries_never_reach_screen() {
    let (_widget, screen, mediator) = setup(Some(1), true);
    mediator.section_count();
    let loading_row = IndexPath::new(1, 0);

    mediator.row_count(1);
    let cell = mediator.cell(&loading_row);
    mediator.row_height(&loading_row);
    mediator.did_select_row(&loading_row);
    mediator.will_display_cell(&cell, &loading_row);
    assert_eq!(mediator.section_title(1), None);

    assert_eq!(screen.structural_calls.load(Ordering::SeqCst), 0);
    assert_eq!(screen.height_calls.load(Ordering::SeqCst), 0);
    assert!(screen.selected.lock().is_empty());
    assert_eq!(screen.displayed.load(Ordering::SeqCst), 0);
}

#[test]
fn test_loading_cell() {
    let (_widget, _screen, mediator) = setup(Some(1), true);
    mediator.section_count();
    let cell = mediator.cell(&IndexPath::new(1, 0));
    assert_eq!(cell.text, "Loading...");
    assert_eq!(cell.alignment, HorizontalAlignment::Center);
    assert_eq!(cell.text_color, Color::RED);
    assert!(!cell.selectable);
}

#[test]
fn test_loading_cell_uses_config() {
    let widget = Arc::new(RecordingWidget::default());
    let config = MediatorConfig::default()
        .with_indicator_text("Fetching")
        .with_indicator_color(Color::GRAY)
        .with_indicator_height(48.0);
    let mediator = PagingMediator::with_config(&widget, config).unwrap();
    mediator.section_count();

    let cell = mediator.cell(&IndexPath::new(1, 0));
    assert_eq!(cell.text, "Fetching");
    assert_eq!(cell.text_color, Color::GRAY);

    mediator.refresh_control().begin_refreshing();
    assert_eq!(mediator.row_height(&IndexPath::new(1, 0)), Some(48.0));
}

#[test]
fn test_with_config_rejects_invalid_values() {
    let widget = Arc::new(RecordingWidget::default());
    let config = MediatorConfig::default().with_indicator_height(f32::NAN);
    let result = PagingMediator::with_config(&widget, config);
    assert!(matches!(result, Err(MediatorError::Config(_))));
}

// =============================================================================
// Delegation
// =============================================================================

#[test]
fn test_missing_provider_is_an_error() {
    let widget = Arc::new(RecordingWidget::default());
    let mediator = PagingMediator::new(&widget);
    mediator.section_count();

    assert!(matches!(
        mediator.try_row_count(0),
        Err(MediatorError::ContentProviderMissing { selector: Selector::RowCount, section: 0 })
    ));
    assert!(mediator.try_cell(&IndexPath::new(0, 0)).is_err());
    assert_eq!(mediator.try_row_count(1).unwrap(), 1);
}

#[test]
#[should_panic(expected = "No content provider")]
fn test_row_count_without_provider_fails_fast() {
    let widget = Arc::new(RecordingWidget::default());
    let mediator = PagingMediator::new(&widget);
    mediator.section_count();
    mediator.row_count(0);
}

#[test]
#[should_panic(expected = "No content provider")]
fn test_cell_after_provider_dropped_fails_fast() {
    let (_widget, screen, mediator) = setup(Some(1), true);
    drop(screen);
    assert_eq!(mediator.section_count(), Some(2));
    mediator.cell(&IndexPath::new(0, 0));
}

#[test]
fn test_row_height_fallbacks() {
    let widget = Arc::new(RecordingWidget::default());
    let config = MediatorConfig::default().with_fallback_row_height(50.0);
    let mediator = PagingMediator::with_config(&widget, config).unwrap();
    let screen = Arc::new(RecordingScreen {
        custom_height: Some(80.0),
        ..Arc::into_inner(RecordingScreen::new(Some(1), true)).unwrap()
    });
    mediator.section_count();
    let row = IndexPath::new(0, 3);

    // No observer yet: the widget's default.
    assert_eq!(mediator.row_height(&row), Some(44.0));

    mediator.register(&screen, &screen);
    assert_eq!(mediator.row_height(&row), Some(80.0));

    drop(widget);
    drop(screen);
    assert_eq!(mediator.row_height(&row), Some(50.0));
}

#[test]
fn test_forwarding_targets() {
    let (_widget, screen, mediator) = setup(Some(2), true);
    mediator.section_count();

    assert!(matches!(
        mediator.target_for(Selector::SectionTitle),
        Some(ForwardTarget::ContentProvider(_))
    ));
    assert!(matches!(
        mediator.target_for(Selector::DidSelectRow),
        Some(ForwardTarget::EventObserver(_))
    ));
    assert!(mediator.target_for(Selector::RowHeight).is_none());

    assert_eq!(mediator.section_title(1).as_deref(), Some("Section 1"));
    mediator.did_select_row(&IndexPath::new(0, 4));
    assert_eq!(*screen.selected.lock(), vec![IndexPath::new(0, 4)]);
    assert!(mediator.load_more(true));
}

#[test]
fn test_register_last_write_wins() {
    let (_widget, first, mediator) = setup(Some(1), true);
    let second = RecordingScreen::new(Some(4), false);
    mediator.register(&second, &second);

    assert_eq!(mediator.section_count(), Some(5));
    assert!(!mediator.start_loading_more(true));
    assert!(first.load_calls().is_empty());
    assert_eq!(second.load_calls(), vec![true]);
}

// =============================================================================
// Loading state machine
// =============================================================================

#[test]
fn test_start_loading_accepted() {
    let (widget, screen, mediator) = setup(Some(1), true);
    assert!(mediator.start_loading_more(true));
    assert!(mediator.loading_state());
    assert_eq!(mediator.loading_phase(), LoadingPhase::Loading);
    assert_eq!(screen.load_calls(), vec![true]);
    assert_eq!(widget.reloads(), 1);
}

#[test]
fn test_start_is_noop_while_loading() {
    let (widget, screen, mediator) = setup(Some(1), true);
    assert!(mediator.start_loading_more(true));
    assert!(!mediator.start_loading_more(true));
    assert!(!mediator.start_loading_more(false));

    assert!(mediator.loading_state());
    assert_eq!(screen.load_calls(), vec![true]);
    assert_eq!(widget.reloads(), 1);
}

#[test]
fn test_start_is_noop_while_refreshing() {
    let (widget, screen, mediator) = setup(Some(1), true);
    mediator.refresh_control().begin_refreshing();

    assert!(!mediator.start_loading_more(true));
    assert!(!mediator.loading_state());
    assert!(screen.load_calls().is_empty());
    assert_eq!(widget.reloads(), 0);
}

#[test]
fn test_declined_load_still_reloads() {
    let (widget, screen, mediator) = setup(Some(1), false);
    assert!(!mediator.start_loading_more(true));
    assert!(!mediator.loading_state());
    assert_eq!(screen.load_calls(), vec![true]);
    assert_eq!(widget.reloads(), 1);
}

#[test]
fn test_start_without_table_update() {
    let (widget, _screen, mediator) = setup(Some(1), true);
    assert!(mediator.start_loading_more_with(true, false));
    assert_eq!(widget.reloads(), 0);
    mediator.stop_loading_with(false);
    assert_eq!(widget.reloads(), 0);
}

#[test]
fn test_updates_table_default_from_config() {
    let widget = Arc::new(RecordingWidget::default());
    let screen = RecordingScreen::new(Some(1), true);
    let config = MediatorConfig::default().with_updates_table(false);
    let mediator = PagingMediator::with_config(&widget, config).unwrap();
    mediator.register(&screen, &screen);

    mediator.start_loading_more(true);
    mediator.stop_loading();
    assert_eq!(widget.reloads(), 0);
}

#[test]
fn test_start_without_observer_declines() {
    let widget = Arc::new(RecordingWidget::default());
    let mediator = PagingMediator::new(&widget);
    assert!(!mediator.start_loading_more(true));
    assert!(!mediator.loading_state());
}

#[test]
fn test_stop_loading() {
    let (widget, _screen, mediator) = setup(Some(1), true);
    let control = mediator.refresh_control().clone();
    mediator.start_loading_more(true);
    assert_eq!(widget.reloads(), 1);

    mediator.stop_loading();
    assert!(!mediator.loading_state());
    assert_eq!(widget.reloads(), 2);
    assert_eq!(control.end_requests(), 1);

    mediator.stop_loading();
    assert_eq!(widget.reloads(), 2);
    assert_eq!(control.end_requests(), 2);
}

#[test]
fn test_stop_while_idle_only_ends_refresh() {
    let (widget, _screen, mediator) = setup(Some(1), true);
    mediator.stop_loading();
    assert_eq!(mediator.refresh_control().end_requests(), 1);
    assert_eq!(widget.reloads(), 0);
}

#[test]
fn test_loading_state_changed_signal() {
    let (_widget, _screen, mediator) = setup(Some(1), true);
    let states = Arc::new(Mutex::new(Vec::new()));
    let s = states.clone();
    mediator.loading_state_changed.connect(move |&loading| s.lock().push(loading));

    mediator.start_loading_more(true);
    mediator.start_loading_more(true);
    mediator.stop_loading();
    mediator.stop_loading();
    assert_eq!(*states.lock(), vec![true, false]);
}

#[test]
fn test_indicator_visibility_and_height() {
    let (_widget, _screen, mediator) = setup(Some(1), true);
    mediator.section_count();
    let loading_row = IndexPath::new(1, 0);

    assert!(!mediator.should_show_indicator());
    assert_eq!(mediator.row_height(&loading_row), Some(0.0));

    mediator.start_loading_more(true);
    assert!(mediator.should_show_indicator());
    assert_eq!(mediator.row_height(&loading_row), Some(30.0));

    mediator.stop_loading();
    assert_eq!(mediator.row_height(&loading_row), Some(0.0));

    mediator.refresh_control().begin_refreshing();
    assert!(mediator.should_show_indicator());
    assert!(!mediator.loading_state());
    assert_eq!(mediator.row_height(&loading_row), Some(30.0));
}

#[test]
fn test_stop_from_later_turn() {
    let (widget, screen, mediator) = setup(Some(1), true);
    let queue = SharedTaskQueue::new();

    assert!(mediator.start_loading_more(true));
    let weak = Arc::downgrade(&mediator);
    queue.post(move || {
        if let Some(mediator) = weak.upgrade() {
            mediator.stop_loading();
        }
    });

    // Still loading until the event loop gets around to the completion.
    mediator.did_scroll(&at_end());
    assert!(mediator.loading_state());
    assert_eq!(screen.load_calls(), vec![true]);

    queue.process_all();
    assert!(!mediator.loading_state());
    assert_eq!(widget.reloads(), 2);
}

/// An observer whose loads complete before `load_more` returns.
struct SyncLoader {
    mediator: Mutex<Weak<PagingMediator>>,
    calls: Mutex<Vec<bool>>,
}

impl SyncLoader {
    fn attach(mediator: &Arc<PagingMediator>) -> Arc<Self> {
        let loader = Arc::new(Self {
            mediator: Mutex::new(Arc::downgrade(mediator)),
            calls: Mutex::new(Vec::new()),
        });
        mediator.register_event_observer(&loader);
        loader
    }
}

impl EventObserver for SyncLoader {
    fn load_more(&self, more: bool) -> bool {
        self.calls.lock().push(more);
        let mediator = self.mediator.lock().upgrade();
        if let Some(mediator) = mediator {
            mediator.stop_loading();
        }
        true
    }
}

#[test]
fn test_stop_inside_load_more_leaves_mediator_idle() {
    let widget = Arc::new(RecordingWidget::default());
    let mediator = PagingMediator::new(&widget);
    let loader = SyncLoader::attach(&mediator);

    assert!(mediator.start_loading_more(true));
    assert!(!mediator.loading_state());
    assert!(!mediator.should_show_indicator());
    assert_eq!(widget.reloads(), 1);

    // The next scroll to the end pages again.
    mediator.did_scroll(&at_end());
    assert_eq!(*loader.calls.lock(), vec![true, true]);
    assert!(!mediator.loading_state());
}

#[test]
fn test_refresh_stopped_inside_load_more() {
    let widget = Arc::new(RecordingWidget::default());
    let mediator = PagingMediator::new(&widget);
    let loader = SyncLoader::attach(&mediator);
    let control = mediator.refresh_control().clone();

    assert!(control.trigger());
    assert_eq!(*loader.calls.lock(), vec![false]);
    assert!(!control.is_refreshing());
    assert!(!mediator.loading_state());
}

// =============================================================================
// Refresh gesture
// =============================================================================

#[test]
fn test_refresh_accepted() {
    let (widget, screen, mediator) = setup(Some(1), true);
    let control = mediator.refresh_control().clone();

    assert!(control.trigger());
    assert_eq!(screen.load_calls(), vec![false]);
    assert!(mediator.loading_state());
    assert!(control.is_refreshing());
    assert_eq!(widget.reloads(), 0);

    mediator.stop_loading();
    assert!(!control.is_refreshing());
    assert!(!mediator.loading_state());
    assert_eq!(widget.reloads(), 1);
}

#[test]
fn test_indicator_visible_before_observer_answers() {
    let widget = Arc::new(RecordingWidget::default());
    let mediator = PagingMediator::new(&widget);
    let seen = Arc::new(Mutex::new(None));

    struct Peeking {
        mediator: Weak<PagingMediator>,
        seen: Arc<Mutex<Option<bool>>>,
    }

    impl EventObserver for Peeking {
        fn load_more(&self, _more: bool) -> bool {
            if let Some(mediator) = self.mediator.upgrade() {
                *self.seen.lock() = Some(mediator.should_show_indicator());
            }
            true
        }
    }

    let observer = Arc::new(Peeking {
        mediator: Arc::downgrade(&mediator),
        seen: seen.clone(),
    });
    mediator.register_event_observer(&observer);

    mediator.refresh_control().trigger();
    assert_eq!(*seen.lock(), Some(true));
    assert!(mediator.loading_state());
}

#[test]
fn test_refresh_declined_ends_gesture() {
    let (_widget, screen, mediator) = setup(Some(1), false);
    let control = mediator.refresh_control().clone();

    control.trigger();
    assert_eq!(screen.load_calls(), vec![false]);
    assert!(!mediator.loading_state());
    assert!(!control.is_refreshing());
    assert!(!mediator.should_show_indicator());
}

#[test]
fn test_refresh_while_loading_waits_for_stop() {
    let (_widget, screen, mediator) = setup(Some(1), true);
    let control = mediator.refresh_control().clone();
    mediator.start_loading_more(true);

    control.trigger();
    assert_eq!(screen.load_calls(), vec![true]);
    assert!(control.is_refreshing());

    mediator.stop_loading();
    assert!(!control.is_refreshing());
}

// =============================================================================
// Scroll threshold
// =============================================================================

#[test]
fn test_scroll_to_end_loads_more() {
    let (_widget, screen, mediator) = setup(Some(1), true);
    mediator.did_scroll(&ScrollGeometry::new(100.0, 500.0, 300.0));
    assert!(screen.load_calls().is_empty());

    mediator.did_scroll(&at_end());
    assert_eq!(screen.load_calls(), vec![true]);
    assert!(mediator.loading_state());
    assert_eq!(screen.scrolls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_scroll_suppressed_while_indicator_visible() {
    let (_widget, screen, mediator) = setup(Some(1), true);
    mediator.did_scroll(&at_end());
    mediator.did_scroll(&at_end());
    mediator.did_scroll(&ScrollGeometry::new(250.0, 500.0, 300.0));

    assert_eq!(screen.load_calls(), vec![true]);
    assert_eq!(screen.scrolls.load(Ordering::SeqCst), 3);
}

#[test]
fn test_scroll_suppressed_while_refreshing() {
    let (_widget, screen, mediator) = setup(Some(1), false);
    mediator.refresh_control().begin_refreshing();
    mediator.did_scroll(&at_end());
    assert!(screen.load_calls().is_empty());
    assert_eq!(screen.scrolls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_scroll_at_origin_does_not_load() {
    let (_widget, screen, mediator) = setup(Some(1), true);
    mediator.did_scroll(&ScrollGeometry::new(0.0, 100.0, 300.0));
    assert!(screen.load_calls().is_empty());
}

#[test]
fn test_declined_scroll_load_retries_on_next_scroll() {
    let (_widget, screen, mediator) = setup(Some(1), false);
    mediator.did_scroll(&at_end());
    mediator.did_scroll(&at_end());
    assert_eq!(screen.load_calls(), vec![true, true]);
}

#[test]
fn test_prefetch_distance_from_config() {
    let widget = Arc::new(RecordingWidget::default());
    let screen = RecordingScreen::new(Some(1), true);
    let config = MediatorConfig::default().with_prefetch_distance(100.0);
    let mediator = PagingMediator::with_config(&widget, config).unwrap();
    mediator.register(&screen, &screen);

    mediator.did_scroll(&ScrollGeometry::new(100.0, 500.0, 300.0));
    assert_eq!(screen.load_calls(), vec![true]);
}
