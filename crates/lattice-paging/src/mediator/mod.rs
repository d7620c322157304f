//! The paging mediator.
//!
//! [`PagingMediator`] sits between a [`ListWidget`] and the screen that owns
//! the data. It installs itself as the widget's only content provider and
//! event observer, answers a few callbacks itself and forwards the rest to
//! the screen's real provider and observer. On top of that it adds:
//!
//! - a loading row in an extra section after all real content,
//! - automatic "load more" when the list is scrolled to its end,
//! - pull-to-refresh through an owned [`RefreshControl`].
//!
//! # Example
//!
//! ```
//! use lattice_paging::model::{Cell, ContentProvider, EventObserver, IndexPath};
//! use lattice_paging::view::ListView;
//! use lattice_paging::PagingMediator;
//! use std::sync::Arc;
//!
//! struct Feed;
//!
//! impl ContentProvider for Feed {
//!     fn row_count(&self, _section: usize) -> usize {
//!         20
//!     }
//!
//!     fn cell(&self, index: &IndexPath) -> Cell {
//!         Cell::new(format!("Item {}", index.row()))
//!     }
//! }
//!
//! impl EventObserver for Feed {
//!     fn load_more(&self, _more: bool) -> bool {
//!         // Kick off a fetch; call `stop_loading` when it lands.
//!         true
//!     }
//! }
//!
//! let view = Arc::new(ListView::new().with_viewport_extent(400.0));
//! let feed = Arc::new(Feed);
//! let mediator = PagingMediator::new(&view);
//! mediator.register(&feed, &feed);
//!
//! assert!(mediator.start_loading_more(true));
//! assert!(mediator.loading_state());
//! mediator.stop_loading();
//! assert!(!mediator.loading_state());
//! ```
//!
//! # Threading
//!
//! All entry points are meant to run on the UI thread. The only guard
//! against overlapping loads is the idle check; the mediator never holds a
//! lock while calling the widget, the provider or the observer, so any of
//! them may call back into it.

mod forwarding;
mod loading;
mod scroll;
mod synthetic;

use std::sync::{Arc, Weak};

use lattice_paging_core::logging::{span_names, targets};
use lattice_paging_core::{PerfSpan, Signal};
use parking_lot::{Mutex, RwLock};

use crate::config::MediatorConfig;
use crate::error::{MediatorError, Result};
use crate::model::{Cell, ContentProvider, EventObserver, IndexPath, Selector};
use crate::view::{ListWidget, RefreshControl, ScrollGeometry};

pub use forwarding::{ForwardTarget, ForwardingProxy, MEDIATOR_SELECTORS};
pub use loading::{LoadingPhase, LoadingStateMachine};
pub use scroll::ScrollThresholdTrigger;
pub use synthetic::SyntheticSection;

/// Adds paging, pull-to-refresh and a loading row to a list widget.
///
/// Always handled through an `Arc`. The mediator holds the widget, the
/// provider and the observer weakly; the owning screen keeps them alive.
///
/// # Signals
///
/// - `loading_state_changed(bool)`: The loading flag changed
pub struct PagingMediator {
    weak_self: Weak<PagingMediator>,
    widget: RwLock<Option<Weak<dyn ListWidget>>>,
    proxy: ForwardingProxy,
    synthetic: Mutex<SyntheticSection>,
    loading: LoadingStateMachine,
    trigger: ScrollThresholdTrigger,
    refresh_control: Arc<RefreshControl>,
    config: MediatorConfig,

    /// Emitted when the loading flag changes.
    pub loading_state_changed: Signal<bool>,
}

impl PagingMediator {
    /// Creates a mediator with the default configuration and binds it to
    /// `widget`.
    pub fn new<W: ListWidget + 'static>(widget: &Arc<W>) -> Arc<Self> {
        Self::build(widget, MediatorConfig::default())
    }

    /// Creates a mediator with a custom configuration and binds it to
    /// `widget`.
    pub fn with_config<W: ListWidget + 'static>(
        widget: &Arc<W>,
        config: MediatorConfig,
    ) -> Result<Arc<Self>> {
        config.validate()?;
        Ok(Self::build(widget, config))
    }

    fn build<W: ListWidget + 'static>(widget: &Arc<W>, config: MediatorConfig) -> Arc<Self> {
        let mediator = Arc::new_cyclic(|weak_self: &Weak<PagingMediator>| Self {
            weak_self: weak_self.clone(),
            widget: RwLock::new(None),
            proxy: ForwardingProxy::new(),
            synthetic: Mutex::new(SyntheticSection::new()),
            loading: LoadingStateMachine::new(),
            trigger: ScrollThresholdTrigger::new(config.prefetch_distance),
            refresh_control: Arc::new(RefreshControl::new()),
            config,
            loading_state_changed: Signal::new(),
        });

        let weak = Arc::downgrade(&mediator);
        mediator.refresh_control.triggered.connect(move |_| {
            if let Some(mediator) = weak.upgrade() {
                mediator.refresh_triggered();
            }
        });

        mediator.bind(widget);
        mediator
    }

    // =========================================================================
    // Wiring
    // =========================================================================

    /// Binds the mediator to `widget`.
    ///
    /// Installs the mediator as the widget's content provider and event
    /// observer and attaches the refresh control. Binding again replaces the
    /// previous widget.
    pub fn bind<W: ListWidget + 'static>(&self, widget: &Arc<W>) {
        let weak: Weak<W> = Arc::downgrade(widget);
        let as_widget: Weak<dyn ListWidget> = weak;
        *self.widget.write() = Some(as_widget);

        let as_provider: Weak<dyn ContentProvider> = self.weak_self.clone();
        let as_observer: Weak<dyn EventObserver> = self.weak_self.clone();
        widget.set_content_provider(as_provider);
        widget.set_event_observer(as_observer);
        widget.attach_refresh_control(self.refresh_control.clone());
        tracing::debug!(target: targets::MEDIATOR, "bound to list widget");
    }

    /// Registers the real content provider and event observer.
    ///
    /// Both are held weakly. Registering again replaces both.
    pub fn register<P, O>(&self, content_provider: &Arc<P>, event_observer: &Arc<O>)
    where
        P: ContentProvider + 'static,
        O: EventObserver + 'static,
    {
        self.register_content_provider(content_provider);
        self.register_event_observer(event_observer);
    }

    /// Registers the real content provider.
    pub fn register_content_provider<P: ContentProvider + 'static>(&self, provider: &Arc<P>) {
        let weak: Weak<P> = Arc::downgrade(provider);
        let provider: Weak<dyn ContentProvider> = weak;
        self.proxy.set_content_provider(provider);
    }

    /// Registers the real event observer.
    pub fn register_event_observer<O: EventObserver + 'static>(&self, observer: &Arc<O>) {
        let weak: Weak<O> = Arc::downgrade(observer);
        let observer: Weak<dyn EventObserver> = weak;
        self.proxy.set_event_observer(observer);
    }

    fn widget(&self) -> Option<Arc<dyn ListWidget>> {
        self.widget.read().as_ref().and_then(Weak::upgrade)
    }

    fn reload_widget(&self) {
        match self.widget() {
            Some(widget) => widget.reload_data(),
            None => tracing::debug!(target: targets::MEDIATOR, "widget released, skipping reload"),
        }
    }

    // =========================================================================
    // State
    // =========================================================================

    /// The configuration in use.
    pub fn config(&self) -> &MediatorConfig {
        &self.config
    }

    /// The owned pull-to-refresh control.
    pub fn refresh_control(&self) -> &Arc<RefreshControl> {
        &self.refresh_control
    }

    /// Returns `true` while a mediator-started load is outstanding.
    pub fn loading_state(&self) -> bool {
        self.loading.is_loading()
    }

    /// The loading state as a phase.
    pub fn loading_phase(&self) -> LoadingPhase {
        self.loading.phase()
    }

    /// Index of the loading row's section, as of the last section count.
    pub fn loading_indicator_section_index(&self) -> Option<usize> {
        self.synthetic.lock().index()
    }

    /// Whether the loading row is currently shown: a load is outstanding or
    /// the refresh gesture is active.
    pub fn should_show_indicator(&self) -> bool {
        self.loading
            .should_show_indicator(self.refresh_control.is_refreshing())
    }

    fn set_loading(&self, loading: bool) {
        if self.loading.record_answer(loading) {
            tracing::debug!(target: targets::MEDIATOR, loading, "loading state changed");
            self.loading_state_changed.emit(loading);
        }
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Asks the observer to load, reloading the widget per the configured
    /// `updates_table` default.
    ///
    /// Returns `true` if a load started.
    pub fn start_loading_more(&self, more: bool) -> bool {
        self.start_loading_more_with(more, self.config.updates_table)
    }

    /// Asks the observer to load.
    ///
    /// Does nothing while a load is outstanding or the refresh gesture is
    /// active. Otherwise the loading flag becomes the observer's answer (a
    /// missing observer declines) and, if `updates_table`, the widget
    /// reloads so the loading row reflects the new state.
    ///
    /// Returns `true` if a load started.
    pub fn start_loading_more_with(&self, more: bool, updates_table: bool) -> bool {
        if !self.loading.can_start(self.refresh_control.is_refreshing()) {
            tracing::trace!(target: targets::MEDIATOR, more, "load already in progress");
            return false;
        }

        let _perf = PerfSpan::new(span_names::LOAD);
        let stops = self.loading.stop_count();
        let accepted = self.ask_observer(more);
        if self.loading.stop_count() != stops {
            tracing::debug!(target: targets::MEDIATOR, more, "load stopped before the observer answered");
        } else {
            self.set_loading(accepted);
        }
        if updates_table {
            self.reload_widget();
        }
        accepted
    }

    /// Ends the outstanding load, reloading the widget per the configured
    /// `updates_table` default.
    pub fn stop_loading(&self) {
        self.stop_loading_with(self.config.updates_table);
    }

    /// Ends the outstanding load and the refresh gesture.
    ///
    /// The refresh control is always told to end, even if it was not active.
    /// The widget only reloads if a load was actually outstanding.
    ///
    /// May be called from inside the observer's `load_more`, for loads that
    /// complete synchronously; the mediator then stays idle.
    pub fn stop_loading_with(&self, updates_table: bool) {
        self.refresh_control.end_refreshing();
        if self.loading.stop() {
            tracing::debug!(target: targets::MEDIATOR, "load stopped");
            self.loading_state_changed.emit(false);
            if updates_table {
                self.reload_widget();
            }
        }
    }

    fn ask_observer(&self, more: bool) -> bool {
        match self.proxy.event_observer() {
            Some(observer) => {
                let accepted = observer.load_more(more);
                if !accepted {
                    tracing::debug!(target: targets::MEDIATOR, more, "observer declined to load");
                }
                accepted
            }
            None => {
                tracing::debug!(target: targets::MEDIATOR, more, "no event observer, load declined");
                false
            }
        }
    }

    fn refresh_triggered(&self) {
        if !self.loading.can_start_refresh() {
            tracing::trace!(target: targets::REFRESH, "refresh while loading, waiting for stop");
            return;
        }
        let stops = self.loading.stop_count();
        let accepted = self.ask_observer(false);
        if self.loading.stop_count() != stops {
            tracing::debug!(target: targets::REFRESH, "refresh stopped before the observer answered");
            return;
        }
        self.set_loading(accepted);
        if !accepted {
            self.refresh_control.end_refreshing();
        }
    }

    // =========================================================================
    // Forwarding
    // =========================================================================

    /// Returns `true` if the mediator or anyone behind it answers `selector`.
    pub fn handles(&self, selector: Selector) -> bool {
        self.proxy.handles(selector)
    }

    /// Who answers a callback the mediator does not answer itself.
    pub fn target_for(&self, selector: Selector) -> Option<ForwardTarget> {
        self.proxy.target_for(selector)
    }

    fn forwarded_observer(&self, selector: Selector) -> Option<Arc<dyn EventObserver>> {
        self.proxy
            .target_for(selector)
            .and_then(ForwardTarget::into_event_observer)
    }

    fn forwarded_provider(&self, selector: Selector) -> Option<Arc<dyn ContentProvider>> {
        self.proxy
            .target_for(selector)
            .and_then(ForwardTarget::into_content_provider)
    }

    fn is_synthetic(&self, section: usize) -> bool {
        self.synthetic.lock().contains(section)
    }

    /// Row count for `section`, answering the synthetic section itself.
    pub fn try_row_count(&self, section: usize) -> Result<usize> {
        if self.is_synthetic(section) {
            return Ok(self.synthetic.lock().row_count());
        }
        self.proxy
            .content_provider()
            .map(|provider| provider.row_count(section))
            .ok_or_else(|| MediatorError::provider_missing(Selector::RowCount, section))
    }

    /// Cell for `index`, answering the synthetic section itself.
    pub fn try_cell(&self, index: &IndexPath) -> Result<Cell> {
        if self.is_synthetic(index.section()) {
            return Ok(Cell::loading(
                self.config.indicator_text.clone(),
                self.config.indicator_color,
            ));
        }
        self.proxy
            .content_provider()
            .map(|provider| provider.cell(index))
            .ok_or_else(|| MediatorError::provider_missing(Selector::Cell, index.section()))
    }
}

/// Aborts on a delegation nobody can answer. Real content without a
/// provider is a programming error.
fn fail_fast(err: MediatorError) -> ! {
    tracing::error!(target: targets::MEDIATOR, error = %err, "no content provider");
    panic!("{err}")
}

impl ContentProvider for PagingMediator {
    fn section_count(&self) -> Option<usize> {
        let real = self
            .proxy
            .content_provider()
            .and_then(|provider| provider.section_count());
        Some(self.synthetic.lock().section_count(real))
    }

    /// # Panics
    ///
    /// Panics if `section` holds real content and no content provider is
    /// registered or it has been dropped.
    fn row_count(&self, section: usize) -> usize {
        self.try_row_count(section).unwrap_or_else(|err| fail_fast(err))
    }

    /// # Panics
    ///
    /// Panics if `index` points at real content and no content provider is
    /// registered or it has been dropped.
    fn cell(&self, index: &IndexPath) -> Cell {
        self.try_cell(index).unwrap_or_else(|err| fail_fast(err))
    }

    fn section_title(&self, section: usize) -> Option<String> {
        if self.is_synthetic(section) {
            return None;
        }
        self.forwarded_provider(Selector::SectionTitle)
            .and_then(|provider| provider.section_title(section))
    }

    fn responds_to(&self, selector: Selector) -> bool {
        self.handles(selector)
    }
}

impl EventObserver for PagingMediator {
    fn row_height(&self, index: &IndexPath) -> Option<f32> {
        if self.is_synthetic(index.section()) {
            let visible = self.should_show_indicator();
            let height = self
                .synthetic
                .lock()
                .row_height(visible, self.config.indicator_height);
            return Some(height);
        }
        let custom = self
            .proxy
            .event_observer()
            .and_then(|observer| observer.row_height(index));
        Some(custom.unwrap_or_else(|| {
            self.widget()
                .map_or(self.config.fallback_row_height, |w| w.default_row_height())
        }))
    }

    fn load_more(&self, more: bool) -> bool {
        self.forwarded_observer(Selector::LoadMore)
            .is_some_and(|observer| observer.load_more(more))
    }

    fn did_scroll(&self, geometry: &ScrollGeometry) {
        if let Some(observer) = self.proxy.event_observer() {
            observer.did_scroll(geometry);
        }

        if self
            .trigger
            .should_trigger(geometry, self.should_show_indicator())
        {
            tracing::trace!(target: targets::SCROLL, remaining = geometry.remaining(), "reached end of content");
            self.start_loading_more(true);
        }
    }

    fn did_select_row(&self, index: &IndexPath) {
        if self.is_synthetic(index.section()) {
            return;
        }
        if let Some(observer) = self.forwarded_observer(Selector::DidSelectRow) {
            observer.did_select_row(index);
        }
    }

    fn will_display_cell(&self, cell: &Cell, index: &IndexPath) {
        if self.is_synthetic(index.section()) {
            return;
        }
        if let Some(observer) = self.forwarded_observer(Selector::WillDisplayCell) {
            observer.will_display_cell(cell, index);
        }
    }

    fn responds_to(&self, selector: Selector) -> bool {
        self.handles(selector)
    }
}

static_assertions::assert_impl_all!(PagingMediator: Send, Sync);

#[cfg(test)]
mod tests;
