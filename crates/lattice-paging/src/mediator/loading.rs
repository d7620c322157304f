//! Loading state machine.
//!
//! ```text
//!          start (observer accepts) / refresh (observer accepts)
//!   Idle ─────────────────────────────────────────────────────> Loading
//!    ^                                                            │
//!    └──────────────────────────── stop ──────────────────────────┘
//! ```
//!
//! A start is only attempted while idle and while no refresh gesture is
//! active. The "loading" flag is exactly what the observer answered.

use std::sync::atomic::{AtomicUsize, Ordering};

use lattice_paging_core::Property;

/// The two states of the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadingPhase {
    /// Nothing outstanding.
    #[default]
    Idle,
    /// A load accepted by the observer has not been stopped yet.
    Loading,
}

/// Tracks whether a mediator-started load is outstanding.
#[derive(Debug)]
pub struct LoadingStateMachine {
    loading: Property<bool>,
    /// Number of stop requests so far, idle or not.
    stops: AtomicUsize,
}

impl Default for LoadingStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadingStateMachine {
    /// Creates an idle machine.
    pub fn new() -> Self {
        Self {
            loading: Property::new(false),
            stops: AtomicUsize::new(0),
        }
    }

    /// Returns `true` while a load is outstanding.
    pub fn is_loading(&self) -> bool {
        self.loading.get()
    }

    /// The current phase.
    pub fn phase(&self) -> LoadingPhase {
        if self.is_loading() {
            LoadingPhase::Loading
        } else {
            LoadingPhase::Idle
        }
    }

    /// Returns `true` if an explicit start may ask the observer.
    pub fn can_start(&self, refreshing: bool) -> bool {
        !self.is_loading() && !refreshing
    }

    /// Returns `true` if a refresh gesture may ask the observer.
    pub fn can_start_refresh(&self) -> bool {
        !self.is_loading()
    }

    /// Records the observer's answer. Returns `true` if the state changed.
    pub fn record_answer(&self, accepted: bool) -> bool {
        self.loading.set(accepted)
    }

    /// Ends an outstanding load. Returns `true` if the machine was loading.
    pub fn stop(&self) -> bool {
        self.stops.fetch_add(1, Ordering::SeqCst);
        self.loading.set(false)
    }

    /// Number of stop requests so far.
    ///
    /// Compared around an observer call to detect a load that finished
    /// before the observer returned.
    pub fn stop_count(&self) -> usize {
        self.stops.load(Ordering::SeqCst)
    }

    /// Whether the loading row should be shown.
    pub fn should_show_indicator(&self, refreshing: bool) -> bool {
        self.is_loading() || refreshing
    }
}
