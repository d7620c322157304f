//! Pull-to-refresh control.

use std::sync::atomic::{AtomicUsize, Ordering};

use lattice_paging_core::logging::targets;
use lattice_paging_core::{Property, Signal};

/// The control behind the pull-to-refresh gesture.
///
/// A list widget calls [`trigger`](Self::trigger) when the user completes a
/// pull. The control then shows itself as refreshing and emits
/// [`triggered`](Self::triggered). Whoever handles the refresh calls
/// [`end_refreshing`](Self::end_refreshing) when done.
///
/// # Signals
///
/// - `triggered(())`: The user completed a pull gesture
/// - `refreshing_changed(bool)`: The visual refreshing state changed
pub struct RefreshControl {
    refreshing: Property<bool>,
    end_requests: AtomicUsize,
    /// Emitted when the user completes a pull gesture.
    pub triggered: Signal<()>,
    /// Emitted when the refreshing state changes.
    pub refreshing_changed: Signal<bool>,
}

impl Default for RefreshControl {
    fn default() -> Self {
        Self::new()
    }
}

impl RefreshControl {
    /// Creates an idle control.
    pub fn new() -> Self {
        Self {
            refreshing: Property::new(false),
            end_requests: AtomicUsize::new(0),
            triggered: Signal::new(),
            refreshing_changed: Signal::new(),
        }
    }

    /// Returns `true` while the control shows as refreshing.
    pub fn is_refreshing(&self) -> bool {
        self.refreshing.get()
    }

    /// Shows the control as refreshing without firing `triggered`.
    pub fn begin_refreshing(&self) {
        if self.refreshing.set(true) {
            tracing::debug!(target: targets::REFRESH, "refresh began");
            self.refreshing_changed.emit(true);
        }
    }

    /// Ends the refreshing state. Calling it while idle is harmless.
    pub fn end_refreshing(&self) {
        self.end_requests.fetch_add(1, Ordering::Relaxed);
        if self.refreshing.set(false) {
            tracing::debug!(target: targets::REFRESH, "refresh ended");
            self.refreshing_changed.emit(false);
        }
    }

    /// Number of times `end_refreshing` has been called.
    pub fn end_requests(&self) -> usize {
        self.end_requests.load(Ordering::Relaxed)
    }

    /// Handles a completed pull gesture.
    ///
    /// Ignored while already refreshing. Returns `true` if the gesture fired.
    pub fn trigger(&self) -> bool {
        if self.is_refreshing() {
            tracing::trace!(target: targets::REFRESH, "pull ignored, already refreshing");
            return false;
        }
        self.begin_refreshing();
        self.triggered.emit(());
        true
    }
}

static_assertions::assert_impl_all!(RefreshControl: Send, Sync);
