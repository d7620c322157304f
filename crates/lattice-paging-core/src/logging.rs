//! Logging facilities for Lattice Paging.
//!
//! Lattice Paging uses the `tracing` crate for instrumentation. The library
//! never installs a subscriber; to see logs, install one in your application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("lattice_paging=debug")
//!     .init();
//! ```
//!
//! The scroll path is hot and only ever logs at `trace`.

/// Span names used throughout Lattice Paging for tracing.
pub mod span_names {
    /// A load started by the mediator.
    pub const LOAD: &str = "lattice_paging::load";
    /// A structural reload of the list view.
    pub const RELOAD: &str = "lattice_paging::reload";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "lattice_paging_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "lattice_paging_core::signal";
    /// Deferred task queue target.
    pub const TASK: &str = "lattice_paging_core::task";
    /// Mediator target (state machine, forwarding).
    pub const MEDIATOR: &str = "lattice_paging::mediator";
    /// Scroll threshold target.
    pub const SCROLL: &str = "lattice_paging::scroll";
    /// Refresh control target.
    pub const REFRESH: &str = "lattice_paging::refresh";
    /// List view target.
    pub const VIEW: &str = "lattice_paging::view";
    /// Configuration target.
    pub const CONFIG: &str = "lattice_paging::config";
}

/// A guard for timing an operation.
///
/// Creates an `info` span on the `lattice_paging::perf` target that stays
/// entered until the guard is dropped.
///
/// ```ignore
/// let _span = PerfSpan::new("reload_data");
/// ```
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: "lattice_paging::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

/// Trace-level log on the core target.
#[macro_export]
macro_rules! paging_trace {
    ($($arg:tt)*) => {
        tracing::trace!(target: "lattice_paging_core", $($arg)*)
    };
}

/// Debug-level log on the core target.
#[macro_export]
macro_rules! paging_debug {
    ($($arg:tt)*) => {
        tracing::debug!(target: "lattice_paging_core", $($arg)*)
    };
}

/// Warn-level log on the core target.
#[macro_export]
macro_rules! paging_warn {
    ($($arg:tt)*) => {
        tracing::warn!(target: "lattice_paging_core", $($arg)*)
    };
}
