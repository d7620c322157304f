//! Lattice Paging - infinite scroll and pull-to-refresh for list views.
//!
//! [`PagingMediator`] wraps any [`ListWidget`](view::ListWidget) and adds:
//!
//! - a "Loading..." row after the real content while a load runs,
//! - a load-more request when the user scrolls to the end,
//! - pull-to-refresh through a [`RefreshControl`](view::RefreshControl).
//!
//! Everything else the widget asks is forwarded unchanged to the screen's own
//! [`ContentProvider`](model::ContentProvider) and
//! [`EventObserver`](model::EventObserver).
//!
//! ```text
//! ┌────────────┐  provider/observer  ┌────────────────┐  forwarded  ┌────────┐
//! │ ListWidget │────────────────────>│ PagingMediator │────────────>│ Screen │
//! └────────────┘                     └────────────────┘             └────────┘
//!                                      │ load_more(bool)                ^
//!                                      └────────────────────────────────┘
//!                                        stop_loading() when data lands
//! ```
//!
//! # Example
//!
//! ```
//! use lattice_paging::prelude::*;
//! use std::sync::Arc;
//!
//! struct Screen;
//!
//! impl ContentProvider for Screen {
//!     fn row_count(&self, _section: usize) -> usize {
//!         3
//!     }
//!
//!     fn cell(&self, index: &IndexPath) -> Cell {
//!         Cell::new(format!("Row {}", index.row()))
//!     }
//! }
//!
//! impl EventObserver for Screen {}
//!
//! let view = Arc::new(ListView::new());
//! let screen = Arc::new(Screen);
//! let mediator = PagingMediator::new(&view);
//! mediator.register(&screen, &screen);
//! view.reload_data();
//!
//! // One real section plus the loading section.
//! assert_eq!(view.section_count(), 2);
//! assert_eq!(mediator.loading_indicator_section_index(), Some(1));
//! ```

pub mod config;
pub mod error;
pub mod mediator;
pub mod model;
pub mod prelude;
pub mod view;

pub use config::MediatorConfig;
pub use error::{ConfigError, MediatorError, Result};
pub use mediator::PagingMediator;

pub use lattice_paging_core::{
    ConnectionId, PerfSpan, Property, SharedTaskQueue, Signal, SignalError, TaskId, TaskQueue,
};

/// Logging targets and helpers shared with the core crate.
pub mod logging {
    pub use lattice_paging_core::logging::*;
}
