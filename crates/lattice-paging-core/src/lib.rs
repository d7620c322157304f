//! Core systems for Lattice Paging.
//!
//! This crate provides the foundational pieces the list mediator is built on:
//!
//! - **Signal/Slot System**: Type-safe notification between components
//! - **Property System**: Values with change detection
//! - **Task Queue**: Deferred work, one event-loop turn at a time
//! - **Logging**: `tracing` targets, span names and helper macros
//!
//! # Example
//!
//! ```
//! use lattice_paging_core::{Property, SharedTaskQueue, Signal};
//! use std::sync::Arc;
//!
//! let queue = Arc::new(SharedTaskQueue::new());
//! let loaded = Arc::new(Signal::<usize>::new());
//! loaded.connect(|rows| println!("loaded {rows} rows"));
//!
//! let signal = loaded.clone();
//! queue.post(move || signal.emit(20));
//! queue.process_all();
//! ```

mod error;
pub mod logging;
pub mod property;
pub mod signal;
mod task;

pub use error::SignalError;
pub use logging::PerfSpan;
pub use property::Property;
pub use signal::{ConnectionId, Signal};
pub use task::{SharedTaskQueue, TaskId, TaskQueue};
