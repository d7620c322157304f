//! Data-side contracts for list views.
//!
//! # Core Types
//!
//! - `IndexPath`: Identifies a row by section and row
//! - `Cell`: The materialized content of one row
//! - `Selector`: Names one callback of the list view contract
//! - `ContentProvider`: Supplies section/row counts and cells
//! - `EventObserver`: Supplies heights and load decisions, receives events
//!
//! ```text
//! ┌─────────────────┐   counts, cells    ┌─────────────┐
//! │ ContentProvider │<───────────────────│             │
//! └─────────────────┘                    │  List view  │
//! ┌─────────────────┐  heights, events   │             │
//! │  EventObserver  │<───────────────────│             │
//! └─────────────────┘                    └─────────────┘
//! ```

mod cell;
mod index;
mod traits;

pub use cell::{Cell, Color, HorizontalAlignment};
pub use index::IndexPath;
pub use traits::{ContentProvider, EventObserver, Selector};
