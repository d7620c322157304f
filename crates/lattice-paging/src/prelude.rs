//! Prelude module for Lattice Paging.
//!
//! ```ignore
//! use lattice_paging::prelude::*;
//! ```
//!
//! This provides access to:
//! - The mediator and its configuration (`PagingMediator`, `MediatorConfig`)
//! - Data contracts (`ContentProvider`, `EventObserver`, `Cell`, `IndexPath`)
//! - View contracts (`ListWidget`, `ListView`, `RefreshControl`)
//! - Signals and the task queue

// ============================================================================
// Mediator
// ============================================================================

pub use crate::config::MediatorConfig;
pub use crate::error::{ConfigError, MediatorError};
pub use crate::mediator::{LoadingPhase, PagingMediator};

// ============================================================================
// Model
// ============================================================================

pub use crate::model::{
    Cell, Color, ContentProvider, EventObserver, HorizontalAlignment, IndexPath, Selector,
};

// ============================================================================
// View
// ============================================================================

pub use crate::view::{DEFAULT_ROW_HEIGHT, ListView, ListWidget, RefreshControl, ScrollGeometry};

// ============================================================================
// Core
// ============================================================================

pub use lattice_paging_core::{Property, SharedTaskQueue, Signal};
