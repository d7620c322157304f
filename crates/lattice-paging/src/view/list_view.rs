//! Headless list view.
//!
//! [`ListView`] keeps the structure of a sectioned list (section and row
//! counts, row heights, content extent) and its scroll state, and drives the
//! installed content provider and event observer the way an on-screen list
//! would. It does not render.
//!
//! # Example
//!
//! ```
//! use lattice_paging::model::{Cell, ContentProvider, IndexPath};
//! use lattice_paging::view::{ListView, ListWidget};
//! use std::sync::Arc;
//!
//! struct Numbers;
//!
//! impl ContentProvider for Numbers {
//!     fn row_count(&self, _section: usize) -> usize {
//!         100
//!     }
//!
//!     fn cell(&self, index: &IndexPath) -> Cell {
//!         Cell::new(index.row().to_string())
//!     }
//! }
//!
//! let numbers: Arc<dyn ContentProvider> = Arc::new(Numbers);
//! let view = ListView::new().with_viewport_extent(440.0);
//! view.set_content_provider(Arc::downgrade(&numbers));
//! view.reload_data();
//!
//! assert_eq!(view.row_count(0), 100);
//! assert_eq!(view.content_extent(), 4400.0);
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Weak};

use lattice_paging_core::logging::{span_names, targets};
use lattice_paging_core::{PerfSpan, Signal};
use parking_lot::RwLock;

use crate::model::{Cell, ContentProvider, EventObserver, IndexPath, Selector};

use super::geometry::ScrollGeometry;
use super::refresh::RefreshControl;
use super::widget::ListWidget;

/// Default height for rows without a custom height.
pub const DEFAULT_ROW_HEIGHT: f32 = 44.0;

#[derive(Debug, Clone, Default)]
struct SectionLayout {
    title: Option<String>,
    /// Height of each row.
    row_heights: Vec<f32>,
}

impl SectionLayout {
    fn extent(&self) -> f32 {
        self.row_heights.iter().sum()
    }
}

#[derive(Debug, Default)]
struct ViewState {
    sections: Vec<SectionLayout>,
    content_extent: f32,
    content_offset: f32,
    viewport_extent: f32,
    leading_inset: f32,
    trailing_inset: f32,
}

impl ViewState {
    fn max_offset(&self) -> f32 {
        (self.content_extent + self.trailing_inset - self.viewport_extent).max(0.0)
    }

    fn geometry(&self) -> ScrollGeometry {
        ScrollGeometry {
            content_offset: self.content_offset,
            content_extent: self.content_extent,
            viewport_extent: self.viewport_extent,
            leading_inset: self.leading_inset,
            trailing_inset: self.trailing_inset,
        }
    }
}

/// A headless, vertically scrolling, sectioned list.
///
/// # Signals
///
/// - `reloaded(())`: Emitted after every `reload_data`
/// - `row_selected(IndexPath)`: Emitted when a selectable row is selected
pub struct ListView {
    provider: RwLock<Option<Weak<dyn ContentProvider>>>,
    observer: RwLock<Option<Weak<dyn EventObserver>>>,
    refresh_control: RwLock<Option<Arc<RefreshControl>>>,
    state: RwLock<ViewState>,
    default_row_height: f32,
    reloads: AtomicUsize,

    /// Emitted after the view reloaded its structure.
    pub reloaded: Signal<()>,
    /// Emitted when a row is selected.
    pub row_selected: Signal<IndexPath>,
}

impl Default for ListView {
    fn default() -> Self {
        Self::new()
    }
}

impl ListView {
    /// Creates an empty list view with no viewport.
    pub fn new() -> Self {
        Self {
            provider: RwLock::new(None),
            observer: RwLock::new(None),
            refresh_control: RwLock::new(None),
            state: RwLock::new(ViewState::default()),
            default_row_height: DEFAULT_ROW_HEIGHT,
            reloads: AtomicUsize::new(0),
            reloaded: Signal::new(),
            row_selected: Signal::new(),
        }
    }

    /// Sets the viewport extent using builder pattern.
    pub fn with_viewport_extent(self, extent: f32) -> Self {
        self.state.write().viewport_extent = extent.max(0.0);
        self
    }

    /// Sets the default row height using builder pattern.
    pub fn with_default_row_height(mut self, height: f32) -> Self {
        self.default_row_height = height.max(0.0);
        self
    }

    /// Sets the content insets using builder pattern.
    pub fn with_content_insets(self, leading: f32, trailing: f32) -> Self {
        self.set_content_insets(leading, trailing);
        self
    }

    // =========================================================================
    // Collaborators
    // =========================================================================

    fn provider(&self) -> Option<Arc<dyn ContentProvider>> {
        self.provider.read().as_ref().and_then(Weak::upgrade)
    }

    fn observer(&self) -> Option<Arc<dyn EventObserver>> {
        self.observer.read().as_ref().and_then(Weak::upgrade)
    }

    /// Returns the attached refresh control, if any.
    pub fn refresh_control(&self) -> Option<Arc<RefreshControl>> {
        self.refresh_control.read().clone()
    }

    // =========================================================================
    // Structure
    // =========================================================================

    /// Number of sections as of the last reload.
    pub fn section_count(&self) -> usize {
        self.state.read().sections.len()
    }

    /// Number of rows in `section` as of the last reload.
    pub fn row_count(&self, section: usize) -> usize {
        self.state
            .read()
            .sections
            .get(section)
            .map_or(0, |s| s.row_heights.len())
    }

    /// Height of the row at `index` as of the last reload.
    pub fn row_height(&self, index: &IndexPath) -> Option<f32> {
        self.state
            .read()
            .sections
            .get(index.section())
            .and_then(|s| s.row_heights.get(index.row()).copied())
    }

    /// Header title of `section` as of the last reload.
    pub fn section_title(&self, section: usize) -> Option<String> {
        self.state
            .read()
            .sections
            .get(section)
            .and_then(|s| s.title.clone())
    }

    /// Total extent of all rows.
    pub fn content_extent(&self) -> f32 {
        self.state.read().content_extent
    }

    /// Number of reloads performed so far.
    pub fn reload_count(&self) -> usize {
        self.reloads.load(Ordering::Relaxed)
    }

    /// Asks the provider for the cell at `index`.
    pub fn cell_at(&self, index: &IndexPath) -> Option<Cell> {
        let in_bounds = self.row_height(index).is_some();
        if !in_bounds {
            return None;
        }
        self.provider().map(|provider| provider.cell(index))
    }

    // =========================================================================
    // Scrolling
    // =========================================================================

    /// Current scroll offset.
    pub fn content_offset(&self) -> f32 {
        self.state.read().content_offset
    }

    /// Sets the viewport extent. Does not report a scroll.
    pub fn set_viewport_extent(&self, extent: f32) {
        let mut state = self.state.write();
        state.viewport_extent = extent.max(0.0);
        state.content_offset = state.content_offset.min(state.max_offset());
    }

    /// Sets the leading and trailing content insets.
    pub fn set_content_insets(&self, leading: f32, trailing: f32) {
        let mut state = self.state.write();
        state.leading_inset = leading;
        state.trailing_inset = trailing;
    }

    /// Current scroll geometry.
    pub fn geometry(&self) -> ScrollGeometry {
        self.state.read().geometry()
    }

    /// Scrolls to `offset`, clamped to the scrollable range, and reports the
    /// new position to the observer.
    pub fn scroll_to(&self, offset: f32) {
        let geometry = {
            let mut state = self.state.write();
            state.content_offset = offset.clamp(0.0, state.max_offset());
            state.geometry()
        };
        tracing::trace!(target: targets::VIEW, offset = geometry.content_offset, "scrolled");

        if let Some(observer) = self.observer() {
            if observer.responds_to(Selector::DidScroll) {
                observer.did_scroll(&geometry);
            }
        }
    }

    /// Scrolls by `delta` from the current offset.
    pub fn scroll_by(&self, delta: f32) {
        self.scroll_to(self.content_offset() + delta);
    }

    /// Scrolls to the end of the content.
    pub fn scroll_to_bottom(&self) {
        let max = self.state.read().max_offset();
        self.scroll_to(max);
    }

    /// Index paths of rows with a non-zero height that intersect the viewport.
    pub fn visible_index_paths(&self) -> Vec<IndexPath> {
        let state = self.state.read();
        let top = state.content_offset;
        let bottom = top + state.viewport_extent;
        let mut visible = Vec::new();
        let mut y = 0.0;
        for (section, layout) in state.sections.iter().enumerate() {
            for (row, &height) in layout.row_heights.iter().enumerate() {
                let row_top = y;
                y += height;
                if height > 0.0 && y > top && row_top < bottom {
                    visible.push(IndexPath::new(section, row));
                }
            }
            if y >= bottom {
                break;
            }
        }
        visible
    }

    /// Materializes the visible rows, telling the observer about each one.
    pub fn visible_cells(&self) -> Vec<(IndexPath, Cell)> {
        let Some(provider) = self.provider() else {
            return Vec::new();
        };
        let observer = self
            .observer()
            .filter(|o| o.responds_to(Selector::WillDisplayCell));

        self.visible_index_paths()
            .into_iter()
            .map(|index| {
                let cell = provider.cell(&index);
                if let Some(observer) = &observer {
                    observer.will_display_cell(&cell, &index);
                }
                (index, cell)
            })
            .collect()
    }

    // =========================================================================
    // Gestures
    // =========================================================================

    /// Selects the row at `index` if its cell is selectable.
    ///
    /// Returns `true` if the row was selected.
    pub fn select(&self, index: &IndexPath) -> bool {
        let Some(cell) = self.cell_at(index) else {
            return false;
        };
        if !cell.selectable {
            return false;
        }
        if let Some(observer) = self.observer() {
            if observer.responds_to(Selector::DidSelectRow) {
                observer.did_select_row(index);
            }
        }
        self.row_selected.emit(*index);
        true
    }

    /// Completes a pull-to-refresh gesture.
    ///
    /// Returns `true` if an attached refresh control fired.
    pub fn pull_to_refresh(&self) -> bool {
        match self.refresh_control() {
            Some(control) => control.trigger(),
            None => false,
        }
    }

    // =========================================================================
    // Layout
    // =========================================================================

    fn build_layout(&self) -> Vec<SectionLayout> {
        let Some(provider) = self.provider() else {
            return Vec::new();
        };
        let observer = self
            .observer()
            .filter(|o| o.responds_to(Selector::RowHeight));
        let wants_titles = provider.responds_to(Selector::SectionTitle);

        let section_count = if provider.responds_to(Selector::SectionCount) {
            provider.section_count().unwrap_or(1)
        } else {
            1
        };

        (0..section_count)
            .map(|section| {
                let rows = provider.row_count(section);
                let row_heights = (0..rows)
                    .map(|row| {
                        observer
                            .as_ref()
                            .and_then(|o| o.row_height(&IndexPath::new(section, row)))
                            .unwrap_or(self.default_row_height)
                    })
                    .collect();
                SectionLayout {
                    title: if wants_titles {
                        provider.section_title(section)
                    } else {
                        None
                    },
                    row_heights,
                }
            })
            .collect()
    }
}

impl ListWidget for ListView {
    fn reload_data(&self) {
        let _perf = PerfSpan::new(span_names::RELOAD);

        // Collaborators may call back into this view; no lock is held here.
        let sections = self.build_layout();
        {
            let mut state = self.state.write();
            state.content_extent = sections.iter().map(SectionLayout::extent).sum();
            state.sections = sections;
            state.content_offset = state.content_offset.min(state.max_offset());
        }
        let reloads = self.reloads.fetch_add(1, Ordering::Relaxed) + 1;
        tracing::debug!(
            target: targets::VIEW,
            reloads,
            sections = self.section_count(),
            extent = self.content_extent(),
            "reloaded"
        );
        self.reloaded.emit(());
    }

    fn default_row_height(&self) -> f32 {
        self.default_row_height
    }

    fn set_content_provider(&self, provider: Weak<dyn ContentProvider>) {
        *self.provider.write() = Some(provider);
    }

    fn set_event_observer(&self, observer: Weak<dyn EventObserver>) {
        *self.observer.write() = Some(observer);
    }

    fn attach_refresh_control(&self, control: Arc<RefreshControl>) {
        *self.refresh_control.write() = Some(control);
    }
}

static_assertions::assert_impl_all!(ListView: Send, Sync);
