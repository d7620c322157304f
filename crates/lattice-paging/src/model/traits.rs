//! Contracts between a list view and the code that supplies its data.
//!
//! A list view talks to two collaborators:
//!
//! - a [`ContentProvider`], which answers structural questions (how many
//!   sections and rows, what a row contains), and
//! - an [`EventObserver`], which supplies behavioral overrides (row heights,
//!   whether to load more) and hears about scrolling and selection.
//!
//! Most callbacks are optional. Each optional callback is named by a
//! [`Selector`], and implementors advertise the optional callbacks they
//! actually implement through `responds_to`. Views skip callbacks nobody
//! responds to and use their own defaults instead.

use crate::view::ScrollGeometry;

use super::cell::Cell;
use super::index::IndexPath;

/// Names every callback of the list view contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Selector {
    /// `ContentProvider::section_count`
    SectionCount,
    /// `ContentProvider::row_count`
    RowCount,
    /// `ContentProvider::cell`
    Cell,
    /// `ContentProvider::section_title`
    SectionTitle,
    /// `EventObserver::row_height`
    RowHeight,
    /// `EventObserver::load_more`
    LoadMore,
    /// `EventObserver::did_scroll`
    DidScroll,
    /// `EventObserver::did_select_row`
    DidSelectRow,
    /// `EventObserver::will_display_cell`
    WillDisplayCell,
}

impl Selector {
    /// Every selector, in declaration order.
    pub const ALL: [Selector; 9] = [
        Selector::SectionCount,
        Selector::RowCount,
        Selector::Cell,
        Selector::SectionTitle,
        Selector::RowHeight,
        Selector::LoadMore,
        Selector::DidScroll,
        Selector::DidSelectRow,
        Selector::WillDisplayCell,
    ];

    /// Returns `true` for callbacks every content provider must implement.
    pub fn is_required(self) -> bool {
        matches!(self, Selector::RowCount | Selector::Cell)
    }
}

/// Supplies the structure and content of a list.
///
/// # Implementation Requirements
///
/// At minimum, implement [`row_count`](ContentProvider::row_count) and
/// [`cell`](ContentProvider::cell). If you also implement an optional
/// callback, override [`responds_to`](ContentProvider::responds_to) to say
/// so.
///
/// # Example
///
/// ```
/// use lattice_paging::model::{Cell, ContentProvider, IndexPath, Selector};
///
/// struct Fruits(Vec<&'static str>);
///
/// impl ContentProvider for Fruits {
///     fn row_count(&self, _section: usize) -> usize {
///         self.0.len()
///     }
///
///     fn cell(&self, index: &IndexPath) -> Cell {
///         Cell::new(self.0[index.row()])
///     }
/// }
///
/// let fruits = Fruits(vec!["Apple", "Banana"]);
/// assert_eq!(fruits.section_count(), None);
/// assert!(!fruits.responds_to(Selector::SectionCount));
/// ```
pub trait ContentProvider: Send + Sync {
    /// Returns the number of sections.
    ///
    /// `None` means "not reported", which views treat as one section.
    fn section_count(&self) -> Option<usize> {
        None
    }

    /// Returns the number of rows in `section`.
    fn row_count(&self, section: usize) -> usize;

    /// Returns the content of the row at `index`.
    fn cell(&self, index: &IndexPath) -> Cell;

    /// Returns the header title for `section`, if any.
    fn section_title(&self, _section: usize) -> Option<String> {
        None
    }

    /// Returns `true` if this provider implements the callback named by
    /// `selector`.
    ///
    /// The default reports only the required callbacks.
    fn responds_to(&self, selector: Selector) -> bool {
        selector.is_required()
    }
}

/// Supplies behavioral overrides and receives list events.
///
/// Every callback is optional. Override
/// [`responds_to`](EventObserver::responds_to) for the ones you implement.
pub trait EventObserver: Send + Sync {
    /// Returns a custom height for the row at `index`.
    ///
    /// `None` keeps the view's default row height.
    fn row_height(&self, _index: &IndexPath) -> Option<f32> {
        None
    }

    /// Asked whether a load should start.
    ///
    /// `more` is `true` when the list reached its end and wants the next
    /// page, `false` when the user asked for a refresh. Return `true` if a
    /// load was started; the loader must later end it by stopping the
    /// mediator. A load that completes before returning may stop the
    /// mediator from inside this call. The default declines.
    fn load_more(&self, _more: bool) -> bool {
        false
    }

    /// Called every time the scroll position changes.
    fn did_scroll(&self, _geometry: &ScrollGeometry) {}

    /// Called when the user selects a row.
    fn did_select_row(&self, _index: &IndexPath) {}

    /// Called just before a row's cell becomes visible.
    fn will_display_cell(&self, _cell: &Cell, _index: &IndexPath) {}

    /// Returns `true` if this observer implements the callback named by
    /// `selector`.
    fn responds_to(&self, _selector: Selector) -> bool {
        false
    }
}
