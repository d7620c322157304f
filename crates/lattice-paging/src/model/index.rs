//! Index paths for addressing rows in a sectioned list.
//!
//! An [`IndexPath`] identifies a row by its section and its row within that
//! section. List views, content providers and event observers all speak in
//! index paths.

use std::fmt;

/// Position of a row inside a sectioned list.
///
/// Index paths order section-first, then by row, which matches the order in
/// which a vertical list lays its rows out.
///
/// # Validity
///
/// Index paths should be used immediately and not stored long-term. After
/// the content changes (rows inserted, sections removed, a reload), a
/// previously obtained path may point somewhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct IndexPath {
    section: usize,
    row: usize,
}

impl IndexPath {
    /// Creates an index path for `row` in `section`.
    #[inline]
    pub const fn new(section: usize, row: usize) -> Self {
        Self { section, row }
    }

    /// Returns the section of this path.
    #[inline]
    pub const fn section(&self) -> usize {
        self.section
    }

    /// Returns the row within the section.
    #[inline]
    pub const fn row(&self) -> usize {
        self.row
    }

    /// Returns the path of another row in the same section.
    #[inline]
    pub const fn sibling(&self, row: usize) -> Self {
        Self::new(self.section, row)
    }
}

impl fmt::Display for IndexPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.section, self.row)
    }
}

impl From<(usize, usize)> for IndexPath {
    fn from((section, row): (usize, usize)) -> Self {
        Self::new(section, row)
    }
}
