//! The extra section that hosts the loading row.

/// Tracks the index of the section appended after all real content.
///
/// The index is recorded by [`section_count`](Self::section_count) and stays
/// valid until the content structure changes; the next count query records
/// it again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyntheticSection {
    index: Option<usize>,
}

impl SyntheticSection {
    /// Creates an injector that has not been asked for a count yet.
    pub const fn new() -> Self {
        Self { index: None }
    }

    /// Returns the section count including the synthetic section.
    ///
    /// `real` is what the content provider reported; `None` counts as one
    /// section. Records the synthetic index, which equals the real count.
    pub fn section_count(&mut self, real: Option<usize>) -> usize {
        let mut count = real.unwrap_or(1);
        self.index = Some(count);
        count += 1;
        count
    }

    /// The synthetic section's index from the last count query.
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Returns `true` if `section` is the synthetic section.
    pub fn contains(&self, section: usize) -> bool {
        self.index == Some(section)
    }

    /// Number of rows in the synthetic section.
    pub const fn row_count(&self) -> usize {
        1
    }

    /// Height of the loading row: `height` when shown, collapsed otherwise.
    pub fn row_height(&self, visible: bool, height: f32) -> f32 {
        if visible { height } else { 0.0 }
    }
}
