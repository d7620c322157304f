//! Scroll geometry reported by list views.

/// A snapshot of a list view's scroll state along its scrolling axis.
///
/// All values are in view units. Insets are the padding the view keeps
/// before the first row and after the last one.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollGeometry {
    /// How far the content is scrolled past its origin.
    pub content_offset: f32,
    /// Total extent of the content.
    pub content_extent: f32,
    /// Extent of the visible viewport.
    pub viewport_extent: f32,
    /// Inset before the first row.
    pub leading_inset: f32,
    /// Inset after the last row.
    pub trailing_inset: f32,
}

impl ScrollGeometry {
    /// Creates a geometry without insets.
    pub fn new(content_offset: f32, content_extent: f32, viewport_extent: f32) -> Self {
        Self {
            content_offset,
            content_extent,
            viewport_extent,
            leading_inset: 0.0,
            trailing_inset: 0.0,
        }
    }

    /// Sets the leading and trailing insets.
    pub fn with_insets(mut self, leading: f32, trailing: f32) -> Self {
        self.leading_inset = leading;
        self.trailing_inset = trailing;
        self
    }

    /// Content still hidden past the trailing edge of the viewport.
    ///
    /// Negative insets count as zero. Zero or less means the viewport has
    /// reached the end of the content.
    #[inline]
    pub fn remaining(&self) -> f32 {
        self.content_extent
            - self.content_offset
            - self.viewport_extent
            - self.leading_inset.max(0.0)
            - self.trailing_inset.max(0.0)
    }

    /// Returns `true` if the content is scrolled past its origin.
    #[inline]
    pub fn is_scrolled(&self) -> bool {
        self.content_offset > 0.0
    }
}
