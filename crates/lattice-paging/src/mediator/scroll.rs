//! Automatic "load more" when the viewport reaches the end of the content.

use crate::view::ScrollGeometry;

/// Decides when a scroll position should start loading the next page.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollThresholdTrigger {
    /// Fire this far before the end. Zero fires only at the end.
    prefetch_distance: f32,
}

impl ScrollThresholdTrigger {
    /// Creates a trigger that fires `prefetch_distance` before the end.
    pub fn new(prefetch_distance: f32) -> Self {
        Self {
            prefetch_distance: prefetch_distance.max(0.0),
        }
    }

    /// Returns `true` if `geometry` calls for loading more.
    ///
    /// Never fires while the indicator is shown, so an outstanding load or
    /// an active refresh is not triggered twice. Only fires once the content
    /// has been scrolled past its origin.
    #[inline]
    pub fn should_trigger(&self, geometry: &ScrollGeometry, indicator_visible: bool) -> bool {
        !indicator_visible
            && geometry.is_scrolled()
            && geometry.remaining() <= self.prefetch_distance
    }
}
