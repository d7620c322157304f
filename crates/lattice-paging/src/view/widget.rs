//! The contract a list widget offers to the code that drives it.

use std::sync::{Arc, Weak};

use crate::model::{ContentProvider, EventObserver};

use super::refresh::RefreshControl;

/// A scrolling, sectioned list widget.
///
/// The widget holds its content provider and event observer weakly: whoever
/// installs them keeps them alive. Methods take `&self`, so implementations
/// use interior mutability and must not hold internal locks while calling
/// back into the provider or observer.
pub trait ListWidget: Send + Sync {
    /// Re-queries counts and heights and redraws.
    fn reload_data(&self);

    /// The height used for rows nobody provides a height for.
    fn default_row_height(&self) -> f32;

    /// Installs the widget's single content provider.
    fn set_content_provider(&self, provider: Weak<dyn ContentProvider>);

    /// Installs the widget's single event observer.
    fn set_event_observer(&self, observer: Weak<dyn EventObserver>);

    /// Attaches a pull-to-refresh control driven by the widget's pull gesture.
    fn attach_refresh_control(&self, control: Arc<RefreshControl>);
}
