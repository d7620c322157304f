//! View-side contracts and the headless list view.
//!
//! - `ListWidget`: What a list widget offers to the code driving it
//! - `ScrollGeometry`: Scroll position snapshot passed to observers
//! - `RefreshControl`: The pull-to-refresh control
//! - `ListView`: A headless `ListWidget` implementation

mod geometry;
mod list_view;
mod refresh;
mod widget;

pub use geometry::ScrollGeometry;
pub use list_view::{DEFAULT_ROW_HEIGHT, ListView};
pub use refresh::RefreshControl;
pub use widget::ListWidget;
