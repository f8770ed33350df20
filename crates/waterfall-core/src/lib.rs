//! Waterfall (masonry) layout engine.
//!
//! Distributes a container's children across a responsive number of
//! columns so that column heights stay balanced, and re-flows them when the
//! viewport is resized or the document's visibility changes.
//!
//! - [`engine`]: the [`Waterfall`] widget bound to one container.
//! - [`placement`]: pure column count and greedy shortest-column placement.
//! - [`page`]: the [`Page`] driver with the registration entry point.
//! - [`snapshot`]: serializable layout views.

pub mod engine;
pub mod page;
pub mod placement;
pub mod snapshot;

#[cfg(test)]
pub(crate) mod test_utils;

pub use engine::{EngineState, Waterfall, WaterfallOptions};
pub use page::{Page, WidgetId};
pub use snapshot::{ColumnSnapshot, LayoutSnapshot};

// Re-exports so embedders only need this crate.
pub use waterfall_dom as dom;
pub use waterfall_types::config;
pub use waterfall_types::error;
