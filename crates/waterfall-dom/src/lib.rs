//! Host document model for the waterfall layout engine.
//!
//! Provides the pieces of a browser host the widget consumes: an arena
//! DOM with selector queries, class and dataset mutation, keyed style
//! block injection, box measurement, and window events with Page
//! Visibility feature detection.

pub mod dom;
pub mod events;
pub mod measure;
pub mod selector;
pub mod style;
pub mod window;

pub use dom::{Document, NodeId, TagName};
pub use events::{EventTarget, HostEvent, HostFeatures, ListenerId, VisibilityApi};
pub use measure::{BlockMeasure, Measure};
pub use selector::Selector;
pub use window::Window;
