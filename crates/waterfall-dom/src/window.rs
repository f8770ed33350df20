//! The host window: document, viewport and event listeners.

use crate::dom::Document;
use crate::events::{EventTarget, HostFeatures, VisibilityApi};

/// Default viewport width for a freshly created window.
pub const DEFAULT_VIEWPORT_WIDTH: u32 = 1024;

/// Everything a widget can observe about its host.
///
/// `H` identifies listeners registered on the window.
#[derive(Debug, Clone)]
pub struct Window<H> {
    pub document: Document,
    /// Client width of the document body in pixels.
    pub viewport_width: u32,
    /// Value of the document's `hidden` property (whatever its prefix).
    pub hidden: bool,
    pub events: EventTarget<H>,
    features: HostFeatures,
    /// Detected once from `features`; widgets and the event loop share it.
    visibility: Option<VisibilityApi>,
    ready: bool,
}

impl<H: Clone> Window<H> {
    /// A window around `document` with the standard visibility API.
    pub fn new(document: Document, viewport_width: u32) -> Self {
        Self::with_features(document, viewport_width, HostFeatures::standard())
    }

    pub fn with_features(document: Document, viewport_width: u32, features: HostFeatures) -> Self {
        Self {
            document,
            viewport_width,
            hidden: false,
            events: EventTarget::new(),
            visibility: VisibilityApi::detect(&features),
            features,
            ready: false,
        }
    }

    /// Whether `DOMContentLoaded` has fired.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Mark the document as loaded. Returns `false` if it already was.
    pub fn mark_ready(&mut self) -> bool {
        !std::mem::replace(&mut self.ready, true)
    }

    pub fn features(&self) -> &HostFeatures {
        &self.features
    }

    /// Replace the host features and detect the visibility API again.
    ///
    /// Only allowed before the document has loaded, since widgets register
    /// their listeners under the detected event name. Returns `false` and
    /// keeps the current features once the window is ready.
    pub fn set_features(&mut self, features: HostFeatures) -> bool {
        if self.ready {
            log::warn!("host features are fixed once the document has loaded");
            return false;
        }
        self.visibility = VisibilityApi::detect(&features);
        self.features = features;
        true
    }

    /// The visibility API this host supports, if any.
    pub fn visibility_api(&self) -> Option<VisibilityApi> {
        self.visibility
    }
}

impl<H: Clone> Default for Window<H> {
    fn default() -> Self {
        Self::new(Document::with_skeleton(), DEFAULT_VIEWPORT_WIDTH)
    }
}
