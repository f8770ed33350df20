//! Host events, listener registration and visibility feature detection.

/// Name of the window resize event.
pub const RESIZE: &str = "resize";

/// An event delivered by the host event loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    /// The document finished parsing (`DOMContentLoaded`).
    DomContentLoaded,
    /// The viewport changed width.
    Resize { width: u32 },
    /// The document became hidden or visible.
    VisibilityChange { hidden: bool },
}

/// Handle returned by [`EventTarget::add_listener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

#[derive(Debug, Clone)]
struct Listener<H> {
    id: ListenerId,
    event: String,
    handler: H,
}

/// Listener registry keyed by event name.
///
/// `H` identifies whoever should be notified. Listeners are reported in
/// registration order.
#[derive(Debug, Clone)]
pub struct EventTarget<H> {
    next_id: u64,
    listeners: Vec<Listener<H>>,
}

impl<H> Default for EventTarget<H> {
    fn default() -> Self {
        Self {
            next_id: 0,
            listeners: Vec::new(),
        }
    }
}

impl<H: Clone> EventTarget<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `event`.
    pub fn add_listener(&mut self, event: &str, handler: H) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push(Listener {
            id,
            event: event.to_string(),
            handler,
        });
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|l| l.id != id);
        self.listeners.len() != before
    }

    /// Handlers registered for `event`, in registration order.
    pub fn listeners_for(&self, event: &str) -> Vec<H> {
        self.listeners
            .iter()
            .filter(|l| l.event == event)
            .map(|l| l.handler.clone())
            .collect()
    }

    /// Total number of registered listeners.
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

// -------------------------------------------------------------------
// Visibility API detection
// -------------------------------------------------------------------

/// Document properties the host exposes. Used for feature detection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostFeatures {
    properties: Vec<String>,
}

impl HostFeatures {
    /// A host that exposes the given document properties.
    pub fn with_properties<I, S>(props: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            properties: props.into_iter().map(Into::into).collect(),
        }
    }

    /// A current engine with the unprefixed Page Visibility API.
    pub fn standard() -> Self {
        Self::with_properties(["hidden"])
    }

    /// Whether the document exposes `property`.
    pub fn supports(&self, property: &str) -> bool {
        self.properties.iter().any(|p| p == property)
    }
}

/// The normalized Page Visibility API of a host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityApi {
    /// Document property reporting whether the page is hidden.
    pub hidden_property: &'static str,
    /// Event fired when that property changes.
    pub event_name: &'static str,
}

/// Known visibility APIs, most preferred first.
const VISIBILITY_APIS: [VisibilityApi; 4] = [
    VisibilityApi {
        hidden_property: "hidden",
        event_name: "visibilitychange",
    },
    VisibilityApi {
        hidden_property: "msHidden",
        event_name: "msvisibilitychange",
    },
    VisibilityApi {
        hidden_property: "webkitHidden",
        event_name: "webkitvisibilitychange",
    },
    VisibilityApi {
        hidden_property: "mozHidden",
        event_name: "mozvisibilitychange",
    },
];

impl VisibilityApi {
    /// Pick the first visibility API the host supports, or `None` for hosts
    /// without one.
    pub fn detect(features: &HostFeatures) -> Option<Self> {
        VISIBILITY_APIS
            .iter()
            .copied()
            .find(|api| features.supports(api.hidden_property))
    }
}
