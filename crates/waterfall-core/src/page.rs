//! Page driver: widget registration and host event dispatch.
//!
//! [`Page`] plays the role of the host event loop. It owns the window and
//! every registered widget, defers registrations until the document has
//! loaded, and routes resize and visibility events to the widgets whose
//! listeners are registered for them.

use waterfall_dom::events::{HostEvent, RESIZE};
use waterfall_dom::measure::{BlockMeasure, Measure};
use waterfall_dom::{Document, Window};
use waterfall_types::config::WaterfallConfig;
use waterfall_types::error::WaterfallError;

use crate::engine::{Waterfall, WaterfallOptions};
use crate::snapshot::LayoutSnapshot;

/// Handle of a registered widget. Also the value the widget's listeners
/// carry in the window's event registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WidgetId(usize);

/// Lifecycle of a registration.
#[derive(Debug)]
enum Slot<M> {
    /// Registered before the document loaded.
    Pending {
        selector: String,
        options: WaterfallOptions,
    },
    Mounted(Waterfall<M>),
    /// Mounting failed; the registration is a no-op.
    Failed,
}

/// A document plus the waterfall widgets laid out in it.
#[derive(Debug)]
pub struct Page<M = BlockMeasure> {
    window: Window<WidgetId>,
    measure: M,
    slots: Vec<Slot<M>>,
}

impl Page<BlockMeasure> {
    /// A page over `document` measured with [`BlockMeasure`].
    pub fn with_document(document: Document, viewport_width: u32) -> Self {
        Self::new(Window::new(document, viewport_width), BlockMeasure)
    }
}

impl<M: Measure + Clone> Page<M> {
    pub fn new(window: Window<WidgetId>, measure: M) -> Self {
        Self {
            window,
            measure,
            slots: Vec::new(),
        }
    }

    /// Register a waterfall for the element matching `selector`.
    ///
    /// Before the document has loaded the registration is queued and
    /// mounted on [`HostEvent::DomContentLoaded`]. A selector that matches
    /// nothing leaves the page untouched.
    pub fn register(
        &mut self,
        selector: &str,
        min_column_width: u32,
        extra_styles: &str,
    ) -> WidgetId {
        self.register_with(selector, WaterfallOptions::new(min_column_width, extra_styles))
    }

    /// Register a waterfall described by a configuration.
    pub fn register_config(&mut self, config: &WaterfallConfig) -> WidgetId {
        self.register_with(&config.selector, WaterfallOptions::from(config))
    }

    fn register_with(&mut self, selector: &str, options: WaterfallOptions) -> WidgetId {
        let id = WidgetId(self.slots.len());
        self.slots.push(Slot::Pending {
            selector: selector.to_string(),
            options,
        });
        if self.window.is_ready() {
            self.mount(id);
        } else {
            log::debug!("queued waterfall '{selector}' until the document loads");
        }
        id
    }

    fn mount(&mut self, id: WidgetId) {
        if !self.is_pending(id) {
            return;
        }
        let Slot::Pending { selector, options } =
            std::mem::replace(&mut self.slots[id.0], Slot::Failed)
        else {
            return;
        };

        self.slots[id.0] = match Waterfall::mount(
            &mut self.window,
            &selector,
            options,
            self.measure.clone(),
            id,
        ) {
            Ok(engine) => Slot::Mounted(engine),
            Err(WaterfallError::ContainerNotFound(sel)) => {
                log::warn!("waterfall container '{sel}' not found; skipping");
                Slot::Failed
            },
            Err(e) => {
                log::warn!("waterfall '{selector}' not mounted: {e}");
                Slot::Failed
            },
        };
    }

    /// Feed a host event to the page. Returns how many widgets re-ran
    /// their layout.
    pub fn dispatch(&mut self, event: HostEvent) -> usize {
        match event {
            HostEvent::DomContentLoaded => {
                self.dom_content_loaded();
                0
            },
            HostEvent::Resize { width } => {
                self.window.viewport_width = width;
                self.fire(RESIZE)
            },
            HostEvent::VisibilityChange { hidden } => {
                self.window.hidden = hidden;
                match self.window.visibility_api() {
                    Some(api) => self.fire(api.event_name),
                    None => 0,
                }
            },
        }
    }

    /// Mark the document loaded and mount every queued registration.
    pub fn dom_content_loaded(&mut self) {
        if !self.window.mark_ready() {
            return;
        }
        for index in 0..self.slots.len() {
            self.mount(WidgetId(index));
        }
    }

    fn fire(&mut self, event: &str) -> usize {
        let targets = self.window.events.listeners_for(event);
        for id in &targets {
            if let Some(Slot::Mounted(engine)) = self.slots.get_mut(id.0) {
                engine.layout(&mut self.window);
            }
        }
        targets.len()
    }

    /// Stop a widget from reacting to events. Returns `false` if the widget
    /// was never mounted.
    pub fn teardown(&mut self, id: WidgetId) -> bool {
        match self.slots.get_mut(id.0) {
            Some(Slot::Mounted(engine)) => {
                engine.teardown(&mut self.window);
                true
            },
            _ => false,
        }
    }

    /// The mounted widget for `id`, if any.
    pub fn widget(&self, id: WidgetId) -> Option<&Waterfall<M>> {
        match self.slots.get(id.0)? {
            Slot::Mounted(engine) => Some(engine),
            _ => None,
        }
    }

    /// Whether the registration is still waiting for the document to load.
    pub fn is_pending(&self, id: WidgetId) -> bool {
        matches!(self.slots.get(id.0), Some(Slot::Pending { .. }))
    }

    /// Snapshots of every mounted widget, in registration order.
    pub fn snapshots(&self) -> Vec<LayoutSnapshot> {
        self.slots
            .iter()
            .filter_map(|slot| match slot {
                Slot::Mounted(engine) => Some(engine.snapshot(&self.window.document)),
                _ => None,
            })
            .collect()
    }

    pub fn window(&self) -> &Window<WidgetId> {
        &self.window
    }

    /// Mutable access to the host window, e.g. to edit the document
    /// between events.
    pub fn window_mut(&mut self) -> &mut Window<WidgetId> {
        &mut self.window
    }

    pub fn document(&self) -> &Document {
        &self.window.document
    }
}

#[cfg(test)]
mod tests {
    use waterfall_dom::NodeId;
    use waterfall_dom::events::HostFeatures;
    use waterfall_dom::style::injected_styles;

    use super::*;
    use crate::test_utils::{add_gallery, gallery};

    fn page(heights: &[u32], width: u32) -> (Page, NodeId, Vec<NodeId>) {
        let (window, container, items) = gallery(heights, width);
        (Page::new(window, BlockMeasure), container, items)
    }

    /// Document mutation signature: container children and their children.
    fn structure(page: &Page, container: NodeId) -> Vec<Vec<NodeId>> {
        let doc = page.document();
        doc.element_children(container)
            .into_iter()
            .map(|col| doc.element_children(col))
            .collect()
    }

    #[test]
    fn registration_waits_for_dom_content_loaded() {
        let (mut page, container, items) = page(&[300, 100, 200], 1000);
        let id = page.register("#gallery", 500, "");
        assert!(page.is_pending(id));
        assert!(page.widget(id).is_none());
        assert_eq!(page.document().element_children(container), items);

        page.dispatch(HostEvent::DomContentLoaded);
        assert!(!page.is_pending(id));
        let widget = page.widget(id).unwrap();
        assert_eq!(widget.columns().len(), 2);
        assert_eq!(
            structure(&page, container),
            vec![vec![items[0]], vec![items[2], items[1]]]
        );
    }

    #[test]
    fn registration_after_load_mounts_immediately() {
        let (mut page, _, _) = page(&[10, 20], 1000);
        page.dom_content_loaded();
        let id = page.register("#gallery", 500, "");
        assert!(page.widget(id).is_some());
    }

    #[test]
    fn dom_content_loaded_fires_once() {
        let (mut page, _, _) = page(&[10, 20], 1000);
        let id = page.register("#gallery", 500, "");
        page.dom_content_loaded();
        let columns = page.widget(id).unwrap().columns().to_vec();
        page.dom_content_loaded();
        assert_eq!(page.widget(id).unwrap().columns(), columns.as_slice());
    }

    #[test]
    fn missing_container_is_silent_noop() {
        let (mut page, container, items) = page(&[10, 20], 1000);
        let id = page.register(".does-not-exist", 500, "");
        page.dispatch(HostEvent::DomContentLoaded);

        assert!(page.widget(id).is_none());
        assert!(!page.is_pending(id));
        assert!(page.window().events.is_empty());
        assert!(injected_styles(page.document()).is_empty());
        assert_eq!(page.document().element_children(container), items);
        assert_eq!(page.dispatch(HostEvent::Resize { width: 400 }), 0);
    }

    #[test]
    fn invalid_selector_is_silent_noop() {
        let (mut page, _, _) = page(&[10], 1000);
        page.dom_content_loaded();
        let id = page.register("div,,", 500, "");
        assert!(page.widget(id).is_none());
    }

    #[test]
    fn resize_relayouts_with_new_width() {
        let (mut page, container, _) = page(&[50, 40, 30, 20], 1000);
        let id = page.register("#gallery", 250, "");
        page.dom_content_loaded();
        assert_eq!(page.widget(id).unwrap().columns().len(), 4);

        assert_eq!(page.dispatch(HostEvent::Resize { width: 500 }), 1);
        assert_eq!(page.window().viewport_width, 500);
        assert_eq!(page.widget(id).unwrap().columns().len(), 2);
        assert_eq!(page.document().element_children(container).len(), 2);
    }

    #[test]
    fn visibility_change_relayouts() {
        let (mut page, _, _) = page(&[50, 40], 1000);
        page.register("#gallery", 500, "");
        page.dom_content_loaded();
        assert_eq!(page.dispatch(HostEvent::VisibilityChange { hidden: true }), 1);
        assert!(page.window().hidden);
    }

    #[test]
    fn visibility_api_is_fixed_at_load() {
        let (mut page, _, _) = page(&[50, 40], 1000);
        page.register("#gallery", 500, "");
        page.dom_content_loaded();

        let webkit = HostFeatures::with_properties(["webkitHidden"]);
        assert!(!page.window_mut().set_features(webkit));
        assert_eq!(page.dispatch(HostEvent::VisibilityChange { hidden: true }), 1);
        assert_eq!(page.dispatch(HostEvent::VisibilityChange { hidden: false }), 1);
    }

    #[test]
    fn repeated_resizes_reuse_column_nodes() {
        let (mut page, container, _) = page(&[30, 20, 10], 1000);
        page.register("#gallery", 100, "");
        page.dom_content_loaded();
        let arena = page.document().nodes.len();

        for round in 0..500u32 {
            page.dispatch(HostEvent::Resize {
                width: 1000 + round % 2,
            });
        }
        page.dispatch(HostEvent::Resize { width: 1000 });

        // 1001px needs one more column than 1000px.
        assert_eq!(page.document().nodes.len(), arena + 1);
        assert_eq!(page.document().live_nodes(), arena);
        assert_eq!(page.document().element_children(container).len(), 10);
    }

    #[test]
    fn visibility_change_without_api_does_nothing() {
        let (mut window, _, _) = gallery(&[50, 40], 1000);
        window.set_features(HostFeatures::default());
        let mut page = Page::new(window, BlockMeasure);
        page.register("#gallery", 500, "");
        page.dom_content_loaded();
        assert_eq!(page.window().events.len(), 1);
        assert_eq!(page.dispatch(HostEvent::VisibilityChange { hidden: true }), 0);
        assert!(page.window().hidden);
    }

    #[test]
    fn teardown_stops_mutation_on_resize() {
        let (mut page, container, _) = page(&[50, 40, 30], 1000);
        let id = page.register("#gallery", 250, "");
        page.dom_content_loaded();
        let before = structure(&page, container);

        assert!(page.teardown(id));
        assert_eq!(page.dispatch(HostEvent::Resize { width: 300 }), 0);
        assert_eq!(structure(&page, container), before);
        assert!(page.widget(id).is_some());
    }

    #[test]
    fn teardown_of_unmounted_widget() {
        let (mut page, _, _) = page(&[10], 1000);
        let id = page.register("#gallery", 500, "");
        assert!(!page.teardown(id));
    }

    #[test]
    fn widgets_are_independent() {
        let (mut window, _, first_items) = gallery(&[10, 20, 30], 900);
        let (_, second_items) = add_gallery(&mut window.document, "second", &[5, 5]);
        let mut page = Page::new(window, BlockMeasure);
        let a = page.register("#gallery", 300, ".a {}");
        let b = page.register("#second", 450, ".b {}");
        page.dom_content_loaded();

        assert_eq!(page.widget(a).unwrap().columns().len(), 3);
        assert_eq!(page.widget(b).unwrap().columns().len(), 2);
        assert_eq!(page.dispatch(HostEvent::Resize { width: 450 }), 2);

        let snaps = page.snapshots();
        assert_eq!(snaps.len(), 2);
        assert_eq!(snaps[0].item_count(), first_items.len());
        assert_eq!(snaps[1].item_count(), second_items.len());
        // Base rules once, plus one block of extra rules per widget.
        assert_eq!(injected_styles(page.document()).len(), 3);

        page.teardown(a);
        assert_eq!(page.dispatch(HostEvent::Resize { width: 900 }), 1);
    }

    #[test]
    fn register_from_config() {
        let (mut page, _, _) = page(&[10, 20, 30, 40], 1200);
        let config = WaterfallConfig {
            selector: "#gallery".into(),
            min_column_width: 400,
            ..WaterfallConfig::default()
        };
        let id = page.register_config(&config);
        page.dom_content_loaded();
        assert_eq!(page.widget(id).unwrap().columns().len(), 3);
    }

    #[test]
    fn zero_min_width_is_not_mounted() {
        let (mut page, _, _) = page(&[10], 1000);
        page.dom_content_loaded();
        let id = page.register("#gallery", 0, "");
        assert!(page.widget(id).is_none());
    }

    #[test]
    fn with_document_constructor() {
        let page = Page::with_document(Document::with_skeleton(), 640);
        assert_eq!(page.window().viewport_width, 640);
        assert!(!page.window().is_ready());
        assert!(page.snapshots().is_empty());
    }
}
