//! The waterfall layout engine.
//!
//! A [`Waterfall`] owns one container element. On initialization it takes
//! the container's element children as its items, sorts them tallest
//! first, detaches them, injects the layout styles and registers for
//! resize and visibility events. Every layout pass throws the previous
//! columns away, creates `ceil(width / min_column_width)` fresh ones and
//! appends each item to whichever column currently measures shortest.

use waterfall_dom::events::{ListenerId, RESIZE};
use waterfall_dom::measure::Measure;
use waterfall_dom::style::inject_style;
use waterfall_dom::{Document, NodeId, Selector, TagName, Window};
use waterfall_types::config::{WaterfallConfig, WidthSource};
use waterfall_types::error::{Result, WaterfallError};

use crate::placement::{column_count, shortest_column};
use crate::snapshot::{ColumnSnapshot, LayoutSnapshot};

/// Class added to the container.
pub const CONTAINER_CLASS: &str = "waterfall__container";
/// Class of every generated column.
pub const COLUMN_CLASS: &str = "waterfall__col";
/// Dataset key holding a column's 1-based order (`data-col-order`).
pub const COLUMN_ORDER_DATA: &str = "col-order";
/// Style key of the shared base rules.
pub const BASE_STYLE_KEY: &str = "waterfall";

/// Flex rules every waterfall container relies on.
pub const BASE_STYLES: &str = "\
.waterfall__container {
  display: flex;
  flex-wrap: nowrap;
  justify-content: center;
  align-items: flex-start;
}
.waterfall__col {
  flex: 1;
}
";

/// Lifecycle of an engine. Teardown stops event handling but does not
/// return the engine to `Uninitialized`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Uninitialized,
    Ready,
}

/// Per-widget layout options.
#[derive(Debug, Clone, PartialEq)]
pub struct WaterfallOptions {
    /// Minimum column width in pixels. Must be positive.
    pub min_column_width: u32,
    /// CSS appended after [`BASE_STYLES`].
    pub extra_styles: String,
    pub width_source: WidthSource,
}

impl WaterfallOptions {
    pub fn new(min_column_width: u32, extra_styles: impl Into<String>) -> Self {
        Self {
            min_column_width,
            extra_styles: extra_styles.into(),
            width_source: WidthSource::Viewport,
        }
    }

    fn validate(&self) -> Result<()> {
        if self.min_column_width == 0 {
            return Err(WaterfallError::Config(
                "min_column_width must be positive".into(),
            ));
        }
        Ok(())
    }
}

impl From<&WaterfallConfig> for WaterfallOptions {
    fn from(config: &WaterfallConfig) -> Self {
        Self {
            min_column_width: config.min_column_width,
            extra_styles: config.extra_styles.clone(),
            width_source: config.width_source,
        }
    }
}

/// A waterfall layout bound to one container element.
#[derive(Debug)]
pub struct Waterfall<M> {
    selector: String,
    container: NodeId,
    /// Captured items, tallest first.
    items: Vec<NodeId>,
    columns: Vec<NodeId>,
    options: WaterfallOptions,
    measure: M,
    state: EngineState,
    listeners: Vec<ListenerId>,
}

impl<M: Measure> Waterfall<M> {
    /// Locate the container for `selector` without touching the document.
    pub fn new(
        document: &Document,
        selector: &str,
        options: WaterfallOptions,
        measure: M,
    ) -> Result<Self> {
        options.validate()?;
        let parsed = Selector::parse(selector)?;
        let container = document
            .query_selector(document.root, &parsed)
            .ok_or_else(|| WaterfallError::ContainerNotFound(selector.to_string()))?;
        Ok(Self {
            selector: selector.to_string(),
            container,
            items: Vec::new(),
            columns: Vec::new(),
            options,
            measure,
            state: EngineState::Uninitialized,
            listeners: Vec::new(),
        })
    }

    /// Locate the container and initialize in one step. `handler` is the
    /// value registered with the window's resize and visibility listeners.
    pub fn mount<H: Clone>(
        window: &mut Window<H>,
        selector: &str,
        options: WaterfallOptions,
        measure: M,
        handler: H,
    ) -> Result<Self> {
        let mut engine = Self::new(&window.document, selector, options, measure)?;
        engine.init(window, handler);
        Ok(engine)
    }

    /// Capture and sort the items, inject styles, lay out, and start
    /// listening. Calling it on a ready engine does nothing.
    pub fn init<H: Clone>(&mut self, window: &mut Window<H>, handler: H) {
        if self.state == EngineState::Ready {
            log::debug!("waterfall '{}' already initialized", self.selector);
            return;
        }

        self.capture_items(&mut window.document);
        self.add_styles(&mut window.document);
        self.state = EngineState::Ready;
        self.layout(window);
        self.add_listeners(window, handler);

        log::info!(
            "waterfall '{}' ready with {} items",
            self.selector,
            self.items.len()
        );
    }

    /// Sort the container's element children tallest first (measured in
    /// place), then detach them.
    fn capture_items(&mut self, doc: &mut Document) {
        let mut measured: Vec<(NodeId, u32)> = doc
            .element_children(self.container)
            .into_iter()
            .map(|id| (id, self.measure.offset_height(&*doc, id)))
            .collect();
        measured.sort_by(|a, b| b.1.cmp(&a.1));

        self.items = measured.into_iter().map(|(id, _)| id).collect();
        for &item in &self.items {
            doc.detach(item);
        }
    }

    fn add_styles(&self, doc: &mut Document) {
        if let Some(elem) = doc.element_mut(self.container) {
            elem.add_class(CONTAINER_CLASS);
        }
        inject_style(doc, BASE_STYLE_KEY, BASE_STYLES);
        if !self.options.extra_styles.trim().is_empty() {
            let key = format!("{BASE_STYLE_KEY}:{}", self.selector);
            inject_style(doc, &key, &self.options.extra_styles);
        }
    }

    fn add_listeners<H: Clone>(&mut self, window: &mut Window<H>, handler: H) {
        self.listeners
            .push(window.events.add_listener(RESIZE, handler.clone()));
        match window.visibility_api() {
            Some(api) => {
                self.listeners
                    .push(window.events.add_listener(api.event_name, handler));
            },
            None => log::debug!("host has no visibility API; listening for resize only"),
        }
    }

    /// Rebuild the columns and redistribute every item.
    pub fn layout<H>(&mut self, window: &mut Window<H>) {
        if self.state == EngineState::Uninitialized {
            log::warn!("layout on uninitialized waterfall '{}'", self.selector);
            return;
        }
        let width = self.layout_width(window);
        let doc = &mut window.document;

        self.remove_columns(doc);
        self.add_columns(doc, column_count(width, self.options.min_column_width));
        self.spread_items(doc);

        log::debug!(
            "waterfall '{}': {} items in {} columns at width {width}",
            self.selector,
            self.items.len(),
            self.columns.len()
        );
    }

    fn layout_width<H>(&self, window: &Window<H>) -> u32 {
        match self.options.width_source {
            WidthSource::Viewport => window.viewport_width,
            WidthSource::Container => self
                .measure
                .offset_width(&window.document, self.container)
                .unwrap_or(window.viewport_width),
        }
    }

    fn remove_columns(&mut self, doc: &mut Document) {
        let stale: Vec<NodeId> = doc
            .element_children(self.container)
            .into_iter()
            .filter(|&id| doc.element(id).is_some_and(|e| e.has_class(COLUMN_CLASS)))
            .collect();
        for col in stale {
            doc.release(col);
        }
        self.columns.clear();
    }

    fn add_columns(&mut self, doc: &mut Document, count: usize) {
        for order in 1..=count {
            let col = doc.create_element(TagName::Div);
            if let Some(elem) = doc.element_mut(col) {
                elem.add_class(COLUMN_CLASS);
                elem.set_data(COLUMN_ORDER_DATA, order.to_string());
            }
            doc.append_child(self.container, col);
            self.columns.push(col);
        }
    }

    fn spread_items(&self, doc: &mut Document) {
        for &item in &self.items {
            let heights: Vec<u32> = self
                .columns
                .iter()
                .map(|&col| self.measure.offset_height(&*doc, col))
                .collect();
            if let Some(index) = shortest_column(&heights) {
                doc.append_child(self.columns[index], item);
            }
        }
    }

    /// Stop reacting to resize and visibility events. The current DOM
    /// structure is left as it is. Returns the number of listeners removed.
    pub fn teardown<H: Clone>(&mut self, window: &mut Window<H>) -> usize {
        let mut removed = 0;
        for id in self.listeners.drain(..) {
            if window.events.remove_listener(id) {
                removed += 1;
            }
        }
        log::info!(
            "waterfall '{}' torn down ({removed} listeners removed)",
            self.selector
        );
        removed
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Whether the engine still has event listeners registered.
    pub fn is_listening(&self) -> bool {
        !self.listeners.is_empty()
    }

    pub fn selector(&self) -> &str {
        &self.selector
    }

    pub fn container(&self) -> NodeId {
        self.container
    }

    /// Captured items in placement order (tallest first).
    pub fn items(&self) -> &[NodeId] {
        &self.items
    }

    /// Columns of the most recent layout pass, in order.
    pub fn columns(&self) -> &[NodeId] {
        &self.columns
    }

    pub fn options(&self) -> &WaterfallOptions {
        &self.options
    }

    /// Item ids held by each column, as currently in the document.
    pub fn assignment(&self, doc: &Document) -> Vec<Vec<NodeId>> {
        self.columns
            .iter()
            .map(|&col| doc.element_children(col))
            .collect()
    }

    /// A serializable view of the current layout.
    pub fn snapshot(&self, doc: &Document) -> LayoutSnapshot {
        let columns = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, &col)| ColumnSnapshot {
                order: i + 1,
                height: self.measure.offset_height(doc, col),
                items: doc.element_children(col),
            })
            .collect();
        LayoutSnapshot {
            selector: self.selector.clone(),
            columns,
        }
    }
}
