//! Shared test fixtures: documents holding a gallery of sized items.

use waterfall_dom::measure::{BlockMeasure, Measure};
use waterfall_dom::{Document, NodeId, TagName, Window};

/// A window whose body holds `<section id="gallery">` with one
/// `<figure data-height="h">` per entry of `heights`.
///
/// Returns the window, the container and the items in document order.
pub fn gallery<H: Clone>(heights: &[u32], viewport_width: u32) -> (Window<H>, NodeId, Vec<NodeId>) {
    let mut doc = Document::with_skeleton();
    let (container, items) = add_gallery(&mut doc, "gallery", heights);
    (Window::new(doc, viewport_width), container, items)
}

/// Append a `<section id="{id}">` of sized figures to the body.
pub fn add_gallery(doc: &mut Document, id: &str, heights: &[u32]) -> (NodeId, Vec<NodeId>) {
    let body = doc.body().unwrap_or(doc.root);
    let container = doc.create_element(TagName::Section);
    if let Some(elem) = doc.element_mut(container) {
        elem.set_attribute("id", id);
    }
    doc.append_child(body, container);

    let items = heights
        .iter()
        .map(|&h| {
            let item = doc.create_element(TagName::Figure);
            if let Some(elem) = doc.element_mut(item) {
                elem.set_data("height", h.to_string());
            }
            doc.append_child(container, item);
            item
        })
        .collect();
    (container, items)
}

/// Height of an item as the default measurer sees it.
pub fn height_of(doc: &Document, id: NodeId) -> u32 {
    BlockMeasure.offset_height(doc, id)
}
