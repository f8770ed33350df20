//! Global style block injection.
//!
//! Style blocks are `<style>` elements appended to the end of `<body>` and
//! tagged with a `data-style-key` attribute. The key identifies the
//! component that owns the block, and a key is only ever inserted once per
//! document. The CSS text is stored verbatim.

use crate::dom::{Document, NodeId, NodeKind, TagName};

/// Dataset key (`data-style-key`) carrying a style block's owner.
pub const STYLE_KEY_DATA: &str = "style-key";

/// Find the style block previously injected under `key`.
pub fn find_style(doc: &Document, key: &str) -> Option<NodeId> {
    doc.descendants(doc.root).into_iter().find(|&id| {
        doc.element(id)
            .is_some_and(|e| e.tag == TagName::Style && e.data(STYLE_KEY_DATA) == Some(key))
    })
}

/// Inject `css` under `key`, unless a block with that key already exists.
///
/// Returns the style element's node and whether it was newly inserted.
pub fn inject_style(doc: &mut Document, key: &str, css: &str) -> (NodeId, bool) {
    if let Some(existing) = find_style(doc, key) {
        log::trace!("style block '{key}' already present");
        return (existing, false);
    }

    let style = doc.create_element(TagName::Style);
    if let Some(elem) = doc.element_mut(style) {
        elem.set_data(STYLE_KEY_DATA, key);
    }
    let text = doc.create_text(css);
    doc.append_child(style, text);

    let parent = doc.body().unwrap_or(doc.root);
    doc.append_child(parent, style);
    log::debug!("injected style block '{key}' ({} bytes)", css.len());
    (style, true)
}

/// The CSS text of a style element.
pub fn style_text(doc: &Document, style: NodeId) -> String {
    doc.children(style)
        .iter()
        .filter_map(|&c| match &doc.get(c).kind {
            NodeKind::Text(s) => Some(s.as_str()),
            _ => None,
        })
        .collect()
}

/// Every injected style block as `(key, css)`, in document order.
pub fn injected_styles(doc: &Document) -> Vec<(String, String)> {
    doc.descendants(doc.root)
        .into_iter()
        .filter_map(|id| {
            let key = doc.element(id)?.data(STYLE_KEY_DATA)?.to_string();
            Some((key, style_text(doc, id)))
        })
        .collect()
}
