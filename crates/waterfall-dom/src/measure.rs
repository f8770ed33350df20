//! Box measurement.
//!
//! The layout engine reads heights back from the host after every
//! placement, so a [`Measure`] implementation must reflect the current
//! tree: a column queried right after an append reports the appended
//! item's height.

use crate::dom::{Document, ElementData, NodeId};

/// Reads rendered box sizes from the host.
pub trait Measure {
    /// Border-box height of `node` in pixels. Text and detached nodes are
    /// measured like any other subtree.
    fn offset_height(&self, doc: &Document, node: NodeId) -> u32;

    /// Declared width of `node`, or `None` if it sizes to its parent.
    fn offset_width(&self, doc: &Document, node: NodeId) -> Option<u32>;
}

/// Analytic block-flow measurer.
///
/// An element with a declared height (`style="height: 120px"` or
/// `data-height="120"`) measures that height. Any other element stacks its
/// element children vertically, so its height is their sum. Text nodes
/// measure zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockMeasure;

impl Measure for BlockMeasure {
    fn offset_height(&self, doc: &Document, node: NodeId) -> u32 {
        let Some(elem) = doc.element(node) else {
            return 0;
        };
        if let Some(h) = declared_size(elem, "height") {
            return h;
        }
        doc.children(node)
            .iter()
            .map(|&c| self.offset_height(doc, c))
            .fold(0u32, u32::saturating_add)
    }

    fn offset_width(&self, doc: &Document, node: NodeId) -> Option<u32> {
        declared_size(doc.element(node)?, "width")
    }
}

/// A size declared through the inline style or the matching `data-*`
/// attribute. The inline style wins.
fn declared_size(elem: &ElementData, property: &str) -> Option<u32> {
    elem.get_attribute("style")
        .and_then(|style| inline_px(style, property))
        .or_else(|| elem.data(property).and_then(parse_px))
}

/// Find `property: <n>px` in an inline style declaration list.
fn inline_px(style: &str, property: &str) -> Option<u32> {
    style.split(';').rev().find_map(|decl| {
        let (name, value) = decl.split_once(':')?;
        if name.trim().eq_ignore_ascii_case(property) {
            parse_px(value)
        } else {
            None
        }
    })
}

/// Parse `120`, `120px` or `120.6px` into whole pixels.
fn parse_px(value: &str) -> Option<u32> {
    let value = value.trim();
    let number = value.strip_suffix("px").unwrap_or(value).trim();
    let px: f32 = number.parse().ok()?;
    (px.is_finite() && px >= 0.0).then(|| px.round() as u32)
}
