//! Demo page description and document construction.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use waterfall_core::config::WaterfallConfig;
use waterfall_core::dom::selector::SimpleSelector;
use waterfall_core::dom::{Document, NodeId, Selector, TagName};

/// A demo page: one widget, its items and the viewport widths to replay.
#[derive(Debug, Clone, Deserialize)]
pub struct DemoConfig {
    #[serde(flatten)]
    pub waterfall: WaterfallConfig,
    #[serde(default = "default_viewport_width")]
    pub viewport_width: u32,
    #[serde(default = "default_item_heights")]
    pub item_heights: Vec<u32>,
    #[serde(default)]
    pub resizes: Vec<u32>,
}

fn default_viewport_width() -> u32 {
    1280
}
fn default_item_heights() -> Vec<u32> {
    vec![300, 100, 200]
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            waterfall: WaterfallConfig::default(),
            viewport_width: default_viewport_width(),
            item_heights: default_item_heights(),
            resizes: Vec::new(),
        }
    }
}

impl DemoConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: Self =
            toml::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
        config.waterfall.validate()?;
        Ok(config)
    }

    /// Build a document whose body holds the container named by the
    /// configured selector, filled with one item per configured height.
    pub fn build_document(&self) -> Result<Document> {
        let mut doc = Document::with_skeleton();
        let body = doc.body().context("skeleton document has no body")?;
        let container = container_for(&mut doc, &self.waterfall.selector)?;
        doc.append_child(body, container);

        for (i, &height) in self.item_heights.iter().enumerate() {
            let item = doc.create_element(TagName::Figure);
            if let Some(elem) = doc.element_mut(item) {
                elem.set_attribute("id", format!("item-{i}"));
                elem.set_data("height", height.to_string());
            }
            doc.append_child(container, item);
        }
        Ok(doc)
    }
}

/// Create an element matched by the subject of `selector`.
fn container_for(doc: &mut Document, selector: &str) -> Result<NodeId> {
    let parsed = Selector::parse(selector)?;
    let (subject, _) = parsed
        .parts
        .last()
        .context("selector has no subject")?;

    let mut tag = TagName::Div;
    let mut id = None;
    let mut classes = Vec::new();
    for part in &subject.parts {
        match part {
            SimpleSelector::Type(name) => tag = TagName::from_str(name),
            SimpleSelector::Id(name) => id = Some(name.clone()),
            SimpleSelector::Class(name) => classes.push(name.clone()),
            SimpleSelector::Universal => {},
        }
    }

    let container = doc.create_element(tag);
    if let Some(elem) = doc.element_mut(container) {
        if let Some(id) = id {
            elem.set_attribute("id", id);
        }
        for class in &classes {
            elem.add_class(class);
        }
    }
    Ok(container)
}
