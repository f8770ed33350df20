//! Waterfall demo entry point.
//!
//! Builds a page from a TOML description, registers a waterfall widget,
//! fires `DOMContentLoaded`, replays the configured resizes and a
//! visibility change, and prints a JSON snapshot after each event.
//!
//! Usage: `waterfall-app [config.toml]` (or set `WATERFALL_CONFIG`).

mod demo;

use std::path::PathBuf;

use anyhow::Result;

use demo::DemoConfig;
use waterfall_core::Page;
use waterfall_core::dom::HostEvent;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config_path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("WATERFALL_CONFIG").ok())
        .map(PathBuf::from);
    let config = match &config_path {
        Some(path) => DemoConfig::load(path)?,
        None => DemoConfig::default(),
    };
    log::info!(
        "Starting waterfall demo ({} items, viewport {}px)",
        config.item_heights.len(),
        config.viewport_width,
    );

    let document = config.build_document()?;
    let mut page = Page::with_document(document, config.viewport_width);
    page.register_config(&config.waterfall);

    let mut events = vec![HostEvent::DomContentLoaded];
    events.extend(config.resizes.iter().map(|&width| HostEvent::Resize { width }));
    events.push(HostEvent::VisibilityChange { hidden: false });

    for event in events {
        let relayouts = page.dispatch(event);
        log::info!("{event:?}: {relayouts} widget(s) re-laid out");
        for snapshot in page.snapshots() {
            log::info!(
                "{} columns, imbalance {}px",
                snapshot.columns.len(),
                snapshot.imbalance()
            );
            println!("{}", snapshot.to_json()?);
        }
    }
    Ok(())
}
