use url::Url;

use crate::config::TrackerConfig;
use crate::engine::dispatcher::{ClickRouter, PageRouter};
use crate::engine::state::{Outbound, TrackerState};
use crate::error::Result;
use crate::extract::inventory::parse_inventory;

pub fn register(pages: &mut PageRouter, clicks: &mut ClickRouter, config: &TrackerConfig) -> Result<()> {
    pages.register(&config.page_url("inventory.php"), visit_inventory)?;
    clicks.register("item", click_item)?;
    Ok(())
}

pub fn visit_inventory(state: &mut TrackerState, content: &str, _url: &Url) -> Result<()> {
    let snapshot = parse_inventory(content)?;
    state.inventory.apply_full_resync(snapshot.items, snapshot.max);
    Ok(())
}

/// `item:<name>` opens that item's page in the game client.
pub fn click_item(state: &mut TrackerState, _namespace: &str, name: &str) -> Result<()> {
    let id = match state.catalog.get(name) {
        Some(item) => item.id.clone(),
        None => {
            log::error!("Unknown item {:?}", name);
            return Ok(());
        }
    };
    state.post(Outbound::ReloadView {
        url: format!("item.php?id={}", id),
    });
    Ok(())
}
