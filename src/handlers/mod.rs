//! Page and click handlers: the glue between routes, extractors and the
//! reconciler.

pub mod areas;
pub mod explore;
pub mod fishing;
pub mod inventory;

use std::sync::Arc;

use crate::config::TrackerConfig;
use crate::engine::activity::{ActivityEntry, ActivityKind, LoggedDrop};
use crate::engine::dispatcher::{ClickRouter, PageRouter};
use crate::engine::state::TrackerState;
use crate::error::{Result, TrackerError};
use crate::extract::ActivityResult;
use crate::registry::ActivityType;

/// Install every route. Registration order is precedence order.
pub fn register_all(pages: &mut PageRouter, clicks: &mut ClickRouter, config: &TrackerConfig) -> Result<()> {
    explore::register(pages, config)?;
    fishing::register(pages, config)?;
    inventory::register(pages, clicks, config)?;
    areas::register(pages, config)?;
    Ok(())
}

/// Resolve each drop of `result` at its location and apply it to the
/// inventory. Drops whose icon cannot be pinned to one item are skipped.
pub(crate) fn apply_activity(
    state: &mut TrackerState,
    activity: ActivityType,
    kind: ActivityKind,
    result: ActivityResult,
) -> Result<()> {
    let location = state
        .locations
        .get_by_id(activity, result.location_id)
        .cloned()
        .ok_or(TrackerError::UnknownLocation {
            activity,
            id: result.location_id,
        })?;
    let catalog = Arc::clone(&state.catalog);

    let mut drops = Vec::with_capacity(result.items.len());
    for hit in &result.items {
        let candidates = catalog.get_by_image(&hit.image);
        let item = match location.match_item(&candidates) {
            Some(item) => item,
            None => {
                log::debug!(
                    "No unique item for {} at {} ({} candidates)",
                    hit.image,
                    location.name,
                    candidates.len()
                );
                continue;
            }
        };
        state.inventory.apply_drop(&item.name, hit.overflow);
        drops.push(LoggedDrop {
            item: item.name.clone(),
            overflow: hit.overflow,
        });
    }

    log::info!(
        "{:?} at {}: stamina {:?}, {}/{} drops tracked",
        kind,
        location.name,
        result.stamina,
        drops.len(),
        result.items.len()
    );
    state.activity.push(ActivityEntry {
        kind,
        location: location.name,
        stamina: result.stamina,
        items: drops,
    });
    Ok(())
}
