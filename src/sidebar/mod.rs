//! Contextual resource panel.
//!
//! `compose` is a pure function of the tracker state: a fixed baseline of
//! rows, then rows chosen by the current view. Per-row lookups run on the
//! rayon pool; `collect` keeps them in input order.

pub mod render;
pub mod timer;

use std::time::SystemTime;

use rayon::prelude::*;
use serde::Serialize;

use crate::config::SidebarSettings;
use crate::engine::state::TrackerState;
use crate::engine::view::{AreaTag, ViewState};
use crate::registry::ActivityType;

pub use timer::{Countdown, CropTimer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RowStatus {
    Warning,
    Max,
}

impl RowStatus {
    pub fn for_quantity(quantity: u32, max: u32, warning_ratio: f64) -> Option<Self> {
        if quantity >= max {
            Some(RowStatus::Max)
        } else if f64::from(quantity) >= f64::from(max) * warning_ratio {
            Some(RowStatus::Warning)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RowStatus::Warning => "warning",
            RowStatus::Max => "max",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanelRow {
    pub image: String,
    pub title: String,
    pub value: String,
    pub status: Option<RowStatus>,
    /// Extra style hint, e.g. `seeds`.
    pub class: Option<String>,
    /// Click target `"<namespace>:<arg>"`.
    pub click: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanelModel {
    pub rows: Vec<PanelRow>,
    pub max_inventory: u32,
    pub timer: CropTimer,
}

/// What a row shows before lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowSource {
    Item {
        name: String,
        class: Option<&'static str>,
    },
    Literal {
        image: &'static str,
        title: &'static str,
        value: String,
    },
}

impl RowSource {
    fn item(name: impl Into<String>) -> Self {
        RowSource::Item {
            name: name.into(),
            class: None,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            RowSource::Item { name, .. } => name,
            RowSource::Literal { title, .. } => title,
        }
    }
}

pub fn compose(state: &TrackerState, settings: &SidebarSettings, now: SystemTime) -> PanelModel {
    let mut sources: Vec<RowSource> = settings.baseline_items.iter().map(RowSource::item).collect();
    sources.extend(context_rows(state));

    let rows = sources
        .par_iter()
        .map(|source| build_row(state, settings, source))
        .collect();

    PanelModel {
        rows,
        max_inventory: state.inventory.max(),
        timer: timer::soonest_crop(&state.player, now),
    }
}

/// Rows contributed by the current view, in display order.
pub fn context_rows(state: &TrackerState) -> Vec<RowSource> {
    match state.view() {
        ViewState::None => Vec::new(),
        ViewState::Farm => farm_rows(state),
        ViewState::Location { activity, name } => location_rows(state, *activity, name),
        ViewState::Pet { name } => {
            let level = state.player.pets.get(name).copied().unwrap_or(0);
            match state.pets.get(name) {
                Some(pet) => pet.items_for_level(level).into_iter().map(RowSource::item).collect(),
                None => {
                    log::warn!("Sidebar: unknown pet {:?}", name);
                    Vec::new()
                }
            }
        }
        ViewState::Pets => {
            let mut names: Vec<&str> = Vec::new();
            for (pet_name, &level) in &state.player.pets {
                let Some(pet) = state.pets.get(pet_name) else {
                    continue;
                };
                for item in pet.items_for_level(level) {
                    if !names.contains(&item) {
                        names.push(item);
                    }
                }
            }
            names.into_iter().map(RowSource::item).collect()
        }
        ViewState::Area { area } => area_rows(*area, state.inventory.max()),
    }
}

fn farm_rows(state: &TrackerState) -> Vec<RowSource> {
    let mut names: Vec<&str> = Vec::new();
    for image in state.player.crop_images.values() {
        for item in state.catalog.get_by_image(image) {
            if !names.contains(&item.name.as_str()) {
                names.push(&item.name);
            }
        }
    }
    names
        .into_iter()
        .map(|name| RowSource::Item {
            class: (name.contains("Seeds") || name.contains("Spores")).then_some("seeds"),
            name: name.to_string(),
        })
        .collect()
}

fn location_rows(state: &TrackerState, activity: ActivityType, name: &str) -> Vec<RowSource> {
    match state.locations.get_by_name(activity, name) {
        Some(loc) => loc.items.iter().map(RowSource::item).collect(),
        None => {
            log::warn!("Sidebar: unknown {} location {:?}", activity, name);
            Vec::new()
        }
    }
}

fn area_rows(area: AreaTag, max: u32) -> Vec<RowSource> {
    let names: &[&str] = match area {
        AreaTag::Orchard => {
            return vec![
                RowSource::item("Apple"),
                RowSource::item("Orange"),
                RowSource::item("Lemon"),
                RowSource::Literal {
                    image: "/img/items/orchard.png",
                    title: "Target",
                    value: orchard_target(max).to_string(),
                },
                RowSource::item("Apple Cider"),
                RowSource::item("Orange Juice"),
                RowSource::item("Lemonade"),
            ];
        }
        AreaTag::Coop => &["Eggs", "Feathers"],
        AreaTag::Pasture => &["Steak", "Leather", "Hide", "Milk"],
        AreaTag::Pigpen => &["Broccoli", "Feed", "Bacon"],
        AreaTag::Raptors => &["Antler", "Fishing Net", "Steak Kabob"],
        AreaTag::Hab => &["Worms", "Gummy Worms"],
        AreaTag::Troutfarm => &["Trout", "Grubs", "Minnows"],
        AreaTag::Spin => &["Apple", "Orange Juice", "Lemonade", "Fishing Net", "Ancient Coin"],
    };
    names.iter().map(|&n| RowSource::item(n)).collect()
}

/// Fruit to hold before pressing, `ceil(max / 1.3)`.
fn orchard_target(max: u32) -> u32 {
    (f64::from(max) / 1.3).ceil() as u32
}

fn build_row(state: &TrackerState, settings: &SidebarSettings, source: &RowSource) -> PanelRow {
    match source {
        RowSource::Item { name, class } => {
            let quantity = state.inventory.quantity(name);
            let max = state.inventory.max();
            let image = state
                .catalog
                .get(name)
                .map(|item| item.image.clone())
                .unwrap_or_else(|| timer::FALLBACK_IMAGE.to_string());
            PanelRow {
                image,
                title: name.clone(),
                value: quantity.to_string(),
                status: RowStatus::for_quantity(quantity, max, settings.warning_ratio),
                class: class.map(str::to_string),
                click: Some(format!("item:{}", name)),
            }
        }
        RowSource::Literal { image, title, value } => PanelRow {
            image: image.to_string(),
            title: title.to_string(),
            value: value.clone(),
            status: None,
            class: None,
            click: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ItemCatalog;
    use crate::config::TrackerConfig;
    use crate::engine::inventory::InventoryEntry;
    use crate::registry::{Location, LocationRegistry, Pet, PetRegistry};
    use std::collections::BTreeMap;
    use std::sync::Arc;
    use std::time::Duration;

    fn state() -> TrackerState {
        let locations = LocationRegistry::from_locations(vec![Location::new(
            ActivityType::Explore,
            7,
            "Forest",
        )
        .with_items(["Antler", "Mushroom", "Wood"])]);
        let pets = PetRegistry::from_pets(vec![
            Pet::new("Cat").with_reward(1, ["Feathers"]).with_reward(3, ["Antler"]),
            Pet::new("Dog").with_reward(1, ["Bacon", "Feathers"]),
        ]);
        TrackerState::new(
            &TrackerConfig::default(),
            Arc::new(ItemCatalog::builtin().unwrap()),
            locations,
            pets,
        )
    }

    fn titles(panel: &PanelModel) -> Vec<&str> {
        panel.rows.iter().map(|r| r.title.as_str()).collect()
    }

    fn now() -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000)
    }

    fn resync(state: &mut TrackerState, max: u32, items: &[(&str, u32)]) {
        let map: BTreeMap<String, InventoryEntry> = items
            .iter()
            .map(|&(n, q)| (n.to_string(), InventoryEntry::new(q)))
            .collect();
        state.inventory.apply_full_resync(map, max);
    }

    #[test]
    fn baseline_only_without_view() {
        let state = state();
        let panel = compose(&state, &SidebarSettings::default(), now());
        assert_eq!(titles(&panel), vec!["Wood", "Board", "Straw", "Stone"]);
        assert_eq!(panel.rows[0].image, "/img/items/6143.PNG");
        assert_eq!(panel.rows[0].click.as_deref(), Some("item:Wood"));
        assert_eq!(panel.timer, CropTimer::Empty);
    }

    #[test]
    fn status_thresholds() {
        let mut state = state();
        resync(&mut state, 1000, &[("Wood", 850), ("Board", 1000), ("Straw", 849)]);
        let panel = compose(&state, &SidebarSettings::default(), now());
        assert_eq!(panel.rows[0].status, Some(RowStatus::Warning));
        assert_eq!(panel.rows[1].status, Some(RowStatus::Max));
        assert_eq!(panel.rows[2].status, None);
        assert_eq!(panel.rows[3].status, None);
        assert_eq!(panel.rows[1].value, "1000");
        assert_eq!(panel.max_inventory, 1000);
    }

    #[test]
    fn location_rows_follow_table_order() {
        let mut state = state();
        state.enter_view(ViewState::location(ActivityType::Explore, "Forest"));
        let panel = compose(&state, &SidebarSettings::default(), now());
        assert_eq!(&titles(&panel)[4..], &["Antler", "Mushroom", "Wood"]);
    }

    #[test]
    fn unknown_location_contributes_nothing() {
        let mut state = state();
        state.enter_view(ViewState::location(ActivityType::Fishing, "Forest"));
        assert!(context_rows(&state).is_empty());
    }

    #[test]
    fn farm_rows_from_planted_images() {
        let mut state = state();
        state.player.plant("1", "/img/items/mushroom.png", now() + Duration::from_secs(600));
        state.player.plant("2", "/img/items/mushroom.png", now() + Duration::from_secs(900));
        state.enter_view(ViewState::Farm);
        let rows = context_rows(&state);
        assert_eq!(
            rows,
            vec![
                RowSource::Item { name: "Mushroom".into(), class: None },
                RowSource::Item { name: "Mushroom Spores".into(), class: Some("seeds") },
            ]
        );
        let panel = compose(&state, &SidebarSettings::default(), now());
        assert_eq!(panel.timer.label(), "10m");
        assert_eq!(panel.rows[5].class.as_deref(), Some("seeds"));
    }

    #[test]
    fn pet_rows_use_owned_level() {
        let mut state = state();
        state.player.set_pet_level("Cat", 3);
        state.enter_view(ViewState::pet("Cat"));
        let names: Vec<_> = context_rows(&state).iter().map(|r| r.name().to_string()).collect();
        assert_eq!(names, vec!["Feathers", "Antler"]);

        state.enter_view(ViewState::pet("Dog"));
        assert!(context_rows(&state).is_empty());
    }

    #[test]
    fn pets_union_is_deduplicated_in_first_seen_order() {
        let mut state = state();
        state.player.set_pet_level("Cat", 3);
        state.player.set_pet_level("Dog", 1);
        state.enter_view(ViewState::Pets);
        let names: Vec<_> = context_rows(&state).iter().map(|r| r.name().to_string()).collect();
        assert_eq!(names, vec!["Feathers", "Antler", "Bacon"]);
    }

    #[test]
    fn orchard_has_target_literal() {
        let mut state = state();
        resync(&mut state, 1000, &[("Apple", 5)]);
        state.enter_view(ViewState::area(AreaTag::Orchard));
        let panel = compose(&state, &SidebarSettings::default(), now());
        let target = panel.rows.iter().find(|r| r.title == "Target").unwrap();
        assert_eq!(target.value, "770");
        assert_eq!(target.image, "/img/items/orchard.png");
        assert_eq!(target.status, None);
        assert!(target.click.is_none());
        assert_eq!(panel.rows.len(), 4 + 7);
    }

    #[test]
    fn unknown_items_get_placeholder_image() {
        let state = state();
        let settings = SidebarSettings {
            baseline_items: vec!["Unobtainium".to_string()],
            ..SidebarSettings::default()
        };
        let panel = compose(&state, &settings, now());
        assert_eq!(panel.rows[0].image, timer::FALLBACK_IMAGE);
        assert_eq!(panel.rows[0].value, "0");
    }

    #[test]
    fn every_area_resolves_in_catalog() {
        let catalog = ItemCatalog::builtin().unwrap();
        for area in AreaTag::ALL {
            for source in area_rows(area, 100) {
                if let RowSource::Item { name, .. } = source {
                    assert!(catalog.get(&name).is_some(), "{} missing from catalog", name);
                }
            }
        }
    }
}
