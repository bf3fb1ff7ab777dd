use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::SystemTime;

use crate::catalog::ItemCatalog;
use crate::config::TrackerConfig;
use crate::engine::activity::ActivityLog;
use crate::engine::inventory::Inventory;
use crate::engine::view::{ViewState, ViewTracker};
use crate::registry::{LocationRegistry, PetRegistry};
use crate::sidebar::PanelModel;

/// Farm plots and owned pets, as last observed.
#[derive(Debug, Clone, Default)]
pub struct PlayerState {
    /// Plot id -> image of the crop planted there.
    pub crop_images: BTreeMap<String, String>,
    /// Plot id -> when the crop is ready to harvest.
    pub crop_times: BTreeMap<String, SystemTime>,
    /// Owned pet name -> level.
    pub pets: BTreeMap<String, u32>,
}

impl PlayerState {
    pub fn plant(&mut self, slot: impl Into<String>, image: impl Into<String>, ready_at: SystemTime) {
        let slot = slot.into();
        self.crop_images.insert(slot.clone(), image.into());
        self.crop_times.insert(slot, ready_at);
    }

    pub fn harvest(&mut self, slot: &str) {
        self.crop_images.remove(slot);
        self.crop_times.remove(slot);
    }

    pub fn set_pet_level(&mut self, name: impl Into<String>, level: u32) {
        self.pets.insert(name.into(), level);
    }
}

/// Messages for the transport collaborator, drained after each event.
#[derive(Debug, Clone, PartialEq)]
pub enum Outbound {
    UpdatePanel(PanelModel),
    /// Ask the game client to load (or refresh) a page.
    ReloadView { url: String },
    /// Ask the transport to fetch a page and feed it back through the engine.
    FetchPage { url: String },
}

/// Everything the engine reads and writes, passed explicitly to every
/// handler. Exclusive borrows keep event processing single-writer.
#[derive(Debug, Clone)]
pub struct TrackerState {
    pub catalog: Arc<ItemCatalog>,
    pub locations: LocationRegistry,
    pub pets: PetRegistry,
    pub inventory: Inventory,
    pub views: ViewTracker,
    pub player: PlayerState,
    pub activity: ActivityLog,
    outbox: Vec<Outbound>,
}

impl TrackerState {
    pub fn new(
        config: &TrackerConfig,
        catalog: Arc<ItemCatalog>,
        locations: LocationRegistry,
        pets: PetRegistry,
    ) -> Self {
        Self {
            catalog,
            locations,
            pets,
            inventory: Inventory::new(config.initial_max_inventory),
            views: ViewTracker::new(),
            player: PlayerState::default(),
            activity: ActivityLog::new(config.activity_log_limit),
            outbox: Vec::new(),
        }
    }

    pub fn view(&self) -> &ViewState {
        self.views.current()
    }

    pub fn enter_view(&mut self, view: ViewState) {
        self.views.enter(view);
    }

    pub fn post(&mut self, message: Outbound) {
        self.outbox.push(message);
    }

    pub fn pending(&self) -> &[Outbound] {
        &self.outbox
    }

    pub fn drain_outbox(&mut self) -> Vec<Outbound> {
        std::mem::take(&mut self.outbox)
    }
}
