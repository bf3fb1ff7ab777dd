//! The tracker engine: Page event → Route → Extract → Reconcile → Panel.

pub mod activity;
pub mod dispatcher;
pub mod inventory;
pub mod resolve;
pub mod state;
pub mod view;

use std::sync::Arc;
use std::time::SystemTime;

use crate::catalog::ItemCatalog;
use crate::config::{SidebarSettings, TrackerConfig};
use crate::error::Result;
use crate::handlers;
use crate::registry::{LocationRegistry, PetRegistry, WorldData};
use crate::sidebar;

use dispatcher::{ClickRouter, PageRouter};
use state::{Outbound, TrackerState};

/// Routes events to handlers and keeps the panel current. Holds no
/// mutable state of its own; everything lives in [`TrackerState`].
pub struct Tracker {
    pages: PageRouter,
    clicks: ClickRouter,
    settings: SidebarSettings,
}

impl Tracker {
    pub fn new(config: &TrackerConfig) -> Result<Self> {
        let mut pages = PageRouter::new();
        let mut clicks = ClickRouter::new();
        handlers::register_all(&mut pages, &mut clicks, config)?;
        log::debug!("Tracker: {} page routes", pages.len());
        Ok(Self {
            pages,
            clicks,
            settings: config.sidebar.clone(),
        })
    }

    /// Build the state the config points at: the bundled or configured
    /// catalog, plus locations and pets from the world file if one is set.
    pub fn load_state(config: &TrackerConfig) -> Result<TrackerState> {
        let catalog = match &config.catalog_path {
            Some(path) => ItemCatalog::load(path)?,
            None => ItemCatalog::builtin()?,
        };
        let (locations, pets) = match &config.world_path {
            Some(path) => WorldData::load(path)?.into_registries(),
            None => (LocationRegistry::new(), PetRegistry::new()),
        };
        log::info!(
            "Loaded {} items, {} locations, {} pets",
            catalog.len(),
            locations.len(),
            pets.len()
        );
        Ok(TrackerState::new(config, Arc::new(catalog), locations, pets))
    }

    /// Handle one page-load event. Returns whether any route matched; on a
    /// match the recomposed panel is posted to the outbox.
    pub fn handle_page(&self, state: &mut TrackerState, url: &str, content: &str) -> Result<bool> {
        if !self.pages.dispatch(state, url, content)? {
            log::debug!("No route for {}", url);
            return Ok(false);
        }
        self.refresh(state);
        Ok(true)
    }

    /// Handle an `"<namespace>:<arg>"` click from the panel.
    pub fn handle_click(&self, state: &mut TrackerState, target: &str) -> Result<bool> {
        self.clicks.dispatch(state, target)
    }

    pub fn refresh(&self, state: &mut TrackerState) {
        self.refresh_at(state, SystemTime::now());
    }

    pub fn refresh_at(&self, state: &mut TrackerState, now: SystemTime) {
        let panel = sidebar::compose(state, &self.settings, now);
        state.post(Outbound::UpdatePanel(panel));
    }

    pub fn settings(&self) -> &SidebarSettings {
        &self.settings
    }
}
