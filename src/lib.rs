//! FarmRPG page tracker.
//!
//! Page-load events are routed by URL to extractors, the results are
//! reconciled into an inventory model, and a contextual resource panel is
//! recomposed after every recognised page.

pub mod catalog;
pub mod config;
pub mod dom;
pub mod engine;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod registry;
pub mod sidebar;

#[cfg(feature = "http")]
pub mod net;

pub use catalog::{ItemCatalog, ItemRecord};
pub use config::{SidebarSettings, TrackerConfig};
pub use engine::state::{Outbound, PlayerState, TrackerState};
pub use engine::view::{AreaTag, ViewState};
pub use engine::Tracker;
pub use error::{Result, TrackerError};
pub use registry::{ActivityType, Location, LocationRegistry, Pet, PetRegistry, WorldData};
pub use sidebar::{PanelModel, PanelRow, RowStatus};
