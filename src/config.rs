//! Tracker configuration.
//!
//! Every field has a default, so a config file only needs the keys it
//! changes:
//!
//! ```json
//! { "base_url": "https://farmrpg.com", "sidebar": { "warning_ratio": 0.9 } }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::engine::view::AreaTag;
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SidebarSettings {
    /// Items always shown ahead of the contextual rows.
    pub baseline_items: Vec<String>,
    /// Fraction of capacity at which a row is flagged `warning`.
    pub warning_ratio: f64,
}

impl Default for SidebarSettings {
    fn default() -> Self {
        Self {
            baseline_items: ["Wood", "Board", "Straw", "Stone"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            warning_ratio: 0.85,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Origin every route pattern is built on.
    pub base_url: String,
    /// Capacity assumed until the first inventory resync.
    pub initial_max_inventory: u32,
    pub activity_log_limit: usize,
    pub sidebar: SidebarSettings,
    /// Area tag -> page path (relative to `base_url`).
    pub area_pages: BTreeMap<AreaTag, String>,
    /// Replaces the bundled item catalog.
    pub catalog_path: Option<PathBuf>,
    /// JSON file with locations and pets.
    pub world_path: Option<PathBuf>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        let area_pages = AreaTag::ALL
            .iter()
            .map(|&tag| (tag, default_area_page(tag).to_string()))
            .collect();
        Self {
            base_url: "https://farmrpg.com".to_string(),
            initial_max_inventory: 100,
            activity_log_limit: 500,
            sidebar: SidebarSettings::default(),
            area_pages,
            catalog_path: None,
            world_path: None,
        }
    }
}

fn default_area_page(tag: AreaTag) -> &'static str {
    match tag {
        AreaTag::Orchard => "orchard.php",
        AreaTag::Coop => "coop.php",
        AreaTag::Pasture => "pasture.php",
        AreaTag::Pigpen => "pigpen.php",
        AreaTag::Raptors => "pen.php",
        AreaTag::Hab => "habitat.php",
        AreaTag::Troutfarm => "troutfarm.php",
        AreaTag::Spin => "spin.php",
    }
}

impl TrackerConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::debug!("Config loaded from {}", path.display());
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_initial_max_inventory(mut self, max: u32) -> Self {
        self.initial_max_inventory = max;
        self
    }

    pub fn with_world_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.world_path = Some(path.into());
        self
    }

    pub fn with_catalog_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalog_path = Some(path.into());
        self
    }

    /// Absolute URL of a page under `base_url`.
    pub fn page_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = TrackerConfig::from_json(
            r#"{"initial_max_inventory": 250, "sidebar": {"warning_ratio": 0.9}}"#,
        )
        .unwrap();
        assert_eq!(config.initial_max_inventory, 250);
        assert_eq!(config.sidebar.warning_ratio, 0.9);
        assert_eq!(config.sidebar.baseline_items, vec!["Wood", "Board", "Straw", "Stone"]);
        assert_eq!(config.base_url, "https://farmrpg.com");
        assert_eq!(config.area_pages.len(), AreaTag::ALL.len());
    }

    #[test]
    fn area_pages_override_by_tag() {
        let config = TrackerConfig::from_json(r#"{"area_pages": {"spin": "wheel.php"}}"#).unwrap();
        assert_eq!(config.area_pages.get(&AreaTag::Spin).map(String::as_str), Some("wheel.php"));
        assert_eq!(config.area_pages.len(), 1);
    }

    #[test]
    fn page_url_joins_cleanly() {
        let config = TrackerConfig::default().with_base_url("http://localhost:8080/");
        assert_eq!(config.page_url("/inventory.php"), "http://localhost:8080/inventory.php");
    }
}
