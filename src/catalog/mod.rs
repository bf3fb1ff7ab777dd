//! Static item catalog with an exact-image index.
//!
//! Several unrelated items share an icon, and the same logical icon is
//! served under differently-cased or suffixed paths (`6143.PNG`,
//! `5805g.png?1`). Image keys are therefore compared byte-for-byte.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TrackerError};

const BUILTIN_ITEMS: &str = include_str!("../../data/items.json");

/// One catalog entry. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRecord {
    pub id: String,
    pub name: String,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sell_price: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buy_price: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xp: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rarity: Option<String>,
    /// Seconds from planting to harvest, for crops and seeds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub growth_time: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flea_market: Option<u32>,
    #[serde(default)]
    pub event: bool,
    #[serde(default)]
    pub givable: bool,
}

impl ItemRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            image: image.into(),
            sell_price: None,
            buy_price: None,
            xp: None,
            rarity: None,
            growth_time: None,
            flea_market: None,
            event: false,
            givable: false,
        }
    }
}

/// Read-only item table with name, id and image lookups.
#[derive(Debug, Clone)]
pub struct ItemCatalog {
    items: Vec<ItemRecord>,
    by_name: HashMap<String, usize>,
    by_id: HashMap<String, usize>,
    by_image: HashMap<String, Vec<usize>>,
}

impl ItemCatalog {
    /// Build the catalog and its indexes. Names and ids must be unique.
    pub fn from_records(items: Vec<ItemRecord>) -> Result<Self> {
        let mut by_name = HashMap::with_capacity(items.len());
        let mut by_id = HashMap::with_capacity(items.len());
        let mut by_image: HashMap<String, Vec<usize>> = HashMap::new();

        for (idx, item) in items.iter().enumerate() {
            if by_name.insert(item.name.clone(), idx).is_some() {
                return Err(TrackerError::Catalog(format!("duplicate item name {:?}", item.name)));
            }
            if by_id.insert(item.id.clone(), idx).is_some() {
                return Err(TrackerError::Catalog(format!("duplicate item id {:?}", item.id)));
            }
            by_image.entry(item.image.clone()).or_default().push(idx);
        }

        log::debug!(
            "Catalog: {} items, {} distinct images",
            items.len(),
            by_image.len()
        );

        Ok(Self {
            items,
            by_name,
            by_id,
            by_image,
        })
    }

    /// Parse a JSON array of item records.
    pub fn from_json(json: &str) -> Result<Self> {
        let items: Vec<ItemRecord> = serde_json::from_str(json)?;
        Self::from_records(items)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// The catalog fixture bundled with the crate.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_ITEMS)
    }

    pub fn get(&self, name: &str) -> Option<&ItemRecord> {
        self.by_name.get(name).map(|&idx| &self.items[idx])
    }

    pub fn get_by_id(&self, id: &str) -> Option<&ItemRecord> {
        self.by_id.get(id).map(|&idx| &self.items[idx])
    }

    /// Every item whose image is exactly `image`, in catalog order.
    pub fn get_by_image(&self, image: &str) -> Vec<&ItemRecord> {
        self.by_image
            .get(image)
            .map(|indexes| indexes.iter().map(|&idx| &self.items[idx]).collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ItemRecord> {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_loads() {
        let catalog = ItemCatalog::builtin().unwrap();
        assert!(catalog.len() > 400);
        let wood = catalog.get("Wood").unwrap();
        assert_eq!(wood.id, "35");
        assert_eq!(wood.image, "/img/items/6143.PNG");
        assert_eq!(catalog.get_by_id("35").map(|i| i.name.as_str()), Some("Wood"));
    }

    #[test]
    fn shared_images_bucket_together() {
        let catalog = ItemCatalog::builtin().unwrap();
        let names: Vec<_> = catalog
            .get_by_image("/img/items/mushroom.png")
            .iter()
            .map(|i| i.name.as_str())
            .collect();
        assert_eq!(names, vec!["Mushroom", "Mushroom Spores"]);
    }

    #[test]
    fn image_match_is_exact() {
        let catalog = ItemCatalog::builtin().unwrap();
        assert_eq!(catalog.get_by_image("/img/items/6143.PNG").len(), 1);
        assert!(catalog.get_by_image("/img/items/6143.png").is_empty());
        assert_eq!(catalog.get_by_image("/img/items/5805g.png?1").len(), 2);
        assert!(catalog.get_by_image("/img/items/5805g.png").is_empty());
    }

    #[test]
    fn every_record_is_in_its_own_bucket() {
        let catalog = ItemCatalog::builtin().unwrap();
        for item in catalog.iter() {
            let bucket = catalog.get_by_image(&item.image);
            assert_eq!(bucket.iter().filter(|b| b.name == item.name).count(), 1);
            assert!(bucket.iter().all(|b| b.image == item.image));
        }
    }

    #[test]
    fn optional_fields_parse() {
        let catalog = ItemCatalog::builtin().unwrap();
        let spores = catalog.get("Mushroom Spores").unwrap();
        assert_eq!(spores.growth_time, Some(5400));
        assert_eq!(spores.buy_price, Some(3000));
        assert!(!spores.givable);
        let clover = catalog.get("4-leaf Clover").unwrap();
        assert_eq!(clover.flea_market, Some(2));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let err = ItemCatalog::from_records(vec![
            ItemRecord::new("1", "Wood", "/a.png"),
            ItemRecord::new("2", "Wood", "/b.png"),
        ])
        .unwrap_err();
        assert!(matches!(err, TrackerError::Catalog(_)));
    }
}
