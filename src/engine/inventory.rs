//! Inventory reconciliation.
//!
//! Two write paths: a full resync from the inventory page (authoritative)
//! and per-drop patches from activity results (optimistic). Quantities are
//! clamped to `[0, max]` after every mutation.

use std::collections::BTreeMap;

use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InventoryEntry {
    pub quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl InventoryEntry {
    pub fn new(quantity: u32) -> Self {
        Self {
            quantity,
            id: None,
            image: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Inventory {
    max: u32,
    items: BTreeMap<String, InventoryEntry>,
}

impl Inventory {
    pub fn new(max: u32) -> Self {
        Self {
            max,
            items: BTreeMap::new(),
        }
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    /// Quantity held, 0 for untracked items.
    pub fn quantity(&self, name: &str) -> u32 {
        self.items.get(name).map(|e| e.quantity).unwrap_or(0)
    }

    pub fn get(&self, name: &str) -> Option<&InventoryEntry> {
        self.items.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &InventoryEntry)> {
        self.items.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Replace every quantity and the capacity in one step. Local patches
    /// applied since the last resync are discarded.
    pub fn apply_full_resync(&mut self, items: BTreeMap<String, InventoryEntry>, max: u32) {
        self.max = max;
        self.items = items;
        self.clamp();
        log::info!("Inventory resync: {} items, max {}", self.items.len(), self.max);
    }

    /// Record one drop. An overflowed drop means the player is already at
    /// capacity for that item. Returns the new quantity.
    pub fn apply_drop(&mut self, name: &str, overflow: bool) -> u32 {
        let max = self.max;
        let entry = self.items.entry(name.to_string()).or_default();
        entry.quantity = if overflow {
            max
        } else {
            entry.quantity.saturating_add(1)
        };
        entry.quantity = entry.quantity.min(max);
        entry.quantity
    }

    fn clamp(&mut self) {
        let max = self.max;
        for entry in self.items.values_mut() {
            if entry.quantity > max {
                entry.quantity = max;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_item_starts_at_one() {
        let mut inv = Inventory::new(100);
        assert_eq!(inv.apply_drop("Wood", false), 1);
        assert_eq!(inv.apply_drop("Wood", false), 2);
    }

    #[test]
    fn overflow_sets_max() {
        let mut inv = Inventory::new(100);
        inv.apply_drop("Wood", false);
        assert_eq!(inv.apply_drop("Wood", true), 100);
        assert_eq!(inv.apply_drop("Stone", true), 100);
    }

    #[test]
    fn drops_never_exceed_max() {
        let mut inv = Inventory::new(3);
        for _ in 0..10 {
            inv.apply_drop("Wood", false);
        }
        assert_eq!(inv.quantity("Wood"), 3);
    }

    #[test]
    fn resync_discards_patches() {
        let mut inv = Inventory::new(100);
        inv.apply_drop("Wood", false);
        inv.apply_drop("Stone", true);

        let mut items = BTreeMap::new();
        items.insert("Wood".to_string(), InventoryEntry::new(40));
        inv.apply_full_resync(items, 200);

        assert_eq!(inv.max(), 200);
        assert_eq!(inv.quantity("Wood"), 40);
        assert_eq!(inv.quantity("Stone"), 0);
        assert!(inv.get("Stone").is_none());
    }

    #[test]
    fn resync_clamps_to_new_max() {
        let mut inv = Inventory::new(100);
        let mut items = BTreeMap::new();
        items.insert("Wood".to_string(), InventoryEntry::new(500));
        inv.apply_full_resync(items, 300);
        assert_eq!(inv.quantity("Wood"), 300);
    }
}
