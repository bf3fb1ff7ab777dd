//! Location and pet registries, seeded from a JSON world file.

pub mod locations;
pub mod pets;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use locations::{ActivityType, Location, LocationRegistry};
pub use pets::{Pet, PetRegistry, PetReward};

use crate::error::Result;

/// On-disk shape of the world file: `{"locations": [...], "pets": [...]}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorldData {
    #[serde(default)]
    pub locations: Vec<Location>,
    #[serde(default)]
    pub pets: Vec<Pet>,
}

impl WorldData {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn into_registries(self) -> (LocationRegistry, PetRegistry) {
        (
            LocationRegistry::from_locations(self.locations),
            PetRegistry::from_pets(self.pets),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn world_file_parses() {
        let world = WorldData::from_json(
            r#"{
                "locations": [
                    {"activityType": "explore", "id": 7, "name": "Forest", "items": ["Wood", "Mushroom"]}
                ],
                "pets": [
                    {"name": "Cat", "rewards": [{"level": 1, "items": ["Feathers"]}]}
                ]
            }"#,
        )
        .unwrap();
        let (locations, pets) = world.into_registries();
        assert_eq!(locations.get_by_id(ActivityType::Explore, 7).unwrap().items.len(), 2);
        assert!(pets.get("Cat").is_some());
    }

    #[test]
    fn missing_sections_default_empty() {
        let world = WorldData::from_json("{}").unwrap();
        assert!(world.locations.is_empty());
        assert!(world.pets.is_empty());
    }
}
