use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Items a pet starts returning once it reaches `level`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetReward {
    pub level: u32,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pet {
    pub name: String,
    #[serde(default)]
    pub rewards: Vec<PetReward>,
}

impl Pet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rewards: Vec::new(),
        }
    }

    pub fn with_reward<I, S>(mut self, level: u32, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rewards.push(PetReward {
            level,
            items: items.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Every reward unlocked at or below `level`, in tier order, de-duplicated.
    pub fn items_for_level(&self, level: u32) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for reward in self.rewards.iter().filter(|r| r.level <= level) {
            for item in &reward.items {
                if !out.contains(&item.as_str()) {
                    out.push(item);
                }
            }
        }
        out
    }
}

#[derive(Debug, Clone, Default)]
pub struct PetRegistry {
    pets: Vec<Pet>,
    by_name: HashMap<String, usize>,
}

impl PetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pets(pets: Vec<Pet>) -> Self {
        let mut registry = Self::new();
        for pet in pets {
            registry.insert(pet);
        }
        registry
    }

    pub fn insert(&mut self, pet: Pet) {
        match self.by_name.get(&pet.name) {
            Some(&idx) => self.pets[idx] = pet,
            None => {
                self.by_name.insert(pet.name.clone(), self.pets.len());
                self.pets.push(pet);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Pet> {
        self.by_name.get(name).map(|&idx| &self.pets[idx])
    }

    pub fn len(&self) -> usize {
        self.pets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pets.is_empty()
    }
}
