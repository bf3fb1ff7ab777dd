use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::ItemRecord;
use crate::engine::resolve::match_item;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    Explore,
    Fishing,
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActivityType::Explore => write!(f, "explore"),
            ActivityType::Fishing => write!(f, "fishing"),
        }
    }
}

/// A place the player can explore or fish, with its drop table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub activity_type: ActivityType,
    pub id: u32,
    pub name: String,
    /// Candidate item names, in table order, without duplicates.
    #[serde(default)]
    pub items: Vec<String>,
}

impl Location {
    pub fn new(activity_type: ActivityType, id: u32, name: impl Into<String>) -> Self {
        Self {
            activity_type,
            id,
            name: name.into(),
            items: Vec::new(),
        }
    }

    pub fn with_items<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for item in items {
            self.add_item(item);
        }
        self
    }

    /// Append to the drop table unless already present.
    pub fn add_item(&mut self, item: impl Into<String>) {
        let item = item.into();
        if !self.items.contains(&item) {
            self.items.push(item);
        }
    }

    pub fn drops(&self, name: &str) -> bool {
        self.items.iter().any(|i| i == name)
    }

    /// Resolve an image's candidate items against this location.
    pub fn match_item<'a>(&self, candidates: &[&'a ItemRecord]) -> Option<&'a ItemRecord> {
        match_item(candidates, self)
    }

    fn dedup_items(&mut self) {
        let mut seen = Vec::with_capacity(self.items.len());
        self.items.retain(|item| {
            if seen.contains(item) {
                false
            } else {
                seen.push(item.clone());
                true
            }
        });
    }
}

/// Locations keyed by (activity type, id), with a name lookup for the
/// composer which only knows what the view state recorded.
#[derive(Debug, Clone, Default)]
pub struct LocationRegistry {
    locations: Vec<Location>,
    index: HashMap<(ActivityType, u32), usize>,
}

impl LocationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_locations(locations: Vec<Location>) -> Self {
        let mut registry = Self::new();
        for loc in locations {
            registry.insert(loc);
        }
        registry
    }

    /// Insert or replace the location with the same (type, id).
    pub fn insert(&mut self, mut location: Location) {
        location.dedup_items();
        let key = (location.activity_type, location.id);
        match self.index.get(&key) {
            Some(&idx) => self.locations[idx] = location,
            None => {
                self.index.insert(key, self.locations.len());
                self.locations.push(location);
            }
        }
    }

    pub fn get_by_id(&self, activity: ActivityType, id: u32) -> Option<&Location> {
        self.index.get(&(activity, id)).map(|&idx| &self.locations[idx])
    }

    pub fn get_by_name(&self, activity: ActivityType, name: &str) -> Option<&Location> {
        self.locations
            .iter()
            .find(|loc| loc.activity_type == activity && loc.name == name)
    }

    /// Record the name a location page shows for `id`. An unseen location is
    /// added with an empty drop table; a known one keeps its table.
    pub fn learn_name(&mut self, activity: ActivityType, id: u32, name: &str) {
        match self.index.get(&(activity, id)) {
            Some(&idx) => {
                let loc = &mut self.locations[idx];
                if loc.name != name {
                    log::debug!("Location {} {} renamed {:?} -> {:?}", activity, id, loc.name, name);
                    loc.name = name.to_string();
                }
            }
            None => {
                log::debug!("Learned {} location {} = {:?}", activity, id, name);
                self.insert(Location::new(activity, id, name));
            }
        }
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Location> {
        self.locations.iter()
    }
}
