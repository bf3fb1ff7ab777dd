use std::fmt;

use serde::{Deserialize, Serialize};

use crate::registry::ActivityType;

/// Farm buildings and minigames with a fixed sidebar item list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AreaTag {
    Orchard,
    Coop,
    Pasture,
    Pigpen,
    Raptors,
    Hab,
    Troutfarm,
    Spin,
}

impl AreaTag {
    pub const ALL: [AreaTag; 8] = [
        AreaTag::Orchard,
        AreaTag::Coop,
        AreaTag::Pasture,
        AreaTag::Pigpen,
        AreaTag::Raptors,
        AreaTag::Hab,
        AreaTag::Troutfarm,
        AreaTag::Spin,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AreaTag::Orchard => "orchard",
            AreaTag::Coop => "coop",
            AreaTag::Pasture => "pasture",
            AreaTag::Pigpen => "pigpen",
            AreaTag::Raptors => "raptors",
            AreaTag::Hab => "hab",
            AreaTag::Troutfarm => "troutfarm",
            AreaTag::Spin => "spin",
        }
    }
}

impl fmt::Display for AreaTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the player currently is, as far as the sidebar is concerned.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "view", rename_all = "lowercase")]
pub enum ViewState {
    #[default]
    None,
    Farm,
    Location { activity: ActivityType, name: String },
    Pet { name: String },
    Pets,
    Area { area: AreaTag },
}

impl ViewState {
    pub fn location(activity: ActivityType, name: impl Into<String>) -> Self {
        ViewState::Location {
            activity,
            name: name.into(),
        }
    }

    pub fn pet(name: impl Into<String>) -> Self {
        ViewState::Pet { name: name.into() }
    }

    pub fn area(area: AreaTag) -> Self {
        ViewState::Area { area }
    }
}

impl fmt::Display for ViewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewState::None => write!(f, "none"),
            ViewState::Farm => write!(f, "farm"),
            ViewState::Location { activity, name } => write!(f, "location({}, {})", activity, name),
            ViewState::Pet { name } => write!(f, "pet({})", name),
            ViewState::Pets => write!(f, "pets"),
            ViewState::Area { area } => write!(f, "{}", area),
        }
    }
}

/// The view state machine. Every recognised page visit fires a transition;
/// failed extractions never reach it.
#[derive(Debug, Clone, Default)]
pub struct ViewTracker {
    current: ViewState,
}

impl ViewTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &ViewState {
        &self.current
    }

    pub fn enter(&mut self, next: ViewState) {
        if self.current != next {
            log::debug!("View {} -> {}", self.current, next);
        }
        self.current = next;
    }
}
