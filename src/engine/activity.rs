use std::collections::VecDeque;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Explore,
    Lemonade,
    Net,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoggedDrop {
    pub item: String,
    pub overflow: bool,
}

/// One applied activity result. Only resolved drops are listed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityEntry {
    pub kind: ActivityKind,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stamina: Option<u32>,
    pub items: Vec<LoggedDrop>,
}

/// Bounded history of applied results, oldest first.
#[derive(Debug, Clone)]
pub struct ActivityLog {
    entries: VecDeque<ActivityEntry>,
    limit: usize,
}

impl ActivityLog {
    pub fn new(limit: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            limit,
        }
    }

    pub fn push(&mut self, entry: ActivityEntry) {
        if self.limit == 0 {
            return;
        }
        while self.entries.len() >= self.limit {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    pub fn last(&self) -> Option<&ActivityEntry> {
        self.entries.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActivityEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
