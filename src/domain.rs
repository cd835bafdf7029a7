use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::WatchError;

/// Association key used when every user and room shares one watch list.
pub const GLOBAL_WATCH_LIST_KEY: &str = "dataset-watch-list";

/// A dataset as reported by the catalog. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    pub id: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "lastModified")]
    pub last_modified: Option<String>,
    #[serde(default)]
    pub downloads: Option<u64>,
}

/// Ordered, duplicate-free dataset identifiers stored under one association key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchList {
    #[serde(default)]
    pub datasets: Vec<String>,
}

impl WatchList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.datasets.iter().any(|existing| existing == id)
    }

    /// Appends `id` unless it is already present. Returns whether the list changed.
    pub fn insert(&mut self, id: &str) -> bool {
        if self.contains(id) {
            return false;
        }
        self.datasets.push(id.to_string());
        true
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }

    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.datasets.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for WatchList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut list = WatchList::new();
        for id in iter {
            let id = id.into();
            list.insert(&id);
        }
        list
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssociationKey(String);

impl AssociationKey {
    pub fn global() -> Self {
        Self(GLOBAL_WATCH_LIST_KEY.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssociationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AssociationKey {
    type Err = WatchError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(WatchError::InvalidConfig(
                "association key must not be empty".to_string(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }
}

/// How watch lists are partitioned between users and rooms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum WatchScope {
    #[default]
    Global,
    User,
    Room,
}

impl WatchScope {
    pub fn key_for(self, sender: &str, room: &str) -> AssociationKey {
        match self {
            WatchScope::Global => AssociationKey::global(),
            WatchScope::User => {
                AssociationKey(format!("{GLOBAL_WATCH_LIST_KEY}:user:{sender}"))
            }
            WatchScope::Room => AssociationKey(format!("{GLOBAL_WATCH_LIST_KEY}:room:{room}")),
        }
    }
}

impl fmt::Display for WatchScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WatchScope::Global => write!(f, "global"),
            WatchScope::User => write!(f, "user"),
            WatchScope::Room => write!(f, "room"),
        }
    }
}
