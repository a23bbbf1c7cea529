//! Indexed records.
//!
//! Each record carries a fixed attribute set plus an explicit, id-keyed child
//! collection, so a child identifier can never shadow an attribute.

use std::collections::HashMap;

use serde::{Serialize, Serializer};
use tracing::debug;

use crate::model::{AccountSummary, ProfileSummary, WebPropertySummary};

/// Records addressable by a string identifier.
pub trait Keyed {
    fn key(&self) -> &str;
}

/// Id-keyed collection that remembers input order.
///
/// Inserting an item whose key is already present replaces it in place: the
/// newest item wins, the original position is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Children<T> {
    items: Vec<T>,
    positions: HashMap<String, usize>,
}

impl<T> Default for Children<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            positions: HashMap::new(),
        }
    }
}

impl<T: Keyed> Children<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `item`, returning the item it replaced (if any).
    pub(crate) fn insert(&mut self, item: T) -> Option<T> {
        match self.positions.get(item.key()) {
            Some(&pos) => Some(std::mem::replace(&mut self.items[pos], item)),
            None => {
                self.positions.insert(item.key().to_string(), self.items.len());
                self.items.push(item);
                None
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.positions.get(id).map(|&pos| &self.items[pos])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.positions.contains_key(id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'a, T> IntoIterator for &'a Children<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: Serialize> Serialize for Children<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.items)
    }
}

/// Top-level organizational entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub name: String,
    pub kind: String,
    pub(crate) properties: Children<Property>,
}

/// A tracked site/app. Only properties with at least one profile get here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: String,
    /// Upstream numeric id; `None` when absent or not numeric.
    pub internal_id: Option<u64>,
    pub name: String,
    pub kind: String,
    pub level: String,
    pub website_url: Option<String>,
    pub(crate) profiles: Children<Profile>,
}

/// A reporting view. Leaf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: String,
    pub name: String,
    pub kind: String,
    #[serde(rename = "type")]
    pub profile_type: String,
}

impl Account {
    pub(crate) fn from_summary(id: &str, summary: &AccountSummary) -> Self {
        Self {
            id: id.to_string(),
            name: summary.name.clone(),
            kind: summary.kind.clone(),
            properties: Children::new(),
        }
    }

    pub fn properties(&self) -> &Children<Property> {
        &self.properties
    }

    pub fn property(&self, property_id: &str) -> Option<&Property> {
        self.properties.get(property_id)
    }
}

impl Property {
    pub(crate) fn from_summary(id: &str, summary: &WebPropertySummary) -> Self {
        let internal_id = summary.internal_web_property_id.as_deref().and_then(|raw| {
            let parsed = raw.parse::<u64>().ok();
            if parsed.is_none() {
                debug!(
                    property_id = id,
                    internal_id = raw,
                    "ignoring non-numeric internal property id"
                );
            }
            parsed
        });

        Self {
            id: id.to_string(),
            internal_id,
            name: summary.name.clone(),
            kind: summary.kind.clone(),
            level: summary.level.clone(),
            website_url: summary.website_url.clone(),
            profiles: Children::new(),
        }
    }

    pub fn profiles(&self) -> &Children<Profile> {
        &self.profiles
    }

    pub fn profile(&self, profile_id: &str) -> Option<&Profile> {
        self.profiles.get(profile_id)
    }
}

impl Profile {
    pub(crate) fn from_summary(id: &str, summary: &ProfileSummary) -> Self {
        Self {
            id: id.to_string(),
            name: summary.name.clone(),
            kind: summary.kind.clone(),
            profile_type: summary.profile_type.clone(),
        }
    }
}

impl Keyed for Account {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for Property {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for Profile {
    fn key(&self) -> &str {
        &self.id
    }
}
