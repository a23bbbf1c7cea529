//! Flat reverse index: `(relation, child id) -> ancestor id`.
//!
//! Identifiers are only unique within their own kind, so the relation is part
//! of every key. Rendered as a string the composite key is
//! `<parent prefix><child prefix>:<child id>`, e.g. `ap:UA-1234-1`.

use std::collections::HashMap;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Relation {
    AccountOfProperty,
    AccountOfProfile,
    PropertyOfProfile,
}

impl Relation {
    pub const ALL: [Relation; 3] = [
        Relation::AccountOfProperty,
        Relation::AccountOfProfile,
        Relation::PropertyOfProfile,
    ];

    /// Parent-kind prefix followed by child-kind prefix.
    pub const fn prefix(self) -> &'static str {
        match self {
            Relation::AccountOfProperty => "ap",
            Relation::AccountOfProfile => "av",
            Relation::PropertyOfProfile => "pv",
        }
    }

    /// Composite key for `child_id` under this relation.
    pub fn key(self, child_id: &str) -> String {
        format!("{}:{}", self.prefix(), child_id)
    }

    const fn slot(self) -> usize {
        match self {
            Relation::AccountOfProperty => 0,
            Relation::AccountOfProfile => 1,
            Relation::PropertyOfProfile => 2,
        }
    }
}

impl std::fmt::Display for Relation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Relation::AccountOfProperty => "account-of-property",
            Relation::AccountOfProfile => "account-of-profile",
            Relation::PropertyOfProfile => "property-of-profile",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReverseIndex {
    /// One map per relation, indexed by `Relation::slot`.
    by_relation: [HashMap<String, String>; 3],
}

impl ReverseIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `ancestor_id` for `child_id`, returning the ancestor it replaced.
    pub(crate) fn record(
        &mut self,
        relation: Relation,
        child_id: &str,
        ancestor_id: &str,
    ) -> Option<String> {
        self.by_relation[relation.slot()].insert(child_id.to_string(), ancestor_id.to_string())
    }

    pub fn ancestor(&self, relation: Relation, child_id: &str) -> Option<&str> {
        self.by_relation[relation.slot()]
            .get(child_id)
            .map(String::as_str)
    }

    pub fn contains(&self, relation: Relation, child_id: &str) -> bool {
        self.by_relation[relation.slot()].contains_key(child_id)
    }

    pub fn len_of(&self, relation: Relation) -> usize {
        self.by_relation[relation.slot()].len()
    }

    pub fn len(&self) -> usize {
        self.by_relation.iter().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_relation.iter().all(HashMap::is_empty)
    }

    /// All `(relation, child id, ancestor id)` entries, sorted for determinism.
    pub fn entries(&self) -> Vec<(Relation, &str, &str)> {
        let mut out: Vec<(Relation, &str, &str)> = Relation::ALL
            .iter()
            .flat_map(|&relation| {
                self.by_relation[relation.slot()]
                    .iter()
                    .map(move |(child, ancestor)| (relation, child.as_str(), ancestor.as_str()))
            })
            .collect();
        out.sort_unstable();
        out
    }
}
