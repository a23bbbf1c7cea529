//! Acctree: account → property → profile hierarchy index
//!
//! Ingests one page of an account-summaries listing and makes every entity
//! addressable two ways:
//!
//! ```text
//!   AccountSummaries ──► build_index ──► HierarchyIndex ──► Resolver ──► caller
//!                                         ├─ Tree          (by full path)
//!                                         └─ ReverseIndex  (child id → ancestor id)
//! ```
//!
//! ## Key properties
//!
//! - **Single pass**: the tree and the reverse index are built together,
//!   O(total entities).
//! - **Immutable**: a built index never changes; rebuilding produces a new one
//!   (see [`SharedIndex`] for swapping it under concurrent readers).
//! - **Total lookups**: every resolver operation is defined for every id and
//!   answers `None` on a miss. An unknown id and the id of a property skipped
//!   for having no profiles look the same.

pub mod builder;
pub mod error;
pub mod model;
pub mod record;
pub mod resolver;
pub mod reverse_index;
pub mod shared;
pub mod tree;

use serde::Serialize;

pub use builder::build_index;
pub use error::IngestError;
pub use model::{AccountSummaries, AccountSummary, ProfileSummary, WebPropertySummary};
pub use record::{Account, Children, Keyed, Profile, Property};
pub use resolver::{Lineage, Resolver};
pub use reverse_index::{Relation, ReverseIndex};
pub use shared::SharedIndex;
pub use tree::Tree;

/// Listing metadata carried over from the ingested page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceInfo {
    pub kind: Option<String>,
    pub username: Option<String>,
    pub total_results: Option<u64>,
    pub start_index: Option<u64>,
    pub items_per_page: Option<u64>,
    pub next_link: Option<String>,
    pub previous_link: Option<String>,
}

impl From<&AccountSummaries> for SourceInfo {
    fn from(page: &AccountSummaries) -> Self {
        Self {
            kind: page.kind.clone(),
            username: page.username.clone(),
            total_results: page.total_results,
            start_index: page.start_index,
            items_per_page: page.items_per_page,
            next_link: page.next_link.clone(),
            previous_link: page.previous_link.clone(),
        }
    }
}

/// Counts gathered while building.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexStats {
    pub accounts: usize,
    pub properties: usize,
    pub profiles: usize,
    /// Properties dropped because they had no profiles.
    pub skipped_properties: usize,
    /// Account records replaced by a later record with the same id.
    pub duplicate_accounts: usize,
    /// Accounts, properties and profiles dropped because they had no id.
    pub missing_ids: usize,
}

/// The tree and reverse index produced by one ingestion.
///
/// Each value is independent: build as many as needed (one per test, one per
/// page). Building twice from the same input yields equal indices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HierarchyIndex {
    tree: Tree,
    reverse: ReverseIndex,
    source: SourceInfo,
    stats: IndexStats,
}

impl HierarchyIndex {
    pub fn build(response: &AccountSummaries) -> Self {
        build_index(response)
    }

    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::new(self)
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn reverse_index(&self) -> &ReverseIndex {
        &self.reverse
    }

    pub fn source(&self) -> &SourceInfo {
        &self.source
    }

    pub fn stats(&self) -> IndexStats {
        self.stats
    }

    /// Accounts in input order.
    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.tree.accounts().iter()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.accounts().is_empty()
    }
}
