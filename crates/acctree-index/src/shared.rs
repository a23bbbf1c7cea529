//! Shared handle for readers on other threads.
//!
//! A rebuild constructs the replacement index off to the side and only then
//! swaps it in, so a reader either sees the old index or the new one, never a
//! half-built one. Snapshots taken before a swap stay valid.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::model::AccountSummaries;
use crate::{build_index, HierarchyIndex, IndexStats};

#[derive(Debug, Default)]
pub struct SharedIndex {
    current: RwLock<Arc<HierarchyIndex>>,
}

impl SharedIndex {
    pub fn new(index: HierarchyIndex) -> Self {
        Self {
            current: RwLock::new(Arc::new(index)),
        }
    }

    pub fn from_response(response: &AccountSummaries) -> Self {
        Self::new(build_index(response))
    }

    /// The index as of now. Cheap: clones an `Arc`.
    pub fn snapshot(&self) -> Arc<HierarchyIndex> {
        Arc::clone(&self.current.read())
    }

    /// Swap in an already-built index, returning the one it replaced.
    pub fn replace(&self, index: HierarchyIndex) -> Arc<HierarchyIndex> {
        let fresh = Arc::new(index);
        std::mem::replace(&mut *self.current.write(), fresh)
    }

    /// Build from `response` and swap the result in.
    pub fn rebuild(&self, response: &AccountSummaries) -> IndexStats {
        let fresh = build_index(response);
        let stats = fresh.stats();
        let previous = self.replace(fresh);
        debug!(
            previous_accounts = previous.stats().accounts,
            accounts = stats.accounts,
            "swapped in rebuilt hierarchy index"
        );
        stats
    }
}
