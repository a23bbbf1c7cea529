//! Tree Builder: one pass over an account-summaries page, producing the
//! nested tree and the reverse index together.
//!
//! Skip rule: a property whose profile sequence is absent or empty is treated
//! as deleted and contributes nothing, neither to the tree nor to the reverse
//! index. Nothing in here can fail; missing sequences simply read as empty,
//! and an entity without an identifier is dropped on its own (a property whose
//! profiles all lack identifiers ends up with none and is skipped as above).

use tracing::{debug, info, warn};

use crate::model::{AccountSummaries, AccountSummary, ProfileSummary};
use crate::record::{Account, Profile, Property};
use crate::reverse_index::{Relation, ReverseIndex};
use crate::tree::Tree;
use crate::{HierarchyIndex, IndexStats, SourceInfo};

/// Build a fresh index from one page of account summaries.
pub fn build_index(response: &AccountSummaries) -> HierarchyIndex {
    let mut builder = TreeBuilder::default();
    for summary in &response.items {
        builder.add_account(summary);
    }
    builder.finish(SourceInfo::from(response))
}

#[derive(Debug, Default)]
struct TreeBuilder {
    tree: Tree,
    reverse: ReverseIndex,
    skipped_properties: usize,
    duplicate_accounts: usize,
    missing_ids: usize,
}

impl TreeBuilder {
    fn add_account(&mut self, summary: &AccountSummary) {
        let Some(account_id) = summary.id.as_deref() else {
            debug!(name = %summary.name, "skipping account without id");
            self.missing_ids += 1;
            return;
        };
        let mut account = Account::from_summary(account_id, summary);

        for property_summary in summary.web_properties() {
            let Some(property_id) = property_summary.id.as_deref() else {
                debug!(
                    account_id,
                    name = %property_summary.name,
                    "skipping property without id"
                );
                self.missing_ids += 1;
                continue;
            };

            let profiles: Vec<(&str, &ProfileSummary)> = property_summary
                .profiles()
                .iter()
                .filter_map(|profile_summary| match profile_summary.id.as_deref() {
                    Some(profile_id) => Some((profile_id, profile_summary)),
                    None => {
                        debug!(
                            property_id,
                            name = %profile_summary.name,
                            "skipping profile without id"
                        );
                        self.missing_ids += 1;
                        None
                    }
                })
                .collect();

            if profiles.is_empty() {
                debug!(account_id, property_id, "skipping property without profiles");
                self.skipped_properties += 1;
                continue;
            }

            let mut property = Property::from_summary(property_id, property_summary);
            for (profile_id, profile_summary) in profiles {
                self.reverse
                    .record(Relation::AccountOfProfile, profile_id, account_id);
                self.reverse
                    .record(Relation::PropertyOfProfile, profile_id, property_id);
                property
                    .profiles
                    .insert(Profile::from_summary(profile_id, profile_summary));
            }

            self.reverse
                .record(Relation::AccountOfProperty, property_id, account_id);
            account.properties.insert(property);
        }

        if let Some(previous) = self.tree.insert(account) {
            warn!(
                account_id,
                replaced_properties = previous.properties().len(),
                "duplicate account id; keeping the last occurrence"
            );
            self.duplicate_accounts += 1;
        }
    }

    fn finish(self, source: SourceInfo) -> HierarchyIndex {
        let stats = IndexStats {
            accounts: self.tree.accounts().len(),
            properties: self.tree.property_count(),
            profiles: self.tree.profile_count(),
            skipped_properties: self.skipped_properties,
            duplicate_accounts: self.duplicate_accounts,
            missing_ids: self.missing_ids,
        };

        info!(
            accounts = stats.accounts,
            properties = stats.properties,
            profiles = stats.profiles,
            skipped_properties = stats.skipped_properties,
            duplicate_accounts = stats.duplicate_accounts,
            missing_ids = stats.missing_ids,
            reverse_entries = self.reverse.len(),
            "built account hierarchy index"
        );

        HierarchyIndex {
            tree: self.tree,
            reverse: self.reverse,
            source,
            stats,
        }
    }
}
