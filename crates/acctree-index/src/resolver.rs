//! Entity Resolver: read-only lookups over a built [`HierarchyIndex`].
//!
//! Every operation is total. A miss (unknown id, id of a skipped property,
//! or a reverse entry left behind by a replaced duplicate account) is `None`.

use serde::Serialize;

use crate::record::{Account, Profile, Property};
use crate::reverse_index::Relation;
use crate::HierarchyIndex;

#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    index: &'a HierarchyIndex,
}

/// A profile together with both of its ancestors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Lineage<'a> {
    pub account: &'a Account,
    pub property: &'a Property,
    pub profile: &'a Profile,
}

impl<'a> Resolver<'a> {
    pub fn new(index: &'a HierarchyIndex) -> Self {
        Self { index }
    }

    fn ancestor(&self, relation: Relation, child_id: &str) -> Option<&'a str> {
        self.index.reverse_index().ancestor(relation, child_id)
    }

    // ========================================================================
    // Lookups by id
    // ========================================================================

    pub fn account(&self, account_id: &str) -> Option<&'a Account> {
        self.index.tree().account(account_id)
    }

    pub fn property(&self, property_id: &str) -> Option<&'a Property> {
        let account_id = self.ancestor(Relation::AccountOfProperty, property_id)?;
        self.index.tree().property(account_id, property_id)
    }

    pub fn profile(&self, profile_id: &str) -> Option<&'a Profile> {
        self.property_by_profile_id(profile_id)?.profile(profile_id)
    }

    pub fn account_by_property_id(&self, property_id: &str) -> Option<&'a Account> {
        self.account(self.ancestor(Relation::AccountOfProperty, property_id)?)
    }

    pub fn account_by_profile_id(&self, profile_id: &str) -> Option<&'a Account> {
        self.account(self.ancestor(Relation::AccountOfProfile, profile_id)?)
    }

    pub fn property_by_profile_id(&self, profile_id: &str) -> Option<&'a Property> {
        let account_id = self.ancestor(Relation::AccountOfProfile, profile_id)?;
        let property_id = self.ancestor(Relation::PropertyOfProfile, profile_id)?;
        self.index.tree().property(account_id, property_id)
    }

    // ========================================================================
    // Lookups by full path
    // ========================================================================

    pub fn property_at(&self, account_id: &str, property_id: &str) -> Option<&'a Property> {
        self.index.tree().property(account_id, property_id)
    }

    pub fn profile_at(
        &self,
        account_id: &str,
        property_id: &str,
        profile_id: &str,
    ) -> Option<&'a Profile> {
        self.index.tree().profile(account_id, property_id, profile_id)
    }

    /// Resolve a profile and both ancestors in one go.
    pub fn lineage(&self, profile_id: &str) -> Option<Lineage<'a>> {
        let account = self.account_by_profile_id(profile_id)?;
        let property_id = self.ancestor(Relation::PropertyOfProfile, profile_id)?;
        let property = account.property(property_id)?;
        let profile = property.profile(profile_id)?;
        Some(Lineage {
            account,
            property,
            profile,
        })
    }

    /// All profiles under an account, in input order. Empty on a miss.
    pub fn profiles_of_account(&self, account_id: &str) -> Vec<&'a Profile> {
        self.account(account_id)
            .map(|account| {
                account
                    .properties()
                    .iter()
                    .flat_map(|property| property.profiles())
                    .collect()
            })
            .unwrap_or_default()
    }
}
