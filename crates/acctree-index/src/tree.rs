use crate::record::{Account, Children, Profile, Property};

/// Nested lookup tree: account id → account → property id → property →
/// profile id → profile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    accounts: Children<Account>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `account`, returning the record it replaced (last write wins).
    pub(crate) fn insert(&mut self, account: Account) -> Option<Account> {
        self.accounts.insert(account)
    }

    pub fn accounts(&self) -> &Children<Account> {
        &self.accounts
    }

    pub fn account(&self, account_id: &str) -> Option<&Account> {
        self.accounts.get(account_id)
    }

    pub fn property(&self, account_id: &str, property_id: &str) -> Option<&Property> {
        self.account(account_id)?.property(property_id)
    }

    pub fn profile(
        &self,
        account_id: &str,
        property_id: &str,
        profile_id: &str,
    ) -> Option<&Profile> {
        self.property(account_id, property_id)?.profile(profile_id)
    }

    pub fn property_count(&self) -> usize {
        self.accounts.iter().map(|a| a.properties().len()).sum()
    }

    pub fn profile_count(&self) -> usize {
        self.accounts
            .iter()
            .flat_map(|a| a.properties())
            .map(|p| p.profiles().len())
            .sum()
    }
}
