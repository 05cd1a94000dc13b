use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::domain::model::{AccountType, Currency};
use crate::domain::repo::CatalogRepository;

/// Process-local catalog storage. Listings come back ordered by code.
#[derive(Debug, Default)]
pub struct InMemoryCatalogRepository {
    currencies: RwLock<BTreeMap<String, Currency>>,
    account_types: RwLock<BTreeMap<String, AccountType>>,
}

impl InMemoryCatalogRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn insert_new<T>(map: &RwLock<BTreeMap<String, T>>, code: &str, value: T) -> bool {
    match map.write().entry(code.to_owned()) {
        Entry::Occupied(_) => false,
        Entry::Vacant(slot) => {
            slot.insert(value);
            true
        }
    }
}

#[async_trait]
impl CatalogRepository for InMemoryCatalogRepository {
    async fn list_currencies(&self) -> anyhow::Result<Vec<Currency>> {
        Ok(self.currencies.read().values().cloned().collect())
    }

    async fn find_currency(&self, code: &str) -> anyhow::Result<Option<Currency>> {
        Ok(self.currencies.read().get(code).cloned())
    }

    async fn insert_currency(&self, currency: Currency) -> anyhow::Result<bool> {
        let code = currency.code.clone();
        Ok(insert_new(&self.currencies, &code, currency))
    }

    async fn update_currency(&self, currency: Currency) -> anyhow::Result<bool> {
        let mut currencies = self.currencies.write();
        match currencies.get_mut(&currency.code) {
            Some(existing) => {
                *existing = currency;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_currency(&self, code: &str) -> anyhow::Result<bool> {
        Ok(self.currencies.write().remove(code).is_some())
    }

    async fn list_account_types(&self) -> anyhow::Result<Vec<AccountType>> {
        Ok(self.account_types.read().values().cloned().collect())
    }

    async fn find_account_type(&self, code: &str) -> anyhow::Result<Option<AccountType>> {
        Ok(self.account_types.read().get(code).cloned())
    }

    async fn insert_account_type(&self, account_type: AccountType) -> anyhow::Result<bool> {
        let code = account_type.code.clone();
        Ok(insert_new(&self.account_types, &code, account_type))
    }
}
