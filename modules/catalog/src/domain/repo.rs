use async_trait::async_trait;

use super::model::{AccountType, Currency};

/// Storage for catalog entries.
///
/// `insert_*` return `false` instead of overwriting when the code is taken,
/// so duplicate detection stays atomic.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn list_currencies(&self) -> anyhow::Result<Vec<Currency>>;

    async fn find_currency(&self, code: &str) -> anyhow::Result<Option<Currency>>;

    async fn insert_currency(&self, currency: Currency) -> anyhow::Result<bool>;

    /// Replaces an existing currency. Returns `false` if none has that code.
    async fn update_currency(&self, currency: Currency) -> anyhow::Result<bool>;

    async fn delete_currency(&self, code: &str) -> anyhow::Result<bool>;

    async fn list_account_types(&self) -> anyhow::Result<Vec<AccountType>>;

    async fn find_account_type(&self, code: &str) -> anyhow::Result<Option<AccountType>>;

    async fn insert_account_type(&self, account_type: AccountType) -> anyhow::Result<bool>;
}
