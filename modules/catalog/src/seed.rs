//! Startup seeding of the catalog from `currencies.json` and
//! `account_types.json`.

use std::path::Path;

use async_trait::async_trait;
use finance_kit::seed::{SeedError, SeedReport, SeedStore, seed_from_file};

use crate::config::CatalogConfig;
use crate::domain::model::{AccountType, Currency};
use crate::domain::repo::CatalogRepository;
use crate::domain::service::CatalogService;

pub const CURRENCIES_FILE: &str = "currencies.json";
pub const ACCOUNT_TYPES_FILE: &str = "account_types.json";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogSeedReport {
    pub currencies: SeedReport,
    pub account_types: SeedReport,
}

/// Seeds through the service's validation rules straight into the repository.
struct CatalogStore<'a> {
    service: &'a CatalogService,
    repo: &'a dyn CatalogRepository,
}

#[async_trait]
impl SeedStore<Currency> for CatalogStore<'_> {
    async fn contains(&self, item: &Currency) -> anyhow::Result<bool> {
        Ok(self.repo.find_currency(&item.code).await?.is_some())
    }

    async fn insert(&self, item: Currency) -> anyhow::Result<bool> {
        let currency = self.service.validate_new_currency(item.into())?;
        Ok(self.repo.insert_currency(currency).await?)
    }
}

#[async_trait]
impl SeedStore<AccountType> for CatalogStore<'_> {
    async fn contains(&self, item: &AccountType) -> anyhow::Result<bool> {
        Ok(self.repo.find_account_type(&item.code).await?.is_some())
    }

    async fn insert(&self, item: AccountType) -> anyhow::Result<bool> {
        let account_type = self.service.validate_new_account_type(item.into())?;
        Ok(self.repo.insert_account_type(account_type).await?)
    }
}

/// Loads the seed files found in `config.seed_dir`.
///
/// A missing directory setting or a missing file is not an error; entries
/// that already exist are left untouched.
///
/// # Errors
/// Returns a [`SeedError`] if a present file cannot be read, parsed or stored.
pub async fn seed_catalog(
    service: &CatalogService,
    repo: &dyn CatalogRepository,
    config: &CatalogConfig,
) -> Result<CatalogSeedReport, SeedError> {
    let Some(dir) = config.seed_dir.as_deref() else {
        tracing::info!("catalog: no seed_dir configured, skipping seed");
        return Ok(CatalogSeedReport::default());
    };

    let store = CatalogStore { service, repo };
    let mut report = CatalogSeedReport::default();

    let currencies = dir.join(CURRENCIES_FILE);
    if present(&currencies) {
        report.currencies = seed_from_file::<Currency, _>(&store, &currencies).await?;
    }

    let account_types = dir.join(ACCOUNT_TYPES_FILE);
    if present(&account_types) {
        report.account_types = seed_from_file::<AccountType, _>(&store, &account_types).await?;
    }

    Ok(report)
}

fn present(path: &Path) -> bool {
    let exists = path.is_file();
    if !exists {
        tracing::warn!(path = %path.display(), "catalog: seed file not found, skipping");
    }
    exists
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::domain::service::ServiceConfig;
    use crate::infra::memory_repo::InMemoryCatalogRepository;
    use std::sync::Arc;

    fn setup() -> (CatalogService, Arc<InMemoryCatalogRepository>) {
        let repo = Arc::new(InMemoryCatalogRepository::new());
        let service = CatalogService::new(repo.clone(), ServiceConfig::default());
        (service, repo)
    }

    fn config_for(dir: &Path) -> CatalogConfig {
        CatalogConfig {
            seed_dir: Some(dir.to_path_buf()),
            ..CatalogConfig::default()
        }
    }

    #[tokio::test]
    async fn seeds_both_files_once() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CURRENCIES_FILE),
            r#"[{"code":"USD","name":"US Dollar","symbol":"$"},{"code":"EUR","name":"Euro"}]"#,
        )
        .unwrap();
        std::fs::write(
            dir.path().join(ACCOUNT_TYPES_FILE),
            r#"[{"code":"cash","name":"Cash"}]"#,
        )
        .unwrap();
        let (service, repo) = setup();
        let config = config_for(dir.path());

        let first = seed_catalog(&service, repo.as_ref(), &config).await.unwrap();
        let second = seed_catalog(&service, repo.as_ref(), &config).await.unwrap();

        assert_eq!(first.currencies.inserted, 2);
        assert_eq!(first.account_types.inserted, 1);
        assert_eq!(second.currencies, SeedReport { inserted: 0, skipped: 2 });
        assert_eq!(second.account_types, SeedReport { inserted: 0, skipped: 1 });
        assert_eq!(service.list_currencies().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn padded_duplicate_code_is_counted_as_skipped() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CURRENCIES_FILE),
            r#"[{"code":"USD","name":"US Dollar"},{"code":" USD","name":"Dollar again"}]"#,
        )
        .unwrap();
        std::fs::write(
            dir.path().join(ACCOUNT_TYPES_FILE),
            r#"[{"code":"cash","name":"Cash"},{"code":"cash ","name":"Cash again"}]"#,
        )
        .unwrap();
        let (service, repo) = setup();

        let report = seed_catalog(&service, repo.as_ref(), &config_for(dir.path()))
            .await
            .unwrap();

        assert_eq!(report.currencies, SeedReport { inserted: 1, skipped: 1 });
        assert_eq!(report.account_types, SeedReport { inserted: 1, skipped: 1 });
        assert_eq!(service.get_currency("USD").await.unwrap().name, "US Dollar");
        assert_eq!(service.get_account_type("cash").await.unwrap().name, "Cash");
    }

    #[tokio::test]
    async fn missing_files_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let (service, repo) = setup();

        let report = seed_catalog(&service, repo.as_ref(), &config_for(dir.path()))
            .await
            .unwrap();

        assert_eq!(report, CatalogSeedReport::default());
    }

    #[tokio::test]
    async fn no_seed_dir_is_a_no_op() {
        let (service, repo) = setup();
        let report = seed_catalog(&service, repo.as_ref(), &CatalogConfig::default())
            .await
            .unwrap();
        assert_eq!(report, CatalogSeedReport::default());
    }

    #[tokio::test]
    async fn invalid_rows_fail_the_seed() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CURRENCIES_FILE),
            r#"[{"code":"usd","name":"lower-case code"}]"#,
        )
        .unwrap();
        let (service, repo) = setup();

        let err = seed_catalog(&service, repo.as_ref(), &config_for(dir.path()))
            .await
            .unwrap_err();

        assert!(matches!(err, SeedError::Store { .. }));
        assert!(service.list_currencies().await.unwrap().is_empty());
    }
}
