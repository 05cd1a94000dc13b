use std::sync::Arc;

use axum::Router;
use finance_kit::AppConfig;

use crate::api::rest::routes;
use crate::config::CatalogConfig;
use crate::domain::repo::CatalogRepository;
use crate::domain::service::{CatalogService, ServiceConfig};
use crate::infra::memory_repo::InMemoryCatalogRepository;
use crate::seed::{CatalogSeedReport, seed_catalog};

/// Catalog wiring: configuration, storage, service and routes.
pub struct CatalogModule {
    config: CatalogConfig,
    repo: Arc<dyn CatalogRepository>,
    service: Arc<CatalogService>,
}

impl CatalogModule {
    pub const NAME: &'static str = "catalog";

    /// Builds the module from `modules.catalog.config` with in-memory storage.
    ///
    /// # Errors
    /// Returns an error if the module's configuration section is malformed.
    pub fn from_app_config(app: &AppConfig) -> anyhow::Result<Self> {
        let config: CatalogConfig = app.module_config_or_default(Self::NAME)?;
        Ok(Self::new(config, Arc::new(InMemoryCatalogRepository::new())))
    }

    #[must_use]
    pub fn new(config: CatalogConfig, repo: Arc<dyn CatalogRepository>) -> Self {
        let service = Arc::new(CatalogService::new(
            repo.clone(),
            ServiceConfig::from(&config),
        ));
        Self {
            config,
            repo,
            service,
        }
    }

    #[must_use]
    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    #[must_use]
    pub fn service(&self) -> Arc<CatalogService> {
        self.service.clone()
    }

    /// Applies the configured seed files.
    ///
    /// # Errors
    /// Returns an error if a seed file is unreadable, malformed or rejected.
    pub async fn seed(&self) -> anyhow::Result<CatalogSeedReport> {
        let report = seed_catalog(&self.service, self.repo.as_ref(), &self.config).await?;
        tracing::info!(
            currencies = report.currencies.inserted,
            account_types = report.account_types.inserted,
            "catalog: seed complete"
        );
        Ok(report)
    }

    #[must_use]
    pub fn router(&self) -> Router {
        routes::router(self.service.clone())
    }
}
