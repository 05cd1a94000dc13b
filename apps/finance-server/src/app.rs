use axum::Router;
use catalog::CatalogModule;
use finance_errors::HandlerRegistry;
use finance_kit::AppConfig;
use finance_kit::api::{BoundaryState, GlobalErrorHandler, apply_middleware_stack};

/// Builds every module from `config`, seeds them and assembles the router.
pub async fn build_app(config: &AppConfig) -> anyhow::Result<Router> {
    let catalog = CatalogModule::from_app_config(config)?;
    catalog.seed().await?;

    let registry = HandlerRegistry::with_defaults();
    tracing::debug!(categories = ?registry.registered(), "Problem handlers registered");

    let state = BoundaryState::new(GlobalErrorHandler::new(registry));
    Ok(apply_middleware_stack(catalog.router(), state))
}

/// Validates the module sections without starting anything.
pub fn check_modules(config: &AppConfig) -> anyhow::Result<()> {
    let catalog = CatalogModule::from_app_config(config)?;
    if let Some(dir) = &catalog.config().seed_dir {
        if !dir.is_dir() {
            anyhow::bail!("catalog seed_dir does not exist: {}", dir.display());
        }
    }
    Ok(())
}
