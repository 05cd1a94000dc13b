//! Catalog Module Implementation
//!
//! Reference data shared by the finance services: currencies and account
//! types. Exposed over REST under `/api/v1` and seeded from JSON files at
//! startup.

pub mod module;
pub use module::CatalogModule;

pub mod config;
pub use config::CatalogConfig;

pub mod domain;
pub use domain::model::{AccountType, Currency};
pub use domain::service::CatalogService;

pub mod seed;

#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod infra;
