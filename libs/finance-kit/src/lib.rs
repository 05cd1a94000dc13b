//! Shared runtime pieces for the finance services
//!
//! - [`api`]: problem-details boundary, request ids and the axum middleware stack
//! - [`config`]: layered configuration (defaults, YAML, environment, CLI)
//! - [`logging`]: `tracing` subscriber setup
//! - [`seed`]: idempotent JSON reference-data loading
//! - [`shutdown`]: signal-driven cancellation
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod api;
pub mod config;
pub mod logging;
pub mod seed;
pub mod shutdown;

pub use config::{AppConfig, ConfigError, ServerConfig};
pub use logging::{LogFormat, LoggingConfig, init_logging};
