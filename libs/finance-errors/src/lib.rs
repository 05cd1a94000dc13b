//! Error taxonomy and problem-details classification for the finance services
//!
//! This crate has no dependency on an HTTP framework unless the `axum`
//! feature is enabled. It includes:
//! - RFC 7807 Problem Details (`Problem`)
//! - The error category tree (`ErrorCategory`) and service error (`ServiceError`)
//! - Per-category and fallback handlers (`ProblemHandler`)
//! - The category-keyed dispatcher (`HandlerRegistry`)
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod catalog;
pub mod category;
pub mod error;
pub mod handler;
pub mod problem;
pub mod registry;

pub use catalog::ErrDef;
pub use category::ErrorCategory;
#[cfg(feature = "axum")]
pub use error::RaisedError;
pub use error::{ServiceError, ServiceResult};
pub use handler::{CategoryHandler, FallbackHandler, HandlerError, ProblemHandler};
pub use problem::{APPLICATION_PROBLEM_JSON, Problem, TRACE_ID_KEY};
pub use registry::{ClassifyError, HandlerRegistry, HandlerRegistryBuilder};
