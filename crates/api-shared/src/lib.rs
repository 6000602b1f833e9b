//! # API Shared
//!
//! Shared utilities and definitions for the triage APIs.
//!
//! Contains:
//! - JSON wire types with OpenAPI schemas (`wire` module)
//! - Conversions between wire types and `triage-core` domain types
//! - Shared services like `HealthService`
//!
//! Used by `api-rest` and `triage-cli` for common functionality.

pub mod health;
pub mod wire;

pub use health::HealthService;
pub use wire::*;
