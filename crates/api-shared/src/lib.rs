//! # API Shared
//!
//! Shared request/response definitions for the symptom checker APIs.
//!
//! Contains:
//! - Wire types (`types` module) with serde and OpenAPI schemas
//! - Shared services like `HealthService`
//!
//! Used by `api-rest` and any other front end that speaks the same JSON.

pub mod health;
pub mod types;

pub use health::HealthService;
pub use types::*;
