//! # API Shared
//!
//! Wire types and shared services for the Entrevistas APIs.
//!
//! Contains:
//! - Request/response DTOs (`dto` module) using the field names the front-end already speaks
//! - Conversions between DTOs and `entrevistas-core` records
//! - `HealthService`

pub mod dto;
pub mod health;

pub use dto::*;
pub use health::HealthService;
