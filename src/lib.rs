//! Credit card optimizer ML services.
//!
//! This library exposes two machine-learning capabilities over HTTP:
//! transaction categorization and card recommendation. The HTTP layer is a
//! thin shell: it validates request shape, delegates to the shared
//! [`prediction::PredictionService`], and maps any inference failure to a
//! uniform 500 response.
//!
//! # Endpoints
//!
//! ```text
//! GET  /health         -> {"status":"healthy","service":"ml-services"}
//! POST /categorize     -> categories + confidence scores, 1:1 with input
//! POST /recommend      -> recommended cards, reasons, expected rewards
//! GET  /models/status  -> per-model readiness flags
//! GET  /metrics        -> Prometheus exposition
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`prediction`]: Categorizer, recommendation engine, and their facade
//! - [`api`]: HTTP routes and handlers
//! - [`metrics`]: Prometheus metrics
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod prediction;
pub mod utils;

pub use config::Config;
pub use error::{PredictionError, Result};
pub use prediction::PredictionService;
