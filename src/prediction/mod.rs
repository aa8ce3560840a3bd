//! Prediction layer: transaction categorizer, recommendation engine, and the
//! [`PredictionService`] facade the HTTP shell delegates to.

pub mod categorizer;
pub mod recommender;
pub mod service;
pub mod types;

pub use categorizer::TransactionCategorizer;
pub use recommender::RecommendationEngine;
pub use service::PredictionService;
pub use types::{Recommendations, SpendingRecord, TransactionData};
