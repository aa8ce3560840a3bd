//! Facade over the individual models, shared process-wide by the HTTP shell.

use tracing::info;

use crate::error::Result;
use crate::prediction::categorizer::TransactionCategorizer;
use crate::prediction::recommender::RecommendationEngine;
use crate::prediction::types::{Recommendations, SpendingRecord, TransactionData};

/// Prediction service holding both models.
///
/// One instance is created at process start, loaded once, and shared behind
/// an `Arc` for the process lifetime. Inference methods take `&self` and are
/// safe for concurrent invocation.
#[derive(Debug, Default)]
pub struct PredictionService {
    /// Transaction categorization model.
    pub categorizer: TransactionCategorizer,
    /// Card recommendation model.
    pub recommendation_engine: RecommendationEngine,
}

impl PredictionService {
    /// Create a service with both models unloaded.
    pub fn new() -> Self {
        Self {
            categorizer: TransactionCategorizer::new(),
            recommendation_engine: RecommendationEngine::new(),
        }
    }

    /// Load both models. Idempotent.
    pub fn load(&self) {
        self.categorizer.load();
        self.recommendation_engine.load();
        info!("Prediction models loaded");
    }

    /// Categorize a batch of transactions.
    ///
    /// Returns `(categories, confidence_scores)`, both the same length as
    /// the input and in input order.
    pub async fn categorize_transactions(
        &self,
        transactions: &[TransactionData],
    ) -> Result<(Vec<String>, Vec<f64>)> {
        self.categorizer.categorize_batch(transactions)
    }

    /// Produce card recommendations for a user.
    pub async fn get_recommendations(
        &self,
        user_id: &str,
        spending_history: &[SpendingRecord],
        current_cards: &[String],
    ) -> Result<Recommendations> {
        self.recommendation_engine
            .recommend(user_id, spending_history, current_cards)
    }
}
