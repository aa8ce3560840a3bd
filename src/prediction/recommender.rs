//! Rule-based card recommendation engine.
//!
//! Aggregates a user's spending history by category, then picks cards from a
//! static catalog whose bonus category matches the user's heaviest spending
//! and which the user does not already hold. `expected_rewards` is the sum of
//! `spend * reward_rate` over the recommended cards.

use std::collections::HashMap;

use once_cell::sync::OnceCell;
use tracing::debug;

use crate::error::{PredictionError, Result};
use crate::prediction::types::{Recommendations, SpendingRecord};

/// Maximum number of cards returned per request.
const MAX_RECOMMENDATIONS: usize = 3;

/// One card in the static catalog.
#[derive(Debug, Clone)]
struct CardOffer {
    name: &'static str,
    /// Bonus spending category, or "Other" for flat-rate cards.
    category: &'static str,
    /// Reward rate on the bonus category (0.05 = 5%).
    reward_rate: f64,
}

/// Rule-based recommendation engine over a static card catalog.
#[derive(Debug, Default)]
pub struct RecommendationEngine {
    catalog: OnceCell<Vec<CardOffer>>,
}

impl RecommendationEngine {
    /// Create an unloaded engine.
    pub fn new() -> Self {
        Self {
            catalog: OnceCell::new(),
        }
    }

    /// Build the card catalog. Idempotent.
    pub fn load(&self) {
        self.catalog.get_or_init(|| {
            let catalog = card_catalog();
            debug!("Recommendation engine loaded with {} cards", catalog.len());
            catalog
        });
    }

    /// Whether the card catalog has been built.
    pub fn is_loaded(&self) -> bool {
        self.catalog.get().is_some()
    }

    /// Produce card recommendations for a user.
    ///
    /// `spending_history` entries are opaque records; only the `category`
    /// (string) and `amount` (number) keys are read, anything else is
    /// ignored. Cards already in `current_cards` are never recommended.
    /// `recommended_cards` and `reasons` are always the same length.
    pub fn recommend(
        &self,
        user_id: &str,
        spending_history: &[SpendingRecord],
        current_cards: &[String],
    ) -> Result<Recommendations> {
        let catalog = self.catalog.get().ok_or(PredictionError::ModelNotLoaded {
            model: "recommendation_engine",
        })?;

        let totals = spend_by_category(spending_history);

        // Heaviest spending first; ties broken by category name for
        // deterministic output.
        let mut ranked: Vec<(&String, &f64)> = totals.iter().collect();
        ranked.sort_by(|a, b| {
            b.1.partial_cmp(a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(b.0))
        });

        let mut recommended_cards = Vec::new();
        let mut reasons = Vec::new();
        let mut expected_rewards = 0.0;

        for (category, spend) in &ranked {
            if recommended_cards.len() >= MAX_RECOMMENDATIONS {
                break;
            }

            let offer = catalog.iter().find(|card| {
                card.category == category.as_str()
                    && !current_cards.iter().any(|held| held == card.name)
                    && !recommended_cards.contains(&card.name.to_string())
            });

            if let Some(card) = offer {
                reasons.push(format!(
                    "{:.1}% back on {} where you spent ${:.2}",
                    card.reward_rate * 100.0,
                    card.category,
                    spend
                ));
                recommended_cards.push(card.name.to_string());
                expected_rewards += *spend * card.reward_rate;
            }
        }

        // No category card matched: offer the flat-rate card if not held.
        if recommended_cards.is_empty() {
            if let Some(card) = catalog.iter().find(|card| {
                card.category == "Other" && !current_cards.iter().any(|h| h == card.name)
            }) {
                let total_spend: f64 = totals.values().sum();
                reasons.push(format!(
                    "{:.1}% flat-rate cash back on all purchases",
                    card.reward_rate * 100.0
                ));
                recommended_cards.push(card.name.to_string());
                expected_rewards += total_spend * card.reward_rate;
            }
        }

        debug!(
            user_id,
            recommended = recommended_cards.len(),
            "Recommendation complete"
        );

        Ok(Recommendations {
            recommended_cards,
            reasons,
            expected_rewards,
        })
    }
}

/// Sum spending per category from the opaque history records.
fn spend_by_category(history: &[SpendingRecord]) -> HashMap<String, f64> {
    let mut totals: HashMap<String, f64> = HashMap::new();

    for record in history {
        let category = record
            .get("category")
            .and_then(|v| v.as_str())
            .unwrap_or("Other");
        let amount = record.get("amount").and_then(|v| v.as_f64()).unwrap_or(0.0);

        *totals.entry(category.to_string()).or_insert(0.0) += amount;
    }

    totals
}

fn card_catalog() -> Vec<CardOffer> {
    vec![
        CardOffer {
            name: "Dining Rewards Platinum",
            category: "Dining",
            reward_rate: 0.05,
        },
        CardOffer {
            name: "Travel Rewards Gold",
            category: "Travel",
            reward_rate: 0.04,
        },
        CardOffer {
            name: "Grocery Cashback Plus",
            category: "Groceries",
            reward_rate: 0.03,
        },
        CardOffer {
            name: "Shopping Rewards Card",
            category: "Shopping",
            reward_rate: 0.02,
        },
        CardOffer {
            name: "Fuel Saver Card",
            category: "Gas",
            reward_rate: 0.03,
        },
        CardOffer {
            name: "Everyday Cash",
            category: "Other",
            reward_rate: 0.015,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(category: &str, amount: f64) -> SpendingRecord {
        match json!({"category": category, "amount": amount}) {
            serde_json::Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    fn loaded_engine() -> RecommendationEngine {
        let engine = RecommendationEngine::new();
        engine.load();
        engine
    }

    #[test]
    fn unloaded_engine_fails() {
        let engine = RecommendationEngine::new();
        assert!(!engine.is_loaded());

        let result = engine.recommend("u1", &[], &[]);
        assert!(matches!(
            result,
            Err(PredictionError::ModelNotLoaded {
                model: "recommendation_engine"
            })
        ));
    }

    #[test]
    fn cards_and_reasons_have_equal_length() {
        let engine = loaded_engine();
        let history = vec![
            record("Dining", 200.0),
            record("Travel", 800.0),
            record("Groceries", 350.0),
            record("Gas", 90.0),
        ];

        let recs = engine.recommend("u1", &history, &[]).unwrap();
        assert_eq!(recs.recommended_cards.len(), recs.reasons.len());
        assert!(recs.recommended_cards.len() <= MAX_RECOMMENDATIONS);
    }

    #[test]
    fn heaviest_category_recommended_first() {
        let engine = loaded_engine();
        let history = vec![record("Dining", 50.0), record("Travel", 900.0)];

        let recs = engine.recommend("u1", &history, &[]).unwrap();
        assert_eq!(recs.recommended_cards[0], "Travel Rewards Gold");
    }

    #[test]
    fn held_cards_are_not_recommended() {
        let engine = loaded_engine();
        let history = vec![record("Dining", 500.0)];
        let held = vec!["Dining Rewards Platinum".to_string()];

        let recs = engine.recommend("u1", &history, &held).unwrap();
        assert!(!recs
            .recommended_cards
            .contains(&"Dining Rewards Platinum".to_string()));
    }

    #[test]
    fn empty_history_falls_back_to_flat_rate_card() {
        let engine = loaded_engine();

        let recs = engine.recommend("u1", &[], &[]).unwrap();
        assert_eq!(recs.recommended_cards, vec!["Everyday Cash".to_string()]);
        assert_eq!(recs.reasons.len(), 1);
        assert_eq!(recs.expected_rewards, 0.0);
    }

    #[test]
    fn expected_rewards_sums_spend_times_rate() {
        let engine = loaded_engine();
        let history = vec![record("Dining", 200.0)];

        let recs = engine.recommend("u1", &history, &[]).unwrap();
        assert_eq!(recs.recommended_cards, vec!["Dining Rewards Platinum".to_string()]);
        assert!((recs.expected_rewards - 10.0).abs() < 1e-9);
    }

    #[test]
    fn malformed_history_entries_are_tolerated() {
        let engine = loaded_engine();
        let odd = match json!({"note": "no category or amount"}) {
            serde_json::Value::Object(map) => map,
            _ => unreachable!(),
        };

        let recs = engine.recommend("u1", &[odd], &[]).unwrap();
        assert_eq!(recs.recommended_cards.len(), recs.reasons.len());
    }
}
