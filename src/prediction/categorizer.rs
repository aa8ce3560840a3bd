//! Keyword-based transaction categorizer.
//!
//! Assigns a spending category and confidence score to each transaction by
//! matching merchant names and descriptions against a keyword table. The
//! table is built once by [`TransactionCategorizer::load`]; calling
//! [`TransactionCategorizer::categorize_batch`] before that fails with a
//! model-not-loaded error.

use once_cell::sync::OnceCell;
use tracing::debug;

use crate::error::{PredictionError, Result};
use crate::prediction::types::TransactionData;

/// Confidence assigned when the merchant name matches a keyword.
const MERCHANT_MATCH_CONFIDENCE: f64 = 0.91;
/// Confidence assigned when only the description matches a keyword.
const DESCRIPTION_MATCH_CONFIDENCE: f64 = 0.78;
/// Confidence assigned to the fallback category.
const FALLBACK_CONFIDENCE: f64 = 0.35;
/// Category assigned when nothing matches.
const FALLBACK_CATEGORY: &str = "Other";

/// One category with its trigger keywords. First match wins, so the table
/// order is significant.
#[derive(Debug, Clone)]
struct CategoryEntry {
    name: &'static str,
    keywords: &'static [&'static str],
}

/// Keyword-matching transaction categorizer.
#[derive(Debug, Default)]
pub struct TransactionCategorizer {
    table: OnceCell<Vec<CategoryEntry>>,
}

impl TransactionCategorizer {
    /// Create an unloaded categorizer.
    pub fn new() -> Self {
        Self {
            table: OnceCell::new(),
        }
    }

    /// Build the keyword table. Idempotent.
    pub fn load(&self) {
        self.table.get_or_init(|| {
            let table = keyword_table();
            debug!("Categorizer loaded with {} categories", table.len());
            table
        });
    }

    /// Whether the keyword table has been built.
    pub fn is_loaded(&self) -> bool {
        self.table.get().is_some()
    }

    /// Categorize a batch of transactions.
    ///
    /// Returns one `(category, confidence)` pair per input transaction, in
    /// input order. An empty batch yields empty outputs.
    pub fn categorize_batch(
        &self,
        transactions: &[TransactionData],
    ) -> Result<(Vec<String>, Vec<f64>)> {
        let table = self
            .table
            .get()
            .ok_or(PredictionError::ModelNotLoaded {
                model: "categorizer",
            })?;

        let mut categories = Vec::with_capacity(transactions.len());
        let mut confidence_scores = Vec::with_capacity(transactions.len());

        for tx in transactions {
            let (category, confidence) = categorize_one(table, tx);
            categories.push(category);
            confidence_scores.push(confidence);
        }

        Ok((categories, confidence_scores))
    }
}

/// Categorize a single transaction against the keyword table.
fn categorize_one(table: &[CategoryEntry], tx: &TransactionData) -> (String, f64) {
    let merchant = tx.merchant.to_lowercase();

    for entry in table {
        if entry.keywords.iter().any(|kw| merchant.contains(kw)) {
            return (entry.name.to_string(), MERCHANT_MATCH_CONFIDENCE);
        }
    }

    if let Some(description) = &tx.description {
        let description = description.to_lowercase();
        for entry in table {
            if entry.keywords.iter().any(|kw| description.contains(kw)) {
                return (entry.name.to_string(), DESCRIPTION_MATCH_CONFIDENCE);
            }
        }
    }

    (FALLBACK_CATEGORY.to_string(), FALLBACK_CONFIDENCE)
}

fn keyword_table() -> Vec<CategoryEntry> {
    vec![
        CategoryEntry {
            name: "Shopping",
            keywords: &["amazon", "walmart", "target", "ebay", "etsy", "best buy"],
        },
        CategoryEntry {
            name: "Groceries",
            keywords: &[
                "whole foods",
                "safeway",
                "kroger",
                "trader joe",
                "aldi",
                "grocery",
            ],
        },
        CategoryEntry {
            name: "Dining",
            keywords: &[
                "starbucks",
                "mcdonald",
                "chipotle",
                "doordash",
                "grubhub",
                "restaurant",
                "cafe",
            ],
        },
        CategoryEntry {
            name: "Travel",
            keywords: &[
                "united", "delta", "airline", "hotel", "airbnb", "uber", "lyft", "expedia",
            ],
        },
        CategoryEntry {
            name: "Entertainment",
            keywords: &["netflix", "spotify", "hulu", "steam", "cinema", "theater"],
        },
        CategoryEntry {
            name: "Gas",
            keywords: &["shell", "chevron", "exxon", "fuel", "gas station"],
        },
        CategoryEntry {
            name: "Utilities",
            keywords: &["comcast", "verizon", "electric", "water bill", "internet"],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(merchant: &str, amount: f64, description: Option<&str>) -> TransactionData {
        TransactionData {
            merchant: merchant.to_string(),
            amount,
            description: description.map(str::to_string),
        }
    }

    #[test]
    fn unloaded_categorizer_fails() {
        let categorizer = TransactionCategorizer::new();
        assert!(!categorizer.is_loaded());

        let result = categorizer.categorize_batch(&[tx("Amazon", 10.0, None)]);
        assert!(matches!(
            result,
            Err(PredictionError::ModelNotLoaded {
                model: "categorizer"
            })
        ));
    }

    #[test]
    fn load_is_idempotent() {
        let categorizer = TransactionCategorizer::new();
        categorizer.load();
        categorizer.load();
        assert!(categorizer.is_loaded());
    }

    #[test]
    fn merchant_match_wins_with_high_confidence() {
        let categorizer = TransactionCategorizer::new();
        categorizer.load();

        let (categories, scores) = categorizer
            .categorize_batch(&[tx("Amazon", 42.5, None)])
            .unwrap();

        assert_eq!(categories, vec!["Shopping".to_string()]);
        assert_eq!(scores, vec![MERCHANT_MATCH_CONFIDENCE]);
    }

    #[test]
    fn description_match_used_when_merchant_unknown() {
        let categorizer = TransactionCategorizer::new();
        categorizer.load();

        let (categories, scores) = categorizer
            .categorize_batch(&[tx("ACME 123", 5.0, Some("coffee at the cafe"))])
            .unwrap();

        assert_eq!(categories, vec!["Dining".to_string()]);
        assert_eq!(scores, vec![DESCRIPTION_MATCH_CONFIDENCE]);
    }

    #[test]
    fn unknown_transaction_falls_back_to_other() {
        let categorizer = TransactionCategorizer::new();
        categorizer.load();

        let (categories, scores) = categorizer
            .categorize_batch(&[tx("XJ-9000", 1.0, None)])
            .unwrap();

        assert_eq!(categories, vec!["Other".to_string()]);
        assert_eq!(scores, vec![FALLBACK_CONFIDENCE]);
    }

    #[test]
    fn batch_preserves_input_order() {
        let categorizer = TransactionCategorizer::new();
        categorizer.load();

        let batch = vec![
            tx("Starbucks", 6.0, None),
            tx("Delta Airlines", 450.0, None),
            tx("Netflix", 15.99, None),
        ];
        let (categories, scores) = categorizer.categorize_batch(&batch).unwrap();

        assert_eq!(categories, vec!["Dining", "Travel", "Entertainment"]);
        assert_eq!(scores.len(), 3);
    }

    #[test]
    fn empty_batch_yields_empty_outputs() {
        let categorizer = TransactionCategorizer::new();
        categorizer.load();

        let (categories, scores) = categorizer.categorize_batch(&[]).unwrap();
        assert!(categories.is_empty());
        assert!(scores.is_empty());
    }
}
