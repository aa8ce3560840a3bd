//! Domain types shared between the HTTP shell and the prediction layer.

use serde::{Deserialize, Serialize};

/// A single transaction submitted for categorization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionData {
    /// Merchant name.
    pub merchant: String,
    /// Transaction amount.
    pub amount: f64,
    /// Optional free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One spending-history entry.
///
/// Entries are schema-free pass-through records: the shell never validates
/// their shape, and the recommendation engine reads only the keys it
/// understands (`category`, `amount`), ignoring everything else.
pub type SpendingRecord = serde_json::Map<String, serde_json::Value>;

/// Output record of the recommendation engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendations {
    /// Recommended card names.
    pub recommended_cards: Vec<String>,
    /// One justification per recommended card, in the same order.
    pub reasons: Vec<String>,
    /// Aggregate expected yearly rewards across the recommended cards.
    pub expected_rewards: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transaction_data_description_defaults_to_none() {
        let tx: TransactionData =
            serde_json::from_str(r#"{"merchant":"Amazon","amount":42.5}"#).unwrap();
        assert_eq!(tx.merchant, "Amazon");
        assert_eq!(tx.amount, 42.5);
        assert!(tx.description.is_none());
    }

    #[test]
    fn transaction_data_rejects_missing_merchant() {
        let result: Result<TransactionData, _> = serde_json::from_str(r#"{"amount":1.0}"#);
        assert!(result.is_err());
    }
}
