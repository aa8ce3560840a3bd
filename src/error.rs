//! Unified error types for the ML services.

use thiserror::Error;

/// Errors produced by the prediction layer.
///
/// The HTTP shell does not distinguish between these: every variant is
/// surfaced to clients as a 500 response whose `detail` field carries the
/// display string.
#[derive(Error, Debug)]
pub enum PredictionError {
    /// A model was invoked before its weights/tables were loaded.
    #[error("{model} model not loaded")]
    ModelNotLoaded {
        /// Which model was not ready.
        model: &'static str,
    },

    /// Inference ran but produced no usable output.
    #[error("inference failed: {0}")]
    InferenceFailed(String),

    /// The model produced output that violates its own contract.
    #[error("malformed model output: {0}")]
    MalformedOutput(String),
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, PredictionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_not_loaded_names_the_model() {
        let err = PredictionError::ModelNotLoaded {
            model: "categorizer",
        };
        assert_eq!(err.to_string(), "categorizer model not loaded");
    }
}
