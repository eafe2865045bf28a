use thiserror::Error;

/// Errors raised at the edges of the engine.
///
/// Proof search itself never fails: a goal that cannot be proved simply has
/// no solutions. These errors only cover malformed input handed to the engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A rule was declared without any body goals
    #[error("rule with head {head} has an empty body; declare it as a fact instead")]
    EmptyRuleBody {
        /// Rendered head of the rejected rule
        head: String,
    },

    /// A query asked for zero solutions
    #[error("query limit must be a positive integer, got {0}")]
    InvalidLimit(usize),

    /// A solution could not be encoded as JSON
    #[cfg(feature = "serde")]
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, EngineError>;
