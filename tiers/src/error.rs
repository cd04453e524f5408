use thiserror::Error;

#[derive(Error, Debug)]
pub enum TierError {
    #[error("invalid {field} at index {index}: {value:?} is not a finite number")]
    InvalidInput {
        field: &'static str,
        index: usize,
        value: String,
    },

    #[error("shape mismatch: {rates} rates for {thresholds} thresholds (expected thresholds + 1)")]
    ShapeMismatch { thresholds: usize, rates: usize },

    #[error("fee {0} is outside the range that can be rounded for display")]
    FeeOutOfRange(f64),

    #[error("tier {0} cannot be removed")]
    TierNotRemovable(usize),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TierError>;
