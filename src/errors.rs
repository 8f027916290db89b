/// Error types for the pricing library.
///
/// Invalid inputs are rejected at the function boundary so NaN/Inf never
/// leaks into a price. There is no recovery path: every computation is a
/// pure function of its inputs.
#[derive(Debug, thiserror::Error)]
pub enum PricingError {
    #[error("domain error: {0}")]
    Domain(String),

    #[error("invalid path count: {0} (need at least 1)")]
    InvalidPathCount(usize),

    #[error("histogram error: {0}")]
    Histogram(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("report error: {0}")]
    Report(String),
}

impl From<serde_json::Error> for PricingError {
    fn from(e: serde_json::Error) -> Self {
        PricingError::Report(e.to_string())
    }
}

pub type PricingResult<T> = Result<T, PricingError>;
