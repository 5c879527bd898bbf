//! Error taxonomy shared by every marketplace operation.

use thiserror::Error;

pub type MarketResult<T> = Result<T, MarketError>;

/// Failures surfaced to callers as a category plus a description.
///
/// None of these are retried by the core; the caller decides.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MarketError {
    /// A referenced entity is absent.
    #[error("{entity} not found")]
    NotFound { entity: &'static str },

    /// Missing or malformed input, including an invalid date range.
    #[error("{0}")]
    Validation(String),

    /// The store is unreachable or rejected the write.
    #[error("persistence error: {0}")]
    Persistence(String),

    /// The caller does not own (or may not mutate) the resource.
    #[error("{0}")]
    Unauthorized(String),

    /// The requested stay collides with an existing booking.
    #[error("{0}")]
    Unavailable(String),

    /// Payment capture was declined or could not be completed.
    #[error("payment failed: {0}")]
    Payment(String),

    /// An outside service the operation depends on failed to answer.
    #[error("upstream failure: {0}")]
    Upstream(String),
}

impl MarketError {
    pub fn not_found(entity: &'static str) -> Self {
        MarketError::NotFound { entity }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        MarketError::Validation(msg.into())
    }

    /// Stable, machine-friendly name of the category.
    pub fn category(&self) -> &'static str {
        match self {
            MarketError::NotFound { .. } => "not_found",
            MarketError::Validation(_) => "validation_error",
            MarketError::Persistence(_) => "persistence_error",
            MarketError::Unauthorized(_) => "unauthorized",
            MarketError::Unavailable(_) => "unavailable",
            MarketError::Payment(_) => "payment_error",
            MarketError::Upstream(_) => "upstream_error",
        }
    }
}

impl From<sqlx::Error> for MarketError {
    fn from(err: sqlx::Error) -> Self {
        MarketError::Persistence(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_are_distinct() {
        let all = [
            MarketError::not_found("listing"),
            MarketError::validation("x"),
            MarketError::Persistence("x".into()),
            MarketError::Unauthorized("x".into()),
            MarketError::Unavailable("x".into()),
            MarketError::Payment("x".into()),
            MarketError::Upstream("x".into()),
        ];
        let mut names: Vec<&str> = all.iter().map(|e| e.category()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), all.len());
    }

    #[test]
    fn not_found_names_the_entity() {
        assert_eq!(MarketError::not_found("listing").to_string(), "listing not found");
    }
}
