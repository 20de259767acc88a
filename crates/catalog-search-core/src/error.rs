//! Error types for the catalog search engine
//!
//! Every variant here is recovered locally: the engine logs it and degrades
//! to a sensible default instead of handing it to the caller of `search`,
//! `suggest` or `commit`. The type exists so the recovery paths are named
//! and testable.

use thiserror::Error;

/// Result type alias for engine-internal operations
pub type EngineResult<T> = std::result::Result<T, EngineError>;

/// Errors that can occur while assembling or evaluating a search
#[derive(Debug, Error)]
pub enum EngineError {
    /// Persisted JSON (history, admin catalog) could not be parsed
    #[error("Malformed persisted state under `{key}`: {source}")]
    MalformedPersistedState {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Explicit price range with `min > max`
    #[error("Invalid price range: min {min} exceeds max {max}")]
    InvalidPriceRange { min: f64, max: f64 },

    /// The catalog accessor returned no snapshot at all
    #[error("Catalog snapshot unavailable")]
    AbsentCatalog,

    /// A filter value from the UI that no predicate family recognizes
    #[error("Unknown {family} filter value: {value:?}")]
    UnknownFilterValue { family: &'static str, value: String },

    /// The key-value store rejected a write
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl EngineError {
    /// Returns the error type string (for diagnostics)
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::MalformedPersistedState { .. } => "MALFORMED_PERSISTED_STATE",
            Self::InvalidPriceRange { .. } => "INVALID_PRICE_RANGE",
            Self::AbsentCatalog => "ABSENT_CATALOG",
            Self::UnknownFilterValue { .. } => "UNKNOWN_FILTER_VALUE",
            Self::Store(_) => "STORE_ERROR",
        }
    }

    pub(crate) fn malformed(key: &str, source: serde_json::Error) -> Self {
        Self::MalformedPersistedState {
            key: key.to_owned(),
            source,
        }
    }

    pub(crate) fn unknown(family: &'static str, value: &str) -> Self {
        Self::UnknownFilterValue {
            family,
            value: value.to_owned(),
        }
    }
}

/// Failure reported by a [`KeyValueStore`](crate::store::KeyValueStore) write
#[derive(Debug, Error)]
pub enum StoreError {
    /// Backend quota exhausted
    #[error("quota exceeded writing `{0}`")]
    QuotaExceeded(String),

    /// Backend cannot be written at all (private mode, poisoned lock, ...)
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bad_json() -> serde_json::Error {
        serde_json::from_str::<Vec<String>>("not json").unwrap_err()
    }

    #[test]
    fn error_type_mapping() {
        let cases: Vec<(EngineError, &str)> = vec![
            (
                EngineError::malformed("searchHistory", bad_json()),
                "MALFORMED_PERSISTED_STATE",
            ),
            (
                EngineError::InvalidPriceRange {
                    min: 10.0,
                    max: 1.0,
                },
                "INVALID_PRICE_RANGE",
            ),
            (EngineError::AbsentCatalog, "ABSENT_CATALOG"),
            (
                EngineError::unknown("price bucket", "cheap"),
                "UNKNOWN_FILTER_VALUE",
            ),
            (
                EngineError::Store(StoreError::QuotaExceeded("k".into())),
                "STORE_ERROR",
            ),
        ];
        for (err, expected) in &cases {
            assert_eq!(
                err.error_type(),
                *expected,
                "Error {err:?} should map to {expected}"
            );
        }
    }

    #[test]
    fn display_names_the_key_and_value() {
        let err = EngineError::malformed("searchHistory", bad_json());
        assert!(err.to_string().contains("searchHistory"));

        let err = EngineError::unknown("sort", "popularity");
        assert_eq!(err.to_string(), "Unknown sort filter value: \"popularity\"");
    }

    #[test]
    fn store_error_from_conversion() {
        let err: EngineError = StoreError::Unavailable("private mode".into()).into();
        assert!(matches!(err, EngineError::Store(_)));
        assert_eq!(err.error_type(), "STORE_ERROR");
    }
}
