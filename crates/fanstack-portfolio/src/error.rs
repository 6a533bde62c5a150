#![forbid(unsafe_code)]

//! Portfolio error types.

use std::fmt;

use fanstack_runtime::StoreError;

/// Error from reading or writing portfolio content.
#[derive(Debug)]
pub enum PortfolioError {
    /// The section store failed.
    Store(StoreError),
    /// Section content could not be encoded.
    Serialization(String),
}

impl fmt::Display for PortfolioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortfolioError::Store(e) => write!(f, "section store error: {e}"),
            PortfolioError::Serialization(msg) => write!(f, "serialization error: {msg}"),
        }
    }
}

impl std::error::Error for PortfolioError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PortfolioError::Store(e) => Some(e),
            PortfolioError::Serialization(_) => None,
        }
    }
}

impl From<StoreError> for PortfolioError {
    fn from(e: StoreError) -> Self {
        PortfolioError::Store(e)
    }
}

impl From<serde_json::Error> for PortfolioError {
    fn from(e: serde_json::Error) -> Self {
        PortfolioError::Serialization(e.to_string())
    }
}

/// Result type for portfolio operations.
pub type PortfolioResult<T> = Result<T, PortfolioError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_are_wrapped_with_source() {
        let err = PortfolioError::from(StoreError::Unavailable("read-only".into()));
        assert_eq!(
            err.to_string(),
            "section store error: store unavailable: read-only"
        );
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn json_errors_become_serialization() {
        let json_err = serde_json::from_str::<u8>("nope").unwrap_err();
        let err = PortfolioError::from(json_err);
        assert!(matches!(err, PortfolioError::Serialization(_)));
        assert!(err.to_string().starts_with("serialization error:"));
    }
}
