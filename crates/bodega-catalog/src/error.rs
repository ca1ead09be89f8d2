//! # Catalog Error Types
//!
//! ## Error Philosophy
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 Catalog Failure Domains                     │
//! │                                                             │
//! │  CatalogError::Status     non-2xx HTTP response             │
//! │  CatalogError::Transport  connect/timeout/send failure      │
//! │  CatalogError::Decode     body was not the expected JSON    │
//! │                                                             │
//! │  The UI does not branch on the variant. FetchState          │
//! │  collapses every failure into one display string and        │
//! │  resets the loading flag.                                   │
//! └─────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Errors from the catalog fetch client.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The catalog answered with a non-2xx status.
    ///
    /// The message format is load-bearing: the storefront displays it
    /// verbatim, so it stays exactly `HTTP error! status: {code}`.
    #[error("HTTP error! status: {code}")]
    Status { code: u16 },

    /// The request never produced a response.
    #[error("Request failed: {0}")]
    Transport(String),

    /// The response body could not be decoded into the expected type.
    #[error("Invalid catalog response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            CatalogError::Decode(err.to_string())
        } else {
            CatalogError::Transport(err.to_string())
        }
    }
}

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_message_is_exact() {
        let err = CatalogError::Status { code: 404 };
        assert_eq!(err.to_string(), "HTTP error! status: 404");

        let err = CatalogError::Status { code: 500 };
        assert_eq!(err.to_string(), "HTTP error! status: 500");
    }

    #[test]
    fn test_other_messages() {
        let err = CatalogError::Transport("connection refused".to_string());
        assert_eq!(err.to_string(), "Request failed: connection refused");

        let err = CatalogError::Decode("expected value at line 1".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid catalog response: expected value at line 1"
        );
    }
}
