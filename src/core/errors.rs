use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExchangeError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Venue error that matched no known category.
    #[error("API error: {code} - {message}")]
    ApiError { code: String, message: String },

    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    #[error("Invalid nonce: {0}")]
    InvalidNonce(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Bad symbol: {0}")]
    BadSymbol(String),

    #[error("Account suspended: {0}")]
    AccountSuspended(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Exchange on maintenance: {0}")]
    OnMaintenance(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    #[error("Order not found: {0}")]
    OrderNotFound(String),

    #[error("Invalid order: {0}")]
    InvalidOrder(String),

    #[error("Arguments required: {0}")]
    ArgumentsRequired(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Configuration error: {0}")]
    ConfigError(#[from] crate::core::config::ConfigError),
}

impl ExchangeError {
    /// Only transport failures are worth another attempt; everything the venue
    /// answered with is final.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::NetworkError(_))
    }

    pub fn kind(&self) -> Option<ErrorKind> {
        let kind = match self {
            Self::AuthenticationError(_) => ErrorKind::Authentication,
            Self::InvalidNonce(_) => ErrorKind::InvalidNonce,
            Self::BadRequest(_) => ErrorKind::BadRequest,
            Self::BadSymbol(_) => ErrorKind::BadSymbol,
            Self::AccountSuspended(_) => ErrorKind::AccountSuspended,
            Self::PermissionDenied(_) => ErrorKind::PermissionDenied,
            Self::OnMaintenance(_) => ErrorKind::OnMaintenance,
            Self::RateLimitExceeded(_) => ErrorKind::RateLimitExceeded,
            Self::OrderNotFound(_) => ErrorKind::OrderNotFound,
            Self::InvalidOrder(_) => ErrorKind::InvalidOrder,
            Self::ApiError { .. } => ErrorKind::Exchange,
            _ => return None,
        };
        Some(kind)
    }
}

/// Venue-signalled error categories, as referenced from static code tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Authentication,
    InvalidNonce,
    BadRequest,
    BadSymbol,
    AccountSuspended,
    PermissionDenied,
    OnMaintenance,
    RateLimitExceeded,
    OrderNotFound,
    InvalidOrder,
    Exchange,
}

impl ErrorKind {
    /// Build the matching error. `code` is only kept by the generic category.
    pub fn into_error(self, code: &str, message: String) -> ExchangeError {
        match self {
            Self::Authentication => ExchangeError::AuthenticationError(message),
            Self::InvalidNonce => ExchangeError::InvalidNonce(message),
            Self::BadRequest => ExchangeError::BadRequest(message),
            Self::BadSymbol => ExchangeError::BadSymbol(message),
            Self::AccountSuspended => ExchangeError::AccountSuspended(message),
            Self::PermissionDenied => ExchangeError::PermissionDenied(message),
            Self::OnMaintenance => ExchangeError::OnMaintenance(message),
            Self::RateLimitExceeded => ExchangeError::RateLimitExceeded(message),
            Self::OrderNotFound => ExchangeError::OrderNotFound(message),
            Self::InvalidOrder => ExchangeError::InvalidOrder(message),
            Self::Exchange => ExchangeError::ApiError {
                code: code.to_string(),
                message,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trip() {
        let kinds = [
            ErrorKind::Authentication,
            ErrorKind::InvalidNonce,
            ErrorKind::BadRequest,
            ErrorKind::BadSymbol,
            ErrorKind::AccountSuspended,
            ErrorKind::PermissionDenied,
            ErrorKind::OnMaintenance,
            ErrorKind::RateLimitExceeded,
            ErrorKind::OrderNotFound,
            ErrorKind::InvalidOrder,
            ErrorKind::Exchange,
        ];
        for kind in kinds {
            let err = kind.into_error("1", "boom".to_string());
            assert_eq!(err.kind(), Some(kind));
            assert!(err.to_string().contains("boom"));
        }
    }

    #[test]
    fn test_only_network_errors_retry() {
        assert!(ExchangeError::NetworkError("reset".into()).is_retryable());
        assert!(!ExchangeError::RateLimitExceeded("slow".into()).is_retryable());
        assert!(!ExchangeError::ArgumentsRequired("symbol".into()).is_retryable());
    }
}
