use crate::core::errors::ExchangeError;
use hmac::{Hmac, Mac};
use serde_json::Value;
use sha2::Sha256;
use std::collections::HashMap;

/// Result type for signing operations: (headers, `query_params`)
pub type SignatureResult = Result<(HashMap<String, String>, Vec<(String, String)>), ExchangeError>;

/// Signer trait for request authentication
///
/// Implementations turn one outgoing request into the headers (and, for venues
/// that sign in the query, extra query parameters) that authenticate it.
pub trait Signer: Send + Sync {
    /// Sign a request and return headers and query parameters
    ///
    /// # Arguments
    /// * `method` - HTTP method (GET, POST, etc.)
    /// * `endpoint` - API endpoint path
    /// * `query_string` - URL-encoded query string exactly as sent (without leading '?')
    /// * `body` - Raw request body bytes exactly as sent
    /// * `timestamp` - Request timestamp in milliseconds
    fn sign_request(
        &self,
        method: &str,
        endpoint: &str,
        query_string: &str,
        body: &[u8],
        timestamp: u64,
    ) -> SignatureResult;
}

/// Venue-specific response inspection, run before generic HTTP status handling.
///
/// Venues that report failures inside HTTP 200 envelopes plug in here.
pub trait ErrorHandler: Send + Sync {
    fn handle_errors(
        &self,
        status: u16,
        body: &str,
        response: Option<&Value>,
    ) -> Result<(), ExchangeError>;
}

/// Raw HMAC-SHA256 digest of `message` under `secret`.
pub fn hmac_sha256(secret: &[u8], message: &[u8]) -> Result<Vec<u8>, ExchangeError> {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret)
        .map_err(|e| ExchangeError::AuthenticationError(format!("Invalid secret key: {}", e)))?;
    mac.update(message);
    Ok(mac.finalize().into_bytes().to_vec())
}
