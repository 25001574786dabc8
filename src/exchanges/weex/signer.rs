use crate::core::kernel::{hmac_sha256, SignatureResult, Signer};
use base64::{engine::general_purpose, Engine as _};
use secrecy::{ExposeSecret, Secret};
use std::collections::HashMap;

pub struct WeexSigner {
    api_key: String,
    secret_key: Secret<String>,
    passphrase: Secret<String>,
}

impl WeexSigner {
    pub fn new(api_key: String, secret_key: String, passphrase: String) -> Self {
        Self {
            api_key,
            secret_key: Secret::new(secret_key),
            passphrase: Secret::new(passphrase),
        }
    }

    /// Canonical message: `timestamp + METHOD + requestPath + ("?" + query) + body`.
    ///
    /// The query part is only present when non-empty; GET requests carry no
    /// body and POST requests carry no query, but both are concatenated as-is.
    pub fn prehash(
        timestamp: u64,
        method: &str,
        request_path: &str,
        query_string: &str,
        body: &str,
    ) -> String {
        let mut message = format!("{}{}{}", timestamp, method.to_uppercase(), request_path);
        if !query_string.is_empty() {
            message.push('?');
            message.push_str(query_string);
        }
        message.push_str(body);
        message
    }

    /// Base64 HMAC-SHA256 of the canonical message
    pub fn generate_signature(
        &self,
        timestamp: u64,
        method: &str,
        request_path: &str,
        query_string: &str,
        body: &str,
    ) -> Result<String, crate::core::errors::ExchangeError> {
        let prehash = Self::prehash(timestamp, method, request_path, query_string, body);
        let digest = hmac_sha256(
            self.secret_key.expose_secret().as_bytes(),
            prehash.as_bytes(),
        )?;
        Ok(general_purpose::STANDARD.encode(digest))
    }
}

impl std::fmt::Debug for WeexSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeexSigner")
            .field("api_key", &self.api_key)
            .finish_non_exhaustive()
    }
}

impl Signer for WeexSigner {
    fn sign_request(
        &self,
        method: &str,
        endpoint: &str,
        query_string: &str,
        body: &[u8],
        timestamp: u64,
    ) -> SignatureResult {
        let body_str = std::str::from_utf8(body).map_err(|e| {
            crate::core::errors::ExchangeError::SerializationError(format!(
                "Invalid body encoding: {}",
                e
            ))
        })?;

        let signature =
            self.generate_signature(timestamp, method, endpoint, query_string, body_str)?;

        let mut headers = HashMap::new();
        headers.insert("ACCESS-KEY".to_string(), self.api_key.clone());
        headers.insert("ACCESS-SIGN".to_string(), signature);
        headers.insert("ACCESS-TIMESTAMP".to_string(), timestamp.to_string());
        headers.insert(
            "ACCESS-PASSPHRASE".to_string(),
            self.passphrase.expose_secret().clone(),
        );
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert("locale".to_string(), "en-US".to_string());

        Ok((headers, Vec::new()))
    }
}
