use crate::core::config::{ConfigError, ExchangeConfig};
use crate::core::errors::ExchangeError;
use crate::core::kernel::{ReqwestRest, RestClientBuilder, RestClientConfig, Throttle};
use crate::exchanges::weex::connector::WeexConnector;
use crate::exchanges::weex::describe::{EXCHANGE_ID, RATE_LIMIT_PER_SECOND, REST_URL};
use crate::exchanges::weex::errors::WeexErrorHandler;
use crate::exchanges::weex::signer::WeexSigner;
use std::sync::Arc;
use tracing::debug;

/// Builder for creating WEEX connectors
///
/// Without credentials the connector serves public endpoints only and private
/// calls fail with `AuthenticationError` before any request is sent.
#[derive(Debug)]
pub struct WeexBuilder {
    config: ExchangeConfig,
    rest_timeout: u64,
    rest_max_retries: u32,
    rate_limit: Option<u32>,
}

impl Default for WeexBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl WeexBuilder {
    pub fn new() -> Self {
        Self {
            config: ExchangeConfig::read_only(),
            rest_timeout: 30,
            rest_max_retries: 3,
            rate_limit: Some(RATE_LIMIT_PER_SECOND),
        }
    }

    pub fn with_config(mut self, config: ExchangeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set API credentials. WEEX requires the passphrase chosen at key creation.
    pub fn with_credentials(
        mut self,
        api_key: String,
        secret_key: String,
        passphrase: String,
    ) -> Self {
        let base_url = self.config.base_url.take();
        self.config = ExchangeConfig::new(api_key, secret_key).passphrase(passphrase);
        self.config.base_url = base_url;
        self
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.config.base_url = Some(base_url);
        self
    }

    /// Set REST client timeout in seconds
    pub fn with_rest_timeout(mut self, timeout: u64) -> Self {
        self.rest_timeout = timeout;
        self
    }

    /// Set REST client maximum retries (GET requests only)
    pub fn with_rest_max_retries(mut self, retries: u32) -> Self {
        self.rest_max_retries = retries;
        self
    }

    /// Requests per second budget; `None` disables client-side throttling.
    pub fn with_rate_limit(mut self, per_second: Option<u32>) -> Self {
        self.rate_limit = per_second;
        self
    }

    pub fn build(self) -> Result<WeexConnector<ReqwestRest>, ExchangeError> {
        let base_url = self
            .config
            .base_url
            .clone()
            .unwrap_or_else(|| REST_URL.to_string());

        let rest_config = RestClientConfig::new(base_url, EXCHANGE_ID.to_string())
            .with_timeout(self.rest_timeout)
            .with_max_retries(self.rest_max_retries);

        let mut rest_builder =
            RestClientBuilder::new(rest_config).with_error_handler(Arc::new(WeexErrorHandler));

        if self.config.has_credentials() {
            let passphrase = self.config.passphrase_value().ok_or_else(|| {
                ConfigError::InvalidConfiguration(
                    "WEEX credentials require a passphrase".to_string(),
                )
            })?;
            let signer = Arc::new(WeexSigner::new(
                self.config.api_key().to_string(),
                self.config.secret_key().to_string(),
                passphrase.to_string(),
            ));
            rest_builder = rest_builder.with_signer(signer);
        }

        let rest = rest_builder.build()?;
        let throttle = self
            .rate_limit
            .map(|per_second| Arc::new(Throttle::per_second(per_second)));

        debug!(
            base_url = %rest.config().base_url,
            authenticated = rest.has_signer(),
            rate_limit = ?self.rate_limit,
            "weex connector built"
        );

        Ok(WeexConnector::with_throttle(rest, throttle))
    }
}

/// Build a WEEX connector straight from configuration
pub fn build_connector(config: ExchangeConfig) -> Result<WeexConnector<ReqwestRest>, ExchangeError> {
    WeexBuilder::new().with_config(config).build()
}
