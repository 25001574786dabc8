use crate::core::config::ConfigError;
use crate::core::conversion;
use crate::core::errors::ExchangeError;
use crate::core::kernel::signer::{ErrorHandler, Signer};
use async_trait::async_trait;
use reqwest::{Client, Method, Response, StatusCode, Url};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio_retry::strategy::{jitter, ExponentialBackoff};
use tokio_retry::RetryIf;
use tracing::{instrument, trace, warn};

/// REST client trait for making HTTP requests
///
/// Connectors are generic over this trait so tests can substitute a recording
/// mock for the real transport.
#[async_trait]
pub trait RestClient: Send + Sync {
    /// Make a GET request
    ///
    /// # Arguments
    /// * `endpoint` - The API endpoint path
    /// * `query_params` - Query parameters as key-value pairs
    /// * `authenticated` - Whether to sign the request
    ///
    /// # Returns
    /// The response body as a JSON value
    async fn get(
        &self,
        endpoint: &str,
        query_params: &[(&str, &str)],
        authenticated: bool,
    ) -> Result<Value, ExchangeError>;

    /// Make a POST request
    ///
    /// # Arguments
    /// * `endpoint` - The API endpoint path
    /// * `body` - Request body as JSON value
    /// * `authenticated` - Whether to sign the request
    ///
    /// # Returns
    /// The response body as a JSON value
    async fn post(
        &self,
        endpoint: &str,
        body: &Value,
        authenticated: bool,
    ) -> Result<Value, ExchangeError>;
}

/// Configuration for the REST client
#[derive(Clone, Debug)]
pub struct RestClientConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Exchange name for logging and tracing
    pub exchange_name: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// Maximum number of retries for failed idempotent requests
    pub max_retries: u32,
    /// User agent string to include in requests
    pub user_agent: String,
}

impl RestClientConfig {
    pub fn new(base_url: String, exchange_name: String) -> Self {
        Self {
            base_url,
            exchange_name,
            timeout_seconds: 30,
            max_retries: 3,
            user_agent: concat!("weex-connector/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    /// Set the maximum number of retries
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set the user agent string
    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = user_agent;
        self
    }
}

/// Builder for creating REST client instances
pub struct RestClientBuilder {
    config: RestClientConfig,
    signer: Option<Arc<dyn Signer>>,
    error_handler: Option<Arc<dyn ErrorHandler>>,
}

impl RestClientBuilder {
    pub fn new(config: RestClientConfig) -> Self {
        Self {
            config,
            signer: None,
            error_handler: None,
        }
    }

    /// Set the signer for authenticated requests
    pub fn with_signer(mut self, signer: Arc<dyn Signer>) -> Self {
        self.signer = Some(signer);
        self
    }

    /// Set the hook that inspects every response before HTTP status handling
    pub fn with_error_handler(mut self, error_handler: Arc<dyn ErrorHandler>) -> Self {
        self.error_handler = Some(error_handler);
        self
    }

    pub fn build(self) -> Result<ReqwestRest, ExchangeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(self.config.timeout_seconds))
            .user_agent(&self.config.user_agent)
            .build()
            .map_err(|e| {
                ConfigError::InvalidConfiguration(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(ReqwestRest {
            client,
            config: self.config,
            signer: self.signer,
            error_handler: self.error_handler,
        })
    }
}

/// Implementation of `RestClient` using reqwest
#[derive(Clone)]
pub struct ReqwestRest {
    client: Client,
    config: RestClientConfig,
    signer: Option<Arc<dyn Signer>>,
    error_handler: Option<Arc<dyn ErrorHandler>>,
}

impl std::fmt::Debug for ReqwestRest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestRest")
            .field("config", &self.config)
            .field("has_signer", &self.signer.is_some())
            .field("has_error_handler", &self.error_handler.is_some())
            .finish_non_exhaustive()
    }
}

impl ReqwestRest {
    pub fn config(&self) -> &RestClientConfig {
        &self.config
    }

    pub fn has_signer(&self) -> bool {
        self.signer.is_some()
    }

    fn get_timestamp() -> Result<u64, ExchangeError> {
        u64::try_from(conversion::milliseconds()).map_err(|e| {
            ExchangeError::InvalidNonce(format!("System clock before epoch: {}", e))
        })
    }

    /// Full URL with the query already encoded; the signer sees exactly `url.query()`.
    fn build_url(&self, endpoint: &str, query_params: &[(&str, &str)]) -> Result<Url, ExchangeError> {
        let mut url = Url::parse(&format!("{}{}", self.config.base_url, endpoint)).map_err(|e| {
            ExchangeError::BadRequest(format!("Invalid URL for endpoint {}: {}", endpoint, e))
        })?;
        if !query_params.is_empty() {
            url.query_pairs_mut().extend_pairs(query_params);
        }
        Ok(url)
    }

    /// Read the body, give the venue hook first say, then apply HTTP status rules.
    #[instrument(skip(self, response), fields(exchange = %self.config.exchange_name, status = %response.status()))]
    async fn handle_response(&self, response: Response) -> Result<Value, ExchangeError> {
        let status = response.status();
        let response_text = response.text().await.map_err(|e| {
            ExchangeError::NetworkError(format!("Failed to read response body: {}", e))
        })?;

        trace!("Response body: {}", response_text);

        let json = serde_json::from_str::<Value>(&response_text).ok();

        if let Some(handler) = &self.error_handler {
            handler.handle_errors(status.as_u16(), &response_text, json.as_ref())?;
        }

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(ExchangeError::RateLimitExceeded(format!(
                "{} {}",
                self.config.exchange_name, response_text
            )));
        }
        if status.is_server_error() {
            return Err(ExchangeError::NetworkError(format!(
                "{} {} {}",
                self.config.exchange_name, status, response_text
            )));
        }
        if !status.is_success() {
            return Err(ExchangeError::ApiError {
                code: status.as_u16().to_string(),
                message: response_text,
            });
        }

        json.ok_or_else(|| {
            ExchangeError::DeserializationError(format!(
                "Failed to parse JSON response: {}",
                response_text
            ))
        })
    }

    /// One attempt. Signed afresh so a retried request carries a new timestamp.
    async fn send_once(
        &self,
        method: Method,
        url: &Url,
        endpoint: &str,
        body: &[u8],
        authenticated: bool,
    ) -> Result<Value, ExchangeError> {
        let mut request = self.client.request(method.clone(), url.clone());
        let mut has_content_type = false;

        if authenticated {
            let signer = self.signer.as_ref().ok_or_else(|| {
                ExchangeError::AuthenticationError(
                    "Authentication required but no signer provided".to_string(),
                )
            })?;
            let timestamp = Self::get_timestamp()?;
            let (headers, signed_params) = signer.sign_request(
                method.as_str(),
                endpoint,
                url.query().unwrap_or_default(),
                body,
                timestamp,
            )?;

            for (key, value) in &headers {
                has_content_type |= key.eq_ignore_ascii_case("content-type");
                request = request.header(key.as_str(), value.as_str());
            }
            if !signed_params.is_empty() {
                request = request.query(&signed_params);
            }
        }

        if !body.is_empty() {
            if !has_content_type {
                request = request.header("Content-Type", "application/json");
            }
            request = request.body(body.to_vec());
        }

        let response = request
            .send()
            .await
            .map_err(|e| ExchangeError::NetworkError(format!("Request failed: {}", e)))?;

        self.handle_response(response).await
    }

    /// Make a request; only GETs are retried, and only on network failures.
    #[instrument(skip(self, query_params, body), fields(exchange = %self.config.exchange_name, method = %method, endpoint = %endpoint))]
    async fn make_request(
        &self,
        method: Method,
        endpoint: &str,
        query_params: &[(&str, &str)],
        body: &[u8],
        authenticated: bool,
    ) -> Result<Value, ExchangeError> {
        if authenticated && self.signer.is_none() {
            return Err(ExchangeError::AuthenticationError(format!(
                "{} requires credentials for {}",
                self.config.exchange_name, endpoint
            )));
        }

        let url = self.build_url(endpoint, query_params)?;
        let retries = if method == Method::GET {
            self.config.max_retries as usize
        } else {
            0
        };
        let strategy = ExponentialBackoff::from_millis(2)
            .factor(100)
            .max_delay(Duration::from_secs(2))
            .map(jitter)
            .take(retries);

        let this = self;
        let url_ref = &url;
        RetryIf::spawn(
            strategy,
            move || this.send_once(method.clone(), url_ref, endpoint, body, authenticated),
            |error: &ExchangeError| {
                let retry = error.is_retryable();
                if retry {
                    warn!(%error, "retrying request");
                }
                retry
            },
        )
        .await
    }
}

#[async_trait]
impl RestClient for ReqwestRest {
    #[instrument(skip(self, query_params), fields(exchange = %self.config.exchange_name, endpoint = %endpoint, param_count = query_params.len()))]
    async fn get(
        &self,
        endpoint: &str,
        query_params: &[(&str, &str)],
        authenticated: bool,
    ) -> Result<Value, ExchangeError> {
        self.make_request(Method::GET, endpoint, query_params, &[], authenticated)
            .await
    }

    #[instrument(skip(self, body), fields(exchange = %self.config.exchange_name, endpoint = %endpoint))]
    async fn post(
        &self,
        endpoint: &str,
        body: &Value,
        authenticated: bool,
    ) -> Result<Value, ExchangeError> {
        let body_bytes = serde_json::to_vec(body).map_err(|e| {
            ExchangeError::SerializationError(format!("Failed to serialize request body: {}", e))
        })?;

        self.make_request(Method::POST, endpoint, &[], &body_bytes, authenticated)
            .await
    }
}
