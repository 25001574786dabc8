use crate::core::conversion::safe_integer;
use crate::core::errors::ExchangeError;
use crate::core::kernel::{RestClient, Throttle};
use crate::core::types::Params;
use crate::exchanges::weex::describe::{Endpoint, HttpVerb};
use crate::exchanges::weex::errors::classify_response;
use serde_json::Value;
use std::sync::Arc;
use tracing::{instrument, trace};

/// WEEX REST API client: endpoint dispatch, throttling and envelope unwrapping.
#[derive(Debug, Clone)]
pub struct WeexRest<R: RestClient> {
    rest_client: R,
    throttle: Option<Arc<Throttle>>,
}

impl<R: RestClient> WeexRest<R> {
    pub fn new(rest_client: R, throttle: Option<Arc<Throttle>>) -> Self {
        Self {
            rest_client,
            throttle,
        }
    }

    pub fn inner(&self) -> &R {
        &self.rest_client
    }

    /// One venue call. GET parameters go to the query string, POST parameters
    /// to the JSON body. Returns the envelope's `data` payload.
    #[instrument(skip(self, params), fields(exchange = "weex", endpoint = endpoint.path()))]
    pub async fn request(&self, endpoint: Endpoint, params: &Params) -> Result<Value, ExchangeError> {
        if let Some(throttle) = &self.throttle {
            throttle.acquire(endpoint.weight()).await?;
        }

        let authenticated = endpoint.is_private();
        let response = match endpoint.verb() {
            HttpVerb::Get => {
                let query = query_pairs(params);
                let pairs: Vec<(&str, &str)> = query
                    .iter()
                    .map(|(key, value)| (key.as_str(), value.as_str()))
                    .collect();
                self.rest_client
                    .get(endpoint.path(), &pairs, authenticated)
                    .await?
            }
            HttpVerb::Post => {
                self.rest_client
                    .post(endpoint.path(), &Value::Object(params.clone()), authenticated)
                    .await?
            }
        };

        unwrap_envelope(response)
    }
}

fn query_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(_) | Value::Bool(_) | Value::Array(_) | Value::Object(_) => {
            Some(value.to_string())
        }
    }
}

/// Stringified query parameters, nulls skipped.
pub fn query_pairs(params: &Params) -> Vec<(String, String)> {
    params
        .iter()
        .filter_map(|(key, value)| query_value(value).map(|v| (key.clone(), v)))
        .collect()
}

/// Check the envelope code and return its payload. The transport's error hook
/// normally classifies first; this keeps injected clients on the same rules.
pub fn unwrap_envelope(response: Value) -> Result<Value, ExchangeError> {
    classify_response(&response.to_string(), &response)?;
    let request_time = safe_integer(&response, &["requestTime"]);

    match response {
        Value::Object(mut envelope) if envelope.contains_key("code") || envelope.contains_key("data") => {
            trace!(?request_time, "envelope ok");
            Ok(envelope.remove("data").unwrap_or(Value::Null))
        }
        other => Ok(other),
    }
}
