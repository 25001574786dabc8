use crate::core::conversion::value_to_string;
use crate::core::errors::{ErrorKind, ExchangeError};
use crate::core::kernel::ErrorHandler;
use crate::exchanges::weex::describe::{describe, EXCHANGE_ID, SUCCESS_CODE};
use serde_json::Value;
use tracing::debug;

/// Classify a parsed response body.
///
/// No code, or the success code, means no error. Otherwise the exact table is
/// consulted, then the broad (message fragment) table, and anything left over
/// becomes a generic `ApiError`. Every message embeds the raw body.
pub fn classify_response(body: &str, response: &Value) -> Result<(), ExchangeError> {
    let Some(code) = response.get("code").and_then(value_to_string) else {
        return Ok(());
    };
    if code == SUCCESS_CODE {
        return Ok(());
    }

    let message = response
        .get("msg")
        .and_then(value_to_string)
        .unwrap_or_default();
    let feedback = format!("{} {}", EXCHANGE_ID, body);

    let descriptor = describe();
    let kind = descriptor
        .exact_error(&code)
        .or_else(|| descriptor.broad_error(&message))
        .unwrap_or(ErrorKind::Exchange);

    debug!(code = %code, msg = %message, ?kind, "venue error");
    Err(kind.into_error(&code, feedback))
}

/// Response hook installed on the REST client.
#[derive(Debug, Default, Clone, Copy)]
pub struct WeexErrorHandler;

impl ErrorHandler for WeexErrorHandler {
    fn handle_errors(
        &self,
        _status: u16,
        body: &str,
        response: Option<&Value>,
    ) -> Result<(), ExchangeError> {
        response.map_or(Ok(()), |json| classify_response(body, json))
    }
}
