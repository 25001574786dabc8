//! Unified arguments to venue request parameters.
//!
//! Builders are pure. Optional arguments are only written when present, and
//! caller extras are merged last so they can override anything except the
//! control keys the builders consume themselves.

use crate::core::errors::ExchangeError;
use crate::core::types::{OrderRequest, OrderType, Params, TimeInForce};
use serde_json::{json, Value};

/// Extras read by the builders and never forwarded verbatim.
pub const CONSUMED_KEYS: [&str; 3] = ["clientOrderId", "force", "pageNo"];

pub fn require_symbol<'a>(symbol: Option<&'a str>, operation: &str) -> Result<&'a str, ExchangeError> {
    symbol.filter(|s| !s.is_empty()).ok_or_else(|| {
        ExchangeError::ArgumentsRequired(format!("{} requires a symbol argument", operation))
    })
}

/// Merge caller extras, skipping consumed keys and nulls.
pub fn extend(request: &mut Params, extras: &Params) {
    for (key, value) in extras {
        if value.is_null() || CONSUMED_KEYS.contains(&key.as_str()) {
            continue;
        }
        request.insert(key.clone(), value.clone());
    }
}

fn put(request: &mut Params, key: &str, value: Option<Value>) {
    if let Some(value) = value.filter(|v| !v.is_null()) {
        request.insert(key.to_string(), value);
    }
}

fn extra_string(extras: &Params, key: &str) -> Option<String> {
    extras.get(key).and_then(|value| match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

pub const fn time_in_force_to_force(time_in_force: TimeInForce) -> &'static str {
    match time_in_force {
        TimeInForce::GTC => "normal",
        TimeInForce::IOC => "ioc",
        TimeInForce::FOK => "fok",
        TimeInForce::PO => "post_only",
    }
}

pub fn symbol_request(market_id: &str) -> Params {
    let mut request = Params::new();
    request.insert("symbol".to_string(), Value::from(market_id));
    request
}

pub fn order_book_request(market_id: &str, limit: Option<u32>) -> Params {
    let mut request = symbol_request(market_id);
    put(&mut request, "limit", limit.map(Value::from));
    request
}

pub fn trades_request(market_id: &str, limit: Option<u32>) -> Params {
    order_book_request(market_id, limit)
}

pub fn ohlcv_request(
    market_id: &str,
    period: &str,
    since: Option<i64>,
    limit: Option<u32>,
) -> Params {
    let mut request = symbol_request(market_id);
    request.insert("period".to_string(), Value::from(period));
    put(&mut request, "startTime", since.map(Value::from));
    put(&mut request, "limit", limit.map(Value::from));
    request
}

/// Order fields without the symbol, shared by single and batch placement.
fn order_fields(order: &OrderRequest) -> Result<Params, ExchangeError> {
    let mut request = Params::new();
    request.insert("side".to_string(), Value::from(order.side.as_str()));
    request.insert(
        "orderType".to_string(),
        Value::from(order.order_type.as_str()),
    );

    let force = order
        .time_in_force
        .map(|tif| time_in_force_to_force(tif).to_string())
        .or_else(|| extra_string(&order.params, "force"))
        .unwrap_or_else(|| "normal".to_string());
    request.insert("force".to_string(), Value::from(force));
    request.insert("quantity".to_string(), Value::from(order.amount.to_string()));

    if order.order_type == OrderType::Limit {
        let price = order.price.ok_or_else(|| {
            ExchangeError::ArgumentsRequired(format!(
                "limit order for {} requires a price argument",
                order.symbol
            ))
        })?;
        request.insert("price".to_string(), Value::from(price.to_string()));
    }

    let client_order_id = order
        .client_order_id
        .clone()
        .or_else(|| extra_string(&order.params, "clientOrderId"));
    put(&mut request, "clientOrderId", client_order_id.map(Value::from));

    extend(&mut request, &order.params);
    Ok(request)
}

pub fn create_order_request(market_id: &str, order: &OrderRequest) -> Result<Params, ExchangeError> {
    let mut request = symbol_request(market_id);
    request.extend(order_fields(order)?);
    Ok(request)
}

pub fn create_orders_request(
    market_id: &str,
    orders: &[OrderRequest],
) -> Result<Params, ExchangeError> {
    let order_list = orders
        .iter()
        .map(|order| order_fields(order).map(Value::Object))
        .collect::<Result<Vec<_>, _>>()?;
    let mut request = symbol_request(market_id);
    request.insert("orderList".to_string(), Value::Array(order_list));
    Ok(request)
}

/// Which id names the order: `clientOrderId` from the extras wins over the
/// venue id. Neither present is an `ArgumentsRequired` error.
pub fn order_reference(
    id: &str,
    extras: &Params,
    operation: &str,
) -> Result<(&'static str, String), ExchangeError> {
    if let Some(client_order_id) = extra_string(extras, "clientOrderId") {
        return Ok(("clientOrderId", client_order_id));
    }
    if id.is_empty() {
        return Err(ExchangeError::ArgumentsRequired(format!(
            "{} requires an order id or clientOrderId",
            operation
        )));
    }
    Ok(("orderId", id.to_string()))
}

pub fn cancel_order_request(
    market_id: &str,
    id: &str,
    extras: &Params,
) -> Result<Params, ExchangeError> {
    let (key, value) = order_reference(id, extras, "cancelOrder")?;
    let mut request = symbol_request(market_id);
    request.insert(key.to_string(), Value::from(value));
    extend(&mut request, extras);
    Ok(request)
}

pub fn cancel_orders_request(market_id: &str, ids: &[String], extras: &Params) -> Params {
    let mut request = symbol_request(market_id);
    request.insert("orderIds".to_string(), json!(ids));
    extend(&mut request, extras);
    request
}

pub fn cancel_all_orders_request(market_id: &str, extras: &Params) -> Params {
    let mut request = symbol_request(market_id);
    extend(&mut request, extras);
    request
}

pub fn fetch_order_request(
    id: &str,
    market_id: Option<&str>,
    extras: &Params,
) -> Result<Params, ExchangeError> {
    let (key, value) = order_reference(id, extras, "fetchOrder")?;
    let mut request = Params::new();
    request.insert(key.to_string(), Value::from(value));
    put(&mut request, "symbol", market_id.map(Value::from));
    extend(&mut request, extras);
    Ok(request)
}

pub fn open_orders_request(
    market_id: &str,
    since: Option<i64>,
    limit: Option<u32>,
    extras: &Params,
) -> Params {
    let mut request = symbol_request(market_id);
    put(&mut request, "startTime", since.map(Value::from));
    put(&mut request, "limit", limit.map(Value::from));
    extend(&mut request, extras);
    request
}

pub fn order_history_request(
    market_id: &str,
    since: Option<i64>,
    limit: Option<u32>,
    extras: &Params,
) -> Params {
    let mut request = symbol_request(market_id);
    put(&mut request, "startTime", since.map(Value::from));
    put(&mut request, "pageSize", limit.map(Value::from));
    put(
        &mut request,
        "pageNo",
        extras.get("pageNo").cloned(),
    );
    extend(&mut request, extras);
    request
}

pub fn my_trades_request(
    market_id: Option<&str>,
    since: Option<i64>,
    limit: Option<u32>,
    extras: &Params,
) -> Params {
    let mut request = Params::new();
    put(&mut request, "symbol", market_id.map(Value::from));
    put(&mut request, "startTime", since.map(Value::from));
    put(&mut request, "limit", limit.map(Value::from));
    extend(&mut request, extras);
    request
}

/// Ledger and transfer history share one shape.
pub fn account_history_request(
    coin: Option<&str>,
    since: Option<i64>,
    limit: Option<u32>,
    extras: &Params,
) -> Params {
    let mut request = Params::new();
    put(&mut request, "coinName", coin.map(Value::from));
    put(&mut request, "startTime", since.map(Value::from));
    put(&mut request, "limit", limit.map(Value::from));
    extend(&mut request, extras);
    request
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::OrderSide;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_require_symbol() {
        assert_eq!(require_symbol(Some("BTC/USDT"), "cancelOrder").unwrap(), "BTC/USDT");
        let err = require_symbol(None, "cancelOrder").unwrap_err();
        assert!(matches!(err, ExchangeError::ArgumentsRequired(_)));
        assert!(err.to_string().contains("cancelOrder"));
        assert!(require_symbol(Some(""), "fetchOrders").is_err());
    }

    #[test]
    fn test_extend_strips_consumed_keys_and_nulls() {
        let mut request = symbol_request("BTCUSDT");
        let mut extras = Params::new();
        extras.insert("clientOrderId".into(), "abc".into());
        extras.insert("force".into(), "ioc".into());
        extras.insert("pageNo".into(), 2.into());
        extras.insert("stp".into(), "cancel_taker".into());
        extras.insert("nothing".into(), Value::Null);
        extras.insert("symbol".into(), "ETHUSDT".into());
        extend(&mut request, &extras);

        assert_eq!(request.get("stp"), Some(&Value::from("cancel_taker")));
        assert_eq!(request.get("symbol"), Some(&Value::from("ETHUSDT")));
        for key in CONSUMED_KEYS {
            assert!(!request.contains_key(key), "{} leaked", key);
        }
        assert!(!request.contains_key("nothing"));
    }

    #[test]
    fn test_limit_order_request() {
        let order = OrderRequest::limit("BTC/USDT", OrderSide::Buy, dec("0.01"), dec("50000.5"))
            .with_time_in_force(TimeInForce::IOC)
            .with_client_order_id("my-1");
        let request = create_order_request("BTCUSDT", &order).unwrap();
        assert_eq!(
            Value::Object(request),
            json!({
                "symbol": "BTCUSDT",
                "side": "buy",
                "orderType": "limit",
                "force": "ioc",
                "quantity": "0.01",
                "price": "50000.5",
                "clientOrderId": "my-1"
            })
        );
    }

    #[test]
    fn test_market_order_reads_control_keys_from_extras() {
        let order = OrderRequest::market("BTC/USDT", OrderSide::Sell, dec("1"))
            .with_param("force", "fok")
            .with_param("clientOrderId", "from-extras");
        let request = create_order_request("BTCUSDT", &order).unwrap();
        assert_eq!(request["force"], "fok");
        assert_eq!(request["clientOrderId"], "from-extras");
        assert!(!request.contains_key("price"));
    }

    #[test]
    fn test_limit_order_without_price_is_rejected() {
        let mut order = OrderRequest::limit("BTC/USDT", OrderSide::Buy, dec("1"), dec("1"));
        order.price = None;
        let err = create_order_request("BTCUSDT", &order).unwrap_err();
        assert!(matches!(err, ExchangeError::ArgumentsRequired(_)));
    }

    #[test]
    fn test_batch_request() {
        let orders = vec![
            OrderRequest::limit("BTC/USDT", OrderSide::Buy, dec("1"), dec("10")),
            OrderRequest::market("BTC/USDT", OrderSide::Sell, dec("2")),
        ];
        let request = create_orders_request("BTCUSDT", &orders).unwrap();
        let list = request["orderList"].as_array().unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0]["price"], "10");
        assert!(list[1].get("symbol").is_none());
    }

    #[test]
    fn test_cancel_by_client_id() {
        let mut extras = Params::new();
        extras.insert("clientOrderId".into(), "c-9".into());
        let request = cancel_order_request("BTCUSDT", "", &extras).unwrap();
        assert_eq!(request["clientOrderId"], "c-9");
        assert!(!request.contains_key("orderId"));

        let request = cancel_order_request("BTCUSDT", "42", &Params::new()).unwrap();
        assert_eq!(request["orderId"], "42");
    }

    #[test]
    fn test_empty_order_id_is_rejected() {
        let err = cancel_order_request("BTCUSDT", "", &Params::new()).unwrap_err();
        assert!(matches!(err, ExchangeError::ArgumentsRequired(_)));
        assert!(err.to_string().contains("cancelOrder"));

        let err = fetch_order_request("", Some("BTCUSDT"), &Params::new()).unwrap_err();
        assert!(matches!(err, ExchangeError::ArgumentsRequired(_)));

        let mut extras = Params::new();
        extras.insert("clientOrderId".into(), json!(""));
        assert!(fetch_order_request("", None, &extras).is_err());

        let request = fetch_order_request("7", None, &Params::new()).unwrap();
        assert_eq!(request["orderId"], "7");
        assert!(!request.contains_key("symbol"));
    }

    #[test]
    fn test_optional_arguments_are_omitted() {
        let request = ohlcv_request("BTCUSDT", "1m", None, None);
        assert_eq!(request.len(), 2);
        let request = ohlcv_request("BTCUSDT", "1h", Some(1_700_000_000_000), Some(100));
        assert_eq!(request["startTime"], 1_700_000_000_000_i64);
        assert_eq!(request["limit"], 100);

        let mut extras = Params::new();
        extras.insert("pageNo".into(), 3.into());
        let request = order_history_request("BTCUSDT", None, Some(50), &extras);
        assert_eq!(request["pageSize"], 50);
        assert_eq!(request["pageNo"], 3);

        assert!(my_trades_request(None, None, None, &Params::new()).is_empty());
        let request = account_history_request(Some("USDT"), None, Some(10), &Params::new());
        assert_eq!(request["coinName"], "USDT");
    }
}
