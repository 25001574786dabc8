use crate::core::conversion::safe_string;
use crate::core::errors::ExchangeError;
use crate::core::kernel::RestClient;
use crate::core::markets::MarketCache;
use crate::core::traits::OrderPlacer;
use crate::core::types::{Market, Order, OrderRequest, OrderType, Params};
use crate::exchanges::weex::connector::{load_markets, resolve_market};
use crate::exchanges::weex::describe::Endpoint;
use crate::exchanges::weex::{conversions, requests, rest::WeexRest};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tracing::{instrument, warn};

/// WEEX spot order management
#[derive(Debug)]
pub struct Trading<R: RestClient> {
    rest: WeexRest<R>,
    markets: Arc<MarketCache>,
}

/// Local checks run before any network call.
fn validate_order(order: &OrderRequest) -> Result<(), ExchangeError> {
    if order.order_type == OrderType::Limit && order.price.is_none() {
        return Err(ExchangeError::ArgumentsRequired(format!(
            "limit order for {} requires a price argument",
            order.symbol
        )));
    }
    if order.amount.is_sign_negative() || order.amount.is_zero() {
        return Err(ExchangeError::InvalidOrder(format!(
            "order amount must be positive, got {}",
            order.amount
        )));
    }
    Ok(())
}

/// Placement responses only echo ids; fill the rest in from what was sent.
fn complete_placed_order(mut placed: Order, order: &OrderRequest, market: &Market) -> Order {
    placed.symbol.get_or_insert_with(|| market.symbol.clone());
    placed.side.get_or_insert(order.side);
    placed.order_type.get_or_insert(order.order_type);
    placed.amount = placed.amount.or(Some(order.amount));
    placed.price = placed.price.or(order.price);
    placed.time_in_force = placed.time_in_force.or(order.time_in_force);
    if placed.client_order_id.is_none() {
        placed.client_order_id.clone_from(&order.client_order_id);
    }
    placed
}

/// Single-record payloads sometimes arrive wrapped in a one-element list.
fn single_record(data: &Value) -> Option<&Value> {
    match data {
        Value::Array(items) => items.first(),
        Value::Null => None,
        other => Some(other),
    }
}

impl<R: RestClient> Trading<R> {
    pub fn new(rest: WeexRest<R>, markets: Arc<MarketCache>) -> Self {
        Self { rest, markets }
    }

    async fn market(&self, symbol: &str) -> Result<Market, ExchangeError> {
        resolve_market(&self.rest, &self.markets, symbol).await
    }

    async fn order_list(
        &self,
        endpoint: Endpoint,
        request: &Params,
        market: &Market,
    ) -> Result<Vec<Order>, ExchangeError> {
        let data = self.rest.request(endpoint, request).await?;
        Ok(conversions::list_payload(&data, &["list", "orderInfo"])
            .iter()
            .map(|raw| conversions::parse_order(raw, Some(market)))
            .collect())
    }
}

#[async_trait]
impl<R: RestClient> OrderPlacer for Trading<R> {
    #[instrument(skip(self, order), fields(exchange = "weex", symbol = %order.symbol, side = %order.side.as_str()))]
    async fn create_order(&self, order: OrderRequest) -> Result<Order, ExchangeError> {
        validate_order(&order)?;
        let market = self.market(&order.symbol).await?;
        let request = requests::create_order_request(&market.id, &order)?;

        let data = self.rest.request(Endpoint::PlaceOrder, &request).await?;
        let raw = single_record(&data).cloned().unwrap_or(Value::Null);
        let placed = conversions::parse_order(&raw, Some(&market));
        Ok(complete_placed_order(placed, &order, &market))
    }

    #[instrument(skip(self, orders), fields(exchange = "weex", count = orders.len()))]
    async fn create_orders(&self, orders: Vec<OrderRequest>) -> Result<Vec<Order>, ExchangeError> {
        let Some(first) = orders.first() else {
            return Err(ExchangeError::BadRequest(
                "createOrders requires at least one order".to_string(),
            ));
        };
        if let Some(other) = orders.iter().find(|order| order.symbol != first.symbol) {
            return Err(ExchangeError::BadRequest(format!(
                "createOrders requires a single symbol, got {} and {}",
                first.symbol, other.symbol
            )));
        }
        for order in &orders {
            validate_order(order)?;
        }

        let market = self.market(&first.symbol).await?;
        let request = requests::create_orders_request(&market.id, &orders)?;
        let data = self.rest.request(Endpoint::BatchOrders, &request).await?;

        if let Some(failures) = data.get("failure").and_then(Value::as_array) {
            if !failures.is_empty() {
                warn!(failed = failures.len(), "batch order placement partially failed");
            }
        }

        Ok(
            conversions::list_payload(&data, &["orderInfo", "success", "list"])
                .iter()
                .map(|raw| conversions::parse_order(raw, Some(&market)))
                .collect(),
        )
    }

    #[instrument(skip(self, params), fields(exchange = "weex"))]
    async fn cancel_order(
        &self,
        id: &str,
        symbol: Option<&str>,
        params: Params,
    ) -> Result<Order, ExchangeError> {
        let symbol = requests::require_symbol(symbol, "cancelOrder")?;
        requests::order_reference(id, &params, "cancelOrder")?;
        let market = self.market(symbol).await?;
        let request = requests::cancel_order_request(&market.id, id, &params)?;

        let data = self.rest.request(Endpoint::CancelOrder, &request).await?;
        let raw = single_record(&data).cloned().unwrap_or(Value::Null);
        let mut order = conversions::parse_order(&raw, Some(&market));
        if order.id.is_none() && !request.contains_key("clientOrderId") {
            order.id = Some(id.to_string());
        }
        order.symbol.get_or_insert_with(|| market.symbol.clone());
        Ok(order)
    }

    #[instrument(skip(self, params), fields(exchange = "weex", count = ids.len()))]
    async fn cancel_orders(
        &self,
        ids: &[String],
        symbol: Option<&str>,
        params: Params,
    ) -> Result<Vec<Order>, ExchangeError> {
        let symbol = requests::require_symbol(symbol, "cancelOrders")?;
        if ids.is_empty() {
            return Err(ExchangeError::BadRequest(
                "cancelOrders requires at least one order id".to_string(),
            ));
        }
        let market = self.market(symbol).await?;
        let request = requests::cancel_orders_request(&market.id, ids, &params);

        let data = self
            .rest
            .request(Endpoint::CancelBatchOrders, &request)
            .await?;
        if let Some(failures) = data.get("failure").and_then(Value::as_array) {
            if !failures.is_empty() {
                warn!(failed = failures.len(), "batch cancel partially failed");
            }
        }

        let items = conversions::list_payload(&data, &["success", "list", "orderInfo"]);
        if items.is_empty() && data.get("failure").is_none() {
            // Bare acknowledgement: report the requested ids.
            return Ok(ids
                .iter()
                .map(|id| Order {
                    id: Some(id.clone()),
                    symbol: Some(market.symbol.clone()),
                    info: data.clone(),
                    ..Order::default()
                })
                .collect());
        }
        Ok(items
            .iter()
            .map(|raw| match raw {
                Value::String(id) => Order {
                    id: Some(id.clone()),
                    symbol: Some(market.symbol.clone()),
                    info: raw.clone(),
                    ..Order::default()
                },
                _ => conversions::parse_order(raw, Some(&market)),
            })
            .collect())
    }

    #[instrument(skip(self, params), fields(exchange = "weex"))]
    async fn cancel_all_orders(
        &self,
        symbol: Option<&str>,
        params: Params,
    ) -> Result<Vec<Order>, ExchangeError> {
        let symbol = requests::require_symbol(symbol, "cancelAllOrders")?;
        let market = self.market(symbol).await?;
        let request = requests::cancel_all_orders_request(&market.id, &params);

        let data = self
            .rest
            .request(Endpoint::CancelSymbolOrders, &request)
            .await?;
        let items = conversions::list_payload(&data, &["success", "list", "orderInfo"]);
        Ok(items
            .iter()
            .map(|raw| conversions::parse_order(raw, Some(&market)))
            .collect())
    }

    #[instrument(skip(self, params), fields(exchange = "weex"))]
    async fn fetch_order(
        &self,
        id: &str,
        symbol: Option<&str>,
        params: Params,
    ) -> Result<Order, ExchangeError> {
        requests::order_reference(id, &params, "fetchOrder")?;
        let market = match symbol {
            Some(symbol) => Some(self.market(symbol).await?),
            None => None,
        };
        let request = requests::fetch_order_request(
            id,
            market.as_ref().map(|m| m.id.as_str()),
            &params,
        )?;

        let data = self.rest.request(Endpoint::OrderInfo, &request).await?;
        let raw = single_record(&data)
            .ok_or_else(|| ExchangeError::OrderNotFound(format!("weex order {} not found", id)))?;

        if market.is_some() {
            return Ok(conversions::parse_order(raw, market.as_ref()));
        }
        let directory = load_markets(&self.rest, &self.markets, false).await?;
        let found =
            safe_string(raw, &["symbol"]).and_then(|market_id| directory.market_by_id(&market_id));
        Ok(conversions::parse_order(raw, found))
    }

    #[instrument(skip(self, params), fields(exchange = "weex"))]
    async fn fetch_open_orders(
        &self,
        symbol: Option<&str>,
        since: Option<i64>,
        limit: Option<u32>,
        params: Params,
    ) -> Result<Vec<Order>, ExchangeError> {
        let symbol = requests::require_symbol(symbol, "fetchOpenOrders")?;
        let market = self.market(symbol).await?;
        let request = requests::open_orders_request(&market.id, since, limit, &params);
        self.order_list(Endpoint::OpenOrders, &request, &market)
            .await
    }

    #[instrument(skip(self, params), fields(exchange = "weex"))]
    async fn fetch_orders(
        &self,
        symbol: Option<&str>,
        since: Option<i64>,
        limit: Option<u32>,
        params: Params,
    ) -> Result<Vec<Order>, ExchangeError> {
        let symbol = requests::require_symbol(symbol, "fetchOrders")?;
        let market = self.market(symbol).await?;
        let request = requests::order_history_request(&market.id, since, limit, &params);
        self.order_list(Endpoint::OrderHistory, &request, &market)
            .await
    }
}
