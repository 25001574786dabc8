use async_trait::async_trait;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use weex_connector::core::kernel::RestClient;
use weex_connector::core::types::{
    OrderRequest, OrderSide, OrderStatus, OrderType, Params, TimeInForce, Timeframe,
};
use weex_connector::{
    AccountInfo, ExchangeError, MarketDataSource, OrderPlacer, WeexConnector,
};

/// One recorded transport call
#[derive(Debug, Clone)]
struct Call {
    method: &'static str,
    endpoint: String,
    query: Vec<(String, String)>,
    body: Value,
    authenticated: bool,
}

impl Call {
    fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Records every call and replays canned responses keyed by endpoint path
#[derive(Clone, Default)]
struct MockRest {
    calls: Arc<Mutex<Vec<Call>>>,
    responses: Arc<Mutex<HashMap<String, Value>>>,
}

impl MockRest {
    fn respond(&self, endpoint: &str, data: Value) -> &Self {
        self.responses.lock().unwrap().insert(
            endpoint.to_string(),
            json!({"code": "00000", "msg": "success", "requestTime": 1_700_000_000_000_i64, "data": data}),
        );
        self
    }

    fn respond_raw(&self, endpoint: &str, body: Value) -> &Self {
        self.responses
            .lock()
            .unwrap()
            .insert(endpoint.to_string(), body);
        self
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn calls_to(&self, endpoint: &str) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|call| call.endpoint == endpoint)
            .collect()
    }

    fn record(&self, call: Call) -> Result<Value, ExchangeError> {
        let endpoint = call.endpoint.clone();
        self.calls.lock().unwrap().push(call);
        self.responses
            .lock()
            .unwrap()
            .get(&endpoint)
            .cloned()
            .ok_or_else(|| ExchangeError::NetworkError(format!("no canned response for {}", endpoint)))
    }
}

#[async_trait]
impl RestClient for MockRest {
    async fn get(
        &self,
        endpoint: &str,
        query_params: &[(&str, &str)],
        authenticated: bool,
    ) -> Result<Value, ExchangeError> {
        self.record(Call {
            method: "GET",
            endpoint: endpoint.to_string(),
            query: query_params
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
            body: Value::Null,
            authenticated,
        })
    }

    async fn post(
        &self,
        endpoint: &str,
        body: &Value,
        authenticated: bool,
    ) -> Result<Value, ExchangeError> {
        self.record(Call {
            method: "POST",
            endpoint: endpoint.to_string(),
            query: Vec::new(),
            body: body.clone(),
            authenticated,
        })
    }
}

const EXCHANGE_INFO: &str = "/api/v2/public/exchangeInfo";

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn connector() -> (WeexConnector<MockRest>, MockRest) {
    let mock = MockRest::default();
    mock.respond(
        EXCHANGE_INFO,
        json!({
            "symbols": [
                {
                    "symbol": "BTCUSDT_SPBL",
                    "baseCoin": "BTC",
                    "quoteCoin": "USDT",
                    "status": "online",
                    "tickSize": "0.01",
                    "stepSize": "0.0001",
                    "minTradeAmount": "0.0001",
                    "makerFeeRate": "0.001",
                    "takerFeeRate": "0.001"
                },
                {
                    "symbol": "ETHUSDT_SPBL",
                    "baseCoin": "ETH",
                    "quoteCoin": "USDT",
                    "status": "offline"
                }
            ]
        }),
    );
    (WeexConnector::with_throttle(mock.clone(), None), mock)
}

#[tokio::test]
async fn test_load_markets_is_idempotent() {
    let (weex, mock) = connector();

    let markets = weex.load_markets(false).await.unwrap();
    assert_eq!(markets.len(), 2);
    weex.load_markets(false).await.unwrap();
    assert_eq!(mock.calls_to(EXCHANGE_INFO).len(), 1);

    weex.load_markets(true).await.unwrap();
    assert_eq!(mock.calls_to(EXCHANGE_INFO).len(), 2);

    let btc = weex.market("BTC/USDT").await.unwrap();
    assert_eq!(btc.id, "BTCUSDT_SPBL");
    assert_eq!(btc.active, Some(true));
    assert_eq!(btc.precision.price, Some(dec("0.01")));
    let eth = weex.market("ETH/USDT").await.unwrap();
    assert_eq!(eth.active, Some(false));
}

#[tokio::test]
async fn test_unknown_symbol_is_bad_symbol() {
    let (weex, _mock) = connector();
    let err = weex.fetch_ticker("DOGE/USDT").await.unwrap_err();
    assert!(matches!(err, ExchangeError::BadSymbol(_)));
}

#[tokio::test]
async fn test_fetch_time() {
    let (weex, mock) = connector();
    mock.respond("/api/v2/public/time", json!(1_700_000_000_123_i64));
    assert_eq!(weex.fetch_time().await.unwrap(), 1_700_000_000_123);

    mock.respond("/api/v2/public/time", json!({"serverTime": 42}));
    assert_eq!(weex.fetch_time().await.unwrap(), 42);

    let call = &mock.calls_to("/api/v2/public/time")[0];
    assert_eq!(call.method, "GET");
    assert!(!call.authenticated);
}

#[tokio::test]
async fn test_fetch_ticker_sends_market_id() {
    let (weex, mock) = connector();
    mock.respond(
        "/api/v2/market/ticker",
        json!([{
            "symbol": "BTCUSDT_SPBL",
            "lastPrice": "110",
            "openPrice": "100",
            "bidPrice": "109.5",
            "askPrice": "110.5",
            "baseVolume": "10",
            "quoteVolume": "1050",
            "ts": 1_700_000_000_000_i64
        }]),
    );

    let ticker = weex.fetch_ticker("BTC/USDT").await.unwrap();
    assert_eq!(ticker.symbol, "BTC/USDT");
    assert_eq!(ticker.last, Some(dec("110")));
    assert_eq!(ticker.change, Some(dec("10")));
    assert_eq!(ticker.percentage, Some(dec("10")));
    assert_eq!(ticker.average, Some(dec("105")));
    assert_eq!(ticker.vwap, Some(dec("105")));
    assert_eq!(ticker.datetime.as_deref(), Some("2023-11-14T22:13:20.000Z"));

    let call = &mock.calls_to("/api/v2/market/ticker")[0];
    assert_eq!(call.query_value("symbol"), Some("BTCUSDT_SPBL"));
}

#[tokio::test]
async fn test_fetch_tickers_filters_symbols() {
    let (weex, mock) = connector();
    mock.respond(
        "/api/v2/market/tickers",
        json!([
            {"symbol": "BTCUSDT_SPBL", "lastPrice": "110"},
            {"symbol": "ETHUSDT_SPBL", "lastPrice": "5"},
            {"symbol": "UNLISTED", "lastPrice": "1"}
        ]),
    );

    let all = weex.fetch_tickers(None).await.unwrap();
    assert_eq!(all.len(), 3);
    assert!(all.contains_key("BTC/USDT"));
    assert!(all.contains_key("UNLISTED"));

    let wanted = vec!["ETH/USDT".to_string()];
    let some = weex.fetch_tickers(Some(&wanted)).await.unwrap();
    assert_eq!(some.len(), 1);
    assert_eq!(some["ETH/USDT"].last, Some(dec("5")));
}

#[tokio::test]
async fn test_fetch_order_book_is_sorted() {
    let (weex, mock) = connector();
    mock.respond(
        "/api/v2/market/depth",
        json!({
            "bids": [["99", "1"], ["100", "2"]],
            "asks": [["102", "1"], ["101", "3"]],
            "timestamp": 1_700_000_000_000_i64
        }),
    );

    let book = weex.fetch_order_book("BTC/USDT", Some(5)).await.unwrap();
    assert_eq!(book.symbol, "BTC/USDT");
    assert_eq!(book.bids[0].price, dec("100"));
    assert_eq!(book.asks[0].price, dec("101"));

    let call = &mock.calls_to("/api/v2/market/depth")[0];
    assert_eq!(call.query_value("limit"), Some("5"));
}

#[tokio::test]
async fn test_fetch_trades_sorted_and_filtered() {
    let (weex, mock) = connector();
    mock.respond(
        "/api/v2/market/fills",
        json!([
            {"tradeId": "3", "price": "101", "size": "1", "time": 3000, "isBuyerMaker": true},
            {"tradeId": "1", "price": "100", "size": "2", "time": 1000, "isBuyerMaker": false},
            {"tradeId": "2", "price": "100.5", "size": "1", "time": 2000, "isBuyerMaker": false}
        ]),
    );

    let trades = weex.fetch_trades("BTC/USDT", Some(2000), None).await.unwrap();
    let ids: Vec<_> = trades.iter().map(|t| t.id.clone().unwrap()).collect();
    assert_eq!(ids, vec!["2", "3"]);
    assert_eq!(trades[1].side, Some(OrderSide::Sell));
    assert_eq!(trades[0].side, Some(OrderSide::Buy));
    assert_eq!(trades[0].symbol.as_deref(), Some("BTC/USDT"));
}

#[tokio::test]
async fn test_fetch_ohlcv() {
    let (weex, mock) = connector();
    mock.respond(
        "/api/v2/market/candles",
        json!([
            ["2000", "2", "3", "1", "2.5", "10", "25"],
            ["1000", "1", "2", "0.5", "2", "5", "10"],
            ["bad"]
        ]),
    );

    let candles = weex
        .fetch_ohlcv("BTC/USDT", Timeframe::Hours1, Some(1000), Some(2))
        .await
        .unwrap();
    assert_eq!(candles.len(), 2);
    assert_eq!(candles[0].timestamp, 1000);
    assert_eq!(candles[1].close, dec("2.5"));

    let call = &mock.calls_to("/api/v2/market/candles")[0];
    assert_eq!(call.query_value("symbol"), Some("BTCUSDT_SPBL"));
    assert_eq!(call.query_value("period"), Some("1h"));
    assert_eq!(call.query_value("startTime"), Some("1000"));
    assert_eq!(call.query_value("limit"), Some("2"));
}

#[tokio::test]
async fn test_unsupported_timeframe_fails_before_io() {
    let (weex, mock) = connector();
    let err = weex
        .fetch_ohlcv("BTC/USDT", Timeframe::Minutes3, None, None)
        .await
        .unwrap_err();
    assert!(matches!(err, ExchangeError::BadRequest(_)));
    assert!(mock.calls().is_empty());
}

#[tokio::test]
async fn test_missing_symbol_fails_before_io() {
    let (weex, mock) = connector();

    let err = weex.cancel_order("1", None, Params::new()).await.unwrap_err();
    assert!(matches!(err, ExchangeError::ArgumentsRequired(_)));
    assert!(matches!(
        weex.cancel_orders(&["1".to_string()], None, Params::new())
            .await,
        Err(ExchangeError::ArgumentsRequired(_))
    ));
    assert!(matches!(
        weex.cancel_all_orders(None, Params::new()).await,
        Err(ExchangeError::ArgumentsRequired(_))
    ));
    assert!(weex
        .fetch_open_orders(None, None, None, Params::new())
        .await
        .is_err());
    assert!(weex
        .fetch_orders(None, None, None, Params::new())
        .await
        .is_err());

    assert!(mock.calls().is_empty());
}

#[tokio::test]
async fn test_limit_order_without_price_fails_before_io() {
    let (weex, mock) = connector();
    let mut order = OrderRequest::limit("BTC/USDT", OrderSide::Buy, dec("1"), dec("100"));
    order.price = None;
    let err = weex.create_order(order).await.unwrap_err();
    assert!(matches!(err, ExchangeError::ArgumentsRequired(_)));
    assert!(mock.calls().is_empty());
}

#[tokio::test]
async fn test_create_limit_order() {
    let (weex, mock) = connector();
    mock.respond(
        "/api/v2/trade/orders",
        json!({"orderId": "888", "clientOrderId": "my-1"}),
    );

    let order = OrderRequest::limit("BTC/USDT", OrderSide::Buy, dec("0.5"), dec("100"))
        .with_time_in_force(TimeInForce::PO)
        .with_client_order_id("my-1");
    let placed = weex.create_order(order).await.unwrap();

    assert_eq!(placed.id.as_deref(), Some("888"));
    assert_eq!(placed.client_order_id.as_deref(), Some("my-1"));
    assert_eq!(placed.symbol.as_deref(), Some("BTC/USDT"));
    assert_eq!(placed.side, Some(OrderSide::Buy));
    assert_eq!(placed.order_type, Some(OrderType::Limit));
    assert_eq!(placed.amount, Some(dec("0.5")));

    let call = &mock.calls_to("/api/v2/trade/orders")[0];
    assert_eq!(call.method, "POST");
    assert!(call.authenticated);
    assert_eq!(call.body["symbol"], "BTCUSDT_SPBL");
    assert_eq!(call.body["side"], "buy");
    assert_eq!(call.body["orderType"], "limit");
    assert_eq!(call.body["force"], "post_only");
    assert_eq!(call.body["quantity"], "0.5");
    assert_eq!(call.body["price"], "100");
    assert_eq!(call.body["clientOrderId"], "my-1");
}

#[tokio::test]
async fn test_create_orders_requires_single_symbol() {
    let (weex, mock) = connector();
    let orders = vec![
        OrderRequest::market("BTC/USDT", OrderSide::Buy, dec("1")),
        OrderRequest::market("ETH/USDT", OrderSide::Buy, dec("1")),
    ];
    let err = weex.create_orders(orders).await.unwrap_err();
    assert!(matches!(err, ExchangeError::BadRequest(_)));

    let err = weex.create_orders(Vec::new()).await.unwrap_err();
    assert!(matches!(err, ExchangeError::BadRequest(_)));
    assert!(mock.calls().is_empty());
}

#[tokio::test]
async fn test_create_orders_batch() {
    let (weex, mock) = connector();
    mock.respond(
        "/api/v2/trade/batch-orders",
        json!({
            "orderInfo": [{"orderId": "1"}, {"orderId": "2"}],
            "failure": []
        }),
    );
    let orders = vec![
        OrderRequest::limit("BTC/USDT", OrderSide::Buy, dec("1"), dec("90")),
        OrderRequest::limit("BTC/USDT", OrderSide::Buy, dec("1"), dec("91")),
    ];
    let placed = weex.create_orders(orders).await.unwrap();
    assert_eq!(placed.len(), 2);
    assert_eq!(placed[1].id.as_deref(), Some("2"));

    let call = &mock.calls_to("/api/v2/trade/batch-orders")[0];
    assert_eq!(call.body["symbol"], "BTCUSDT_SPBL");
    assert_eq!(call.body["orderList"].as_array().unwrap().len(), 2);
    assert_eq!(call.body["orderList"][1]["price"], "91");
}

#[tokio::test]
async fn test_cancel_order_by_client_id() {
    let (weex, mock) = connector();
    mock.respond(
        "/api/v2/trade/cancel-order",
        json!({"orderId": "77", "clientOrderId": "c-1"}),
    );

    let mut params = Params::new();
    params.insert("clientOrderId".to_string(), json!("c-1"));
    let canceled = weex
        .cancel_order("77", Some("BTC/USDT"), params)
        .await
        .unwrap();
    assert_eq!(canceled.id.as_deref(), Some("77"));

    let call = &mock.calls_to("/api/v2/trade/cancel-order")[0];
    assert_eq!(call.body["clientOrderId"], "c-1");
    assert!(call.body.get("orderId").is_none());
}

#[tokio::test]
async fn test_fetch_order_not_found() {
    let (weex, mock) = connector();
    mock.respond_raw(
        "/api/v2/trade/orderInfo",
        json!({"code": "43001", "msg": "order does not exist", "requestTime": 1}),
    );
    let err = weex
        .fetch_order("123", Some("BTC/USDT"), Params::new())
        .await
        .unwrap_err();
    assert!(matches!(err, ExchangeError::OrderNotFound(_)));

    mock.respond("/api/v2/trade/orderInfo", Value::Null);
    let err = weex.fetch_order("123", None, Params::new()).await.unwrap_err();
    assert!(matches!(err, ExchangeError::OrderNotFound(_)));
}

#[tokio::test]
async fn test_fetch_order_resolves_symbol_from_loaded_markets() {
    let (weex, mock) = connector();
    weex.load_markets(false).await.unwrap();
    mock.respond(
        "/api/v2/trade/orderInfo",
        json!([{
            "orderId": "5",
            "symbol": "BTCUSDT_SPBL",
            "status": "partial_fill",
            "side": "sell",
            "orderType": "limit",
            "price": "100",
            "quantity": "2",
            "fillQuantity": "0.5",
            "fillTotalAmount": "50"
        }]),
    );

    let order = weex.fetch_order("5", None, Params::new()).await.unwrap();
    assert_eq!(order.symbol.as_deref(), Some("BTC/USDT"));
    assert_eq!(order.status, Some(OrderStatus::Open));
    assert_eq!(order.remaining, Some(dec("1.5")));
    assert_eq!(order.average, Some(dec("100")));
}

#[tokio::test]
async fn test_fetch_orders_paging_params() {
    let (weex, mock) = connector();
    mock.respond(
        "/api/v2/trade/history",
        json!({"list": [{"orderId": "1", "status": "full_fill"}]}),
    );
    let mut params = Params::new();
    params.insert("pageNo".to_string(), json!(2));
    let orders = weex
        .fetch_orders(Some("BTC/USDT"), Some(1000), Some(50), params)
        .await
        .unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].status, Some(OrderStatus::Closed));

    let call = &mock.calls_to("/api/v2/trade/history")[0];
    assert_eq!(call.body["pageSize"], 50);
    assert_eq!(call.body["pageNo"], 2);
    assert_eq!(call.body["startTime"], 1000);
}

#[tokio::test]
async fn test_fetch_balance() {
    let (weex, mock) = connector();
    mock.respond(
        "/api/v2/account/assets",
        json!([
            {"coinName": "usdt", "available": "100", "frozen": "20"},
            {"coinName": "BTC", "available": "1", "frozen": "0", "equity": "1"}
        ]),
    );

    let balances = weex.fetch_balance().await.unwrap();
    assert_eq!(balances.get("USDT").unwrap().total, Some(dec("120")));
    assert_eq!(balances.get("BTC").unwrap().free, Some(dec("1")));

    let call = &mock.calls_to("/api/v2/account/assets")[0];
    assert_eq!(call.method, "GET");
    assert!(call.authenticated);
}

#[tokio::test]
async fn test_fetch_ledger_direction() {
    let (weex, mock) = connector();
    mock.respond(
        "/api/v2/account/bills",
        json!([
            {"billId": "1", "coinName": "USDT", "amount": "-5", "cTime": 1000},
            {"billId": "2", "coinName": "USDT", "amount": "7", "cTime": 2000}
        ]),
    );

    let ledger = weex
        .fetch_ledger(Some("USDT"), Some(1000), None, Params::new())
        .await
        .unwrap();
    assert_eq!(ledger.len(), 2);
    assert_eq!(ledger[0].amount, Some(dec("5")));
    assert_ne!(ledger[0].direction, ledger[1].direction);

    let call = &mock.calls_to("/api/v2/account/bills")[0];
    assert_eq!(call.method, "POST");
    assert_eq!(call.body["coinName"], "USDT");
}

#[tokio::test]
async fn test_venue_error_code_is_mapped() {
    let (weex, mock) = connector();
    mock.respond_raw(
        "/api/v2/account/assets",
        json!({"code": "40006", "msg": "Invalid ACCESS_KEY", "requestTime": 1}),
    );
    let err = weex.fetch_balance().await.unwrap_err();
    assert!(matches!(err, ExchangeError::AuthenticationError(_)));
    assert!(err.to_string().contains("weex"));
}

#[tokio::test]
async fn test_empty_order_id_fails_before_io() {
    let (weex, mock) = connector();
    let err = weex
        .cancel_order("", Some("BTC/USDT"), Params::new())
        .await
        .unwrap_err();
    assert!(matches!(err, ExchangeError::ArgumentsRequired(_)));
    let err = weex.fetch_order("", None, Params::new()).await.unwrap_err();
    assert!(matches!(err, ExchangeError::ArgumentsRequired(_)));
    assert!(mock.calls().is_empty());
}

#[tokio::test]
async fn test_fetch_order_without_symbol_on_cold_cache() {
    let (weex, mock) = connector();
    mock.respond(
        "/api/v2/trade/orderInfo",
        json!({"orderId": "5", "symbol": "BTCUSDT_SPBL", "status": "new"}),
    );

    let order = weex.fetch_order("5", None, Params::new()).await.unwrap();
    assert_eq!(order.symbol.as_deref(), Some("BTC/USDT"));
    assert_eq!(mock.calls_to(EXCHANGE_INFO).len(), 1);

    let call = &mock.calls_to("/api/v2/trade/orderInfo")[0];
    assert_eq!(call.method, "POST");
    assert!(call.authenticated);
    assert_eq!(call.body["orderId"], "5");
    assert!(call.body.get("symbol").is_none());
}

#[tokio::test]
async fn test_fetch_my_trades_without_symbol_on_cold_cache() {
    let (weex, mock) = connector();
    mock.respond(
        "/api/v2/trade/fills",
        json!([
            {"tradeId": "t2", "orderId": "9", "symbol": "BTCUSDT_SPBL", "fillPrice": "101", "fillQuantity": "1", "createTime": 2000},
            {"tradeId": "t1", "orderId": "9", "symbol": "ETHUSDT_SPBL", "fillPrice": "5", "fillQuantity": "2", "createTime": 1000}
        ]),
    );

    let trades = weex
        .fetch_my_trades(None, Some(500), Some(20), Params::new())
        .await
        .unwrap();
    assert_eq!(trades.len(), 2);
    assert_eq!(trades[0].id.as_deref(), Some("t1"));
    assert_eq!(trades[0].symbol.as_deref(), Some("ETH/USDT"));
    assert_eq!(trades[1].symbol.as_deref(), Some("BTC/USDT"));
    assert_eq!(trades[1].cost, Some(dec("101")));
    assert_eq!(mock.calls_to(EXCHANGE_INFO).len(), 1);

    let call = &mock.calls_to("/api/v2/trade/fills")[0];
    assert_eq!(call.method, "POST");
    assert!(call.authenticated);
    assert!(call.body.get("symbol").is_none());
    assert_eq!(call.body["startTime"], 500);
    assert_eq!(call.body["limit"], 20);
}

#[tokio::test]
async fn test_fetch_my_trades_with_symbol() {
    let (weex, mock) = connector();
    mock.respond(
        "/api/v2/trade/fills",
        json!({"list": [{"tradeId": "t1", "fillPrice": "100", "fillQuantity": "1"}]}),
    );

    let mut params = Params::new();
    params.insert("orderId".to_string(), json!("9"));
    let trades = weex
        .fetch_my_trades(Some("BTC/USDT"), None, None, params)
        .await
        .unwrap();
    assert_eq!(trades[0].symbol.as_deref(), Some("BTC/USDT"));

    let call = &mock.calls_to("/api/v2/trade/fills")[0];
    assert_eq!(call.body["symbol"], "BTCUSDT_SPBL");
    assert_eq!(call.body["orderId"], "9");
}

#[tokio::test]
async fn test_fetch_currencies_feeds_transfer_coin_name() {
    let (weex, mock) = connector();
    mock.respond(
        "/api/v2/public/currencies",
        json!([
            {"coinName": "usdt", "fullName": "Tether", "chains": [
                {"chainName": "trc20", "rechargeable": true, "withdrawable": true, "withdrawFee": "1"}
            ]},
            {"coinName": "BTC", "chains": null}
        ]),
    );
    mock.respond(
        "/api/v2/account/transferRecords",
        json!([{
            "transferId": "tr-1",
            "coinName": "usdt",
            "amount": "25",
            "fromType": "spot",
            "toType": "futures",
            "status": "success",
            "cTime": 1000
        }]),
    );

    let currencies = weex.fetch_currencies().await.unwrap();
    let usdt = &currencies["USDT"];
    assert_eq!(usdt.id, "usdt");
    assert_eq!(usdt.fee, Some(dec("1")));
    assert!(currencies.contains_key("BTC"));
    assert!(weex.markets().directory().await.currency("USDT").is_some());

    let call = &mock.calls_to("/api/v2/public/currencies")[0];
    assert_eq!(call.method, "GET");
    assert!(!call.authenticated);

    let transfers = weex
        .fetch_transfers(Some("USDT"), Some(1000), Some(10), Params::new())
        .await
        .unwrap();
    assert_eq!(transfers.len(), 1);
    assert_eq!(transfers[0].id.as_deref(), Some("tr-1"));
    assert_eq!(transfers[0].currency.as_deref(), Some("USDT"));
    assert_eq!(transfers[0].amount, Some(dec("25")));
    assert_eq!(transfers[0].from_account.as_deref(), Some("spot"));

    let call = &mock.calls_to("/api/v2/account/transferRecords")[0];
    assert_eq!(call.method, "GET");
    assert!(call.authenticated);
    assert_eq!(call.query_value("coinName"), Some("usdt"));
    assert_eq!(call.query_value("startTime"), Some("1000"));
    assert_eq!(call.query_value("limit"), Some("10"));
}

#[tokio::test]
async fn test_cancel_orders_reports_string_ids() {
    let (weex, mock) = connector();
    mock.respond(
        "/api/v2/trade/cancel-batch-orders",
        json!({"success": ["1", "2"], "failure": []}),
    );

    let ids = vec!["1".to_string(), "2".to_string()];
    let canceled = weex
        .cancel_orders(&ids, Some("BTC/USDT"), Params::new())
        .await
        .unwrap();
    assert_eq!(canceled.len(), 2);
    assert_eq!(canceled[1].id.as_deref(), Some("2"));
    assert_eq!(canceled[0].symbol.as_deref(), Some("BTC/USDT"));

    let call = &mock.calls_to("/api/v2/trade/cancel-batch-orders")[0];
    assert_eq!(call.method, "POST");
    assert!(call.authenticated);
    assert_eq!(call.body["symbol"], "BTCUSDT_SPBL");
    assert_eq!(call.body["orderIds"], json!(["1", "2"]));
}

#[tokio::test]
async fn test_cancel_orders_bare_acknowledgement() {
    let (weex, mock) = connector();
    mock.respond("/api/v2/trade/cancel-batch-orders", Value::Null);

    let ids = vec!["7".to_string(), "8".to_string()];
    let canceled = weex
        .cancel_orders(&ids, Some("BTC/USDT"), Params::new())
        .await
        .unwrap();
    let reported: Vec<_> = canceled.iter().map(|o| o.id.clone().unwrap()).collect();
    assert_eq!(reported, ids);
    assert!(canceled
        .iter()
        .all(|o| o.symbol.as_deref() == Some("BTC/USDT")));

    let err = weex
        .cancel_orders(&[], Some("BTC/USDT"), Params::new())
        .await
        .unwrap_err();
    assert!(matches!(err, ExchangeError::BadRequest(_)));
    assert_eq!(mock.calls_to("/api/v2/trade/cancel-batch-orders").len(), 1);
}

#[tokio::test]
async fn test_cancel_all_orders() {
    let (weex, mock) = connector();
    mock.respond(
        "/api/v2/trade/cancel-symbol-order",
        json!([{"orderId": "1", "status": "cancelled"}, {"orderId": "2", "status": "cancelled"}]),
    );

    let canceled = weex
        .cancel_all_orders(Some("BTC/USDT"), Params::new())
        .await
        .unwrap();
    assert_eq!(canceled.len(), 2);
    assert_eq!(canceled[0].status, Some(OrderStatus::Canceled));
    assert_eq!(canceled[1].symbol.as_deref(), Some("BTC/USDT"));

    let call = &mock.calls_to("/api/v2/trade/cancel-symbol-order")[0];
    assert_eq!(call.method, "POST");
    assert!(call.authenticated);
    assert_eq!(call.body["symbol"], "BTCUSDT_SPBL");
}

#[tokio::test]
async fn test_fetch_open_orders() {
    let (weex, mock) = connector();
    mock.respond(
        "/api/v2/trade/open-orders",
        json!([{
            "orderId": "11",
            "clientOrderId": "c-11",
            "status": "new",
            "side": "buy",
            "orderType": "limit",
            "force": "ioc",
            "price": "95",
            "quantity": "1"
        }]),
    );

    let orders = weex
        .fetch_open_orders(Some("BTC/USDT"), Some(1000), Some(5), Params::new())
        .await
        .unwrap();
    assert_eq!(orders.len(), 1);
    let order = &orders[0];
    assert_eq!(order.id.as_deref(), Some("11"));
    assert_eq!(order.client_order_id.as_deref(), Some("c-11"));
    assert_eq!(order.status, Some(OrderStatus::Open));
    assert_eq!(order.time_in_force, Some(TimeInForce::IOC));
    assert_eq!(order.symbol.as_deref(), Some("BTC/USDT"));

    let call = &mock.calls_to("/api/v2/trade/open-orders")[0];
    assert_eq!(call.method, "POST");
    assert!(call.authenticated);
    assert_eq!(call.body["symbol"], "BTCUSDT_SPBL");
    assert_eq!(call.body["startTime"], 1000);
    assert_eq!(call.body["limit"], 5);
}
