use crate::core::{
    errors::ExchangeError,
    types::{
        Balances, Currency, LedgerEntry, Market, Ohlcv, Order, OrderBook, OrderRequest, Params,
        Ticker, Timeframe, Trade, TransferEntry,
    },
};
use async_trait::async_trait;
use std::collections::BTreeMap;

/// Public market data. Symbols are unified `BASE/QUOTE` strings.
#[async_trait]
pub trait MarketDataSource {
    /// Venue server time in milliseconds
    async fn fetch_time(&self) -> Result<i64, ExchangeError>;

    /// All currencies keyed by unified code
    async fn fetch_currencies(&self) -> Result<BTreeMap<String, Currency>, ExchangeError>;

    /// Get all available markets/trading pairs
    async fn fetch_markets(&self) -> Result<Vec<Market>, ExchangeError>;

    async fn fetch_ticker(&self, symbol: &str) -> Result<Ticker, ExchangeError>;

    /// Tickers keyed by symbol, restricted to `symbols` when given
    async fn fetch_tickers(
        &self,
        symbols: Option<&[String]>,
    ) -> Result<BTreeMap<String, Ticker>, ExchangeError>;

    async fn fetch_order_book(
        &self,
        symbol: &str,
        limit: Option<u32>,
    ) -> Result<OrderBook, ExchangeError>;

    /// Recent public trades, oldest first
    async fn fetch_trades(
        &self,
        symbol: &str,
        since: Option<i64>,
        limit: Option<u32>,
    ) -> Result<Vec<Trade>, ExchangeError>;

    /// Candles, oldest first
    async fn fetch_ohlcv(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        since: Option<i64>,
        limit: Option<u32>,
    ) -> Result<Vec<Ohlcv>, ExchangeError>;
}

#[async_trait]
pub trait OrderPlacer {
    /// Place a new order
    async fn create_order(&self, order: OrderRequest) -> Result<Order, ExchangeError>;

    /// Place several orders for one symbol in a single request
    async fn create_orders(&self, orders: Vec<OrderRequest>) -> Result<Vec<Order>, ExchangeError>;

    async fn cancel_order(
        &self,
        id: &str,
        symbol: Option<&str>,
        params: Params,
    ) -> Result<Order, ExchangeError>;

    async fn cancel_orders(
        &self,
        ids: &[String],
        symbol: Option<&str>,
        params: Params,
    ) -> Result<Vec<Order>, ExchangeError>;

    async fn cancel_all_orders(
        &self,
        symbol: Option<&str>,
        params: Params,
    ) -> Result<Vec<Order>, ExchangeError>;

    async fn fetch_order(
        &self,
        id: &str,
        symbol: Option<&str>,
        params: Params,
    ) -> Result<Order, ExchangeError>;

    async fn fetch_open_orders(
        &self,
        symbol: Option<&str>,
        since: Option<i64>,
        limit: Option<u32>,
        params: Params,
    ) -> Result<Vec<Order>, ExchangeError>;

    /// Order history
    async fn fetch_orders(
        &self,
        symbol: Option<&str>,
        since: Option<i64>,
        limit: Option<u32>,
        params: Params,
    ) -> Result<Vec<Order>, ExchangeError>;
}

#[async_trait]
pub trait AccountInfo {
    async fn fetch_balance(&self) -> Result<Balances, ExchangeError>;

    /// Own fills
    async fn fetch_my_trades(
        &self,
        symbol: Option<&str>,
        since: Option<i64>,
        limit: Option<u32>,
        params: Params,
    ) -> Result<Vec<Trade>, ExchangeError>;

    async fn fetch_ledger(
        &self,
        code: Option<&str>,
        since: Option<i64>,
        limit: Option<u32>,
        params: Params,
    ) -> Result<Vec<LedgerEntry>, ExchangeError>;

    async fn fetch_transfers(
        &self,
        code: Option<&str>,
        since: Option<i64>,
        limit: Option<u32>,
        params: Params,
    ) -> Result<Vec<TransferEntry>, ExchangeError>;
}

// Composite trait for callers that need all functionality
#[async_trait]
pub trait ExchangeConnector: MarketDataSource + OrderPlacer + AccountInfo {}
