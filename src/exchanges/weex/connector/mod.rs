use crate::core::conversion::safe_string;
use crate::core::errors::ExchangeError;
use crate::core::kernel::{RestClient, Throttle};
use crate::core::markets::{MarketCache, MarketDirectory};
use crate::core::traits::{AccountInfo, ExchangeConnector, MarketDataSource, OrderPlacer};
use crate::core::types::{
    Balances, Currency, LedgerEntry, Market, Ohlcv, Order, OrderBook, OrderRequest, Params,
    Ticker, Timeframe, Trade, TransferEntry,
};
use crate::exchanges::weex::describe::{describe, Endpoint, ExchangeDescriptor};
use crate::exchanges::weex::{conversions, rest::WeexRest};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLockReadGuard;

pub mod account;
pub mod market_data;
pub mod trading;

pub use account::Account;
pub use market_data::MarketData;
pub use trading::Trading;

/// Idempotent market load shared by every sub-component.
pub(crate) async fn load_markets<'a, R: RestClient>(
    rest: &WeexRest<R>,
    markets: &'a MarketCache,
    reload: bool,
) -> Result<RwLockReadGuard<'a, MarketDirectory>, ExchangeError> {
    markets
        .load_with(reload, || async move {
            let data = rest.request(Endpoint::ExchangeInfo, &Params::new()).await?;
            Ok(conversions::parse_markets(&data))
        })
        .await
}

/// Resolve `symbol` to its market, loading markets first if needed.
pub(crate) async fn resolve_market<R: RestClient>(
    rest: &WeexRest<R>,
    markets: &MarketCache,
    symbol: &str,
) -> Result<Market, ExchangeError> {
    let directory = load_markets(rest, markets, false).await?;
    directory.market(symbol).cloned()
}

/// Parse each record against the market its venue symbol names, if known.
pub(crate) fn parse_each<T>(
    items: &[Value],
    directory: &MarketDirectory,
    parse: fn(&Value, Option<&Market>) -> T,
) -> Vec<T> {
    items
        .iter()
        .map(|raw| {
            let market = safe_string(raw, &["symbol"]).and_then(|id| directory.market_by_id(&id));
            parse(raw, market)
        })
        .collect()
}

/// WEEX connector that composes all sub-trait implementations
#[derive(Debug)]
pub struct WeexConnector<R: RestClient> {
    pub market: MarketData<R>,
    pub trading: Trading<R>,
    pub account: Account<R>,
    markets: Arc<MarketCache>,
}

impl<R: RestClient + Clone> WeexConnector<R> {
    /// Connector over `rest` with the venue's default request throttle
    pub fn new(rest: R) -> Self {
        let throttle = Arc::new(Throttle::per_second(describe().rate_limit_per_second));
        Self::with_throttle(rest, Some(throttle))
    }

    pub fn with_throttle(rest: R, throttle: Option<Arc<Throttle>>) -> Self {
        let markets = Arc::new(MarketCache::new());
        let rest = WeexRest::new(rest, throttle);
        Self {
            market: MarketData::new(rest.clone(), markets.clone()),
            trading: Trading::new(rest.clone(), markets.clone()),
            account: Account::new(rest, markets.clone()),
            markets,
        }
    }
}

impl<R: RestClient> WeexConnector<R> {
    pub fn describe(&self) -> &'static ExchangeDescriptor {
        describe()
    }

    /// Load (or with `reload`, refresh) the shared market directory.
    pub async fn load_markets(&self, reload: bool) -> Result<Vec<Market>, ExchangeError> {
        self.market.load_markets(reload).await
    }

    pub async fn market(&self, symbol: &str) -> Result<Market, ExchangeError> {
        self.market.market(symbol).await
    }

    pub fn markets(&self) -> &Arc<MarketCache> {
        &self.markets
    }

    pub async fn fetch_products(&self) -> Result<Vec<Market>, ExchangeError> {
        self.market.fetch_products().await
    }
}

#[async_trait]
impl<R: RestClient> MarketDataSource for WeexConnector<R> {
    async fn fetch_time(&self) -> Result<i64, ExchangeError> {
        self.market.fetch_time().await
    }

    async fn fetch_currencies(&self) -> Result<BTreeMap<String, Currency>, ExchangeError> {
        self.market.fetch_currencies().await
    }

    async fn fetch_markets(&self) -> Result<Vec<Market>, ExchangeError> {
        self.market.fetch_markets().await
    }

    async fn fetch_ticker(&self, symbol: &str) -> Result<Ticker, ExchangeError> {
        self.market.fetch_ticker(symbol).await
    }

    async fn fetch_tickers(
        &self,
        symbols: Option<&[String]>,
    ) -> Result<BTreeMap<String, Ticker>, ExchangeError> {
        self.market.fetch_tickers(symbols).await
    }

    async fn fetch_order_book(
        &self,
        symbol: &str,
        limit: Option<u32>,
    ) -> Result<OrderBook, ExchangeError> {
        self.market.fetch_order_book(symbol, limit).await
    }

    async fn fetch_trades(
        &self,
        symbol: &str,
        since: Option<i64>,
        limit: Option<u32>,
    ) -> Result<Vec<Trade>, ExchangeError> {
        self.market.fetch_trades(symbol, since, limit).await
    }

    async fn fetch_ohlcv(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        since: Option<i64>,
        limit: Option<u32>,
    ) -> Result<Vec<Ohlcv>, ExchangeError> {
        self.market.fetch_ohlcv(symbol, timeframe, since, limit).await
    }
}

#[async_trait]
impl<R: RestClient> OrderPlacer for WeexConnector<R> {
    async fn create_order(&self, order: OrderRequest) -> Result<Order, ExchangeError> {
        self.trading.create_order(order).await
    }

    async fn create_orders(&self, orders: Vec<OrderRequest>) -> Result<Vec<Order>, ExchangeError> {
        self.trading.create_orders(orders).await
    }

    async fn cancel_order(
        &self,
        id: &str,
        symbol: Option<&str>,
        params: Params,
    ) -> Result<Order, ExchangeError> {
        self.trading.cancel_order(id, symbol, params).await
    }

    async fn cancel_orders(
        &self,
        ids: &[String],
        symbol: Option<&str>,
        params: Params,
    ) -> Result<Vec<Order>, ExchangeError> {
        self.trading.cancel_orders(ids, symbol, params).await
    }

    async fn cancel_all_orders(
        &self,
        symbol: Option<&str>,
        params: Params,
    ) -> Result<Vec<Order>, ExchangeError> {
        self.trading.cancel_all_orders(symbol, params).await
    }

    async fn fetch_order(
        &self,
        id: &str,
        symbol: Option<&str>,
        params: Params,
    ) -> Result<Order, ExchangeError> {
        self.trading.fetch_order(id, symbol, params).await
    }

    async fn fetch_open_orders(
        &self,
        symbol: Option<&str>,
        since: Option<i64>,
        limit: Option<u32>,
        params: Params,
    ) -> Result<Vec<Order>, ExchangeError> {
        self.trading
            .fetch_open_orders(symbol, since, limit, params)
            .await
    }

    async fn fetch_orders(
        &self,
        symbol: Option<&str>,
        since: Option<i64>,
        limit: Option<u32>,
        params: Params,
    ) -> Result<Vec<Order>, ExchangeError> {
        self.trading.fetch_orders(symbol, since, limit, params).await
    }
}

#[async_trait]
impl<R: RestClient> AccountInfo for WeexConnector<R> {
    async fn fetch_balance(&self) -> Result<Balances, ExchangeError> {
        self.account.fetch_balance().await
    }

    async fn fetch_my_trades(
        &self,
        symbol: Option<&str>,
        since: Option<i64>,
        limit: Option<u32>,
        params: Params,
    ) -> Result<Vec<Trade>, ExchangeError> {
        self.account
            .fetch_my_trades(symbol, since, limit, params)
            .await
    }

    async fn fetch_ledger(
        &self,
        code: Option<&str>,
        since: Option<i64>,
        limit: Option<u32>,
        params: Params,
    ) -> Result<Vec<LedgerEntry>, ExchangeError> {
        self.account.fetch_ledger(code, since, limit, params).await
    }

    async fn fetch_transfers(
        &self,
        code: Option<&str>,
        since: Option<i64>,
        limit: Option<u32>,
        params: Params,
    ) -> Result<Vec<TransferEntry>, ExchangeError> {
        self.account.fetch_transfers(code, since, limit, params).await
    }
}

impl<R: RestClient> ExchangeConnector for WeexConnector<R> {}
