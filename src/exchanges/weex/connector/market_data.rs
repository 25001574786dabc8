use crate::core::errors::ExchangeError;
use crate::core::kernel::RestClient;
use crate::core::markets::MarketCache;
use crate::core::traits::MarketDataSource;
use crate::core::types::{
    Currency, Market, Ohlcv, OrderBook, Params, Ticker, Timeframe, Trade,
};
use crate::exchanges::weex::connector::{load_markets, parse_each, resolve_market};
use crate::exchanges::weex::describe::{describe, Endpoint};
use crate::exchanges::weex::{conversions, requests, rest::WeexRest};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, instrument};

/// WEEX public market data
#[derive(Debug)]
pub struct MarketData<R: RestClient> {
    rest: WeexRest<R>,
    markets: Arc<MarketCache>,
}

impl<R: RestClient> MarketData<R> {
    pub fn new(rest: WeexRest<R>, markets: Arc<MarketCache>) -> Self {
        Self { rest, markets }
    }

    #[instrument(skip(self), fields(exchange = "weex"))]
    pub async fn load_markets(&self, reload: bool) -> Result<Vec<Market>, ExchangeError> {
        let directory = load_markets(&self.rest, &self.markets, reload).await?;
        Ok(directory.markets().cloned().collect())
    }

    pub async fn market(&self, symbol: &str) -> Result<Market, ExchangeError> {
        resolve_market(&self.rest, &self.markets, symbol).await
    }

    /// Product listing from the products endpoint, same shape as `fetch_markets`.
    #[instrument(skip(self), fields(exchange = "weex"))]
    pub async fn fetch_products(&self) -> Result<Vec<Market>, ExchangeError> {
        let data = self.rest.request(Endpoint::Products, &Params::new()).await?;
        Ok(conversions::parse_markets(&data))
    }
}

#[async_trait]
impl<R: RestClient> MarketDataSource for MarketData<R> {
    #[instrument(skip(self), fields(exchange = "weex"))]
    async fn fetch_time(&self) -> Result<i64, ExchangeError> {
        let data = self.rest.request(Endpoint::Time, &Params::new()).await?;
        conversions::parse_time(&data).ok_or_else(|| {
            ExchangeError::DeserializationError(format!("weex server time missing: {}", data))
        })
    }

    #[instrument(skip(self), fields(exchange = "weex"))]
    async fn fetch_currencies(&self) -> Result<BTreeMap<String, Currency>, ExchangeError> {
        let data = self
            .rest
            .request(Endpoint::Currencies, &Params::new())
            .await?;
        let currencies = conversions::parse_currencies(&data);
        self.markets.set_currencies(currencies.clone()).await;
        Ok(currencies)
    }

    #[instrument(skip(self), fields(exchange = "weex"))]
    async fn fetch_markets(&self) -> Result<Vec<Market>, ExchangeError> {
        let data = self
            .rest
            .request(Endpoint::ExchangeInfo, &Params::new())
            .await?;
        Ok(conversions::parse_markets(&data))
    }

    #[instrument(skip(self), fields(exchange = "weex"))]
    async fn fetch_ticker(&self, symbol: &str) -> Result<Ticker, ExchangeError> {
        let market = self.market(symbol).await?;
        let data = self
            .rest
            .request(Endpoint::Ticker, &requests::symbol_request(&market.id))
            .await?;
        // Single-symbol queries may still come back as a one-element list.
        let raw = match data {
            Value::Array(items) => items.into_iter().next().unwrap_or(Value::Null),
            other => other,
        };
        Ok(conversions::parse_ticker(&raw, Some(&market)))
    }

    #[instrument(skip(self), fields(exchange = "weex"))]
    async fn fetch_tickers(
        &self,
        symbols: Option<&[String]>,
    ) -> Result<BTreeMap<String, Ticker>, ExchangeError> {
        drop(load_markets(&self.rest, &self.markets, false).await?);
        let data = self.rest.request(Endpoint::Tickers, &Params::new()).await?;

        let directory = self.markets.directory().await;
        let tickers = parse_each(
            conversions::list_payload(&data, &["list"]),
            &directory,
            conversions::parse_ticker,
        );

        Ok(tickers
            .into_iter()
            .filter(|ticker| !ticker.symbol.is_empty())
            .filter(|ticker| symbols.map_or(true, |wanted| wanted.contains(&ticker.symbol)))
            .map(|ticker| (ticker.symbol.clone(), ticker))
            .collect())
    }

    #[instrument(skip(self), fields(exchange = "weex"))]
    async fn fetch_order_book(
        &self,
        symbol: &str,
        limit: Option<u32>,
    ) -> Result<OrderBook, ExchangeError> {
        let market = self.market(symbol).await?;
        let data = self
            .rest
            .request(
                Endpoint::Depth,
                &requests::order_book_request(&market.id, limit),
            )
            .await?;
        Ok(conversions::parse_order_book(&data, &market.symbol))
    }

    #[instrument(skip(self), fields(exchange = "weex"))]
    async fn fetch_trades(
        &self,
        symbol: &str,
        since: Option<i64>,
        limit: Option<u32>,
    ) -> Result<Vec<Trade>, ExchangeError> {
        let market = self.market(symbol).await?;
        let data = self
            .rest
            .request(
                Endpoint::MarketFills,
                &requests::trades_request(&market.id, limit),
            )
            .await?;

        // The fills endpoint has no start time; `since` is applied here.
        let mut trades: Vec<Trade> = conversions::list_payload(&data, &["list"])
            .iter()
            .map(|raw| conversions::parse_trade(raw, Some(&market)))
            .filter(|trade| match (since, trade.timestamp) {
                (Some(since), Some(timestamp)) => timestamp >= since,
                _ => true,
            })
            .collect();
        trades.sort_by_key(|trade| trade.timestamp);
        Ok(trades)
    }

    #[instrument(skip(self), fields(exchange = "weex", timeframe = timeframe.as_str()))]
    async fn fetch_ohlcv(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        since: Option<i64>,
        limit: Option<u32>,
    ) -> Result<Vec<Ohlcv>, ExchangeError> {
        let period = describe().timeframe(timeframe).ok_or_else(|| {
            ExchangeError::BadRequest(format!(
                "weex does not support the {} timeframe",
                timeframe.as_str()
            ))
        })?;
        let market = self.market(symbol).await?;
        let data = self
            .rest
            .request(
                Endpoint::Candles,
                &requests::ohlcv_request(&market.id, period, since, limit),
            )
            .await?;

        let items = conversions::list_payload(&data, &["list"]);
        let mut candles: Vec<Ohlcv> = items.iter().filter_map(conversions::parse_ohlcv).collect();
        if candles.len() < items.len() {
            debug!(
                skipped = items.len() - candles.len(),
                "dropped malformed candles"
            );
        }
        candles.sort_by_key(|candle| candle.timestamp);
        Ok(candles)
    }
}
