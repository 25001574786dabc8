use crate::core::errors::ExchangeError;
use crate::core::kernel::RestClient;
use crate::core::markets::MarketCache;
use crate::core::traits::AccountInfo;
use crate::core::types::{Balances, LedgerEntry, Params, Trade, TransferEntry};
use crate::exchanges::weex::connector::{load_markets, parse_each, resolve_market};
use crate::exchanges::weex::describe::Endpoint;
use crate::exchanges::weex::{conversions, requests, rest::WeexRest};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::instrument;

/// WEEX account queries
#[derive(Debug)]
pub struct Account<R: RestClient> {
    rest: WeexRest<R>,
    markets: Arc<MarketCache>,
}

impl<R: RestClient> Account<R> {
    pub fn new(rest: WeexRest<R>, markets: Arc<MarketCache>) -> Self {
        Self { rest, markets }
    }

    /// Venue coin name for a unified currency code, when currencies are cached.
    async fn coin_id(&self, code: Option<&str>) -> Option<String> {
        let code = code?;
        let directory = self.markets.directory().await;
        Some(
            directory
                .currency(code)
                .map_or_else(|| code.to_string(), |currency| currency.id.clone()),
        )
    }
}

#[async_trait]
impl<R: RestClient> AccountInfo for Account<R> {
    #[instrument(skip(self), fields(exchange = "weex"))]
    async fn fetch_balance(&self) -> Result<Balances, ExchangeError> {
        let data = self.rest.request(Endpoint::Assets, &Params::new()).await?;
        Ok(conversions::parse_balance(&data))
    }

    #[instrument(skip(self, params), fields(exchange = "weex"))]
    async fn fetch_my_trades(
        &self,
        symbol: Option<&str>,
        since: Option<i64>,
        limit: Option<u32>,
        params: Params,
    ) -> Result<Vec<Trade>, ExchangeError> {
        let market = match symbol {
            Some(symbol) => Some(resolve_market(&self.rest, &self.markets, symbol).await?),
            None => None,
        };
        let request = requests::my_trades_request(
            market.as_ref().map(|m| m.id.as_str()),
            since,
            limit,
            &params,
        );

        let data = self.rest.request(Endpoint::TradeFills, &request).await?;
        let items = conversions::list_payload(&data, &["list", "fills"]);
        let mut trades: Vec<Trade> = match &market {
            Some(market) => items
                .iter()
                .map(|raw| conversions::parse_trade(raw, Some(market)))
                .collect(),
            None => {
                let directory = load_markets(&self.rest, &self.markets, false).await?;
                parse_each(items, &directory, conversions::parse_trade)
            }
        };
        trades.sort_by_key(|trade| trade.timestamp);
        Ok(trades)
    }

    #[instrument(skip(self, params), fields(exchange = "weex"))]
    async fn fetch_ledger(
        &self,
        code: Option<&str>,
        since: Option<i64>,
        limit: Option<u32>,
        params: Params,
    ) -> Result<Vec<LedgerEntry>, ExchangeError> {
        let coin = self.coin_id(code).await;
        let request = requests::account_history_request(coin.as_deref(), since, limit, &params);

        let data = self.rest.request(Endpoint::Bills, &request).await?;
        Ok(conversions::list_payload(&data, &["list", "bills"])
            .iter()
            .map(conversions::parse_ledger_entry)
            .collect())
    }

    #[instrument(skip(self, params), fields(exchange = "weex"))]
    async fn fetch_transfers(
        &self,
        code: Option<&str>,
        since: Option<i64>,
        limit: Option<u32>,
        params: Params,
    ) -> Result<Vec<TransferEntry>, ExchangeError> {
        let coin = self.coin_id(code).await;
        let request = requests::account_history_request(coin.as_deref(), since, limit, &params);

        let data = self
            .rest
            .request(Endpoint::TransferRecords, &request)
            .await?;
        Ok(conversions::list_payload(&data, &["list", "records"])
            .iter()
            .map(conversions::parse_transfer)
            .collect())
    }
}
