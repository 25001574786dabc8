use crate::core::errors::ExchangeError;
use crate::core::types::{Currency, Market};
use std::collections::{BTreeMap, HashMap};
use std::future::Future;
use tokio::sync::{Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info};

/// Loaded markets and currencies, indexed by unified symbol and by venue id.
#[derive(Debug, Default)]
pub struct MarketDirectory {
    markets: BTreeMap<String, Market>,
    markets_by_id: HashMap<String, String>,
    currencies: BTreeMap<String, Currency>,
    loaded: bool,
}

impl MarketDirectory {
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Resolve a unified symbol, failing with `BadSymbol` when it is unknown.
    pub fn market(&self, symbol: &str) -> Result<&Market, ExchangeError> {
        self.markets
            .get(symbol)
            .ok_or_else(|| ExchangeError::BadSymbol(format!("unknown market symbol {}", symbol)))
    }

    pub fn market_by_id(&self, id: &str) -> Option<&Market> {
        self.markets_by_id
            .get(id)
            .and_then(|symbol| self.markets.get(symbol))
    }

    /// Unified symbol for a venue id, falling back to the id itself.
    pub fn safe_symbol(&self, id: &str) -> String {
        self.market_by_id(id)
            .map_or_else(|| id.to_string(), |market| market.symbol.clone())
    }

    pub fn currency(&self, code: &str) -> Option<&Currency> {
        self.currencies.get(code)
    }

    pub fn markets(&self) -> impl Iterator<Item = &Market> {
        self.markets.values()
    }

    pub fn currencies(&self) -> &BTreeMap<String, Currency> {
        &self.currencies
    }

    fn set_markets(&mut self, markets: Vec<Market>) {
        self.markets.clear();
        self.markets_by_id.clear();
        for market in markets {
            if self.markets.contains_key(&market.symbol) {
                debug!(symbol = %market.symbol, id = %market.id, "duplicate market symbol, keeping first");
                continue;
            }
            self.markets_by_id
                .insert(market.id.clone(), market.symbol.clone());
            self.markets.insert(market.symbol.clone(), market);
        }
        self.loaded = true;
    }
}

/// Shared market cache. Loading is idempotent and serialized so concurrent
/// callers trigger a single fetch.
#[derive(Debug, Default)]
pub struct MarketCache {
    directory: RwLock<MarketDirectory>,
    loading: Mutex<()>,
}

impl MarketCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensure markets are loaded, running `loader` only when the cache is empty
    /// or `reload` is set.
    pub async fn load_with<F, Fut>(
        &self,
        reload: bool,
        loader: F,
    ) -> Result<RwLockReadGuard<'_, MarketDirectory>, ExchangeError>
    where
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = Result<Vec<Market>, ExchangeError>> + Send,
    {
        if !reload {
            let directory = self.directory.read().await;
            if directory.loaded {
                return Ok(directory);
            }
        }

        let _loading = self.loading.lock().await;

        // Another caller may have finished loading while we waited.
        if !reload {
            let directory = self.directory.read().await;
            if directory.loaded {
                return Ok(directory);
            }
        }

        let markets = loader().await?;
        let count = markets.len();

        let mut directory = self.directory.write().await;
        directory.set_markets(markets);
        info!(count, "markets loaded");

        Ok(RwLockWriteGuard::downgrade(directory))
    }

    pub async fn directory(&self) -> RwLockReadGuard<'_, MarketDirectory> {
        self.directory.read().await
    }

    pub async fn set_currencies(&self, currencies: BTreeMap<String, Currency>) {
        let mut directory = self.directory.write().await;
        debug!(count = currencies.len(), "currencies cached");
        directory.currencies = currencies;
    }
}
