use tracing_subscriber::EnvFilter;
use weex_connector::core::config::ExchangeConfig;
use weex_connector::{MarketDataSource, WeexBuilder};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Public endpoints only; set WEEX_API_KEY, WEEX_SECRET_KEY and
    // WEEX_PASSPHRASE to enable private calls.
    let config = ExchangeConfig::from_env("WEEX").unwrap_or_else(|_| ExchangeConfig::read_only());
    let weex = WeexBuilder::new().with_config(config).build()?;

    let server_time = weex.fetch_time().await?;
    println!("WEEX server time: {}", server_time);

    println!("Loading markets...");
    let markets = weex.load_markets(false).await?;
    println!("Found {} markets", markets.len());
    for market in markets.iter().take(5) {
        println!(
            "Market: {} ({} -> {}), active: {:?}",
            market.symbol, market.base, market.quote, market.active
        );
    }

    match weex.fetch_ticker("BTC/USDT").await {
        Ok(ticker) => println!(
            "BTC/USDT last: {:?} bid: {:?} ask: {:?}",
            ticker.last, ticker.bid, ticker.ask
        ),
        Err(e) => println!("Error fetching ticker: {}", e),
    }

    Ok(())
}
