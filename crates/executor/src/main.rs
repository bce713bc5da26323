use anyhow::Context;
use dotenvy::dotenv;
use std::env;
use tracing::{debug, info};

use common::logger;
use xex::{Xex, XexConfig};

use crate::services::market_probe::{MarketProbe, probe_symbols};

mod services;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    logger::setup_logger();
    debug!("XEX probe starting up...");

    let config = XexConfig::from_env().context("invalid XEX configuration")?;
    let exchange = Xex::from_config(&config).context("failed to build XEX client")?;

    let markets = exchange
        .fetch_markets()
        .await
        .context("failed to load the XEX pair catalog")?;
    let symbols = probe_symbols(env::var("XEX_SYMBOLS").ok().as_deref(), &markets);

    let report = MarketProbe::new(exchange).run(&symbols).await;
    info!(
        "Probe finished: {} tickers, {} books, {} balances, {} failures",
        report.tickers, report.books, report.balances, report.failures
    );

    if report.failures > 0 {
        anyhow::bail!("{} XEX calls failed", report.failures);
    }
    Ok(())
}
