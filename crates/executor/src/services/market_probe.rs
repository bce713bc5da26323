use common::models::Market;
use tracing::{error, info, warn};
use xex::Xex;
use xex::remote::Params;
use xex::traits::Transport;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ProbeReport {
    pub tickers: usize,
    pub books: usize,
    pub balances: usize,
    pub failures: usize,
}

/// Read-only smoke run against a live XEX endpoint.
pub struct MarketProbe<T: Transport> {
    exchange: Xex<T>,
}

impl<T: Transport> MarketProbe<T> {
    pub fn new(exchange: Xex<T>) -> Self {
        Self { exchange }
    }

    pub async fn run(&self, symbols: &[String]) -> ProbeReport {
        info!("Starting XEX probe over {} symbols", symbols.len());
        let mut report = ProbeReport::default();
        let params = Params::new();

        for symbol in symbols {
            match self.exchange.fetch_ticker(symbol, &params).await {
                Ok(ticker) => {
                    report.tickers += 1;
                    info!(
                        "Ticker {}: last={:?} high={:?} low={:?} vol={:?}",
                        ticker.symbol, ticker.last, ticker.high, ticker.low, ticker.quote_volume
                    );
                }
                Err(e) => {
                    report.failures += 1;
                    error!("Ticker {} failed: {}", symbol, e);
                }
            }

            match self.exchange.fetch_order_book(symbol, &params).await {
                Ok(book) => {
                    report.books += 1;
                    info!(
                        "Book {}: {} bids / {} asks, best {:?} / {:?}",
                        book.symbol,
                        book.bids.len(),
                        book.asks.len(),
                        book.best_bid().map(|l| l.price),
                        book.best_ask().map(|l| l.price)
                    );
                }
                Err(e) => {
                    report.failures += 1;
                    error!("Order book {} failed: {}", symbol, e);
                }
            }
        }

        if !self.exchange.signer().has_credentials() {
            info!("No XEX credentials configured, skipping wallet");
            return report;
        }

        match self.exchange.fetch_balance(&params).await {
            Ok(balances) => {
                for (code, entry) in balances
                    .entries
                    .iter()
                    .filter(|(_, b)| b.total.unwrap_or(0.0) > 0.0)
                {
                    report.balances += 1;
                    info!(
                        "Balance: {} Free={:?} Used={:?} Total={:?}",
                        code, entry.free, entry.used, entry.total
                    );
                }
            }
            Err(e) => {
                report.failures += 1;
                error!("Failed to fetch wallet: {}", e);
            }
        }

        report
    }
}

/// Comma separated symbols; falls back to the first catalog pair.
pub fn probe_symbols(raw: Option<&str>, markets: &[Market]) -> Vec<String> {
    let listed: Vec<String> = raw
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    if !listed.is_empty() {
        return listed;
    }

    match markets.first() {
        Some(market) => vec![market.symbol.clone()],
        None => {
            warn!("XEX catalog is empty and XEX_SYMBOLS is unset");
            Vec::new()
        }
    }
}
