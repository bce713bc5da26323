use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceLevel {
    pub price: f64,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderBook {
    pub symbol: String,
    /// Best (highest) bid first.
    pub bids: Vec<PriceLevel>,
    /// Best (lowest) ask first.
    pub asks: Vec<PriceLevel>,
    pub timestamp: Option<i64>,
    pub datetime: Option<String>,
    pub info: Value,
}

impl OrderBook {
    pub fn best_bid(&self) -> Option<&PriceLevel> {
        self.bids.first()
    }

    pub fn best_ask(&self) -> Option<&PriceLevel> {
        self.asks.first()
    }
}
