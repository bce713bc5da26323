use std::cmp::Ordering;

use common::models::{OrderBook, PriceLevel, iso8601};
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::error::XexError;
use crate::remote::values::{as_float, as_timestamp, decode};
use crate::traits::RemoteResponse;

#[derive(Deserialize, Debug)]
pub struct DepthPayload {
    #[serde(default)]
    pub bids: Vec<Value>,
    #[serde(default)]
    pub asks: Vec<Value>,
    pub timestamp: Option<Value>,
}

#[derive(Debug)]
pub struct OrderBookResponse {
    pub symbol: String,
    pub data: DepthPayload,
    pub info: Value,
}

impl OrderBookResponse {
    pub fn new(symbol: &str, data: &Value) -> Result<Self, XexError> {
        Ok(Self {
            symbol: symbol.to_string(),
            data: decode(data, "depth")?,
            info: data.clone(),
        })
    }

    fn pack_levels(items: &[Value], descending: bool) -> Vec<PriceLevel> {
        let mut levels = Vec::with_capacity(items.len());

        for item in items {
            let level = item.as_array().and_then(|pair| {
                let price = as_float(pair.first()?)?;
                let amount = as_float(pair.get(1)?)?;
                Some(PriceLevel { price, amount })
            });

            match level {
                Some(level) => levels.push(level),
                None => warn!("Dropping unreadable depth level: {}", item),
            }
        }

        levels.sort_by(|a, b| {
            let ord = a.price.partial_cmp(&b.price).unwrap_or(Ordering::Equal);
            if descending { ord.reverse() } else { ord }
        });
        levels
    }
}

impl RemoteResponse<OrderBook> for OrderBookResponse {
    fn to_canonical(&self) -> Result<OrderBook, XexError> {
        let timestamp = self.data.timestamp.as_ref().and_then(as_timestamp);

        Ok(OrderBook {
            symbol: self.symbol.clone(),
            bids: Self::pack_levels(&self.data.bids, true),
            asks: Self::pack_levels(&self.data.asks, false),
            timestamp,
            datetime: iso8601(timestamp),
            info: self.info.clone(),
        })
    }
}
