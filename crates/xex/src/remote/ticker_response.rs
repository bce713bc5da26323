use common::models::{Ticker, iso8601};
use serde::Deserialize;
use serde_json::Value;

use crate::error::XexError;
use crate::remote::values::{as_float_opt, as_timestamp, decode};
use crate::traits::RemoteResponse;

#[derive(Deserialize, Debug)]
pub struct TickerData {
    pub last: Option<Value>,
    pub high: Option<Value>,
    pub low: Option<Value>,
    pub open: Option<Value>,
    #[serde(rename(deserialize = "dchange"))]
    pub change: Option<Value>,
    #[serde(rename(deserialize = "dchangepec"))]
    pub percentage: Option<Value>,
    #[serde(rename(deserialize = "vol"))]
    pub volume: Option<Value>,
    pub timestamp: Option<Value>,
}

#[derive(Debug)]
pub struct TickerResponse {
    pub symbol: String,
    pub data: TickerData,
    pub info: Value,
}

impl TickerResponse {
    pub fn new(symbol: &str, data: &Value) -> Result<Self, XexError> {
        Ok(Self {
            symbol: symbol.to_string(),
            data: decode(data, "ticker")?,
            info: data.clone(),
        })
    }
}

impl RemoteResponse<Ticker> for TickerResponse {
    fn to_canonical(&self) -> Result<Ticker, XexError> {
        let last = as_float_opt(self.data.last.as_ref());
        let timestamp = self.data.timestamp.as_ref().and_then(as_timestamp);

        Ok(Ticker {
            symbol: self.symbol.clone(),
            timestamp,
            datetime: iso8601(timestamp),
            high: as_float_opt(self.data.high.as_ref()),
            low: as_float_opt(self.data.low.as_ref()),
            bid: None,
            bid_volume: None,
            ask: None,
            ask_volume: None,
            vwap: None,
            open: as_float_opt(self.data.open.as_ref()),
            close: last,
            last,
            previous_close: None,
            change: as_float_opt(self.data.change.as_ref()),
            percentage: as_float_opt(self.data.percentage.as_ref()),
            average: None,
            base_volume: None,
            quote_volume: as_float_opt(self.data.volume.as_ref()),
            info: self.info.clone(),
        })
    }
}
