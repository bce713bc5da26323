use common::models::Ohlcv;
use serde_json::Value;

use crate::error::XexError;
use crate::remote::values::{as_float, as_timestamp, row};
use crate::traits::RemoteResponse;

const KLINE_FIELDS: usize = 6;

/// `[timestamp, open, high, low, close, volume]`
#[derive(Debug, Clone)]
pub struct KlineRow {
    pub timestamp: Value,
    pub open: Value,
    pub high: Value,
    pub low: Value,
    pub close: Value,
    pub volume: Value,
}

impl KlineRow {
    pub fn from_row(value: &Value) -> Result<Self, XexError> {
        let fields = row(value, KLINE_FIELDS, "kline")?;
        Ok(Self {
            timestamp: fields[0].clone(),
            open: fields[1].clone(),
            high: fields[2].clone(),
            low: fields[3].clone(),
            close: fields[4].clone(),
            volume: fields[5].clone(),
        })
    }
}

impl RemoteResponse<Ohlcv> for KlineRow {
    fn to_canonical(&self) -> Result<Ohlcv, XexError> {
        let timestamp = as_timestamp(&self.timestamp).ok_or_else(|| {
            XexError::malformed(format!("kline without timestamp: {}", self.timestamp))
        })?;

        Ok(Ohlcv {
            timestamp,
            open: as_float(&self.open),
            high: as_float(&self.high),
            low: as_float(&self.low),
            close: as_float(&self.close),
            volume: as_float(&self.volume),
        })
    }
}
