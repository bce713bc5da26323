use serde::Serialize;
use serde_json::Value;

use super::Side;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trade {
    pub id: String,
    pub timestamp: Option<i64>,
    pub datetime: Option<String>,
    pub symbol: Option<String>,
    pub order: Option<String>,
    #[serde(rename = "type")]
    pub trade_type: Option<String>,
    pub side: Side,
    /// Signed as received; the sign is what `side` was derived from.
    pub price: Option<f64>,
    pub amount: Option<f64>,
    pub fee: Option<f64>,
    pub info: Value,
}
