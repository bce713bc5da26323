use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ohlcv {
    pub timestamp: i64,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    pub volume: Option<f64>,
}
