use std::fmt;

use serde::{Serialize, Serializer};
use serde_json::Value;

use super::Side;

/// Order lifecycle as reported by the numeric `status` column.
/// Codes outside the known table are carried through verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderStatus {
    Start,
    PartiallyExecuted,
    Executed,
    Cancelled,
    Other(String),
}

impl OrderStatus {
    pub fn from_code(code: &str) -> Self {
        match code {
            "1" => OrderStatus::Start,
            "2" => OrderStatus::PartiallyExecuted,
            "3" => OrderStatus::Executed,
            "4" => OrderStatus::Cancelled,
            other => OrderStatus::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            OrderStatus::Start => "Start",
            OrderStatus::PartiallyExecuted => "Partially Executed",
            OrderStatus::Executed => "Executed",
            OrderStatus::Cancelled => "Cancelled",
            OrderStatus::Other(code) => code,
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for OrderStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    pub id: String,
    pub timestamp: Option<i64>,
    pub datetime: Option<String>,
    pub last_trade_timestamp: Option<i64>,
    pub symbol: Option<String>,
    #[serde(rename = "type")]
    pub order_type: Option<String>,
    pub side: Side,
    pub price: Option<f64>,
    pub cost: Option<f64>,
    pub average: Option<f64>,
    pub amount: Option<f64>,
    pub filled: Option<f64>,
    pub remaining: Option<f64>,
    pub status: Option<OrderStatus>,
    pub fee: Option<f64>,
    pub stop_price: Option<f64>,
    pub info: Value,
}

/// Acknowledgement of a placed spot order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedOrder {
    pub id: String,
    pub info: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeverOrderPlaced {
    pub order_id: String,
    pub info: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeverOrders {
    pub orders: Value,
    pub info: Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_table() {
        assert_eq!(OrderStatus::from_code("1").to_string(), "Start");
        assert_eq!(OrderStatus::from_code("2").to_string(), "Partially Executed");
        assert_eq!(OrderStatus::from_code("3").to_string(), "Executed");
        assert_eq!(OrderStatus::from_code("4").to_string(), "Cancelled");
    }

    #[test]
    fn test_unknown_status_is_passed_through() {
        for code in ["0", "5", "99", "-1", "FILLED", ""] {
            let status = OrderStatus::from_code(code);
            assert_eq!(status, OrderStatus::Other(code.to_string()));
            assert_eq!(status.as_str(), code, "raw code must survive unchanged");
        }
    }
}
