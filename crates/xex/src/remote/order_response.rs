use common::models::{Order, OrderStatus, Side, iso8601};
use serde_json::Value;

use crate::error::XexError;
use crate::remote::values::{as_float, as_text, as_timestamp, row};
use crate::traits::RemoteResponse;

const ORDER_FIELDS: usize = 10;

/// `[id, symbol, timestamp, filled, amount, price, tradePrice, type, stopPrice, status]`
#[derive(Debug, Clone)]
pub struct OrderRow {
    pub id: Value,
    pub symbol: Value,
    pub timestamp: Value,
    pub filled: Value,
    pub amount: Value,
    pub price: Value,
    pub trade_price: Value,
    pub order_type: Value,
    pub stop_price: Value,
    pub status: Value,
    pub raw: Value,
}

impl OrderRow {
    pub fn from_row(value: &Value) -> Result<Self, XexError> {
        let fields = row(value, ORDER_FIELDS, "order")?;
        Ok(Self {
            id: fields[0].clone(),
            symbol: fields[1].clone(),
            timestamp: fields[2].clone(),
            filled: fields[3].clone(),
            amount: fields[4].clone(),
            price: fields[5].clone(),
            trade_price: fields[6].clone(),
            order_type: fields[7].clone(),
            stop_price: fields[8].clone(),
            status: fields[9].clone(),
            raw: value.clone(),
        })
    }

    fn decode(&self, id: String, average: Option<f64>) -> Order {
        let timestamp = as_timestamp(&self.timestamp);
        let price = as_float(&self.price);
        let amount = as_float(&self.amount);
        let filled = as_float(&self.filled);
        let trade_price = as_float(&self.trade_price);

        Order {
            id,
            timestamp,
            datetime: iso8601(timestamp),
            last_trade_timestamp: None,
            symbol: as_text(&self.symbol),
            order_type: as_text(&self.order_type),
            side: Side::from_signed_price(price),
            price,
            cost: filled.zip(trade_price).map(|(f, p)| f * p),
            average,
            amount,
            filled,
            remaining: amount.zip(filled).map(|(a, f)| a - f),
            status: as_text(&self.status).map(|code| OrderStatus::from_code(&code)),
            fee: None,
            stop_price: as_float(&self.stop_price),
            info: self.raw.clone(),
        }
    }
}

/// List endpoints: the id comes from the row and no average is reported.
impl RemoteResponse<Order> for OrderRow {
    fn to_canonical(&self) -> Result<Order, XexError> {
        Ok(self.decode(as_text(&self.id).unwrap_or_default(), None))
    }
}

/// Single-order detail: keyed by the requested id, `tradePrice` doubles as the average fill.
#[derive(Debug, Clone)]
pub struct OrderDetailResponse {
    pub id: String,
    pub row: OrderRow,
}

impl OrderDetailResponse {
    pub fn new(id: &str, data: &Value) -> Result<Self, XexError> {
        Ok(Self {
            id: id.to_string(),
            row: OrderRow::from_row(data)?,
        })
    }
}

impl RemoteResponse<Order> for OrderDetailResponse {
    fn to_canonical(&self) -> Result<Order, XexError> {
        let average = as_float(&self.row.trade_price);
        Ok(self.row.decode(self.id.clone(), average))
    }
}
