use common::models::{Side, Trade, iso8601};
use serde_json::Value;

use crate::error::XexError;
use crate::remote::values::{as_float, as_text, as_timestamp, row};
use crate::traits::RemoteResponse;

const TRADE_FIELDS: usize = 6;
const TRADE_FIELDS_WITH_FEE: usize = 7;
const MY_TRADE_MIN_FIELDS: usize = 7;

/// `[id, price, amount, timestamp, type, symbol, fee?]`
#[derive(Debug, Clone)]
pub struct TradeRow {
    pub id: Value,
    pub price: Value,
    pub amount: Value,
    pub timestamp: Value,
    pub trade_type: Value,
    pub symbol: Value,
    pub fee: Option<Value>,
    pub raw: Value,
}

impl TradeRow {
    pub fn from_row(value: &Value) -> Result<Self, XexError> {
        let fields = row(value, TRADE_FIELDS, "trade")?;
        Ok(Self {
            id: fields[0].clone(),
            price: fields[1].clone(),
            amount: fields[2].clone(),
            timestamp: fields[3].clone(),
            trade_type: fields[4].clone(),
            symbol: fields[5].clone(),
            fee: (fields.len() >= TRADE_FIELDS_WITH_FEE).then(|| fields[6].clone()),
            raw: value.clone(),
        })
    }

    /// Public trade rows omit the pair; it is appended before decoding.
    pub fn from_public_row(value: &Value, symbol: &str) -> Result<Self, XexError> {
        let mut fields = value
            .as_array()
            .cloned()
            .ok_or_else(|| XexError::malformed(format!("trade row is not an array: {value}")))?;
        fields.push(Value::String(symbol.to_string()));
        Self::from_row(&Value::Array(fields))
    }
}

impl RemoteResponse<Trade> for TradeRow {
    fn to_canonical(&self) -> Result<Trade, XexError> {
        let price = as_float(&self.price);
        let timestamp = as_timestamp(&self.timestamp);

        Ok(Trade {
            id: as_text(&self.id).unwrap_or_default(),
            timestamp,
            datetime: iso8601(timestamp),
            symbol: as_text(&self.symbol),
            order: None,
            trade_type: as_text(&self.trade_type),
            side: Side::from_signed_price(price),
            price,
            amount: as_float(&self.amount),
            fee: self.fee.as_ref().and_then(as_float),
            info: self.raw.clone(),
        })
    }
}

/// Private fills: `[id, pair, time, price, amount, _, type, _, fee]`.
#[derive(Debug, Clone)]
pub struct MyTradeRow {
    pub trade: TradeRow,
}

impl MyTradeRow {
    pub fn from_row(value: &Value) -> Result<Self, XexError> {
        let fields = row(value, MY_TRADE_MIN_FIELDS, "my trade")?;
        let mut remapped = vec![
            fields[0].clone(),
            fields[3].clone(),
            fields[4].clone(),
            fields[2].clone(),
            fields[6].clone(),
            fields[1].clone(),
        ];
        if let Some(fee) = fields.get(8) {
            remapped.push(fee.clone());
        }

        Ok(Self {
            trade: TradeRow::from_row(&Value::Array(remapped))?,
        })
    }
}

impl RemoteResponse<Trade> for MyTradeRow {
    fn to_canonical(&self) -> Result<Trade, XexError> {
        self.trade.to_canonical()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(row: Value) -> Trade {
        TradeRow::from_row(&row).unwrap().to_canonical().unwrap()
    }

    #[test]
    fn test_side_follows_price_sign_for_both_layouts() {
        let cases = [
            (json!("101.5"), Side::Buy),
            (json!(0.00000001), Side::Buy),
            (json!("0"), Side::Sell),
            (json!(-99.25), Side::Sell),
            (json!("-0.5"), Side::Sell),
            (json!("garbage"), Side::Sell),
            (json!("12abc"), Side::Buy),
            (json!("Infinity"), Side::Buy),
            (json!("-Infinity"), Side::Sell),
        ];

        for (price, expected) in cases {
            let six = decode(json!(["t1", price.clone(), "2", 1, "LIMIT", "BTC_USDT"]));
            let seven = decode(json!(["t1", price.clone(), "2", 1, "LIMIT", "BTC_USDT", "0.01"]));
            assert_eq!(six.side, expected, "6 fields, price {price}");
            assert_eq!(seven.side, expected, "7 fields, price {price}");
        }
    }

    #[test]
    fn test_price_keeps_its_sign() {
        let trade = decode(json!(["t1", "-99.25", "2", 1, "LIMIT", "BTC_USDT"]));
        assert_eq!(trade.side, Side::Sell);
        assert_eq!(trade.price, Some(-99.25));
    }

    #[test]
    fn test_fee_only_with_seven_fields() {
        let six = decode(json!(["t1", "1", "2", 1, "LIMIT", "BTC_USDT"]));
        let seven = decode(json!(["t1", "1", "2", 1, "LIMIT", "BTC_USDT", "0.01"]));

        assert_eq!(six.fee, None);
        assert_eq!(seven.fee, Some(0.01));
        assert_eq!(seven.amount, Some(2.0));
        assert_eq!(seven.symbol.as_deref(), Some("BTC_USDT"));
        assert_eq!(seven.trade_type.as_deref(), Some("LIMIT"));
        assert_eq!(seven.id, "t1");
    }

    #[test]
    fn test_short_row_is_malformed() {
        let result = TradeRow::from_row(&json!(["t1", "1", "2", 1, "LIMIT"]));
        assert!(matches!(result, Err(XexError::MalformedResponse(_))));
    }

    #[test]
    fn test_public_row_gets_symbol_appended() {
        let raw = json!([7, "3.5", "1", 1620000000000_i64, "MARKET"]);
        let trade = TradeRow::from_public_row(&raw, "ETH_USDT")
            .unwrap()
            .to_canonical()
            .unwrap();

        assert_eq!(trade.id, "7");
        assert_eq!(trade.symbol.as_deref(), Some("ETH_USDT"));
        assert_eq!(trade.side, Side::Buy);
        assert_eq!(trade.fee, None);
        assert_eq!(trade.info.as_array().map(Vec::len), Some(6));
    }

    #[test]
    fn test_my_trade_layout_is_remapped() {
        let raw = json!([
            "f9", "BTC_USDT", 1620000000000_i64, "-50000", "0.1", "x", "LIMIT", "y", "0.2"
        ]);
        let trade = MyTradeRow::from_row(&raw).unwrap().to_canonical().unwrap();

        assert_eq!(trade.id, "f9");
        assert_eq!(trade.symbol.as_deref(), Some("BTC_USDT"));
        assert_eq!(trade.timestamp, Some(1620000000000));
        assert_eq!(trade.price, Some(-50000.0));
        assert_eq!(trade.side, Side::Sell);
        assert_eq!(trade.amount, Some(0.1));
        assert_eq!(trade.trade_type.as_deref(), Some("LIMIT"));
        assert_eq!(trade.fee, Some(0.2));
    }

    #[test]
    fn test_my_trade_without_fee_column() {
        let raw = json!(["f9", "BTC_USDT", 1, "10", "1", "x", "LIMIT"]);
        let trade = MyTradeRow::from_row(&raw).unwrap().to_canonical().unwrap();
        assert_eq!(trade.fee, None);
        assert_eq!(trade.side, Side::Buy);
    }
}
