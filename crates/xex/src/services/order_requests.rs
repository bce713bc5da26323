use common::models::Side;
use serde_json::Value;

use crate::error::XexError;
use crate::remote::signer::Params;

pub const STOP_LIMIT: &str = "STOP-LIMIT";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderType {
    Limit,
    Market,
    StopLimit,
}

impl OrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Limit => "LIMIT",
            OrderType::Market => "MARKET",
            OrderType::StopLimit => STOP_LIMIT,
        }
    }
}

/// Rejects absent or empty arguments before anything is signed or sent.
pub fn required<'a>(
    value: Option<&'a str>,
    operation: &str,
    argument: &str,
) -> Result<&'a str, XexError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(XexError::missing(operation, argument)),
    }
}

/// Layers caller-supplied extras over a built parameter map; caller keys win.
pub fn extend(mut base: Params, extra: &Params) -> Params {
    for (key, value) in extra {
        base.insert(key.clone(), value.clone());
    }
    base
}

fn number(value: f64, operation: &str, argument: &str) -> Result<Value, XexError> {
    if !value.is_finite() {
        return Err(XexError::InvalidArgument(format!(
            "{operation}() {argument} must be a finite number, got {value}"
        )));
    }
    Ok(Value::from(value))
}

pub fn place_order_params(
    pair: &str,
    order_type: OrderType,
    side: Side,
    amount: f64,
    price: Option<f64>,
) -> Result<Params, XexError> {
    let pair = required(Some(pair), "create_order", "symbol")?;

    let stop_price = match order_type {
        OrderType::StopLimit => {
            let price = price.ok_or_else(|| XexError::missing("create_order", "stop price"))?;
            number(price, "create_order", "price")?
        }
        _ => Value::from(0),
    };

    let mut params = Params::new();
    params.insert("isbid".to_string(), Value::from(side.as_str()));
    params.insert("order_type".to_string(), Value::from(order_type.as_str()));
    params.insert("pair".to_string(), Value::from(pair));
    params.insert("amount".to_string(), number(amount, "create_order", "amount")?);
    params.insert("stop_price".to_string(), stop_price);
    Ok(params)
}

pub fn cancel_order_params(id: Option<&str>, pair: Option<&str>) -> Result<Params, XexError> {
    let pair = required(pair, "cancel_order", "symbol")?;
    let id = required(id, "cancel_order", "id")?;

    let mut params = Params::new();
    params.insert("order_id".to_string(), Value::from(id));
    params.insert("pair".to_string(), Value::from(pair));
    Ok(params)
}

pub fn order_detail_params(id: Option<&str>) -> Result<Params, XexError> {
    let id = required(id, "fetch_order", "id")?;

    let mut params = Params::new();
    params.insert("order_id".to_string(), Value::from(id));
    Ok(params)
}

pub fn show_lever_orders_params(page: u32, page_size: u32) -> Params {
    let mut params = Params::new();
    params.insert("page".to_string(), Value::from(page));
    params.insert("pageSize".to_string(), Value::from(page_size));
    params
}

pub fn create_lever_order_params(
    pair: &str,
    side: Side,
    amount: f64,
    price: f64,
    rate: f64,
) -> Result<Params, XexError> {
    let pair = required(Some(pair), "create_lever_order", "symbol")?;

    let mut params = Params::new();
    params.insert("isBid".to_string(), Value::from(side.as_str()));
    params.insert("price".to_string(), number(price, "create_lever_order", "price")?);
    params.insert("pair".to_string(), Value::from(pair));
    params.insert("number".to_string(), number(amount, "create_lever_order", "amount")?);
    params.insert("rate".to_string(), number(rate, "create_lever_order", "rate")?);
    Ok(params)
}

pub fn lever_order_id_params(id: Option<&str>, operation: &str) -> Result<Params, XexError> {
    let id = required(id, operation, "id")?;

    let mut params = Params::new();
    params.insert("orderId".to_string(), Value::from(id));
    Ok(params)
}

pub fn leverage_charge_params(id: Option<&str>, amount: f64) -> Result<Params, XexError> {
    let mut params = lever_order_id_params(id, "leverage_charge")?;
    params.insert("number".to_string(), number(amount, "leverage_charge", "number")?);
    Ok(params)
}
