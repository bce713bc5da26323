use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// XEX rows carry no side token: a strictly positive price means buy.
    pub fn from_signed_price(price: Option<f64>) -> Self {
        match price {
            Some(p) if p > 0.0 => Side::Buy,
            _ => Side::Sell,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Buy => "buy",
            Side::Sell => "sell",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_from_signed_price() {
        assert_eq!(Side::from_signed_price(Some(0.0001)), Side::Buy);
        assert_eq!(Side::from_signed_price(Some(0.0)), Side::Sell);
        assert_eq!(Side::from_signed_price(Some(-42.0)), Side::Sell);
        assert_eq!(Side::from_signed_price(None), Side::Sell);
    }
}
