use std::collections::HashMap;

use common::models::Market;

use crate::error::XexError;
use crate::traits::MarketResolver;

/// XEX pair names double as ids and symbols, so no catalog is needed to resolve them.
#[derive(Debug, Clone, Copy, Default)]
pub struct SymbolAsId;

impl MarketResolver for SymbolAsId {
    fn market_id(&self, symbol: &str) -> Result<String, XexError> {
        Ok(symbol.to_string())
    }
}

/// Resolver backed by a fetched catalog; unknown symbols are rejected locally.
#[derive(Debug, Clone, Default)]
pub struct PairCatalog {
    by_symbol: HashMap<String, Market>,
}

impl PairCatalog {
    pub fn new(markets: Vec<Market>) -> Self {
        Self {
            by_symbol: markets.into_iter().map(|m| (m.symbol.clone(), m)).collect(),
        }
    }

    pub fn market(&self, symbol: &str) -> Result<&Market, XexError> {
        self.by_symbol
            .get(symbol)
            .ok_or_else(|| XexError::InvalidArgument(format!("unknown symbol `{symbol}`")))
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.by_symbol.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_symbol.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_symbol.is_empty()
    }
}

impl MarketResolver for PairCatalog {
    fn market_id(&self, symbol: &str) -> Result<String, XexError> {
        self.market(symbol).map(|m| m.id.clone())
    }
}
