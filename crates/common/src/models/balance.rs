use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BalanceEntry {
    pub free: Option<f64>,
    pub used: Option<f64>,
    pub total: Option<f64>,
}

impl BalanceEntry {
    /// `total` is always derived, never read from the wire.
    pub fn new(free: Option<f64>, used: Option<f64>) -> Self {
        let total = match (free, used) {
            (Some(f), Some(u)) => Some(f + u),
            _ => None,
        };
        Self { free, used, total }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Balances {
    /// Keyed by upper-case currency code.
    pub entries: BTreeMap<String, BalanceEntry>,
    pub info: Value,
}

impl Balances {
    pub fn get(&self, code: &str) -> Option<&BalanceEntry> {
        self.entries.get(&code.to_uppercase())
    }

    pub fn free(&self) -> BTreeMap<&str, Option<f64>> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.free)).collect()
    }

    pub fn used(&self) -> BTreeMap<&str, Option<f64>> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.used)).collect()
    }

    pub fn total(&self) -> BTreeMap<&str, Option<f64>> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.total)).collect()
    }
}
