use std::collections::BTreeMap;

use common::models::{BalanceEntry, Balances};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::XexError;
use crate::remote::envelope;
use crate::remote::values::{as_float, decode};
use crate::traits::RemoteResponse;

/// `data` of the wallet endpoint: two maps keyed by lower-case coin.
#[derive(Deserialize, Debug)]
pub struct WalletData {
    pub free: Map<String, Value>,
    #[serde(default)]
    pub freezed: Map<String, Value>,
}

#[derive(Debug)]
pub struct WalletResponse {
    pub data: WalletData,
    pub info: Value,
}

impl WalletResponse {
    pub fn new(response: &Value) -> Result<Self, XexError> {
        let data = envelope::data(response, "wallet")?;
        Ok(Self {
            data: decode(data, "wallet")?,
            info: response.clone(),
        })
    }
}

impl RemoteResponse<Balances> for WalletResponse {
    fn to_canonical(&self) -> Result<Balances, XexError> {
        // Coins present only in `freezed` are not reported.
        let entries: BTreeMap<String, BalanceEntry> = self
            .data
            .free
            .iter()
            .map(|(coin, free)| {
                let used = self.data.freezed.get(coin).map_or(Some(0.0), as_float);
                (coin.to_uppercase(), BalanceEntry::new(as_float(free), used))
            })
            .collect();

        Ok(Balances {
            entries,
            info: self.info.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn balances(response: Value) -> Balances {
        WalletResponse::new(&response).unwrap().to_canonical().unwrap()
    }

    #[test]
    fn test_btc_wallet_scenario() {
        let b = balances(json!({"data": {"free": {"btc": "1.5"}, "freezed": {"btc": "0.5"}}}));

        assert_eq!(
            b.get("BTC"),
            Some(&BalanceEntry {
                free: Some(1.5),
                used: Some(0.5),
                total: Some(2.0),
            })
        );
        assert_eq!(b.entries.len(), 1);
    }

    #[test]
    fn test_missing_freezed_entry_counts_as_zero() {
        let b = balances(json!({
            "data": {"free": {"eth": 3, "usdt": "10"}, "freezed": {"usdt": "2"}}
        }));

        let eth = b.get("ETH").unwrap();
        assert_eq!(eth.used, Some(0.0));
        assert_eq!(eth.total, Some(3.0));
        assert_eq!(b.get("USDT").unwrap().total, Some(12.0));
    }

    #[test]
    fn test_missing_freezed_map_counts_as_zero() {
        let b = balances(json!({"data": {"free": {"xrp": "7"}}}));
        assert_eq!(b.get("XRP").unwrap().total, Some(7.0));
    }

    #[test]
    fn test_freezed_only_coins_are_not_surfaced() {
        let b = balances(json!({"data": {"free": {"btc": "1"}, "freezed": {"doge": "5"}}}));

        assert!(b.get("DOGE").is_none());
        assert_eq!(b.entries.keys().collect::<Vec<_>>(), vec!["BTC"]);
    }

    #[test]
    fn test_info_keeps_whole_response() {
        let response = json!({"data": {"free": {"btc": "1"}, "freezed": {}}, "code": 0});
        assert_eq!(balances(response.clone()).info, response);
    }

    #[test]
    fn test_missing_free_is_malformed() {
        let result = WalletResponse::new(&json!({"data": {"freezed": {}}}));
        assert!(matches!(result, Err(XexError::MalformedResponse(_))));
        assert!(WalletResponse::new(&json!({})).is_err());
    }
}
