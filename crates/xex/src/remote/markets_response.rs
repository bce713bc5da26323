use common::models::Market;
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::error::XexError;
use crate::remote::values::decode;
use crate::traits::RemoteResponse;

#[derive(Deserialize, Debug)]
pub struct PairDescriptor {
    pub name: String,
}

#[derive(Deserialize, Debug)]
pub struct SymbolListData {
    #[serde(rename(deserialize = "bbPairList"))]
    pub pairs: Vec<PairDescriptor>,
}

/// Catalog reply from the web host; pair names read `QUOTE_BASE`.
#[derive(Deserialize, Debug)]
pub struct SymbolListResponse {
    pub data: SymbolListData,
}

impl SymbolListResponse {
    pub fn new(response: &Value) -> Result<Self, XexError> {
        decode(response, "symbol list")
    }
}

impl RemoteResponse<Vec<Market>> for SymbolListResponse {
    fn to_canonical(&self) -> Result<Vec<Market>, XexError> {
        let mut markets = Vec::with_capacity(self.data.pairs.len());

        for pair in &self.data.pairs {
            let mut parts = pair.name.split('_');
            match (parts.next(), parts.next()) {
                (Some(quote), Some(base)) if !quote.is_empty() && !base.is_empty() => {
                    markets.push(Market {
                        id: pair.name.clone(),
                        symbol: pair.name.clone(),
                        base: base.to_string(),
                        quote: quote.to_string(),
                    });
                }
                _ => warn!("Skipping pair without QUOTE_BASE form: {}", pair.name),
            }
        }

        Ok(markets)
    }
}
