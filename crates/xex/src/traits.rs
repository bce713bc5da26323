use async_trait::async_trait;
use serde_json::Value;

use crate::error::XexError;
use crate::remote::signer::SignedRequest;

/// A typed wire payload that can be turned into its canonical record.
pub trait RemoteResponse<T> {
    fn to_canonical(&self) -> Result<T, XexError>;
}

/// Executes a built request and hands back the decoded JSON body untouched.
/// Timeouts, retries and rate limits are the implementor's business.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    async fn fetch(&self, request: &SignedRequest) -> Result<Value, XexError>;
}

/// Resolves a canonical symbol into the pair id the exchange expects.
pub trait MarketResolver: Send + Sync {
    fn market_id(&self, symbol: &str) -> Result<String, XexError>;
}
