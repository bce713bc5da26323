use std::env;
use std::time::Duration;

use crate::error::XexError;
use crate::remote::endpoints::{DEFAULT_API_URL, DEFAULT_MARKETS_URL};
use crate::remote::signer::{Credentials, SignDigest, Signer};

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_USER_AGENT: &str = concat!("xex_adapter/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct XexConfig {
    /// `None` restricts the adapter to public endpoints.
    pub credentials: Option<Credentials>,
    pub api_url: String,
    pub markets_url: String,
    pub timeout: Duration,
    pub user_agent: String,
    pub sign_digest: SignDigest,
}

impl Default for XexConfig {
    fn default() -> Self {
        Self {
            credentials: None,
            api_url: DEFAULT_API_URL.to_string(),
            markets_url: DEFAULT_MARKETS_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            sign_digest: SignDigest::default(),
        }
    }
}

impl XexConfig {
    /// Reads `XEX_*` variables; call `dotenvy::dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> Result<Self, XexError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, XexError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let credentials = match (var("XEX_API_KEY"), var("XEX_SECRET")) {
            (Some(api_key), Some(secret)) => Some(Credentials::new(api_key, secret)),
            (None, None) => None,
            _ => {
                return Err(XexError::Config(
                    "XEX_API_KEY and XEX_SECRET must be set together".to_string(),
                ));
            }
        };

        let timeout = match var("XEX_TIMEOUT_SECS") {
            Some(raw) => {
                let secs = raw
                    .parse::<u64>()
                    .map_err(|e| XexError::Config(format!("XEX_TIMEOUT_SECS `{raw}`: {e}")))?;
                Duration::from_secs(secs)
            }
            None => defaults.timeout,
        };

        let sign_digest = match var("XEX_SIGN_DIGEST") {
            Some(raw) => raw.parse()?,
            None => defaults.sign_digest,
        };

        Ok(Self {
            credentials,
            api_url: var("XEX_API_URL").unwrap_or(defaults.api_url),
            markets_url: var("XEX_MARKETS_URL").unwrap_or(defaults.markets_url),
            timeout,
            user_agent: var("XEX_USER_AGENT").unwrap_or(defaults.user_agent),
            sign_digest,
        })
    }

    pub fn signer(&self) -> Signer {
        Signer::new(&self.api_url, self.credentials.clone(), self.sign_digest)
    }
}
