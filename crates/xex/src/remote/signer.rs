use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::Utc;
use md5::Md5;
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::XexError;
use crate::remote::values::{param_text, urlencode};

/// Request parameters in caller insertion order.
pub type Params = Map<String, Value>;

/// Reserved parameter holding an object of values that ride along unsigned.
pub const UNSIGNED_KEY: &str = "unsigned";
pub const SIGNATURE_KEY: &str = "auth_sign";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Api {
    Public,
    Private,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SignDigest {
    #[default]
    Md5,
    Sha256,
}

impl SignDigest {
    pub fn hex(&self, payload: &str) -> String {
        match self {
            SignDigest::Md5 => hex::encode(Md5::digest(payload.as_bytes())),
            SignDigest::Sha256 => hex::encode(Sha256::digest(payload.as_bytes())),
        }
    }
}

impl FromStr for SignDigest {
    type Err = XexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "md5" => Ok(SignDigest::Md5),
            "sha256" => Ok(SignDigest::Sha256),
            other => Err(XexError::Config(format!("unsupported sign digest `{other}`"))),
        }
    }
}

#[derive(Clone)]
pub struct Credentials {
    pub api_key: String,
    pub secret: String,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            secret: secret.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Fully built outgoing request. Body is never used by XEX: everything,
/// including the signature, travels in the query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    pub url: String,
    pub method: HttpMethod,
    pub body: Option<String>,
    pub headers: BTreeMap<String, String>,
}

impl SignedRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: HttpMethod::Get,
            body: None,
            headers: BTreeMap::new(),
        }
    }

    /// URL safe to log: the signature value is masked.
    pub fn redacted_url(&self) -> String {
        let marker = format!("&{SIGNATURE_KEY}=");
        match self.url.find(&marker) {
            Some(pos) => format!("{}{marker}***", &self.url[..pos]),
            None => self.url.clone(),
        }
    }
}

/// Epoch milliseconds. Two calls inside the same millisecond share a nonce.
pub fn nonce() -> u64 {
    u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default()
}

#[derive(Debug, Clone)]
pub struct Signer {
    api_url: String,
    credentials: Option<Credentials>,
    digest: SignDigest,
}

impl Signer {
    pub fn new(
        api_url: impl Into<String>,
        credentials: Option<Credentials>,
        digest: SignDigest,
    ) -> Self {
        Self {
            api_url: api_url.into().trim_end_matches('/').to_string(),
            credentials,
            digest,
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn has_credentials(&self) -> bool {
        self.credentials().is_ok()
    }

    pub fn sign(
        &self,
        path: &str,
        api: Api,
        method: HttpMethod,
        params: &Params,
    ) -> Result<SignedRequest, XexError> {
        match api {
            Api::Public => Ok(self.public_request(path, method, params)),
            Api::Private => {
                let credentials = self.credentials()?;
                Ok(self.private_request(path, method, params, credentials, nonce()))
            }
        }
    }

    /// Same as [`Signer::sign`] with a caller-supplied nonce.
    pub fn sign_with_nonce(
        &self,
        path: &str,
        api: Api,
        method: HttpMethod,
        params: &Params,
        nonce: u64,
    ) -> Result<SignedRequest, XexError> {
        match api {
            Api::Public => Ok(self.public_request(path, method, params)),
            Api::Private => {
                let credentials = self.credentials()?;
                Ok(self.private_request(path, method, params, credentials, nonce))
            }
        }
    }

    fn credentials(&self) -> Result<&Credentials, XexError> {
        match &self.credentials {
            Some(c) if !c.api_key.is_empty() && !c.secret.is_empty() => Ok(c),
            _ => Err(XexError::MissingCredentials),
        }
    }

    fn public_request(&self, path: &str, method: HttpMethod, params: &Params) -> SignedRequest {
        let mut url = format!("{}/{}", self.api_url, path);
        if !params.is_empty() {
            url.push('?');
            url.push_str(&urlencode(params.iter()));
        }

        SignedRequest {
            url,
            method,
            body: None,
            headers: BTreeMap::new(),
        }
    }

    fn private_request(
        &self,
        path: &str,
        method: HttpMethod,
        params: &Params,
        credentials: &Credentials,
        nonce: u64,
    ) -> SignedRequest {
        let unsigned = params.get(UNSIGNED_KEY);

        // Caller params override the auth fields, as the exchange expects.
        let mut signing: BTreeMap<String, Value> = BTreeMap::new();
        signing.insert("api_key".to_string(), Value::String(credentials.api_key.clone()));
        signing.insert("auth_nonce".to_string(), Value::from(nonce));
        for (key, value) in params.iter().filter(|(k, _)| k.as_str() != UNSIGNED_KEY) {
            signing.insert(key.clone(), value.clone());
        }

        let payload = match method {
            HttpMethod::Get => format!("{}{}{}", credentials.api_key, nonce, credentials.secret),
            HttpMethod::Post => {
                let mut joined: String = signing.values().map(param_text).collect();
                joined.push_str(&credentials.secret);
                joined
            }
        };
        let signature = self.digest.hex(&payload);

        let mut query: Vec<(String, Value)> = signing.into_iter().collect();
        if let Some(Value::Object(extra)) = unsigned {
            for (key, value) in extra {
                match query.iter_mut().find(|(k, _)| k == key) {
                    Some(slot) => slot.1 = value.clone(),
                    None => query.push((key.clone(), value.clone())),
                }
            }
        }

        let url = format!(
            "{}/{}?{}&{SIGNATURE_KEY}={}",
            self.api_url,
            path,
            urlencode(query.iter().map(|(k, v)| (k, v))),
            signature
        );
        debug!(path, %method, nonce, "signed private request");

        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());

        SignedRequest {
            url,
            method,
            body: None,
            headers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const NONCE: u64 = 1_620_000_000_000;

    fn signer() -> Signer {
        Signer::new(
            "https://api.xex-dev.com",
            Some(Credentials::new("key", "secret")),
            SignDigest::Md5,
        )
    }

    fn params(value: Value) -> Params {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    fn signature(request: &SignedRequest) -> String {
        let marker = format!("&{SIGNATURE_KEY}=");
        let pos = request.url.find(&marker).expect("signature present");
        request.url[pos + marker.len()..].to_string()
    }

    #[test]
    fn test_public_request_has_plain_query() {
        let request = signer()
            .sign(
                "GET/v1/api/ticker",
                Api::Public,
                HttpMethod::Get,
                &params(json!({"pair": "BTC_USDT"})),
            )
            .unwrap();

        assert_eq!(request.url, "https://api.xex-dev.com/GET/v1/api/ticker?pair=BTC_USDT");
        assert!(request.headers.is_empty());
        assert_eq!(request.body, None);
    }

    #[test]
    fn test_public_request_without_params() {
        let request = signer()
            .sign("GET/v1/api/depth", Api::Public, HttpMethod::Get, &Params::new())
            .unwrap();
        assert_eq!(request.url, "https://api.xex-dev.com/GET/v1/api/depth");
    }

    #[test]
    fn test_post_signature_over_sorted_values() {
        let request = signer()
            .sign_with_nonce(
                "POST/v1/api/trades",
                Api::Private,
                HttpMethod::Post,
                &params(json!({"pair": "BTC_USDT", "amount": 1})),
                NONCE,
            )
            .unwrap();

        // md5("1" + "key" + "1620000000000" + "BTC_USDT" + "secret")
        assert_eq!(
            request.url,
            "https://api.xex-dev.com/POST/v1/api/trades?amount=1&api_key=key\
             &auth_nonce=1620000000000&pair=BTC_USDT&auth_sign=eb78cb8348a8219bba55e932742e359f"
        );
        assert_eq!(
            request.headers.get("Content-Type").map(String::as_str),
            Some("application/json")
        );
    }

    #[test]
    fn test_get_signature_ignores_params() {
        let s = signer();
        let with_params = s
            .sign_with_nonce(
                "GET/v1/api/orderdetail",
                Api::Private,
                HttpMethod::Get,
                &params(json!({"order_id": "42"})),
                NONCE,
            )
            .unwrap();
        let without_params = s
            .sign_with_nonce(
                "GET/v1/api/auth/wallet",
                Api::Private,
                HttpMethod::Get,
                &Params::new(),
                NONCE,
            )
            .unwrap();

        // md5("key" + "1620000000000" + "secret")
        assert_eq!(signature(&with_params), "e51fdcbb73df830e9d6694ec888bf728");
        assert_eq!(signature(&with_params), signature(&without_params));
    }

    #[test]
    fn test_get_and_post_signatures_differ_with_params() {
        let s = signer();
        let p = params(json!({"order_id": "42", "pair": "BTC_USDT"}));
        let get = s
            .sign_with_nonce("x", Api::Private, HttpMethod::Get, &p, NONCE)
            .unwrap();
        let post = s
            .sign_with_nonce("x", Api::Private, HttpMethod::Post, &p, NONCE)
            .unwrap();

        assert_ne!(signature(&get), signature(&post));
    }

    #[test]
    fn test_signing_is_deterministic_and_order_independent() {
        let s = signer();
        let mut forward = Params::new();
        forward.insert("pair".to_string(), json!("ETH_USDT"));
        forward.insert("amount".to_string(), json!("0.5"));
        forward.insert("order_type".to_string(), json!("LIMIT"));

        let mut backward = Params::new();
        backward.insert("order_type".to_string(), json!("LIMIT"));
        backward.insert("amount".to_string(), json!("0.5"));
        backward.insert("pair".to_string(), json!("ETH_USDT"));

        let a = s
            .sign_with_nonce("p", Api::Private, HttpMethod::Post, &forward, NONCE)
            .unwrap();
        let b = s
            .sign_with_nonce("p", Api::Private, HttpMethod::Post, &forward, NONCE)
            .unwrap();
        let c = s
            .sign_with_nonce("p", Api::Private, HttpMethod::Post, &backward, NONCE)
            .unwrap();

        assert_eq!(a, b);
        assert_eq!(signature(&a), signature(&c));
        assert_eq!(a.url, c.url);
    }

    #[test]
    fn test_unsigned_params_ride_along_without_affecting_signature() {
        let s = signer();
        let plain = params(json!({"pair": "BTC_USDT"}));
        let mut with_unsigned = plain.clone();
        with_unsigned.insert(UNSIGNED_KEY.to_string(), json!({"client_tag": "probe"}));

        let a = s
            .sign_with_nonce("p", Api::Private, HttpMethod::Post, &plain, NONCE)
            .unwrap();
        let b = s
            .sign_with_nonce("p", Api::Private, HttpMethod::Post, &with_unsigned, NONCE)
            .unwrap();

        assert_eq!(signature(&a), signature(&b));
        assert!(b.url.contains("&client_tag=probe&auth_sign="), "{}", b.url);
        assert!(!b.url.contains("unsigned"));
        assert!(with_unsigned.contains_key(UNSIGNED_KEY), "caller map must not be mutated");
    }

    #[test]
    fn test_missing_credentials_fail_fast() {
        let anonymous = Signer::new("https://api.xex-dev.com", None, SignDigest::Md5);
        let empty_secret = Signer::new(
            "https://api.xex-dev.com",
            Some(Credentials::new("key", "")),
            SignDigest::Md5,
        );

        for s in [anonymous, empty_secret] {
            let result = s.sign("p", Api::Private, HttpMethod::Get, &Params::new());
            assert!(matches!(result, Err(XexError::MissingCredentials)));
        }
    }

    #[test]
    fn test_sha256_digest() {
        let s = Signer::new(
            "https://api.xex-dev.com/",
            Some(Credentials::new("key", "secret")),
            SignDigest::Sha256,
        );
        let request = s
            .sign_with_nonce("p", Api::Private, HttpMethod::Get, &Params::new(), NONCE)
            .unwrap();

        assert!(request.url.starts_with("https://api.xex-dev.com/p?"));
        assert_eq!(
            signature(&request),
            "d75c773e9e1f36c49c9fc8271b1f49ca714fef3efdef068e93ab26992e12f885"
        );
    }

    #[test]
    fn test_redacted_url_hides_signature() {
        let request = signer()
            .sign_with_nonce("p", Api::Private, HttpMethod::Get, &Params::new(), NONCE)
            .unwrap();
        let redacted = request.redacted_url();

        assert!(redacted.ends_with("&auth_sign=***"));
        assert!(!redacted.contains("e51fdcbb"));
    }

    #[test]
    fn test_digest_from_str() {
        assert_eq!("MD5".parse::<SignDigest>().unwrap(), SignDigest::Md5);
        assert_eq!("sha256".parse::<SignDigest>().unwrap(), SignDigest::Sha256);
        assert!("crc32".parse::<SignDigest>().is_err());
    }
}
