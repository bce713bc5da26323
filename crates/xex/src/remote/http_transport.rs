use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, error};

use crate::config::XexConfig;
use crate::error::XexError;
use crate::remote::signer::SignedRequest;
use crate::traits::Transport;

/// `reqwest` transport. One attempt per call; no retries.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(config: &XexConfig) -> Result<Self, XexError> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch(&self, request: &SignedRequest) -> Result<Value, XexError> {
        let mut builder = self.client.request(request.method.into(), &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let resp = builder.send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        debug!("{} {} -> {}", request.method, request.redacted_url(), status);

        classify(status, body)
    }
}

/// Error statuses keep their status code unless the body is an exchange
/// envelope carrying `msg`, which the caller turns into a server error.
pub fn classify(status: StatusCode, body: String) -> Result<Value, XexError> {
    let parsed = serde_json::from_str::<Value>(&body);

    if status.is_success() {
        return parsed.map_err(|e| XexError::malformed(format!("non-JSON body: {e}")));
    }

    match parsed {
        Ok(value) if value.get("msg").is_some() => Ok(value),
        _ => {
            error!("XEX request failed ({}): {}", status, body);
            Err(XexError::HttpStatus {
                status: status.as_u16(),
                body,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::envelope;
    use serde_json::json;

    #[test]
    fn test_success_body_is_passed_through() {
        let value = classify(StatusCode::OK, r#"{"data": {"last": "1"}}"#.to_string()).unwrap();
        assert_eq!(value, json!({"data": {"last": "1"}}));
    }

    #[test]
    fn test_success_without_json_is_malformed() {
        let result = classify(StatusCode::OK, "<html>".to_string());
        assert!(matches!(result, Err(XexError::MalformedResponse(_))));
    }

    #[test]
    fn test_json_error_without_msg_keeps_status() {
        let body = r#"{"error":"bad gateway"}"#.to_string();
        let err = classify(StatusCode::BAD_GATEWAY, body.clone()).unwrap_err();

        match err {
            XexError::HttpStatus { status, body: kept } => {
                assert_eq!(status, 502);
                assert_eq!(kept, body);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_non_json_error_keeps_status() {
        let err = classify(StatusCode::SERVICE_UNAVAILABLE, "down".to_string()).unwrap_err();
        assert_eq!(err.to_string(), "xex http status 503: down");
    }

    #[test]
    fn test_error_envelope_reaches_server_error() {
        let value = classify(StatusCode::BAD_REQUEST, r#"{"msg":"Invalid sign"}"#.to_string())
            .unwrap();
        let err = envelope::ensure_success(&value).unwrap_err();

        assert!(matches!(err, XexError::ServerReported(ref m) if m == "Invalid sign"));
    }
}
