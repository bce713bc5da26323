use serde_json::Value;
use tracing::warn;

use crate::error::XexError;

/// Every XEX reply is a JSON object; a `msg` key means the server refused the call.
pub fn ensure_success(response: &Value) -> Result<(), XexError> {
    let Some(object) = response.as_object() else {
        return Err(XexError::malformed(format!(
            "expected a JSON object envelope, got {response}"
        )));
    };

    if let Some(msg) = object.get("msg") {
        let message = match msg {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        warn!("XEX reported an error: {}", message);
        return Err(XexError::ServerReported(message));
    }
    Ok(())
}

pub fn data<'a>(response: &'a Value, endpoint: &str) -> Result<&'a Value, XexError> {
    response
        .get("data")
        .ok_or_else(|| XexError::malformed(format!("{endpoint}: missing `data`")))
}

pub fn data_array<'a>(response: &'a Value, endpoint: &str) -> Result<&'a [Value], XexError> {
    data(response, endpoint)?
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| XexError::malformed(format!("{endpoint}: `data` is not an array")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_msg_short_circuits() {
        let response = json!({"msg": "Invalid sign", "data": {"last": "1"}});
        let err = ensure_success(&response).unwrap_err();

        assert!(matches!(err, XexError::ServerReported(ref m) if m == "Invalid sign"));
        assert_eq!(err.to_string(), "xex Invalid sign");
    }

    #[test]
    fn test_non_string_msg_is_rendered() {
        let err = ensure_success(&json!({"msg": 10003})).unwrap_err();
        assert_eq!(err.to_string(), "xex 10003");
    }

    #[test]
    fn test_non_object_envelope_is_malformed() {
        assert!(matches!(
            ensure_success(&json!([1, 2])),
            Err(XexError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_data_accessors() {
        let response = json!({"data": [[1], [2]]});
        assert!(ensure_success(&response).is_ok());
        assert_eq!(data_array(&response, "trades").unwrap().len(), 2);
        assert!(data(&json!({}), "ticker").is_err());
        assert!(data_array(&json!({"data": {}}), "trades").is_err());
    }
}
