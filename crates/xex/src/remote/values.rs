use serde::de::DeserializeOwned;
use serde_json::Value;
use url::form_urlencoded;

use crate::error::XexError;

/// Numeric coercion for loosely typed wire fields. Strings are read up to the
/// longest numeric prefix (`"12abc"` is 12, `"Infinity"` is infinite); anything
/// without one becomes unknown.
pub fn as_float(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => leading_float(s),
        _ => None,
    }
}

fn leading_float(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let digits = |from: usize| bytes[from..].iter().take_while(|b| b.is_ascii_digit()).count();

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    if s[end..].starts_with("Infinity") {
        return Some(if bytes[0] == b'-' {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let int_digits = digits(end);
    end += int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = digits(end + 1);
        end += 1 + frac_digits;
    }
    if int_digits + frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_digits = digits(exp);
        if exp_digits > 0 {
            end = exp + exp_digits;
        }
    }

    s[..end].parse().ok()
}

pub fn as_float_opt(value: Option<&Value>) -> Option<f64> {
    value.and_then(as_float)
}

/// Epoch milliseconds, accepted as a number or a numeric string.
pub fn as_timestamp(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|v| v.is_finite()).map(|f| f as i64))
        }
        _ => None,
    }
}

pub fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(param_text(other)),
    }
}

/// String form of a parameter value as it goes into the signature payload
/// and the query string. Integral floats drop their fraction (`1.0` -> `1`).
pub fn param_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                return n.to_string();
            }
            match n.as_f64() {
                Some(f) if f.fract() == 0.0 && f.abs() < 1e21 => format!("{f:.0}"),
                Some(f) => f.to_string(),
                None => n.to_string(),
            }
        }
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}

pub fn urlencode<'a, I>(pairs: I) -> String
where
    I: IntoIterator<Item = (&'a String, &'a Value)>,
{
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in pairs {
        serializer.append_pair(key, &param_text(value));
    }
    serializer.finish()
}

/// Deserializes a wire fragment, reporting shape mismatches as malformed responses.
pub fn decode<T: DeserializeOwned>(value: &Value, what: &str) -> Result<T, XexError> {
    serde_json::from_value(value.clone())
        .map_err(|e| XexError::malformed(format!("{what}: {e}")))
}

/// Borrows a positional row, requiring at least `min_len` columns.
pub fn row<'a>(value: &'a Value, min_len: usize, what: &str) -> Result<&'a [Value], XexError> {
    let items = value
        .as_array()
        .ok_or_else(|| XexError::malformed(format!("{what} row is not an array: {value}")))?;
    if items.len() < min_len {
        return Err(XexError::malformed(format!(
            "{what} row has {} fields, expected at least {min_len}",
            items.len()
        )));
    }
    Ok(items)
}
