use chrono::{DateTime, SecondsFormat, Utc};

/// Renders an epoch-millisecond timestamp as `YYYY-MM-DDTHH:MM:SS.mmmZ`.
pub fn iso8601(timestamp: Option<i64>) -> Option<String> {
    let millis = timestamp?;
    DateTime::<Utc>::from_timestamp_millis(millis)
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iso8601_keeps_milliseconds() {
        assert_eq!(
            iso8601(Some(1_620_000_000_123)).as_deref(),
            Some("2021-05-03T00:00:00.123Z")
        );
    }

    #[test]
    fn test_iso8601_absent_timestamp() {
        assert_eq!(iso8601(None), None);
    }
}
