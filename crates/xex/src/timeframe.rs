use crate::error::XexError;

/// Canonical interval -> XEX `type` parameter of the kline endpoint.
pub const TIMEFRAMES: &[(&str, &str)] = &[
    ("1m", "1MIN"),
    ("5m", "5MIN"),
    ("15m", "15MIN"),
    ("30m", "30MIN"),
    ("1h", "1H"),
    ("2h", "2H"),
    ("4h", "4H"),
    ("6h", "6H"),
    ("12h", "12H"),
    ("1d", "D"),
    ("2d", "2D"),
    ("1w", "W"),
    ("month", "MONTH"),
];

pub fn exchange_interval(timeframe: &str) -> Result<&'static str, XexError> {
    TIMEFRAMES
        .iter()
        .find(|(canonical, _)| *canonical == timeframe)
        .map(|(_, interval)| *interval)
        .ok_or_else(|| XexError::InvalidArgument(format!("unsupported timeframe `{timeframe}`")))
}
