use thiserror::Error;

pub const EXCHANGE_ID: &str = "xex";

#[derive(Debug, Error)]
pub enum XexError {
    #[error("xex {0}")]
    MissingArgument(String),

    #[error("xex requires `api_key` and `secret` for private endpoints")]
    MissingCredentials,

    /// The response envelope carried a `msg` key; the text is kept verbatim.
    #[error("xex {0}")]
    ServerReported(String),

    #[error("xex malformed response: {0}")]
    MalformedResponse(String),

    #[error("xex invalid argument: {0}")]
    InvalidArgument(String),

    #[error("xex http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("xex http status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("xex config error: {0}")]
    Config(String),
}

impl XexError {
    pub fn missing(operation: &str, argument: &str) -> Self {
        XexError::MissingArgument(format!("{operation}() requires a {argument} argument"))
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        XexError::MalformedResponse(message.into())
    }
}
