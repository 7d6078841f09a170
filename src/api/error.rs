use thiserror::Error;

/// Errors surfaced by the request dispatcher and the token manager.
///
/// The three variants stay distinct so callers can react selectively,
/// e.g. retry only on `Transport` while treating `Api` as final.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The platform reported a logical failure (nonzero `errcode`)
    #[error("API error {code}: {message}")]
    Api { code: i64, message: String },

    /// The underlying HTTP call failed (connection, timeout, TLS, DNS)
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body was not parseable as the expected structure
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl ClientError {
    /// Platform error code, if this is an `Api` error
    pub fn code(&self) -> Option<i64> {
        match self {
            ClientError::Api { code, .. } => Some(*code),
            _ => None,
        }
    }
}
