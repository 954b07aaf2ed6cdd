use thiserror::Error;

/// Failure of a call to the recipe service
///
/// Carries rendered messages instead of the transport error itself so it
/// can travel inside UI messages, which must be `Clone`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced a response (DNS, TLS, connection reset...)
    #[error("network error: {0}")]
    Network(String),

    /// The service answered with a non-2xx status
    #[error("server responded with status {status}")]
    Server { status: u16 },

    /// A 2xx response whose body was not the expected JSON
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            ApiError::Server {
                status: status.as_u16(),
            }
        } else if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
