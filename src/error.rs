use http::StatusCode;
use thiserror::Error;

/// Error raised by the HTTP executor, passed through untouched.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid store URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("configuration error: {0}")]
    Config(String),

    /// The endpoint resolved outside the store's API path.
    #[error("endpoint escapes the API base path: {0}")]
    InvalidEndpoint(String),

    #[error("method is not recognised: {0}")]
    UnsupportedMethod(String),

    #[error("request body is required for {0}")]
    MissingBody(&'static str),

    /// The server answered with something other than 200 or 201.
    ///
    /// `body` holds at most the first few KiB of the response, decoded lossily.
    #[error("request failed: {status}")]
    Status { status: StatusCode, body: String },

    #[error(transparent)]
    Transport(BoxError),

    #[error("failed to read random bytes for nonce: {0}")]
    Entropy(#[from] rand::Error),

    #[error("cannot serialize query parameters: {0}")]
    Serialize(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn transport<E: Into<BoxError>>(e: E) -> Self {
        Error::Transport(e.into())
    }

    /// Status code of a rejected request, if this is a protocol error.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_))
    }
}

#[cfg(feature = "reqwest")]
impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::transport(e)
    }
}
