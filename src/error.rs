use thiserror::Error;

/// Photosets client error type.
#[derive(Debug, Error)]
pub enum Error {
    /// A required argument was empty or absent. Detected before any
    /// transport activity; the remote service is never contacted.
    #[error("photosets: missing required argument `{0}`")]
    MissingArgument(&'static str),

    /// An argument was present but unusable.
    #[error("photosets: invalid argument: {0}")]
    InvalidArgument(String),

    /// Connection, IO, or HTTP-level failure from the transport.
    #[error("photosets transport: {0}")]
    Transport(String),

    /// The remote service answered with a `stat="fail"` envelope.
    #[error("flickr api error {code}: {message}")]
    Api { code: u32, message: String },

    /// The response document could not be parsed, or lacked structure
    /// the operation requires. Distinct from a merely absent optional
    /// field, which is a normal `None` at the extraction layer.
    #[error("photosets: malformed response: {0}")]
    MalformedResponse(String),
}

impl Error {
    pub fn malformed(msg: impl Into<String>) -> Self {
        Error::MalformedResponse(msg.into())
    }

    pub fn transport(msg: impl Into<String>) -> Self {
        Error::Transport(msg.into())
    }

    pub fn api(code: u32, message: impl Into<String>) -> Self {
        Error::Api {
            code,
            message: message.into(),
        }
    }
}

/// Checks whether an error is a remote API error with the given code.
pub fn is_api_error(err: &Error, code: u32) -> bool {
    matches!(err, Error::Api { code: c, .. } if *c == code)
}

pub type Result<T> = std::result::Result<T, Error>;
