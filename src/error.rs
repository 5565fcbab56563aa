/// Everything that can go wrong between a controller and the gateway.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request never produced a response (network, TLS, timeout).
    #[error("Gateway request failed: {0}")]
    Transport(String),

    /// The gateway answered with a non-success HTTP status.
    #[error("Gateway returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The gateway answered but reported `success: false`.
    #[error("{0}")]
    Rejected(String),

    /// The gateway's payload did not match the expected record shape.
    #[error("Unexpected gateway payload: {0}")]
    Decode(#[from] serde_json::Error),

    /// Input was rejected locally, before any remote call.
    #[error("{0}")]
    Validation(String),

    /// The action needs a logged-in user.
    #[error("Please log in to {0}")]
    Unauthenticated(&'static str),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
