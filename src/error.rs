//! Error handling for the DTMF engine

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unknown key: {0}")]
    UnknownKey(String),

    #[error("Invalid buffer: {0}")]
    InvalidBuffer(String),

    #[error("No match: {0}")]
    NoMatch(String),

    #[error("Signal error: {0}")]
    Signal(String),

    #[error("Audio container error: {0}")]
    Audio(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn unknown_key<S: Into<String>>(msg: S) -> Self {
        Self::UnknownKey(msg.into())
    }

    pub fn invalid_buffer<S: Into<String>>(msg: S) -> Self {
        Self::InvalidBuffer(msg.into())
    }

    pub fn no_match<S: Into<String>>(msg: S) -> Self {
        Self::NoMatch(msg.into())
    }

    pub fn signal<S: Into<String>>(msg: S) -> Self {
        Self::Signal(msg.into())
    }

    pub fn audio<S: Into<String>>(msg: S) -> Self {
        Self::Audio(msg.into())
    }

    pub fn parse<S: Into<String>>(msg: S) -> Self {
        Self::Parse(msg.into())
    }

    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Self::Internal(msg.into())
    }
}
