use std::fmt;

/// Result type for rtui-store operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the store layer
#[derive(Debug)]
pub enum Error {
    /// Failure reported by the Redis client: connection, protocol or an
    /// error reply from the server
    Redis(redis::RedisError),

    /// The in-process store rejected a command the way a server would
    Server(String),

    /// A well-formed reply of the wrong shape for the command
    UnexpectedReply(String),

    /// Invalid key pattern
    Pattern(regex::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Redis(err) => write!(f, "Redis error: {}", err),
            Error::Server(msg) => write!(f, "Server error: {}", msg),
            Error::UnexpectedReply(msg) => write!(f, "Unexpected reply: {}", msg),
            Error::Pattern(err) => write!(f, "Invalid key pattern: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Redis(err) => Some(err),
            Error::Pattern(err) => Some(err),
            Error::Server(_) | Error::UnexpectedReply(_) => None,
        }
    }
}

impl From<redis::RedisError> for Error {
    fn from(err: redis::RedisError) -> Self {
        Error::Redis(err)
    }
}

impl From<regex::Error> for Error {
    fn from(err: regex::Error) -> Self {
        Error::Pattern(err)
    }
}
