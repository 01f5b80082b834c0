use std::io;
use thiserror::Error;

/// type alias for operations in the networking and command-line layers that
/// could fail with a [`CacheError`]
pub type Result<T> = std::result::Result<T, CacheError>;

/// The error variants produced by the client, server and command-line front
/// ends.
///
/// Note that the store itself contributes nothing here: all four store
/// operations are total, and a missing key is reported through the return
/// value, not as an error.
#[derive(Debug, Error)]
pub enum CacheError {
    /// a socket or stream operation failed
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    /// a request or response could not be encoded or decoded
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// a command line argument failed validation
    #[error("{0}")]
    Parsing(String),

    /// the server reported a failure while servicing a request
    #[error("server error: {0}")]
    Server(String),

    /// the server answered with a response that does not match the request
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),
}
