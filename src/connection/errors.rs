/// Errors raised while opening or using the database connection
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConnectionError {
    /// The configured endpoint could not be parsed or resolved
    #[error("invalid database uri: {0}")]
    InvalidUri(String),
    /// The server did not answer during connection establishment
    #[error("database unreachable: {0}")]
    Unreachable(String),
    /// An operation was issued before `ensure_connected` succeeded
    #[error("database is not connected")]
    NotConnected,
}
