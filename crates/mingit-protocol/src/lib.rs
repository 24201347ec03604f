//! Git smart-HTTP wire protocol: pkt-line framing, reference discovery,
//! and the upload-pack request that yields a packfile.

pub mod fetch;
pub mod http;
pub mod pktline;
pub mod refs;

/// Errors that can occur during protocol operations.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("invalid pkt-line: {0}")]
    InvalidPktLine(String),

    #[error("protocol error: {0}")]
    Protocol(String),

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("ref not found: {0}")]
    RefNotFound(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
