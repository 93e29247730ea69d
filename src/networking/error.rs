//! Error types for the networking module
//!
//! None of these are fatal to the client: the session degrades to a
//! read-only board or a status line instead.

use thiserror::Error;

/// Errors that can occur while talking to the game server
#[derive(Error, Debug)]
pub enum NetworkError {
    /// Server URL could not be parsed or converted to a socket URL
    #[error("Invalid server URL: {message}")]
    InvalidUrl { message: String },

    /// WebSocket handshake or I/O failure
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] websocket::Error),

    /// HTTP side-channel failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP side-channel answered with a non-success status
    #[error("Server returned status code {status}")]
    Status { status: u16 },

    /// Outbound message could not be encoded
    #[error("Message serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The transport was already closed
    #[error("Transport closed")]
    TransportClosed,
}

/// Result type alias for networking operations
pub type NetworkResult<T> = Result<T, NetworkError>;
