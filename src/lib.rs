//! touch-relay/src/lib.rs
//!
//! An OSC-to-WebSocket bridge: listens for OSC packets over UDP, reads the
//! second message argument as a JSON string, and forwards the parsed value
//! to a remote gateway as a `"touch"` event. Re-exports the major submodules.

pub mod bridge;
pub mod osc;
pub mod relay;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("OSC decode error: {0}")]
    OscDecode(String),

    #[error("WebSocket error: {0}")]
    WebSocket(String),

    #[error("Address parse error: {0}")]
    AddrParse(#[from] std::net::AddrParseError),
}

impl From<tokio_tungstenite::tungstenite::Error> for BridgeError {
    fn from(e: tokio_tungstenite::tungstenite::Error) -> Self {
        BridgeError::WebSocket(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, BridgeError>;
