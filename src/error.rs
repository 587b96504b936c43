//! Error types for abci-server.

use thiserror::Error;

/// Main error type for all server operations.
///
/// Framing and transport errors are fatal to the connection they occur on;
/// dispatch-level failures never surface here; the handler reports them to
/// the peer as typed `exception` responses instead.
#[derive(Debug, Error)]
pub enum AbciError {
    /// I/O error during socket operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Message could not be serialized.
    #[error("encode error: {0}")]
    Encode(#[from] prost::EncodeError),

    /// Frame payload failed structural parsing.
    #[error("decode error: {0}")]
    Decode(#[from] prost::DecodeError),

    /// Stream ended mid-varint or mid-payload. There is no resynchronization
    /// point in a length-prefixed stream, so this closes the connection.
    #[error("stream ended inside a frame")]
    TruncatedFrame,

    /// Declared frame length exceeds the configured limit.
    #[error("frame length {len} exceeds maximum {max}")]
    FrameTooLarge {
        /// Length the prefix declared.
        len: u64,
        /// Configured limit.
        max: u64,
    },

    /// Protocol violation (malformed length prefix, bad address, etc.).
    #[error("protocol error: {0}")]
    Protocol(String),
}

/// Result type alias using [`AbciError`].
pub type Result<T> = std::result::Result<T, AbciError>;
