//! Error types for the rfxcom library.

use thiserror::Error;

use crate::protocol::PacketKind;

/// The main error type for rfxcom operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Serial port error.
    #[error("serial port error: {0}")]
    Serial(#[from] tokio_serial::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Packet validation error.
    #[error("packet error: {0}")]
    Packet(#[from] PacketError),

    /// No handler matched the packet and no fallback handler is configured.
    #[error("no packet handler found for {packet}")]
    PacketHandlerNotFound { packet: String },

    /// Invalid configuration.
    #[error("invalid configuration: {reason}")]
    Config { reason: String },

    /// Connection is not established.
    #[error("not connected")]
    NotConnected,

    /// Channel receive error.
    #[error("channel closed")]
    ChannelClosed,
}

/// Packet shape errors raised by decoder validation.
///
/// All three are recoverable: the packet simply does not belong to the
/// decoder that rejected it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PacketError {
    /// Declared length byte disagrees with the actual byte count, or the
    /// packet is shorter than the decoder's fixed layout.
    #[error("invalid packet length: expected {expected} bytes, got {got}")]
    InvalidLength { expected: usize, got: usize },

    /// Packet type byte is not accepted by the decoder.
    #[error("unknown packet type 0x{packet_type:02x} for {kind} decoder")]
    UnknownType { kind: PacketKind, packet_type: u8 },

    /// Sub type byte is not accepted by the decoder.
    #[error("unknown packet subtype 0x{sub_type:02x} for {kind} decoder")]
    UnknownSubtype { kind: PacketKind, sub_type: u8 },
}

/// Result type alias for rfxcom operations.
pub type Result<T> = std::result::Result<T, Error>;
