//! Protocol definitions for RFXtrx communication.
//!
//! This module contains the low-level protocol pieces:
//! - Packet kinds, validation and the decoder registry
//! - Per-family decoders
//! - Fixed command frames
//! - Stream framing
//! - Byte-level parsing helpers

pub mod command;
pub mod decoders;
pub mod frame;
pub mod packet;
pub mod parser;

pub use command::{
    DEFAULT_PROTOCOLS, MODE_PACKET, RESET_PACKET, STATUS_PACKET, TRANSCEIVER_433_92, mode_command,
};
pub use frame::PacketFramer;
pub use packet::{
    DecodedPacket, PacketKind, PacketTypeSpec, REGISTRY, can_handle, decode, find_decoder,
};
pub use parser::{
    bytes_to_u16, bytes_to_u32, bytes_to_u48, dump_hex, format_packet, parse_signal_and_battery,
    parse_signal_upper, parse_temperature,
};
