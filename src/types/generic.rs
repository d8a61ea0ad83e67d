//! Catch-all packet type for unrecognised devices.

use bytes::Bytes;

/// A packet decoded by the raw fallback decoder.
///
/// Header bytes missing from very short packets are `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenericPacket {
    /// Length byte.
    pub packet_length: Option<u8>,
    /// Packet type byte.
    pub packet_type: Option<u8>,
    /// Sub type byte.
    pub sub_type: Option<u8>,
    /// Sub type name. The raw decoder has no table, so this is always `None`.
    pub sub_type_name: Option<&'static str>,
    /// The untouched packet bytes.
    pub packet: Bytes,
}
