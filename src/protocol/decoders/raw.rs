//! Catch-all decoder for packets no family decoder accepts.

use bytes::Bytes;

use crate::protocol::packet::PacketTypeSpec;
use crate::types::GenericPacket;

pub(crate) static SPEC: PacketTypeSpec = PacketTypeSpec {
    packet_types: &[],
    sub_types: &[],
};

/// Decodes any byte sequence. Never fails.
pub fn parse(data: &[u8]) -> GenericPacket {
    let sub_type = data.get(2).copied();

    GenericPacket {
        packet_length: data.first().copied(),
        packet_type: data.get(1).copied(),
        sub_type,
        sub_type_name: sub_type.and_then(|s| SPEC.sub_type_name(s)),
        packet: Bytes::copy_from_slice(data),
    }
}
