//! Ultraviolet sensors.
//!
//! Layout:
//! ```text
//! [len:1=0x09] [type:1=0x57] [subtype:1] [seq:1] [id:2] [uv:1]
//! [temperature:2] [signal/battery:1]
//! ```
//! Only the TFA model reports a temperature.

use crate::error::PacketError;
use crate::protocol::packet::{PacketKind, PacketTypeSpec};
use crate::protocol::parser::{dump_hex, parse_header, parse_signal_and_battery, parse_temperature};
use crate::types::UvReading;

pub(crate) static SPEC: PacketTypeSpec = PacketTypeSpec {
    packet_types: &[(0x57, "UV sensors")],
    sub_types: &[(0x01, "UVN128, UV138"), (0x02, "UVN800"), (0x03, "TFA")],
};

pub(crate) const PACKET_LEN: usize = 10;

const SUB_TYPE_TFA: u8 = 0x03;

/// Parses an ultraviolet packet.
pub fn parse(data: &[u8]) -> Result<UvReading, PacketError> {
    PacketKind::UltraViolet.validate(data)?;

    Ok(UvReading {
        header: parse_header(data, &SPEC),
        id: dump_hex(&data[4..6]),
        uv: data[6],
        temperature: (data[2] == SUB_TYPE_TFA).then(|| parse_temperature(data[7], data[8])),
        signal: parse_signal_and_battery(data[9]),
    })
}
