//! Energy usage sensors (OWL CM119/CM160/CM180).
//!
//! Layout:
//! ```text
//! [len:1=0x11] [type:1=0x5A] [subtype:1] [seq:1] [id:2] [count:1]
//! [current_watts:4BE] [total_watts:6BE] [signal/battery:1]
//! ```

use crate::error::PacketError;
use crate::protocol::packet::{PacketKind, PacketTypeSpec};
use crate::protocol::parser::{
    bytes_to_u32, bytes_to_u48, dump_hex, parse_header, parse_signal_and_battery,
};
use crate::types::EnergyReading;

pub(crate) static SPEC: PacketTypeSpec = PacketTypeSpec {
    packet_types: &[(0x5A, "Energy usage sensors")],
    sub_types: &[(0x01, "CM119/160"), (0x02, "CM180")],
};

pub(crate) const PACKET_LEN: usize = 18;

/// Empirical divisor converting the raw total counter to watts.
const TOTAL_DIVISOR: f64 = 223.666;

/// Parses an energy usage packet.
pub fn parse(data: &[u8]) -> Result<EnergyReading, PacketError> {
    PacketKind::Elec.validate(data)?;

    let current = [data[7], data[8], data[9], data[10]];
    let total = [data[11], data[12], data[13], data[14], data[15]];

    Ok(EnergyReading {
        header: parse_header(data, &SPEC),
        id: dump_hex(&data[4..6]),
        count: data[6],
        current_watts: bytes_to_u32(current),
        total_watts: bytes_to_u48(total) as f64 / TOTAL_DIVISOR,
        signal: parse_signal_and_battery(data[17]),
    })
}
