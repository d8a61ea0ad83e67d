//! Humidity-only sensors (La Crosse).
//!
//! Layout:
//! ```text
//! [len:1=0x08] [type:1=0x51] [subtype:1] [seq:1] [id:2] [humidity:1]
//! [humidity_status:1] [signal/battery:1]
//! ```

use crate::error::PacketError;
use crate::protocol::packet::{PacketKind, PacketTypeSpec};
use crate::protocol::parser::{dump_hex, parse_header, parse_signal_and_battery};
use crate::types::{HumidityReading, HumidityStatus};

pub(crate) static SPEC: PacketTypeSpec = PacketTypeSpec {
    packet_types: &[(0x51, "Humidity sensors")],
    sub_types: &[(0x01, "LaCrosse TX3"), (0x02, "LaCrosse WS2300")],
};

pub(crate) const PACKET_LEN: usize = 9;

/// Parses a humidity packet.
pub fn parse(data: &[u8]) -> Result<HumidityReading, PacketError> {
    PacketKind::Humidity.validate(data)?;

    Ok(HumidityReading {
        header: parse_header(data, &SPEC),
        id: dump_hex(&data[4..6]),
        humidity: data[6],
        humidity_status: HumidityStatus::from_byte(data[7]),
        signal: parse_signal_and_battery(data[8]),
    })
}
