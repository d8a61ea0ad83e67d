//! Combined temperature and humidity sensors.
//!
//! Layout:
//! ```text
//! [len:1=0x0A] [type:1=0x52] [subtype:1] [seq:1] [id:2] [temperature:2]
//! [humidity:1] [humidity_status:1] [signal/battery:1]
//! ```

use crate::error::PacketError;
use crate::protocol::packet::{PacketKind, PacketTypeSpec};
use crate::protocol::parser::{dump_hex, parse_header, parse_signal_and_battery, parse_temperature};
use crate::types::{HumidityStatus, TempHumidityReading};

pub(crate) static SPEC: PacketTypeSpec = PacketTypeSpec {
    packet_types: &[(0x52, "Temperature and humidity sensors")],
    sub_types: &[
        (0x01, "THGN122/123, THGN132, THGR122/228/238/268"),
        (0x02, "THGR810, THGN800, THGR810"),
        (0x03, "RTGR328"),
        (0x04, "THGR328"),
        (0x05, "WTGR800"),
        (0x06, "THGR918/928, THGRN228, THGN500"),
        (0x07, "TFA TS34C, Cresta"),
        (0x08, "WT260,WT260H,WT440H,WT450,WT450H"),
        (0x09, "Viking 02035,02038 (02035 has no humidity)"),
        (0x0A, "Rubicson"),
        (0x0B, "EW109"),
    ],
};

pub(crate) const PACKET_LEN: usize = 11;

/// Parses a temperature and humidity packet.
pub fn parse(data: &[u8]) -> Result<TempHumidityReading, PacketError> {
    PacketKind::TempHumidity.validate(data)?;

    Ok(TempHumidityReading {
        header: parse_header(data, &SPEC),
        id: dump_hex(&data[4..6]),
        temperature: parse_temperature(data[6], data[7]),
        humidity: data[8],
        humidity_status: HumidityStatus::from_byte(data[9]),
        signal: parse_signal_and_battery(data[10]),
    })
}
