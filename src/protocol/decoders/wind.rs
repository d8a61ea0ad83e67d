//! Anemometers.
//!
//! Layout:
//! ```text
//! [len:1=0x10] [type:1=0x56] [subtype:1] [seq:1] [id:2] [direction:2]
//! [average_speed:2] [gust:2] [temperature:2] [wind_chill:2]
//! [signal/battery:1]
//! ```
//! Speeds are in tenths of m/s. Only the TFA model reports temperature and
//! wind chill, and the UPM WDS500 has no average speed.

use crate::error::PacketError;
use crate::protocol::packet::{PacketKind, PacketTypeSpec};
use crate::protocol::parser::{
    bytes_to_u16, dump_hex, parse_header, parse_signal_and_battery, parse_temperature,
};
use crate::types::WindReading;

pub(crate) static SPEC: PacketTypeSpec = PacketTypeSpec {
    packet_types: &[(0x56, "Wind sensors")],
    sub_types: &[
        (0x01, "WTGR800"),
        (0x02, "WGR800"),
        (0x03, "STR918, WGR918, WGR928"),
        (0x04, "TFA"),
        (0x05, "UPM WDS500"),
        (0x06, "WS2300"),
    ],
};

pub(crate) const PACKET_LEN: usize = 17;

const SUB_TYPE_TFA: u8 = 0x04;
const SUB_TYPE_UPM: u8 = 0x05;

fn speed(high: u8, low: u8) -> f64 {
    f64::from(bytes_to_u16(high, low)) * 0.1
}

/// Parses a wind packet.
pub fn parse(data: &[u8]) -> Result<WindReading, PacketError> {
    PacketKind::Wind.validate(data)?;

    let sub_type = data[2];
    let has_temperature = sub_type == SUB_TYPE_TFA;

    Ok(WindReading {
        header: parse_header(data, &SPEC),
        id: dump_hex(&data[4..6]),
        direction: bytes_to_u16(data[6], data[7]),
        average_speed: (sub_type != SUB_TYPE_UPM).then(|| speed(data[8], data[9])),
        gust: speed(data[10], data[11]),
        temperature: has_temperature.then(|| parse_temperature(data[12], data[13])),
        wind_chill: has_temperature.then(|| parse_temperature(data[14], data[15])),
        signal: parse_signal_and_battery(data[16]),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATA: [u8; 17] = [
        0x10, 0x56, 0x01, 0x05, 0x1C, 0x00, 0x00, 0xA2, 0x00, 0x02, 0x01, 0xB2, 0x00, 0x0C, 0x46,
        0xA8, 0x98,
    ];

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "{actual} is not close to {expected}"
        );
    }

    #[test]
    fn test_parse_bytes() {
        assert!(PacketKind::Wind.can_handle(&DATA));

        let reading = parse(&DATA).unwrap();
        assert_eq!(reading.header.packet_length, 16);
        assert_eq!(reading.header.packet_type, 0x56);
        assert_eq!(reading.header.packet_type_name, Some("Wind sensors"));
        assert_eq!(reading.header.sub_type_name, Some("WTGR800"));
        assert_eq!(reading.header.sequence_number, 5);
        assert_eq!(reading.id, "0x1C00");
        assert_eq!(reading.direction, 162);
        assert_close(reading.gust, 43.4);
        assert_close(reading.average_speed.unwrap(), 0.2);
        assert_eq!(reading.temperature, None);
        assert_eq!(reading.wind_chill, None);
        assert_eq!(reading.signal.signal_level, 9);
        assert_eq!(reading.signal.battery_level, Some(8));
    }

    #[test]
    fn test_parse_tfa_with_temperature() {
        let data = [
            0x10, 0x56, 0x04, 0x02, 0xB2, 0x06, 0x00, 0x0F, 0x00, 0x09, 0x01, 0x0E, 0x80, 0x0F,
            0x02, 0x09, 0x56,
        ];
        let reading = parse(&data).unwrap();
        assert_eq!(reading.header.sub_type_name, Some("TFA"));
        assert_eq!(reading.id, "0xB206");
        assert_eq!(reading.direction, 15);
        assert_close(reading.gust, 27.0);
        assert_close(reading.average_speed.unwrap(), 0.9);
        assert_eq!(reading.temperature, Some(-1.5));
        assert_eq!(reading.wind_chill, Some(52.1));
        assert_eq!(reading.signal.signal_level, 5);
        assert_eq!(reading.signal.battery_level, Some(6));
    }

    #[test]
    fn test_parse_upm_without_average() {
        let data = [
            0x10, 0x56, 0x05, 0x09, 0x5D, 0x01, 0x01, 0x00, 0x00, 0x02, 0x01, 0x18, 0x00, 0x0C,
            0x46, 0xA8, 0x64,
        ];
        let reading = parse(&data).unwrap();
        assert_eq!(reading.header.sub_type_name, Some("UPM WDS500"));
        assert_eq!(reading.id, "0x5D01");
        assert_eq!(reading.direction, 256);
        assert_close(reading.gust, 28.0);
        assert_eq!(reading.average_speed, None);
        assert_eq!(reading.temperature, None);
        assert_eq!(reading.signal.signal_level, 6);
        assert_eq!(reading.signal.battery_level, Some(4));
    }

    #[test]
    fn test_validate_bytes_short() {
        assert!(matches!(
            PacketKind::Wind.validate(&DATA[..1]),
            Err(PacketError::InvalidLength { .. })
        ));
    }

    #[test]
    fn test_validate_unknown_packet_type() {
        let mut data = DATA;
        data[1] = 0x57;
        assert!(!PacketKind::Wind.can_handle(&data));
        assert!(matches!(
            parse(&data),
            Err(PacketError::UnknownType { .. })
        ));
    }

    #[test]
    fn test_validate_unknown_sub_type() {
        let mut data = DATA;
        data[2] = 0x00;
        assert!(!PacketKind::Wind.can_handle(&data));
        assert!(matches!(
            parse(&data),
            Err(PacketError::UnknownSubtype { sub_type: 0x00, .. })
        ));
    }
}
