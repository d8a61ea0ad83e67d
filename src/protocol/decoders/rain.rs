//! Rain gauges.
//!
//! Layout:
//! ```text
//! [len:1=0x0B] [type:1=0x55] [subtype:1] [seq:1] [id:2] [rain_rate:2]
//! [rain_total:3] [signal/battery:1]
//! ```
//! Rate and total are only meaningful for some models.

use crate::error::PacketError;
use crate::protocol::packet::{PacketKind, PacketTypeSpec};
use crate::protocol::parser::{bytes_to_u16, dump_hex, parse_header, parse_signal_and_battery};
use crate::types::RainReading;

pub(crate) static SPEC: PacketTypeSpec = PacketTypeSpec {
    packet_types: &[(0x55, "Rain sensors")],
    sub_types: &[
        (0x01, "RGR126/682/918"),
        (0x02, "PCR800"),
        (0x03, "TFA"),
        (0x04, "UPM RG700"),
        (0x05, "WS2300"),
        (0x06, "La Crosse TX5"),
    ],
};

pub(crate) const PACKET_LEN: usize = 12;

/// Rain rate in mm/h. RGR126 reports whole units, PCR800 hundredths.
fn rain_rate(sub_type: u8, high: u8, low: u8) -> Option<f64> {
    let raw = f64::from(bytes_to_u16(high, low));
    match sub_type {
        0x01 => Some(raw),
        0x02 => Some(raw / 100.0),
        _ => None,
    }
}

/// Rain total in mm. La Crosse TX5 has no total counter.
fn rain_total(sub_type: u8, bytes: [u8; 3]) -> Option<f64> {
    if sub_type == 0x06 {
        return None;
    }
    let raw = u32::from(bytes[0]) * 0x1000 + u32::from(bytes[1]) * 0x100 + u32::from(bytes[2]);
    Some(f64::from(raw) / 10.0)
}

/// Parses a rain packet.
pub fn parse(data: &[u8]) -> Result<RainReading, PacketError> {
    PacketKind::Rain.validate(data)?;

    let sub_type = data[2];

    Ok(RainReading {
        header: parse_header(data, &SPEC),
        id: dump_hex(&data[4..6]),
        rain_rate: rain_rate(sub_type, data[6], data[7]),
        rain_total: rain_total(sub_type, [data[8], data[9], data[10]]),
        signal: parse_signal_and_battery(data[11]),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATA: [u8; 12] = [
        0x0B, 0x55, 0x01, 0x11, 0x70, 0x02, 0x00, 0xA7, 0x2D, 0x00, 0x00, 0x89,
    ];

    #[test]
    fn test_parse_bytes() {
        assert!(PacketKind::Rain.can_handle(&DATA));

        let reading = parse(&DATA).unwrap();
        assert_eq!(reading.header.packet_length, 11);
        assert_eq!(reading.header.packet_type, 0x55);
        assert_eq!(reading.header.packet_type_name, Some("Rain sensors"));
        assert_eq!(reading.header.sub_type_name, Some("RGR126/682/918"));
        assert_eq!(reading.header.sequence_number, 17);
        assert_eq!(reading.id, "0x7002");
        assert_eq!(reading.rain_rate, Some(167.0));
        assert_eq!(reading.rain_total, Some(18432.0));
        assert_eq!(reading.signal.signal_level, 8);
        assert_eq!(reading.signal.battery_level, Some(9));
    }

    #[test]
    fn test_parse_pcr800() {
        let data = [
            0x0B, 0x55, 0x02, 0x05, 0x70, 0x03, 0x00, 0x67, 0x1A, 0x01, 0x02, 0x45,
        ];
        let reading = parse(&data).unwrap();
        assert_eq!(reading.header.sub_type_name, Some("PCR800"));
        assert_eq!(reading.id, "0x7003");
        assert_eq!(reading.rain_rate, Some(1.03));
        assert_eq!(reading.rain_total, Some(10675.4));
        assert_eq!(reading.signal.signal_level, 4);
        assert_eq!(reading.signal.battery_level, Some(5));
    }

    #[test]
    fn test_parse_without_rate_or_total() {
        let data = [
            0x0B, 0x55, 0x06, 0x05, 0x70, 0x03, 0x00, 0x67, 0x1A, 0x01, 0x02, 0x45,
        ];
        let reading = parse(&data).unwrap();
        assert_eq!(reading.header.sub_type_name, Some("La Crosse TX5"));
        assert_eq!(reading.rain_rate, None);
        assert_eq!(reading.rain_total, None);
    }

    #[test]
    fn test_total_without_rate() {
        let mut data = DATA;
        data[2] = 0x03;
        let reading = parse(&data).unwrap();
        assert_eq!(reading.rain_rate, None);
        assert_eq!(reading.rain_total, Some(18432.0));
    }

    #[test]
    fn test_validate_bytes_short() {
        assert!(matches!(
            PacketKind::Rain.validate(&DATA[..1]),
            Err(PacketError::InvalidLength { .. })
        ));
    }

    #[test]
    fn test_validate_unknown_packet_type() {
        let mut data = DATA;
        data[1] = 0x56;
        assert!(!PacketKind::Rain.can_handle(&data));
        assert!(matches!(
            parse(&data),
            Err(PacketError::UnknownType { .. })
        ));
    }

    #[test]
    fn test_validate_unknown_sub_type() {
        let mut data = DATA;
        data[2] = 0x07;
        assert!(!PacketKind::Rain.can_handle(&data));
        assert!(matches!(
            parse(&data),
            Err(PacketError::UnknownSubtype { sub_type: 0x07, .. })
        ));
    }
}
