//! Temperature-only sensors (Oregon Scientific, La Crosse, TFA and others).
//!
//! Layout:
//! ```text
//! [len:1=0x08] [type:1=0x50] [subtype:1] [seq:1] [id:2] [temperature:2]
//! [signal/battery:1]
//! ```

use crate::error::PacketError;
use crate::protocol::packet::{PacketKind, PacketTypeSpec};
use crate::protocol::parser::{dump_hex, parse_header, parse_signal_and_battery, parse_temperature};
use crate::types::TemperatureReading;

pub(crate) static SPEC: PacketTypeSpec = PacketTypeSpec {
    packet_types: &[(0x50, "Temperature sensors")],
    sub_types: &[
        (0x01, "THR128/138, THC138"),
        (0x02, "THC238/268,THN132,THWR288,THRN122,THN122,AW129/131"),
        (0x03, "THWR800"),
        (0x04, "RTHN318"),
        (0x05, "La Crosse TX2, TX3, TX4, TX17"),
        (0x06, "TS15C"),
        (0x07, "Viking 02811"),
        (0x08, "La Crosse WS2300"),
        (0x09, "RUBiCSON"),
        (0x0A, "TFA 30.3133"),
    ],
};

pub(crate) const PACKET_LEN: usize = 9;

/// Parses a temperature packet.
pub fn parse(data: &[u8]) -> Result<TemperatureReading, PacketError> {
    PacketKind::Temperature.validate(data)?;

    Ok(TemperatureReading {
        header: parse_header(data, &SPEC),
        id: dump_hex(&data[4..6]),
        temperature: parse_temperature(data[6], data[7]),
        signal: parse_signal_and_battery(data[8]),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATA: [u8; 9] = [0x08, 0x50, 0x02, 0x11, 0x70, 0x02, 0x00, 0xA7, 0x89];

    #[test]
    fn test_parse_bytes() {
        assert!(PacketKind::Temperature.can_handle(&DATA));

        let reading = parse(&DATA).unwrap();
        assert_eq!(reading.header.packet_length, 8);
        assert_eq!(reading.header.packet_type, 0x50);
        assert_eq!(reading.header.packet_type_name, Some("Temperature sensors"));
        assert_eq!(reading.header.sequence_number, 17);
        assert_eq!(reading.header.sub_type, 2);
        assert_eq!(
            reading.header.sub_type_name,
            Some("THC238/268,THN132,THWR288,THRN122,THN122,AW129/131")
        );
        assert_eq!(reading.id, "0x7002");
        assert_eq!(reading.temperature, 16.7);
        assert_eq!(reading.signal.signal_level, 8);
        assert_eq!(reading.signal.battery_level, Some(9));
    }

    #[test]
    fn test_parse_other_sub_types() {
        let data = [0x08, 0x50, 0x03, 0x02, 0xAE, 0x01, 0x00, 0x63, 0x59];
        let reading = parse(&data).unwrap();
        assert_eq!(reading.header.sub_type_name, Some("THWR800"));
        assert_eq!(reading.id, "0xAE01");
        assert_eq!(reading.temperature, 9.9);
        assert_eq!(reading.signal.signal_level, 5);
        assert_eq!(reading.signal.battery_level, Some(9));
    }

    #[test]
    fn test_parse_negative_temperature() {
        let data = [0x08, 0x50, 0x06, 0x02, 0xAE, 0x01, 0x80, 0x55, 0x59];
        let reading = parse(&data).unwrap();
        assert_eq!(reading.header.sub_type_name, Some("TS15C"));
        assert_eq!(reading.temperature, -8.5);
    }

    #[test]
    fn test_validate_bytes_short() {
        assert!(matches!(
            PacketKind::Temperature.validate(&DATA[..1]),
            Err(PacketError::InvalidLength { .. })
        ));
    }

    #[test]
    fn test_validate_unknown_packet_type() {
        let mut data = DATA;
        data[1] = 0x51;
        assert!(!PacketKind::Temperature.can_handle(&data));
        assert!(matches!(
            parse(&data),
            Err(PacketError::UnknownType { .. })
        ));
    }

    #[test]
    fn test_validate_unknown_sub_type() {
        let mut data = DATA;
        data[2] = 0x0B;
        assert!(!PacketKind::Temperature.can_handle(&data));
        assert!(matches!(
            parse(&data),
            Err(PacketError::UnknownSubtype { sub_type: 0x0B, .. })
        ));
    }
}
