//! Byte-level parsing utilities shared by the packet decoders.
//!
//! All multi-byte values on the wire are big-endian.

use crate::protocol::packet::PacketTypeSpec;
use crate::types::{PacketHeader, SignalStatus};

/// Reassembles four big-endian bytes into an unsigned integer.
#[must_use]
pub const fn bytes_to_u32(bytes: [u8; 4]) -> u32 {
    u32::from_be_bytes(bytes)
}

/// Reassembles the energy sensor's 48-bit total counter.
///
/// Only five bytes are read and byte 4 fills both of the two lowest
/// positions. Energy totals recorded by existing installations were
/// calibrated against this reconstruction, so it is kept as is.
#[must_use]
pub const fn bytes_to_u48(bytes: [u8; 5]) -> u64 {
    ((bytes[0] as u64) << 40)
        + ((bytes[1] as u64) << 32)
        + ((bytes[2] as u64) << 24)
        + ((bytes[3] as u64) << 16)
        + ((bytes[4] as u64) << 8)
        + bytes[4] as u64
}

/// Reassembles two big-endian bytes into an unsigned integer.
#[must_use]
pub const fn bytes_to_u16(high: u8, low: u8) -> u16 {
    u16::from_be_bytes([high, low])
}

/// Formats bytes as an uppercase hex identifier, e.g. `0x2EB2`.
#[must_use]
pub fn dump_hex(data: &[u8]) -> String {
    format!("0x{}", hex::encode_upper(data))
}

/// Formats a packet for logging, e.g. `0x11 0x5a 0x01`.
#[must_use]
pub fn format_packet(data: &[u8]) -> String {
    data.iter()
        .map(|b| format!("0x{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Decodes a byte carrying the signal level in the upper nibble and the
/// battery level in the lower nibble.
#[must_use]
pub const fn parse_signal_and_battery(byte: u8) -> SignalStatus {
    SignalStatus {
        signal_level: byte >> 4,
        battery_level: Some(byte & 0x0F),
    }
}

/// Decodes a byte carrying only the signal level, in the upper nibble.
#[must_use]
pub const fn parse_signal_upper(byte: u8) -> SignalStatus {
    SignalStatus {
        signal_level: byte >> 4,
        battery_level: None,
    }
}

/// Decodes a sign-magnitude temperature in tenths of a degree.
///
/// The high bit of `high` is the sign, the remaining 15 bits the magnitude.
#[must_use]
pub fn parse_temperature(high: u8, low: u8) -> f64 {
    let magnitude = f64::from(bytes_to_u16(high & 0x7F, low)) / 10.0;
    if high & 0x80 == 0 {
        magnitude
    } else {
        -magnitude
    }
}

/// Parses the four header bytes common to all family-specific packets.
///
/// The caller must have checked that at least four bytes are present.
pub(crate) fn parse_header(data: &[u8], spec: &PacketTypeSpec) -> PacketHeader {
    PacketHeader {
        packet_length: data[0],
        packet_type: data[1],
        packet_type_name: spec.packet_type_name(data[1]),
        sub_type: data[2],
        sub_type_name: spec.sub_type_name(data[2]),
        sequence_number: data[3],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes_to_u32() {
        assert_eq!(bytes_to_u32([0x00, 0x00, 0x02, 0xB4]), 692);
        assert_eq!(bytes_to_u32([0x01, 0x00, 0x00, 0x00]), 1 << 24);
    }

    #[test]
    fn test_bytes_to_u48_reuses_lowest_byte() {
        assert_eq!(bytes_to_u48([0x00, 0x00, 0x0C, 0x46, 0xA8]), 205_957_288);
        assert_eq!(bytes_to_u48([0x01, 0x00, 0x00, 0x00, 0x01]), (1 << 40) + 0x0101);
    }

    #[test]
    fn test_dump_hex() {
        assert_eq!(dump_hex(&[0x2E, 0xB2]), "0x2EB2");
        assert_eq!(dump_hex(&[0x01, 0x11, 0xF3, 0x42]), "0x0111F342");
        assert_eq!(dump_hex(&[]), "0x");
    }

    #[test]
    fn test_format_packet() {
        let data = [0x11, 0x5A, 0x01, 0x00, 0x2E, 0xB2, 0x03, 0x00, 0x00];
        assert_eq!(
            format_packet(&data),
            "0x11 0x5a 0x01 0x00 0x2e 0xb2 0x03 0x00 0x00"
        );
    }

    #[test]
    fn test_signal_nibbles() {
        let status = parse_signal_and_battery(0x89);
        assert_eq!(status.signal_level, 8);
        assert_eq!(status.battery_level, Some(9));

        let status = parse_signal_upper(0x4F);
        assert_eq!(status.signal_level, 4);
        assert_eq!(status.battery_level, None);
    }

    #[test]
    fn test_parse_temperature() {
        assert_eq!(parse_temperature(0x00, 0xD5), 21.3);
        assert_eq!(parse_temperature(0x80, 0x55), -8.5);
        assert_eq!(parse_temperature(0x00, 0xA7), 16.7);
        assert_eq!(parse_temperature(0x80, 0x0F), -1.5);
        assert_eq!(parse_temperature(0x80, 0x00), 0.0);
    }
}
