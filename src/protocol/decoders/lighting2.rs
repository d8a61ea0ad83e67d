//! Lighting2 controllers (AC, HomeEasy EU, Anslut).
//!
//! Layout:
//! ```text
//! [len:1=0x0B] [type:1=0x11] [subtype:1] [seq:1] [id:4] [unit:1]
//! [command:1] [dim_level:1] [signal:1]
//! ```

use crate::error::PacketError;
use crate::protocol::packet::{PacketKind, PacketTypeSpec, lookup};
use crate::protocol::parser::{dump_hex, parse_header, parse_signal_upper};
use crate::types::Lighting2Command;

pub(crate) static SPEC: PacketTypeSpec = PacketTypeSpec {
    packet_types: &[(0x11, "Lighting2 sensors")],
    sub_types: &[(0x00, "AC"), (0x01, "HomeEasy EU"), (0x02, "Anslut")],
};

pub(crate) const PACKET_LEN: usize = 12;

/// Dim level byte (0..=15) to percentage.
const DIM_LEVELS: [u8; 16] = [0, 6, 12, 18, 24, 30, 36, 42, 48, 54, 60, 66, 72, 78, 84, 100];

static AC_COMMANDS: [(u8, &str); 6] = [
    (0x00, "Off"),
    (0x01, "On"),
    (0x02, "Set level"),
    (0x03, "Group Off"),
    (0x04, "Group On"),
    (0x05, "Set Group Level"),
];

static HOME_EASY_COMMANDS: [(u8, &str); 3] = [(0x00, "Off"), (0x01, "On"), (0x02, "Learn")];

static ANSLUT_COMMANDS: [(u8, &str); 4] = [
    (0x00, "Off"),
    (0x01, "On"),
    (0x02, "Group Off"),
    (0x03, "Group On"),
];

/// Looks up the command name for a sub type.
#[must_use]
pub fn command_text(sub_type: u8, command: u8) -> Option<&'static str> {
    match sub_type {
        0x00 => lookup(&AC_COMMANDS, command),
        0x01 => lookup(&HOME_EASY_COMMANDS, command),
        0x02 => lookup(&ANSLUT_COMMANDS, command),
        _ => None,
    }
}

/// Converts a dim level byte to a percentage.
#[must_use]
pub fn dim_level(byte: u8) -> Option<u8> {
    DIM_LEVELS.get(usize::from(byte)).copied()
}

/// Parses a Lighting2 packet.
pub fn parse(data: &[u8]) -> Result<Lighting2Command, PacketError> {
    PacketKind::Lighting2.validate(data)?;

    Ok(Lighting2Command {
        header: parse_header(data, &SPEC),
        id: dump_hex(&data[4..8]),
        unit_code: data[8],
        command: data[9],
        command_text: command_text(data[2], data[9]),
        dim_level: dim_level(data[10]),
        signal: parse_signal_upper(data[11]),
    })
}
