//! Lighting5 controllers (LightwaveRF, Conrad RSL2, Livolo and others).
//!
//! Layout:
//! ```text
//! [len:1=0x0A] [type:1=0x14] [subtype:1] [seq:1] [id:3] [unit:1]
//! [command:1] [level:1] [signal:1]
//! ```

use crate::error::PacketError;
use crate::protocol::packet::{PacketKind, PacketTypeSpec, lookup};
use crate::protocol::parser::{dump_hex, parse_header, parse_signal_upper};
use crate::types::Lighting5Command;

pub(crate) static SPEC: PacketTypeSpec = PacketTypeSpec {
    packet_types: &[(0x14, "Lighting5 sensors")],
    sub_types: &[
        (0x00, "LightwaveRF, Siemens"),
        (0x01, "EMW100 GAO/Everflourish"),
        (0x02, "BBSB new types"),
        (0x03, "MDREMOTE LED dimmer"),
        (0x04, "Conrad RSL2"),
        (0x05, "Livolo"),
        (0x06, "RGB TRC02"),
    ],
};

pub(crate) const PACKET_LEN: usize = 11;

static LIGHTWAVE_COMMANDS: [(u8, &str); 20] = [
    (0x00, "Off"),
    (0x01, "On"),
    (0x02, "Group Off"),
    (0x03, "mood1"),
    (0x04, "mood2"),
    (0x05, "mood3"),
    (0x06, "mood4"),
    (0x07, "mood5"),
    (0x08, "reserved"),
    (0x09, "reserved"),
    (0x0A, "unlock"),
    (0x0B, "lock"),
    (0x0C, "all lock"),
    (0x0D, "close (inline relay)"),
    (0x0E, "stop (inline relay)"),
    (0x0F, "open (inline relay)"),
    (0x10, "set level"),
    (0x11, "colour Palette"),
    (0x12, "Colour Tone"),
    (0x13, "Colour Cycle"),
];

static EMW100_COMMANDS: [(u8, &str); 3] = [(0x00, "Off"), (0x01, "On"), (0x02, "Learn")];

static GROUP_COMMANDS: [(u8, &str); 4] = [
    (0x00, "Off"),
    (0x01, "On"),
    (0x02, "Group Off"),
    (0x03, "Group On"),
];

static MDREMOTE_COMMANDS: [(u8, &str); 11] = [
    (0x00, "Power"),
    (0x01, "Light"),
    (0x02, "Bright"),
    (0x03, "dim"),
    (0x04, "100%"),
    (0x05, "50%"),
    (0x06, "25%"),
    (0x07, "Mode+"),
    (0x08, "Speed-"),
    (0x09, "Speed+"),
    (0x0A, "Mode-"),
];

static LIVOLO_COMMANDS: [(u8, &str); 4] = [
    (0x00, "Group Off"),
    (0x01, "On/Off dinner or Gang1"),
    (0x02, "Dim+ or Gang2 on/off"),
    (0x03, "Dim- or Gang3 on/off"),
];

static RGB_COMMANDS: [(u8, &str); 7] = [
    (0x00, "Off"),
    (0x01, "On"),
    (0x02, "Bright"),
    (0x03, "Dim"),
    (0x04, "Colour+"),
    (0x05, "Colour-"),
    (0x06, "Select color"),
];

/// Looks up the command name for a sub type.
#[must_use]
pub fn command_text(sub_type: u8, command: u8) -> Option<&'static str> {
    let table: &'static [(u8, &'static str)] = match sub_type {
        0x00 => &LIGHTWAVE_COMMANDS,
        0x01 => &EMW100_COMMANDS,
        0x02 | 0x04 => &GROUP_COMMANDS,
        0x03 => &MDREMOTE_COMMANDS,
        0x05 => &LIVOLO_COMMANDS,
        0x06 => &RGB_COMMANDS,
        _ => return None,
    };
    lookup(table, command)
}

/// Parses a Lighting5 packet.
pub fn parse(data: &[u8]) -> Result<Lighting5Command, PacketError> {
    PacketKind::Lighting5.validate(data)?;

    Ok(Lighting5Command {
        header: parse_header(data, &SPEC),
        id: dump_hex(&data[4..7]),
        unit_code: data[7],
        command: data[8],
        command_text: command_text(data[2], data[8]),
        level: data[9],
        signal: parse_signal_upper(data[10]),
    })
}
