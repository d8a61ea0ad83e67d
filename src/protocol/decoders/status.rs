//! Interface status messages sent by the transceiver itself.
//!
//! Layout:
//! ```text
//! [len:1=0x0D] [type:1=0x01] [subtype:1] [seq:1] [command:1]
//! [transceiver_type:1] [firmware:1] [flags:3] [msg6..msg9:4]
//! ```
//! The three flag bytes hold one enable bit per [`Protocol`], most
//! significant bit first.

use crate::error::PacketError;
use crate::protocol::packet::{PacketKind, PacketTypeSpec, lookup};
use crate::protocol::parser::parse_header;
use crate::types::{InterfaceStatus, Protocol};

pub(crate) static SPEC: PacketTypeSpec = PacketTypeSpec {
    packet_types: &[(0x01, "Interface message")],
    sub_types: &[
        (0x00, "Response on a mode command"),
        (0xFF, "Wrong command received from the application."),
    ],
};

pub(crate) const PACKET_LEN: usize = 14;

/// Transceiver frequencies by type byte.
static TRANSCEIVER_TYPES: [(u8, &str); 11] = [
    (0x50, "310MHz"),
    (0x51, "315MHz"),
    (0x52, "433.92MHz receiver only"),
    (0x53, "433.92MHz transceiver"),
    (0x55, "868.00MHz"),
    (0x56, "868.00MHz FSK"),
    (0x57, "868.30MHz"),
    (0x58, "868.30MHz FSK"),
    (0x59, "868.35MHz"),
    (0x5A, "868.35MHz FSK"),
    (0x5B, "868.95MHz"),
];

/// Looks up the frequency description of a transceiver type byte.
#[must_use]
pub fn transceiver_type_text(transceiver_type: u8) -> Option<&'static str> {
    lookup(&TRANSCEIVER_TYPES, transceiver_type)
}

/// Returns true if the protocol's bit is set in the flag bytes.
pub(crate) const fn flag_is_set(flags: [u8; 3], protocol: Protocol) -> bool {
    let index = protocol.bit_index();
    flags[index / 8] & (0x80 >> (index % 8)) != 0
}

/// Splits protocols into enabled and disabled lists, each sorted by name.
fn split_protocols(flags: [u8; 3]) -> (Vec<Protocol>, Vec<Protocol>) {
    let mut sorted = Protocol::ALL;
    sorted.sort_by_key(|p| p.name());

    let mut enabled = Vec::new();
    let mut disabled = Vec::new();

    for protocol in sorted {
        if flag_is_set(flags, protocol) {
            tracing::info!("{:21}: Enabled", protocol.name());
            enabled.push(protocol);
        } else {
            tracing::info!("{:21}: Disabled", protocol.name());
            disabled.push(protocol);
        }
    }

    (enabled, disabled)
}

/// Parses an interface status packet.
pub fn parse(data: &[u8]) -> Result<InterfaceStatus, PacketError> {
    PacketKind::Status.validate(data)?;

    let (enabled_protocols, disabled_protocols) = split_protocols([data[7], data[8], data[9]]);

    Ok(InterfaceStatus {
        header: parse_header(data, &SPEC),
        command_type: data[4],
        transceiver_type: data[5],
        transceiver_type_text: transceiver_type_text(data[5]),
        firmware_version: data[6],
        enabled_protocols,
        disabled_protocols,
    })
}
