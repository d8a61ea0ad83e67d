//! Fixed command frames sent to the transceiver during setup.
//!
//! Every command frame is 14 bytes long:
//! ```text
//! [len:1=0x0D] [type:1=0x00] [subtype:1=0x00] [seq:1] [command:1]
//! [transceiver_type:1] [msg2:1] [flags:3] [msg6..msg9:4]
//! ```

use crate::types::Protocol;

/// Length of every interface command frame.
pub const COMMAND_LEN: usize = 14;

/// Resets the transceiver. Anything it sends afterwards is discarded until
/// the settle delay has passed.
pub const RESET_PACKET: [u8; COMMAND_LEN] = [0x0D, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0];

/// Asks the transceiver for its status.
pub const STATUS_PACKET: [u8; COMMAND_LEN] = [0x0D, 0, 0, 0x01, 0x02, 0, 0, 0, 0, 0, 0, 0, 0, 0];

/// Sets the operating mode: 433.92 MHz transceiver with the
/// [`DEFAULT_PROTOCOLS`] enabled.
pub const MODE_PACKET: [u8; COMMAND_LEN] = [
    0x0D, 0x00, 0x00, 0x01, 0x03, 0x53, 0x00, 0x00, 0x0E, 0x2F, 0x00, 0x00, 0x00, 0x00,
];

/// Command byte of a status query.
pub const CMD_GET_STATUS: u8 = 0x02;

/// Command byte of a mode change.
pub const CMD_SET_MODE: u8 = 0x03;

/// Transceiver type of a 433.92 MHz transceiver.
pub const TRANSCEIVER_433_92: u8 = 0x53;

/// Protocols enabled by [`MODE_PACKET`].
pub const DEFAULT_PROTOCOLS: [Protocol; 8] = [
    Protocol::LaCrosse,
    Protocol::HidekiUpm,
    Protocol::AdLightwaveRf,
    Protocol::OregonScientific,
    Protocol::HomeEasyEu,
    Protocol::Ac,
    Protocol::Arc,
    Protocol::X10,
];

/// Builds a mode command enabling the given protocols.
///
/// This is the inverse of the flag decoding done for status packets.
#[must_use]
pub fn mode_command(transceiver_type: u8, enabled: &[Protocol]) -> [u8; COMMAND_LEN] {
    let mut frame = [0u8; COMMAND_LEN];
    frame[0] = (COMMAND_LEN - 1) as u8;
    frame[3] = 0x01;
    frame[4] = CMD_SET_MODE;
    frame[5] = transceiver_type;

    for protocol in enabled {
        let index = protocol.bit_index();
        frame[7 + index / 8] |= 0x80 >> (index % 8);
    }

    frame
}
