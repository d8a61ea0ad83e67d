//! Lighting controller types.

use crate::types::{PacketHeader, SignalStatus};

/// Command from a Lighting2 device (AC, HomeEasy EU, Anslut).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lighting2Command {
    /// Common header fields.
    pub header: PacketHeader,
    /// Device identifier over four bytes, e.g. `0x0111F342`.
    pub id: String,
    /// Unit code.
    pub unit_code: u8,
    /// Raw command byte.
    pub command: u8,
    /// Command name for this sub type, if known.
    pub command_text: Option<&'static str>,
    /// Dim level as a percentage, `None` if the level byte is out of range.
    pub dim_level: Option<u8>,
    /// Signal level (no battery level).
    pub signal: SignalStatus,
}

/// Command from a Lighting5 device (LightwaveRF, Livolo, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lighting5Command {
    /// Common header fields.
    pub header: PacketHeader,
    /// Device identifier over three bytes, e.g. `0xF394AB`.
    pub id: String,
    /// Unit code.
    pub unit_code: u8,
    /// Raw command byte.
    pub command: u8,
    /// Command name for this sub type, if known.
    pub command_text: Option<&'static str>,
    /// Level, passed through unscaled.
    pub level: u8,
    /// Signal level (no battery level).
    pub signal: SignalStatus,
}
