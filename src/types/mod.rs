//! Data types for decoded RFXtrx packets.
//!
//! This module contains one record per device family plus the pieces they
//! share:
//! - Packet header fields
//! - Signal and battery levels
//! - Humidity status
//! - Interface status and protocol flags

pub mod energy;
pub mod generic;
pub mod lighting;
pub mod sensor;
pub mod status;

use std::fmt;

pub use energy::EnergyReading;
pub use generic::GenericPacket;
pub use lighting::{Lighting2Command, Lighting5Command};
pub use sensor::{
    HumidityReading, RainReading, TempHumidityReading, TemperatureReading, UvReading,
    WindReading,
};
pub use status::{InterfaceStatus, Protocol};

/// Header fields shared by every family-specific packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacketHeader {
    /// Number of bytes following the length byte.
    pub packet_length: u8,
    /// Packet type (byte 1).
    pub packet_type: u8,
    /// Name of the packet type, if known.
    pub packet_type_name: Option<&'static str>,
    /// Sub type (byte 2).
    pub sub_type: u8,
    /// Name of the sub type (device model), if known.
    pub sub_type_name: Option<&'static str>,
    /// Sequence number (byte 3).
    pub sequence_number: u8,
}

/// Signal strength and battery level from a trailing status byte.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SignalStatus {
    /// RSSI, upper nibble.
    pub signal_level: u8,
    /// Battery level, lower nibble. `None` for families that use the lower
    /// nibble as filler.
    pub battery_level: Option<u8>,
}

/// Humidity comfort status reported by humidity sensors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HumidityStatus {
    Dry,
    Comfort,
    Normal,
    Wet,
    /// Unrecognised status byte.
    Unknown(u8),
}

impl HumidityStatus {
    /// Parses a humidity status from a byte.
    #[must_use]
    pub const fn from_byte(byte: u8) -> Self {
        match byte {
            0x00 => Self::Dry,
            0x01 => Self::Comfort,
            0x02 => Self::Normal,
            0x03 => Self::Wet,
            other => Self::Unknown(other),
        }
    }

    /// Human readable status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dry => "Dry",
            Self::Comfort => "Comfort",
            Self::Normal => "Normal",
            Self::Wet => "Wet",
            Self::Unknown(_) => "--??--",
        }
    }
}

impl fmt::Display for HumidityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
