//! Energy usage sensor types.

use crate::types::{PacketHeader, SignalStatus};

/// Reading from an energy usage sensor (e.g. OWL CM119/CM160/CM180).
#[derive(Debug, Clone, PartialEq)]
pub struct EnergyReading {
    /// Common header fields.
    pub header: PacketHeader,
    /// Sensor identifier, e.g. `0x2EB2`.
    pub id: String,
    /// Transmission counter.
    pub count: u8,
    /// Instantaneous usage in watts.
    pub current_watts: u32,
    /// Accumulated usage, calibrated by the empirical divisor.
    pub total_watts: f64,
    /// Signal and battery levels.
    pub signal: SignalStatus,
}
