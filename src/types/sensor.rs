//! Weather sensor types.
//!
//! Temperatures are in degrees Celsius, decoded from tenths of a degree.
//! Fields a sub type does not report are `None`.

use crate::types::{HumidityStatus, PacketHeader, SignalStatus};

/// Temperature sensor reading.
#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureReading {
    pub header: PacketHeader,
    pub id: String,
    pub temperature: f64,
    pub signal: SignalStatus,
}

/// Humidity sensor reading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HumidityReading {
    pub header: PacketHeader,
    pub id: String,
    /// Relative humidity in percent.
    pub humidity: u8,
    pub humidity_status: HumidityStatus,
    pub signal: SignalStatus,
}

/// Combined temperature and humidity sensor reading.
#[derive(Debug, Clone, PartialEq)]
pub struct TempHumidityReading {
    pub header: PacketHeader,
    pub id: String,
    pub temperature: f64,
    /// Relative humidity in percent.
    pub humidity: u8,
    pub humidity_status: HumidityStatus,
    pub signal: SignalStatus,
}

/// Rain gauge reading.
#[derive(Debug, Clone, PartialEq)]
pub struct RainReading {
    pub header: PacketHeader,
    pub id: String,
    /// Rain rate in mm/hour. Only sub types 1 and 2 report it.
    pub rain_rate: Option<f64>,
    /// Rain total in mm. Not reported by sub type 6.
    pub rain_total: Option<f64>,
    pub signal: SignalStatus,
}

/// Anemometer reading.
#[derive(Debug, Clone, PartialEq)]
pub struct WindReading {
    pub header: PacketHeader,
    pub id: String,
    /// Direction in degrees, unscaled.
    pub direction: u16,
    /// Average speed in m/s. Not reported by sub type 5.
    pub average_speed: Option<f64>,
    /// Gust speed in m/s.
    pub gust: f64,
    /// Only reported by sub type 4.
    pub temperature: Option<f64>,
    /// Only reported by sub type 4.
    pub wind_chill: Option<f64>,
    pub signal: SignalStatus,
}

/// Ultraviolet sensor reading.
#[derive(Debug, Clone, PartialEq)]
pub struct UvReading {
    pub header: PacketHeader,
    pub id: String,
    /// UV index, raw.
    pub uv: u8,
    /// Only reported by sub type 3.
    pub temperature: Option<f64>,
    pub signal: SignalStatus,
}
