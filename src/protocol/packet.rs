//! Packet kinds, validation and the decoder registry.
//!
//! Every received packet has the same wire layout:
//! ```text
//! ┌──────────┬─────────────┬──────────┬──────────┬──────────────────┐
//! │  length  │ packet type │ sub type │ sequence │ family payload   │
//! │  1 byte  │   1 byte    │  1 byte  │  1 byte  │ length - 3 bytes │
//! └──────────┴─────────────┴──────────┴──────────┴──────────────────┘
//! ```
//! The length byte counts the bytes that follow it.
//!
//! Each [`PacketKind`] owns a static [`PacketTypeSpec`] listing the packet
//! types and sub types it accepts. The raw kind accepts everything and is
//! always tried last.

use std::fmt;

use crate::error::PacketError;
use crate::protocol::decoders;
use crate::types::{
    EnergyReading, GenericPacket, HumidityReading, InterfaceStatus, Lighting2Command,
    Lighting5Command, PacketHeader, RainReading, TempHumidityReading, TemperatureReading,
    UvReading, WindReading,
};

/// Accepted packet type and sub type codes for one decoder.
///
/// An empty table accepts any value at that position.
#[derive(Debug)]
pub struct PacketTypeSpec {
    /// Accepted packet types (byte 1) with their names.
    pub packet_types: &'static [(u8, &'static str)],
    /// Accepted sub types (byte 2) with their names.
    pub sub_types: &'static [(u8, &'static str)],
}

impl PacketTypeSpec {
    /// Looks up the name of a packet type.
    #[must_use]
    pub fn packet_type_name(&self, packet_type: u8) -> Option<&'static str> {
        lookup(self.packet_types, packet_type)
    }

    /// Looks up the name of a sub type.
    #[must_use]
    pub fn sub_type_name(&self, sub_type: u8) -> Option<&'static str> {
        lookup(self.sub_types, sub_type)
    }

    /// Returns true if the packet type is accepted.
    #[must_use]
    pub fn accepts_packet_type(&self, packet_type: u8) -> bool {
        self.packet_types.is_empty() || self.packet_type_name(packet_type).is_some()
    }

    /// Returns true if the sub type is accepted.
    #[must_use]
    pub fn accepts_sub_type(&self, sub_type: u8) -> bool {
        self.sub_types.is_empty() || self.sub_type_name(sub_type).is_some()
    }
}

/// Looks up a code in a static name table.
pub(crate) fn lookup(table: &'static [(u8, &'static str)], code: u8) -> Option<&'static str> {
    table
        .iter()
        .find_map(|&(candidate, name)| (candidate == code).then_some(name))
}

/// Decoder identity, one variant per device family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PacketKind {
    /// Energy usage sensors.
    Elec,
    /// Humidity sensors.
    Humidity,
    /// Lighting2 controllers.
    Lighting2,
    /// Lighting5 controllers.
    Lighting5,
    /// Rain gauges.
    Rain,
    /// Transceiver interface status.
    Status,
    /// Temperature sensors.
    Temperature,
    /// Temperature and humidity sensors.
    TempHumidity,
    /// Ultraviolet sensors.
    UltraViolet,
    /// Anemometers.
    Wind,
    /// Catch-all for anything else.
    Raw,
}

/// All decoders in the order they are tried. The raw decoder is last.
pub const REGISTRY: [PacketKind; 11] = [
    PacketKind::Elec,
    PacketKind::Humidity,
    PacketKind::Lighting2,
    PacketKind::Lighting5,
    PacketKind::Rain,
    PacketKind::Status,
    PacketKind::Temperature,
    PacketKind::TempHumidity,
    PacketKind::UltraViolet,
    PacketKind::Wind,
    PacketKind::Raw,
];

impl PacketKind {
    /// Decoder name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Elec => "Elec",
            Self::Humidity => "Humidity",
            Self::Lighting2 => "Lighting2",
            Self::Lighting5 => "Lighting5",
            Self::Rain => "Rain",
            Self::Status => "Status",
            Self::Temperature => "Temperature",
            Self::TempHumidity => "TempHumidity",
            Self::UltraViolet => "UltraViolet",
            Self::Wind => "Wind",
            Self::Raw => "Packet",
        }
    }

    /// Static type table of this decoder.
    #[must_use]
    pub fn spec(self) -> &'static PacketTypeSpec {
        match self {
            Self::Elec => &decoders::elec::SPEC,
            Self::Humidity => &decoders::humidity::SPEC,
            Self::Lighting2 => &decoders::lighting2::SPEC,
            Self::Lighting5 => &decoders::lighting5::SPEC,
            Self::Rain => &decoders::rain::SPEC,
            Self::Status => &decoders::status::SPEC,
            Self::Temperature => &decoders::temperature::SPEC,
            Self::TempHumidity => &decoders::temphumidity::SPEC,
            Self::UltraViolet => &decoders::ultraviolet::SPEC,
            Self::Wind => &decoders::wind::SPEC,
            Self::Raw => &decoders::raw::SPEC,
        }
    }

    /// Minimum number of bytes the decoder's layout reads.
    #[must_use]
    pub const fn min_len(self) -> usize {
        match self {
            Self::Elec => decoders::elec::PACKET_LEN,
            Self::Humidity => decoders::humidity::PACKET_LEN,
            Self::Lighting2 => decoders::lighting2::PACKET_LEN,
            Self::Lighting5 => decoders::lighting5::PACKET_LEN,
            Self::Rain => decoders::rain::PACKET_LEN,
            Self::Status => decoders::status::PACKET_LEN,
            Self::Temperature => decoders::temperature::PACKET_LEN,
            Self::TempHumidity => decoders::temphumidity::PACKET_LEN,
            Self::UltraViolet => decoders::ultraviolet::PACKET_LEN,
            Self::Wind => decoders::wind::PACKET_LEN,
            Self::Raw => 0,
        }
    }

    /// Validates a packet against this decoder.
    ///
    /// Checks, in order: the length byte matches the byte count, the packet
    /// type and sub type are accepted, and the packet is long enough for the
    /// decoder's layout. The raw decoder accepts everything.
    pub fn validate(self, data: &[u8]) -> Result<(), PacketError> {
        if self == Self::Raw {
            return Ok(());
        }

        let expected = data.first().map_or(1, |&len| usize::from(len) + 1);
        if data.len() != expected {
            return Err(PacketError::InvalidLength {
                expected,
                got: data.len(),
            });
        }

        let spec = self.spec();

        if let Some(&packet_type) = data.get(1) {
            if !spec.accepts_packet_type(packet_type) {
                return Err(PacketError::UnknownType {
                    kind: self,
                    packet_type,
                });
            }
        }

        if let Some(&sub_type) = data.get(2) {
            if !spec.accepts_sub_type(sub_type) {
                return Err(PacketError::UnknownSubtype {
                    kind: self,
                    sub_type,
                });
            }
        }

        if data.len() < self.min_len() {
            return Err(PacketError::InvalidLength {
                expected: self.min_len(),
                got: data.len(),
            });
        }

        Ok(())
    }

    /// Returns true if this decoder accepts the packet.
    #[must_use]
    pub fn can_handle(self, data: &[u8]) -> bool {
        self.validate(data).is_ok()
    }

    /// Validates and decodes a packet.
    pub fn decode(self, data: &[u8]) -> Result<DecodedPacket, PacketError> {
        Ok(match self {
            Self::Elec => DecodedPacket::Elec(decoders::elec::parse(data)?),
            Self::Humidity => DecodedPacket::Humidity(decoders::humidity::parse(data)?),
            Self::Lighting2 => DecodedPacket::Lighting2(decoders::lighting2::parse(data)?),
            Self::Lighting5 => DecodedPacket::Lighting5(decoders::lighting5::parse(data)?),
            Self::Rain => DecodedPacket::Rain(decoders::rain::parse(data)?),
            Self::Status => DecodedPacket::Status(decoders::status::parse(data)?),
            Self::Temperature => DecodedPacket::Temperature(decoders::temperature::parse(data)?),
            Self::TempHumidity => {
                DecodedPacket::TempHumidity(decoders::temphumidity::parse(data)?)
            }
            Self::UltraViolet => DecodedPacket::UltraViolet(decoders::ultraviolet::parse(data)?),
            Self::Wind => DecodedPacket::Wind(decoders::wind::parse(data)?),
            Self::Raw => DecodedPacket::Raw(decoders::raw::parse(data)),
        })
    }
}

impl fmt::Display for PacketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Validates and decodes a packet with the given decoder.
pub fn decode(kind: PacketKind, data: &[u8]) -> Result<DecodedPacket, PacketError> {
    kind.decode(data)
}

/// Returns true if the given decoder accepts the packet.
#[must_use]
pub fn can_handle(kind: PacketKind, data: &[u8]) -> bool {
    kind.can_handle(data)
}

/// Finds the first decoder in the registry that accepts the packet.
///
/// Always succeeds, the raw decoder accepting anything.
#[must_use]
pub fn find_decoder(data: &[u8]) -> PacketKind {
    REGISTRY
        .into_iter()
        .find(|kind| kind.can_handle(data))
        .unwrap_or(PacketKind::Raw)
}

/// A decoded packet, one variant per device family.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedPacket {
    Elec(EnergyReading),
    Humidity(HumidityReading),
    Lighting2(Lighting2Command),
    Lighting5(Lighting5Command),
    Rain(RainReading),
    Status(InterfaceStatus),
    Temperature(TemperatureReading),
    TempHumidity(TempHumidityReading),
    UltraViolet(UvReading),
    Wind(WindReading),
    Raw(GenericPacket),
}

impl DecodedPacket {
    /// Returns the decoder that produced this packet.
    #[must_use]
    pub const fn kind(&self) -> PacketKind {
        match self {
            Self::Elec(_) => PacketKind::Elec,
            Self::Humidity(_) => PacketKind::Humidity,
            Self::Lighting2(_) => PacketKind::Lighting2,
            Self::Lighting5(_) => PacketKind::Lighting5,
            Self::Rain(_) => PacketKind::Rain,
            Self::Status(_) => PacketKind::Status,
            Self::Temperature(_) => PacketKind::Temperature,
            Self::TempHumidity(_) => PacketKind::TempHumidity,
            Self::UltraViolet(_) => PacketKind::UltraViolet,
            Self::Wind(_) => PacketKind::Wind,
            Self::Raw(_) => PacketKind::Raw,
        }
    }

    /// Returns the common header, if the packet has one.
    #[must_use]
    pub const fn header(&self) -> Option<&PacketHeader> {
        match self {
            Self::Elec(p) => Some(&p.header),
            Self::Humidity(p) => Some(&p.header),
            Self::Lighting2(p) => Some(&p.header),
            Self::Lighting5(p) => Some(&p.header),
            Self::Rain(p) => Some(&p.header),
            Self::Status(p) => Some(&p.header),
            Self::Temperature(p) => Some(&p.header),
            Self::TempHumidity(p) => Some(&p.header),
            Self::UltraViolet(p) => Some(&p.header),
            Self::Wind(p) => Some(&p.header),
            Self::Raw(_) => None,
        }
    }

    /// Returns the device identifier, if the packet has one.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Elec(p) => Some(&p.id),
            Self::Humidity(p) => Some(&p.id),
            Self::Lighting2(p) => Some(&p.id),
            Self::Lighting5(p) => Some(&p.id),
            Self::Rain(p) => Some(&p.id),
            Self::Temperature(p) => Some(&p.id),
            Self::TempHumidity(p) => Some(&p.id),
            Self::UltraViolet(p) => Some(&p.id),
            Self::Wind(p) => Some(&p.id),
            Self::Status(_) | Self::Raw(_) => None,
        }
    }
}

impl fmt::Display for DecodedPacket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id() {
            Some(id) => write!(f, "{}({id})", self.kind()),
            None => write!(f, "{}", self.kind()),
        }
    }
}
