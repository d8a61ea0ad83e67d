//! Packet decoders, one module per device family.
//!
//! Each module owns the static type table of its family, the fixed layout
//! length, and a `parse` function that validates and decodes a packet.

pub mod elec;
pub mod humidity;
pub mod lighting2;
pub mod lighting5;
pub mod rain;
pub mod raw;
pub mod status;
pub mod temperature;
pub mod temphumidity;
pub mod ultraviolet;
pub mod wind;
