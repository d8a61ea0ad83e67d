//! # rfxcom
//!
//! A Rust client library for RFXtrx home-automation RF transceivers.
//!
//! This library decodes the packets an RFXtrx forwards from 433 MHz sensors
//! and switches, and dispatches them to user handlers.
//!
//! ## Features
//!
//! - Async/await based API using Tokio
//! - Decoders for energy, temperature, humidity, rain, wind, UV and lighting devices
//! - Handler table keyed by decoder, with an optional fallback
//! - Comprehensive error handling
//!
//! ## Quick Start
//!
//! ```no_run
//! use rfxcom::{DecodedPacket, HandlerTable, PacketKind, Rfxtrx};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), rfxcom::Error> {
//!     let handlers = HandlerTable::builder()
//!         .on(PacketKind::Temperature, |packet| {
//!             if let DecodedPacket::Temperature(reading) = packet {
//!                 println!("{}: {}°C", reading.id, reading.temperature);
//!             }
//!         })
//!         .fallback(|packet| println!("Received {packet}"))
//!         .build()?;
//!
//!     // Connect and run the setup handshake
//!     let mut client = Rfxtrx::serial("/dev/ttyUSB0", handlers)?;
//!     client.connect().await?;
//!
//!     tokio::time::sleep(std::time::Duration::from_secs(60)).await;
//!
//!     client.disconnect().await?;
//!     Ok(())
//! }
//! ```
//!
//! Packets can also be decoded without a transceiver:
//!
//! ```
//! use rfxcom::protocol::find_decoder;
//!
//! let data = [0x08, 0x50, 0x02, 0x11, 0x70, 0x02, 0x00, 0xA7, 0x89];
//! let packet = find_decoder(&data).decode(&data).unwrap();
//! assert_eq!(packet.to_string(), "Temperature(0x7002)");
//! ```
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`protocol`] - Packet validation, decoders, registry, framing and command frames
//! - [`types`] - Decoded records (readings, commands, interface status)
//! - [`dispatch`] - Handler table and packet dispatch
//! - [`transport`] - Transport trait, serial transport and setup handshake
//! - [`client`] - High-level [`Rfxtrx`] client

pub mod client;
pub mod dispatch;
pub mod error;
pub mod protocol;
pub mod transport;
pub mod types;

// Re-exports for convenience
pub use client::Rfxtrx;
pub use dispatch::{Handler, HandlerTable, HandlerTableBuilder};
pub use error::{Error, PacketError, Result};
pub use protocol::{DecodedPacket, PacketKind, REGISTRY, can_handle, decode, find_decoder};
pub use transport::{SerialConfig, SerialTransport, SetupState, SetupTiming, list_ports};
pub use types::{
    EnergyReading, GenericPacket, HumidityReading, HumidityStatus, InterfaceStatus,
    Lighting2Command, Lighting5Command, PacketHeader, Protocol, RainReading, SignalStatus,
    TempHumidityReading, TemperatureReading, UvReading, WindReading,
};
