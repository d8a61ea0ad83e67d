//! Serial/USB transport implementation.
//!
//! This module provides serial port communication for RFXtrx transceivers
//! connected via USB.

use std::time::Duration;

use bytes::Bytes;
use futures::future::BoxFuture;
use tokio::io::{AsyncWriteExt, ReadHalf, WriteHalf};
use tokio_serial::{ClearBuffer, SerialPort, SerialPortBuilderExt, SerialStream};

use crate::error::{Error, Result};
use crate::protocol::format_packet;
use crate::transport::setup::{DEFAULT_MODE_DELAY, DEFAULT_RESET_SETTLE, SetupTiming};
use crate::transport::{DEFAULT_READ_TIMEOUT, Reader, Transport};

/// Default baud rate for RFXtrx transceivers.
pub const DEFAULT_BAUD_RATE: u32 = 38_400;

/// Default port read timeout.
pub const DEFAULT_TIMEOUT: Duration = DEFAULT_READ_TIMEOUT;

/// Configuration for serial transport.
#[derive(Debug, Clone)]
pub struct SerialConfig {
    /// Serial port path (e.g., "/dev/ttyUSB0" or "COM3").
    pub port: String,
    /// Baud rate.
    pub baud_rate: u32,
    /// Port read timeout, also the idle time after which a partial packet
    /// is dropped.
    pub timeout: Duration,
    /// Delay after the reset before the status query.
    pub reset_settle: Duration,
    /// Delay between the status query and the mode command.
    pub mode_delay: Duration,
}

impl SerialConfig {
    /// Creates a new serial configuration with default settings.
    #[must_use]
    pub fn new(port: impl Into<String>) -> Self {
        Self {
            port: port.into(),
            baud_rate: DEFAULT_BAUD_RATE,
            timeout: DEFAULT_TIMEOUT,
            reset_settle: DEFAULT_RESET_SETTLE,
            mode_delay: DEFAULT_MODE_DELAY,
        }
    }

    /// Sets the baud rate.
    #[must_use]
    pub const fn baud_rate(mut self, rate: u32) -> Self {
        self.baud_rate = rate;
        self
    }

    /// Sets the port read timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the settle delay after the reset.
    #[must_use]
    pub const fn reset_settle(mut self, delay: Duration) -> Self {
        self.reset_settle = delay;
        self
    }

    /// Sets the delay between the status query and the mode command.
    #[must_use]
    pub const fn mode_delay(mut self, delay: Duration) -> Self {
        self.mode_delay = delay;
        self
    }

    /// Handshake delays from this configuration.
    #[must_use]
    pub const fn timing(&self) -> SetupTiming {
        SetupTiming {
            reset_settle: self.reset_settle,
            mode_delay: self.mode_delay,
        }
    }
}

/// Serial transport for RFXtrx communication.
///
/// The stream is split so reading and writing proceed independently.
pub struct SerialTransport {
    config: SerialConfig,
    writer: Option<WriteHalf<SerialStream>>,
    reader: Option<ReadHalf<SerialStream>>,
}

impl SerialTransport {
    /// Creates a new serial transport with the given configuration.
    #[must_use]
    pub const fn new(config: SerialConfig) -> Self {
        Self {
            config,
            writer: None,
            reader: None,
        }
    }

    /// Creates a new serial transport for the given port with default settings.
    #[must_use]
    pub fn with_port(port: impl Into<String>) -> Self {
        Self::new(SerialConfig::new(port))
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &SerialConfig {
        &self.config
    }
}

impl Transport for SerialTransport {
    fn connect(&mut self) -> BoxFuture<'_, Result<()>> {
        Box::pin(async move {
            if self.writer.is_some() {
                return Ok(());
            }

            tracing::info!("connecting to serial port: {}", self.config.port);

            let stream = tokio_serial::new(&self.config.port, self.config.baud_rate)
                .timeout(self.config.timeout)
                .open_native_async()
                .map_err(Error::Serial)?;

            // Drop anything the transceiver sent before we were listening.
            tracing::info!("flushing input buffer");
            if let Err(e) = stream.clear(ClearBuffer::Input) {
                tracing::warn!("failed to flush input: {}", e);
            }

            let (reader, writer) = tokio::io::split(stream);
            self.reader = Some(reader);
            self.writer = Some(writer);

            tracing::info!("connected to serial port");
            Ok(())
        })
    }

    fn disconnect(&mut self) -> BoxFuture<'_, Result<()>> {
        Box::pin(async move {
            if self.writer.is_some() || self.reader.is_some() {
                tracing::info!("disconnecting from serial port");
                self.writer = None;
                self.reader = None;
            }
            Ok(())
        })
    }

    fn send(&mut self, data: Bytes) -> BoxFuture<'_, Result<()>> {
        Box::pin(async move {
            let writer = self.writer.as_mut().ok_or(Error::NotConnected)?;

            tracing::info!("WRITE: {}", format_packet(&data));
            writer.write_all(&data).await?;
            writer.flush().await?;

            Ok(())
        })
    }

    fn is_connected(&self) -> bool {
        self.writer.is_some()
    }

    fn take_reader(&mut self) -> Option<Reader> {
        self.reader.take().map(|reader| Box::new(reader) as Reader)
    }

    fn read_timeout(&self) -> Duration {
        self.config.timeout
    }
}

/// Lists available serial ports.
///
/// # Errors
///
/// Returns an error if the port list cannot be retrieved.
pub fn list_ports() -> Result<Vec<String>> {
    let ports = tokio_serial::available_ports().map_err(Error::Serial)?;
    Ok(ports.into_iter().map(|p| p.port_name).collect())
}
