//! Transport layer for RFXtrx communication.
//!
//! This module provides the transport abstraction, the serial transport,
//! the read loop that turns a byte stream into packets, and the setup
//! handshake state machine.

pub mod serial;
pub mod setup;

use std::time::Duration;

use bytes::Bytes;
use futures::future::BoxFuture;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::sync::mpsc;

use crate::error::{Error, Result};
use crate::protocol::{PacketFramer, format_packet};

/// Default idle time after which a partially received packet is dropped.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(1);

/// Boxed read half handed to the read loop.
pub type Reader = Box<dyn AsyncRead + Send + Unpin>;

/// Trait for transport implementations.
pub trait Transport: Send {
    /// Opens the connection.
    fn connect(&mut self) -> BoxFuture<'_, Result<()>>;

    /// Closes the connection.
    fn disconnect(&mut self) -> BoxFuture<'_, Result<()>>;

    /// Writes a frame verbatim.
    fn send(&mut self, data: Bytes) -> BoxFuture<'_, Result<()>>;

    /// Returns true if connected.
    fn is_connected(&self) -> bool;

    /// Takes the read half for use in a background task.
    ///
    /// Returns `None` if not connected or already taken.
    fn take_reader(&mut self) -> Option<Reader>;

    /// Idle time after which the read loop drops a partial packet.
    fn read_timeout(&self) -> Duration {
        DEFAULT_READ_TIMEOUT
    }
}

/// Reads from `reader`, frames packets and forwards them on `packet_tx`.
///
/// A noise byte or a truncated packet leaves a bogus length prefix in the
/// framer. Once the line has been idle for `idle_timeout` with bytes still
/// buffered, they are dropped so framing restarts on the next packet.
///
/// Returns `Ok(())` once the receiver is dropped, or an error when the
/// stream ends or fails.
pub async fn run_read_loop<R>(
    mut reader: R,
    mut framer: PacketFramer,
    packet_tx: mpsc::Sender<Bytes>,
    idle_timeout: Duration,
) -> Result<()>
where
    R: AsyncRead + Unpin,
{
    let mut buf = [0u8; 256];

    loop {
        let n = match tokio::time::timeout(idle_timeout, reader.read(&mut buf)).await {
            Err(_) => {
                if framer.buffered() > 0 {
                    tracing::warn!(
                        "discarding {} bytes of incomplete packet",
                        framer.buffered()
                    );
                    framer.clear();
                }
                continue;
            }
            Ok(Ok(0)) => {
                tracing::debug!("stream closed");
                return Err(Error::Io(std::io::Error::new(
                    std::io::ErrorKind::ConnectionReset,
                    "stream closed",
                )));
            }
            Ok(Ok(n)) => n,
            Ok(Err(e)) => {
                tracing::error!("read error: {}", e);
                return Err(Error::Io(e));
            }
        };

        tracing::trace!("received {} bytes", n);
        framer.feed(&buf[..n]);

        while let Some(packet) = framer.next_packet() {
            tracing::info!("READ: {}", format_packet(&packet));
            if packet_tx.send(packet).await.is_err() {
                tracing::debug!("packet receiver dropped");
                return Ok(());
            }
        }
    }
}

pub use serial::{SerialConfig, SerialTransport, list_ports};
pub use setup::{Handshake, SetupState, SetupStep, SetupTiming};

#[cfg(test)]
mod tests {
    use tokio::io::AsyncWriteExt;

    use super::*;

    const TEMPERATURE: [u8; 9] = [0x08, 0x50, 0x02, 0x11, 0x70, 0x02, 0x00, 0xA7, 0x89];

    #[tokio::test]
    async fn test_read_loop_frames_split_writes() {
        let (mut device, host) = tokio::io::duplex(64);
        let (tx, mut rx) = mpsc::channel(8);

        let task = tokio::spawn(run_read_loop(
            host,
            PacketFramer::new(),
            tx,
            DEFAULT_READ_TIMEOUT,
        ));

        device.write_all(&TEMPERATURE[..3]).await.unwrap();
        device.write_all(&TEMPERATURE[3..]).await.unwrap();
        device.write_all(&[0x00, 0x02, 0x99, 0x01]).await.unwrap();

        assert_eq!(&rx.recv().await.unwrap()[..], &TEMPERATURE);
        assert_eq!(&rx.recv().await.unwrap()[..], &[0x02, 0x99, 0x01]);

        drop(device);
        assert!(matches!(task.await.unwrap(), Err(Error::Io(_))));
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_read_loop_stops_when_receiver_dropped() {
        let (mut device, host) = tokio::io::duplex(64);
        let (tx, rx) = mpsc::channel(1);
        drop(rx);

        let task = tokio::spawn(run_read_loop(
            host,
            PacketFramer::new(),
            tx,
            DEFAULT_READ_TIMEOUT,
        ));
        device.write_all(&TEMPERATURE).await.unwrap();

        assert!(task.await.unwrap().is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_read_loop_resyncs_after_noise() {
        const ELEC: [u8; 18] = [
            0x11, 0x5A, 0x01, 0x00, 0x2E, 0xB2, 0x03, 0x00, 0x00, 0x02, 0xB4, 0x00, 0x00, 0x0C,
            0x46, 0xA8, 0x11, 0x69,
        ];

        let (mut device, host) = tokio::io::duplex(256);
        let (tx, mut rx) = mpsc::channel(8);
        let _task = tokio::spawn(run_read_loop(
            host,
            PacketFramer::new(),
            tx,
            Duration::from_secs(1),
        ));

        // A stray byte reads as a 0x40 length prefix.
        device.write_all(&[0x40]).await.unwrap();
        tokio::time::sleep(Duration::from_secs(3)).await;

        for _ in 0..5 {
            device.write_all(&ELEC).await.unwrap();
            let packet = tokio::time::timeout(Duration::from_millis(500), rx.recv())
                .await
                .unwrap()
                .unwrap();
            assert_eq!(&packet[..], &ELEC);
            tokio::time::sleep(Duration::from_secs(2)).await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_read_loop_keeps_slow_packet() {
        let (mut device, host) = tokio::io::duplex(64);
        let (tx, mut rx) = mpsc::channel(8);
        let _task = tokio::spawn(run_read_loop(
            host,
            PacketFramer::new(),
            tx,
            Duration::from_secs(1),
        ));

        device.write_all(&TEMPERATURE[..4]).await.unwrap();
        tokio::time::sleep(Duration::from_millis(500)).await;
        device.write_all(&TEMPERATURE[4..]).await.unwrap();

        assert_eq!(&rx.recv().await.unwrap()[..], &TEMPERATURE);
    }
}
