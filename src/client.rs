//! Main [`Rfxtrx`] client implementation.
//!
//! This module provides the high-level [`Rfxtrx`] client that combines the
//! transport, the setup handshake and packet dispatch.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use bytes::Bytes;
use tokio::sync::{Mutex, mpsc};
use tokio::task::{AbortHandle, JoinHandle};

use crate::dispatch::HandlerTable;
use crate::error::{Error, Result};
use crate::protocol::PacketFramer;
use crate::transport::{
    Handshake, SerialConfig, SerialTransport, SetupState, SetupStep, SetupTiming, Transport,
    run_read_loop,
};

/// Capacity of the channel between the read loop and dispatch.
const PACKET_CHANNEL_CAPACITY: usize = 256;

/// Client for an RFXtrx transceiver.
///
/// Received packets are decoded and passed to the handlers of the
/// [`HandlerTable`] from a background task. If a handler panics the session
/// is closed: the read loop stops, the transport is disconnected and
/// [`Rfxtrx::write`] returns `Error::ChannelClosed` until the next
/// [`Rfxtrx::connect`].
pub struct Rfxtrx<T> {
    transport: Arc<Mutex<T>>,
    handlers: Arc<HandlerTable>,
    handshake: Handshake,
    closed: Arc<AtomicBool>,

    // Background tasks
    read_task: Option<JoinHandle<()>>,
    process_task: Option<AbortHandle>,
    supervisor_task: Option<JoinHandle<()>>,
}

impl Rfxtrx<SerialTransport> {
    /// Creates a new client for a serial port with default settings.
    ///
    /// # Arguments
    ///
    /// * `port` - Serial port path (e.g., "/dev/ttyUSB0")
    /// * `handlers` - Handlers for received packets
    ///
    /// # Returns
    ///
    /// A new client (not yet connected).
    pub fn serial(port: impl Into<String>, handlers: HandlerTable) -> Result<Self> {
        Self::with_serial_config(SerialConfig::new(port), handlers)
    }

    /// Creates a new client with custom serial configuration.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the configured delays are out of range.
    pub fn with_serial_config(config: SerialConfig, handlers: HandlerTable) -> Result<Self> {
        let timing = config.timing();
        Self::with_transport(SerialTransport::new(config), handlers, timing)
    }
}

impl<T: Transport + 'static> Rfxtrx<T> {
    /// Creates a new client over any transport.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the timing is out of range.
    pub fn with_transport(
        transport: T,
        handlers: HandlerTable,
        timing: SetupTiming,
    ) -> Result<Self> {
        Ok(Self {
            transport: Arc::new(Mutex::new(transport)),
            handlers: Arc::new(handlers),
            handshake: Handshake::new(timing)?,
            closed: Arc::new(AtomicBool::new(false)),
            read_task: None,
            process_task: None,
            supervisor_task: None,
        })
    }

    /// Connects to the transceiver and runs the setup handshake.
    ///
    /// This will:
    /// 1. Open the transport
    /// 2. Write the reset packet
    /// 3. Start the background read loop and wait for the transceiver to settle
    /// 4. Write the status packet
    /// 5. Wait, then write the mode packet
    ///
    /// Does nothing if the session is already set up and running.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport fails to open or a write fails.
    pub async fn connect(&mut self) -> Result<()> {
        if self.handshake.is_ready() && !self.is_closed() {
            tracing::debug!("already connected");
            return Ok(());
        }

        self.stop_tasks();
        self.closed.store(false, Ordering::SeqCst);

        {
            let mut transport = self.transport.lock().await;
            transport.connect().await?;
        }

        self.handshake.reset();

        while let Some(step) = self.handshake.advance() {
            if self.handshake.state() == SetupState::AwaitingSettle {
                self.start_read_loop().await?;
            }

            match step {
                SetupStep::Write(frame) => {
                    tracing::info!("{}", describe(self.handshake.state()));
                    self.write(Bytes::from_static(frame)).await?;
                }
                SetupStep::Sleep(delay) => {
                    tracing::info!("waiting {:?}", delay);
                    tokio::time::sleep(delay).await;
                }
            }
        }

        tracing::info!("transceiver ready");
        Ok(())
    }

    /// Starts the background read, processing and supervisor tasks.
    async fn start_read_loop(&mut self) -> Result<()> {
        let (reader, idle_timeout) = {
            let mut transport = self.transport.lock().await;
            let reader = transport.take_reader().ok_or(Error::NotConnected)?;
            (reader, transport.read_timeout())
        };

        let (packet_tx, mut packet_rx) = mpsc::channel::<Bytes>(PACKET_CHANNEL_CAPACITY);

        let read_task = tokio::spawn(async move {
            if let Err(e) =
                run_read_loop(reader, PacketFramer::new(), packet_tx, idle_timeout).await
            {
                tracing::error!("read loop error: {}", e);
            }
        });
        let read_abort = read_task.abort_handle();
        self.read_task = Some(read_task);

        let handlers = Arc::clone(&self.handlers);
        let process_task = tokio::spawn(async move {
            while let Some(packet) = packet_rx.recv().await {
                if let Err(e) = handlers.dispatch(&packet) {
                    tracing::warn!("dispatch failed: {}", e);
                }
            }
        });
        self.process_task = Some(process_task.abort_handle());

        // Closes the session once processing stops, e.g. after a handler panic.
        let transport = Arc::clone(&self.transport);
        let closed = Arc::clone(&self.closed);
        let supervisor_task = tokio::spawn(async move {
            match process_task.await {
                Err(e) if e.is_cancelled() => return,
                Err(e) => tracing::error!("packet processing stopped: {}", e),
                Ok(()) => tracing::warn!("packet processing stopped"),
            }

            closed.store(true, Ordering::SeqCst);
            read_abort.abort();

            let mut transport = transport.lock().await;
            if let Err(e) = transport.disconnect().await {
                tracing::warn!("failed to disconnect: {}", e);
            }
        });
        self.supervisor_task = Some(supervisor_task);

        Ok(())
    }

    /// Writes a frame to the transceiver verbatim.
    ///
    /// # Errors
    ///
    /// Returns `Error::ChannelClosed` if the session was closed after a
    /// processing failure, `Error::NotConnected` if the transport is closed,
    /// or the underlying write error.
    pub async fn write(&self, frame: Bytes) -> Result<()> {
        if self.is_closed() {
            return Err(Error::ChannelClosed);
        }
        let mut transport = self.transport.lock().await;
        transport.send(frame).await
    }

    /// Disconnects from the transceiver.
    pub async fn disconnect(&mut self) -> Result<()> {
        self.stop_tasks();

        {
            let mut transport = self.transport.lock().await;
            transport.disconnect().await?;
        }

        self.handshake.reset();
        Ok(())
    }

    /// Returns true if connected and packets are being processed.
    pub async fn is_connected(&self) -> bool {
        if self.is_closed() {
            return false;
        }
        let transport = self.transport.lock().await;
        transport.is_connected()
    }

    /// Current setup state. `Idle` once the session has been closed.
    #[must_use]
    pub fn state(&self) -> SetupState {
        if self.is_closed() {
            SetupState::Idle
        } else {
            self.handshake.state()
        }
    }

    /// Returns the handler table.
    #[must_use]
    pub fn handlers(&self) -> &HandlerTable {
        &self.handlers
    }
}

impl<T> Rfxtrx<T> {
    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Aborts the background tasks. The supervisor goes first so it does not
    /// treat the abort as a failure.
    fn stop_tasks(&mut self) {
        if let Some(task) = self.supervisor_task.take() {
            task.abort();
        }
        if let Some(task) = self.process_task.take() {
            task.abort();
        }
        if let Some(task) = self.read_task.take() {
            task.abort();
        }
    }
}

fn describe(state: SetupState) -> &'static str {
    match state {
        SetupState::Resetting => "writing the reset packet",
        SetupState::QueryingStatus => "writing the status packet",
        SetupState::Ready => "writing the mode packet",
        _ => "writing setup packet",
    }
}

impl<T> Drop for Rfxtrx<T> {
    fn drop(&mut self) {
        self.stop_tasks();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use futures::future::BoxFuture;
    use tokio::io::{AsyncWriteExt, DuplexStream};
    use tokio::time::Instant;

    use super::*;
    use crate::protocol::{DecodedPacket, MODE_PACKET, PacketKind, RESET_PACKET, STATUS_PACKET};
    use crate::transport::Reader;

    type Writes = Arc<std::sync::Mutex<Vec<(Instant, Vec<u8>)>>>;

    const ELEC: [u8; 18] = [
        0x11, 0x5A, 0x01, 0x00, 0x2E, 0xB2, 0x03, 0x00, 0x00, 0x02, 0xB4, 0x00, 0x00, 0x0C, 0x46,
        0xA8, 0x11, 0x69,
    ];

    const TEMPERATURE: [u8; 9] = [0x08, 0x50, 0x02, 0x11, 0x70, 0x02, 0x00, 0xA7, 0x89];

    struct MockTransport {
        connected: bool,
        reader: Option<DuplexStream>,
        writes: Writes,
    }

    impl Transport for MockTransport {
        fn connect(&mut self) -> BoxFuture<'_, Result<()>> {
            Box::pin(async move {
                self.connected = true;
                Ok(())
            })
        }

        fn disconnect(&mut self) -> BoxFuture<'_, Result<()>> {
            Box::pin(async move {
                self.connected = false;
                Ok(())
            })
        }

        fn send(&mut self, data: Bytes) -> BoxFuture<'_, Result<()>> {
            Box::pin(async move {
                if !self.connected {
                    return Err(Error::NotConnected);
                }
                self.writes
                    .lock()
                    .unwrap()
                    .push((Instant::now(), data.to_vec()));
                Ok(())
            })
        }

        fn is_connected(&self) -> bool {
            self.connected
        }

        fn take_reader(&mut self) -> Option<Reader> {
            self.reader.take().map(|r| Box::new(r) as Reader)
        }
    }

    fn mock() -> (MockTransport, DuplexStream, Writes) {
        let (device, host) = tokio::io::duplex(256);
        let writes = Writes::default();
        let transport = MockTransport {
            connected: false,
            reader: Some(host),
            writes: Arc::clone(&writes),
        };
        (transport, device, writes)
    }

    fn channel_table(kind: PacketKind) -> (HandlerTable, mpsc::UnboundedReceiver<DecodedPacket>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let table = HandlerTable::builder()
            .on(kind, move |packet| {
                let _ = tx.send(packet);
            })
            .build()
            .unwrap();
        (table, rx)
    }

    #[tokio::test(start_paused = true)]
    async fn test_connect_runs_handshake() {
        let (transport, _device, writes) = mock();
        let (table, _rx) = channel_table(PacketKind::Elec);
        let timing = SetupTiming {
            reset_settle: Duration::from_millis(100),
            mode_delay: Duration::from_millis(200),
        };

        let mut client = Rfxtrx::with_transport(transport, table, timing).unwrap();
        assert_eq!(client.state(), SetupState::Idle);

        client.connect().await.unwrap();
        assert_eq!(client.state(), SetupState::Ready);
        assert!(client.is_connected().await);

        let writes = writes.lock().unwrap().clone();
        assert_eq!(writes.len(), 3);
        assert_eq!(writes[0].1, RESET_PACKET);
        assert_eq!(writes[1].1, STATUS_PACKET);
        assert_eq!(writes[2].1, MODE_PACKET);
        assert!(writes[1].0 - writes[0].0 >= Duration::from_millis(100));
        assert!(writes[2].0 - writes[1].0 >= Duration::from_millis(200));
    }

    #[tokio::test(start_paused = true)]
    async fn test_received_packets_are_dispatched() {
        let (transport, mut device, _writes) = mock();
        let (table, mut rx) = channel_table(PacketKind::Elec);

        let mut client =
            Rfxtrx::with_transport(transport, table, SetupTiming::default()).unwrap();
        client.connect().await.unwrap();

        device.write_all(&ELEC[..5]).await.unwrap();
        device.write_all(&ELEC[5..]).await.unwrap();

        match rx.recv().await {
            Some(DecodedPacket::Elec(reading)) => {
                assert_eq!(reading.id, "0x2EB2");
                assert_eq!(reading.current_watts, 692);
            }
            other => panic!("unexpected packet {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_unhandled_packet_does_not_stop_session() {
        let (transport, mut device, _writes) = mock();
        let (table, mut rx) = channel_table(PacketKind::Elec);

        let mut client =
            Rfxtrx::with_transport(transport, table, SetupTiming::default()).unwrap();
        client.connect().await.unwrap();

        // No temperature handler and no fallback.
        device.write_all(&TEMPERATURE).await.unwrap();
        device.write_all(&ELEC).await.unwrap();

        let packet = rx.recv().await.unwrap();
        assert_eq!(packet.kind(), PacketKind::Elec);
    }

    #[tokio::test(start_paused = true)]
    async fn test_write_and_disconnect() {
        let (transport, _device, writes) = mock();
        let (table, _rx) = channel_table(PacketKind::Elec);

        let mut client =
            Rfxtrx::with_transport(transport, table, SetupTiming::default()).unwrap();
        assert!(matches!(
            client.write(Bytes::from_static(&STATUS_PACKET)).await,
            Err(Error::NotConnected)
        ));

        client.connect().await.unwrap();
        client.write(Bytes::from_static(&STATUS_PACKET)).await.unwrap();
        assert_eq!(writes.lock().unwrap().len(), 4);

        client.disconnect().await.unwrap();
        assert!(!client.is_connected().await);
        assert_eq!(client.state(), SetupState::Idle);
    }

    #[test]
    fn test_invalid_timing_rejected() {
        let (transport, _device, _writes) = mock();
        let (table, _rx) = channel_table(PacketKind::Elec);
        let timing = SetupTiming {
            reset_settle: Duration::from_millis(10),
            mode_delay: Duration::from_millis(100),
        };

        assert!(matches!(
            Rfxtrx::with_transport(transport, table, timing),
            Err(Error::Config { .. })
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_handler_panic_closes_session() {
        let (transport, mut device, writes) = mock();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let table = HandlerTable::builder()
            .on(PacketKind::Temperature, |_| panic!("handler failure"))
            .on(PacketKind::Elec, move |packet| {
                let _ = tx.send(packet);
            })
            .build()
            .unwrap();

        let mut client =
            Rfxtrx::with_transport(transport, table, SetupTiming::default()).unwrap();
        client.connect().await.unwrap();

        device.write_all(&TEMPERATURE).await.unwrap();
        for _ in 0..100 {
            if !client.is_connected().await {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        assert!(!client.is_connected().await);
        assert_eq!(client.state(), SetupState::Idle);
        assert!(matches!(
            client.write(Bytes::from_static(&STATUS_PACKET)).await,
            Err(Error::ChannelClosed)
        ));
        assert_eq!(writes.lock().unwrap().len(), 3);

        // Later packets are not delivered to the remaining handlers.
        let _ = device.write_all(&ELEC).await;
        assert!(!matches!(
            tokio::time::timeout(Duration::from_secs(1), rx.recv()).await,
            Ok(Some(_))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_connect_twice_keeps_session() {
        let (transport, mut device, writes) = mock();
        let (table, mut rx) = channel_table(PacketKind::Elec);

        let mut client =
            Rfxtrx::with_transport(transport, table, SetupTiming::default()).unwrap();
        client.connect().await.unwrap();
        client.connect().await.unwrap();

        assert_eq!(writes.lock().unwrap().len(), 3);
        assert_eq!(client.state(), SetupState::Ready);

        device.write_all(&ELEC).await.unwrap();
        assert_eq!(rx.recv().await.unwrap().kind(), PacketKind::Elec);
    }
}
