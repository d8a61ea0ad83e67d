//! Packet framing for the serial byte stream.
//!
//! Packets are length-prefixed:
//! ```text
//! ┌──────────┬──────────────────────┐
//! │  length  │       payload        │
//! │  1 byte  │    length bytes      │
//! └──────────┴──────────────────────┘
//! ```
//! A zero length byte is an empty packet and carries nothing.

use bytes::{Buf, Bytes, BytesMut};

/// Splits a byte stream into complete packets, handling partial reads.
#[derive(Debug, Default)]
pub struct PacketFramer {
    buffer: BytesMut,
}

impl PacketFramer {
    /// Creates a new framer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buffer: BytesMut::new(),
        }
    }

    /// Feeds data into the framer.
    pub fn feed(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
    }

    /// Returns the next complete packet, including its length byte, or
    /// `None` if more data is needed.
    pub fn next_packet(&mut self) -> Option<Bytes> {
        while self.buffer.first() == Some(&0x00) {
            tracing::debug!("Skipping empty packet");
            self.buffer.advance(1);
        }

        let total = usize::from(*self.buffer.first()?) + 1;
        if self.buffer.len() < total {
            return None;
        }

        Some(self.buffer.split_to(total).freeze())
    }

    /// Returns the number of bytes currently buffered.
    #[must_use]
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Clears the internal buffer.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}
