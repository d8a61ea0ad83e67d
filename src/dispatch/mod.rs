//! Packet dispatch to user handlers.
//!
//! A [`HandlerTable`] maps decoder identities to handlers, plus an optional
//! fallback handler. Every dispatched packet reaches exactly one handler.

use std::fmt;

use crate::error::{Error, Result};
use crate::protocol::{DecodedPacket, PacketKind, find_decoder, format_packet};

/// Callback invoked with a decoded packet.
pub type Handler = Box<dyn Fn(DecodedPacket) + Send + Sync>;

/// Immutable mapping from decoder identity to handler.
///
/// Explicit entries are tried in insertion order. If a packet satisfies more
/// than one registered decoder, the first entry wins.
pub struct HandlerTable {
    entries: Vec<(PacketKind, Handler)>,
    default: Option<Handler>,
}

impl HandlerTable {
    /// Creates a handler table from explicit entries and an optional
    /// fallback handler.
    ///
    /// A later entry for a kind already present replaces the earlier one.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if there are no entries and no fallback.
    pub fn new(entries: Vec<(PacketKind, Handler)>, default: Option<Handler>) -> Result<Self> {
        let mut builder = HandlerTableBuilder::default();
        for (kind, handler) in entries {
            builder.insert(kind, handler);
        }
        builder.default = default;
        builder.build()
    }

    /// Returns a builder for a handler table.
    #[must_use]
    pub fn builder() -> HandlerTableBuilder {
        HandlerTableBuilder::default()
    }

    /// Registered decoder kinds, in the order they are tried.
    pub fn kinds(&self) -> impl Iterator<Item = PacketKind> + '_ {
        self.entries.iter().map(|(kind, _)| *kind)
    }

    /// Returns true if a fallback handler is configured.
    #[must_use]
    pub const fn has_fallback(&self) -> bool {
        self.default.is_some()
    }

    /// Finds the handler for a packet and decodes it.
    ///
    /// Explicit entries are tried first. Without a match the packet goes to
    /// the fallback handler, decoded by the first registry decoder that
    /// accepts it.
    ///
    /// # Errors
    ///
    /// Returns `Error::PacketHandlerNotFound` if no entry matches and no
    /// fallback is configured.
    pub fn resolve(&self, raw: &[u8]) -> Result<(&Handler, DecodedPacket)> {
        for (kind, handler) in &self.entries {
            if kind.can_handle(raw) {
                tracing::debug!("Packet handled by {kind} handler");
                return Ok((handler, kind.decode(raw)?));
            }
        }

        let Some(default) = &self.default else {
            return Err(Error::PacketHandlerNotFound {
                packet: format_packet(raw),
            });
        };

        let kind = find_decoder(raw);
        tracing::debug!("Packet decoded by {kind}, handled by fallback handler");
        Ok((default, kind.decode(raw)?))
    }

    /// Resolves a packet and invokes its handler exactly once.
    ///
    /// # Errors
    ///
    /// Returns `Error::PacketHandlerNotFound` if no handler accepts the packet.
    pub fn dispatch(&self, raw: &[u8]) -> Result<()> {
        let (handler, packet) = self.resolve(raw)?;
        handler(packet);
        Ok(())
    }
}

impl fmt::Debug for HandlerTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerTable")
            .field("entries", &self.kinds().collect::<Vec<_>>())
            .field("has_fallback", &self.has_fallback())
            .finish()
    }
}

/// Builder for [`HandlerTable`].
#[derive(Default)]
pub struct HandlerTableBuilder {
    entries: Vec<(PacketKind, Handler)>,
    default: Option<Handler>,
}

impl HandlerTableBuilder {
    fn insert(&mut self, kind: PacketKind, handler: Handler) {
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == kind) {
            entry.1 = handler;
        } else {
            self.entries.push((kind, handler));
        }
    }

    /// Registers a handler for one decoder kind.
    #[must_use]
    pub fn on<F>(mut self, kind: PacketKind, handler: F) -> Self
    where
        F: Fn(DecodedPacket) + Send + Sync + 'static,
    {
        self.insert(kind, Box::new(handler));
        self
    }

    /// Sets the handler for packets no explicit entry accepts.
    #[must_use]
    pub fn fallback<F>(mut self, handler: F) -> Self
    where
        F: Fn(DecodedPacket) + Send + Sync + 'static,
    {
        self.default = Some(Box::new(handler));
        self
    }

    /// Builds the handler table.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if nothing was registered.
    pub fn build(self) -> Result<HandlerTable> {
        if self.entries.is_empty() && self.default.is_none() {
            return Err(Error::Config {
                reason: "handler table needs at least one handler or a fallback".into(),
            });
        }

        Ok(HandlerTable {
            entries: self.entries,
            default: self.default,
        })
    }
}
