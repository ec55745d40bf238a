//! Single-client connection slot.

use crate::{Acceptor, ClientChannel, DuplexStream};

/// Holder for at most one accepted client.
///
/// Transitions replace the whole value, so there is no sentinel handle that
/// could be used after close.
#[derive(Debug)]
pub enum ConnectionSlot<S> {
    /// No client; the acceptor is polled every tick.
    NoClient,
    /// One client is being served.
    Connected(ClientChannel<S>),
}

impl<S> Default for ConnectionSlot<S> {
    fn default() -> Self {
        Self::NoClient
    }
}

impl<S: DuplexStream> ConnectionSlot<S> {
    /// Check if a client occupies the slot.
    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected(_))
    }

    /// Accept a pending connection into the slot if it is empty.
    ///
    /// Returns `true` if a new client was accepted. Never calls the acceptor
    /// while a client is connected.
    pub fn try_fill<A>(&mut self, acceptor: &mut A) -> bool
    where
        A: Acceptor<Stream = S>,
    {
        if self.is_connected() {
            return false;
        }

        match acceptor.try_accept() {
            Some(stream) => {
                *self = Self::Connected(ClientChannel::new(stream));
                true
            },
            None => false,
        }
    }

    /// The active channel. `None` if no client is connected.
    pub fn channel_mut(&mut self) -> Option<&mut ClientChannel<S>> {
        match self {
            Self::Connected(channel) => Some(channel),
            Self::NoClient => None,
        }
    }

    /// Close the active channel and empty the slot.
    ///
    /// Returns `true` if a client was closed.
    pub fn clear(&mut self) -> bool {
        match std::mem::take(self) {
            Self::Connected(channel) => {
                channel.close();
                true
            },
            Self::NoClient => false,
        }
    }
}
