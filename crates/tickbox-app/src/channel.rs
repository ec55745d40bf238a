//! Client channel.
//!
//! Wraps the one accepted connection. Reads are small and non-blocking; the
//! only thing that matters about inbound data is whether a carriage return
//! appears anywhere in the read. There is no line buffering across reads.

use crate::{DuplexStream, PollResult};

/// Inbound read size.
pub const READ_BUFFER_LEN: usize = 16;

/// Byte that asks for a counter reply.
pub const TERMINATOR: u8 = b'\r';

/// Result of polling the client channel once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelEvent {
    /// The read contained at least one terminator.
    Terminator,
    /// The read contained only non-terminator bytes.
    Data,
    /// The peer shut down its side (zero-length read).
    Closed,
    /// Nothing was ready.
    Idle,
}

/// Encode a counter value for the wire: decimal ASCII followed by CRLF.
pub fn encode_counter(value: u32) -> Vec<u8> {
    format!("{value}\r\n").into_bytes()
}

/// The single active client connection.
#[derive(Debug)]
pub struct ClientChannel<S> {
    stream: S,
}

impl<S: DuplexStream> ClientChannel<S> {
    /// Wrap an accepted, non-blocking stream.
    pub fn new(stream: S) -> Self {
        Self { stream }
    }

    /// Poll the connection once without blocking.
    ///
    /// Duplicate terminators in the same read collapse into a single
    /// [`ChannelEvent::Terminator`].
    pub fn try_read(&mut self) -> ChannelEvent {
        let mut buf = [0u8; READ_BUFFER_LEN];
        match self.stream.try_read(&mut buf) {
            PollResult::Ready(0) | PollResult::Closed => ChannelEvent::Closed,
            PollResult::Ready(n) => {
                let read = &buf[..n.min(READ_BUFFER_LEN)];
                if read.contains(&TERMINATOR) {
                    ChannelEvent::Terminator
                } else {
                    ChannelEvent::Data
                }
            },
            PollResult::WouldBlock => ChannelEvent::Idle,
        }
    }

    /// Send a counter value in a single best-effort write.
    pub fn send(&mut self, value: u32) {
        let message = encode_counter(value);
        match self.stream.try_write(&message) {
            Ok(written) if written < message.len() => {
                tracing::debug!(value, written, "partial counter write, remainder dropped");
            },
            Ok(_) => tracing::trace!(value, "counter sent"),
            Err(e) => tracing::debug!(value, error = %e, "counter send failed"),
        }
    }

    /// Close the connection.
    ///
    /// Consumes the channel, so a connection is closed at most once.
    pub fn close(self) {
        drop(self.stream);
    }

    /// The underlying stream.
    pub fn stream(&self) -> &S {
        &self.stream
    }
}
