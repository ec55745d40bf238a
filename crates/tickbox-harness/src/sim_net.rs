//! In-memory listener and client connections.
//!
//! [`SimAcceptor`] stands in for the listening socket. Tests open
//! connections with [`SimAcceptor::connect`], which queues them in a backlog
//! and hands back the remote end as a [`SimPeer`]. The runtime sees the
//! local end as a [`SimStream`].
//!
//! Each [`SimPeer::send`] call is delivered as one read on the server side
//! (split only if it exceeds the reader's buffer), which makes "bytes that
//! arrive in the same read" controllable from tests.

use std::{
    collections::VecDeque,
    io,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use tickbox_app::{Acceptor, DuplexStream, PollResult};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// One connection's state, shared by its two ends.
#[derive(Default)]
struct Pipe {
    /// Segments sent by the peer, one per server-side read.
    inbound: VecDeque<Vec<u8>>,
    /// Bytes written by the server.
    outbound: Vec<u8>,
    /// Peer sent FIN.
    peer_closed: bool,
    /// Server dropped its end.
    server_closed: bool,
}

/// Listener bookkeeping.
#[derive(Default)]
struct Backlog {
    pending: VecDeque<Arc<Mutex<Pipe>>>,
    open: usize,
    max_open: usize,
    accepted: usize,
    accept_calls: usize,
}

/// In-memory listening endpoint.
///
/// Clones share state, like [`crate::SimDriver`].
#[derive(Clone, Default)]
pub struct SimAcceptor {
    backlog: Arc<Mutex<Backlog>>,
}

impl SimAcceptor {
    /// Create an acceptor with an empty backlog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a connection. It waits in the backlog until accepted.
    pub fn connect(&self) -> SimPeer {
        let pipe = Arc::new(Mutex::new(Pipe::default()));
        lock(&self.backlog).pending.push_back(Arc::clone(&pipe));
        SimPeer { pipe }
    }

    /// Connections accepted and not yet closed by the server.
    pub fn open_connections(&self) -> usize {
        lock(&self.backlog).open
    }

    /// Highest number of simultaneously open connections observed.
    pub fn max_open_connections(&self) -> usize {
        lock(&self.backlog).max_open
    }

    /// Total connections accepted.
    pub fn accepted(&self) -> usize {
        lock(&self.backlog).accepted
    }

    /// Connections still waiting in the backlog.
    pub fn pending(&self) -> usize {
        lock(&self.backlog).pending.len()
    }

    /// Number of times the runtime polled for a connection.
    pub fn accept_calls(&self) -> usize {
        lock(&self.backlog).accept_calls
    }
}

impl Acceptor for SimAcceptor {
    type Stream = SimStream;

    fn try_accept(&mut self) -> Option<SimStream> {
        let mut backlog = lock(&self.backlog);
        backlog.accept_calls += 1;

        let pipe = backlog.pending.pop_front()?;
        backlog.open += 1;
        backlog.accepted += 1;
        backlog.max_open = backlog.max_open.max(backlog.open);
        tracing::trace!(open = backlog.open, "sim connection accepted");

        Some(SimStream { pipe, backlog: Arc::clone(&self.backlog) })
    }
}

/// Server end of a simulated connection.
///
/// Dropping it closes the connection, as closing a socket would.
pub struct SimStream {
    pipe: Arc<Mutex<Pipe>>,
    backlog: Arc<Mutex<Backlog>>,
}

impl DuplexStream for SimStream {
    fn try_read(&mut self, buf: &mut [u8]) -> PollResult<usize> {
        let mut pipe = lock(&self.pipe);

        let Some(segment) = pipe.inbound.front_mut() else {
            return if pipe.peer_closed { PollResult::Closed } else { PollResult::WouldBlock };
        };

        let n = segment.len().min(buf.len());
        buf[..n].copy_from_slice(&segment[..n]);
        segment.drain(..n);
        if segment.is_empty() {
            pipe.inbound.pop_front();
        }

        PollResult::Ready(n)
    }

    fn try_write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        lock(&self.pipe).outbound.extend_from_slice(bytes);
        Ok(bytes.len())
    }
}

impl Drop for SimStream {
    fn drop(&mut self) {
        lock(&self.pipe).server_closed = true;
        let mut backlog = lock(&self.backlog);
        backlog.open = backlog.open.saturating_sub(1);
    }
}

/// Remote end of a simulated connection, held by the test.
pub struct SimPeer {
    pipe: Arc<Mutex<Pipe>>,
}

impl SimPeer {
    /// Send bytes. They arrive together in one server-side read.
    ///
    /// Empty sends are dropped; a zero-length segment is not data.
    pub fn send(&self, bytes: &[u8]) {
        if bytes.is_empty() {
            return;
        }
        lock(&self.pipe).inbound.push_back(bytes.to_vec());
    }

    /// Shut down the peer's side (FIN). Already-sent data is still readable.
    pub fn close(&self) {
        lock(&self.pipe).peer_closed = true;
    }

    /// Everything the server has written so far.
    pub fn received(&self) -> Vec<u8> {
        lock(&self.pipe).outbound.clone()
    }

    /// Received bytes as text (lossy).
    pub fn received_text(&self) -> String {
        String::from_utf8_lossy(&self.received()).into_owned()
    }

    /// Take everything the server has written so far.
    pub fn take_received(&self) -> Vec<u8> {
        std::mem::take(&mut lock(&self.pipe).outbound)
    }

    /// Check if the server closed its end.
    pub fn is_closed_by_server(&self) -> bool {
        lock(&self.pipe).server_closed
    }
}
