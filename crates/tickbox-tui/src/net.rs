//! Non-blocking TCP listener and client stream.
//!
//! The listener is created through `socket2` so the accept backlog can be
//! held to one pending connection; `std::net` always asks for the OS
//! default. Sockets run in non-blocking mode, which maps to `O_NONBLOCK`
//! sockets on POSIX and `FIONBIO` sockets on Windows. "Not ready" comes back
//! as [`io::ErrorKind::WouldBlock`] on both, and is translated to
//! [`PollResult::WouldBlock`] here so the event loop never sees an error for
//! it.

use std::{
    io::{self, Read, Write},
    net::{SocketAddr, TcpListener, TcpStream},
};

use socket2::{Domain, Protocol, Socket, Type};
use tickbox_app::{Acceptor, DuplexStream, PollResult};

use crate::TuiError;

/// Pending connections the kernel queues beyond the one being served.
pub const ACCEPT_BACKLOG: i32 = 1;

/// Listening endpoint for the single client.
///
/// Created once at startup and kept for the process lifetime.
#[derive(Debug)]
pub struct TcpAcceptor {
    listener: TcpListener,
}

impl TcpAcceptor {
    /// Bind and listen on `addr` with [`ACCEPT_BACKLOG`], then switch to
    /// non-blocking mode.
    ///
    /// # Errors
    ///
    /// Any failure here is fatal for the program: the caller cannot proceed
    /// without its advertised port.
    pub fn bind(addr: SocketAddr) -> Result<Self, TuiError> {
        let socket = listen(addr).map_err(|source| TuiError::Bind { addr, source })?;
        socket.set_nonblocking(true).map_err(TuiError::NonBlocking)?;

        Ok(Self { listener: TcpListener::from(socket) })
    }

    /// Address actually bound (resolves port 0).
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

fn listen(addr: SocketAddr) -> io::Result<Socket> {
    let socket = Socket::new(Domain::for_address(addr), Type::STREAM, Some(Protocol::TCP))?;
    // Same as std: a restart must not wait out TIME_WAIT
    #[cfg(unix)]
    socket.set_reuse_address(true)?;
    socket.bind(&addr.into())?;
    socket.listen(ACCEPT_BACKLOG)?;
    Ok(socket)
}

impl Acceptor for TcpAcceptor {
    type Stream = TcpClient;

    fn try_accept(&mut self) -> Option<TcpClient> {
        match self.listener.accept() {
            Ok((stream, peer)) => match TcpClient::new(stream, peer) {
                Ok(client) => {
                    tracing::info!(%peer, "accepted client");
                    Some(client)
                },
                Err(e) => {
                    tracing::warn!(%peer, error = %e, "non-blocking setup failed, dropping client");
                    None
                },
            },
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => None,
            Err(e) => {
                tracing::debug!(error = %e, "accept failed");
                None
            },
        }
    }
}

/// The accepted client connection in non-blocking mode.
#[derive(Debug)]
pub struct TcpClient {
    stream: TcpStream,
    peer: SocketAddr,
}

impl TcpClient {
    /// Wrap an accepted stream, switching it to non-blocking mode.
    ///
    /// Accepted sockets do not reliably inherit the listener's mode across
    /// platforms, so it is always set explicitly.
    pub fn new(stream: TcpStream, peer: SocketAddr) -> io::Result<Self> {
        stream.set_nonblocking(true)?;
        Ok(Self { stream, peer })
    }

    /// Remote address of the client.
    pub fn peer_addr(&self) -> SocketAddr {
        self.peer
    }
}

impl DuplexStream for TcpClient {
    fn try_read(&mut self, buf: &mut [u8]) -> PollResult<usize> {
        match self.stream.read(buf) {
            Ok(0) => PollResult::Closed,
            Ok(n) => PollResult::Ready(n),
            Err(e)
                if matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted) =>
            {
                PollResult::WouldBlock
            },
            Err(e) => {
                tracing::debug!(peer = %self.peer, error = %e, "read failed");
                PollResult::WouldBlock
            },
        }
    }

    fn try_write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.stream.write(bytes)
    }
}

impl Drop for TcpClient {
    fn drop(&mut self) {
        tracing::debug!(peer = %self.peer, "closing client");
    }
}
