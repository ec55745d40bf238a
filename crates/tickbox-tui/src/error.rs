//! Error types for the terminal frontend.

use std::{io, net::SocketAddr};

use thiserror::Error;

/// Terminal frontend errors.
///
/// Only startup and terminal failures surface here. Per-tick socket
/// conditions are absorbed by the event loop.
#[derive(Debug, Error)]
pub enum TuiError {
    /// The listening socket could not be created, bound or put into listen.
    ///
    /// Fatal: the advertised port is the whole point of the program.
    #[error("failed to listen on {addr}: {source}")]
    Bind {
        /// Requested listen address.
        addr: SocketAddr,
        /// Underlying OS error.
        source: io::Error,
    },

    /// The listening socket could not be switched to non-blocking mode.
    #[error("failed to make listener non-blocking: {0}")]
    NonBlocking(io::Error),

    /// Termination signal handlers could not be installed.
    #[error("failed to install signal handlers: {0}")]
    Signals(io::Error),

    /// I/O error from terminal operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
