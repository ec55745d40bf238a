//! Terminal UI for tickbox
//!
//! Production backends for the generic [`tickbox_app::Runtime`]: a crossterm
//! keyboard and box renderer behind [`TerminalDriver`], termination signals
//! behind [`ShutdownSignal`], and a non-blocking TCP listener with a backlog
//! of one behind [`TcpAcceptor`]. All orchestration logic lives in
//! `tickbox-app`.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod config;
pub mod error;
pub mod keyboard;
pub mod net;
pub mod render;
pub mod signals;
pub mod terminal;

use tickbox_app::Runtime;

pub use config::Config;
pub use error::TuiError;
pub use keyboard::Keyboard;
pub use net::{TcpAcceptor, TcpClient};
pub use render::BoxGeometry;
pub use signals::ShutdownSignal;
pub use terminal::{RawModeGuard, Screen, TerminalDriver};

/// Bind the listener, take over the terminal and run until quit.
///
/// The listener is bound and the signal handlers installed before the
/// terminal is touched, so a startup failure leaves the screen alone. The
/// terminal is restored on every exit path.
pub fn run(config: &Config) -> Result<(), TuiError> {
    let acceptor = TcpAcceptor::bind(config.listen_addr())?;
    tracing::info!(addr = %acceptor.local_addr()?, "listening for a client");

    let shutdown = ShutdownSignal::register().map_err(TuiError::Signals)?;
    let driver = TerminalDriver::new(config.geometry, shutdown)?;
    Runtime::new(driver, acceptor).with_tick_period(config.tick_period).run()
}
