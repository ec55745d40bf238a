//! Application layer for tickbox
//!
//! Pure state machines and a generic event loop for the counter box, enabling
//! deterministic simulation testing with the same code that runs against a
//! real terminal and a real TCP socket.
//!
//! # Components
//!
//! - [`App`]: counter state machine (key commands, client notifications)
//! - [`ClientChannel`] / [`ConnectionSlot`]: the single accepted client
//! - [`ByteSource`], [`DuplexStream`], [`Acceptor`]: non-blocking I/O
//!   capabilities implemented once per backend
//! - [`Driver`]: keyboard, display and sleep of the hosting platform
//! - [`Runtime`]: the tick-driven orchestration loop

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod app;
mod channel;
mod counter;
mod driver;
mod event;
mod input;
mod runtime;
mod slot;
mod source;
mod state;

pub use action::AppAction;
pub use app::{App, COUNTER_FIELD_WIDTH};
pub use channel::{ChannelEvent, ClientChannel, READ_BUFFER_LEN, TERMINATOR, encode_counter};
pub use counter::Counter;
pub use driver::Driver;
pub use event::AppEvent;
pub use input::KeyCommand;
pub use runtime::{Runtime, TICK_PERIOD};
pub use slot::ConnectionSlot;
pub use source::{Acceptor, ByteSource, DuplexStream, PollResult};
pub use state::ConnectionState;
