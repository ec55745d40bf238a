//! Deterministic simulation harness for tickbox testing.
//!
//! In-memory implementations of the [`tickbox_app::Driver`] and
//! [`tickbox_app::Acceptor`] traits, so the real [`tickbox_app::Runtime`] can
//! be stepped one iteration at a time with scripted keys, scripted peers and
//! virtual sleep.
//!
//! # Invariant Testing
//!
//! The `invariants` module checks properties that must hold after every
//! iteration (at most one open client, slot and App agree). Use
//! [`InvariantRegistry::standard()`] for the common set.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod invariants;
pub mod sim_driver;
pub mod sim_net;

pub use invariants::{
    Invariant, InvariantRegistry, InvariantResult, SingleClient, SlotMatchesApp, SystemSnapshot,
    Violation,
};
pub use sim_driver::{SimDriver, SimDriverError};
pub use sim_net::{SimAcceptor, SimPeer, SimStream};
