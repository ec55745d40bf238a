//! Invariant checking for deterministic simulation testing.
//!
//! Invariants are properties that must always hold during system execution.
//! Unlike example-based tests that check specific scenarios, invariants
//! verify behavioral properties across all possible execution paths.
//!
//! # Usage
//!
//! ```ignore
//! let registry = InvariantRegistry::standard();
//! runtime.step()?;
//! registry.assert_all(&SystemSnapshot::capture(&runtime), "after step");
//! ```

use tickbox_app::Runtime;

use crate::{SimAcceptor, SimDriver};

/// Invariant check result.
pub type InvariantResult = Result<(), Violation>;

/// Invariant violation with context.
#[derive(Debug, Clone)]
pub struct Violation {
    /// Name of the violated invariant.
    pub invariant: &'static str,
    /// Description of what went wrong.
    pub message: String,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.invariant, self.message)
    }
}

impl std::error::Error for Violation {}

/// Observable state of a simulated runtime between iterations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemSnapshot {
    /// App believes a client is connected.
    pub app_connected: bool,
    /// Slot holds a channel.
    pub slot_connected: bool,
    /// Server-side connections currently open.
    pub open_connections: usize,
    /// Highest number of simultaneously open connections so far.
    pub max_open_connections: usize,
}

impl SystemSnapshot {
    /// Extract a snapshot from a simulated runtime.
    pub fn capture(runtime: &Runtime<SimDriver, SimAcceptor>) -> Self {
        let acceptor = runtime.acceptor();
        Self {
            app_connected: runtime.app().connection_state().is_connected(),
            slot_connected: runtime.is_connected(),
            open_connections: acceptor.open_connections(),
            max_open_connections: acceptor.max_open_connections(),
        }
    }
}

/// An invariant that can be checked against system state.
pub trait Invariant: Send + Sync {
    /// Invariant name for error reporting.
    fn name(&self) -> &'static str;

    /// Check the invariant against the current state.
    fn check(&self, state: &SystemSnapshot) -> InvariantResult;
}

/// At most one client connection is ever open.
pub struct SingleClient;

impl Invariant for SingleClient {
    fn name(&self) -> &'static str {
        "single_client"
    }

    fn check(&self, state: &SystemSnapshot) -> InvariantResult {
        if state.max_open_connections > 1 {
            return Err(Violation {
                invariant: self.name(),
                message: format!(
                    "{} connections were open at the same time",
                    state.max_open_connections
                ),
            });
        }
        Ok(())
    }
}

/// The App, the slot and the open socket count agree on connectedness.
pub struct SlotMatchesApp;

impl Invariant for SlotMatchesApp {
    fn name(&self) -> &'static str {
        "slot_matches_app"
    }

    fn check(&self, state: &SystemSnapshot) -> InvariantResult {
        let socket_open = state.open_connections == 1;
        if state.app_connected != state.slot_connected || state.slot_connected != socket_open {
            return Err(Violation {
                invariant: self.name(),
                message: format!(
                    "app connected: {}, slot connected: {}, open sockets: {}",
                    state.app_connected, state.slot_connected, state.open_connections
                ),
            });
        }
        Ok(())
    }
}

/// Registry of invariants to check.
pub struct InvariantRegistry {
    invariants: Vec<Box<dyn Invariant>>,
}

impl Default for InvariantRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl InvariantRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self { invariants: Vec::new() }
    }

    /// Create a registry with [`SingleClient`] and [`SlotMatchesApp`].
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.add(SingleClient);
        registry.add(SlotMatchesApp);
        registry
    }

    /// Add an invariant to the registry.
    pub fn add<I: Invariant + 'static>(&mut self, invariant: I) {
        self.invariants.push(Box::new(invariant));
    }

    /// Check all invariants against the given state.
    ///
    /// Returns `Ok(())` if all invariants hold, or all violations found.
    pub fn check_all(&self, state: &SystemSnapshot) -> Result<(), Vec<Violation>> {
        let violations: Vec<_> =
            self.invariants.iter().filter_map(|inv| inv.check(state).err()).collect();

        if violations.is_empty() { Ok(()) } else { Err(violations) }
    }

    /// Check all invariants, panicking on first violation.
    ///
    /// Use this in tests where you want immediate failure with context.
    #[allow(clippy::panic)]
    pub fn assert_all(&self, state: &SystemSnapshot, context: &str) {
        if let Err(violations) = self.check_all(state) {
            let messages: Vec<_> = violations.iter().map(ToString::to_string).collect();
            panic!("Invariant violation {context}:\n  {}", messages.join("\n  "));
        }
    }

    /// Number of registered invariants.
    pub fn len(&self) -> usize {
        self.invariants.len()
    }

    /// Check if registry is empty.
    pub fn is_empty(&self) -> bool {
        self.invariants.is_empty()
    }
}
