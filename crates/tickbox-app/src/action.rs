//! Application side-effects and intents.
//!
//! This module defines the [`AppAction`] enum, which represents instructions
//! produced by the [`crate::App`] state machine for the runtime to execute.

/// Actions produced by the App state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    /// Quit after the current iteration's render.
    Quit,

    /// Send a counter value to the connected client.
    SendCounter {
        /// Value captured when the action was produced.
        value: u32,
    },

    /// Close the client connection and free the slot.
    Disconnect,
}
