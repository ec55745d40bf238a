//! Application state machine.
//!
//! This module defines the [`App`] state machine, which owns the counter and
//! the App's view of the client connection, completely decoupled from the
//! terminal and the socket.
//!
//! This is a pure state machine: it consumes [`crate::AppEvent`] inputs and
//! produces [`crate::AppAction`] instructions for the runtime to execute.

use crate::{AppAction, AppEvent, ConnectionState, Counter, KeyCommand};

/// Width of the right-justified counter field in the box.
pub const COUNTER_FIELD_WIDTH: usize = 4;

/// Application state machine.
///
/// Pure state machine that processes events and produces actions.
/// No I/O dependencies - fully testable in simulation.
#[derive(Debug, Clone, Default)]
pub struct App {
    /// Tick counter.
    counter: Counter,
    /// Whether a client occupies the slot.
    connection: ConnectionState,
    /// Set once a quit command was seen.
    quit_requested: bool,
}

impl App {
    /// Create a new App with the counter at zero and no client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Process an event and return actions.
    pub fn handle(&mut self, event: AppEvent) -> Vec<AppAction> {
        match event {
            AppEvent::Key(byte) => match KeyCommand::from_byte(byte) {
                Some(KeyCommand::Quit) => self.quit(),
                Some(KeyCommand::Reset) => {
                    self.counter.reset();
                    vec![]
                },
                Some(KeyCommand::SendCounter) => self.send_counter(),
                None => vec![],
            },
            AppEvent::Tick => {
                self.counter.tick();
                vec![]
            },
            AppEvent::ClientConnected => {
                self.connection = ConnectionState::Connected;
                vec![]
            },
            AppEvent::ClientTerminator => self.send_counter(),
            AppEvent::ClientClosed => {
                self.connection = ConnectionState::NoClient;
                vec![AppAction::Disconnect]
            },
            AppEvent::Shutdown => {
                tracing::info!("shutdown requested");
                self.quit()
            },
        }
    }

    /// Request a send of the current counter value.
    ///
    /// No-op when no client is connected.
    pub fn send_counter(&self) -> Vec<AppAction> {
        if self.connection.is_connected() {
            vec![AppAction::SendCounter { value: self.counter.value() }]
        } else {
            tracing::trace!("send requested with no client connected");
            vec![]
        }
    }

    /// Quit the application.
    pub fn quit(&mut self) -> Vec<AppAction> {
        self.quit_requested = true;
        vec![AppAction::Quit]
    }

    /// Current counter value.
    pub fn counter(&self) -> u32 {
        self.counter.value()
    }

    /// Counter value right-justified to [`COUNTER_FIELD_WIDTH`] columns.
    pub fn counter_field(&self) -> String {
        format!("{:>width$}", self.counter.value(), width = COUNTER_FIELD_WIDTH)
    }

    /// Current connection state.
    pub fn connection_state(&self) -> ConnectionState {
        self.connection
    }

    /// Check if a quit command was seen.
    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }
}
