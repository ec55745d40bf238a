//! Generic runtime for the counter box.
//!
//! The Runtime drives the event loop on a single thread, coordinating between:
//! - [`App`]: counter state machine
//! - [`ConnectionSlot`]: the one accepted client
//! - [`Driver`]: keyboard, display and sleep
//! - [`Acceptor`]: the listening socket
//!
//! Every source is polled without blocking once per iteration. The sleep at
//! the end of the iteration is the only point where the thread suspends.

use std::time::Duration;

use crate::{Acceptor, App, AppAction, AppEvent, ChannelEvent, ConnectionSlot, Driver};

/// Fixed duration of one loop iteration.
pub const TICK_PERIOD: Duration = Duration::from_millis(100);

/// Generic runtime that orchestrates App, Driver and Acceptor.
///
/// # Type Parameters
///
/// - `D`: Platform-specific keyboard and display
/// - `A`: Listening endpoint producing client streams
pub struct Runtime<D, A>
where
    D: Driver,
    A: Acceptor,
{
    driver: D,
    acceptor: A,
    slot: ConnectionSlot<A::Stream>,
    app: App,
    tick_period: Duration,
}

impl<D, A> Runtime<D, A>
where
    D: Driver,
    A: Acceptor,
{
    /// Create a new runtime with an empty slot and the counter at zero.
    pub fn new(driver: D, acceptor: A) -> Self {
        Self {
            driver,
            acceptor,
            slot: ConnectionSlot::default(),
            app: App::new(),
            tick_period: TICK_PERIOD,
        }
    }

    /// Override the tick period.
    #[must_use]
    pub fn with_tick_period(mut self, tick_period: Duration) -> Self {
        self.tick_period = tick_period;
        self
    }

    /// Run the main event loop until a quit command is seen.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver's keyboard or display fails. Socket
    /// failures never end the loop.
    pub fn run(mut self) -> Result<(), D::Error> {
        tracing::debug!(tick_ms = self.tick_period.as_millis(), "event loop started");

        while !self.step()? {}

        if self.slot.clear() {
            tracing::info!("client closed on shutdown");
        }
        tracing::debug!(counter = self.app.counter(), "event loop finished");
        Ok(())
    }

    /// Process one iteration of the event loop.
    ///
    /// Order: accept, shutdown check and keyboard, client, render, then (unless quitting) sleep
    /// and tick. Returns `true` if the application should quit.
    pub fn step(&mut self) -> Result<bool, D::Error> {
        let mut quit = false;

        if self.slot.try_fill(&mut self.acceptor) {
            tracing::info!("client connected");
            let actions = self.app.handle(AppEvent::ClientConnected);
            quit |= self.process_actions(actions);
        }

        if self.driver.shutdown_requested() {
            let actions = self.app.handle(AppEvent::Shutdown);
            quit |= self.process_actions(actions);
        }

        if let Some(byte) = self.driver.poll_byte()?.ready() {
            let actions = self.app.handle(AppEvent::Key(byte));
            quit |= self.process_actions(actions);
        }

        let client_event = match self.slot.channel_mut().map(|channel| channel.try_read()) {
            Some(ChannelEvent::Terminator) => Some(AppEvent::ClientTerminator),
            Some(ChannelEvent::Closed) => Some(AppEvent::ClientClosed),
            Some(ChannelEvent::Data | ChannelEvent::Idle) | None => None,
        };
        if let Some(event) = client_event {
            let actions = self.app.handle(event);
            quit |= self.process_actions(actions);
        }

        self.driver.render(&self.app)?;

        if quit {
            return Ok(true);
        }

        self.driver.sleep(self.tick_period);
        let actions = self.app.handle(AppEvent::Tick);
        Ok(self.process_actions(actions))
    }

    /// Execute actions returned by the App.
    ///
    /// Returns `true` if should quit.
    fn process_actions(&mut self, actions: Vec<AppAction>) -> bool {
        let mut quit = false;

        for action in actions {
            match action {
                AppAction::Quit => quit = true,
                AppAction::SendCounter { value } => match self.slot.channel_mut() {
                    Some(channel) => channel.send(value),
                    None => tracing::debug!(value, "no client connected, send dropped"),
                },
                AppAction::Disconnect => {
                    if self.slot.clear() {
                        tracing::info!("client disconnected");
                    }
                },
            }
        }

        quit
    }

    /// Get a reference to the App
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Get a reference to the driver
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Get a reference to the acceptor
    pub fn acceptor(&self) -> &A {
        &self.acceptor
    }

    /// Check if a client occupies the slot.
    pub fn is_connected(&self) -> bool {
        self.slot.is_connected()
    }
}
