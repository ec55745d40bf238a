//! Simulation driver implementing the Driver trait.
//!
//! `SimDriver` provides the same interface as the terminal driver but for
//! deterministic testing. Keys are injected from the test, every render is
//! recorded, and sleeping only accumulates virtual time.

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use tickbox_app::{App, ByteSource, Driver, PollResult};

/// Error type for simulation driver.
#[derive(Debug, Clone)]
pub struct SimDriverError(pub String);

impl std::fmt::Display for SimDriverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SimDriverError: {}", self.0)
    }
}

impl std::error::Error for SimDriverError {}

/// Shared state for key injection and inspection.
#[derive(Default)]
struct SharedState {
    pending_keys: VecDeque<u8>,
    keyboard_failure: Option<String>,
    shutdown: bool,
    rendered: Vec<String>,
    slept: Duration,
    sleeps: usize,
}

/// Simulation driver for deterministic testing.
///
/// Clones share state: keep one clone in the test and hand the other to the
/// [`tickbox_app::Runtime`].
#[derive(Clone, Default)]
pub struct SimDriver {
    state: Arc<Mutex<SharedState>>,
}

impl SimDriver {
    /// Create a new simulation driver.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, SharedState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queue a key byte. One key is consumed per iteration.
    pub fn inject_key(&self, key: u8) {
        self.lock().pending_keys.push_back(key);
    }

    /// Queue every byte of `keys` in order.
    pub fn inject_keys(&self, keys: &[u8]) {
        self.lock().pending_keys.extend(keys.iter().copied());
    }

    /// Make the next keyboard poll fail.
    pub fn fail_keyboard(&self, reason: impl Into<String>) {
        self.lock().keyboard_failure = Some(reason.into());
    }

    /// Simulate a termination signal from the host.
    pub fn request_shutdown(&self) {
        self.lock().shutdown = true;
    }

    /// Check if there are keys waiting to be polled.
    pub fn has_pending(&self) -> bool {
        !self.lock().pending_keys.is_empty()
    }

    /// Every counter field rendered so far, oldest first.
    pub fn rendered(&self) -> Vec<String> {
        self.lock().rendered.clone()
    }

    /// Most recently rendered counter field.
    pub fn last_rendered(&self) -> Option<String> {
        self.lock().rendered.last().cloned()
    }

    /// Total virtual time slept.
    pub fn slept(&self) -> Duration {
        self.lock().slept
    }

    /// Number of sleeps (completed ticks).
    pub fn sleeps(&self) -> usize {
        self.lock().sleeps
    }
}

impl ByteSource for SimDriver {
    type Error = SimDriverError;

    fn poll_byte(&mut self) -> Result<PollResult<u8>, Self::Error> {
        let mut state = self.lock();

        if let Some(reason) = state.keyboard_failure.take() {
            return Err(SimDriverError(reason));
        }

        Ok(state.pending_keys.pop_front().map_or(PollResult::WouldBlock, PollResult::Ready))
    }
}

impl Driver for SimDriver {
    fn render(&mut self, app: &App) -> Result<(), Self::Error> {
        self.lock().rendered.push(app.counter_field());
        Ok(())
    }

    fn sleep(&mut self, period: Duration) {
        let mut state = self.lock();
        state.slept += period;
        state.sleeps += 1;
    }

    fn shutdown_requested(&mut self) -> bool {
        self.lock().shutdown
    }
}
