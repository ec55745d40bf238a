//! Observable application state types.

/// Client connection state as seen by the App.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConnectionState {
    /// Slot is empty; the listener is accepting.
    #[default]
    NoClient,
    /// One client is being served.
    Connected,
}

impl ConnectionState {
    /// Check if a client is being served.
    pub fn is_connected(self) -> bool {
        matches!(self, Self::Connected)
    }
}
