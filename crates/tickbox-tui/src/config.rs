//! Runtime configuration.

use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    time::Duration,
};

use tickbox_app::TICK_PERIOD;

use crate::BoxGeometry;

/// Default listening port.
pub const DEFAULT_PORT: u16 = 7777;

/// Configuration for [`crate::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Interface to listen on.
    pub bind: IpAddr,
    /// TCP port to listen on.
    pub port: u16,
    /// Duration of one loop iteration.
    pub tick_period: Duration,
    /// Where the box is drawn.
    pub geometry: BoxGeometry,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            tick_period: TICK_PERIOD,
            geometry: BoxGeometry::default(),
        }
    }
}

impl Config {
    /// Address the listener binds to.
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }
}
