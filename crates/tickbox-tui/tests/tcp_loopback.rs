//! Loopback tests for the TCP acceptor and client stream.
//!
//! Real sockets on 127.0.0.1 with an ephemeral port. Non-blocking results
//! are polled with a bounded number of short sleeps.

use std::{
    convert::Infallible,
    io::{Read, Write},
    net::{SocketAddr, TcpStream},
    thread,
    time::Duration,
};

use tickbox_app::{
    Acceptor, App, ByteSource, ChannelEvent, ClientChannel, Driver, PollResult, Runtime,
};
use tickbox_tui::{TcpAcceptor, TcpClient, TuiError};

const RETRIES: usize = 200;
const RETRY_DELAY: Duration = Duration::from_millis(5);

fn loopback() -> (TcpAcceptor, SocketAddr) {
    let acceptor = TcpAcceptor::bind("127.0.0.1:0".parse().unwrap()).unwrap();
    let addr = acceptor.local_addr().unwrap();
    (acceptor, addr)
}

fn accept(acceptor: &mut TcpAcceptor) -> TcpClient {
    for _ in 0..RETRIES {
        if let Some(client) = acceptor.try_accept() {
            return client;
        }
        thread::sleep(RETRY_DELAY);
    }
    panic!("no connection accepted");
}

fn wait_for(channel: &mut ClientChannel<TcpClient>, wanted: ChannelEvent) {
    for _ in 0..RETRIES {
        let event = channel.try_read();
        if event == wanted {
            return;
        }
        thread::sleep(RETRY_DELAY);
    }
    panic!("never saw {wanted:?}");
}

fn read_reply(peer: &mut TcpStream, len: usize) -> String {
    peer.set_read_timeout(Some(Duration::from_secs(2))).unwrap();
    let mut buf = vec![0u8; len];
    peer.read_exact(&mut buf).unwrap();
    String::from_utf8(buf).unwrap()
}

#[test]
fn nothing_pending_accepts_nothing() {
    let (mut acceptor, _) = loopback();
    assert!(acceptor.try_accept().is_none());
}

#[test]
fn terminator_reply_and_close() {
    let (mut acceptor, addr) = loopback();
    let mut peer = TcpStream::connect(addr).unwrap();
    let mut channel = ClientChannel::new(accept(&mut acceptor));
    assert_eq!(channel.stream().peer_addr(), peer.local_addr().unwrap());

    assert_eq!(channel.try_read(), ChannelEvent::Idle);

    peer.write_all(b"ping\r").unwrap();
    wait_for(&mut channel, ChannelEvent::Terminator);

    channel.send(42);
    assert_eq!(read_reply(&mut peer, 4), "42\r\n");

    drop(peer);
    wait_for(&mut channel, ChannelEvent::Closed);
}

#[test]
fn closing_channel_closes_peer() {
    let (mut acceptor, addr) = loopback();
    let mut peer = TcpStream::connect(addr).unwrap();
    let channel = ClientChannel::new(accept(&mut acceptor));

    channel.close();

    peer.set_read_timeout(Some(Duration::from_secs(2))).unwrap();
    let mut buf = [0u8; 8];
    assert_eq!(peer.read(&mut buf).unwrap(), 0);
}

#[test]
fn port_in_use_is_a_bind_error() {
    let (_first, addr) = loopback();
    let err = TcpAcceptor::bind(addr).unwrap_err();
    assert!(matches!(err, TuiError::Bind { addr: a, .. } if a == addr));
}

#[cfg(target_os = "linux")]
#[test]
fn handshakes_beyond_backlog_do_not_complete() {
    let (mut acceptor, addr) = loopback();

    let mut queued = Vec::new();
    for _ in 0..6 {
        if let Ok(stream) = TcpStream::connect_timeout(&addr, Duration::from_millis(300)) {
            queued.push(stream);
        }
    }

    // Linux admits backlog + 1 completed connections to the accept queue
    assert!(!queued.is_empty());
    assert!(queued.len() <= 2, "{} handshakes completed without accept", queued.len());

    let _served = accept(&mut acceptor);
}

/// Headless driver: no keys, counts renders, never sleeps.
#[derive(Default)]
struct Headless {
    renders: usize,
}

impl ByteSource for Headless {
    type Error = Infallible;

    fn poll_byte(&mut self) -> Result<PollResult<u8>, Infallible> {
        Ok(PollResult::WouldBlock)
    }
}

impl Driver for Headless {
    fn render(&mut self, _app: &App) -> Result<(), Infallible> {
        self.renders += 1;
        Ok(())
    }

    fn sleep(&mut self, _period: Duration) {}
}

fn step_until<F>(runtime: &mut Runtime<Headless, TcpAcceptor>, mut done: F)
where
    F: FnMut(&Runtime<Headless, TcpAcceptor>) -> bool,
{
    for _ in 0..RETRIES {
        assert!(!runtime.step().unwrap());
        if done(runtime) {
            return;
        }
        thread::sleep(RETRY_DELAY);
    }
    panic!("condition never reached");
}

#[test]
fn runtime_serves_a_real_client() {
    let (acceptor, addr) = loopback();
    let mut runtime = Runtime::new(Headless::default(), acceptor).with_tick_period(Duration::ZERO);

    let mut peer = TcpStream::connect(addr).unwrap();
    step_until(&mut runtime, |rt| rt.is_connected());

    let before = runtime.app().counter();
    peer.write_all(b"\r").unwrap();
    peer.set_nonblocking(true).unwrap();

    let mut reply = Vec::new();
    step_until(&mut runtime, |_| {
        let mut buf = [0u8; 16];
        if let Ok(n) = peer.read(&mut buf) {
            reply.extend_from_slice(&buf[..n]);
        }
        reply.ends_with(b"\r\n")
    });

    let reply = String::from_utf8(reply).unwrap();
    let value: u32 = reply.trim_end().parse().unwrap();
    assert!(value >= before, "reply {reply:?} before {before}");
    assert!(value <= runtime.app().counter());

    drop(peer);
    step_until(&mut runtime, |rt| !rt.is_connected());
    assert!(runtime.driver().renders > 0);
}
