//! Property-based tests for the event loop.
//!
//! Tests verify that invariants hold under arbitrary sequences of key
//! presses, client connects, client sends and client closes.

use proptest::prelude::*;
use tickbox_app::Runtime;
use tickbox_harness::{InvariantRegistry, SimAcceptor, SimDriver, SimPeer, SystemSnapshot};

/// One thing that happens between two iterations.
#[derive(Debug, Clone)]
enum Operation {
    Key(u8),
    Connect,
    Send { peer: usize, bytes: Vec<u8> },
    Close { peer: usize },
    Step,
}

fn operation_strategy() -> impl Strategy<Value = Operation> {
    prop_oneof![
        2 => prop::sample::select(vec![b'r', b'R', b'w', b'x', b' ']).prop_map(Operation::Key),
        2 => Just(Operation::Connect),
        3 => (0usize..8, prop::collection::vec(any::<u8>(), 1..24))
            .prop_map(|(peer, bytes)| Operation::Send { peer, bytes }),
        1 => (0usize..8).prop_map(|peer| Operation::Close { peer }),
        4 => Just(Operation::Step),
    ]
}

/// Non-terminator payload with terminators spliced in at arbitrary positions.
fn read_with_terminators() -> impl Strategy<Value = Vec<u8>> {
    (
        prop::collection::vec(any::<u8>().prop_filter("not CR", |b| *b != b'\r'), 0..15),
        prop::collection::vec(any::<prop::sample::Index>(), 1..4),
    )
        .prop_map(|(mut bytes, positions)| {
            for position in positions {
                let at = position.index(bytes.len() + 1);
                bytes.insert(at, b'\r');
            }
            bytes.truncate(16);
            if !bytes.contains(&b'\r') {
                bytes.push(b'\r');
            }
            bytes
        })
}

fn replies(peer: &SimPeer) -> Vec<String> {
    peer.received_text().split_terminator("\r\n").map(str::to_owned).collect()
}

proptest! {
    #[test]
    fn prop_never_more_than_one_client(ops in prop::collection::vec(operation_strategy(), 0..80)) {
        let driver = SimDriver::new();
        let acceptor = SimAcceptor::new();
        let mut runtime = Runtime::new(driver.clone(), acceptor.clone());
        let invariants = InvariantRegistry::standard();
        let mut peers: Vec<SimPeer> = Vec::new();

        for op in ops {
            match op {
                Operation::Key(key) => driver.inject_key(key),
                Operation::Connect => peers.push(acceptor.connect()),
                Operation::Send { peer, bytes } => {
                    if let Some(peer) = peers.get(peer) {
                        peer.send(&bytes);
                    }
                },
                Operation::Close { peer } => {
                    if let Some(peer) = peers.get(peer) {
                        peer.close();
                    }
                },
                Operation::Step => {
                    prop_assert!(!runtime.step().unwrap());
                    let snapshot = SystemSnapshot::capture(&runtime);
                    prop_assert!(invariants.check_all(&snapshot).is_ok(), "{snapshot:?}");
                },
            }
        }

        prop_assert!(acceptor.max_open_connections() <= 1);
    }

    #[test]
    fn prop_reset_restarts_count(before in 0usize..40, after in 0usize..40) {
        let driver = SimDriver::new();
        let mut runtime = Runtime::new(driver.clone(), SimAcceptor::new());

        for _ in 0..before {
            runtime.step().unwrap();
        }

        driver.inject_key(b'r');
        for _ in 0..=after {
            runtime.step().unwrap();
        }

        let rendered = driver.rendered();
        let since_reset: Vec<u32> =
            rendered[before..].iter().map(|field| field.trim().parse().unwrap()).collect();
        let expected: Vec<u32> = (0..=after as u32).collect();
        prop_assert_eq!(since_reset, expected);
    }

    #[test]
    fn prop_one_reply_per_read(warmup in 0usize..30, read in read_with_terminators()) {
        let driver = SimDriver::new();
        let acceptor = SimAcceptor::new();
        let mut runtime = Runtime::new(driver.clone(), acceptor.clone());
        let peer = acceptor.connect();

        for _ in 0..warmup {
            runtime.step().unwrap();
        }

        peer.send(&read);
        runtime.step().unwrap();

        let rendered = driver.last_rendered().unwrap();
        prop_assert_eq!(replies(&peer), vec![rendered.trim().to_string()]);
    }

    #[test]
    fn prop_closed_client_gets_nothing_more(
        sends_after_close in prop::collection::vec(prop::collection::vec(any::<u8>(), 1..16), 0..5),
        presses in 0usize..5,
    ) {
        let driver = SimDriver::new();
        let acceptor = SimAcceptor::new();
        let mut runtime = Runtime::new(driver.clone(), acceptor.clone());
        let peer = acceptor.connect();

        runtime.step().unwrap();
        peer.close();
        runtime.step().unwrap();
        prop_assert!(!runtime.is_connected());
        prop_assert!(peer.is_closed_by_server());

        for bytes in &sends_after_close {
            peer.send(bytes);
        }
        for _ in 0..presses {
            driver.inject_key(b'w');
        }
        for _ in 0..(presses + sends_after_close.len() + 1) {
            runtime.step().unwrap();
        }

        prop_assert!(peer.received().is_empty());
    }
}
