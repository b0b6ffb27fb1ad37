//! Fibonacci producers over crossbeam channels.
//!
//! [`fibonacci`] pushes a fixed number of terms and closes the channel by
//! dropping its sender. [`fibonacci_until_quit`] keeps offering terms until a
//! quit signal wins the `select!`.

use crossbeam::channel::{bounded, Receiver, Sender};
use crossbeam::select;
use log::{debug, trace};
use std::thread::{self, JoinHandle};

// =============================================================================
// Generator state
// =============================================================================

/// `(current, next)` pair advanced by `a(k) = a(k-1) + a(k-2)`, starting at `(0, 1)`.
///
/// Never runs dry: past a(93) the terms wrap modulo 2^64.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fibonacci {
    current: u64,
    next: u64,
}

impl Fibonacci {
    pub fn new() -> Self {
        Fibonacci { current: 0, next: 1 }
    }
}

impl Default for Fibonacci {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for Fibonacci {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        let term = self.current;
        self.current = self.next;
        self.next = term.wrapping_add(self.next);
        Some(term)
    }
}

// =============================================================================
// Bounded producer
// =============================================================================

/// Sends the first `n` terms on `tx`, then drops `tx` so receivers see the
/// channel close. Returns how many terms were delivered.
pub fn fibonacci(n: usize, tx: Sender<u64>) -> usize {
    debug!("fibonacci producer started for {n} terms");
    let mut sent = 0;
    for term in Fibonacci::new().take(n) {
        if tx.send(term).is_err() {
            debug!("fibonacci receiver hung up after {sent} terms");
            break;
        }
        sent += 1;
    }
    drop(tx);
    debug!("fibonacci producer closed after {sent} terms");
    sent
}

/// Runs [`fibonacci`] on its own thread over a channel of `capacity`.
pub fn spawn_fibonacci(n: usize, capacity: usize) -> (Receiver<u64>, JoinHandle<usize>) {
    let (tx, rx) = bounded(capacity);
    let handle = thread::spawn(move || fibonacci(n, tx));
    (rx, handle)
}

// =============================================================================
// Select-driven producer
// =============================================================================

/// Offers terms on `tx` until something arrives on `quit` (or either side
/// disconnects). When both are ready the choice is random. Returns the number
/// of terms sent.
pub fn fibonacci_until_quit<Q>(tx: &Sender<u64>, quit: &Receiver<Q>) -> usize {
    let mut terms = Fibonacci::new();
    let mut sent = 0;

    loop {
        let Some(term) = terms.next() else {
            return sent;
        };
        select! {
            send(tx, term) -> res => {
                if res.is_err() {
                    debug!("select producer output disconnected after {sent} terms");
                    return sent;
                }
                trace!("select producer sent {term}");
                sent += 1;
            }
            recv(quit) -> _ => {
                debug!("select producer quit after {sent} terms");
                return sent;
            }
        }
    }
}
