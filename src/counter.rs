//! Shared state with locks: a string-keyed counter behind a `Mutex`.
//!
//! Every read and write of the map happens while the lock is held, so
//! concurrent increments are never lost. The counter is an ordinary value:
//! share it by reference from scoped threads or wrap it in an `Arc`.

use log::warn;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
pub struct SafeCounter {
    counts: Mutex<HashMap<String, u64>>,
}

impl SafeCounter {
    pub fn new() -> Self {
        SafeCounter {
            counts: Mutex::new(HashMap::new()),
        }
    }

    /// Adds one to `key` and returns the new count.
    pub fn increment(&self, key: &str) -> u64 {
        let mut counts = self.lock();
        let count = counts.entry(key.to_string()).or_insert(0);
        *count += 1;
        *count
    }

    /// Current count for `key`; zero if it was never incremented.
    pub fn value(&self, key: &str) -> u64 {
        self.lock().get(key).copied().unwrap_or(0)
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.lock().len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // A panic in another holder cannot leave the map half-updated (the only
    // mutation is a single `+= 1`), so the poisoned guard is still usable.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, u64>> {
        self.counts.lock().unwrap_or_else(|poisoned: PoisonError<_>| {
            warn!("counter lock was poisoned; recovering");
            poisoned.into_inner()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_missing_key_reads_zero() {
        let counter = SafeCounter::new();
        assert_eq!(counter.value("never"), 0);
        assert!(counter.is_empty());
    }

    #[test]
    fn test_increment_returns_new_count() {
        let counter = SafeCounter::new();
        assert_eq!(counter.increment("a"), 1);
        assert_eq!(counter.increment("a"), 2);
        assert_eq!(counter.increment("b"), 1);
        assert_eq!(counter.value("a"), 2);
        assert_eq!(counter.len(), 2);
    }

    #[test]
    fn test_thousand_concurrent_increments() {
        let counter = SafeCounter::new();
        thread::scope(|s| {
            for _ in 0..1000 {
                s.spawn(|| {
                    counter.increment("x");
                });
            }
        });
        assert_eq!(counter.value("x"), 1000);
    }

    #[test]
    fn test_shared_through_arc() {
        let counter = Arc::new(SafeCounter::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let counter = Arc::clone(&counter);
                thread::spawn(move || {
                    for _ in 0..250 {
                        counter.increment("somekey");
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(counter.value("somekey"), 2000);
    }

    #[test]
    fn test_keys_are_independent() {
        let counter = SafeCounter::new();
        thread::scope(|s| {
            for i in 0..10 {
                let counter = &counter;
                s.spawn(move || {
                    let key = if i % 2 == 0 { "even" } else { "odd" };
                    counter.increment(key);
                });
            }
        });
        assert_eq!(counter.value("even"), 5);
        assert_eq!(counter.value("odd"), 5);
    }

    #[test]
    fn test_survives_poisoned_lock() {
        let counter = Arc::new(SafeCounter::new());
        counter.increment("k");

        let poisoner = Arc::clone(&counter);
        let _ = thread::spawn(move || {
            let _guard = poisoner.counts.lock().unwrap();
            panic!("poison the lock");
        })
        .join();

        assert_eq!(counter.increment("k"), 2);
        assert_eq!(counter.value("k"), 2);
    }

    proptest! {
        #[test]
        fn prop_no_lost_updates(threads in 0usize..16, per_thread in 0u64..50) {
            let counter = SafeCounter::new();
            thread::scope(|s| {
                for _ in 0..threads {
                    s.spawn(|| {
                        for _ in 0..per_thread {
                            counter.increment("key");
                        }
                    });
                }
            });
            prop_assert_eq!(counter.value("key"), threads as u64 * per_thread);
        }

        #[test]
        fn prop_untouched_keys_read_zero(key in "[a-z]{1,8}") {
            let counter = SafeCounter::new();
            counter.increment("0-not-a-letter");
            prop_assert_eq!(counter.value(&key), 0);
        }
    }
}
