//! Threads, channels, a mutex-guarded counter and `select!`.
//!
//! Background work is always joined (or signalled over a channel) before a
//! section returns.

use crate::counter::SafeCounter;
use crate::error::{Result, TourError};
use crate::sequence::{fibonacci_until_quit, spawn_fibonacci};
use crate::tour::Tour;
use crossbeam::channel::{after, bounded, tick, unbounded, Sender};
use crossbeam::select;
use log::debug;
use std::fmt;
use std::io::Write;
use std::thread;
use std::time::Duration;

// =============================================================================
// Threads
// =============================================================================

fn say(word: &str, repeats: usize, delay: Duration, tx: &Sender<String>) {
    for _ in 0..repeats {
        thread::sleep(delay);
        if tx.send(word.to_string()).is_err() {
            return;
        }
    }
}

/// Says `background` on a spawned thread while the caller says `foreground`.
/// Lines come back in arrival order once the spawned thread has been joined.
pub fn say_concurrently(
    background: &str,
    foreground: &str,
    repeats: usize,
    delay: Duration,
) -> Result<Vec<String>> {
    let (tx, rx) = unbounded();

    let worker = {
        let tx = tx.clone();
        let word = background.to_string();
        thread::Builder::new()
            .name(format!("say-{word}"))
            .spawn(move || say(&word, repeats, delay, &tx))
            .map_err(TourError::Spawn)?
    };
    say(foreground, repeats, delay, &tx);
    worker
        .join()
        .map_err(|_| TourError::ThreadPanicked(format!("say-{background}")))?;

    drop(tx);
    Ok(rx.iter().collect())
}

// =============================================================================
// Channels
// =============================================================================

/// Sums each half of `values` on its own thread; both sums arrive over one
/// rendezvous channel, in whichever order the threads finish.
pub fn split_sum(values: &[i64]) -> (i64, i64) {
    let (tx, rx) = bounded(0);
    let (left, right) = values.split_at(values.len() / 2);

    thread::scope(|s| {
        for half in [left, right] {
            let tx = tx.clone();
            s.spawn(move || {
                let sum: i64 = half.iter().sum();
                let _ = tx.send(sum);
            });
        }
        drop(tx);

        let x = rx.recv().unwrap_or_default();
        let y = rx.recv().unwrap_or_default();
        (x, y)
    })
}

/// Queues every value on a channel of `capacity` without a receiver running,
/// then reads them back. Fails if the buffer cannot hold them all.
pub fn fill_then_drain(capacity: usize, values: &[i32]) -> Result<Vec<i32>> {
    let (tx, rx) = bounded(capacity);
    for &value in values {
        tx.try_send(value).map_err(|e| TourError::channel("buffered", e))?;
    }
    values
        .iter()
        .map(|_| rx.recv().map_err(|e| TourError::channel("buffered", e)))
        .collect()
}

// =============================================================================
// Mutex-guarded counter
// =============================================================================

/// Spreads `increments` of one key across a fixed set of workers sharing a
/// [`SafeCounter`]. Returns the final count.
pub fn count_concurrently(increments: usize, key: &str) -> Result<u64> {
    let counter = SafeCounter::new();
    let workers = thread::available_parallelism()
        .map_or(4, |n| n.get())
        .min(increments.max(1));

    thread::scope(|s| -> Result<()> {
        for worker in 0..workers {
            let share = increments / workers + usize::from(worker < increments % workers);
            let counter = &counter;
            thread::Builder::new()
                .name(format!("counter-{worker}"))
                .spawn_scoped(s, move || {
                    for _ in 0..share {
                        counter.increment(key);
                    }
                })
                .map_err(TourError::Spawn)?;
        }
        Ok(())
    })?;

    debug!("{workers} workers counted {increments} increments");
    Ok(counter.value(key))
}

// =============================================================================
// Select with a default branch
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    Tick,
    Boom,
    Idle,
}

impl fmt::Display for TimerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimerEvent::Tick => write!(f, "tick."),
            TimerEvent::Boom => write!(f, "BOOM!"),
            TimerEvent::Idle => write!(f, ". . ."),
        }
    }
}

/// Polls a periodic ticker and a one-shot deadline without blocking, sleeping
/// `idle` whenever neither is ready. Ends with [`TimerEvent::Boom`].
pub fn default_selection(every: Duration, deadline: Duration, idle: Duration) -> Vec<TimerEvent> {
    let ticker = tick(every);
    let boom = after(deadline);
    let mut events = Vec::new();

    loop {
        select! {
            recv(ticker) -> _ => events.push(TimerEvent::Tick),
            recv(boom) -> _ => {
                events.push(TimerEvent::Boom);
                return events;
            }
            default => {
                events.push(TimerEvent::Idle);
                thread::sleep(idle);
            }
        }
    }
}

// =============================================================================
// Sections
// =============================================================================

pub fn threads(t: &mut Tour<'_>) -> Result<()> {
    let lines = say_concurrently(
        "world",
        "hello",
        t.config.say_repeats,
        t.config.say_delay(),
    )?;
    for line in lines {
        writeln!(t.out, "{line}")?;
    }
    Ok(())
}

pub fn channels(t: &mut Tour<'_>) -> Result<()> {
    let (x, y) = split_sum(&[7, 2, 8, -9, 4, 0]);
    writeln!(t.out, "x y x+y = {x} {y} {}", x + y)?;
    Ok(())
}

pub fn buffered_channels(t: &mut Tour<'_>) -> Result<()> {
    let values = [1, 2];
    let received = fill_then_drain(values.len(), &values)?;
    for (expected, value) in values.iter().zip(received) {
        writeln!(t.out, "{expected} = {value}")?;
    }
    Ok(())
}

pub fn range_and_close(t: &mut Tour<'_>) -> Result<()> {
    let (rx, producer) = spawn_fibonacci(t.config.fib_buffer, t.config.fib_buffer);
    for term in rx.iter() {
        writeln!(t.out, "{term}")?;
    }
    let sent = producer
        .join()
        .map_err(|_| TourError::ThreadPanicked("fibonacci".into()))?;
    debug!("range over channel drained {sent} terms");
    Ok(())
}

pub fn guarded_counter(t: &mut Tour<'_>) -> Result<()> {
    let count = count_concurrently(t.config.counter_increments, "somekey")?;
    writeln!(t.out, "{count}")?;
    Ok(())
}

pub fn select_fibonacci(t: &mut Tour<'_>) -> Result<()> {
    let (tx, rx) = bounded(0);
    let (quit_tx, quit_rx) = bounded(0);
    let terms = t.config.select_terms;

    let consumer = thread::spawn(move || {
        let received: Vec<u64> = rx.iter().take(terms).collect();
        let _ = quit_tx.send(());
        received
    });

    let sent = fibonacci_until_quit(&tx, &quit_rx);
    let received = consumer
        .join()
        .map_err(|_| TourError::ThreadPanicked("fibonacci consumer".into()))?;
    debug!("select producer sent {sent} terms");

    for term in received {
        writeln!(t.out, "{term}")?;
    }
    writeln!(t.out, "quit")?;
    Ok(())
}

pub fn default_select(t: &mut Tour<'_>) -> Result<()> {
    let events = default_selection(t.config.tick(), t.config.boom(), t.config.idle());
    for event in events {
        writeln!(t.out, "{event}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TourConfig;

    #[test]
    fn test_say_collects_every_line() {
        let lines = say_concurrently("world", "hello", 3, Duration::from_millis(1)).unwrap();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines.iter().filter(|l| *l == "hello").count(), 3);
        assert_eq!(lines.iter().filter(|l| *l == "world").count(), 3);
    }

    #[test]
    fn test_say_zero_repeats() {
        let lines = say_concurrently("a", "b", 0, Duration::ZERO).unwrap();
        assert!(lines.is_empty());
    }

    #[test]
    fn test_split_sum_halves() {
        let (x, y) = split_sum(&[7, 2, 8, -9, 4, 0]);
        let mut sums = [x, y];
        sums.sort();
        assert_eq!(sums, [-5, 17]);
        assert_eq!(x + y, 12);
    }

    #[test]
    fn test_split_sum_empty() {
        assert_eq!(split_sum(&[]), (0, 0));
    }

    #[test]
    fn test_boom_before_first_tick() {
        let events = default_selection(
            Duration::from_secs(5),
            Duration::from_millis(20),
            Duration::from_millis(2),
        );
        assert_eq!(events.last(), Some(&TimerEvent::Boom));
        assert!(!events.contains(&TimerEvent::Tick));
        assert!(events.contains(&TimerEvent::Idle));
    }

    #[test]
    fn test_ticks_before_boom() {
        let events = default_selection(
            Duration::from_millis(10),
            Duration::from_millis(100),
            Duration::from_millis(2),
        );
        assert_eq!(events.last(), Some(&TimerEvent::Boom));
        assert_eq!(events.iter().filter(|e| **e == TimerEvent::Boom).count(), 1);
        assert!(events.contains(&TimerEvent::Tick));
    }

    #[test]
    fn test_timer_event_display() {
        assert_eq!(TimerEvent::Tick.to_string(), "tick.");
        assert_eq!(TimerEvent::Boom.to_string(), "BOOM!");
        assert_eq!(TimerEvent::Idle.to_string(), ". . .");
    }

    fn capture(config: TourConfig, section: fn(&mut Tour<'_>) -> Result<()>) -> String {
        let mut buf = Vec::new();
        let mut tour = Tour::new(&mut buf, config);
        section(&mut tour).unwrap();
        drop(tour);
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_guarded_counter_section() {
        let config = TourConfig {
            counter_increments: 250,
            ..TourConfig::default()
        };
        assert_eq!(capture(config, guarded_counter), "250\n");
    }

    #[test]
    fn test_range_and_close_section() {
        let config = TourConfig {
            fib_buffer: 5,
            ..TourConfig::default()
        };
        assert_eq!(capture(config, range_and_close), "0\n1\n1\n2\n3\n");
    }

    #[test]
    fn test_select_section_prints_terms_then_quit() {
        let config = TourConfig {
            select_terms: 4,
            ..TourConfig::default()
        };
        assert_eq!(capture(config, select_fibonacci), "0\n1\n1\n2\nquit\n");
    }

    #[test]
    fn test_select_section_runs_past_u64() {
        let config = TourConfig {
            select_terms: 100,
            ..TourConfig::default()
        };
        let (done_tx, done_rx) = bounded(1);
        thread::spawn(move || {
            let _ = done_tx.send(capture(config, select_fibonacci));
        });
        let text = done_rx.recv_timeout(Duration::from_secs(5)).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 101);
        assert_eq!(lines[94], "1293530146158671551");
        assert_eq!(lines[100], "quit");
    }

    #[test]
    fn test_count_concurrently_splits_uneven_work() {
        assert_eq!(count_concurrently(1001, "k").unwrap(), 1001);
        assert_eq!(count_concurrently(3, "k").unwrap(), 3);
        assert_eq!(count_concurrently(0, "k").unwrap(), 0);
    }

    #[test]
    fn test_fill_then_drain_in_order() {
        assert_eq!(fill_then_drain(2, &[1, 2]).unwrap(), vec![1, 2]);
    }

    #[test]
    fn test_overfilled_buffer_is_an_error() {
        let err = fill_then_drain(1, &[1, 2]).unwrap_err();
        assert!(matches!(err, TourError::Channel { name: "buffered", .. }));
    }

    #[test]
    fn test_buffered_channel_section() {
        assert_eq!(capture(TourConfig::default(), buffered_channels), "1 = 1\n2 = 2\n");
    }
}
