//! A walk through everyday Rust: types, control flow, collections, traits,
//! errors and the concurrency toolbox (threads, channels, locks, `select!`).
//!
//! The reusable pieces are [`counter::SafeCounter`] and the Fibonacci
//! producers in [`sequence`]; everything else lives in a [`tour::Section`].

pub mod basics;
pub mod collections;
pub mod concurrency;
pub mod config;
pub mod counter;
pub mod error;
pub mod imaging;
pub mod reader;
pub mod sequence;
pub mod shapes;
pub mod tour;

pub use config::TourConfig;
pub use counter::SafeCounter;
pub use error::{Result, TourError};
pub use tour::{Section, Tour, SECTIONS};
