use chrono::{DateTime, Local};
use std::io;
use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// Crate errors
// =============================================================================

#[derive(Error, Debug)]
pub enum TourError {
    #[error("Failed to write tour output: {0}")]
    Output(#[from] io::Error),

    #[error("Failed to read config file {}: {source}", .path.display())]
    ConfigRead { path: PathBuf, source: io::Error },

    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Invalid value for config field '{field}': {reason}")]
    InvalidConfig { field: String, reason: String },

    #[error("Unknown section '{name}' (valid sections: {valid})")]
    UnknownSection { name: String, valid: String },

    #[error("Failed to spawn thread: {0}")]
    Spawn(#[source] io::Error),

    #[error("Background thread '{0}' panicked")]
    ThreadPanicked(String),

    #[error("Channel '{name}' failed: {reason}")]
    Channel { name: &'static str, reason: String },
}

impl TourError {
    pub fn invalid_config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn unknown_section(name: impl Into<String>, valid: &[&str]) -> Self {
        Self::UnknownSection {
            name: name.into(),
            valid: valid.join(", "),
        }
    }

    pub fn channel(name: &'static str, reason: impl std::fmt::Display) -> Self {
        Self::Channel {
            name,
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TourError>;

// =============================================================================
// The demonstration error: always fails, carries when and what
// =============================================================================

#[derive(Error, Debug, Clone)]
#[error("at {}, {what}", .when.format("%Y-%m-%d %H:%M:%S%.f %:z"))]
pub struct RunError {
    pub when: DateTime<Local>,
    pub what: String,
}

impl RunError {
    pub fn new(what: impl Into<String>) -> Self {
        RunError {
            when: Local::now(),
            what: what.into(),
        }
    }
}

/// Always returns an error stamped with the current time.
pub fn run() -> std::result::Result<(), RunError> {
    Err(RunError::new("it didn't work"))
}
