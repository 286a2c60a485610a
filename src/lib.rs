//! Headless host for the heartfall scene.
//!
//! Runs a [`canvas::engine::Session`] without a browser: tokio drives the
//! session timers and stdin supplies keyboard, pointer and button events.

pub mod config;
pub mod console;
pub mod host;

/// Errors that end the host process.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error(transparent)]
    Config(#[from] config::ConfigError),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot serialization failed: {0}")]
    Snapshot(#[from] serde_json::Error),
}
