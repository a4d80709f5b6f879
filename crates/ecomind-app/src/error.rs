//! Application-level errors.

use crate::config::ConfigError;
use resource_controller::TransportError;
use thiserror::Error;

/// Errors that stop the application from starting or finishing a run.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Transport setup failed: {0}")]
    Transport(#[from] TransportError),

    /// A spawned resource task panicked.
    #[error("Resource task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
