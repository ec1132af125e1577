//! Error types for simulation operations.

use thiserror::Error;

/// Errors encountered while configuring or stepping the simulator.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Environment not initialized: call reset() before step()")]
    NotInitialized,

    #[error("Invalid parameter: {0}")]
    Param(#[from] qt_core::QtError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type SimResult<T> = Result<T, SimError>;
