//! Error handling module for rt-settings
//!
//! Provides centralized error handling with proper error types using thiserror.
//! Benign conditions (a missing service, a platform without a turbo control
//! file) are not errors at all; they are logged by the component that meets
//! them and the run continues.

use thiserror::Error;

/// Main error type for rt-settings
#[derive(Error, Debug)]
pub enum RtSettingsError {
    /// IO errors (sysfs reads and writes, snapshot file, spawning commands)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors for the snapshot file
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// One or more `--ignore` names did not match a registered module
    #[error("Could not find settings modules to ignore: {0:?}")]
    UnknownModules(Vec<String>),

    /// An external command ran but exited unsuccessfully
    #[error("Command `{command}` failed with {status}")]
    Command { command: String, status: String },

    /// System errors (unexpected output, missing sysfs layout)
    #[error("System error: {0}")]
    System(String),
}

/// Result type alias for rt-settings operations
pub type Result<T> = std::result::Result<T, RtSettingsError>;

impl RtSettingsError {
    /// Create a system error
    pub fn system(msg: impl Into<String>) -> Self {
        Self::System(msg.into())
    }

    /// Create a command failure error
    pub fn command(command: impl Into<String>, status: impl ToString) -> Self {
        Self::Command {
            command: command.into(),
            status: status.to_string(),
        }
    }
}
