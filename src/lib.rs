//! rt-settings Library
//!
//! Toggles a desktop Linux machine between a real-time friendly configuration
//! and its normal one through a fixed, ordered set of reversible settings
//! modules.

pub mod cli;
pub mod config;
pub mod driver;
pub mod error;
pub mod modules;
pub mod runner;
pub mod services;
pub mod state_store;

// Re-export main types for convenience
pub use cli::{Cli, Mode};
pub use config::Config;
pub use driver::{filter_modules, run_modules, RunReport};
pub use error::{Result, RtSettingsError};
pub use modules::{module_names, registry, Context, SettingsModule};
pub use runner::{Action, CommandRunner};
pub use services::{ServiceAction, ServiceController};
pub use state_store::{Snapshot, StateStore};
