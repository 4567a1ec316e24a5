//! Driver - runs the selected settings modules in registration order.
//!
//! # Failure policy
//!
//! Modules are isolated from each other. A module whose `apply` or `revert`
//! fails is logged and recorded in the [`RunReport`]; the remaining modules
//! still run. The same holds in simulate mode.

use tracing::{error, info};

use crate::cli::Mode;
use crate::error::{Result, RtSettingsError};
use crate::modules::{Context, SettingsModule};

/// Drop the modules named in `ignore`, keeping the rest in order.
///
/// Every name in `ignore` must match a module; otherwise nothing is returned
/// and the unmatched names are reported.
pub fn filter_modules(
    modules: Vec<Box<dyn SettingsModule>>,
    ignore: &[String],
) -> Result<Vec<Box<dyn SettingsModule>>> {
    let unknown: Vec<String> = ignore
        .iter()
        .filter(|name| !modules.iter().any(|m| m.name() == name.as_str()))
        .cloned()
        .collect();
    if !unknown.is_empty() {
        return Err(RtSettingsError::UnknownModules(unknown));
    }

    Ok(modules
        .into_iter()
        .filter(|m| !ignore.iter().any(|name| name == m.name()))
        .collect())
}

/// Outcome of one `on` or `off` run.
#[derive(Debug, Default)]
pub struct RunReport {
    /// Modules that completed, in execution order
    pub completed: Vec<&'static str>,
    /// Modules that failed, with the error each one raised
    pub failed: Vec<(&'static str, RtSettingsError)>,
}

impl RunReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn failed_names(&self) -> Vec<&'static str> {
        self.failed.iter().map(|(name, _)| *name).collect()
    }
}

/// Apply or revert every module in order.
pub fn run_modules(modules: &[Box<dyn SettingsModule>], mode: Mode, ctx: &Context) -> RunReport {
    let mut report = RunReport::default();

    for module in modules {
        let name = module.name();
        let result = match mode {
            Mode::On => {
                info!("real-time settings on: {}", name);
                module.apply(ctx)
            }
            Mode::Off => {
                info!("real-time settings off: {}", name);
                module.revert(ctx)
            }
        };

        match result {
            Ok(()) => report.completed.push(name),
            Err(e) => {
                error!("{} failed to turn real-time settings {}: {}", name, mode, e);
                report.failed.push((name, e));
            }
        }
    }

    report
}
