//! Intel P-state turbo boost
//!
//! Turbo lets a core clock above its rated maximum for short bursts, which
//! makes latency unpredictable. `apply` remembers the current `no_turbo`
//! value and disables turbo; `revert` writes the remembered value back.

use std::fs;

use tracing::info;

use super::{Context, SettingsModule};
use crate::error::Result;
use crate::runner::Action;

/// `no_turbo` value that disables turbo boost.
pub const NO_TURBO_DISABLED: &str = "1";

/// `no_turbo` value restored when nothing was remembered (turbo enabled).
pub const NO_TURBO_DEFAULT: &str = "0";

/// Disables turbo boost through the intel_pstate driver.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntelPState;

impl SettingsModule for IntelPState {
    fn name(&self) -> &'static str {
        "IntelPState"
    }

    fn apply(&self, ctx: &Context) -> Result<()> {
        let path = ctx.config.no_turbo_file();
        if !path.is_file() {
            info!("{} not present, intel_pstate is not in use", path.display());
            return Ok(());
        }

        let current = fs::read_to_string(&path)?.trim().to_string();
        ctx.runner.run(&Action::Remember {
            store: ctx.store.clone(),
            key: path.display().to_string(),
            value: current,
        })?;
        ctx.runner.run(&Action::WriteFile {
            path,
            contents: NO_TURBO_DISABLED.to_string(),
        })
    }

    fn revert(&self, ctx: &Context) -> Result<()> {
        let path = ctx.config.no_turbo_file();
        if !path.is_file() {
            info!("{} not present, intel_pstate is not in use", path.display());
            return Ok(());
        }

        let previous = ctx.store.get(&path.display().to_string(), NO_TURBO_DEFAULT);
        ctx.runner.run(&Action::WriteFile {
            path,
            contents: previous,
        })
    }
}
