//! CPU frequency pinning
//!
//! Raising `scaling_min_freq` to `cpuinfo_max_freq` keeps every core at its
//! top clock so the governor never has to ramp up under an audio deadline.
//! Reverting copies `cpuinfo_min_freq` back, which is the kernel's own floor.

use std::fs;
use std::path::Path;

use tracing::debug;

use super::{Context, SettingsModule};
use crate::error::Result;
use crate::runner::Action;

const CPUINFO_MIN: &str = "cpuinfo_min_freq";
const CPUINFO_MAX: &str = "cpuinfo_max_freq";
const SCALING_MIN: &str = "scaling_min_freq";

/// Pins every logical CPU's minimum frequency to its maximum.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrequencyScaling;

impl FrequencyScaling {
    fn copy_into_scaling_min(&self, ctx: &Context, source: &str) -> Result<()> {
        for cpu in logical_cpus(&ctx.config.cpu_root())? {
            let cpufreq = ctx.config.cpufreq_dir(cpu);
            if !cpufreq.is_dir() {
                debug!("cpu{} has no cpufreq interface, skipping", cpu);
                continue;
            }
            ctx.runner.run(&Action::CopyFile {
                from: cpufreq.join(source),
                to: cpufreq.join(SCALING_MIN),
            })?;
        }
        Ok(())
    }
}

impl SettingsModule for FrequencyScaling {
    fn name(&self) -> &'static str {
        "FrequencyScaling"
    }

    fn apply(&self, ctx: &Context) -> Result<()> {
        self.copy_into_scaling_min(ctx, CPUINFO_MAX)
    }

    fn revert(&self, ctx: &Context) -> Result<()> {
        self.copy_into_scaling_min(ctx, CPUINFO_MIN)
    }
}

/// Indices of the `cpuN` directories under `cpu_root`, ascending.
pub fn logical_cpus(cpu_root: &Path) -> Result<Vec<u32>> {
    let mut cpus: Vec<u32> = fs::read_dir(cpu_root)?
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| {
            entry
                .file_name()
                .to_str()?
                .strip_prefix("cpu")?
                .parse()
                .ok()
        })
        .collect();
    cpus.sort_unstable();
    Ok(cpus)
}
