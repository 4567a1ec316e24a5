//! Real-time kernel detection. Only warns; changes nothing.

use std::fs;

use tracing::{debug, warn};

use super::{Context, SettingsModule};
use crate::error::{Result, RtSettingsError};

/// Warns when the running kernel carries no real-time marker.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckForRealTimeKernel;

impl CheckForRealTimeKernel {
    /// Real-time marker of the running kernel, if any.
    pub fn detect(&self, ctx: &Context) -> Result<Option<&'static str>> {
        let flag = fs::read_to_string(ctx.config.realtime_flag_file()).ok();

        let uts = nix::sys::utsname::uname()
            .map_err(|e| RtSettingsError::system(format!("uname failed: {}", e)))?;
        let release = uts.release().to_string_lossy();
        let version = uts.version().to_string_lossy();

        Ok(realtime_marker(flag.as_deref(), &release, &version))
    }
}

impl SettingsModule for CheckForRealTimeKernel {
    fn name(&self) -> &'static str {
        "CheckForRealTimeKernel"
    }

    fn apply(&self, ctx: &Context) -> Result<()> {
        match self.detect(ctx)? {
            Some(marker) => debug!("found {}", marker),
            None => warn!("You don't seem to be using a real-time kernel."),
        }
        Ok(())
    }

    fn revert(&self, _ctx: &Context) -> Result<()> {
        Ok(())
    }
}

/// Which real-time marker, if any, the kernel shows.
///
/// `flag` is the content of `/sys/kernel/realtime` when that file exists.
pub fn realtime_marker(flag: Option<&str>, release: &str, version: &str) -> Option<&'static str> {
    if flag.is_some_and(|f| f.trim() == "1") {
        return Some("'1' in /sys/kernel/realtime");
    }
    if release.ends_with("+rt") {
        return Some("+rt in kernel release");
    }
    // Pad so markers at either end of the version string still match
    let version = format!(" {} ", version);
    if version.contains(" RT ") {
        return Some("RT in kernel version");
    }
    if version.contains(" PREEMPT_RT ") {
        return Some("PREEMPT_RT in kernel version");
    }
    if version.contains(" PREEMPT ") {
        return Some("PREEMPT in kernel version");
    }
    None
}
