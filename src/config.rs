//! Runtime configuration
//!
//! Every filesystem location a run touches is collected here so that the
//! settings modules never hardcode `/sys` or the temp directory. Values come
//! from CLI flags, then environment variables, then built-in defaults.

use std::path::{Path, PathBuf};

use crate::cli::Cli;

/// Environment variable overriding the snapshot file location
pub const STATE_FILE_ENV: &str = "RT_SETTINGS_STATE_FILE";

/// Environment variable overriding the sysfs mount point
pub const SYSFS_ROOT_ENV: &str = "RT_SETTINGS_SYSFS_ROOT";

/// File name of the snapshot inside the temp directory
const STATE_FILE_NAME: &str = "real-time_settings";

/// Resolved configuration for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Snapshot file used by modules to remember overwritten values
    pub state_file: PathBuf,
    /// Root of the sysfs tree (normally `/sys`)
    pub sysfs_root: PathBuf,
    /// Print would-be actions instead of performing them
    pub simulate: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            state_file: std::env::temp_dir().join(STATE_FILE_NAME),
            sysfs_root: PathBuf::from("/sys"),
            simulate: false,
        }
    }
}

impl Config {
    /// Build the configuration from parsed arguments and the environment.
    ///
    /// `--state-file` already falls back to `RT_SETTINGS_STATE_FILE` through
    /// clap, so only the sysfs root is read from the environment here.
    pub fn from_cli(cli: &Cli) -> Self {
        let mut config = Self {
            simulate: cli.simulate,
            ..Self::default()
        };
        if let Some(ref state_file) = cli.state_file {
            config.state_file = state_file.clone();
        }
        if let Some(root) = std::env::var_os(SYSFS_ROOT_ENV).filter(|v| !v.is_empty()) {
            config.sysfs_root = PathBuf::from(root);
        }
        config
    }

    /// Configuration rooted at an arbitrary sysfs tree, used by tests.
    pub fn with_roots(state_file: impl Into<PathBuf>, sysfs_root: impl Into<PathBuf>) -> Self {
        Self {
            state_file: state_file.into(),
            sysfs_root: sysfs_root.into(),
            simulate: false,
        }
    }

    /// `/sys/kernel/realtime`, present on PREEMPT_RT kernels
    pub fn realtime_flag_file(&self) -> PathBuf {
        self.sysfs_root.join("kernel/realtime")
    }

    /// `/sys/devices/system/cpu`
    pub fn cpu_root(&self) -> PathBuf {
        self.sysfs_root.join("devices/system/cpu")
    }

    /// `/sys/devices/system/cpu/cpuN/cpufreq`
    pub fn cpufreq_dir(&self, cpu: u32) -> PathBuf {
        self.cpu_root().join(format!("cpu{cpu}")).join("cpufreq")
    }

    /// `/sys/devices/system/cpu/intel_pstate/no_turbo`
    pub fn no_turbo_file(&self) -> PathBuf {
        self.cpu_root().join("intel_pstate/no_turbo")
    }

    pub fn state_file(&self) -> &Path {
        &self.state_file
    }
}
