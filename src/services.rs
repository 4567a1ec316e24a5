//! systemd service control
//!
//! The list of installed unit files is fetched once per run and cached in the
//! [`ServiceController`] that the driver hands to every module. Asking to
//! start or stop a unit that is not installed is not an error: it is logged
//! and skipped, which lets modules name alternatives (`cron` and `crond`)
//! without knowing which distribution they run on.

use std::cell::OnceCell;
use std::process::Command;

use strum::Display;
use tracing::{debug, info};

use crate::error::{Result, RtSettingsError};
use crate::runner::{Action, CommandRunner};

const SYSTEMCTL: &str = "systemctl";

/// What to do with a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ServiceAction {
    Start,
    Stop,
}

/// Starts and stops systemd units that exist on this machine.
#[derive(Debug, Default)]
pub struct ServiceController {
    units: OnceCell<Vec<String>>,
}

impl ServiceController {
    /// Controller that lists unit files from systemctl on first use.
    pub fn new() -> Self {
        Self::default()
    }

    /// Controller with a known unit list; systemctl is never queried.
    pub fn with_units<I, S>(units: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let cell = OnceCell::new();
        let _ = cell.set(units.into_iter().map(Into::into).collect());
        Self { units: cell }
    }

    /// Installed unit names without their extension (`cron`, `tlp`, ...).
    pub fn units(&self) -> Result<&[String]> {
        if let Some(units) = self.units.get() {
            return Ok(units.as_slice());
        }
        let units = list_unit_files()?;
        debug!("found services {:?}", units);
        Ok(self.units.get_or_init(|| units).as_slice())
    }

    pub fn exists(&self, name: &str) -> Result<bool> {
        Ok(self.units()?.iter().any(|unit| unit == name))
    }

    /// Start or stop `name` through the runner.
    ///
    /// Returns `Ok(false)` without invoking anything when the unit is not
    /// installed.
    pub fn apply(
        &self,
        runner: &CommandRunner,
        name: &str,
        action: ServiceAction,
    ) -> Result<bool> {
        if !self.exists(name)? {
            info!("service '{}' does not seem to exist", name);
            return Ok(false);
        }
        runner.run(&Action::exec(SYSTEMCTL, [action.to_string(), name.to_string()]))?;
        Ok(true)
    }

    pub fn start(&self, runner: &CommandRunner, name: &str) -> Result<bool> {
        self.apply(runner, name, ServiceAction::Start)
    }

    pub fn stop(&self, runner: &CommandRunner, name: &str) -> Result<bool> {
        self.apply(runner, name, ServiceAction::Stop)
    }
}

/// Query systemctl for every installed unit file.
///
/// This is a read-only query and runs even in simulate mode.
fn list_unit_files() -> Result<Vec<String>> {
    let output = Command::new(SYSTEMCTL)
        .args(["list-unit-files", "--no-pager"])
        .output()?;
    if !output.status.success() {
        return Err(RtSettingsError::command(
            "systemctl list-unit-files --no-pager",
            output.status,
        ));
    }
    Ok(parse_unit_files(&String::from_utf8_lossy(&output.stdout)))
}

/// Extract bare unit names from `systemctl list-unit-files` output.
///
/// The header line and the trailing "N unit files listed." summary carry no
/// unit name with an extension and are dropped.
pub fn parse_unit_files(output: &str) -> Vec<String> {
    output
        .lines()
        .filter_map(|line| line.split_whitespace().next())
        .filter_map(|unit| {
            let (name, extension) = unit.rsplit_once('.')?;
            if name.is_empty()
                || extension.is_empty()
                || !extension.chars().all(char::is_alphanumeric)
            {
                return None;
            }
            Some(name.to_string())
        })
        .collect()
}
