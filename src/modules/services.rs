//! Background services that cause scheduling jitter.

use tracing::error;

use super::{Context, SettingsModule};
use crate::error::Result;

/// Debian ships `cron`, Fedora ships `crond`; whichever exists is handled.
const CRON_UNITS: [&str; 2] = ["cron", "crond"];

/// Power management daemon.
const TLP_UNIT: &str = "tlp";

/// Stops the cron daemon while real-time settings are on.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cron;

impl SettingsModule for Cron {
    fn name(&self) -> &'static str {
        "Cron"
    }

    fn apply(&self, ctx: &Context) -> Result<()> {
        for_each_unit(&CRON_UNITS, |unit| ctx.services.stop(&ctx.runner, unit))
    }

    fn revert(&self, ctx: &Context) -> Result<()> {
        for_each_unit(&CRON_UNITS, |unit| ctx.services.start(&ctx.runner, unit))
    }
}

/// Run `action` on every unit, even after one fails; the first error wins.
fn for_each_unit<F>(units: &[&str], mut action: F) -> Result<()>
where
    F: FnMut(&str) -> Result<bool>,
{
    let mut first_error = None;
    for &unit in units {
        if let Err(e) = action(unit) {
            error!("service '{}': {}", unit, e);
            first_error.get_or_insert(e);
        }
    }
    first_error.map_or(Ok(()), Err)
}

/// Stops TLP, which would otherwise keep retuning CPU power settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tlp;

impl SettingsModule for Tlp {
    fn name(&self) -> &'static str {
        "Tlp"
    }

    fn apply(&self, ctx: &Context) -> Result<()> {
        ctx.services.stop(&ctx.runner, TLP_UNIT)?;
        Ok(())
    }

    fn revert(&self, ctx: &Context) -> Result<()> {
        ctx.services.start(&ctx.runner, TLP_UNIT)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::error::RtSettingsError;
    use crate::services::ServiceController;

    fn context(units: &[&str]) -> Context {
        let mut config = Config::with_roots("/nonexistent/rt-state", "/nonexistent/sys");
        config.simulate = true;
        Context::with_services(config, ServiceController::with_units(units.iter().copied()))
    }

    #[test]
    fn test_cron_with_only_crond_installed() {
        let ctx = context(&["crond"]);
        assert!(Cron.apply(&ctx).is_ok());
        assert!(Cron.revert(&ctx).is_ok());
    }

    #[test]
    fn test_tlp_absent_is_not_an_error() {
        let ctx = context(&[]);
        assert!(Tlp.apply(&ctx).is_ok());
        assert!(Tlp.revert(&ctx).is_ok());
    }

    #[test]
    fn test_every_unit_attempted_after_failure() {
        let mut attempted = Vec::new();
        let result = for_each_unit(&CRON_UNITS, |unit| {
            attempted.push(unit.to_string());
            Err(RtSettingsError::command(format!("systemctl stop {unit}"), "exit status: 5"))
        });

        assert_eq!(attempted, vec!["cron", "crond"]);
        match result {
            Err(RtSettingsError::Command { command, .. }) => {
                assert_eq!(command, "systemctl stop cron")
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_every_unit_ok() {
        let mut attempted = 0;
        let result = for_each_unit(&CRON_UNITS, |_| {
            attempted += 1;
            Ok(true)
        });
        assert!(result.is_ok());
        assert_eq!(attempted, 2);
    }
}
