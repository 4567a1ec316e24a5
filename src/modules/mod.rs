//! Settings modules
//!
//! Each module is one independent, reversible system tweak. `apply` puts the
//! machine into its real-time configuration, `revert` undoes it. Modules
//! share no state with each other; the only things they touch are the
//! [`Context`] collaborators and the snapshot keys they own.
//!
//! The set of modules and their order is fixed by [`registry`].

pub mod cpufreq;
pub mod kernel;
pub mod services;
pub mod turbo;

use crate::config::Config;
use crate::error::Result;
use crate::runner::CommandRunner;
use crate::services::ServiceController;
use crate::state_store::StateStore;

pub use cpufreq::FrequencyScaling;
pub use kernel::CheckForRealTimeKernel;
pub use services::{Cron, Tlp};
pub use turbo::IntelPState;

/// Collaborators handed to every module for one run.
#[derive(Debug)]
pub struct Context {
    pub config: Config,
    pub runner: CommandRunner,
    pub store: StateStore,
    pub services: ServiceController,
}

impl Context {
    pub fn new(config: Config) -> Self {
        Self::with_services(config, ServiceController::new())
    }

    /// Context with a caller-supplied service controller.
    pub fn with_services(config: Config, services: ServiceController) -> Self {
        Self {
            runner: CommandRunner::new(config.simulate),
            store: StateStore::new(config.state_file.clone()),
            services,
            config,
        }
    }
}

/// One reversible tweak.
///
/// # Contract
///
/// - `revert` is safe to call without a prior `apply`; it restores a
///   best-effort default in that case.
/// - Every mutation goes through `ctx.runner` so simulate mode holds.
pub trait SettingsModule {
    /// Identifier used by `--list` and `--ignore`.
    fn name(&self) -> &'static str;

    /// Switch to the real-time configuration.
    fn apply(&self, ctx: &Context) -> Result<()>;

    /// Restore the configuration recorded by `apply`.
    fn revert(&self, ctx: &Context) -> Result<()>;
}

/// All settings modules in execution order.
pub fn registry() -> Vec<Box<dyn SettingsModule>> {
    vec![
        Box::new(CheckForRealTimeKernel),
        Box::new(Cron),
        Box::new(Tlp),
        Box::new(FrequencyScaling),
        Box::new(IntelPState),
    ]
}

/// Names of the registered modules, in execution order.
pub fn module_names() -> Vec<&'static str> {
    registry().iter().map(|module| module.name()).collect()
}
