//! rt-settings - Main entry point
//!
//! Wires logging and argument parsing to the library driver and maps the
//! outcome to an exit code.

use std::process::ExitCode;

use anyhow::{Context as _, anyhow};
use tracing::{debug, error, warn};
use tracing_subscriber::EnvFilter;

use rt_settings::{Cli, Config, Context, RtSettingsError, filter_modules, registry, run_modules};

/// Initialize the tracing subscriber.
///
/// `--debug` beats `--verbose`; without either flag `RUST_LOG` decides,
/// falling back to warnings only.
fn init_logging(cli: &Cli) -> anyhow::Result<()> {
    let filter = if cli.debug {
        EnvFilter::new("debug")
    } else if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("{}", e))
}

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            // Plain stderr: the subscriber may be the thing that failed
            eprintln!("{}", fatal_message(&e));
            ExitCode::FAILURE
        }
    }
}

/// One-line report of an error that ends the run.
fn fatal_message(err: &anyhow::Error) -> String {
    format!("rt-settings: {:#}", err)
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    init_logging(&cli).context("Failed to initialize logging")?;
    debug!("CLI arguments parsed: {:?}", cli);

    let modules = registry();

    if cli.list {
        for module in &modules {
            println!("{}", module.name());
        }
        return Ok(ExitCode::SUCCESS);
    }

    let modules = match filter_modules(modules, &cli.ignore) {
        Ok(modules) => modules,
        Err(e @ RtSettingsError::UnknownModules(_)) => {
            error!("{}", e);
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => return Err(e.into()),
    };

    let Some(mode) = cli.mode else {
        println!("please provide either 'on' or 'off' as last argument (see -h)");
        return Ok(ExitCode::SUCCESS);
    };

    if !nix::unistd::geteuid().is_root() {
        warn!("You'll probably have to run this as root (sudo) but I'll continue and try.");
    }

    let config = Config::from_cli(&cli);
    debug!("Configuration: {:?}", config);
    let ctx = Context::new(config);

    let report = run_modules(&modules, mode, &ctx);
    if !report.is_success() {
        warn!(
            "real-time settings {} incomplete, failed modules: {:?}",
            mode,
            report.failed_names()
        );
    }

    Ok(ExitCode::SUCCESS)
}
