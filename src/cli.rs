use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use strum::Display;

/// Configures your Linux for real-time applications
/// (tested for recent Debian and Fedora systems).
#[derive(Parser, Debug)]
#[command(name = "rt-settings")]
#[command(version)]
pub struct Cli {
    /// Turn on debug messages
    #[arg(short, long)]
    pub debug: bool,

    /// Turn on verbose messages
    #[arg(short, long)]
    pub verbose: bool,

    /// Simulate and print what would be executed
    #[arg(short, long)]
    pub simulate: bool,

    /// List available settings modules and exit
    #[arg(short, long)]
    pub list: bool,

    /// Settings modules to ignore
    #[arg(short, long, num_args = 0.., value_name = "NAME")]
    pub ignore: Vec<String>,

    /// Snapshot file remembering values overwritten by `on`
    #[arg(long, env = "RT_SETTINGS_STATE_FILE", value_name = "PATH")]
    pub state_file: Option<PathBuf>,

    /// Activate or deactivate the real-time settings
    #[arg(value_enum)]
    pub mode: Option<Mode>,
}

/// Direction of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Mode {
    /// Apply every settings module
    On,
    /// Revert every settings module
    Off,
}

impl Cli {
    pub fn parse_args() -> Self {
        <Self as clap::Parser>::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_no_args() {
        let result = Cli::try_parse_from(["rt-settings"]);
        assert!(result.is_ok());
        let cli = result.unwrap();
        assert!(cli.mode.is_none());
        assert!(cli.ignore.is_empty());
        assert!(!cli.list);
    }

    #[test]
    fn test_cli_on_with_flags() {
        let cli = Cli::try_parse_from(["rt-settings", "-d", "-s", "on"]).unwrap();
        assert_eq!(cli.mode, Some(Mode::On));
        assert!(cli.debug);
        assert!(cli.simulate);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_cli_ignore_multiple_before_mode() {
        let cli = Cli::try_parse_from(["rt-settings", "--ignore", "Cron", "Tlp", "--", "off"])
            .unwrap();
        assert_eq!(cli.ignore, vec!["Cron".to_string(), "Tlp".to_string()]);
        assert_eq!(cli.mode, Some(Mode::Off));
    }

    #[test]
    fn test_cli_ignore_after_mode() {
        let cli = Cli::try_parse_from(["rt-settings", "off", "-i", "IntelPState"]).unwrap();
        assert_eq!(cli.ignore, vec!["IntelPState".to_string()]);
        assert_eq!(cli.mode, Some(Mode::Off));
    }

    #[test]
    fn test_cli_rejects_unknown_mode() {
        let result = Cli::try_parse_from(["rt-settings", "maybe"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_mode_display() {
        assert_eq!(Mode::On.to_string(), "on");
        assert_eq!(Mode::Off.to_string(), "off");
    }
}
