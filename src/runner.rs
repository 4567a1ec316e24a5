//! Command Runner - the single gate for every mutation a run performs.
//!
//! Settings modules never write files or start processes themselves. They
//! describe the mutation as an [`Action`] and hand it to [`CommandRunner::run`],
//! which either performs it or, in simulate mode, prints what it would do.
//! Read-only queries (sysfs reads, listing unit files) bypass the runner so a
//! simulated run still previews real decisions.

use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::process::Command;

use tracing::debug;

use crate::error::{Result, RtSettingsError};
use crate::state_store::StateStore;

/// One side effect, described before it happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Run an external program and require a successful exit
    Exec { program: String, args: Vec<String> },
    /// Copy the contents of one file over another
    CopyFile { from: PathBuf, to: PathBuf },
    /// Replace the contents of a file
    WriteFile { path: PathBuf, contents: String },
    /// Record a pre-mutation value in the snapshot
    Remember {
        store: StateStore,
        key: String,
        value: String,
    },
}

impl Action {
    pub fn exec<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Exec {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exec { program, args } => {
                write!(f, "{}", program)?;
                for arg in args {
                    write!(f, " {}", arg)?;
                }
                Ok(())
            }
            Self::CopyFile { from, to } => {
                write!(f, "copy {} -> {}", from.display(), to.display())
            }
            Self::WriteFile { path, contents } => {
                write!(f, "write {:?} to {}", contents, path.display())
            }
            Self::Remember { store, key, value } => {
                write!(
                    f,
                    "remember {}={:?} in {}",
                    key,
                    value,
                    store.path().display()
                )
            }
        }
    }
}

/// Executes [`Action`]s for real or only describes them.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandRunner {
    simulate: bool,
}

impl CommandRunner {
    pub fn new(simulate: bool) -> Self {
        Self { simulate }
    }

    pub fn is_simulating(&self) -> bool {
        self.simulate
    }

    /// Perform `action`, or print it when simulating.
    ///
    /// Failures are whatever the underlying primitive reports; nothing is
    /// retried.
    pub fn run(&self, action: &Action) -> Result<()> {
        if self.simulate {
            println!("simulating - would execute: {}", action);
            return Ok(());
        }

        debug!("executing {}", action);
        match action {
            Action::Exec { program, args } => {
                let status = Command::new(program).args(args).status()?;
                if !status.success() {
                    return Err(RtSettingsError::command(action.to_string(), status));
                }
            }
            Action::CopyFile { from, to } => {
                // sysfs attributes report a bogus size, so copy by content
                let contents = fs::read(from)?;
                fs::write(to, contents)?;
            }
            Action::WriteFile { path, contents } => {
                fs::write(path, contents)?;
            }
            Action::Remember { store, key, value } => {
                store.set(key, value)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_display_exec() {
        let action = Action::exec("systemctl", ["stop", "cron"]);
        assert_eq!(action.to_string(), "systemctl stop cron");
    }

    #[test]
    fn test_display_write() {
        let action = Action::WriteFile {
            path: PathBuf::from("/sys/devices/system/cpu/intel_pstate/no_turbo"),
            contents: "1".to_string(),
        };
        assert_eq!(
            action.to_string(),
            "write \"1\" to /sys/devices/system/cpu/intel_pstate/no_turbo"
        );
    }

    #[test]
    fn test_simulate_does_not_touch_files() {
        let dir = TempDir::new().unwrap();
        let from = dir.path().join("from");
        let to = dir.path().join("to");
        fs::write(&from, "3400000\n").unwrap();
        fs::write(&to, "800000\n").unwrap();

        let runner = CommandRunner::new(true);
        runner
            .run(&Action::CopyFile {
                from: from.clone(),
                to: to.clone(),
            })
            .unwrap();
        runner
            .run(&Action::Remember {
                store: StateStore::new(dir.path().join("state")),
                key: "k".to_string(),
                value: "v".to_string(),
            })
            .unwrap();

        assert_eq!(fs::read_to_string(&to).unwrap(), "800000\n");
        assert!(!dir.path().join("state").exists());
    }

    #[test]
    fn test_simulate_does_not_spawn() {
        let runner = CommandRunner::new(true);
        let missing = Action::exec("this_binary_definitely_does_not_exist_12345", ["x"]);
        let result = runner.run(&missing);
        assert!(result.is_ok());
    }

    #[test]
    fn test_copy_and_write() {
        let dir = TempDir::new().unwrap();
        let from = dir.path().join("from");
        let to = dir.path().join("to");
        fs::write(&from, "3400000\n").unwrap();
        fs::write(&to, "800000\n").unwrap();

        let runner = CommandRunner::new(false);
        runner
            .run(&Action::CopyFile {
                from: from.clone(),
                to: to.clone(),
            })
            .unwrap();
        assert_eq!(fs::read_to_string(&to).unwrap(), "3400000\n");

        runner
            .run(&Action::WriteFile {
                path: to.clone(),
                contents: "1".to_string(),
            })
            .unwrap();
        assert_eq!(fs::read_to_string(&to).unwrap(), "1");
    }

    #[test]
    fn test_exec_missing_binary_is_io_error() {
        let runner = CommandRunner::new(false);
        let missing = Action::exec("this_binary_definitely_does_not_exist_12345", ["x"]);
        let result = runner.run(&missing);
        assert!(matches!(result, Err(RtSettingsError::Io(_))));
    }

    #[test]
    fn test_exec_nonzero_exit_is_command_error() {
        let runner = CommandRunner::new(false);
        let result = runner.run(&Action::exec("false", Vec::<String>::new()));
        assert!(matches!(result, Err(RtSettingsError::Command { .. })));
    }

    #[test]
    fn test_missing_source_propagates() {
        let dir = TempDir::new().unwrap();
        let runner = CommandRunner::new(false);
        let result = runner.run(&Action::CopyFile {
            from: dir.path().join("absent"),
            to: dir.path().join("to"),
        });
        assert!(matches!(result, Err(RtSettingsError::Io(_))));
        assert!(!dir.path().join("to").exists());
    }
}
