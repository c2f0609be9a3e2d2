//! External tool invocation
//!
//! The driver only talks to the monitor construction tool through the
//! [`ToolRunner`] trait. [`ProcessToolRunner`] spawns the real process; tests
//! substitute a recording fake.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::config::{AnalysisMode, ToolConfig};
use crate::error::{Error, Result};

/// Exit status of one tool invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolStatus {
    code: Option<i32>,
}

impl ToolStatus {
    /// Status with an explicit exit code
    pub fn from_code(code: i32) -> Self {
        Self { code: Some(code) }
    }

    /// Status of a process killed by a signal
    pub fn terminated() -> Self {
        Self { code: None }
    }

    pub fn success() -> Self {
        Self::from_code(0)
    }

    pub fn code(&self) -> Option<i32> {
        self.code
    }

    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }
}

impl From<std::process::ExitStatus> for ToolStatus {
    fn from(status: std::process::ExitStatus) -> Self {
        Self {
            code: status.code(),
        }
    }
}

/// Capability to run the external tool once for one formula
pub trait ToolRunner {
    /// Run the tool on `formula`, letting it append to `stats_path`, and wait for it
    fn invoke(&mut self, formula: &str, stats_path: &Path) -> Result<ToolStatus>;
}

impl<R: ToolRunner + ?Sized> ToolRunner for &mut R {
    fn invoke(&mut self, formula: &str, stats_path: &Path) -> Result<ToolStatus> {
        (**self).invoke(formula, stats_path)
    }
}

/// Command line of the external tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    program: String,
    args: Vec<String>,
    mode: AnalysisMode,
    working_directory: Option<PathBuf>,
}

impl ToolCommand {
    pub fn new(program: impl Into<String>, args: Vec<String>, mode: AnalysisMode) -> Self {
        Self {
            program: program.into(),
            args,
            mode,
            working_directory: None,
        }
    }

    pub fn from_config(config: &ToolConfig) -> Self {
        Self {
            program: config.program.clone(),
            args: config.args.clone(),
            mode: config.mode,
            working_directory: config.working_directory.clone(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Full argument list for one formula: fixed prefix, `-s <stats>`, mode, formula
    pub fn arguments(&self, formula: &str, stats_path: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = self.args.iter().map(OsString::from).collect();
        args.push("-s".into());
        args.push(stats_path.as_os_str().to_os_string());
        args.push(self.mode.as_arg().into());
        args.push(formula.into());
        args
    }

    /// Shell rendering of the invocation, for logs
    pub fn render(&self, formula: &str, stats_path: &Path) -> String {
        let mut parts = vec![self.program.clone()];
        parts.extend(self.args.iter().map(|arg| shell_quote(arg)));
        parts.push("-s".to_string());
        parts.push(shell_quote(&stats_path.to_string_lossy()));
        parts.push(self.mode.as_arg().to_string());
        parts.push(format!("'{}'", formula.replace('\'', r"'\''")));
        format!("{} > /dev/null", parts.join(" "))
    }

    /// Build the process with both output streams discarded
    pub fn build(&self, formula: &str, stats_path: &Path) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args(self.arguments(formula, stats_path))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        if let Some(dir) = &self.working_directory {
            command.current_dir(dir);
        }
        command
    }
}

/// Quote an argument for display when it holds shell metacharacters
fn shell_quote(arg: &str) -> String {
    let plain = arg
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || "-_./:=@%+,".contains(c));
    if plain && !arg.is_empty() {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}

/// Runs the real external tool as a blocking subprocess
pub struct ProcessToolRunner {
    command: ToolCommand,
}

impl ProcessToolRunner {
    pub fn new(command: ToolCommand) -> Self {
        Self { command }
    }

    pub fn from_config(config: &ToolConfig) -> Self {
        Self::new(ToolCommand::from_config(config))
    }

    pub fn command(&self) -> &ToolCommand {
        &self.command
    }
}

impl ToolRunner for ProcessToolRunner {
    fn invoke(&mut self, formula: &str, stats_path: &Path) -> Result<ToolStatus> {
        debug!("Running: {}", self.command.render(formula, stats_path));

        let status = self
            .command
            .build(formula, stats_path)
            .status()
            .map_err(|e| Error::ToolSpawnFailed {
                program: self.command.program.clone(),
                reason: e.to_string(),
            })?;

        Ok(ToolStatus::from(status))
    }
}
