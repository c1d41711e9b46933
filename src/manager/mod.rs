use crate::error::{Error, Result};
use serde::Deserialize;
use std::fmt;
use std::process::{Command, Output};
use tracing::debug;

mod asdf;
mod mise;

pub use asdf::Asdf;
pub use mise::Mise;

/// Snapshot of a tool as reported by the version manager.
///
/// Never mutated: discovering a new version (for example "latest") produces
/// a fresh `Tool`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tool {
    pub name: String,
    pub version: String,
    pub installed: bool,
}

impl Tool {
    pub fn new(name: impl Into<String>, version: impl Into<String>, installed: bool) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            installed,
        }
    }

    /// `name@version`, as passed to install/uninstall/global.
    pub fn label(&self) -> String {
        format!("{}@{}", self.name, self.version)
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.version)
    }
}

/// One version of a tool from the "list all versions" query.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VersionRecord {
    pub version: String,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub installed: bool,
}

impl VersionRecord {
    pub fn into_tool(self, name: &str) -> Tool {
        Tool::new(name, self.version, self.installed)
    }
}

/// Supported version managers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManagerKind {
    Asdf,
    Mise,
}

impl ManagerKind {
    pub fn command(self) -> &'static str {
        match self {
            ManagerKind::Asdf => "asdf",
            ManagerKind::Mise => "mise",
        }
    }
}

/// Adapter over an external version-manager executable.
///
/// Mutating calls change persistent state owned by the manager and cannot be
/// undone from here.
pub trait VersionManager {
    /// Executable name, used in messages.
    fn command(&self) -> &str;

    /// True if the executable resolves on `PATH`.
    fn exists(&self) -> bool;

    /// Active tools sorted by name, with unhandled tools removed.
    fn active_tools(&self) -> Result<Vec<Tool>>;

    /// Installed versions of `name` that are not active.
    fn inactive_versions(&self, name: &str) -> Result<Vec<VersionRecord>>;

    /// Newest available version of `name`. Always `installed == false`.
    fn latest_version(&self, name: &str) -> Result<Tool>;

    fn install(&self, tool: &Tool) -> Result<()>;

    fn set_global(&self, tool: &Tool) -> Result<()>;

    fn uninstall(&self, tool: &Tool) -> Result<()>;
}

/// Exit status and merged output of a finished command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Captured {
    pub success: bool,
    pub status: String,
    /// stdout followed by stderr.
    pub output: String,
}

impl Captured {
    pub fn into_error(self, command: String) -> Error {
        Error::Subprocess {
            command,
            status: self.status,
            output: self.output.trim_end().to_string(),
        }
    }
}

/// Process execution seam so adapters can be driven by canned output.
pub trait CommandRunner {
    fn exists(&self, program: &str) -> bool;

    /// Run to completion and return stdout. A non-zero exit is an
    /// [`Error::Subprocess`] carrying stdout and stderr.
    fn run(&self, program: &str, args: &[&str], env: &[(String, String)]) -> Result<String>;

    /// Run to completion and return both streams whatever the exit status.
    /// Only a failure to start the process is an error.
    fn capture(&self, program: &str, args: &[&str], env: &[(String, String)])
        -> Result<Captured>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    fn output(program: &str, args: &[&str], env: &[(String, String)]) -> Result<Output> {
        debug!(command = %command_line(program, args), "running");
        Ok(Command::new(program)
            .args(args)
            .envs(env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .output()?)
    }
}

fn merge(output: &Output) -> String {
    let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
    combined.push_str(&String::from_utf8_lossy(&output.stderr));
    combined
}

impl CommandRunner for SystemRunner {
    fn exists(&self, program: &str) -> bool {
        which::which(program).is_ok()
    }

    fn run(&self, program: &str, args: &[&str], env: &[(String, String)]) -> Result<String> {
        let output = Self::output(program, args, env)?;
        if output.status.success() {
            return Ok(String::from_utf8_lossy(&output.stdout).into_owned());
        }

        let captured = Captured {
            success: false,
            status: output.status.to_string(),
            output: merge(&output),
        };
        Err(captured.into_error(command_line(program, args)))
    }

    fn capture(
        &self,
        program: &str,
        args: &[&str],
        env: &[(String, String)],
    ) -> Result<Captured> {
        let output = Self::output(program, args, env)?;
        Ok(Captured {
            success: output.status.success(),
            status: output.status.to_string(),
            output: merge(&output),
        })
    }
}

pub(crate) fn command_line(program: &str, args: &[&str]) -> String {
    let mut line = program.to_string();
    for arg in args {
        line.push(' ');
        line.push_str(arg);
    }
    line
}

/// Drop unhandled tools and order the rest by name.
pub(crate) fn finish_active(mut tools: Vec<Tool>, unhandled: &[String]) -> Vec<Tool> {
    tools.retain(|tool| {
        let skip = unhandled.iter().any(|name| name == &tool.name);
        if skip {
            debug!(tool = %tool.name, "excluding unhandled tool");
        }
        !skip
    });
    tools.sort_by(|a, b| a.name.cmp(&b.name));
    tools
}
