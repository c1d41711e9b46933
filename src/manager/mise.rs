use super::{finish_active, CommandRunner, SystemRunner, Tool, VersionManager, VersionRecord};
use crate::config::MiseConfig;
use crate::error::{Error, Result};
use std::collections::BTreeMap;
use tracing::debug;

const COMMAND: &str = "mise";

/// mise adapter. Reads the JSON output of `mise ls`.
pub struct Mise<R = SystemRunner> {
    runner: R,
    unhandled: Vec<String>,
    openssl_tools: Vec<String>,
}

impl Mise {
    pub fn new(config: &MiseConfig) -> Self {
        Self::with_runner(
            SystemRunner,
            config.unhandled.clone(),
            config.openssl_tools.clone(),
        )
    }
}

impl<R: CommandRunner> Mise<R> {
    pub fn with_runner(runner: R, unhandled: Vec<String>, openssl_tools: Vec<String>) -> Self {
        Self {
            runner,
            unhandled,
            openssl_tools,
        }
    }

    fn run(&self, args: &[&str]) -> Result<String> {
        self.runner.run(COMMAND, args, &[])
    }

    /// Extra environment for building `tool` from source.
    ///
    /// Tools listed in `openssl_tools` are pointed at Homebrew's openssl when
    /// `brew` is available.
    fn install_env(&self, tool: &Tool) -> Result<Vec<(String, String)>> {
        if !self.openssl_tools.iter().any(|name| name == &tool.name) {
            return Ok(Vec::new());
        }
        if !self.runner.exists("brew") {
            debug!(tool = %tool.name, "brew not found, building without openssl prefix");
            return Ok(Vec::new());
        }

        let prefix = self.runner.run("brew", &["--prefix", "openssl"], &[])?;
        Ok(vec![(
            "RUBY_CONFIGURE_OPTS".to_string(),
            format!("--with-openssl-dir={}", prefix.trim()),
        )])
    }
}

impl<R: CommandRunner> VersionManager for Mise<R> {
    fn command(&self) -> &str {
        COMMAND
    }

    fn exists(&self) -> bool {
        self.runner.exists(COMMAND)
    }

    fn active_tools(&self) -> Result<Vec<Tool>> {
        let output = self.run(&["ls", "--current", "--json"])?;
        let listing: BTreeMap<String, Vec<VersionRecord>> =
            serde_json::from_str(&output).map_err(|err| Error::Parse {
                command: format!("{COMMAND} ls --current --json"),
                reason: err.to_string(),
            })?;

        let mut tools = Vec::new();
        for (name, records) in listing {
            let record = records
                .iter()
                .find(|record| record.active)
                .or_else(|| records.first());
            match record {
                Some(record) => tools.push(Tool::new(&name, &record.version, record.installed)),
                None => debug!(tool = %name, "no versions listed"),
            }
        }
        Ok(finish_active(tools, &self.unhandled))
    }

    fn inactive_versions(&self, name: &str) -> Result<Vec<VersionRecord>> {
        let output = self.run(&["ls", "--json", name])?;
        let records: Vec<VersionRecord> =
            serde_json::from_str(&output).map_err(|err| Error::Parse {
                command: format!("{COMMAND} ls --json {name}"),
                reason: err.to_string(),
            })?;
        Ok(records.into_iter().filter(|record| !record.active).collect())
    }

    fn latest_version(&self, name: &str) -> Result<Tool> {
        let output = self.run(&["latest", name])?;
        let version = output.trim();
        if version.is_empty() {
            return Err(Error::Parse {
                command: format!("{COMMAND} latest {name}"),
                reason: "empty version".to_string(),
            });
        }
        Ok(Tool::new(name, version, false))
    }

    fn install(&self, tool: &Tool) -> Result<()> {
        let env = self.install_env(tool)?;
        self.runner
            .run(COMMAND, &["install", &tool.label()], &env)
            .map(drop)
    }

    fn set_global(&self, tool: &Tool) -> Result<()> {
        self.run(&["use", "--global", &tool.label()]).map(drop)
    }

    fn uninstall(&self, tool: &Tool) -> Result<()> {
        self.run(&["uninstall", &tool.label()]).map(drop)
    }
}
