use super::{finish_active, CommandRunner, SystemRunner, Tool, VersionManager, VersionRecord};
use crate::config::AsdfConfig;
use crate::error::{Error, Result};
use std::cell::Cell;
use tracing::debug;

const COMMAND: &str = "asdf";

/// asdf adapter. Reads the plain-text `current` and `list` output.
///
/// asdf takes the tool name and version as separate arguments, so the
/// `name@version` label is only used for display. Both the pre-0.16 CLI
/// (`asdf global`) and the 0.16+ CLI (`asdf set -u`) are supported; the
/// release is recognised from the `current` listing format.
pub struct Asdf<R = SystemRunner> {
    runner: R,
    unhandled: Vec<String>,
    headed: Cell<bool>,
}

impl Asdf {
    pub fn new(config: &AsdfConfig) -> Self {
        Self::with_runner(SystemRunner, config.unhandled.clone())
    }
}

impl<R: CommandRunner> Asdf<R> {
    pub fn with_runner(runner: R, unhandled: Vec<String>) -> Self {
        Self {
            runner,
            unhandled,
            headed: Cell::new(false),
        }
    }

    fn run(&self, args: &[&str]) -> Result<String> {
        self.runner.run(COMMAND, args, &[])
    }
}

impl<R: CommandRunner> VersionManager for Asdf<R> {
    fn command(&self) -> &str {
        COMMAND
    }

    fn exists(&self) -> bool {
        self.runner.exists(COMMAND)
    }

    fn active_tools(&self) -> Result<Vec<Tool>> {
        // Older asdf prints unset and missing versions on stderr and exits
        // non-zero, so the listing is read from both streams.
        let captured = self.runner.capture(COMMAND, &["current"], &[])?;
        let command = format!("{COMMAND} current");

        let listing = match parse_current(&captured.output) {
            Ok(listing) => listing,
            Err(err) if captured.success => return Err(err),
            Err(_) => return Err(captured.into_error(command)),
        };
        if !captured.success {
            if !listing.incomplete {
                return Err(captured.into_error(command));
            }
            debug!(status = %captured.status, "asdf current reported missing versions");
        }

        self.headed.set(listing.headed);
        Ok(finish_active(listing.tools, &self.unhandled))
    }

    fn inactive_versions(&self, name: &str) -> Result<Vec<VersionRecord>> {
        let output = self.run(&["list", name])?;
        Ok(parse_list(&output)
            .into_iter()
            .filter(|record| !record.active)
            .collect())
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
        self.run(&["install", &tool.name, &tool.version]).map(drop)
    }

    fn set_global(&self, tool: &Tool) -> Result<()> {
        if self.headed.get() {
            self.run(&["set", "-u", &tool.name, &tool.version]).map(drop)
        } else {
            self.run(&["global", &tool.name, &tool.version]).map(drop)
        }
    }

    fn uninstall(&self, tool: &Tool) -> Result<()> {
        self.run(&["uninstall", &tool.name, &tool.version]).map(drop)
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
struct CurrentListing {
    tools: Vec<Tool>,
    /// Some row had no version set or a version that is not installed.
    incomplete: bool,
    /// 0.16+ output with a `Name Version Source Installed` header.
    headed: bool,
}

/// Parse `asdf current`.
///
/// Older releases print `name version source`, with `Not installed` in the
/// source column for missing versions. Newer ones add a `Name Version Source
/// Installed` header and a trailing `true`/`false` column.
fn parse_current(output: &str) -> Result<CurrentListing> {
    let mut lines = output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .peekable();

    let headed = lines
        .peek()
        .is_some_and(|line| line.split_whitespace().next() == Some("Name"));
    if headed {
        lines.next();
    }

    let mut listing = CurrentListing {
        headed,
        ..CurrentListing::default()
    };
    for line in lines {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 2 {
            return Err(Error::Parse {
                command: format!("{COMMAND} current"),
                reason: format!("no version in line {line:?}"),
            });
        }

        if fields[1] == "______" || line.contains("No version is set") {
            debug!(tool = fields[0], "no version set");
            listing.incomplete = true;
            continue;
        }

        let installed = if headed {
            fields.last() == Some(&"true")
        } else {
            !line.contains("Not installed")
        };
        listing.incomplete |= !installed;
        listing.tools.push(Tool::new(fields[0], fields[1], installed));
    }
    Ok(listing)
}

/// Parse `asdf list <name>`; the active version is prefixed with `*`.
fn parse_list(output: &str) -> Vec<VersionRecord> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with("No versions"))
        .map(|line| match line.strip_prefix('*') {
            Some(version) => VersionRecord {
                version: version.trim().to_string(),
                active: true,
                installed: true,
            },
            None => VersionRecord {
                version: line.to_string(),
                active: false,
                installed: true,
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manager::testing::FakeRunner;
    use rstest::rstest;

    #[test]
    fn test_parse_current_legacy() {
        let output = "golang          1.22.0          /home/me/.tool-versions\n\
                      nodejs          20.11.0         Not installed. Run \"asdf install nodejs 20.11.0\"\n";
        let listing = parse_current(output).unwrap();
        assert_eq!(
            listing.tools,
            vec![
                Tool::new("golang", "1.22.0", true),
                Tool::new("nodejs", "20.11.0", false),
            ]
        );
        assert!(listing.incomplete);
        assert!(!listing.headed);
    }

    #[test]
    fn test_parse_current_tabular() {
        let output = "Name            Version         Source                   Installed\n\
                      python          3.12.1          /home/me/.tool-versions  true\n\
                      ruby            3.3.0           /home/me/.tool-versions  false\n";
        let listing = parse_current(output).unwrap();
        assert_eq!(
            listing.tools,
            vec![
                Tool::new("python", "3.12.1", true),
                Tool::new("ruby", "3.3.0", false),
            ]
        );
        assert!(listing.headed);
    }

    #[test]
    fn test_parse_current_skips_unset() {
        let output = "lua             ______          No version is set. Run \"asdf <global|shell|local> lua <version>\"\n";
        let listing = parse_current(output).unwrap();
        assert!(listing.tools.is_empty());
        assert!(listing.incomplete);
    }

    #[test]
    fn test_parse_current_complete() {
        let listing = parse_current("golang 1.22.0 ~/.tool-versions\n").unwrap();
        assert!(!listing.incomplete);
    }

    #[test]
    fn test_parse_current_rejects_garbage() {
        let err = parse_current("golang\n").unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }

    #[test]
    fn test_active_tools_accepts_missing_version_exit() {
        let runner = FakeRunner::with_program("asdf").exit(
            "asdf current",
            126,
            "golang 1.22.0 ~/.tool-versions\n\
             nodejs 20.11.0 Not installed. Run \"asdf install nodejs 20.11.0\"\n",
        );
        let asdf = Asdf::with_runner(runner, Vec::new());
        assert_eq!(
            asdf.active_tools().unwrap(),
            vec![
                Tool::new("golang", "1.22.0", true),
                Tool::new("nodejs", "20.11.0", false),
            ]
        );
    }

    #[rstest]
    #[case(1, "No plugins installed")]
    #[case(1, "golang 1.22.0 ~/.tool-versions\n")]
    #[case(126, "")]
    fn test_active_tools_rejects_other_failures(#[case] code: i32, #[case] output: &str) {
        let runner = FakeRunner::with_program("asdf").exit("asdf current", code, output);
        let asdf = Asdf::with_runner(runner, Vec::new());
        let err = asdf.active_tools().unwrap_err();
        match err {
            Error::Subprocess { command, .. } => assert_eq!(command, "asdf current"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[rstest]
    #[case("  3.11.7\n  3.12.0\n *3.13.0\n", vec![("3.11.7", false), ("3.12.0", false), ("3.13.0", true)])]
    #[case("*1.22.0\n", vec![("1.22.0", true)])]
    #[case("  No versions installed\n", vec![])]
    fn test_parse_list(#[case] output: &str, #[case] expected: Vec<(&str, bool)>) {
        let records: Vec<(String, bool)> = parse_list(output)
            .into_iter()
            .map(|r| (r.version, r.active))
            .collect();
        let expected: Vec<(String, bool)> = expected
            .into_iter()
            .map(|(v, a)| (v.to_string(), a))
            .collect();
        assert_eq!(records, expected);
    }

    #[test]
    fn test_active_tools_excludes_unhandled() {
        let runner = FakeRunner::with_program("asdf").ok(
            "asdf current",
            "python 3.12.1 ~/.tool-versions\njava temurin-21.0.1+12.0.LTS ~/.tool-versions\ngolang 1.22.0 ~/.tool-versions\n",
        );
        let asdf = Asdf::with_runner(runner, vec!["java".to_string()]);
        let names: Vec<String> = asdf
            .active_tools()
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, vec!["golang", "python"]);
    }

    #[test]
    fn test_inactive_versions_filters_active() {
        let runner =
            FakeRunner::with_program("asdf").ok("asdf list python", "  3.11.7\n *3.12.1\n");
        let asdf = Asdf::with_runner(runner, Vec::new());
        let inactive = asdf.inactive_versions("python").unwrap();
        assert_eq!(inactive.len(), 1);
        assert_eq!(inactive[0].version, "3.11.7");
    }

    #[test]
    fn test_latest_version_trims() {
        let runner = FakeRunner::with_program("asdf").ok("asdf latest golang", "1.22.1\n");
        let asdf = Asdf::with_runner(runner, Vec::new());
        assert_eq!(
            asdf.latest_version("golang").unwrap(),
            Tool::new("golang", "1.22.1", false)
        );
    }

    #[test]
    fn test_mutations_use_separate_arguments() {
        let runner = FakeRunner::with_program("asdf");
        let asdf = Asdf::with_runner(runner, Vec::new());
        let tool = Tool::new("golang", "1.22.1", false);
        asdf.install(&tool).unwrap();
        asdf.set_global(&tool).unwrap();
        asdf.uninstall(&tool).unwrap();
        assert_eq!(
            asdf.runner.lines(),
            vec![
                "asdf install golang 1.22.1",
                "asdf global golang 1.22.1",
                "asdf uninstall golang 1.22.1",
            ]
        );
    }

    #[rstest]
    #[case("golang 1.22.0 ~/.tool-versions\n", "asdf global golang 1.22.1")]
    #[case(
        "Name Version Source Installed\ngolang 1.22.0 ~/.tool-versions true\n",
        "asdf set -u golang 1.22.1"
    )]
    fn test_set_global_follows_listing_format(#[case] current: &str, #[case] expected: &str) {
        let runner = FakeRunner::with_program("asdf").ok("asdf current", current);
        let asdf = Asdf::with_runner(runner, Vec::new());
        asdf.active_tools().unwrap();
        asdf.set_global(&Tool::new("golang", "1.22.1", false)).unwrap();
        assert_eq!(asdf.runner.lines().last().map(String::as_str), Some(expected));
    }

    #[test]
    fn test_failure_surfaces_output() {
        let runner = FakeRunner::with_program("asdf")
            .fail("asdf install golang 9.9.9", "version not found");
        let asdf = Asdf::with_runner(runner, Vec::new());
        let err = asdf
            .install(&Tool::new("golang", "9.9.9", false))
            .unwrap_err();
        assert!(err.to_string().contains("version not found"));
    }

    #[test]
    fn test_exists() {
        let asdf = Asdf::with_runner(FakeRunner::default(), Vec::new());
        assert!(!asdf.exists());
    }
}
