use crate::error::Result;
use crate::manager::{Tool, VersionManager};
use crate::select::Prompter;
use crate::ui::Ui;
use std::fmt;
use tracing::debug;

/// Per-tool progress through the upgrade workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Fetching,
    Updating,
    CleaningUp,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Fetching => "fetching",
            Stage::Updating => "updating",
            Stage::CleaningUp => "cleaning-up",
            Stage::Done => "done",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    AlreadyLatest,
    Declined,
    Upgraded(Tool),
}

/// What happened to one tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub tool: String,
    pub update: UpdateOutcome,
    pub removed: Vec<String>,
    pub kept: Vec<String>,
}

/// Upgrade-then-cleanup loop over selected tools.
///
/// Strictly sequential. The first error stops the run, including any tools
/// still queued.
pub struct Reconciler<'a, M: ?Sized, P: ?Sized> {
    manager: &'a M,
    prompter: &'a P,
    ui: &'a Ui,
}

impl<'a, M, P> Reconciler<'a, M, P>
where
    M: VersionManager + ?Sized,
    P: Prompter + ?Sized,
{
    pub fn new(manager: &'a M, prompter: &'a P, ui: &'a Ui) -> Self {
        Self {
            manager,
            prompter,
            ui,
        }
    }

    pub fn run(&self, tools: &[Tool]) -> Result<Vec<Report>> {
        let mut reports = Vec::with_capacity(tools.len());
        for tool in tools {
            reports.push(self.manage(tool)?);
        }
        Ok(reports)
    }

    pub fn manage(&self, current: &Tool) -> Result<Report> {
        self.ui.title("Handling", &current.name);

        debug!(tool = %current.name, stage = %Stage::Fetching, "entering stage");
        let latest = self.manager.latest_version(&current.name)?;

        debug!(tool = %current.name, stage = %Stage::Updating, "entering stage");
        let update = self.update(current, &latest)?;

        debug!(tool = %current.name, stage = %Stage::CleaningUp, "entering stage");
        let (removed, kept) = self.cleanup(&current.name)?;

        debug!(tool = %current.name, stage = %Stage::Done, "entering stage");
        Ok(Report {
            tool: current.name.clone(),
            update,
            removed,
            kept,
        })
    }

    fn update(&self, current: &Tool, latest: &Tool) -> Result<UpdateOutcome> {
        self.ui.section(
            "Update",
            format!("{} -> {}", current.version, latest.version),
        );

        // Plain string comparison: managers report "latest" in the same
        // normalized form they use for installed versions.
        if current.installed && current.version == latest.version {
            self.ui.skip("Skipped", "already using latest version");
            return Ok(UpdateOutcome::AlreadyLatest);
        }

        let prompt = format!("Upgrade {} to {}?", current.name, latest.version);
        if !self.prompter.confirm(&prompt)? {
            self.ui.skip("Skipped", "user request");
            return Ok(UpdateOutcome::Declined);
        }

        self.ui.action("Installing", latest.label());
        self.manager.install(latest)?;
        self.ui.action("Global", latest.label());
        self.manager.set_global(latest)?;

        Ok(UpdateOutcome::Upgraded(Tool::new(
            &latest.name,
            &latest.version,
            true,
        )))
    }

    fn cleanup(&self, name: &str) -> Result<(Vec<String>, Vec<String>)> {
        let inactive = self.manager.inactive_versions(name)?;
        if inactive.is_empty() {
            self.ui.skip("Cleanup", "no inactive versions");
            return Ok((Vec::new(), Vec::new()));
        }

        let mut removed = Vec::new();
        let mut kept = Vec::new();
        for record in inactive {
            self.ui.section("Cleanup", &record.version);

            let tool = record.into_tool(name);
            if !self.prompter.confirm(&format!("Uninstall {}?", tool.label()))? {
                self.ui.skip("Skipped", "user request");
                kept.push(tool.version);
                continue;
            }

            self.ui.action("Uninstalling", tool.label());
            self.manager.uninstall(&tool)?;
            removed.push(tool.version);
        }
        Ok((removed, kept))
    }
}
