use crate::error::Error;
use crate::manager::VersionManager;
use crate::reconcile::Reconciler;
use crate::select::{self, Prompter};
use crate::ui::Ui;
use anyhow::{Context, Result};
use tracing::debug;

const SELECT_TITLE: &str = "Select plugins to update (all if none selected)";

pub fn execute<M, P>(manager: &M, prompter: &P, ui: &Ui) -> Result<()>
where
    M: VersionManager + ?Sized,
    P: Prompter + ?Sized,
{
    // A missing manager is reported but is not a failure.
    if !manager.exists() {
        ui.error(Error::ToolNotFound {
            command: manager.command().to_string(),
        });
        return Ok(());
    }

    let tools = manager
        .active_tools()
        .with_context(|| format!("Failed to list active {} tools", manager.command()))?;
    if tools.is_empty() {
        ui.skip("Skipped", "no active tools");
        return Ok(());
    }

    let chosen = select::choose(prompter, SELECT_TITLE, &tools, |tool| tool.to_string())?;
    let reports = Reconciler::new(manager, prompter, ui).run(&chosen)?;
    debug!(tools = reports.len(), "update finished");
    Ok(())
}
