use crate::manager::{Asdf, ManagerKind, Mise};
use crate::select::TermPrompter;
use crate::ui::{Palette, Ui};
use crate::Config;
use anyhow::Result;

mod als;
mod update;

pub use als::Action;

/// Entry point of the `als` program.
pub fn als() -> Result<()> {
    let config = Config::load_default()?;
    als::execute(&config, &TermPrompter)
}

/// Entry point of the `update-asdf` / `update-mise` programs.
pub fn update(kind: ManagerKind) -> Result<()> {
    let config = Config::load_default()?;
    let ui = Ui::new(Palette::default());

    match kind {
        ManagerKind::Asdf => update::execute(&Asdf::new(&config.asdf), &TermPrompter, &ui),
        ManagerKind::Mise => update::execute(&Mise::new(&config.mise), &TermPrompter, &ui),
    }
}
