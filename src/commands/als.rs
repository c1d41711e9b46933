use crate::alias::Catalog;
use crate::select::{self, Prompter};
use crate::Config;
use anyhow::{Context, Result};
use std::io::{self, Write};

/// Top-level menu entries of the `als` program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    GetByAlias,
    GetByGroup,
    UpdateAliases,
}

impl Action {
    pub const ALL: [Action; 3] = [Action::GetByAlias, Action::GetByGroup, Action::UpdateAliases];

    pub fn label(self) -> &'static str {
        match self {
            Action::GetByAlias => "Get by Alias",
            Action::GetByGroup => "Get by Group",
            Action::UpdateAliases => "Update Aliases",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.label() == label)
    }

    /// Menu labels in sorted order.
    pub fn menu() -> Vec<String> {
        let mut labels: Vec<String> = Self::ALL.iter().map(|a| a.label().to_string()).collect();
        labels.sort();
        labels
    }
}

pub fn execute<P: Prompter + ?Sized>(config: &Config, prompter: &P) -> Result<()> {
    let catalog = Catalog::builtin().context("Built-in alias catalog is invalid")?;

    let menu = Action::menu();
    let choice = select::pick(prompter, "Select command", &menu)?;
    let action = Action::from_label(choice)
        .with_context(|| format!("Unknown command {choice:?}"))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match action {
        Action::GetByAlias => get_by_alias(&catalog, prompter, &mut out),
        Action::GetByGroup => get_by_group(&catalog, prompter, &mut out),
        Action::UpdateAliases => update_aliases(&catalog, config, prompter, &mut out),
    }
}

fn get_by_alias<P, W>(catalog: &Catalog, prompter: &P, out: &mut W) -> Result<()>
where
    P: Prompter + ?Sized,
    W: Write,
{
    let values: Vec<String> = catalog.aliases().map(|alias| alias.summary()).collect();
    let selected = select::pick(prompter, "Select alias", &values)?;
    writeln!(out, "{selected}")?;
    Ok(())
}

fn get_by_group<P, W>(catalog: &Catalog, prompter: &P, out: &mut W) -> Result<()>
where
    P: Prompter + ?Sized,
    W: Write,
{
    let names = catalog.group_names();
    let selected = select::pick(prompter, "Select group", &names)?;
    writeln!(out, "{selected}")?;

    if let Some(group) = catalog.group(selected) {
        let json = serde_json::to_string_pretty(&group.to_map())?;
        writeln!(out, "{json}")?;
    }
    Ok(())
}

fn update_aliases<P, W>(
    catalog: &Catalog,
    config: &Config,
    prompter: &P,
    out: &mut W,
) -> Result<()>
where
    P: Prompter + ?Sized,
    W: Write,
{
    if !prompter.confirm("Are you sure you want to update aliases?")? {
        writeln!(out, "Skipping update")?;
        return Ok(());
    }

    let path = config.alias_path()?;
    catalog
        .export(&path)
        .with_context(|| format!("Failed to write alias file {:?}", path))?;
    writeln!(out, "Successfully updated {}", path.display())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alias::{AliasEntry, AliasGroup};
    use crate::select::testing::ScriptedPrompter;
    use std::fs;
    use tempfile::TempDir;

    fn catalog() -> Catalog {
        Catalog::new(vec![
            AliasGroup::new(
                "Git",
                vec![
                    AliasEntry::new("gs", "git status -uall"),
                    AliasEntry::new("ga", "git add --all"),
                ],
            ),
            AliasGroup::new("General", vec![AliasEntry::new("ll", "ls -latr")]),
        ])
        .unwrap()
    }

    fn config_in(temp: &TempDir) -> Config {
        Config {
            alias_file: temp
                .path()
                .join("shell/aliases.sh")
                .to_string_lossy()
                .into_owned(),
            ..Config::default()
        }
    }

    #[test]
    fn test_menu_sorted_and_round_trips() {
        let menu = Action::menu();
        assert_eq!(menu, vec!["Get by Alias", "Get by Group", "Update Aliases"]);
        for label in &menu {
            assert_eq!(Action::from_label(label).unwrap().label(), label.as_str());
        }
    }

    #[test]
    fn test_get_by_alias_prints_summary() {
        let prompter = ScriptedPrompter::default();
        prompter.picks.borrow_mut().push_back(2);
        let mut out = Vec::new();
        get_by_alias(&catalog(), &prompter, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "ll: ls -latr\n");
    }

    #[test]
    fn test_get_by_group_prints_sorted_json() {
        let prompter = ScriptedPrompter::default();
        prompter.picks.borrow_mut().push_back(0);
        let mut out = Vec::new();
        get_by_group(&catalog(), &prompter, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Git\n{\n  \"ga\": \"git add --all\",\n  \"gs\": \"git status -uall\"\n}\n"
        );
    }

    #[test]
    fn test_update_declined_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let config = config_in(&temp);
        let prompter = ScriptedPrompter::confirming(&[false]);
        let mut out = Vec::new();

        update_aliases(&catalog(), &config, &prompter, &mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "Skipping update\n");
        assert!(!config.alias_path().unwrap().exists());
    }

    #[test]
    fn test_update_confirmed_writes_file() {
        let temp = TempDir::new().unwrap();
        let config = config_in(&temp);
        let prompter = ScriptedPrompter::confirming(&[true]);
        let mut out = Vec::new();

        update_aliases(&catalog(), &config, &prompter, &mut out).unwrap();

        let path = config.alias_path().unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), catalog().render());
        assert!(String::from_utf8(out)
            .unwrap()
            .starts_with("Successfully updated "));
    }
}
