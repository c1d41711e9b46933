use crate::error::{Error, NameKind, Result};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

mod builtin;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasEntry {
    pub name: String,
    pub command: String,
}

impl AliasEntry {
    pub fn new(name: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            command: command.into(),
        }
    }

    /// `name: command`, as shown in the alias picker.
    pub fn summary(&self) -> String {
        format!("{}: {}", self.name, self.command)
    }

    /// Shell definition line (without trailing newline).
    pub fn definition(&self) -> String {
        format!("alias {}=\"{}\"", self.name, self.command)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasGroup {
    pub name: String,
    pub aliases: Vec<AliasEntry>,
}

impl AliasGroup {
    pub fn new(name: impl Into<String>, aliases: Vec<AliasEntry>) -> Self {
        Self {
            name: name.into(),
            aliases,
        }
    }

    /// Alias name to command, ordered by name.
    pub fn to_map(&self) -> BTreeMap<&str, &str> {
        self.aliases
            .iter()
            .map(|alias| (alias.name.as_str(), alias.command.as_str()))
            .collect()
    }
}

/// Ordered, validated collection of alias groups.
///
/// Group names and alias names are each unique across the whole catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    groups: Vec<AliasGroup>,
}

impl Catalog {
    pub fn new(groups: Vec<AliasGroup>) -> Result<Self> {
        let catalog = Self { groups };
        catalog.validate()?;
        Ok(catalog)
    }

    /// The compiled-in catalog.
    pub fn builtin() -> Result<Self> {
        Self::new(builtin::groups())
    }

    pub fn validate(&self) -> Result<()> {
        let mut group_names = HashSet::new();
        let mut alias_names = HashSet::new();

        for group in &self.groups {
            if !group_names.insert(group.name.as_str()) {
                return Err(Error::DuplicateName {
                    kind: NameKind::Group,
                    name: group.name.clone(),
                });
            }
            for alias in &group.aliases {
                if !alias_names.insert(alias.name.as_str()) {
                    return Err(Error::DuplicateName {
                        kind: NameKind::Alias,
                        name: alias.name.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn groups(&self) -> &[AliasGroup] {
        &self.groups
    }

    pub fn group(&self, name: &str) -> Option<&AliasGroup> {
        self.groups.iter().find(|group| group.name == name)
    }

    pub fn group_names(&self) -> Vec<String> {
        self.groups.iter().map(|group| group.name.clone()).collect()
    }

    pub fn aliases(&self) -> impl Iterator<Item = &AliasEntry> {
        self.groups.iter().flat_map(|group| group.aliases.iter())
    }

    /// Shell script defining every alias, grouped under `# Group` headers
    /// with a blank line after each group.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for group in &self.groups {
            out.push_str(&format!("# {}\n", group.name));
            for alias in &group.aliases {
                out.push_str(&alias.definition());
                out.push('\n');
            }
            out.push('\n');
        }
        out
    }

    /// Overwrite `path` with [`Catalog::render`]. Existing content is not
    /// merged.
    pub fn export(&self, path: &Path) -> Result<()> {
        self.validate()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.render())?;
        Ok(())
    }
}
