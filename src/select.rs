use crate::error::{Error, Result};
use dialoguer::{Confirm, MultiSelect, Select};

/// Interactive prompts. Aborting a prompt is an error.
pub trait Prompter {
    /// Indices of the chosen items; empty when the user confirms nothing.
    fn multi_select(&self, title: &str, items: &[String]) -> Result<Vec<usize>>;

    fn select(&self, title: &str, items: &[String]) -> Result<usize>;

    fn confirm(&self, title: &str) -> Result<bool>;
}

/// Terminal prompts backed by `dialoguer`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TermPrompter;

impl Prompter for TermPrompter {
    fn multi_select(&self, title: &str, items: &[String]) -> Result<Vec<usize>> {
        Ok(MultiSelect::new()
            .with_prompt(title)
            .items(items)
            .interact()?)
    }

    fn select(&self, title: &str, items: &[String]) -> Result<usize> {
        Ok(Select::new()
            .with_prompt(title)
            .items(items)
            .default(0)
            .interact()?)
    }

    fn confirm(&self, title: &str) -> Result<bool> {
        Ok(Confirm::new()
            .with_prompt(title)
            .default(false)
            .interact()?)
    }
}

/// Multi-select over `candidates`. Choosing nothing means choosing
/// everything. The result keeps candidate order.
pub fn choose<T, P, F>(prompter: &P, title: &str, candidates: &[T], label: F) -> Result<Vec<T>>
where
    T: Clone,
    P: Prompter + ?Sized,
    F: Fn(&T) -> String,
{
    if candidates.is_empty() {
        return Ok(Vec::new());
    }

    let labels: Vec<String> = candidates.iter().map(label).collect();
    let mut chosen = prompter.multi_select(title, &labels)?;
    if chosen.is_empty() {
        return Ok(candidates.to_vec());
    }

    chosen.sort_unstable();
    chosen.dedup();
    Ok(chosen
        .into_iter()
        .filter_map(|idx| candidates.get(idx).cloned())
        .collect())
}

/// Single choice from `items`, returning the chosen item.
pub fn pick<'a, P>(prompter: &P, title: &str, items: &'a [String]) -> Result<&'a str>
where
    P: Prompter + ?Sized,
{
    let index = prompter.select(title, items)?;
    items
        .get(index)
        .map(String::as_str)
        .ok_or_else(|| Error::Selection {
            title: title.to_string(),
            index,
        })
}
