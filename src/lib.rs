// Public API
pub mod cli;
pub mod commands;

// Core domain types
pub mod alias;
mod config;
mod error;
pub mod manager;
pub mod reconcile;
pub mod select;
pub mod ui;
mod util;

// Re-export main types
pub use alias::{AliasEntry, AliasGroup, Catalog};
pub use config::{AsdfConfig, Config, MiseConfig};
pub use error::{Error, NameKind, Result};
pub use manager::{ManagerKind, Tool, VersionManager, VersionRecord};
pub use reconcile::{Reconciler, Report, Stage, UpdateOutcome};
