use anyhow::Result;
use devup::cli::{self, Cli};
use devup::commands;

fn main() -> Result<()> {
    let cli = Cli::parse_as("als", "Browse the shell alias catalog and export it");
    cli::init_tracing(cli.verbose);

    commands::als()
}
