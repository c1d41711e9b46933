use anyhow::Result;
use devup::cli::{self, Cli};
use devup::{commands, ManagerKind};

fn main() -> Result<()> {
    let cli = Cli::parse_as(
        "update-asdf",
        "Upgrade asdf plugins and uninstall stale versions",
    );
    cli::init_tracing(cli.verbose);

    commands::update(ManagerKind::Asdf)
}
