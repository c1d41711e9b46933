use clap::{CommandFactory, FromArgMatches, Parser};

/// Personal dev utilities - shell alias catalog and asdf/mise upgrades
///
/// Every program starts straight into an interactive menu; there are no
/// subcommands or positional arguments.
#[derive(Parser, Debug)]
#[command(author, version, long_about = None)]
pub struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Parse `std::env::args` under the given program name and description.
    pub fn parse_as(name: &'static str, about: &'static str) -> Self {
        let matches = Self::command()
            .name(name)
            .bin_name(name)
            .about(about)
            .get_matches();
        Self::from_arg_matches(&matches).unwrap_or_else(|err| err.exit())
    }
}

/// Install the global tracing subscriber, logging to stderr.
pub fn init_tracing(verbose: bool) {
    let default = if verbose { "devup=debug,warn" } else { "devup=warn" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
