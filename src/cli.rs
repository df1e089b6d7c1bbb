//! CLI argument parser for openv0.

#![deny(missing_docs)]

use clap::Parser;

/// Bootstrap an openv0 project in the current directory.
#[derive(Parser, Debug)]
#[command(
    name = "openv0",
    version,
    about = "Bootstrap an openv0 project in the current directory",
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Set verbosity level: -v=1, -v=2, -v=3
    #[arg(
        short = 'v',
        long = "verbose",
        value_name = "LEVEL",
        default_value_t = 0,
        value_parser = clap::value_parser!(u8).range(0..=3),
        global = true
    )]
    pub verbose: u8,

    /// Silence all output (overrides -v).
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Fail when the server script exits non-zero (`flush`, `@scope/name`).
    #[arg(long)]
    pub strict: bool,

    /// `flush` to empty the project database, `@scope/name` to download a
    /// component. Omit to run the interactive setup.
    #[arg(value_name = "COMMAND")]
    pub command: Option<String>,
}

impl Cli {
    /// Where the first positional argument sends us.
    pub fn route(&self) -> Route {
        Route::from_arg(self.command.as_deref())
    }
}

/// Dispatch target derived from the first positional argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// No argument: interactive bootstrap.
    Bootstrap,
    /// `flush`: empty the cloned project's database.
    Flush,
    /// `@scope/name`: download one component into the cloned project.
    Download(String),
    /// Anything else.
    Unrecognized(String),
}

impl Route {
    /// Classify the raw first argument.
    pub fn from_arg(arg: Option<&str>) -> Route {
        match arg {
            None => Route::Bootstrap,
            Some("flush") => Route::Flush,
            Some(a) if is_component_id(a) => Route::Download(a.to_string()),
            Some(a) => Route::Unrecognized(a.to_string()),
        }
    }
}

/// `@<namespace>/<name>` with both parts non-empty.
fn is_component_id(arg: &str) -> bool {
    arg.strip_prefix('@')
        .and_then(|rest| rest.split_once('/'))
        .is_some_and(|(scope, name)| !scope.is_empty() && !name.is_empty())
}
