//! Logger setup.

#![deny(missing_docs)]

use log::LevelFilter;

/// Map `-q` / `-v LEVEL` onto a level filter.
pub fn level_for(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Off;
    }
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Install the global logger. `RUST_LOG` takes precedence over the flags.
pub fn init(verbose: u8, quiet: bool) {
    env_logger::Builder::new()
        .filter_level(level_for(verbose, quiet))
        .format_timestamp(None)
        .parse_default_env()
        .init();
}
