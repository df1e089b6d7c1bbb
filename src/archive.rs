//! Icon index extraction.

#![deny(missing_docs)]

use crate::config::Config;
use crate::error::BootstrapResult;
use crate::project::ProjectLayout;
use crate::runner::{Runner, ShellCommand};
use anyhow::Context;
use std::fs;

/// `7z x -y -o<dir> <archive>`.
pub fn extract_command(config: &Config, layout: &ProjectLayout) -> ShellCommand {
    let dir = layout.vectordb_dir();
    let archive = layout.vectordb_archive();
    ShellCommand::new(
        config.archiver.clone(),
        [
            "x".to_string(),
            "-y".to_string(),
            format!("-o{}", dir.display()),
            archive.to_string_lossy().into_owned(),
        ],
        &dir,
    )
}

/// Unpack the bundled index next to itself, then delete the archive.
pub fn extract_icon_index(
    runner: &mut dyn Runner,
    config: &Config,
    layout: &ProjectLayout,
) -> BootstrapResult<()> {
    let archive = layout.vectordb_archive();
    fs::metadata(&archive).with_context(|| format!("icon index missing: {}", archive.display()))?;

    let cmd = extract_command(config, layout);
    runner.run(&cmd)?.check(&cmd)?;

    fs::remove_file(&archive).with_context(|| format!("removing {}", archive.display()))
}
