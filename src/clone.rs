//! Shallow clone of the project template repository.

#![deny(missing_docs)]

use crate::config::Config;
use crate::error::BootstrapResult;
use crate::project::ProjectLayout;
use crate::runner::{Runner, ShellCommand};

/// `git clone -b <branch> --depth 1 --single-branch <repo> <root>`, run from
/// the parent of the project root.
pub fn clone_command(config: &Config, layout: &ProjectLayout) -> ShellCommand {
    let root = layout.root();
    let cwd = root.parent().unwrap_or(root);
    ShellCommand::new(
        "git",
        [
            "clone".to_string(),
            "-b".to_string(),
            config.branch.clone(),
            "--depth".to_string(),
            "1".to_string(),
            "--single-branch".to_string(),
            config.repository.clone(),
            root.to_string_lossy().into_owned(),
        ],
        cwd,
    )
}

/// Clone once. Any failure carries git's own stderr.
pub fn clone_repository(
    runner: &mut dyn Runner,
    config: &Config,
    layout: &ProjectLayout,
) -> BootstrapResult<()> {
    let cmd = clone_command(config, layout);
    runner.run(&cmd)?.check(&cmd)?;
    Ok(())
}
