// src/server.rs
//! `db` subcommands of the cloned project's server.

#![deny(missing_docs)]

use crate::config::Config;
use crate::error::BootstrapResult;
use crate::runner::{CommandOutput, Runner, ShellCommand};
use std::path::Path;

/// A server script invocation reachable from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerTask {
    /// `db flush`
    Flush,
    /// `db download:component:<id>`
    DownloadComponent(String),
}

impl ServerTask {
    /// Argument passed to the `db` script.
    pub fn db_arg(&self) -> String {
        match self {
            ServerTask::Flush => "flush".to_string(),
            ServerTask::DownloadComponent(id) => format!("download:component:{id}"),
        }
    }

    /// Spinner text.
    pub fn describe(&self) -> String {
        match self {
            ServerTask::Flush => "flushing openv0 db".to_string(),
            ServerTask::DownloadComponent(id) => format!("download openv0 component : {id}"),
        }
    }

    /// `<runtime> db <arg>` inside the server directory.
    pub fn command(&self, config: &Config, server_dir: &Path) -> ShellCommand {
        ShellCommand::new(
            config.server_runtime.clone(),
            ["db".to_string(), self.db_arg()],
            server_dir,
        )
    }
}

/// Run the task once and hand back its captured output. The exit status is
/// left to the caller.
pub fn run_task(
    runner: &mut dyn Runner,
    config: &Config,
    server_dir: &Path,
    task: &ServerTask,
) -> BootstrapResult<CommandOutput> {
    let cmd = task.command(config, server_dir);
    let output = runner.run(&cmd)?;
    if !output.success() {
        log::warn!("`{cmd}` exited with {:?}", output.code);
    }
    Ok(output)
}
