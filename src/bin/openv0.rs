// src/bin/openv0.rs
//! openv0 CLI binary.

#![deny(missing_docs)]

use anyhow::bail;
use clap::Parser;
use colored::Colorize;
use std::env;
use std::process::ExitCode;

use openv0_bootstrap::bootstrap::{Bootstrap, usage_banner};
use openv0_bootstrap::cli::{self, Route};
use openv0_bootstrap::config::Config;
use openv0_bootstrap::env_file::API_KEY_VAR;
use openv0_bootstrap::error::BootstrapResult;
use openv0_bootstrap::logging;
use openv0_bootstrap::progress::Step;
use openv0_bootstrap::project::ProjectLayout;
use openv0_bootstrap::prompt::TerminalPrompter;
use openv0_bootstrap::runner::ProcessRunner;
use openv0_bootstrap::server::{ServerTask, run_task};

fn main() -> ExitCode {
    let args = cli::Cli::parse();
    logging::init(args.verbose, args.quiet);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err:#}", "Error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(args: &cli::Cli) -> BootstrapResult<()> {
    let task = match args.route() {
        Route::Bootstrap => return bootstrap(args),
        Route::Flush => ServerTask::Flush,
        Route::Download(id) => ServerTask::DownloadComponent(id),
        Route::Unrecognized(arg) => {
            bail!("unrecognized command '{arg}'. Expected `flush`, `@scope/name`, or no argument")
        }
    };

    let cwd = env::current_dir()?;
    let cfg = Config::load_or_default(&cwd)?;
    let server_dir = ProjectLayout::new(&cwd, &cfg.project_dir).require_server()?;

    let step = Step::start(task.describe(), args.quiet);
    let output = run_task(&mut ProcessRunner, &cfg, &server_dir, &task)?;
    step.suspend(|| {
        if !output.stdout.trim().is_empty() {
            println!("{}", output.stdout.trim());
        }
        if !output.stderr.trim().is_empty() {
            eprintln!("{}", output.stderr.trim());
        }
    });

    if args.strict && !output.success() {
        step.fail("failed");
        let how = output
            .code
            .map_or_else(|| "a signal".to_string(), |c| format!("status {c}"));
        bail!("`db {}` exited with {how}", task.db_arg());
    }
    step.succeed("done");
    Ok(())
}

fn bootstrap(args: &cli::Cli) -> BootstrapResult<()> {
    let cwd = env::current_dir()?;
    let cfg = Config::load_or_default(&cwd)?;
    let key_in_environment = env::var_os(API_KEY_VAR).is_some_and(|v| !v.is_empty());

    let report = Bootstrap::new(&cfg, &cwd, args.quiet).run(
        &mut TerminalPrompter::default(),
        &mut ProcessRunner,
        key_in_environment,
    )?;

    for (stage, why) in &report.degraded {
        eprintln!("{} {stage}: {why}", "warning:".yellow().bold());
    }
    if !args.quiet {
        println!("{}", usage_banner(&cfg.project_dir));
    }
    Ok(())
}
