// src/bootstrap.rs
//! The interactive bootstrap flow.
//!
//! Stages run strictly in order, each one working on the files the previous
//! one left behind: clone, materialize the webapp, clean up, write
//! `server/.env`, extract the icon index, install packages. Nothing touches
//! the disk until every question has been answered.

#![deny(missing_docs)]

use crate::archive::extract_icon_index;
use crate::clone::clone_repository;
use crate::config::Config;
use crate::env_file::EnvConfig;
use crate::error::{BootstrapResult, Policy, Stage, StageOutcome, settle};
use crate::install::{install, install_plan};
use crate::progress::Step;
use crate::project::ProjectLayout;
use crate::prompt::{Prompter, collect_selections};
use crate::runner::Runner;
use crate::template::{cleanup, materialize};
use std::path::Path;

/// Best-effort stages that did not complete.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Report {
    /// Stage and diagnostic, in run order.
    pub degraded: Vec<(Stage, String)>,
}

impl Report {
    /// Every stage completed.
    pub fn is_clean(&self) -> bool {
        self.degraded.is_empty()
    }
}

/// One bootstrap run in a working directory.
pub struct Bootstrap<'a> {
    config: &'a Config,
    layout: ProjectLayout,
    quiet: bool,
}

impl<'a> Bootstrap<'a> {
    /// Prepare a run creating `<cwd>/<config.project_dir>`.
    pub fn new(config: &'a Config, cwd: &Path, quiet: bool) -> Self {
        Self {
            config,
            layout: ProjectLayout::new(cwd, &config.project_dir),
            quiet,
        }
    }

    /// Paths of the project being created.
    pub fn layout(&self) -> &ProjectLayout {
        &self.layout
    }

    /// Ask the questions, then run every stage.
    ///
    /// `key_in_environment` tells whether `OPENAI_API_KEY` is already set for
    /// the server, in which case the typed key is not written.
    pub fn run(
        &self,
        prompter: &mut dyn Prompter,
        runner: &mut dyn Runner,
        key_in_environment: bool,
    ) -> BootstrapResult<Report> {
        let selections = collect_selections(prompter)?;
        let env = EnvConfig::build(&selections, key_in_environment);
        let layout = &self.layout;
        let mut report = Report::default();

        layout.ensure_root()?;

        self.stage(
            &mut report,
            Stage::Clone,
            format!("cloning {} in {}", self.config.repository, layout.root().display()),
            |_| clone_repository(runner, self.config, layout),
        )?;

        let starter = format!(
            "webapps-starters/{}/{}",
            selections.framework, selections.components
        );
        self.stage(
            &mut report,
            Stage::Materialize,
            format!("creating {} from : {starter}", layout.webapp().display()),
            |_| materialize(layout, selections.framework, &selections.components).map(|_| ()),
        )?;

        self.stage(&mut report, Stage::Cleanup, "cleaning files".into(), |_| {
            cleanup(layout)
        })?;

        let env_path = layout.env_file();
        self.stage(
            &mut report,
            Stage::WriteConfig,
            format!("creating {}", env_path.display()),
            |_| env.write_to(&env_path),
        )?;

        self.stage(
            &mut report,
            Stage::Extract,
            format!(
                "extracting {} to {}",
                layout.vectordb_archive().display(),
                layout.vectordb_dir().display()
            ),
            |_| extract_icon_index(runner, self.config, layout),
        )?;

        for (stage, cmd) in install_plan(self.config, layout) {
            self.stage(
                &mut report,
                stage,
                format!("installing packages in {}", cmd.cwd.display()),
                |step| step.suspend(|| install(runner, &cmd)),
            )?;
        }

        Ok(report)
    }

    fn stage(
        &self,
        report: &mut Report,
        stage: Stage,
        message: String,
        body: impl FnOnce(&Step) -> BootstrapResult<()>,
    ) -> BootstrapResult<()> {
        let step = Step::start(message, self.quiet);
        let result = body(&step);
        match (&result, stage.policy()) {
            (Ok(()), _) => step.succeed(stage.to_string()),
            (Err(_), Policy::BestEffort) => step.warn(format!("{stage} incomplete")),
            (Err(_), Policy::Fatal) => step.fail(format!("{stage} failed")),
        }
        if let StageOutcome::Degraded(why) = settle(stage, result)? {
            report.degraded.push((stage, why));
        }
        Ok(())
    }
}

/// Next steps printed after a successful run.
pub fn usage_banner(project_dir: &str) -> String {
    [
        "how to use ----------------------------------".to_string(),
        format!("\t1. cd {project_dir}"),
        "\t2. start server    : cd server && node api.js".to_string(),
        "\t3. start webapp    : cd webapp && npm run dev".to_string(),
        "\t4. start browser   : http://localhost:5173/".to_string(),
    ]
    .join("\n")
}
