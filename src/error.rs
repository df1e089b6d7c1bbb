// src/error.rs
//! Error handling for the bootstrapper.

#![deny(missing_docs)]

use std::fmt;

/// BootstrapResult is alias for anyhow
pub type BootstrapResult<T> = anyhow::Result<T>;

/// What happens to the run when a stage fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// Abort the whole run.
    Fatal,
    /// Report the failure and keep going.
    BestEffort,
}

/// The ordered stages of the interactive bootstrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Shallow clone of the template repository.
    Clone,
    /// Copy of the chosen starter into `webapp`.
    Materialize,
    /// Removal of git metadata, `bin` and the starters tree.
    Cleanup,
    /// Writing `server/.env`.
    WriteConfig,
    /// Extraction of the icon index archive.
    Extract,
    /// Package install in `server`.
    InstallServer,
    /// Package install in `webapp`.
    InstallWebapp,
}

impl Stage {
    /// Failure policy of this stage.
    pub fn policy(self) -> Policy {
        match self {
            Stage::Clone | Stage::Materialize | Stage::WriteConfig | Stage::Extract => {
                Policy::Fatal
            }
            Stage::Cleanup | Stage::InstallServer | Stage::InstallWebapp => Policy::BestEffort,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Clone => "clone",
            Stage::Materialize => "materialize webapp",
            Stage::Cleanup => "cleanup",
            Stage::WriteConfig => "write server/.env",
            Stage::Extract => "extract icon index",
            Stage::InstallServer => "install server packages",
            Stage::InstallWebapp => "install webapp packages",
        };
        f.write_str(name)
    }
}

/// Result of a single stage once its policy has been applied.
#[derive(Debug, PartialEq, Eq)]
pub enum StageOutcome {
    /// The stage completed.
    Done,
    /// A best-effort stage failed; the diagnostic is kept for the summary.
    Degraded(String),
}

/// Apply the stage policy to a stage result.
///
/// Fatal stages propagate the error with the stage name attached, best-effort
/// stages log it and return [`StageOutcome::Degraded`].
pub fn settle(stage: Stage, result: BootstrapResult<()>) -> BootstrapResult<StageOutcome> {
    match (result, stage.policy()) {
        (Ok(()), _) => Ok(StageOutcome::Done),
        (Err(err), Policy::Fatal) => Err(err.context(format!("{stage} failed"))),
        (Err(err), Policy::BestEffort) => {
            log::warn!("{stage} failed, continuing: {err:#}");
            Ok(StageOutcome::Degraded(format!("{err:#}")))
        }
    }
}
