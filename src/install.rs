//! Package installs for the server and webapp subtrees.

#![deny(missing_docs)]

use crate::config::Config;
use crate::error::{BootstrapResult, Stage};
use crate::project::ProjectLayout;
use crate::runner::{Runner, ShellCommand};
use std::path::Path;

/// `<package_manager> install` in `dir`, output streamed to the console.
pub fn install_command(config: &Config, dir: &Path) -> ShellCommand {
    ShellCommand::new(config.package_manager.clone(), ["install"], dir)
        .streamed()
        .with_timeout(config.install_timeout())
}

/// The two installs, server first.
pub fn install_plan(config: &Config, layout: &ProjectLayout) -> [(Stage, ShellCommand); 2] {
    [
        (Stage::InstallServer, install_command(config, &layout.server())),
        (Stage::InstallWebapp, install_command(config, &layout.webapp())),
    ]
}

/// Run one install. Non-zero exit and timeout come back as errors; the
/// caller's stage policy decides whether they stop the run.
pub fn install(runner: &mut dyn Runner, cmd: &ShellCommand) -> BootstrapResult<()> {
    runner.run(cmd)?.check(cmd)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::OutputMode;
    use std::time::Duration;

    #[test]
    fn server_then_webapp_streamed_with_timeout() {
        let layout = ProjectLayout::new(Path::new("/w"), "openv0");
        let plan = install_plan(&Config::default(), &layout);
        assert_eq!(plan[0].0, Stage::InstallServer);
        assert_eq!(plan[0].1.cwd, Path::new("/w/openv0/server"));
        assert_eq!(plan[1].1.cwd, Path::new("/w/openv0/webapp"));
        for (_, cmd) in &plan {
            assert_eq!(cmd.to_string(), "npm install");
            assert_eq!(cmd.mode, OutputMode::Stream);
            assert_eq!(cmd.timeout, Some(Duration::from_secs(900)));
        }
    }
}
