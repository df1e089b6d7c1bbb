// src/runner.rs
//! External command execution.

#![deny(missing_docs)]

use crate::error::BootstrapResult;

use anyhow::{Context, bail};
use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

/// How the child's stdout/stderr are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Collect both streams into [`CommandOutput`].
    Capture,
    /// Inherit the console so output appears live.
    Stream,
}

/// A fully described external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellCommand {
    /// Program name or path.
    pub program: String,
    /// Arguments, passed without a shell.
    pub args: Vec<String>,
    /// Working directory.
    pub cwd: PathBuf,
    /// Output handling.
    pub mode: OutputMode,
    /// Kill the child after this long.
    pub timeout: Option<Duration>,
}

impl ShellCommand {
    /// A captured command with no timeout.
    pub fn new<I, S>(program: impl Into<String>, args: I, cwd: &Path) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            cwd: cwd.to_path_buf(),
            mode: OutputMode::Capture,
            timeout: None,
        }
    }

    /// Switch to live output.
    pub fn streamed(mut self) -> Self {
        self.mode = OutputMode::Stream;
        self
    }

    /// Set or clear the timeout.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

impl fmt::Display for ShellCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            if arg.contains(' ') {
                write!(f, " \"{arg}\"")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

/// A result of running an external command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when killed by a signal or by the timeout.
    pub code: Option<i32>,
    /// Captured stdout (empty in stream mode).
    pub stdout: String,
    /// Captured stderr (empty in stream mode).
    pub stderr: String,
    /// The timeout elapsed and the child was killed.
    pub timed_out: bool,
}

impl CommandOutput {
    /// Exit code zero.
    pub fn success(&self) -> bool {
        self.code == Some(0) && !self.timed_out
    }

    /// Turn a non-successful completion into an error carrying stderr.
    pub fn check(self, cmd: &ShellCommand) -> BootstrapResult<Self> {
        if self.success() {
            return Ok(self);
        }
        let how = match (self.timed_out, self.code) {
            (true, _) => format!("timed out after {:?}", cmd.timeout.unwrap_or_default()),
            (false, Some(code)) => format!("exited with status {code}"),
            (false, None) => "terminated by signal".to_string(),
        };
        let detail = self.stderr.trim();
        if detail.is_empty() {
            bail!("`{cmd}` {how}");
        }
        bail!("`{cmd}` {how}: {detail}");
    }
}

/// Executes external commands. The bootstrap flow only talks to the outside
/// world through this trait.
pub trait Runner {
    /// Run `cmd` to completion. `Err` only when the command could not be run
    /// at all; a non-zero exit is reported through [`CommandOutput`].
    fn run(&mut self, cmd: &ShellCommand) -> BootstrapResult<CommandOutput>;
}

/// Runs commands as child processes.
#[derive(Debug, Default)]
pub struct ProcessRunner;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

impl Runner for ProcessRunner {
    fn run(&mut self, cmd: &ShellCommand) -> BootstrapResult<CommandOutput> {
        log::info!("running `{cmd}` in {}", cmd.cwd.display());
        let mut command = Command::new(&cmd.program);
        command.args(&cmd.args).current_dir(&cmd.cwd).stdin(Stdio::null());
        match cmd.mode {
            OutputMode::Capture => command.stdout(Stdio::piped()).stderr(Stdio::piped()),
            OutputMode::Stream => command.stdout(Stdio::inherit()).stderr(Stdio::inherit()),
        };

        let mut child = command
            .spawn()
            .with_context(|| format!("starting `{cmd}` in {}", cmd.cwd.display()))?;

        let stdout = child.stdout.take().map(|mut s| {
            thread::spawn(move || {
                let mut buf = Vec::new();
                let _ = s.read_to_end(&mut buf);
                buf
            })
        });
        let stderr = child.stderr.take().map(|mut s| {
            thread::spawn(move || {
                let mut buf = Vec::new();
                let _ = s.read_to_end(&mut buf);
                buf
            })
        });

        let (status, timed_out) = wait_with_deadline(&mut child, cmd.timeout)
            .with_context(|| format!("waiting for `{cmd}`"))?;

        let collect = |h: Option<thread::JoinHandle<Vec<u8>>>| {
            h.and_then(|h| h.join().ok())
                .map(|b| String::from_utf8_lossy(&b).into_owned())
                .unwrap_or_default()
        };
        let output = CommandOutput {
            code: if timed_out { None } else { status.code() },
            stdout: collect(stdout),
            stderr: collect(stderr),
            timed_out,
        };
        log::debug!("`{cmd}` finished: {:?} timed_out={}", output.code, output.timed_out);
        Ok(output)
    }
}

fn wait_with_deadline(
    child: &mut Child,
    timeout: Option<Duration>,
) -> std::io::Result<(ExitStatus, bool)> {
    let Some(timeout) = timeout else {
        return Ok((child.wait()?, false));
    };
    let deadline = Instant::now() + timeout;
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok((status, false));
        }
        if Instant::now() >= deadline {
            log::warn!("child {} exceeded {timeout:?}, killing it", child.id());
            let _ = child.kill();
            return Ok((child.wait()?, true));
        }
        thread::sleep(POLL_INTERVAL);
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn sh(script: &str) -> ShellCommand {
        ShellCommand::new("sh", ["-c", script], Path::new("."))
    }

    #[test]
    fn captures_both_streams_and_code() {
        let out = ProcessRunner.run(&sh("echo out; echo err >&2; exit 3")).unwrap();
        assert_eq!(out.code, Some(3));
        assert_eq!(out.stdout.trim(), "out");
        assert_eq!(out.stderr.trim(), "err");
        assert!(!out.success());
    }

    #[test]
    fn check_includes_stderr() {
        let cmd = sh("echo 'fatal: repository not found' >&2; exit 128");
        let err = ProcessRunner.run(&cmd).unwrap().check(&cmd).unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("exited with status 128"), "got: {msg}");
        assert!(msg.contains("repository not found"), "got: {msg}");
    }

    #[test]
    fn timeout_kills_child() {
        let cmd = sh("exec sleep 5").with_timeout(Some(Duration::from_millis(200)));
        let started = Instant::now();
        let out = ProcessRunner.run(&cmd).unwrap();
        assert!(out.timed_out);
        assert!(!out.success());
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[test]
    fn missing_program_is_an_error() {
        let cmd = ShellCommand::new("definitely-not-a-real-program-xyz", Vec::<String>::new(), Path::new("."));
        assert!(ProcessRunner.run(&cmd).is_err());
    }

    #[test]
    fn display_quotes_spaces() {
        let cmd = ShellCommand::new("git", ["clone", "/tmp/a b"], Path::new("."));
        assert_eq!(cmd.to_string(), "git clone \"/tmp/a b\"");
    }
}
