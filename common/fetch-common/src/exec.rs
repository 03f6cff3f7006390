//! External command execution
//!
//! Probes never spawn processes themselves. They go through a
//! [`CommandRunner`], which keeps output parsing separate from process
//! handling and lets tests substitute canned output.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use crate::error::{ProbeError, ProbeResult};

/// Captured result of one command invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub command: String,
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Stdout of a successful run, or [`ProbeError::CommandFailed`]
    pub fn into_stdout(self) -> ProbeResult<String> {
        if self.success() {
            Ok(self.stdout)
        } else {
            Err(ProbeError::CommandFailed {
                command: self.command,
                status: self.exit_code,
                stderr: self.stderr,
            })
        }
    }
}

/// Runs external commands on behalf of probes
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `program` directly with `args`
    async fn run(&self, program: &str, args: &[&str]) -> ProbeResult<CommandOutput>;

    /// Run a pipeline through the configured shell (`sh -c <script>`)
    async fn shell(&self, script: &str) -> ProbeResult<CommandOutput>;

    /// Like [`run`](Self::run) but requires a zero exit status
    async fn run_ok(&self, program: &str, args: &[&str]) -> ProbeResult<String> {
        self.run(program, args).await?.into_stdout()
    }

    /// Like [`shell`](Self::shell) but requires a zero exit status
    async fn shell_ok(&self, script: &str) -> ProbeResult<String> {
        self.shell(script).await?.into_stdout()
    }
}

/// Human-readable command line used in logs, errors and scripted lookups
pub fn command_line(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}

/// The real runner backed by `tokio::process`
#[derive(Debug, Clone)]
pub struct ShellRunner {
    shell: String,
    timeout: Option<Duration>,
}

impl Default for ShellRunner {
    fn default() -> Self {
        Self::new("/bin/sh")
    }
}

impl ShellRunner {
    pub fn new(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
            timeout: None,
        }
    }

    /// Bound every command by `timeout`. `None` waits forever.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn shell_path(&self) -> &str {
        &self.shell
    }

    async fn execute(&self, mut cmd: Command, label: String) -> ProbeResult<CommandOutput> {
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        tracing::trace!(command = %label, "running command");

        let result = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, cmd.output())
                .await
                .map_err(|_elapsed| ProbeError::Timeout {
                    command: label.clone(),
                    secs: limit.as_secs(),
                })?,
            None => cmd.output().await,
        };

        let output = result.map_err(|source| ProbeError::Spawn {
            command: label.clone(),
            source,
        })?;

        tracing::trace!(command = %label, status = ?output.status.code(), "command finished");

        Ok(CommandOutput {
            command: label,
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[async_trait]
impl CommandRunner for ShellRunner {
    async fn run(&self, program: &str, args: &[&str]) -> ProbeResult<CommandOutput> {
        let mut cmd = Command::new(program);
        cmd.args(args);
        self.execute(cmd, command_line(program, args)).await
    }

    async fn shell(&self, script: &str) -> ProbeResult<CommandOutput> {
        let mut cmd = Command::new(&self.shell);
        cmd.arg("-c").arg(script);
        self.execute(cmd, script.to_string()).await
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub use scripted::ScriptedRunner;

#[cfg(any(test, feature = "test-utils"))]
mod scripted {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;

    /// In-memory runner answering from a table of command lines.
    ///
    /// Direct runs are keyed by `program arg1 arg2`, shell runs by the script
    /// text. Anything not in the table behaves like a missing binary.
    #[derive(Debug, Default)]
    pub struct ScriptedRunner {
        responses: HashMap<String, (Option<i32>, String)>,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedRunner {
        pub fn new() -> Self {
            Self::default()
        }

        /// Answer `line` with exit status 0 and `stdout`
        pub fn respond(mut self, line: impl Into<String>, stdout: impl Into<String>) -> Self {
            self.responses.insert(line.into(), (Some(0), stdout.into()));
            self
        }

        /// Answer `line` with a non-zero exit status and no output
        pub fn fail(mut self, line: impl Into<String>, status: i32) -> Self {
            self.responses
                .insert(line.into(), (Some(status), String::new()));
            self
        }

        /// Every command line seen so far, in call order
        pub fn calls(&self) -> Vec<String> {
            self.calls
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .clone()
        }

        fn answer(&self, line: String) -> ProbeResult<CommandOutput> {
            self.calls
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .push(line.clone());

            match self.responses.get(&line) {
                Some((exit_code, stdout)) => Ok(CommandOutput {
                    command: line,
                    exit_code: *exit_code,
                    stdout: stdout.clone(),
                    stderr: String::new(),
                }),
                None => Err(ProbeError::Spawn {
                    command: line,
                    source: std::io::Error::new(std::io::ErrorKind::NotFound, "not scripted"),
                }),
            }
        }
    }

    #[async_trait]
    impl CommandRunner for ScriptedRunner {
        async fn run(&self, program: &str, args: &[&str]) -> ProbeResult<CommandOutput> {
            self.answer(command_line(program, args))
        }

        async fn shell(&self, script: &str) -> ProbeResult<CommandOutput> {
            self.answer(script.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_line() {
        assert_eq!(command_line("wmctrl", &["-m"]), "wmctrl -m");
        assert_eq!(command_line("xrandr", &[]), "xrandr");
    }

    #[test]
    fn test_into_stdout_requires_success() {
        let ok = CommandOutput {
            command: "true".to_string(),
            exit_code: Some(0),
            stdout: "out".to_string(),
            stderr: String::new(),
        };
        assert_eq!(ok.into_stdout().unwrap(), "out");

        let failed = CommandOutput {
            command: "false".to_string(),
            exit_code: Some(1),
            stdout: String::new(),
            stderr: String::new(),
        };
        assert!(matches!(
            failed.into_stdout(),
            Err(ProbeError::CommandFailed { status: Some(1), .. })
        ));
    }

    #[tokio::test]
    async fn test_shell_runner_captures_stdout() {
        let runner = ShellRunner::default();
        let stdout = runner.shell_ok("echo hello").await.unwrap();
        assert_eq!(stdout.trim(), "hello");
    }

    #[tokio::test]
    async fn test_shell_runner_reports_exit_status() {
        let runner = ShellRunner::default();
        let output = runner.shell("exit 3").await.unwrap();
        assert_eq!(output.exit_code, Some(3));
        assert!(runner.shell_ok("exit 3").await.is_err());
    }

    #[tokio::test]
    async fn test_failed_command_keeps_stderr() {
        let runner = ShellRunner::default();
        match runner.shell_ok("echo 'no display' >&2; exit 2").await {
            Err(ProbeError::CommandFailed { status, stderr, .. }) => {
                assert_eq!(status, Some(2));
                assert_eq!(stderr.trim(), "no display");
            }
            other => panic!("expected CommandFailed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_shell_runner_missing_binary() {
        let runner = ShellRunner::default();
        let result = runner
            .run("quickfetch-no-such-binary", &["--version"])
            .await;
        assert!(matches!(result, Err(ProbeError::Spawn { .. })));
    }

    #[tokio::test]
    async fn test_shell_runner_timeout() {
        let runner = ShellRunner::default().with_timeout(Some(Duration::from_millis(50)));
        let result = runner.shell("sleep 5").await;
        assert!(matches!(result, Err(ProbeError::Timeout { .. })));
    }

    #[tokio::test]
    async fn test_scripted_runner() {
        let runner = ScriptedRunner::new()
            .respond("wmctrl -m", "Name: Mutter\n")
            .fail("xrandr", 1);

        assert_eq!(runner.run_ok("wmctrl", &["-m"]).await.unwrap(), "Name: Mutter\n");
        assert!(matches!(
            runner.run_ok("xrandr", &[]).await,
            Err(ProbeError::CommandFailed { .. })
        ));
        assert!(matches!(
            runner.shell("rpm -qa | wc -l").await,
            Err(ProbeError::Spawn { .. })
        ));
        assert_eq!(
            runner.calls(),
            vec!["wmctrl -m", "xrandr", "rpm -qa | wc -l"]
        );
    }
}
