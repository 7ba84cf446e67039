// cluster-ops/src/process_manager.rs
use async_trait::async_trait;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use uuid::Uuid;

use crate::error::CommandError;

/// One external command: program, arguments and optional bytes for its stdin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandInvocation {
    pub program: String,
    pub args: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stdin: Option<Vec<u8>>,
}

impl CommandInvocation {
    pub fn new<I, S>(program: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.to_string(),
            args: args.into_iter().map(Into::into).collect(),
            stdin: None,
        }
    }

    pub fn with_stdin(mut self, bytes: Vec<u8>) -> Self {
        self.stdin = Some(bytes);
        self
    }
}

// Renders roughly as a shell would show it, quoting args that contain spaces.
impl fmt::Display for CommandInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " '{}'", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// Represents the final result of a command execution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandResult {
    pub exit_code: Option<i32>,
    pub signal: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl CommandResult {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0) && self.signal.is_none()
    }

    pub fn stdout_text(&self) -> String {
        String::from_utf8_lossy(&self.stdout).to_string()
    }

    pub fn stderr_text(&self) -> String {
        String::from_utf8_lossy(&self.stderr).to_string()
    }

    /// Turns a non-zero exit (or death by signal) into a `CommandError::Failed`.
    pub fn ensure_success(self, invocation: &CommandInvocation) -> Result<Self, CommandError> {
        if self.success() {
            Ok(self)
        } else {
            Err(CommandError::Failed {
                command: invocation.to_string(),
                exit_code: self.exit_code,
                signal: self.signal,
                stderr: self.stderr_text(),
            })
        }
    }
}

/// Anything that can execute a `CommandInvocation` to completion.
///
/// `ProcessManager` is the real implementation; tests substitute a recording fake.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Runs the command and waits for it. A non-zero exit is *not* an error here;
    /// callers decide via `CommandResult::ensure_success`.
    async fn run(&self, invocation: &CommandInvocation) -> Result<CommandResult, CommandError>;
}

/// Spawns external processes one at a time.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessManager;

impl ProcessManager {
    pub fn new() -> Self {
        Self
    }

    /// Spawns a process and waits for it to complete, capturing all output.
    pub async fn spawn_and_wait_for_process(
        &self,
        invocation: &CommandInvocation,
    ) -> Result<CommandResult, CommandError> {
        let process_name = format!("{}_{}", invocation.program, Uuid::new_v4());
        info!("Executing: {}", invocation);

        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .stdin(if invocation.stdin.is_some() { Stdio::piped() } else { Stdio::inherit() })
            .kill_on_drop(true);

        let mut child = cmd.spawn().map_err(|e| CommandError::Spawn {
            command: invocation.to_string(),
            source: e,
        })?;
        debug!("Spawned process '{}' (pid {:?})", process_name, child.id());

        // Feed stdin from a separate task so a chatty child can't deadlock us.
        let stdin_task = match (child.stdin.take(), invocation.stdin.clone()) {
            (Some(mut stdin), Some(bytes)) => Some(tokio::spawn(async move {
                let res = stdin.write_all(&bytes).await;
                drop(stdin); // close the pipe so the child sees EOF
                res
            })),
            _ => None,
        };

        let output = child.wait_with_output().await.map_err(|e| CommandError::Io {
            command: invocation.to_string(),
            source: e,
        })?;

        if let Some(task) = stdin_task {
            let write_result = task.await.map_err(|e| CommandError::Io {
                command: invocation.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::Other, e.to_string()),
            })?;
            match write_result {
                Ok(()) => {}
                // The child may legitimately exit without draining its stdin.
                Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => {
                    debug!("'{}' closed stdin early", process_name);
                }
                Err(e) => {
                    return Err(CommandError::Io {
                        command: invocation.to_string(),
                        source: e,
                    })
                }
            }
        }

        let result = CommandResult {
            exit_code: output.status.code(),
            signal: exit_signal(&output.status),
            stdout: output.stdout,
            stderr: output.stderr,
        };

        for line in result.stdout_text().lines() {
            debug!("[{}_stdout] {}", process_name, line);
        }
        for line in result.stderr_text().lines() {
            info!("[{}_stderr] {}", process_name, line);
        }
        info!(
            "Process '{}' terminated with code: {:?}, signal: {:?}",
            process_name, result.exit_code, result.signal
        );

        Ok(result)
    }
}

#[cfg(unix)]
fn exit_signal(status: &std::process::ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;
    status.signal()
}

#[cfg(not(unix))]
fn exit_signal(_status: &std::process::ExitStatus) -> Option<i32> {
    None
}

#[async_trait]
impl CommandRunner for ProcessManager {
    async fn run(&self, invocation: &CommandInvocation) -> Result<CommandResult, CommandError> {
        self.spawn_and_wait_for_process(invocation).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_quotes_args_with_spaces() {
        let inv = CommandInvocation::new("docker", ["system", "df", "--format", "{{.Size}}"]);
        assert_eq!(inv.to_string(), "docker system df --format {{.Size}}");

        let inv = CommandInvocation::new("sh", ["-c", "echo hi"]);
        assert_eq!(inv.to_string(), "sh -c 'echo hi'");
    }

    #[test]
    fn ensure_success_rejects_non_zero_exit() {
        let inv = CommandInvocation::new("false", Vec::<String>::new());
        let result = CommandResult {
            exit_code: Some(1),
            signal: None,
            stdout: Vec::new(),
            stderr: b"boom".to_vec(),
        };
        match result.ensure_success(&inv) {
            Err(CommandError::Failed { exit_code, stderr, .. }) => {
                assert_eq!(exit_code, Some(1));
                assert_eq!(stderr, "boom");
            }
            other => panic!("expected Failed, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn captures_stdout_and_exit_code() {
        let manager = ProcessManager::new();
        let inv = CommandInvocation::new("sh", ["-c", "printf '1.5GB\\n200MB\\n'; echo warn >&2"]);
        let result = manager.run(&inv).await.unwrap();
        assert!(result.success());
        assert_eq!(result.stdout_text(), "1.5GB\n200MB\n");
        assert_eq!(result.stderr_text(), "warn\n");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn non_zero_exit_is_reported_not_raised() {
        let manager = ProcessManager::new();
        let inv = CommandInvocation::new("sh", ["-c", "exit 3"]);
        let result = manager.run(&inv).await.unwrap();
        assert!(!result.success());
        assert_eq!(result.exit_code, Some(3));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn pipes_stdin_into_child() {
        let manager = ProcessManager::new();
        let inv = CommandInvocation::new("cat", Vec::<String>::new())
            .with_stdin(b"deb [signed-by=/tmp/key.gpg] https://example.invalid/ /\n".to_vec());
        let result = manager.run(&inv).await.unwrap();
        assert!(result.success());
        assert_eq!(result.stdout_text(), "deb [signed-by=/tmp/key.gpg] https://example.invalid/ /\n");
    }

    #[tokio::test]
    async fn missing_program_is_a_spawn_error() {
        let manager = ProcessManager::new();
        let inv = CommandInvocation::new("definitely-not-a-real-program-3f9c", ["--version"]);
        let err = manager.run(&inv).await.unwrap_err();
        assert!(matches!(err, CommandError::Spawn { .. }));
    }
}
