// cluster-ops/src/error.rs
//! Error types shared by both tools.
use thiserror::Error;

/// The one failure kind this crate knows about: an external command that
/// could not be spawned, could not be fed, or exited unsuccessfully.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Failed to spawn '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("I/O error while running '{command}': {source}")]
    Io {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("'{command}' failed with exit code: {exit_code:?}, signal: {signal:?}{}", stderr_suffix(.stderr))]
    Failed {
        command: String,
        exit_code: Option<i32>,
        signal: Option<i32>,
        stderr: String,
    },
}

fn stderr_suffix(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(". Stderr: {}", trimmed)
    }
}

impl CommandError {
    /// Exit code to hand back to the invoking shell.
    /// Falls back to 1 when the command never produced one (spawn failure, signal).
    pub fn exit_code(&self) -> i32 {
        match self {
            CommandError::Failed { exit_code: Some(code), .. } if *code != 0 => *code,
            _ => 1,
        }
    }

    /// `exit_code()` narrowed to what a process can actually exit with.
    pub fn exit_status(&self) -> u8 {
        exit_status_byte(self.exit_code())
    }
}

// Codes outside 1..=255 (including 0) collapse to 1.
fn exit_status_byte(code: i32) -> u8 {
    u8::try_from(code).ok().filter(|c| *c != 0).unwrap_or(1)
}

/// A failed installer step, with the stage and step it happened in.
#[derive(Debug, Error)]
#[error("{stage} failed at step '{step}': {source}")]
pub struct InstallError {
    pub stage: String,
    pub step: String,
    #[source]
    pub source: CommandError,
}

impl InstallError {
    pub fn exit_code(&self) -> i32 {
        self.source.exit_code()
    }

    pub fn exit_status(&self) -> u8 {
        self.source.exit_status()
    }
}

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Failed to parse logging config: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("Failed to initialise logger: {0}")]
    Init(#[from] log4rs::config::InitError),
}
