// cluster-ops/src/installer/types.rs
use serde::{Deserialize, Serialize};

use crate::process_manager::CommandInvocation;

/// What a step does when its command fails.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum FailurePolicy {
    #[default]
    Abort,
    Continue, // log and move on to the next step
}

/// Data piped into a step's stdin, standing in for `echo ... |` and `curl ... |`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum StdinSource {
    Text { text: String },
    Command { program: String, args: Vec<String> },
}

impl StdinSource {
    pub fn command<I, S>(program: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        StdinSource::Command {
            program: program.to_string(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

/// One external command in the install sequence.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InstallStep {
    pub description: String,
    pub program: String,
    pub args: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stdin: Option<StdinSource>,
    #[serde(default)]
    pub failure_policy: FailurePolicy,
}

impl InstallStep {
    pub fn new<I, S>(description: &str, program: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            description: description.to_string(),
            program: program.to_string(),
            args: args.into_iter().map(Into::into).collect(),
            stdin: None,
            failure_policy: FailurePolicy::Abort,
        }
    }

    pub fn with_stdin(mut self, source: StdinSource) -> Self {
        self.stdin = Some(source);
        self
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// The step's own command, without stdin attached.
    pub fn invocation(&self) -> CommandInvocation {
        CommandInvocation::new(&self.program, self.args.iter().cloned())
    }

    /// Shell-style rendering used for dry runs, e.g. `curl ... | sudo gpg ...`.
    pub fn command_line(&self) -> String {
        let own = self.invocation().to_string();
        match &self.stdin {
            None => own,
            Some(StdinSource::Text { text }) => format!("echo '{}' | {}", text.trim_end(), own),
            Some(StdinSource::Command { program, args }) => {
                format!("{} | {}", CommandInvocation::new(program, args.iter().cloned()), own)
            }
        }
    }
}

/// The two independently runnable halves of the installer.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "camelCase")]
pub enum InstallPhase {
    Kubectl,
    Minikube,
}

impl InstallPhase {
    pub fn tool_name(&self) -> &'static str {
        match self {
            InstallPhase::Kubectl => "kubectl",
            InstallPhase::Minikube => "Minikube",
        }
    }

    pub fn stage_name(&self) -> String {
        format!("{} installation", self.tool_name())
    }

    pub fn start_message(&self) -> String {
        format!("Installing {}...", self.tool_name())
    }

    pub fn done_message(&self) -> String {
        format!("{} installed successfully.", self.tool_name())
    }
}
