// cluster-ops/src/installer/command_runner.rs
use log::debug;

use super::types::{InstallStep, StdinSource};
use crate::error::CommandError;
use crate::process_manager::{CommandInvocation, CommandResult, CommandRunner};

/// Runs one install step to completion.
///
/// A `StdinSource::Command` runs first and must succeed; its stdout becomes the
/// step's stdin. Either command exiting non-zero is a `CommandError::Failed`.
pub async fn run_install_step<R: CommandRunner + ?Sized>(
    runner: &R,
    step: &InstallStep,
) -> Result<CommandResult, CommandError> {
    let stdin = match &step.stdin {
        None => None,
        Some(StdinSource::Text { text }) => Some(text.as_bytes().to_vec()),
        Some(StdinSource::Command { program, args }) => {
            let source = CommandInvocation::new(program, args.iter().cloned());
            let piped = runner.run(&source).await?.ensure_success(&source)?;
            debug!("'{}' produced {} bytes for '{}'", source, piped.stdout.len(), step.description);
            Some(piped.stdout)
        }
    };

    let mut invocation = step.invocation();
    if let Some(bytes) = stdin {
        invocation = invocation.with_stdin(bytes);
    }
    runner.run(&invocation).await?.ensure_success(&invocation)
}
