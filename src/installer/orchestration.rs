// cluster-ops/src/installer/orchestration.rs
use log::{info, warn};

use super::command_runner::run_install_step;
use super::event_utils::{emit_status, emit_step_progress};
use super::install_config::InstallerConfig;
use super::types::{FailurePolicy, InstallPhase, InstallStep};
use crate::error::InstallError;
use crate::process_manager::CommandRunner;

pub const COMPLETION_MESSAGE: &str = "Kubernetes setup complete!";

/// Runs `steps` strictly in order, stopping at the first aborting failure.
pub async fn run_phase<R: CommandRunner + ?Sized>(
    runner: &R,
    phase: InstallPhase,
    steps: &[InstallStep],
) -> Result<(), InstallError> {
    emit_status(&phase.start_message());

    for (index, step) in steps.iter().enumerate() {
        emit_step_progress(phase, index, steps.len(), step);
        if let Err(e) = run_install_step(runner, step).await {
            match step.failure_policy {
                FailurePolicy::Abort => {
                    info!("[{}] '{}' failed, aborting remaining steps", phase.tool_name(), step.description);
                    return Err(InstallError {
                        stage: phase.stage_name(),
                        step: step.description.clone(),
                        source: e,
                    });
                }
                FailurePolicy::Continue => {
                    warn!("[{}] Continuing despite '{}' failing: {}", phase.tool_name(), step.description, e);
                }
            }
        }
    }

    emit_status(&phase.done_message());
    Ok(())
}

/// Installs kubectl from the Kubernetes apt repository.
pub async fn install_primary_cli<R: CommandRunner + ?Sized>(
    runner: &R,
    config: &InstallerConfig,
) -> Result<(), InstallError> {
    run_phase(runner, InstallPhase::Kubectl, &config.steps_for(InstallPhase::Kubectl)).await
}

/// Installs the prebuilt minikube binary.
pub async fn install_secondary_tool<R: CommandRunner + ?Sized>(
    runner: &R,
    config: &InstallerConfig,
) -> Result<(), InstallError> {
    run_phase(runner, InstallPhase::Minikube, &config.steps_for(InstallPhase::Minikube)).await
}

/// kubectl, then minikube. Nothing is rolled back if either fails.
pub async fn install_all<R: CommandRunner + ?Sized>(
    runner: &R,
    config: &InstallerConfig,
) -> Result<(), InstallError> {
    info!("Starting Kubernetes tooling installation...");
    install_primary_cli(runner, config).await?;
    install_secondary_tool(runner, config).await?;
    emit_status(COMPLETION_MESSAGE);
    Ok(())
}

/// Command lines that a run of `phases` would execute, in order.
pub fn describe_plan(config: &InstallerConfig, phases: &[InstallPhase]) -> Vec<String> {
    phases
        .iter()
        .flat_map(|phase| config.steps_for(*phase))
        .map(|step| step.command_line())
        .collect()
}
