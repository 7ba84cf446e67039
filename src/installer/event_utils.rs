// cluster-ops/src/installer/event_utils.rs
use log::info;

use super::types::{InstallPhase, InstallStep};

/// Prints a human-readable status line on stdout and mirrors it into the log.
pub fn emit_status(message: &str) {
    println!("{}", message);
    info!("[STATUS] {}", message);
}

// Per-step progress only goes to the log; stdout carries the status lines alone.
pub fn emit_step_progress(phase: InstallPhase, index: usize, total: usize, step: &InstallStep) {
    info!(
        "[{}] Step {}/{}: {} ({})",
        phase.tool_name(),
        index + 1,
        total,
        step.description,
        step.command_line()
    );
}
