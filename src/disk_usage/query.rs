// cluster-ops/src/disk_usage/query.rs
use log::info;
use serde::{Deserialize, Serialize};

use super::report::UsageReport;
use crate::error::CommandError;
use crate::process_manager::{CommandInvocation, CommandRunner};

/// Where the size column comes from.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DiskUsageConfig {
    pub docker_program: String,
    pub df_args: Vec<String>,
}

impl Default for DiskUsageConfig {
    fn default() -> Self {
        Self {
            docker_program: "docker".to_string(),
            df_args: ["system", "df", "--format", "{{.Size}}"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl DiskUsageConfig {
    pub fn invocation(&self) -> CommandInvocation {
        CommandInvocation::new(&self.docker_program, self.df_args.iter().cloned())
    }
}

/// Runs the docker disk-usage query and folds its output into a `UsageReport`.
pub async fn compute_usage_report<R: CommandRunner + ?Sized>(
    runner: &R,
    config: &DiskUsageConfig,
) -> Result<UsageReport, CommandError> {
    let invocation = config.invocation();
    let result = runner.run(&invocation).await?.ensure_success(&invocation)?;
    let report = UsageReport::from_df_output(&result.stdout_text());
    info!(
        "Computed docker usage: total {} GB, safe backup {} GB",
        report.total_gb, report.safe_backup_gb
    );
    Ok(report)
}
