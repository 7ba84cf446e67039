// cluster-ops/src/disk_usage/report.rs
use serde::Serialize;
use std::fmt;

use super::size_units::convert_to_gb;

/// Ten times current usage is treated as enough headroom for a backup copy.
pub const SAFE_BACKUP_MULTIPLIER: f64 = 10.0;

#[derive(Serialize, Clone, Copy, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UsageReport {
    pub total_gb: f64,
    pub safe_backup_gb: f64,
}

impl UsageReport {
    pub fn from_total(total_gb: f64) -> Self {
        Self {
            total_gb,
            safe_backup_gb: total_gb * SAFE_BACKUP_MULTIPLIER,
        }
    }

    /// Builds a report from `docker system df --format {{.Size}}` output,
    /// one size token per line. Blank lines are skipped.
    pub fn from_df_output(output: &str) -> Self {
        let total: f64 = output
            .trim()
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(convert_to_gb)
            .fold(0.0, |acc, gb| acc + gb);
        Self::from_total(total)
    }
}

// The two-line report printed by docker-disk-usage.
impl fmt::Display for UsageReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total Docker Disk Usage: {:.2} GB", self.total_gb)?;
        write!(f, "Total space required for safe Docker backup: {:.2} GB", self.safe_backup_gb)
    }
}
