// cluster-ops/src/disk_usage/mod.rs

pub mod query;
pub mod report;
pub mod size_units;

pub use query::{compute_usage_report, DiskUsageConfig};
pub use report::{UsageReport, SAFE_BACKUP_MULTIPLIER};
pub use size_units::convert_to_gb;
