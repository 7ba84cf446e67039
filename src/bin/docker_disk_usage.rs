// cluster-ops/src/bin/docker_disk_usage.rs
use std::process::ExitCode;

use clap::Parser;
use cluster_ops_lib::disk_usage::{compute_usage_report, DiskUsageConfig};
use cluster_ops_lib::{init_logging, log_startup, report_failure, ProcessManager};

/// Report total Docker disk usage and the space needed to back it up safely
#[derive(Parser, Clone, Debug)]
#[command(author, version, about, long_about = None)]
struct Opt {
    /// Print the report as a JSON object instead of two text lines
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (repeatable)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> ExitCode {
    let opt = Opt::parse();
    if let Err(e) = init_logging(opt.verbose) {
        eprintln!("{}", e);
    }
    log_startup("docker-disk-usage");

    let manager = ProcessManager::new();
    let report = match compute_usage_report(&manager, &DiskUsageConfig::default()).await {
        Ok(report) => report,
        Err(e) => {
            report_failure(&e.to_string());
            return ExitCode::from(e.exit_status());
        }
    };

    if opt.json {
        match serde_json::to_string(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                report_failure(&format!("Failed to serialize report: {}", e));
                return ExitCode::FAILURE;
            }
        }
    } else {
        println!("{}", report);
    }
    ExitCode::SUCCESS
}

