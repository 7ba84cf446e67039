// cluster-ops/src/bin/install_kube.rs
use std::process::ExitCode;

use clap::Parser;
use cluster_ops_lib::installer::{
    describe_plan, install_all, install_primary_cli, install_secondary_tool, InstallPhase,
    InstallerConfig,
};
use cluster_ops_lib::{init_logging, log_startup, report_failure, InstallError, ProcessManager};
use log::debug;

/// Install kubectl and minikube
#[derive(Parser, Clone, Debug)]
#[command(author, version, about, long_about = None)]
struct Opt {
    /// Only run one of the two installation stages
    #[arg(long, value_enum)]
    only: Option<InstallPhase>,

    /// Print the commands that would run without executing them
    #[arg(long)]
    dry_run: bool,

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
    log_startup("install-kube");

    let config = InstallerConfig::default();

    if opt.dry_run {
        if let Ok(dump) = serde_json::to_string_pretty(&config) {
            debug!("Installer config:\n{}", dump);
        }
        let phases = match opt.only {
            Some(phase) => vec![phase],
            None => vec![InstallPhase::Kubectl, InstallPhase::Minikube],
        };
        for line in describe_plan(&config, &phases) {
            println!("{}", line);
        }
        return ExitCode::SUCCESS;
    }

    let manager = ProcessManager::new();
    let result: Result<(), InstallError> = match opt.only {
        Some(InstallPhase::Kubectl) => install_primary_cli(&manager, &config).await,
        Some(InstallPhase::Minikube) => install_secondary_tool(&manager, &config).await,
        None => install_all(&manager, &config).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_failure(&format!("Error during installation: {}", e));
            ExitCode::from(e.exit_status())
        }
    }
}
