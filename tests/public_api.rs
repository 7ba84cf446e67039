//! Exercises the library surface the two binaries are built on.
use cluster_ops_lib::disk_usage::{compute_usage_report, convert_to_gb, DiskUsageConfig, UsageReport};
use cluster_ops_lib::installer::{describe_plan, InstallPhase, InstallerConfig};
use cluster_ops_lib::{CommandError, ProcessManager};

#[test]
fn end_to_end_report_text() {
    let report = UsageReport::from_df_output("1.5GB\n200MB\n0B\n");
    let rendered = report.to_string();
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines, vec![
        "Total Docker Disk Usage: 1.70 GB",
        "Total space required for safe Docker backup: 16.95 GB",
    ]);
}

#[test]
fn commas_are_stripped_before_units() {
    assert_eq!(convert_to_gb("1,024MB"), 1.0);
}

#[test]
fn dry_run_plan_covers_both_tools() {
    let plan = describe_plan(&InstallerConfig::default(), &[InstallPhase::Kubectl, InstallPhase::Minikube]);
    assert_eq!(plan.first().map(String::as_str), Some("sudo apt-get update"));
    assert_eq!(plan.last().map(String::as_str), Some("rm minikube-linux-arm64"));
    let kubectl_install = plan.iter().position(|l| l == "sudo apt-get install -y kubectl").unwrap();
    let minikube_download = plan.iter().position(|l| l.starts_with("curl -LO")).unwrap();
    assert!(kubectl_install < minikube_download);
}

#[cfg(unix)]
#[tokio::test]
async fn report_from_a_real_process() {
    // Stand-in for docker: any program printing one size per line.
    let config = DiskUsageConfig {
        docker_program: "sh".to_string(),
        df_args: vec!["-c".to_string(), "printf '2.5GB\\n1024MB\\n\\n'".to_string()],
    };
    let report = compute_usage_report(&ProcessManager::new(), &config).await.unwrap();
    assert_eq!(report, UsageReport::from_total(3.5));
}

#[cfg(unix)]
#[tokio::test]
async fn failing_query_keeps_its_exit_code() {
    let config = DiskUsageConfig {
        docker_program: "sh".to_string(),
        df_args: vec!["-c".to_string(), "echo 'daemon not running' >&2; exit 7".to_string()],
    };
    let err = compute_usage_report(&ProcessManager::new(), &config).await.unwrap_err();
    assert!(matches!(err, CommandError::Failed { exit_code: Some(7), .. }));
    assert_eq!(err.exit_code(), 7);
    assert!(err.to_string().contains("daemon not running"));
}
