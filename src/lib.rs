pub mod disk_usage;
pub mod error;
pub mod installer;
pub mod logging;
pub mod process_manager;

pub use error::{CommandError, InstallError, LoggingError};
pub use logging::{init_logging, report_failure};
pub use process_manager::{CommandInvocation, CommandResult, CommandRunner, ProcessManager};

/// Startup banner with runtime info, written to the log.
pub fn log_startup(tool: &str) {
    log::info!("======= {} STARTUP =======", tool.to_uppercase());
    log::info!("Runtime Info: OS: {}, Arch: {}", std::env::consts::OS, std::env::consts::ARCH);
    log::debug!("Current directory: {:?}", std::env::current_dir());
}
