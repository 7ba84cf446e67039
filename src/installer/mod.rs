// cluster-ops/src/installer/mod.rs

pub mod command_runner;
pub mod event_utils;
pub mod install_config;
pub mod orchestration;
pub mod types;

// Re-export key public functions
pub use orchestration::{
    describe_plan,
    install_all,
    install_primary_cli,
    install_secondary_tool,
    run_phase,
};

pub use install_config::{
    kubectl_install_steps,
    minikube_install_steps,
    InstallerConfig,
};

pub use types::{
    FailurePolicy,
    InstallPhase,
    InstallStep,
    StdinSource,
};
