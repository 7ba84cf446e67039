// cluster-ops/src/installer/install_config.rs

use serde::{Deserialize, Serialize};

use super::types::{InstallPhase, InstallStep, StdinSource};

// --- Configuration Structures ---

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InstallerConfig {
    pub kubernetes_repo_base: String, // e.g., "https://pkgs.k8s.io/core:/stable:"
    pub kubernetes_channel_version: String, // Release channel, e.g. "v1.31"
    pub keyring_path: String,
    pub sources_list_path: String,
    pub minikube_release_base: String,
    pub minikube_arch: String, // Prebuilt binary architecture
    pub bin_dir: String,
}

impl Default for InstallerConfig {
    fn default() -> Self {
        Self {
            kubernetes_repo_base: "https://pkgs.k8s.io/core:/stable:".to_string(),
            kubernetes_channel_version: "v1.31".to_string(),
            keyring_path: "/etc/apt/keyrings/kubernetes-apt-keyring.gpg".to_string(),
            sources_list_path: "/etc/apt/sources.list.d/kubernetes.list".to_string(),
            minikube_release_base: "https://storage.googleapis.com/minikube/releases/latest".to_string(),
            minikube_arch: "arm64".to_string(),
            bin_dir: "/usr/local/bin".to_string(),
        }
    }
}

impl InstallerConfig {
    pub fn kubernetes_channel_url(&self) -> String {
        format!("{}/{}/deb/", self.kubernetes_repo_base, self.kubernetes_channel_version)
    }

    pub fn apt_source_line(&self) -> String {
        format!("deb [signed-by={}] {} /", self.keyring_path, self.kubernetes_channel_url())
    }

    /// File name `curl -LO` leaves in the working directory.
    pub fn minikube_artifact(&self) -> String {
        format!("minikube-linux-{}", self.minikube_arch)
    }

    pub fn minikube_url(&self) -> String {
        format!("{}/{}", self.minikube_release_base, self.minikube_artifact())
    }

    pub fn steps_for(&self, phase: InstallPhase) -> Vec<InstallStep> {
        match phase {
            InstallPhase::Kubectl => kubectl_install_steps(self),
            InstallPhase::Minikube => minikube_install_steps(self),
        }
    }
}

// --- Step Definitions ---

/// apt repository setup followed by `apt-get install kubectl`.
pub fn kubectl_install_steps(config: &InstallerConfig) -> Vec<InstallStep> {
    vec![
        InstallStep::new("Updating package index", "sudo", ["apt-get", "update"]),
        InstallStep::new(
            "Installing HTTPS transport prerequisites",
            "sudo",
            ["apt-get", "install", "-y", "apt-transport-https", "ca-certificates", "curl", "gnupg"],
        ),
        InstallStep::new(
            "Importing Kubernetes signing key",
            "sudo",
            ["gpg", "--dearmor", "-o", config.keyring_path.as_str()],
        )
        .with_stdin(StdinSource::command(
            "curl",
            ["-fsSL".to_string(), format!("{}Release.key", config.kubernetes_channel_url())],
        )),
        InstallStep::new("Setting keyring permissions", "sudo", ["chmod", "644", config.keyring_path.as_str()]),
        InstallStep::new(
            "Registering Kubernetes apt repository",
            "sudo",
            ["tee", config.sources_list_path.as_str()],
        )
        .with_stdin(StdinSource::Text { text: format!("{}\n", config.apt_source_line()) }),
        InstallStep::new(
            "Setting repository file permissions",
            "sudo",
            ["chmod", "644", config.sources_list_path.as_str()],
        ),
        InstallStep::new("Refreshing package index", "sudo", ["apt-get", "update"]),
        InstallStep::new("Installing kubectl", "sudo", ["apt-get", "install", "-y", "kubectl"]),
    ]
}

/// Download, install and clean up the prebuilt minikube binary.
pub fn minikube_install_steps(config: &InstallerConfig) -> Vec<InstallStep> {
    let artifact = config.minikube_artifact();
    vec![
        InstallStep::new("Downloading Minikube binary", "curl", ["-LO".to_string(), config.minikube_url()]),
        InstallStep::new(
            "Installing Minikube binary",
            "sudo",
            ["install".to_string(), artifact.clone(), format!("{}/minikube", config.bin_dir)],
        ),
        InstallStep::new("Removing downloaded artifact", "rm", [artifact]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_urls() {
        let config = InstallerConfig::default();
        assert_eq!(config.kubernetes_channel_url(), "https://pkgs.k8s.io/core:/stable:/v1.31/deb/");
        assert_eq!(
            config.apt_source_line(),
            "deb [signed-by=/etc/apt/keyrings/kubernetes-apt-keyring.gpg] https://pkgs.k8s.io/core:/stable:/v1.31/deb/ /"
        );
        assert_eq!(
            config.minikube_url(),
            "https://storage.googleapis.com/minikube/releases/latest/minikube-linux-arm64"
        );
    }

    #[test]
    fn kubectl_plan_in_fixed_order() {
        let lines: Vec<String> = kubectl_install_steps(&InstallerConfig::default())
            .iter()
            .map(InstallStep::command_line)
            .collect();
        assert_eq!(
            lines,
            vec![
                "sudo apt-get update",
                "sudo apt-get install -y apt-transport-https ca-certificates curl gnupg",
                "curl -fsSL https://pkgs.k8s.io/core:/stable:/v1.31/deb/Release.key | sudo gpg --dearmor -o /etc/apt/keyrings/kubernetes-apt-keyring.gpg",
                "sudo chmod 644 /etc/apt/keyrings/kubernetes-apt-keyring.gpg",
                "echo 'deb [signed-by=/etc/apt/keyrings/kubernetes-apt-keyring.gpg] https://pkgs.k8s.io/core:/stable:/v1.31/deb/ /' | sudo tee /etc/apt/sources.list.d/kubernetes.list",
                "sudo chmod 644 /etc/apt/sources.list.d/kubernetes.list",
                "sudo apt-get update",
                "sudo apt-get install -y kubectl",
            ]
        );
    }

    #[test]
    fn minikube_plan_follows_arch() {
        let config = InstallerConfig { minikube_arch: "amd64".to_string(), ..Default::default() };
        let lines: Vec<String> = config
            .steps_for(InstallPhase::Minikube)
            .iter()
            .map(InstallStep::command_line)
            .collect();
        assert_eq!(
            lines,
            vec![
                "curl -LO https://storage.googleapis.com/minikube/releases/latest/minikube-linux-amd64",
                "sudo install minikube-linux-amd64 /usr/local/bin/minikube",
                "rm minikube-linux-amd64",
            ]
        );
    }
}
