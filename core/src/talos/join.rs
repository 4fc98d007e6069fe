//! Applying machine configuration to nodes that should join.

use std::path::Path;

use anyhow::Context;
use tracing::info;

use super::Talosctl;

impl Talosctl {
    /// Pushes a worker machine configuration to a single node.
    ///
    /// `--insecure` is required here: the target node is still in
    /// maintenance mode and has no client certificate to present yet.
    pub async fn apply_config(&self, node_ip: &str, worker_config: &Path) -> anyhow::Result<()> {
        info!("applying worker config to {node_ip}");

        let config_arg = worker_config.to_string_lossy();
        self.run(&[
            "apply-config",
            "--insecure",
            "--nodes",
            node_ip,
            "--file",
            config_arg.as_ref(),
        ])
        .await
        .with_context(|| format!("failed to join worker {node_ip}"))?;

        Ok(())
    }
}
