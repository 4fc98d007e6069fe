//! # Boundary with `talosctl`
//!
//! Membership queries and configuration pushes both shell out to the
//! `talosctl` binary, pointed at a talosconfig through the environment.
//! Every invocation is bounded by a timeout so a hung control plane
//! cannot stall the sweep.

use std::path::PathBuf;
use std::process::Output;
use std::time::Duration;

use anyhow::{Context, bail};
use tokio::process::Command;
use tokio::time::timeout;

pub mod join;
pub mod members;

pub use members::{Member, MembershipSource};

/// Handle to a `talosctl` installation and the talosconfig it uses.
#[derive(Debug, Clone)]
pub struct Talosctl {
    talosconfig: PathBuf,
    command_timeout: Duration,
}

impl Talosctl {
    pub fn new(talosconfig: impl Into<PathBuf>, command_timeout: Duration) -> Self {
        Self {
            talosconfig: talosconfig.into(),
            command_timeout,
        }
    }

    /// Runs `talosctl` with the given arguments and returns its stdout,
    /// failing on a non-zero exit or on the command timeout.
    async fn run(&self, args: &[&str]) -> anyhow::Result<String> {
        let invocation = Command::new("talosctl")
            .args(args)
            .env("TALOSCONFIG", &self.talosconfig)
            .output();

        let output: Output = match timeout(self.command_timeout, invocation).await {
            Ok(result) => result.context("failed to execute talosctl")?,
            Err(_) => bail!(
                "talosctl {} timed out after {:?}",
                args.join(" "),
                self.command_timeout
            ),
        };

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!(
                "talosctl {} exited with {}: {}{}",
                args.join(" "),
                output.status,
                stdout,
                stderr
            );
        }

        Ok(stdout)
    }
}
