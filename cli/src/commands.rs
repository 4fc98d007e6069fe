pub mod join;
pub mod members;
pub mod scan;

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use talosweep_common::config::{BATCH_SIZE_DEFAULT, ProbeConfig, TALOS_API_PORT};
use talosweep_core::talos::Talosctl;

#[derive(Parser)]
#[command(name = "talosweep")]
#[command(about = "Find Talos nodes on the network and onboard the ones not yet in the cluster.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sweep address ranges for reachable Talos nodes
    #[command(alias = "s")]
    Scan {
        /// Comma-separated CIDR ranges, e.g. 10.0.0.0/24,10.0.1.0/28
        ranges: String,
        #[command(flatten)]
        probe: ProbeArgs,
    },
    /// List the current cluster members
    #[command(alias = "m")]
    Members {
        #[command(flatten)]
        talos: TalosArgs,
    },
    /// Sweep, then join every reachable node that is not yet a member
    #[command(alias = "j")]
    Join {
        /// Comma-separated CIDR ranges to sweep
        ranges: String,
        #[command(flatten)]
        probe: ProbeArgs,
        #[command(flatten)]
        talos: TalosArgs,
        /// Machine configuration applied to joining workers
        #[arg(long, value_name = "FILE")]
        worker_config: PathBuf,
    },
}

#[derive(Args)]
pub struct ProbeArgs {
    /// Service port to dial on every candidate
    #[arg(long, default_value_t = TALOS_API_PORT)]
    pub port: u16,
    /// Per-attempt connection timeout in seconds
    #[arg(long, default_value_t = 3)]
    pub timeout: u64,
    /// Concurrent attempts per batch; -1 picks the default budget
    #[arg(long, default_value_t = BATCH_SIZE_DEFAULT, allow_hyphen_values = true)]
    pub batch_size: i64,
}

impl ProbeArgs {
    pub fn to_config(&self) -> ProbeConfig {
        ProbeConfig {
            service_port: self.port,
            attempt_timeout: Duration::from_secs(self.timeout),
            batch_size: self.batch_size,
        }
    }
}

#[derive(Args)]
pub struct TalosArgs {
    /// Path to the talosconfig used for cluster queries
    #[arg(long, value_name = "FILE")]
    pub talosconfig: PathBuf,
    /// Timeout in seconds for each talosctl invocation
    #[arg(long, default_value_t = 10)]
    pub command_timeout: u64,
}

impl TalosArgs {
    pub fn to_client(&self) -> Talosctl {
        Talosctl::new(
            self.talosconfig.clone(),
            Duration::from_secs(self.command_timeout),
        )
    }
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
