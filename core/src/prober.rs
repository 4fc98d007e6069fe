//! # Batched Reachability Probing
//!
//! Dials every candidate address on the service port, at most one batch
//! of concurrent attempts at a time.
//!
//! Workers hand their outcome back through the join set and the
//! coordinating task merges them after each batch drains, so peak
//! concurrency is bounded by the budget and no shared accumulator is
//! needed.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use tokio::net::TcpStream;
use tokio::task::JoinSet;
use tokio::time::timeout;
use tracing::{debug, info};

use talosweep_common::config::ProbeConfig;
use talosweep_common::error::SweepError;

/// Invoked with the number of candidates processed so far, once per
/// drained batch.
pub type ProgressFn = Box<dyn Fn(usize) + Send + Sync>;

/// Returns the subset of `candidates` that accepted a TCP connection on
/// the configured service port.
///
/// Refusals, timeouts and unreachable hosts are the expected outcome for
/// most of a sweep; they are dropped silently and never fail the call.
/// The only fatal condition is an invalid batch size, raised before the
/// first connection attempt.
pub async fn probe_addresses(
    candidates: &[IpAddr],
    cfg: &ProbeConfig,
    progress: Option<ProgressFn>,
) -> Result<Vec<IpAddr>, SweepError> {
    let budget: usize = cfg.batch_limit()?;

    info!(
        "dialing {} hosts on port {} with batch size {}",
        candidates.len(),
        cfg.service_port,
        budget
    );

    let mut reachable: Vec<IpAddr> = Vec::new();
    let mut processed: usize = 0;

    for batch in candidates.chunks(budget) {
        debug!(
            "processing batch {}-{} of {}",
            processed + 1,
            processed + batch.len(),
            candidates.len()
        );

        let mut attempts: JoinSet<Option<IpAddr>> = JoinSet::new();
        for &addr in batch {
            let target = SocketAddr::new(addr, cfg.service_port);
            let attempt_timeout = cfg.attempt_timeout;
            attempts.spawn(async move { dial(target, attempt_timeout).await.then_some(addr) });
        }

        // Barrier: the batch drains completely before the next one starts.
        while let Some(outcome) = attempts.join_next().await {
            if let Ok(Some(addr)) = outcome {
                reachable.push(addr);
            }
        }

        processed += batch.len();
        if let Some(report) = progress.as_ref() {
            report(processed);
        }
    }

    Ok(reachable)
}

/// One connection attempt. Success means the handshake completed within
/// the timeout; the stream is dropped immediately afterwards.
async fn dial(target: SocketAddr, attempt_timeout: Duration) -> bool {
    match timeout(attempt_timeout, TcpStream::connect(target)).await {
        Ok(Ok(_stream)) => {
            debug!("connected to address {target} successfully");
            true
        }
        Ok(Err(_)) | Err(_) => false,
    }
}
