use std::net::IpAddr;
use std::path::Path;

use tracing::{error, info};

use talosweep_common::{config::ProbeConfig, network::range};
use talosweep_core::talos::{MembershipSource, Talosctl};
use talosweep_core::{prober, reconcile};

use crate::terminal::{print, progress};

/// The full pipeline: enumerate, probe, fetch members, reconcile, then
/// push the worker config to every host that is not yet a member.
pub async fn join(
    ranges: &str,
    cfg: &ProbeConfig,
    talos: &Talosctl,
    worker_config: &Path,
) -> anyhow::Result<()> {
    let candidates: Vec<IpAddr> = range::enumerate(ranges)?;
    info!("{} candidate addresses enumerated", candidates.len());

    let bar = progress::sweep_bar(candidates.len());
    let reachable: Vec<IpAddr> =
        prober::probe_addresses(&candidates, cfg, Some(progress::reporter(&bar))).await?;
    bar.finish_and_clear();
    info!("{} reachable hosts", reachable.len());

    let members = talos.members().await?;
    info!("cluster currently has {} members", members.len());

    let reachable: Vec<String> = reachable.iter().map(ToString::to_string).collect();
    let unjoined: Vec<String> = reconcile::unjoined_hosts(&reachable, &members);

    if unjoined.is_empty() {
        info!("no new hosts to join");
        return Ok(());
    }

    print::join_candidates(&unjoined);

    // One failed join must not stop the remaining ones.
    for host in &unjoined {
        if let Err(e) = talos.apply_config(host, worker_config).await {
            error!("failed to join worker {host}: {e:#}");
        }
    }

    Ok(())
}
