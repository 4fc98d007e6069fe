use std::net::IpAddr;
use std::time::Instant;

use tracing::info;

use talosweep_common::{config::ProbeConfig, network::range};
use talosweep_core::prober;

use crate::terminal::{print, progress};

pub async fn scan(ranges: &str, cfg: &ProbeConfig) -> anyhow::Result<()> {
    let candidates: Vec<IpAddr> = range::enumerate(ranges)?;
    info!("{} candidate addresses enumerated", candidates.len());

    let start_time: Instant = Instant::now();
    let bar = progress::sweep_bar(candidates.len());
    let reachable: Vec<IpAddr> =
        prober::probe_addresses(&candidates, cfg, Some(progress::reporter(&bar))).await?;
    bar.finish_and_clear();

    print::reachable_hosts(&reachable);
    print::sweep_summary(reachable.len(), candidates.len(), start_time.elapsed());
    Ok(())
}
