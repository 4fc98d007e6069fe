#![cfg(test)]
use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use async_trait::async_trait;
use talosweep_common::config::ProbeConfig;
use talosweep_common::error::SweepError;
use talosweep_common::network::range;
use talosweep_core::prober;
use talosweep_core::reconcile;
use talosweep_core::talos::{Member, MembershipSource};
use tokio::net::TcpListener;

/// Membership source backed by a fixture instead of a talosctl
/// invocation.
struct FixedMembers(Vec<Member>);

#[async_trait]
impl MembershipSource for FixedMembers {
    async fn members(&self) -> anyhow::Result<Vec<Member>> {
        Ok(self.0.clone())
    }
}

fn worker(internal_ip: &str) -> Member {
    Member {
        node: internal_ip.to_string(),
        namespace: "cluster".to_string(),
        resource_type: "Members.cluster.talos.dev".to_string(),
        id: format!("talos-{internal_ip}"),
        version: "1".to_string(),
        hostname: format!("talos-{internal_ip}"),
        machine_type: "worker".to_string(),
        os: "Talos (v1.8.0)".to_string(),
        addresses: vec![internal_ip.to_string()],
        internal_ip: internal_ip.to_string(),
    }
}

fn probe_cfg(port: u16) -> ProbeConfig {
    ProbeConfig {
        service_port: port,
        attempt_timeout: Duration::from_millis(500),
        ..ProbeConfig::default()
    }
}

/// Enumerating 127.0.0.0/30 yields the two loopback hosts between
/// network and broadcast; only the one with a listener is reachable and,
/// with no members yet, it comes out as the single join candidate.
#[tokio::test]
async fn sweep_pipeline_flags_the_reachable_host() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    let candidates: Vec<IpAddr> = range::enumerate("127.0.0.0/30").unwrap();
    assert_eq!(
        candidates,
        vec![
            IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)),
            IpAddr::V4(Ipv4Addr::new(127, 0, 0, 2)),
        ]
    );

    let reachable = prober::probe_addresses(&candidates, &probe_cfg(port), None)
        .await
        .unwrap();
    assert_eq!(reachable, vec![IpAddr::V4(Ipv4Addr::LOCALHOST)]);

    let source = FixedMembers(Vec::new());
    let members = source.members().await.unwrap();

    let reachable: Vec<String> = reachable.iter().map(ToString::to_string).collect();
    let unjoined = reconcile::unjoined_hosts(&reachable, &members);
    assert_eq!(unjoined, vec!["127.0.0.1".to_string()]);
}

/// A host that is already a member never becomes a join candidate, and
/// running reconciliation over its own output changes nothing.
#[tokio::test]
async fn sweep_pipeline_skips_existing_members() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    let candidates = range::enumerate("127.0.0.0/30").unwrap();
    let reachable = prober::probe_addresses(&candidates, &probe_cfg(port), None)
        .await
        .unwrap();

    let source = FixedMembers(vec![worker("127.0.0.1")]);
    let members = source.members().await.unwrap();

    let reachable: Vec<String> = reachable.iter().map(ToString::to_string).collect();
    let unjoined = reconcile::unjoined_hosts(&reachable, &members);
    assert!(unjoined.is_empty());

    let again = reconcile::unjoined_hosts(&unjoined, &members);
    assert_eq!(again, unjoined);
}

/// A bad batch size aborts the run before the prober touches the
/// network.
#[tokio::test]
async fn invalid_batch_size_aborts_the_sweep() {
    let candidates = range::enumerate("127.0.0.0/30").unwrap();

    let cfg = ProbeConfig {
        batch_size: 0,
        ..probe_cfg(1)
    };

    let err = prober::probe_addresses(&candidates, &cfg, None)
        .await
        .unwrap_err();
    assert_eq!(err, SweepError::InvalidBatchSize(0));
}
