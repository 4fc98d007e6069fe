//! Cluster membership as reported by `talosctl get members`.

use std::net::IpAddr;

use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::Talosctl;

/// One node already recognized as part of the cluster.
#[derive(Debug, Clone)]
pub struct Member {
    pub node: String,
    pub namespace: String,
    pub resource_type: String,
    pub id: String,
    pub version: String,
    pub hostname: String,
    pub machine_type: String,
    pub os: String,
    pub addresses: Vec<String>,
    /// First IPv4 entry of `addresses`; the field join candidates are
    /// matched against.
    pub internal_ip: String,
}

impl Member {
    pub fn is_control_plane(&self) -> bool {
        self.machine_type == "controlplane"
    }

    pub fn is_worker(&self) -> bool {
        self.machine_type == "worker"
    }
}

/// Source of the current membership list.
///
/// The sweep only reads members; whether they come from a `talosctl`
/// invocation or a fixture sits behind this seam.
#[async_trait]
pub trait MembershipSource {
    async fn members(&self) -> anyhow::Result<Vec<Member>>;
}

#[async_trait]
impl MembershipSource for Talosctl {
    async fn members(&self) -> anyhow::Result<Vec<Member>> {
        let raw = self.run(&["get", "members", "-o", "json"]).await?;
        let members = parse_members(&raw).context("failed to parse members")?;
        debug!("talosctl reported {} members", members.len());
        Ok(members)
    }
}

/// `talosctl get members -o json` emits one JSON document per member,
/// back to back; a streaming deserializer walks them all.
pub fn parse_members(raw: &str) -> anyhow::Result<Vec<Member>> {
    let mut members: Vec<Member> = Vec::new();

    let stream = serde_json::Deserializer::from_str(raw.trim()).into_iter::<MemberRecord>();
    for record in stream {
        let record = record.context("could not parse member document")?;
        members.push(record.into());
    }

    Ok(members)
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct MemberRecord {
    metadata: MemberMetadata,
    node: String,
    spec: MemberSpec,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct MemberMetadata {
    id: String,
    namespace: String,
    #[serde(rename = "type")]
    resource_type: String,
    version: i64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct MemberSpec {
    addresses: Vec<String>,
    hostname: String,
    machine_type: String,
    operating_system: String,
}

impl From<MemberRecord> for Member {
    fn from(record: MemberRecord) -> Self {
        let internal_ip = internal_ip(&record.spec.addresses);

        Member {
            node: record.node,
            namespace: record.metadata.namespace,
            resource_type: record.metadata.resource_type,
            id: record.metadata.id,
            version: record.metadata.version.to_string(),
            hostname: record.spec.hostname,
            machine_type: record.spec.machine_type,
            os: record.spec.operating_system,
            internal_ip,
            addresses: record.spec.addresses,
        }
    }
}

/// The first IPv4 entry wins; nodes without one fall back to their first
/// address so reconciliation still has something to match against.
fn internal_ip(addresses: &[String]) -> String {
    addresses
        .iter()
        .find(|addr| {
            addr.parse::<IpAddr>()
                .map(|ip| ip.is_ipv4())
                .unwrap_or(false)
        })
        .or_else(|| addresses.first())
        .cloned()
        .unwrap_or_default()
}
