//! # Membership Reconciliation
//!
//! A pure, order-preserving filter over the reachable set: drops
//! duplicates, identifiers that are not IPv4 addresses, and addresses
//! already claimed by a cluster member. What remains are the join
//! candidates.

use std::net::IpAddr;

use tracing::debug;

use crate::talos::Member;

/// Returns the reachable addresses that still need onboarding.
///
/// A member claims an address strictly through its
/// [`internal_ip`](Member::internal_ip) field; the wider address list of
/// a member is never consulted. An empty result is a normal outcome, not
/// an error.
pub fn unjoined_hosts(reachable: &[String], members: &[Member]) -> Vec<String> {
    let mut unjoined: Vec<String> = Vec::new();

    for candidate in reachable {
        if unjoined.contains(candidate) {
            debug!("host {candidate} already collected, skipping");
            continue;
        }

        let is_ipv4 = candidate
            .parse::<IpAddr>()
            .map(|addr| addr.is_ipv4())
            .unwrap_or(false);
        if !is_ipv4 {
            debug!("host {candidate} is not an IPv4 address, skipping");
            continue;
        }

        if members.iter().any(|member| member.internal_ip == *candidate) {
            debug!("host {candidate} is already a member, skipping");
            continue;
        }

        unjoined.push(candidate.clone());
    }

    unjoined
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;

    fn member(internal_ip: &str) -> Member {
        Member {
            node: "10.0.0.90".to_string(),
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

    fn hosts(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn members_are_excluded_by_internal_address() {
        let reachable = hosts(&["10.0.0.1", "10.0.0.2"]);
        let members = vec![member("10.0.0.1")];

        assert_eq!(unjoined_hosts(&reachable, &members), hosts(&["10.0.0.2"]));
    }

    #[test]
    fn duplicates_and_invalid_entries_are_dropped() {
        let reachable = hosts(&["10.0.0.5", "10.0.0.5", "not-an-ip"]);

        assert_eq!(unjoined_hosts(&reachable, &[]), hosts(&["10.0.0.5"]));
    }

    #[test]
    fn non_ipv4_addresses_are_not_join_candidates() {
        let reachable = hosts(&["fd00::1", "10.0.0.9", "::1"]);

        assert_eq!(unjoined_hosts(&reachable, &[]), hosts(&["10.0.0.9"]));
    }

    #[test]
    fn matching_is_strictly_on_the_internal_address() {
        // The member knows 10.0.0.3 under a secondary address only; its
        // internal address is different, so 10.0.0.3 stays a candidate.
        let mut shadow = member("10.0.0.4");
        shadow.addresses.push("10.0.0.3".to_string());

        let reachable = hosts(&["10.0.0.3", "10.0.0.4"]);

        assert_eq!(
            unjoined_hosts(&reachable, &[shadow]),
            hosts(&["10.0.0.3"])
        );
    }

    #[test]
    fn reconciliation_is_idempotent() {
        let reachable = hosts(&["10.0.0.7", "10.0.0.7", "bogus", "10.0.0.8"]);
        let members = vec![member("10.0.0.8")];

        let first = unjoined_hosts(&reachable, &members);
        let second = unjoined_hosts(&first, &members);

        assert_eq!(first, hosts(&["10.0.0.7"]));
        assert_eq!(second, first);
    }

    #[test]
    fn input_order_is_preserved() {
        let reachable = hosts(&["10.0.0.3", "10.0.0.1", "10.0.0.2"]);

        assert_eq!(unjoined_hosts(&reachable, &[]), reachable);
    }

    #[test]
    fn everything_already_joined_yields_an_empty_set() {
        let reachable = hosts(&["10.0.0.1"]);
        let members = vec![member("10.0.0.1"), member("10.0.0.2")];

        assert!(unjoined_hosts(&reachable, &members).is_empty());
    }
}
