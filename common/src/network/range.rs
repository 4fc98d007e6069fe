//! # Address Range Enumeration
//!
//! Expands CIDR range specifications into the candidate addresses a
//! sweep will probe.
//!
//! Ranges arrive as one string of comma-separated CIDR blocks
//! (e.g. `10.0.0.0/24,10.0.1.0/28`). Every block is parsed and expanded
//! independently; for IPv4 blocks with more than two addresses the
//! network and broadcast addresses are stripped, since nothing can be
//! dialed there.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use ipnetwork::IpNetwork;
use tracing::debug;

use crate::error::SweepError;

/// Expands one or more comma-separated CIDR specifications into
/// candidate addresses, concatenated in input order.
///
/// Overlapping blocks are not deduplicated here; later stages tolerate
/// duplicates. A malformed block anywhere fails the whole call with no
/// partial output.
pub fn enumerate(ranges: &str) -> Result<Vec<IpAddr>, SweepError> {
    let mut candidates: Vec<IpAddr> = Vec::new();

    for block in ranges.split(',') {
        let block = block.trim();
        let network: IpNetwork = block.parse().map_err(|e: ipnetwork::IpNetworkError| {
            SweepError::InvalidRange {
                range: block.to_string(),
                reason: e.to_string(),
            }
        })?;

        let addrs = expand(network);
        debug!("range {block} expanded to {} candidates", addrs.len());
        candidates.extend(addrs);
    }

    Ok(candidates)
}

/// Walks a single network from its base address upward, in strictly
/// increasing order.
fn expand(network: IpNetwork) -> Vec<IpAddr> {
    let mut addrs: Vec<IpAddr> = Vec::new();
    let mut addr: IpAddr = network.network();

    while network.contains(addr) {
        addrs.push(addr);
        let next = next_addr(addr);
        if next <= addr {
            // Wrapped past the top of the address space.
            break;
        }
        addr = next;
    }

    // The first and last address of an IPv4 subnet identify the network
    // itself and its broadcast. Point-to-point blocks (/31, /32) have no
    // such reservation.
    if network.is_ipv4() && addrs.len() > 2 {
        addrs.pop();
        addrs.remove(0);
    }

    addrs
}

/// Ripple increment: bump the lowest-order byte, carrying into higher
/// bytes across the full address width.
fn next_addr(addr: IpAddr) -> IpAddr {
    match addr {
        IpAddr::V4(v4) => {
            let mut octets = v4.octets();
            ripple_increment(&mut octets);
            IpAddr::V4(Ipv4Addr::from(octets))
        }
        IpAddr::V6(v6) => {
            let mut octets = v6.octets();
            ripple_increment(&mut octets);
            IpAddr::V6(Ipv6Addr::from(octets))
        }
    }
}

fn ripple_increment(octets: &mut [u8]) {
    for octet in octets.iter_mut().rev() {
        *octet = octet.wrapping_add(1);
        if *octet != 0 {
            break;
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
