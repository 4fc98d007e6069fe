use std::net::IpAddr;
use std::time::Duration;

use colored::*;

use talosweep_core::talos::Member;

pub const TOTAL_WIDTH: usize = 64;

pub fn header(msg: &str) {
    let formatted: String = format!("⟦ {} ⟧", msg);
    let msg_len: usize = formatted.chars().count();

    let dash_count: usize = TOTAL_WIDTH.saturating_sub(msg_len);
    let left: usize = dash_count / 2;
    let right: usize = dash_count - left;

    let line: ColoredString = format!(
        "{}{}{}",
        "─".repeat(left),
        formatted.to_uppercase().bright_green(),
        "─".repeat(right)
    )
    .bright_black();

    println!("{}", line);
}

pub fn reachable_hosts(hosts: &[IpAddr]) {
    header("reachable hosts");

    if hosts.is_empty() {
        no_results();
        return;
    }

    for (idx, host) in hosts.iter().enumerate() {
        tree_head(idx, &host.to_string());
    }
}

pub fn sweep_summary(found: usize, probed: usize, total_time: Duration) {
    let found: ColoredString = format!("{found} reachable").bold().green();
    let elapsed: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();

    println!();
    println!("Sweep complete: {found} of {probed} candidates in {elapsed}");
}

pub fn member_list(members: &[Member]) {
    header("cluster members");

    if members.is_empty() {
        no_results();
        return;
    }

    for (idx, member) in members.iter().enumerate() {
        tree_head(idx, &member.hostname);
        as_tree_one_level(vec![
            ("Node", member.node.clone()),
            ("ID", member.id.clone()),
            ("Machine Type", member.machine_type.clone()),
            ("OS", member.os.clone()),
            ("Internal IP", member.internal_ip.clone()),
            ("Addresses", member.addresses.join(", ")),
        ]);

        if idx + 1 != members.len() {
            println!();
        }
    }
}

pub fn join_candidates(hosts: &[String]) {
    header("join candidates");

    for (idx, host) in hosts.iter().enumerate() {
        tree_head(idx, host);
    }
}

fn tree_head(idx: usize, name: &str) {
    let idx_str: String = format!("[{}]", idx.to_string().cyan());
    println!("{} {}", idx_str.bright_black(), name.bright_white());
}

fn as_tree_one_level(details: Vec<(&str, String)>) {
    let key_width: usize = details.iter().map(|(key, _)| key.len()).max().unwrap_or(0);

    for (i, (key, value)) in details.iter().enumerate() {
        let last: bool = i + 1 == details.len();
        let branch: ColoredString = if !last {
            "├─".bright_black()
        } else {
            "└─".bright_black()
        };

        println!(
            " {} {}{}{} {}",
            branch,
            key,
            ".".repeat(key_width - key.len()).bright_black(),
            ":".bright_black(),
            value
        );
    }
}

fn no_results() {
    println!("{}", "no results".dimmed());
}
