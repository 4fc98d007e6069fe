use indicatif::{ProgressBar, ProgressStyle};

use talosweep_core::prober::ProgressFn;

/// A bar spanning the candidate count, advanced once per drained batch.
pub fn sweep_bar(total: usize) -> ProgressBar {
    let bar = ProgressBar::new(total as u64);
    let style = ProgressStyle::with_template("{spinner:.blue} [{bar:40.green}] {pos}/{len} dialed")
        .unwrap()
        .progress_chars("█▓░");

    bar.set_style(style);
    bar
}

pub fn reporter(bar: &ProgressBar) -> ProgressFn {
    let bar = bar.clone();
    Box::new(move |processed| bar.set_position(processed as u64))
}
