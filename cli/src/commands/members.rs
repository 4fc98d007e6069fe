use talosweep_core::talos::{MembershipSource, Talosctl};

use crate::terminal::print;

pub async fn members(talos: &Talosctl) -> anyhow::Result<()> {
    let members = talos.members().await?;
    print::member_list(&members);
    Ok(())
}
