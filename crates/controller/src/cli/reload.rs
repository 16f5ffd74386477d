// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

use anyhow::{Context, Error, Result};
use nix::sys::signal::{kill, SIGHUP};
use sysinfo::{
    get_current_pid, Pid, PidExt, ProcessExt, ProcessRefreshKind, RefreshKind, System, SystemExt,
};

/// Sends SIGHUP to every other process running under the same name as this one
pub fn trigger_reload() -> Result<()> {
    let system = System::new_with_specifics(
        RefreshKind::default().with_processes(ProcessRefreshKind::everything()),
    );

    let targets = sibling_processes(&system)?;

    if targets.is_empty() {
        println!("There is currently no other controller process running");
        return Ok(());
    }

    for pid in targets {
        kill(nix::unistd::Pid::from_raw(pid.as_u32() as i32), SIGHUP)
            .with_context(|| format!("Failed to send SIGHUP to process {pid}"))?;
        println!("Sent reload signal to process {pid}");
    }

    Ok(())
}

/// Pids of all processes with the name of the current process, excluding itself
fn sibling_processes(system: &System) -> Result<Vec<Pid>> {
    let current_pid = get_current_pid().map_err(Error::msg)?;
    let current = system
        .process(current_pid)
        .context("Failed to get current process")?;

    Ok(system
        .processes()
        .iter()
        .filter(|(pid, process)| **pid != current_pid && process.name() == current.name())
        .map(|(pid, _)| *pid)
        .collect())
}
