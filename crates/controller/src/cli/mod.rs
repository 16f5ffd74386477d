// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

mod reload;

#[derive(Parser, Debug, Clone)]
#[clap(name = "eventify-controller", version)]
pub struct Args {
    /// Specify path to configuration file
    #[clap(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Triggers a reload of the notification settings in all running controllers
    #[clap(long)]
    pub reload: bool,
}

impl Args {
    /// Returns true if we want to startup the controller after we finished the cli part
    pub fn controller_should_start(&self) -> bool {
        !self.reload
    }
}

/// Parses the CLI-Arguments into [`Args`]
///
/// Also runs (optional) cli commands if necessary
pub fn parse_args() -> Result<Args> {
    let args = Args::parse();

    if args.reload {
        reload::trigger_reload()?;
    }

    Ok(args)
}
