pub mod show;
pub mod watch;

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use netdir_common::config::{CascadeMode, DEFAULT_UPDATE_INTERVAL};

#[derive(Parser)]
#[command(name = "netdir")]
#[command(about = "Keeps a directory of network objects in sync with an inventory.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Seconds between refresh cycles, values below 10 disable refresh
    #[arg(short, long, global = true, default_value_t = DEFAULT_UPDATE_INTERVAL)]
    pub interval: u64,

    /// How far removing a group cleans up nested groups (shallow, recursive)
    #[arg(long, global = true, default_value = "shallow")]
    pub cascade: CascadeMode,

    /// Print less, repeat for even less
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub quiet: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load an inventory once and print the resulting tree
    #[command(alias = "s")]
    Show { inventory: PathBuf },
    /// Refresh from an inventory periodically and report every change
    #[command(alias = "w")]
    Watch { inventory: PathBuf },
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
