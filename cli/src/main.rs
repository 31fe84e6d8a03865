mod commands;
mod inventory;
mod terminal;

use commands::{CommandLine, Commands, show, watch};
use netdir_common::config::Config;
use terminal::{logging, print};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init_logging();

    let cfg = Config {
        update_interval: commands.interval,
        cascade: commands.cascade,
        quiet: commands.quiet,
    };

    match commands.command {
        Commands::Show { inventory } => {
            print::header("network object directory", cfg.quiet);
            show::show(&inventory, &cfg)
        }
        Commands::Watch { inventory } => {
            print::header("watching inventory", cfg.quiet);
            watch::watch(&inventory, &cfg).await
        }
    }
}
