//! Entry point for catscene.

mod cli;

use anyhow::Result;
use clap::Parser;

use crate::cli::Cli;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    log::info!(
        "Starting catscene. Backend: {:?}, window_size={}x{}, asset_root={}",
        cli.gpu_backend,
        cli.size.0,
        cli.size.1,
        cli.asset_root.display()
    );

    if let Err(e) = platform::run(cli.into_config()) {
        log::error!("{e:#}");
        return Err(e);
    }

    log::info!("Graceful shutdown. Bye!");
    Ok(())
}
