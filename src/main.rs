use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use webpconv::batch;
use webpconv::cli::Cli;
use webpconv::formats::Capabilities;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let caps = Capabilities::probe(!cli.no_svg);
    let request = cli.into_request();
    batch::run(&request, &caps)?;
    Ok(())
}
