mod config;

use anyhow::Context;
use clap::Parser;
use collection_mvc::App;
use config::Cli;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = cli.resolve()?;
    tracing::debug!(?config, "configuration resolved");

    let app = App::build(config).context("building the collection")?;
    let report = app.run().context("running the scripted load")?;
    print!("{report}");
    Ok(())
}
