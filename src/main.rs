use anyhow::Context;
use clap::Parser;

use simple_interest::cli::Cli;
use simple_interest::config::{Config, ConfigStore};
use simple_interest::logging::init_tracing;
use simple_interest::InterestServer;

fn load_config(cli: &Cli) -> Result<Config, simple_interest::config::ConfigError> {
    let mut config = Config::load_from(&cli.config_path())?;
    cli.apply(&mut config);
    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    tracing::debug!(?config, "loaded configuration");

    let store = ConfigStore::new(config, cli.config_path());
    let mut server = InterestServer::new(store).context("failed to create server")?;
    server.bind().await.context("failed to bind server address")?;
    server.run().await.context("server terminated with an error")?;

    Ok(())
}
