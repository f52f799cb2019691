//! Roster entry-point: loads settings, wires adapters, and runs one command.

use std::ffi::OsString;
use std::io;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use roster::RosterSettings;
use roster::domain::Loader;
use roster::inbound::cli::{self, Cli, Command};
use roster::outbound::cache::SlotCacheStore;
use roster::outbound::directory::HttpDirectorySource;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let args = Cli::parse();
    let settings = RosterSettings::load_from_iter([OsString::from("roster")])
        .wrap_err("failed to load roster settings")?;

    let source = HttpDirectorySource::new(settings.endpoints()?)
        .wrap_err("failed to build directory client")?;
    let cache_dir = settings.cache_dir()?;
    let cache = SlotCacheStore::open(&cache_dir, settings.cache_slot())
        .wrap_err_with(|| format!("failed to open cache directory {cache_dir}"))?;
    let loader = Loader::new(Arc::new(source), Arc::new(cache));
    let keys = settings.key_strategy()?.generator(Arc::new(DefaultClock));

    let command = args.command.unwrap_or(Command::List);
    let mut stdout = io::stdout().lock();
    cli::run(command, &loader, keys, &mut stdout).await?;
    Ok(())
}
