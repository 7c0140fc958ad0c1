use anyhow::{Context, Result};
use clap::Parser;
use indicatif::HumanCount;
use std::{fs::create_dir_all, path::PathBuf};

use crate::utils;
use configuration::config::Config;
use fixed::{
    exchange::{load_exchanges, read_lookup},
    islands::import_islands,
    FixedNetwork,
};

/// Entry point for `core` CLI command.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct CoreCommand {
    /// Config path
    #[clap(short, long)]
    config: Option<PathBuf>,
    /// Input data directory
    #[clap(short, long, default_value = "data")]
    dir: PathBuf,
    /// Name of exchanges file
    #[clap(short, long, default_value = "exchanges.csv")]
    exchanges: PathBuf,
    /// Name of core node lookup file
    #[clap(short, long, default_value = "core_lookup.csv")]
    lookup: PathBuf,
    /// Name of island assignments file
    #[clap(short, long)]
    islands: Option<PathBuf>,
    /// Output directory path
    #[clap(short, long, default_value = "outputs")]
    outpath: PathBuf,
}

impl CoreCommand {
    pub fn run(&self) -> Result<()> {
        let config = Config::load_or_default(self.config.as_deref())?;
        config.valid()?;

        create_dir_all(&self.outpath).context(format!(
            "unable to create output directory '{}'",
            self.outpath.display()
        ))?;

        // Load exchanges
        let exchanges_path = self.dir.join(&self.exchanges);
        let spinner = utils::default_spinner();
        spinner.set_message(format!(
            "[1/4] Loading exchanges from {}...",
            exchanges_path.display()
        ));
        let exchanges = load_exchanges(&exchanges_path).context("failed to load exchanges")?;
        spinner.finish_with_message(format!(
            "[1/4] Completed loading exchanges ({})",
            HumanCount(exchanges.len() as u64)
        ));

        // Load lookups
        let spinner = utils::default_spinner();
        spinner.set_message("[2/4] Loading core lookup and islands...");
        let lookup = read_lookup(self.dir.join(&self.lookup), &config.core)
            .context("failed to load core lookup")?;
        let islands = match &self.islands {
            Some(name) => import_islands(self.dir.join(name)).context("failed to load islands")?,
            None => Vec::new(),
        };
        spinner.finish_with_message(format!(
            "[2/4] Completed loading {} core lookup rows and {} island exchanges",
            HumanCount(lookup.len() as u64),
            HumanCount(islands.len() as u64)
        ));

        // Build network
        let spinner = utils::default_spinner();
        spinner.set_message("[3/4] Building core network...");
        let network = FixedNetwork::build(exchanges, &lookup, &islands, &config.core)?;
        spinner.finish_with_message(format!(
            "[3/4] Completed building core network ({} links)",
            HumanCount(network.edges.len() as u64)
        ));

        // Write outputs
        let spinner = utils::default_spinner();
        spinner.set_message(format!(
            "[4/4] Writing network to '{}'...",
            self.outpath.display()
        ));
        network.write(&self.outpath, &config.crs)?;
        spinner.finish_with_message(format!(
            "[4/4] Completed writing network to '{}'",
            self.outpath.display()
        ));
        println!("{}", network.summary());

        Ok(())
    }
}
