use anyhow::{Context, Result};
use clap::Parser;
use indicatif::HumanCount;
use std::path::{Path, PathBuf};

use crate::utils;
use configuration::config::Config;
use mobile::{evaluate::EvaluateHandler, CapacityLookupTable};

/// Entry point for `capacity` CLI command.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct CapacityCommand {
    /// Config path
    #[clap(short, long)]
    config: Option<PathBuf>,
    /// Input data directory
    #[clap(short, long, default_value = "data")]
    dir: PathBuf,
    /// Name of areas file
    #[clap(short, long, default_value = "areas.csv")]
    areas: PathBuf,
    /// Name of site assets file
    #[clap(short = 's', long, default_value = "assets.csv")]
    assets: PathBuf,
    /// Name of capacity lookup table
    #[clap(short, long, default_value = "capacity_lookup_table.csv")]
    lookup: PathBuf,
    /// Output directory path
    #[clap(short, long, default_value = "outputs")]
    outpath: PathBuf,
}

impl CapacityCommand {
    pub fn run(&self) -> Result<()> {
        let config = Config::load_or_default(self.config.as_deref())?;
        config.valid()?;

        let (areas, assets) = super::load_mobile_inputs(
            &self.dir.join(&self.areas),
            Some(self.dir.join(&self.assets).as_path()),
            "[1/3]",
        )?;

        let table = load_lookup_table(&self.dir.join(&self.lookup), "[2/3]")?;

        let handler = EvaluateHandler::new(&config).with_capacity(&table);
        let summary = super::write_evaluations(
            &handler,
            &areas,
            &assets,
            &self.outpath,
            "capacity.csv",
            "[3/3]",
        )?;
        println!("{}", summary);
        Ok(())
    }
}

pub fn load_lookup_table(path: &Path, step: &str) -> Result<CapacityLookupTable> {
    let spinner = utils::default_spinner();
    spinner.set_message(format!("{step} Loading capacity lookup table..."));
    let table = CapacityLookupTable::load(path).context("failed to load capacity lookup table")?;
    spinner.finish_with_message(format!(
        "{step} Completed loading capacity lookup table ({} curves)",
        HumanCount(table.len() as u64)
    ));
    Ok(table)
}
