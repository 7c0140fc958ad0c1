use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use super::capacity::load_lookup_table;
use configuration::config::Config;
use mobile::evaluate::EvaluateHandler;

/// Entry point for `evaluate` CLI command.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct EvaluateCommand {
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

impl EvaluateCommand {
    pub fn run(&self) -> Result<()> {
        let config = Config::load_or_default(self.config.as_deref())?;
        config.valid()?;

        let (areas, assets) = super::load_mobile_inputs(
            &self.dir.join(&self.areas),
            Some(self.dir.join(&self.assets).as_path()),
            "[1/3]",
        )?;

        let table = load_lookup_table(&self.dir.join(&self.lookup), "[2/3]")?;

        let handler = EvaluateHandler::new(&config)
            .with_demand()
            .with_capacity(&table);
        let summary = super::write_evaluations(
            &handler,
            &areas,
            &assets,
            &self.outpath,
            "evaluation.csv",
            "[3/3]",
        )?;
        println!("{}", summary);
        if summary.deficit_areas() > 0 {
            tracing::warn!(
                "{} of {} areas have insufficient capacity",
                summary.deficit_areas(),
                summary.areas()
            );
        }
        Ok(())
    }
}
