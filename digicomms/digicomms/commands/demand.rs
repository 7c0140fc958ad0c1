use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use configuration::config::Config;
use mobile::evaluate::EvaluateHandler;

/// Entry point for `demand` CLI command.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct DemandCommand {
    /// Config path
    #[clap(short, long)]
    config: Option<PathBuf>,
    /// Input data directory
    #[clap(short, long, default_value = "data")]
    dir: PathBuf,
    /// Name of areas file
    #[clap(short, long, default_value = "areas.csv")]
    areas: PathBuf,
    /// Output directory path
    #[clap(short, long, default_value = "outputs")]
    outpath: PathBuf,
}

impl DemandCommand {
    pub fn run(&self) -> Result<()> {
        let config = Config::load_or_default(self.config.as_deref())?;
        config.valid()?;

        let (areas, assets) = super::load_mobile_inputs(&self.dir.join(&self.areas), None, "[1/2]")?;

        let handler = EvaluateHandler::new(&config).with_demand();
        let summary = super::write_evaluations(
            &handler,
            &areas,
            &assets,
            &self.outpath,
            "demand.csv",
            "[2/2]",
        )?;
        println!("{}", summary);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_dir::{DirBuilder, TestDir};

    #[test]
    fn demand_without_assets() {
        let temp_dir = TestDir::temp();
        let tested_dir = temp_dir.root();
        let mut data = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        data.push("tests/data");

        DemandCommand {
            config: None,
            dir: data,
            areas: PathBuf::from("areas.csv"),
            outpath: tested_dir.to_path_buf(),
        }
        .run()
        .unwrap();

        let mut reader = csv::Reader::from_path(tested_dir.join("demand.csv")).unwrap();
        let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 2);
        // 2,000 users at 3 GB per month over 2 km²
        let demand: f64 = records[0][5].parse().unwrap();
        assert!((demand - 45.511).abs() < 1e-3);
        assert_eq!(&records[0][6], "");
        assert_eq!(&records[0][7], "");
    }
}
