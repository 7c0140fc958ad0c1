use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use configuration::config::Config;

/// Entry point for `dryrun` CLI command.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct DryrunCommand {
    /// Config path
    #[clap(short, long)]
    config: Option<PathBuf>,
}

impl DryrunCommand {
    pub fn run(&self) -> Result<()> {
        let config = Config::load_or_default(self.config.as_deref())?;
        config.valid()?;
        print!("{}", config.to_yaml()?);
        Ok(())
    }
}
