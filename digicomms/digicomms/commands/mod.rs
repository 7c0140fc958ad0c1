pub mod capacity;
pub mod core;
pub mod demand;
pub mod dryrun;
pub mod evaluate;

pub use crate::CapacityCommand;
pub use crate::CoreCommand;
pub use crate::DemandCommand;
pub use crate::DryrunCommand;
pub use crate::EvaluateCommand;

use anyhow::{Context, Result};
use indicatif::HumanCount;
use std::{
    fs::{create_dir_all, File},
    path::Path,
};

use crate::utils;
use mobile::{
    assets::{group_assets, load_areas, load_assets, unmatched_assets},
    evaluate::EvaluateHandler,
    Area, Asset, EvaluationSummary,
};

/// Load areas, and assets when a path is given.
fn load_mobile_inputs(
    areas_path: &Path,
    assets_path: Option<&Path>,
    step: &str,
) -> Result<(Vec<Area>, Vec<Asset>)> {
    let spinner = utils::default_spinner();
    spinner.set_message(format!("{step} Loading areas and assets..."));
    let areas = load_areas(areas_path).context("failed to load areas")?;
    let assets = match assets_path {
        Some(path) => load_assets(path).context("failed to load assets")?,
        None => Vec::new(),
    };
    spinner.finish_with_message(format!(
        "{step} Completed loading {} areas and {} assets",
        HumanCount(areas.len() as u64),
        HumanCount(assets.len() as u64)
    ));
    Ok((areas, assets))
}

/// Evaluate every area, writing one csv record per area to `outpath/name`.
fn write_evaluations(
    handler: &EvaluateHandler,
    areas: &[Area],
    assets: &[Asset],
    outpath: &Path,
    name: &str,
    step: &str,
) -> Result<EvaluationSummary> {
    create_dir_all(outpath)?;
    let out_path = outpath.join(name);
    let out_file = File::create(&out_path).context(format!(
        "unable to create out file '{}'",
        out_path.display()
    ))?;
    let mut wtr = csv::Writer::from_writer(out_file);

    let grouped = group_assets(assets);
    let unmatched = unmatched_assets(&grouped, areas);
    if unmatched > 0 {
        tracing::warn!(
            "{} assets reference areas missing from the areas file and are ignored",
            unmatched
        );
    }
    let progress_bar = utils::default_progress_bar(areas.len() as u64);
    progress_bar.set_message(format!("{step} Evaluating areas..."));

    let mut summary = EvaluationSummary::new();
    for area in areas {
        progress_bar.inc(1);
        let area_assets = grouped
            .get(area.id.as_str())
            .map(Vec::as_slice)
            .unwrap_or_default();
        let record = handler.evaluate(area, area_assets)?;
        wtr.serialize(&record)
            .context(format!("failed to write record for area '{}'", area.id))?;
        summary.add(&record);
    }
    wtr.flush()?;
    progress_bar.finish_with_message(format!(
        "{step} Completed writing {} areas to '{}'",
        HumanCount(summary.areas()),
        out_path.display()
    ));
    Ok(summary)
}
