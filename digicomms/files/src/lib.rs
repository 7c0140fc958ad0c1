pub mod geojson;

use anyhow::{Context, Result};
use flate2::bufread::GzDecoder;
use serde::de::DeserializeOwned;
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};
use thiserror::Error;

pub use geojson::{Feature, FeatureCollection, Geometry};

#[derive(Error, Debug, PartialEq)]
pub enum FilesError {
    #[error("'{0}' has no file extension, expecting 'csv' or 'gz'")]
    NoFileExtension(PathBuf),

    #[error("unsupported file extension '{0}', expecting 'csv' or 'gz'")]
    UnknownFileExtension(String),
}

/// Open a csv input, transparently decompressing `.gz` files.
pub fn reader(path: impl AsRef<Path>) -> Result<Box<dyn BufRead>> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .map(|extension| extension.to_string_lossy().to_lowercase())
        .ok_or_else(|| FilesError::NoFileExtension(path.to_path_buf()))?;
    let file = File::open(path).context(format!("unable to open input '{}'", path.display()))?;
    let buffered = BufReader::new(file);

    match extension.as_str() {
        "csv" => Ok(Box::new(buffered)),
        "gz" => Ok(Box::new(BufReader::new(GzDecoder::new(buffered)))),
        _ => Err(FilesError::UnknownFileExtension(extension))
            .context(format!("cannot read '{}'", path.display())),
    }
}

/// Deserialise every row of a csv file (with headers) into `T`.
pub fn read_records<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<Vec<T>> {
    let path = path.as_ref();
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader(path)?);
    csv_reader
        .deserialize()
        .enumerate()
        .map(|(i, record)| {
            record.context(format!(
                "failed to read record {} from '{}'",
                i + 1,
                path.display()
            ))
        })
        .collect()
}
