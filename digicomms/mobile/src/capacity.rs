use anyhow::{bail, Context, Result};
use itertools::Itertools;
use serde::Deserialize;
use std::{
    collections::{HashMap, HashSet},
    fmt,
    path::Path,
    str::FromStr,
};

use crate::{assets::Asset, MobileError};
use configuration::groups::CapacityGroup;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Generation {
    G2,
    G3,
    G4,
    G5,
}

impl Generation {
    /// Bands auctioned for 5G, everything else is assumed to carry 4G.
    pub fn for_frequency(frequency: u32) -> Self {
        match frequency {
            700 | 3500 | 3700 | 26000 => Generation::G5,
            _ => Generation::G4,
        }
    }
}

impl FromStr for Generation {
    type Err = MobileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "2G" => Ok(Generation::G2),
            "3G" => Ok(Generation::G3),
            "4G" => Ok(Generation::G4),
            "5G" => Ok(Generation::G5),
            _ => Err(MobileError::UnknownGeneration(s.to_string())),
        }
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Generation::G2 => "2G",
            Generation::G3 => "3G",
            Generation::G4 => "4G",
            Generation::G5 => "5G",
        };
        write!(f, "{}", s)
    }
}

/// Lookup table key, frequency and bandwidth in MHz
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LookupKey {
    pub environment: String,
    pub cell_type: String,
    pub frequency: u32,
    pub bandwidth: u32,
    pub generation: Generation,
}

impl LookupKey {
    pub fn new(
        environment: &str,
        cell_type: &str,
        frequency: u32,
        bandwidth: u32,
        generation: Generation,
    ) -> Self {
        LookupKey {
            environment: environment.to_lowercase(),
            cell_type: cell_type.to_string(),
            frequency,
            bandwidth,
            generation,
        }
    }
}

impl fmt::Display for LookupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {} MHz, {} MHz, {})",
            self.environment, self.cell_type, self.frequency, self.bandwidth, self.generation
        )
    }
}

#[derive(Deserialize, Debug)]
struct LookupRow {
    environment: String,
    ant_type: String,
    #[serde(rename = "frequency_GHz")]
    frequency_ghz: f64,
    #[serde(rename = "bandwidth_MHz")]
    bandwidth_mhz: f64,
    generation: String,
    sites_per_km2: f64,
    capacity_mbps_km2: f64,
}

/// Capacity (Mbps/km²) by site density (sites/km²), simulated per environment, cell type,
/// frequency, bandwidth and generation. Each curve is sorted by ascending density.
#[derive(Debug, Default, PartialEq)]
pub struct CapacityLookupTable {
    curves: HashMap<LookupKey, Vec<(f64, f64)>>,
}

impl CapacityLookupTable {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let rows: Vec<LookupRow> = files::read_records(path)?;
        let mut table = CapacityLookupTable::default();
        for row in rows {
            // zero capacity points carry no information for interpolation
            if row.capacity_mbps_km2 <= 0.0 {
                continue;
            }
            let generation: Generation = row
                .generation
                .parse()
                .context(format!("invalid lookup table '{}'", path.display()))?;
            let key = LookupKey::new(
                &row.environment,
                &row.ant_type,
                (row.frequency_ghz * 1e3).round() as u32,
                row.bandwidth_mhz.round() as u32,
                generation,
            );
            table.insert(key, row.sites_per_km2, row.capacity_mbps_km2);
        }
        table.sort();
        if table.is_empty() {
            tracing::warn!("no usable capacity curves in '{}'", path.display());
        }
        tracing::debug!(
            "loaded {} capacity curves from '{}'",
            table.len(),
            path.display()
        );
        Ok(table)
    }

    pub fn insert(&mut self, key: LookupKey, density: f64, capacity: f64) {
        self.curves
            .entry(key)
            .or_insert_with(Vec::new)
            .push((density, capacity));
    }

    pub fn sort(&mut self) {
        for curve in self.curves.values_mut() {
            curve.sort_by(|a, b| a.0.total_cmp(&b.0));
        }
    }

    pub fn len(&self) -> usize {
        self.curves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    /// Capacity for a given site density.
    ///
    /// Below the lowest tabulated density there is no capacity, between two points the
    /// capacity is linearly interpolated and beyond the curve the highest capacity is used.
    pub fn lookup_capacity(&self, key: &LookupKey, site_density: f64) -> Result<f64> {
        let curve = match self.curves.get(key) {
            Some(curve) if !curve.is_empty() => curve,
            _ => bail!(MobileError::MissingCombination(key.clone())),
        };

        let (lowest_density, _) = curve[0];
        if site_density < lowest_density {
            return Ok(0.0);
        }

        for ((lower_density, lower_capacity), (upper_density, upper_capacity)) in
            curve.iter().tuple_windows()
        {
            if *lower_density <= site_density && site_density < *upper_density {
                return Ok(interpolate(
                    *lower_density,
                    *lower_capacity,
                    *upper_density,
                    *upper_capacity,
                    site_density,
                ));
            }
        }

        let (_, highest_capacity) = curve[curve.len() - 1];
        Ok(highest_capacity)
    }
}

/// Linear interpolation between two values.
pub fn interpolate(x0: f64, y0: f64, x1: f64, y1: f64, x: f64) -> f64 {
    (y0 * (x1 - x) + y1 * (x - x0)) / (x1 - x0)
}

pub fn find_frequency_bandwidth(frequency: u32, config: &CapacityGroup) -> Result<u32> {
    match config.bandwidth(frequency) {
        Some(bandwidth) => Ok(bandwidth),
        None => bail!(MobileError::MissingBandwidth(frequency)),
    }
}

/// Radio access network capacity (Mbps/km²) of an area given its assets and the
/// configured frequency bands.
pub fn estimate_area_capacity(
    assets: &[&Asset],
    area: f64,
    environment: &str,
    table: &CapacityLookupTable,
    config: &CapacityGroup,
) -> Result<f64> {
    if !(area.is_finite() && area > 0.0) {
        bail!(MobileError::InvalidArea(area))
    }
    let mut capacity = 0.0;

    for frequency in config.frequencies.iter() {
        let unique_sites: HashSet<&str> = assets
            .iter()
            .filter(|asset| asset.frequency.contains(frequency))
            .map(|asset| asset.site_ngr.as_str())
            .collect();

        let site_density = unique_sites.len() as f64 / area;
        if site_density <= 0.0 {
            continue;
        }

        let bandwidth = find_frequency_bandwidth(*frequency, config)?;
        let key = LookupKey::new(
            environment,
            &config.cell_type,
            *frequency,
            bandwidth,
            Generation::for_frequency(*frequency),
        );
        capacity += table.lookup_capacity(&key, site_density)?;
    }

    Ok(capacity)
}
