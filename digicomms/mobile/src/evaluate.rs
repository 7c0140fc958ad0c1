use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::HashSet;

use crate::{
    assets::{Area, Asset},
    capacity::{estimate_area_capacity, CapacityLookupTable},
    demand::{calculate_user_demand, total_demand},
};
use configuration::config::Config;

/// Per area output record
#[derive(Serialize, Debug, PartialEq)]
pub struct AreaEvaluation<'a> {
    pub id: &'a str,
    pub environment: &'a str,
    pub population: f64,
    #[serde(rename = "area_(km2)")]
    pub area_km2: f64,
    pub sites: usize,
    #[serde(rename = "demand_(Mbps/km2)")]
    pub demand: Option<f64>,
    #[serde(rename = "capacity_(Mbps/km2)")]
    pub capacity: Option<f64>,
    #[serde(rename = "margin_(Mbps/km2)")]
    pub margin: Option<f64>,
}

/// Evaluates areas for demand, capacity or both.
pub struct EvaluateHandler<'a> {
    config: &'a Config,
    user_demand: Option<f64>,
    table: Option<&'a CapacityLookupTable>,
}

impl<'a> EvaluateHandler<'a> {
    pub fn new(config: &'a Config) -> Self {
        EvaluateHandler {
            config,
            user_demand: None,
            table: None,
        }
    }

    pub fn with_demand(mut self) -> Self {
        self.user_demand = Some(calculate_user_demand(&self.config.demand));
        self
    }

    pub fn with_capacity(mut self, table: &'a CapacityLookupTable) -> Self {
        self.table = Some(table);
        self
    }

    pub fn evaluate<'b>(&self, area: &'b Area, assets: &[&Asset]) -> Result<AreaEvaluation<'b>> {
        let sites = assets
            .iter()
            .map(|asset| asset.site_ngr.as_str())
            .collect::<HashSet<_>>()
            .len();

        let demand = self
            .user_demand
            .map(|user_demand| {
                total_demand(
                    user_demand,
                    area.population,
                    area.area_km2,
                    &self.config.demand,
                )
            })
            .transpose()
            .context(format!("failed to estimate demand for area '{}'", area.id))?;

        let capacity = self
            .table
            .map(|table| {
                estimate_area_capacity(
                    assets,
                    area.area_km2,
                    &area.environment,
                    table,
                    &self.config.capacity,
                )
            })
            .transpose()
            .context(format!("failed to estimate capacity for area '{}'", area.id))?;

        let margin = match (demand, capacity) {
            (Some(demand), Some(capacity)) => Some(capacity - demand),
            _ => None,
        };

        Ok(AreaEvaluation {
            id: &area.id,
            environment: &area.environment,
            population: area.population,
            area_km2: area.area_km2,
            sites,
            demand,
            capacity,
            margin,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capacity::{Generation, LookupKey};

    fn area() -> Area {
        Area {
            id: "CB1".to_string(),
            area_km2: 2.0,
            population: 1000.0,
            environment: "urban".to_string(),
        }
    }

    fn asset(site: &str) -> Asset {
        Asset {
            site_ngr: site.to_string(),
            area_id: "CB1".to_string(),
            frequency: vec![800],
            technology: None,
            kind: None,
            bandwidth: None,
            build_date: None,
        }
    }

    fn table() -> CapacityLookupTable {
        let mut table = CapacityLookupTable::default();
        let key = LookupKey::new("urban", "macro", 800, 10, Generation::G4);
        table.insert(key.clone(), 0.5, 50.0);
        table.insert(key, 2.0, 200.0);
        table.sort();
        table
    }

    #[test]
    fn test_evaluate_demand_only() {
        let config = Config::default();
        let handler = EvaluateHandler::new(&config).with_demand();
        let area = area();
        let record = handler.evaluate(&area, &[]).unwrap();
        let expected = 1000.0 * 0.8 * 0.25 * calculate_user_demand(&config.demand) / 2.0;
        assert!((record.demand.unwrap() - expected).abs() < 1e-9);
        assert_eq!(record.capacity, None);
        assert_eq!(record.margin, None);
        assert_eq!(record.sites, 0);
    }

    #[test]
    fn test_evaluate_capacity_only() {
        let config = Config::default();
        let table = table();
        let handler = EvaluateHandler::new(&config).with_capacity(&table);
        let area = area();
        let (a, b, a_again) = (asset("A"), asset("B"), asset("A"));
        let record = handler.evaluate(&area, &[&a, &b, &a_again]).unwrap();
        assert_eq!(record.sites, 2);
        assert_eq!(record.demand, None);
        // 1 site/km² interpolated between 0.5 and 2.0
        assert!((record.capacity.unwrap() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_evaluate_margin() {
        let config = Config::default();
        let table = table();
        let handler = EvaluateHandler::new(&config)
            .with_demand()
            .with_capacity(&table);
        let area = area();
        let (a, b) = (asset("A"), asset("B"));
        let record = handler.evaluate(&area, &[&a, &b]).unwrap();
        let margin = record.capacity.unwrap() - record.demand.unwrap();
        assert_eq!(record.margin, Some(margin));
    }

    #[test]
    fn test_evaluate_invalid_area() {
        let config = Config::default();
        let handler = EvaluateHandler::new(&config).with_demand();
        let area = Area {
            area_km2: 0.0,
            ..area()
        };
        let err = handler.evaluate(&area, &[]).unwrap_err();
        assert!(format!("{:#}", err).contains("CB1"));
    }

    #[test]
    fn test_evaluate_nan_area_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("areas.csv");
        std::fs::write(&path, "id,area_km2,population,environment\nA,NaN,100,urban\n").unwrap();
        let areas = crate::assets::load_areas(&path).unwrap();

        let config = Config::default();
        let table = table();
        let handler = EvaluateHandler::new(&config)
            .with_demand()
            .with_capacity(&table);
        let err = handler.evaluate(&areas[0], &[]).unwrap_err();
        assert!(format!("{:#}", err).contains("area must be positive"));
    }
}
