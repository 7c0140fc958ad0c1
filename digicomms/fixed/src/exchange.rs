use anyhow::{bail, Result};
use serde::{de, Deserialize, Deserializer};
use std::{collections::HashSet, path::Path};

use crate::FixedError;
use configuration::groups::CoreGroup;
use files::geojson::Coord;

/// Position of an exchange in the network hierarchy. Core exchanges are `inner` and/or
/// `outer`, everything else is `lower` and ends up either `tier_1` or `msan`. Metro
/// exchanges are both part of the metro layer and `lower`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Tier {
    pub inner: bool,
    pub outer: bool,
    pub metro: bool,
    pub tier_1: bool,
    pub msan: bool,
    pub lower: bool,
}

impl Tier {
    pub fn is_core(&self) -> bool {
        self.inner || self.outer
    }
}

/// A telephone exchange, identified by its OLO code
#[derive(Debug, Clone, PartialEq)]
pub struct Exchange {
    pub olo: String,
    pub x: f64,
    pub y: f64,
    pub population: f64,
    pub tier: Tier,
    pub island: Option<String>,
}

impl Exchange {
    pub fn new(olo: &str, x: f64, y: f64, population: f64) -> Self {
        Exchange {
            olo: olo.to_string(),
            x,
            y,
            population,
            tier: Tier::default(),
            island: None,
        }
    }

    pub fn coord(&self) -> Coord {
        [self.x, self.y]
    }

    pub fn distance(&self, other: &Exchange) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[derive(Deserialize, Debug)]
struct ExchangeRecord {
    olo: Option<String>,
    x: f64,
    y: f64,
    population: f64,
}

/// Load exchanges, skipping records without an OLO code.
pub fn load_exchanges(path: impl AsRef<Path>) -> Result<Vec<Exchange>> {
    let records: Vec<ExchangeRecord> = files::read_records(path)?;
    let mut seen = HashSet::new();
    let mut exchanges = Vec::with_capacity(records.len());
    let mut skipped = 0;
    for record in records {
        let olo = match record.olo {
            Some(olo) if !olo.is_empty() => olo,
            _ => {
                skipped += 1;
                continue;
            }
        };
        if !seen.insert(olo.clone()) {
            bail!(FixedError::DuplicateExchange(olo))
        }
        exchanges.push(Exchange::new(&olo, record.x, record.y, record.population));
    }
    if skipped > 0 {
        tracing::warn!("skipped {} exchanges without an OLO code", skipped);
    }
    Ok(exchanges)
}

/// Row of the core node lookup, marking which exchanges host inner core, outer core
/// and metro nodes.
#[derive(Deserialize, Debug, PartialEq, Clone)]
pub struct CoreLookup {
    pub node: String,
    pub area: String,
    pub olo: String,
    #[serde(deserialize_with = "deserialize_flag")]
    pub inner: bool,
    #[serde(deserialize_with = "deserialize_flag")]
    pub outer: bool,
    #[serde(deserialize_with = "deserialize_flag")]
    pub metro: bool,
}

/// Load the core lookup, dropping rows from excluded areas.
pub fn read_lookup(path: impl AsRef<Path>, config: &CoreGroup) -> Result<Vec<CoreLookup>> {
    let rows: Vec<CoreLookup> = files::read_records(path)?;
    Ok(rows
        .into_iter()
        .filter(|row| !config.is_excluded(&row.area))
        .collect())
}

fn parse_flag(s: &str) -> Result<bool, FixedError> {
    match s.trim() {
        "1" | "1.0" | "true" | "True" => Ok(true),
        "0" | "0.0" | "" | "false" | "False" => Ok(false),
        other => Err(FixedError::InvalidFlag(other.to_string())),
    }
}

fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_flag(&s).map_err(de::Error::custom)
}

/// Flag inner core, outer core and metro exchanges from the lookup.
pub fn determine_nodes(mut exchanges: Vec<Exchange>, lookup: &[CoreLookup]) -> Vec<Exchange> {
    let inner = members(lookup, |row| row.inner);
    let outer = members(lookup, |row| row.outer);
    let metro = members(lookup, |row| row.metro);

    for exchange in exchanges.iter_mut() {
        let olo = exchange.olo.as_str();
        let tier = &mut exchange.tier;
        tier.inner = inner.contains(olo);
        tier.outer = outer.contains(olo);
        tier.metro = metro.contains(olo);
        tier.lower = tier.metro || !tier.is_core();
    }
    exchanges
}

fn members(lookup: &[CoreLookup], select: fn(&CoreLookup) -> bool) -> HashSet<&str> {
    lookup
        .iter()
        .filter(|row| select(row))
        .map(|row| row.olo.as_str())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(olo: &str, area: &str, inner: bool, outer: bool, metro: bool) -> CoreLookup {
        CoreLookup {
            node: format!("node-{olo}"),
            area: area.to_string(),
            olo: olo.to_string(),
            inner,
            outer,
            metro,
        }
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("1"), Ok(true));
        assert_eq!(parse_flag(" 0 "), Ok(false));
        assert_eq!(parse_flag(""), Ok(false));
        assert_eq!(parse_flag("2"), Err(FixedError::InvalidFlag("2".to_string())));
    }

    #[test]
    fn test_distance() {
        let a = Exchange::new("A", 0.0, 0.0, 0.0);
        let b = Exchange::new("B", 3.0, 4.0, 0.0);
        assert_eq!(a.distance(&b), 5.0);
        assert_eq!(b.coord(), [3.0, 4.0]);
    }

    #[test]
    fn test_determine_nodes() {
        let exchanges = vec![
            Exchange::new("INNER", 0.0, 0.0, 10.0),
            Exchange::new("OUTER", 1.0, 0.0, 10.0),
            Exchange::new("METRO", 2.0, 0.0, 10.0),
            Exchange::new("CORE_METRO", 3.0, 0.0, 10.0),
            Exchange::new("LOCAL", 4.0, 0.0, 10.0),
        ];
        let lookup = vec![
            lookup("INNER", "London", true, true, false),
            lookup("OUTER", "Leeds", false, true, false),
            lookup("METRO", "York", false, false, true),
            lookup("CORE_METRO", "Bristol", false, true, true),
        ];
        let nodes = determine_nodes(exchanges, &lookup);
        let tiers: Vec<Tier> = nodes.iter().map(|n| n.tier).collect();
        assert_eq!(
            tiers[0],
            Tier {
                inner: true,
                outer: true,
                ..Tier::default()
            }
        );
        assert_eq!(
            tiers[1],
            Tier {
                outer: true,
                ..Tier::default()
            }
        );
        assert_eq!(
            tiers[2],
            Tier {
                metro: true,
                lower: true,
                ..Tier::default()
            }
        );
        assert_eq!(
            tiers[3],
            Tier {
                outer: true,
                metro: true,
                lower: true,
                ..Tier::default()
            }
        );
        assert_eq!(
            tiers[4],
            Tier {
                lower: true,
                ..Tier::default()
            }
        );
    }

    #[test]
    fn test_load_exchanges_skips_missing_olo() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("exchanges.csv");
        std::fs::write(&path, "olo,x,y,population\nA,1,2,300\n,5,5,10\nB,3,4,100\n").unwrap();
        let exchanges = load_exchanges(&path).unwrap();
        assert_eq!(
            exchanges,
            vec![
                Exchange::new("A", 1.0, 2.0, 300.0),
                Exchange::new("B", 3.0, 4.0, 100.0)
            ]
        );
    }

    #[test]
    fn test_load_exchanges_rejects_duplicates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("exchanges.csv");
        std::fs::write(&path, "olo,x,y,population\nA,1,2,300\nA,3,4,100\n").unwrap();
        let err = load_exchanges(&path).unwrap_err();
        assert_eq!(
            err.downcast_ref::<FixedError>(),
            Some(&FixedError::DuplicateExchange("A".to_string()))
        );
    }

    #[test]
    fn test_read_lookup_excludes_areas() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("core_lookup.csv");
        std::fs::write(
            &path,
            "node,area,olo,inner,outer,metro
L1,London,A,1,1,0
B1,Belfast,B,0,1,0
Y1,York,C,0,0,1
",
        )
        .unwrap();
        let rows = read_lookup(&path, &CoreGroup::default()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].node, "L1");
        assert!(rows[0].inner && rows[0].outer && !rows[0].metro);
        assert_eq!(rows[1].olo, "C");
        assert!(rows[1].metro);
    }
}
