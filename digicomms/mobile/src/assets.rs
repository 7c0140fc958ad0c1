use anyhow::Result;
use serde::{de, Deserialize, Deserializer};
use std::{
    collections::{BTreeMap, HashSet},
    path::Path,
};

/// Statistical area, e.g. a postcode sector or local authority district
#[derive(Deserialize, Debug, PartialEq, Clone)]
pub struct Area {
    pub id: String,
    pub area_km2: f64,
    pub population: f64,
    pub environment: String,
}

/// A mobile site record. Sites deploying several bands may appear once per band or
/// once with all bands listed.
#[derive(Deserialize, Debug, PartialEq, Clone)]
pub struct Asset {
    pub site_ngr: String,
    pub area_id: String,
    /// Deployed bands in MHz, listed as `800;2600`
    #[serde(deserialize_with = "deserialize_frequencies")]
    pub frequency: Vec<u32>,
    pub technology: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub bandwidth: Option<String>,
    pub build_date: Option<u32>,
}

pub fn load_areas(path: impl AsRef<Path>) -> Result<Vec<Area>> {
    files::read_records(path)
}

pub fn load_assets(path: impl AsRef<Path>) -> Result<Vec<Asset>> {
    files::read_records(path)
}

/// Index assets by the area they sit in.
pub fn group_assets(assets: &[Asset]) -> BTreeMap<&str, Vec<&Asset>> {
    let mut groups = BTreeMap::<&str, Vec<&Asset>>::new();
    for asset in assets {
        groups.entry(asset.area_id.as_str()).or_default().push(asset);
    }
    groups
}

/// Count the grouped assets whose area id matches none of `areas`.
pub fn unmatched_assets(groups: &BTreeMap<&str, Vec<&Asset>>, areas: &[Area]) -> usize {
    let ids: HashSet<&str> = areas.iter().map(|area| area.id.as_str()).collect();
    groups
        .iter()
        .filter(|(id, _)| !ids.contains(*id))
        .map(|(_, assets)| assets.len())
        .sum()
}

fn parse_frequencies(s: &str) -> Result<Vec<u32>, std::num::ParseIntError> {
    s.split(';')
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(str::parse::<u32>)
        .collect()
}

fn deserialize_frequencies<'de, D>(deserializer: D) -> Result<Vec<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_frequencies(&s).map_err(|e| de::Error::custom(format!("invalid frequency '{s}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_frequencies() {
        assert_eq!(parse_frequencies("800;2600").unwrap(), vec![800, 2600]);
        assert_eq!(parse_frequencies(" 800 ; ").unwrap(), vec![800]);
        assert_eq!(parse_frequencies("").unwrap(), Vec::<u32>::new());
        assert!(parse_frequencies("800;2.6GHz").is_err());
    }

    #[test]
    fn test_load_and_group_assets() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("assets.csv");
        std::fs::write(
            &path,
            "site_ngr,area_id,frequency,technology,type,bandwidth,build_date
A,CB1,800;2600,4G,macrocell_site,2x10MHz,2018
B,CB1,800,4G,macrocell_site,2x10MHz,
C,CB2,3500,5G,,,
",
        )
        .unwrap();
        let assets = load_assets(&path).unwrap();
        assert_eq!(assets.len(), 3);
        assert_eq!(assets[0].frequency, vec![800, 2600]);
        assert_eq!(assets[0].kind, Some("macrocell_site".to_string()));
        assert_eq!(assets[1].build_date, None);
        assert_eq!(assets[2].kind, None);

        let groups = group_assets(&assets);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups["CB1"].len(), 2);
        assert_eq!(groups["CB2"][0].site_ngr, "C");
    }

    #[test]
    fn test_unmatched_assets() {
        let asset = |site: &str, area: &str| Asset {
            site_ngr: site.to_string(),
            area_id: area.to_string(),
            frequency: vec![800],
            technology: None,
            kind: None,
            bandwidth: None,
            build_date: None,
        };
        let assets = vec![asset("A", "CB1"), asset("B", "XX9"), asset("C", "XX9")];
        let areas = vec![Area {
            id: "CB1".to_string(),
            area_km2: 10.0,
            population: 1000.0,
            environment: "urban".to_string(),
        }];
        let groups = group_assets(&assets);
        assert_eq!(unmatched_assets(&groups, &areas), 2);
        assert_eq!(unmatched_assets(&groups, &[]), 3);
    }

    #[test]
    fn test_load_areas() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("areas.csv");
        std::fs::write(
            &path,
            "id,area_km2,population,environment\nCB1,10,1000,urban\n",
        )
        .unwrap();
        let areas = load_areas(&path).unwrap();
        assert_eq!(
            areas,
            vec![Area {
                id: "CB1".to_string(),
                area_km2: 10.0,
                population: 1000.0,
                environment: "urban".to_string(),
            }]
        );
    }
}
