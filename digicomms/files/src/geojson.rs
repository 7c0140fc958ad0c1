use anyhow::{Context, Result};
use serde::Serialize;
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

pub type Coord = [f64; 2];

#[derive(Serialize, Debug, PartialEq, Clone)]
#[serde(tag = "type", content = "coordinates")]
pub enum Geometry {
    Point(Coord),
    LineString(Vec<Coord>),
}

impl Geometry {
    pub fn line(from: Coord, to: Coord) -> Self {
        Geometry::LineString(vec![from, to])
    }
}

#[derive(Serialize, Debug)]
pub struct Feature<P> {
    #[serde(rename = "type")]
    kind: &'static str,
    pub geometry: Geometry,
    pub properties: P,
}

impl<P: Serialize> Feature<P> {
    pub fn new(geometry: Geometry, properties: P) -> Self {
        Feature {
            kind: "Feature",
            geometry,
            properties,
        }
    }
}

#[derive(Serialize, Debug)]
struct CrsName {
    name: String,
}

/// Named crs member, e.g. `epsg:27700` becomes `urn:ogc:def:crs:EPSG::27700`
#[derive(Serialize, Debug)]
pub struct Crs {
    #[serde(rename = "type")]
    kind: &'static str,
    properties: CrsName,
}

impl Crs {
    pub fn named(crs: &str) -> Self {
        let name = match crs.split_once(':') {
            Some((authority, code)) => {
                format!("urn:ogc:def:crs:{}::{}", authority.to_uppercase(), code)
            }
            None => crs.to_string(),
        };
        Crs {
            kind: "name",
            properties: CrsName { name },
        }
    }
}

#[derive(Serialize, Debug)]
pub struct FeatureCollection<P> {
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    crs: Option<Crs>,
    pub features: Vec<Feature<P>>,
}

impl<P: Serialize> FeatureCollection<P> {
    pub fn new(crs: Option<&str>) -> Self {
        FeatureCollection {
            kind: "FeatureCollection",
            crs: crs.map(Crs::named),
            features: Vec::new(),
        }
    }

    pub fn push(&mut self, feature: Feature<P>) {
        self.features.push(feature)
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)
            .context(format!("unable to create geojson '{}'", path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, self)
            .context(format!("failed to serialise geojson '{}'", path.display()))?;
        writer.flush()?;
        Ok(())
    }
}
