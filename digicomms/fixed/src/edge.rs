use serde::Serialize;
use std::{collections::HashSet, fmt};

use crate::exchange::Exchange;
use files::geojson::{Coord, Feature, Geometry};

/// Network layer an edge belongs to
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Core,
    Metro,
    #[serde(rename = "tier_1")]
    Tier1,
    Msan,
    /// Link joining an island cluster to the mainland
    Island,
    /// Spanning tree link between exchanges of the same island
    IslandLocal,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Level::Core => "core",
            Level::Metro => "metro",
            Level::Tier1 => "tier_1",
            Level::Msan => "msan",
            Level::Island => "island",
            Level::IslandLocal => "island_local",
        };
        write!(f, "{}", s)
    }
}

/// A link between two exchanges. Population and tier flags are those of the source.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub source: String,
    pub sink: String,
    pub level: Level,
    pub population: f64,
    pub inner: bool,
    pub outer: bool,
    pub metro: bool,
    pub tier_1: bool,
    pub msan: bool,
    pub length: f64,
    pub from: Coord,
    pub to: Coord,
}

impl Edge {
    pub fn new(source: &Exchange, sink: &Exchange, level: Level) -> Self {
        Edge {
            source: source.olo.clone(),
            sink: sink.olo.clone(),
            level,
            population: source.population,
            inner: source.tier.inner,
            outer: source.tier.outer,
            metro: source.tier.metro,
            tier_1: source.tier.tier_1,
            msan: source.tier.msan,
            length: source.distance(sink),
            from: source.coord(),
            to: sink.coord(),
        }
    }

    pub fn to_record(&self) -> EdgeRecord {
        EdgeRecord {
            source: &self.source,
            sink: &self.sink,
            level: self.level,
            population: self.population,
            inner: self.inner,
            outer: self.outer,
            metro: self.metro,
            tier_1: self.tier_1,
            msan: self.msan,
            length: self.length,
        }
    }

    pub fn to_feature(&self) -> Feature<EdgeRecord> {
        Feature::new(Geometry::line(self.from, self.to), self.to_record())
    }

    /// Undirected identity of the edge within its level
    fn key(&self) -> (Level, String, String) {
        if self.source <= self.sink {
            (self.level, self.source.clone(), self.sink.clone())
        } else {
            (self.level, self.sink.clone(), self.source.clone())
        }
    }
}

/// Serialisable edge, shared by the csv and geojson outputs
#[derive(Serialize, Debug, PartialEq)]
pub struct EdgeRecord<'a> {
    pub source: &'a str,
    pub sink: &'a str,
    pub level: Level,
    pub population: f64,
    pub inner: bool,
    pub outer: bool,
    pub metro: bool,
    pub tier_1: bool,
    pub msan: bool,
    #[serde(rename = "length_(m)")]
    pub length: f64,
}

/// Edges in insertion order, holding each undirected link at most once per level.
#[derive(Debug, Default)]
pub struct Edges {
    edges: Vec<Edge>,
    seen: HashSet<(Level, String, String)>,
}

impl Edges {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an edge, returning false for self links and links already present.
    pub fn insert(&mut self, edge: Edge) -> bool {
        if edge.source == edge.sink || !self.seen.insert(edge.key()) {
            return false;
        }
        self.edges.push(edge);
        true
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Edge> {
        self.edges.iter()
    }

    pub fn into_vec(self) -> Vec<Edge> {
        self.edges
    }
}

impl Extend<Edge> for Edges {
    fn extend<T: IntoIterator<Item = Edge>>(&mut self, iter: T) {
        for edge in iter {
            self.insert(edge);
        }
    }
}
