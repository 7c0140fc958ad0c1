use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::{fs::File, path::Path};

use crate::{
    connect::{assign_tiers, connect},
    edge::{Edge, EdgeRecord},
    exchange::{determine_nodes, CoreLookup, Exchange},
    islands::{process_islands, IslandRecord},
    summary::NetworkSummary,
    FixedError,
};
use configuration::groups::CoreGroup;
use files::geojson::{Feature, FeatureCollection, Geometry};

/// Classified exchanges (mainland first, then islands) and the links between them.
#[derive(Debug)]
pub struct FixedNetwork {
    pub nodes: Vec<Exchange>,
    pub edges: Vec<Edge>,
}

#[derive(Serialize, Debug, PartialEq)]
pub struct NodeRecord<'a> {
    pub olo: &'a str,
    pub population: f64,
    pub inner: bool,
    pub outer: bool,
    pub metro: bool,
    pub tier_1: bool,
    pub msan: bool,
    pub lower: bool,
    pub island: Option<&'a str>,
}

impl<'a> From<&'a Exchange> for NodeRecord<'a> {
    fn from(exchange: &'a Exchange) -> Self {
        let tier = &exchange.tier;
        NodeRecord {
            olo: &exchange.olo,
            population: exchange.population,
            inner: tier.inner,
            outer: tier.outer,
            metro: tier.metro,
            tier_1: tier.tier_1,
            msan: tier.msan,
            lower: tier.lower,
            island: exchange.island.as_deref(),
        }
    }
}

impl FixedNetwork {
    pub fn build(
        exchanges: Vec<Exchange>,
        lookup: &[CoreLookup],
        islands: &[IslandRecord],
        config: &CoreGroup,
    ) -> Result<Self> {
        if exchanges.is_empty() {
            bail!(FixedError::NoExchanges)
        }
        let exchanges = determine_nodes(exchanges, lookup);
        let (mut mainland, island_exchanges, island_edges) =
            process_islands(exchanges, islands);
        assign_tiers(&mut mainland, config.tier_1_count);

        let mut edges = connect(&mainland, &island_exchanges, config);
        edges.extend(island_edges);

        mainland.extend(island_exchanges);
        Ok(FixedNetwork {
            nodes: mainland,
            edges: edges.into_vec(),
        })
    }

    pub fn summary(&self) -> NetworkSummary {
        let mut summary = NetworkSummary::new();
        self.nodes.iter().for_each(|node| summary.add_exchange(node));
        self.edges.iter().for_each(|edge| summary.add_edge(edge));
        summary
    }

    pub fn nodes_collection(&self, crs: Option<&str>) -> FeatureCollection<NodeRecord> {
        let mut collection = FeatureCollection::new(crs);
        for node in self.nodes.iter() {
            collection.push(Feature::new(Geometry::Point(node.coord()), node.into()));
        }
        collection
    }

    pub fn edges_collection(&self, crs: Option<&str>) -> FeatureCollection<EdgeRecord> {
        let mut collection = FeatureCollection::new(crs);
        for edge in self.edges.iter() {
            collection.push(edge.to_feature());
        }
        collection
    }

    /// Write `nodes.geojson`, `edges.geojson` and `edges.csv` into `outdir`.
    pub fn write(&self, outdir: &Path, crs: &str) -> Result<()> {
        self.nodes_collection(Some(crs))
            .write(outdir.join("nodes.geojson"))?;
        self.edges_collection(Some(crs))
            .write(outdir.join("edges.geojson"))?;

        let edges_path = outdir.join("edges.csv");
        let edges_file = File::create(&edges_path).context(format!(
            "unable to create out file '{}'",
            edges_path.display()
        ))?;
        let mut edges_wtr = csv::Writer::from_writer(edges_file);
        for edge in self.edges.iter() {
            edges_wtr.serialize(edge.to_record()).context(format!(
                "failed to write edge '{}' - '{}'",
                edge.source, edge.sink
            ))?;
        }
        edges_wtr.flush()?;
        Ok(())
    }
}
