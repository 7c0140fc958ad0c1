use anyhow::Result;
use serde::Deserialize;
use std::{
    collections::{BTreeMap, BTreeSet, HashMap},
    path::Path,
};

use crate::{edge::Edge, exchange::Exchange, mst::design_network};

/// Assignment of an exchange to an island cluster
#[derive(Deserialize, Debug, PartialEq, Clone)]
pub struct IslandRecord {
    pub olo: String,
    pub island: String,
}

pub fn import_islands(path: impl AsRef<Path>) -> Result<Vec<IslandRecord>> {
    files::read_records(path)
}

/// Island exchanges grouped by island name
pub fn group_islands(exchanges: &[Exchange]) -> BTreeMap<&str, Vec<&Exchange>> {
    let mut groups = BTreeMap::<&str, Vec<&Exchange>>::new();
    for exchange in exchanges {
        if let Some(island) = exchange.island.as_deref() {
            groups.entry(island).or_default().push(exchange);
        }
    }
    groups
}

/// Split island exchanges from the mainland and link each island internally with a
/// minimum spanning tree.
///
/// Returns `(mainland, island exchanges, island edges)`.
pub fn process_islands(
    exchanges: Vec<Exchange>,
    islands: &[IslandRecord],
) -> (Vec<Exchange>, Vec<Exchange>, Vec<Edge>) {
    let lookup: HashMap<&str, &str> = islands
        .iter()
        .map(|record| (record.olo.as_str(), record.island.as_str()))
        .collect();

    let (mut island_exchanges, mainland): (Vec<Exchange>, Vec<Exchange>) = exchanges
        .into_iter()
        .partition(|exchange| lookup.contains_key(exchange.olo.as_str()));
    for exchange in island_exchanges.iter_mut() {
        exchange.island = lookup
            .get(exchange.olo.as_str())
            .map(|island| island.to_string());
    }

    let groups = group_islands(&island_exchanges);
    let mut edges = Vec::new();
    for (island, members) in groups.iter() {
        let links = design_network(members);
        tracing::debug!(
            "island '{}': {} exchanges, {} links",
            island,
            members.len(),
            links.len()
        );
        edges.extend(links);
    }

    let named: BTreeSet<&str> =
        islands.iter().map(|record| record.island.as_str()).collect();
    for island in named.iter().filter(|island| !groups.contains_key(*island)) {
        tracing::warn!("island '{}' has no matching exchanges", island);
    }

    (mainland, island_exchanges, edges)
}
