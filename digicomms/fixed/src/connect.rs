use itertools::Itertools;

use crate::{
    edge::{Edge, Edges, Level},
    exchange::Exchange,
    islands::group_islands,
    spatial::SpatialIndex,
};
use configuration::groups::CoreGroup;

/// Promote the `tier_1_count` most populous lower exchanges to tier 1, all other lower
/// exchanges become MSANs. Ties in population are ranked by OLO code.
pub fn assign_tiers(exchanges: &mut [Exchange], tier_1_count: usize) {
    let mut ranked: Vec<&mut Exchange> = exchanges
        .iter_mut()
        .filter(|exchange| exchange.tier.lower)
        .collect();
    ranked.sort_by(|a, b| {
        b.population
            .total_cmp(&a.population)
            .then_with(|| a.olo.cmp(&b.olo))
    });
    for (rank, exchange) in ranked.into_iter().enumerate() {
        exchange.tier.tier_1 = rank < tier_1_count;
        exchange.tier.msan = rank >= tier_1_count;
    }
}

fn select(exchanges: &[Exchange], predicate: impl Fn(&Exchange) -> bool) -> Vec<&Exchange> {
    exchanges
        .iter()
        .filter(|exchange| predicate(*exchange))
        .collect()
}

/// Link each exchange in `sources` to its `k` nearest exchanges in `targets`.
fn link_nearest(
    edges: &mut Edges,
    sources: &[&Exchange],
    targets: &SpatialIndex,
    k: usize,
    level: Level,
) {
    if sources.is_empty() {
        return;
    }
    if targets.is_empty() {
        tracing::warn!(
            "no target exchanges for {} {} exchanges, skipping",
            sources.len(),
            level
        );
        return;
    }
    for source in sources {
        for target in targets.nearest(source, k) {
            edges.insert(Edge::new(source, target, level));
        }
    }
}

/// Build the hierarchical network over classified mainland exchanges and join each
/// island to the mainland.
///
/// Inner core exchanges are fully meshed and every core exchange links to its nearest
/// core exchanges. Metro exchanges link up to core, tier 1 to metro and MSANs to tier 1.
pub fn connect(exchanges: &[Exchange], islands: &[Exchange], config: &CoreGroup) -> Edges {
    let inner = select(exchanges, |e| e.tier.inner);
    let core = select(exchanges, |e| e.tier.is_core());
    let metro = select(exchanges, |e| e.tier.metro);
    let tier_1 = select(exchanges, |e| e.tier.tier_1);
    let msan = select(exchanges, |e| e.tier.msan);

    tracing::info!(
        "connecting {} inner, {} core, {} metro, {} tier 1 and {} MSAN exchanges",
        inner.len(),
        core.len(),
        metro.len(),
        tier_1.len(),
        msan.len()
    );

    let core_index = SpatialIndex::new(core.clone());
    let metro_index = SpatialIndex::new(metro.clone());
    let tier_1_index = SpatialIndex::new(tier_1.clone());

    let mut edges = Edges::new();

    for (a, b) in inner.iter().tuple_combinations() {
        edges.insert(Edge::new(a, b, Level::Core));
    }
    link_nearest(
        &mut edges,
        &core,
        &core_index,
        config.core_neighbours,
        Level::Core,
    );
    link_nearest(
        &mut edges,
        &metro,
        &core_index,
        config.metro_neighbours,
        Level::Metro,
    );
    link_nearest(
        &mut edges,
        &tier_1,
        &metro_index,
        config.tier_1_neighbours,
        Level::Tier1,
    );
    link_nearest(
        &mut edges,
        &msan,
        &tier_1_index,
        config.msan_neighbours,
        Level::Msan,
    );

    edges.extend(connect_islands(islands, &tier_1_index));
    edges
}

/// One link per island: from the island exchange closest to any tier 1 exchange, to
/// that tier 1 exchange.
pub fn connect_islands(islands: &[Exchange], tier_1: &SpatialIndex) -> Vec<Edge> {
    let groups = group_islands(islands);
    if !groups.is_empty() && tier_1.is_empty() {
        tracing::warn!(
            "no tier 1 exchanges, {} islands left unconnected",
            groups.len()
        );
        return Vec::new();
    }
    groups
        .values()
        .filter_map(|members| {
            members
                .iter()
                .filter_map(|exchange| {
                    tier_1
                        .nearest_one(exchange)
                        .map(|(mainland, length)| (*exchange, mainland, length))
                })
                .min_by(|a, b| a.2.total_cmp(&b.2).then_with(|| a.0.olo.cmp(&b.0.olo)))
                .map(|(island, mainland, _)| Edge::new(island, mainland, Level::Island))
        })
        .collect()
}
