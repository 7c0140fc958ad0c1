use crate::exchange::Exchange;

/// Brute force nearest neighbour index over a set of exchanges.
///
/// Candidates are ranked by distance, ties broken on OLO code so results are reproducible.
pub struct SpatialIndex<'a> {
    exchanges: Vec<&'a Exchange>,
}

impl<'a> SpatialIndex<'a> {
    pub fn new(exchanges: Vec<&'a Exchange>) -> Self {
        SpatialIndex { exchanges }
    }

    pub fn is_empty(&self) -> bool {
        self.exchanges.is_empty()
    }

    /// Up to `k` nearest exchanges to `origin`, never including `origin` itself.
    pub fn nearest(&self, origin: &Exchange, k: usize) -> Vec<&'a Exchange> {
        let mut candidates: Vec<(f64, &'a Exchange)> = self
            .exchanges
            .iter()
            .filter(|exchange| exchange.olo != origin.olo)
            .map(|exchange| (origin.distance(exchange), *exchange))
            .collect();
        candidates.sort_by(|a, b| a.0.total_cmp(&b.0).then_with(|| a.1.olo.cmp(&b.1.olo)));
        candidates
            .into_iter()
            .take(k)
            .map(|(_, exchange)| exchange)
            .collect()
    }

    pub fn nearest_one(&self, origin: &Exchange) -> Option<(&'a Exchange, f64)> {
        self.nearest(origin, 1)
            .into_iter()
            .next()
            .map(|exchange| (exchange, origin.distance(exchange)))
    }
}
