use itertools::Itertools;
use petgraph::unionfind::UnionFind;

use crate::{
    edge::{Edge, Level},
    exchange::Exchange,
};

/// Indices and length of the minimum spanning tree edges over the complete graph of
/// `exchanges`, using straight line distance as weight (Kruskal). Equal length
/// candidates are taken in index order.
pub fn minimum_spanning_tree(exchanges: &[&Exchange]) -> Vec<(usize, usize, f64)> {
    let mut candidates: Vec<(usize, usize, f64)> = (0..exchanges.len())
        .tuple_combinations()
        .map(|(i, j)| (i, j, exchanges[i].distance(exchanges[j])))
        .collect();
    candidates.sort_by(|a, b| a.2.total_cmp(&b.2).then((a.0, a.1).cmp(&(b.0, b.1))));

    let mut forest = UnionFind::<usize>::new(exchanges.len());
    let mut tree = Vec::with_capacity(exchanges.len().saturating_sub(1));
    for (i, j, length) in candidates {
        if forest.union(i, j) {
            tree.push((i, j, length));
            if tree.len() + 1 == exchanges.len() {
                break;
            }
        }
    }
    tree
}

/// Spanning tree links for a cluster of exchanges. Co-located exchanges are joined in
/// the tree but produce no link.
pub fn design_network(exchanges: &[&Exchange]) -> Vec<Edge> {
    minimum_spanning_tree(exchanges)
        .into_iter()
        .filter(|(_, _, length)| *length > 0.0)
        .map(|(i, j, _)| Edge::new(exchanges[i], exchanges[j], Level::IslandLocal))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimum_spanning_tree_ties_in_index_order() {
        // A-B and A-C tie at 5, B-C is 6
        let exchanges = vec![
            Exchange::new("A", 0.0, 0.0, 0.0),
            Exchange::new("B", 3.0, 4.0, 0.0),
            Exchange::new("C", -3.0, 4.0, 0.0),
        ];
        let refs: Vec<&Exchange> = exchanges.iter().collect();
        assert_eq!(
            minimum_spanning_tree(&refs),
            vec![(0, 1, 5.0), (0, 2, 5.0)]
        );
    }

    #[test]
    fn test_minimum_spanning_tree() {
        // square with one long diagonal candidate
        let exchanges = vec![
            Exchange::new("A", 0.0, 0.0, 0.0),
            Exchange::new("B", 1.0, 0.0, 0.0),
            Exchange::new("C", 1.0, 2.0, 0.0),
            Exchange::new("D", 0.0, 2.0, 0.0),
        ];
        let refs: Vec<&Exchange> = exchanges.iter().collect();
        let tree = minimum_spanning_tree(&refs);
        assert_eq!(tree, vec![(0, 1, 1.0), (2, 3, 1.0), (0, 3, 2.0)]);
    }

    #[test]
    fn test_minimum_spanning_tree_small() {
        assert!(minimum_spanning_tree(&[]).is_empty());
        let a = Exchange::new("A", 0.0, 0.0, 0.0);
        assert!(minimum_spanning_tree(&[&a]).is_empty());
    }

    #[test]
    fn test_design_network_drops_zero_length() {
        let exchanges = vec![
            Exchange::new("A", 0.0, 0.0, 5.0),
            Exchange::new("B", 0.0, 0.0, 5.0),
            Exchange::new("C", 3.0, 4.0, 5.0),
        ];
        let refs: Vec<&Exchange> = exchanges.iter().collect();
        let edges = design_network(&refs);
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].level, Level::IslandLocal);
        assert_eq!(edges[0].length, 5.0);
        assert_eq!(edges[0].source, "A");
        assert_eq!(edges[0].sink, "C");
    }
}
