//! Single-source shortest paths (Dijkstra over [`IndexedMinHeap`]).
//!
//! - Costs are an optional slice indexed by edge index; `None` means unit
//!   weights. Costs must be finite and non-negative.
//! - The whole vertex set is expected to be reachable from the source; a
//!   vertex left unsettled when the heap runs dry fails the call with
//!   `Disconnected`.

use crate::cfg::less;
use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::heap::IndexedMinHeap;

/// Shortest-path tree rooted at `source`.
#[derive(Clone, Debug, PartialEq)]
pub struct ShortestPaths {
    pub source: usize,
    /// Parent of each vertex in the tree; `None` for the source.
    pub parent: Vec<Option<usize>>,
    /// Cost of the optimal path from the source to each vertex.
    pub cost: Vec<f64>,
}

impl ShortestPaths {
    /// Vertices on the tree path `source ..= v`.
    pub fn path_to(&self, v: usize) -> Vec<usize> {
        let mut path = vec![v];
        let mut w = v;
        while let Some(p) = self.parent.get(w).copied().flatten() {
            path.push(p);
            w = p;
        }
        path.reverse();
        path
    }
}

/// Checks that `cost` (if given) has one finite, non-negative entry per edge.
pub fn check_costs(graph: &Graph, cost: Option<&[f64]>) -> Result<()> {
    let Some(cost) = cost else {
        return Ok(());
    };
    if cost.len() != graph.num_edges() {
        return Err(Error::CostLength {
            expected: graph.num_edges(),
            got: cost.len(),
        });
    }
    match cost
        .iter()
        .enumerate()
        .find(|(_, c)| !c.is_finite() || **c < 0.0)
    {
        Some((edge, &c)) => Err(Error::InvalidCost { edge, cost: c }),
        None => Ok(()),
    }
}

/// Cost of edge `e`, unit if no costs are given.
#[inline]
pub(crate) fn edge_cost(cost: Option<&[f64]>, e: usize) -> f64 {
    cost.map_or(1.0, |c| c[e])
}

/// Dijkstra from `source` over the whole graph.
pub fn dijkstra(graph: &Graph, source: usize, cost: Option<&[f64]>) -> Result<ShortestPaths> {
    check_costs(graph, cost)?;
    let n = graph.num_vertices();
    if source >= n {
        return Err(Error::VertexOutOfRange { vertex: source, n });
    }

    let mut heap = IndexedMinHeap::with_capacity(n);
    let mut parent = vec![None; n];
    let mut permanent = vec![false; n];
    let mut path_cost = vec![f64::INFINITY; n];

    heap.insert(0.0, source)?;
    path_cost[source] = 0.0;

    let mut settled = 0;
    while !heap.is_empty() {
        let u = heap.delete_min()?;
        permanent[u] = true;
        settled += 1;

        for &v in graph.adj_list(u)? {
            if permanent[v] {
                continue;
            }
            let c = path_cost[u] + edge_cost(cost, graph.edge_index(u, v)?);
            if path_cost[v].is_infinite() {
                parent[v] = Some(u);
                path_cost[v] = c;
                heap.insert(c, v)?;
            } else if less(c, path_cost[v]) {
                parent[v] = Some(u);
                path_cost[v] = c;
                heap.change_key(c, v)?;
            }
        }
    }

    if settled < n {
        return Err(Error::Disconnected {
            reached: settled,
            total: n,
        });
    }

    Ok(ShortestPaths {
        source,
        parent,
        cost: path_cost,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weighted_square() -> (Graph, Vec<f64>) {
        // 0-1 (1), 1-2 (2), 2-3 (3), 3-0 (4)
        let g = Graph::from_edges(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]).unwrap();
        (g, vec![1.0, 2.0, 3.0, 4.0])
    }

    #[test]
    fn four_cycle_costs_match_hand_computation() {
        let (g, c) = weighted_square();
        let sp = dijkstra(&g, 0, Some(&c)).unwrap();
        assert_eq!(sp.cost, vec![0.0, 1.0, 3.0, 4.0]);
        assert_eq!(sp.parent, vec![None, Some(0), Some(1), Some(0)]);
        assert_eq!(sp.path_to(2), vec![0, 1, 2]);

        let sp = dijkstra(&g, 2, Some(&c)).unwrap();
        assert_eq!(sp.cost, vec![3.0, 2.0, 0.0, 3.0]);
    }

    #[test]
    fn unit_weights_when_costs_absent() {
        let (g, _) = weighted_square();
        let sp = dijkstra(&g, 0, None).unwrap();
        assert_eq!(sp.cost, vec![0.0, 1.0, 2.0, 1.0]);
        assert_eq!(sp.path_to(0), vec![0]);
    }

    #[test]
    fn decrease_key_picks_cheaper_detour() {
        // direct 0-2 is expensive, 0-1-2 is cheap
        let g = Graph::from_edges(3, &[(0, 2), (0, 1), (1, 2)]).unwrap();
        let sp = dijkstra(&g, 0, Some(&[10.0, 1.0, 1.0])).unwrap();
        assert_eq!(sp.cost[2], 2.0);
        assert_eq!(sp.parent[2], Some(1));
    }

    #[test]
    fn disconnected_graph_fails() {
        let g = Graph::from_edges(4, &[(0, 1), (2, 3)]).unwrap();
        assert_eq!(
            dijkstra(&g, 0, None),
            Err(Error::Disconnected {
                reached: 2,
                total: 4
            })
        );
    }

    #[test]
    fn bad_costs_are_rejected() {
        let (g, _) = weighted_square();
        assert!(matches!(
            dijkstra(&g, 0, Some(&[1.0])),
            Err(Error::CostLength { .. })
        ));
        assert!(matches!(
            dijkstra(&g, 0, Some(&[1.0, -1.0, 1.0, 1.0])),
            Err(Error::InvalidCost { edge: 1, .. })
        ));
        assert!(dijkstra(&g, 9, None).is_err());
    }
}
