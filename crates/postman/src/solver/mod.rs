//! Chinese Postman solver: cheapest closed walk covering every edge.
//!
//! Pipeline
//! - Reject empty and disconnected graphs before any other work.
//! - Collect the odd-degree vertices. If there are none the graph is already
//!   Eulerian and every edge is walked once.
//! - Otherwise build the complete graph over the odd vertices with
//!   shortest-path distances as costs, pair them by minimum-cost perfect
//!   matching and duplicate each matched shortest path (edge multiplicity + 1).
//! - Extract an Eulerian circuit of the duplicated multigraph from vertex 0.
//!
//! Determinism
//! - All traversals follow adjacency insertion order, so the same graph built
//!   in the same order yields the same walk.

mod euler;

use tracing::debug;

use crate::cfg::PostmanCfg;
use crate::dijkstra::{check_costs, dijkstra, ShortestPaths};
use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::matching::Matching;

pub use euler::eulerian_circuit;

/// Closed walk returned by the solver.
#[derive(Clone, Debug, PartialEq)]
pub struct PostmanTour {
    /// Vertex sequence; starts and ends at vertex 0.
    pub walk: Vec<usize>,
    /// Sum of the costs of all traversed edges.
    pub cost: f64,
    /// Times each edge is traversed, indexed by edge index (always >= 1).
    pub multiplicity: Vec<usize>,
}

impl PostmanTour {
    /// Edge indices of consecutive walk steps.
    pub fn edge_sequence(&self, graph: &Graph) -> Result<Vec<usize>> {
        self.walk
            .windows(2)
            .map(|w| graph.edge_index(w[0], w[1]))
            .collect()
    }

    /// Number of edge traversals.
    pub fn len(&self) -> usize {
        self.walk.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Vertices of odd degree, ascending.
pub fn odd_vertices(graph: &Graph) -> Vec<usize> {
    (0..graph.num_vertices())
        .filter(|&v| graph.degree(v) % 2 == 1)
        .collect()
}

/// Solves the Chinese Postman Problem with default configuration.
///
/// `cost` is indexed by edge index; `None` means unit costs.
pub fn chinese_postman(graph: &Graph, cost: Option<&[f64]>) -> Result<PostmanTour> {
    chinese_postman_with(graph, cost, PostmanCfg::default())
}

/// Solves the Chinese Postman Problem.
///
/// Fails with `EmptyGraph`, `Disconnected` or a cost error on bad input.
pub fn chinese_postman_with(
    graph: &Graph,
    cost: Option<&[f64]>,
    cfg: PostmanCfg,
) -> Result<PostmanTour> {
    let n = graph.num_vertices();
    if n == 0 {
        return Err(Error::EmptyGraph);
    }
    let reached = graph.reachable_from(0)?;
    if reached != n {
        return Err(Error::Disconnected { reached, total: n });
    }
    check_costs(graph, cost)?;

    let mut multiplicity = vec![1usize; graph.num_edges()];
    let odd = odd_vertices(graph);
    debug!(
        vertices = n,
        edges = graph.num_edges(),
        odd = odd.len(),
        "postman instance"
    );
    if !odd.is_empty() {
        duplicate_matched_paths(graph, cost, &odd, cfg, &mut multiplicity)?;
    }

    let (walk, total) = eulerian_circuit(graph, cost, &multiplicity, 0)?;
    debug!(
        steps = walk.len().saturating_sub(1),
        cost = total,
        "postman tour"
    );
    Ok(PostmanTour {
        walk,
        cost: total,
        multiplicity,
    })
}

/// Pairs the odd vertices at minimum shortest-path cost and bumps the
/// multiplicity of every edge on each matched path.
fn duplicate_matched_paths(
    graph: &Graph,
    cost: Option<&[f64]>,
    odd: &[usize],
    cfg: PostmanCfg,
    multiplicity: &mut [usize],
) -> Result<()> {
    let k = odd.len();
    let trees: Vec<ShortestPaths> = odd
        .iter()
        .map(|&s| dijkstra(graph, s, cost))
        .collect::<Result<_>>()?;

    let mut pairs = Graph::new(k);
    let mut pair_cost = Vec::with_capacity(k * (k - 1) / 2);
    for u in 0..k {
        for v in u + 1..k {
            pairs.add_edge(u, v)?;
            pair_cost.push(trees[u].cost[odd[v]]);
        }
    }

    let matching =
        Matching::with_cfg(&pairs, cfg.matching).solve_minimum_cost_perfect_matching(&pair_cost)?;
    debug!(
        pairs = matching.edges.len(),
        cost = matching.cost,
        "odd vertices matched"
    );

    for (u, v) in matching.pairs(&pairs) {
        let path = trees[u].path_to(odd[v]);
        for w in path.windows(2) {
            multiplicity[graph.edge_index(w[0], w[1])?] += 1;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests;
