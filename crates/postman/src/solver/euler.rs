//! Eulerian circuit over a graph with per-edge traversal counts.

use crate::dijkstra::edge_cost;
use crate::error::{Error, Result};
use crate::graph::Graph;

/// Closed walk from `start` traversing edge `e` exactly `multiplicity[e]`
/// times, and its total cost.
///
/// Hierholzer with an explicit stack: follow unused edges until stuck, then
/// back out vertex by vertex; sub-cycles found on the way back are spliced in
/// where they start. Fails with `OddDegree` if some vertex has odd traversal
/// degree and with `NotEulerian` if edges are unreachable from `start`.
pub fn eulerian_circuit(
    graph: &Graph,
    cost: Option<&[f64]>,
    multiplicity: &[usize],
    start: usize,
) -> Result<(Vec<usize>, f64)> {
    if multiplicity.len() != graph.num_edges() {
        return Err(Error::CostLength {
            expected: graph.num_edges(),
            got: multiplicity.len(),
        });
    }
    let n = graph.num_vertices();
    if start >= n {
        return Err(Error::VertexOutOfRange { vertex: start, n });
    }

    let mut degree = vec![0usize; n];
    for (e, &(u, v)) in graph.edges().iter().enumerate() {
        degree[u] += multiplicity[e];
        degree[v] += multiplicity[e];
    }
    if let Some(vertex) = degree.iter().position(|d| d % 2 == 1) {
        return Err(Error::OddDegree { vertex });
    }

    // Working adjacency: one (neighbor, edge) entry per traversal, reversed so
    // that popping from the back follows insertion order.
    let mut adj: Vec<Vec<(usize, usize)>> = vec![Vec::new(); n];
    for (e, &(u, v)) in graph.edges().iter().enumerate() {
        for _ in 0..multiplicity[e] {
            adj[u].push((v, e));
            adj[v].push((u, e));
        }
    }
    for list in &mut adj {
        list.reverse();
    }

    let mut left = multiplicity.to_vec();
    let mut total = 0.0;
    let mut stack = vec![start];
    let mut circuit = Vec::with_capacity(multiplicity.iter().sum::<usize>() + 1);

    while let Some(&u) = stack.last() {
        // Entries whose edge is used up were consumed from the other end.
        while adj[u].last().is_some_and(|&(_, e)| left[e] == 0) {
            adj[u].pop();
        }
        match adj[u].pop() {
            Some((v, e)) => {
                left[e] -= 1;
                total += edge_cost(cost, e);
                stack.push(v);
            }
            None => {
                stack.pop();
                circuit.push(u);
            }
        }
    }

    let untraversed: usize = left.iter().sum();
    if untraversed > 0 {
        return Err(Error::NotEulerian { untraversed });
    }
    circuit.reverse();
    Ok((circuit, total))
}
