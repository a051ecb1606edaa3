//! Undirected weighted-graph model (simple graph, dense vertex ids).
//!
//! Purpose
//! - Hold the vertex/edge structure consumed by Dijkstra, the matching and the
//!   postman solver. Costs are kept outside the graph in a `&[f64]` indexed by
//!   edge index, so one graph can be solved under several cost vectors.
//!
//! Conventions
//! - Vertices are `0..n`. Edges get indices `0..m` in insertion order and the
//!   index of an edge never changes.
//! - Adding an existing `{u, v}` is a no-op that returns the existing index.
//! - Adjacency lists keep insertion order; every traversal in this crate is
//!   therefore deterministic for a given construction order.

use std::collections::{HashMap, VecDeque};

use crate::error::{Error, Result};

/// Simple undirected graph with stable edge indices.
///
/// Invariants:
/// - no parallel edges, no self-loops;
/// - `adj[u]` contains `v` iff `adj[v]` contains `u` iff `{u, v}` is an edge.
#[derive(Clone, Debug, Default)]
pub struct Graph {
    n: usize,
    edges: Vec<(usize, usize)>,
    adj: Vec<Vec<usize>>,
    index: HashMap<(usize, usize), usize>,
}

#[inline]
fn key(u: usize, v: usize) -> (usize, usize) {
    if u < v {
        (u, v)
    } else {
        (v, u)
    }
}

impl Graph {
    /// Graph with `n` isolated vertices.
    pub fn new(n: usize) -> Self {
        Self {
            n,
            edges: Vec::new(),
            adj: vec![Vec::new(); n],
            index: HashMap::new(),
        }
    }

    /// Graph with `n` vertices and the given edges, added in order.
    pub fn from_edges(n: usize, edges: &[(usize, usize)]) -> Result<Self> {
        let mut g = Self::new(n);
        for &(u, v) in edges {
            g.add_edge(u, v)?;
        }
        Ok(g)
    }

    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Adds `{u, v}` and returns its edge index (the existing one if present).
    pub fn add_edge(&mut self, u: usize, v: usize) -> Result<usize> {
        self.check_vertex(u)?;
        self.check_vertex(v)?;
        if u == v {
            return Err(Error::SelfLoop { vertex: u });
        }
        if let Some(&e) = self.index.get(&key(u, v)) {
            return Ok(e);
        }
        let e = self.edges.len();
        self.edges.push((u, v));
        self.adj[u].push(v);
        self.adj[v].push(u);
        self.index.insert(key(u, v), e);
        Ok(e)
    }

    /// Endpoints of edge `e` in the order they were added.
    ///
    /// Panics if `e >= num_edges()`; edge indices only come from this graph.
    #[inline]
    pub fn edge(&self, e: usize) -> (usize, usize) {
        self.edges[e]
    }

    /// All edges, indexed by edge index.
    #[inline]
    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    /// Index of edge `{u, v}`; `UnknownEdge` if it was never added.
    #[inline]
    pub fn edge_index(&self, u: usize, v: usize) -> Result<usize> {
        self.find_edge(u, v).ok_or(Error::UnknownEdge { u, v })
    }

    /// Index of edge `{u, v}` if present.
    #[inline]
    pub fn find_edge(&self, u: usize, v: usize) -> Option<usize> {
        self.index.get(&key(u, v)).copied()
    }

    /// Neighbors of `v` in insertion order.
    #[inline]
    pub fn adj_list(&self, v: usize) -> Result<&[usize]> {
        self.check_vertex(v)?;
        Ok(&self.adj[v])
    }

    /// Number of incident edges; 0 for out-of-range vertices.
    #[inline]
    pub fn degree(&self, v: usize) -> usize {
        self.adj.get(v).map_or(0, Vec::len)
    }

    /// Connected components, each sorted ascending, listed by smallest vertex.
    pub fn connected_components(&self) -> Vec<Vec<usize>> {
        let mut comp_of = vec![usize::MAX; self.n];
        let mut comps: Vec<Vec<usize>> = Vec::new();
        let mut queue = VecDeque::new();
        for s in 0..self.n {
            if comp_of[s] != usize::MAX {
                continue;
            }
            let id = comps.len();
            let mut members = vec![s];
            comp_of[s] = id;
            queue.push_back(s);
            while let Some(u) = queue.pop_front() {
                for &v in &self.adj[u] {
                    if comp_of[v] == usize::MAX {
                        comp_of[v] = id;
                        members.push(v);
                        queue.push_back(v);
                    }
                }
            }
            members.sort_unstable();
            comps.push(members);
        }
        comps
    }

    /// Number of vertices reachable from `start` (DFS).
    pub fn reachable_from(&self, start: usize) -> Result<usize> {
        self.check_vertex(start)?;
        let mut visited = vec![false; self.n];
        let mut stack = vec![start];
        let mut count = 0;
        while let Some(u) = stack.pop() {
            if visited[u] {
                continue;
            }
            visited[u] = true;
            count += 1;
            stack.extend(self.adj[u].iter().copied().filter(|&v| !visited[v]));
        }
        Ok(count)
    }

    /// True if every vertex is reachable from vertex 0. An empty graph is not connected.
    pub fn is_connected(&self) -> bool {
        self.n > 0 && self.reachable_from(0).is_ok_and(|r| r == self.n)
    }

    /// Sub-graph induced by `vertices`, renumbered `0..k` in the given order.
    ///
    /// Returns the sub-graph and, per sub-graph edge index, the parent edge index.
    pub fn induced_subgraph(&self, vertices: &[usize]) -> Result<(Graph, Vec<usize>)> {
        let mut local = HashMap::with_capacity(vertices.len());
        for (i, &v) in vertices.iter().enumerate() {
            self.check_vertex(v)?;
            local.insert(v, i);
        }
        let mut sub = Graph::new(vertices.len());
        let mut parent_edge = Vec::new();
        for (e, &(u, v)) in self.edges.iter().enumerate() {
            if let (Some(&a), Some(&b)) = (local.get(&u), local.get(&v)) {
                let se = sub.add_edge(a, b)?;
                if se == parent_edge.len() {
                    parent_edge.push(e);
                }
            }
        }
        Ok((sub, parent_edge))
    }

    #[inline]
    fn check_vertex(&self, v: usize) -> Result<()> {
        if v < self.n {
            Ok(())
        } else {
            Err(Error::VertexOutOfRange {
                vertex: v,
                n: self.n,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_edge_is_idempotent_and_symmetric() {
        let mut g = Graph::new(3);
        assert_eq!(g.add_edge(0, 1).unwrap(), 0);
        assert_eq!(g.add_edge(1, 2).unwrap(), 1);
        assert_eq!(g.add_edge(1, 0).unwrap(), 0);
        assert_eq!(g.num_edges(), 2);
        assert_eq!(g.adj_list(1).unwrap(), &[0, 2]);
        assert_eq!(g.edge_index(2, 1).unwrap(), 1);
        assert_eq!(g.edge(0), (0, 1));
        assert_eq!(g.degree(1), 2);
    }

    #[test]
    fn lookups_fail_on_unknown_input() {
        let g = Graph::from_edges(3, &[(0, 1)]).unwrap();
        assert_eq!(g.edge_index(0, 2), Err(Error::UnknownEdge { u: 0, v: 2 }));
        assert_eq!(
            g.adj_list(3).unwrap_err(),
            Error::VertexOutOfRange { vertex: 3, n: 3 }
        );
        let mut g = Graph::new(2);
        assert_eq!(g.add_edge(1, 1), Err(Error::SelfLoop { vertex: 1 }));
        assert!(g.add_edge(0, 5).is_err());
    }

    #[test]
    fn components_and_connectivity() {
        let g = Graph::from_edges(6, &[(0, 1), (4, 3), (1, 2), (5, 3)]).unwrap();
        assert_eq!(
            g.connected_components(),
            vec![vec![0, 1, 2], vec![3, 4, 5]]
        );
        assert!(!g.is_connected());
        assert_eq!(g.reachable_from(4).unwrap(), 3);
        let g = Graph::from_edges(3, &[(0, 1), (1, 2)]).unwrap();
        assert!(g.is_connected());
        assert!(!Graph::new(0).is_connected());
    }

    #[test]
    fn induced_subgraph_maps_edges_back() {
        let g = Graph::from_edges(5, &[(0, 1), (2, 3), (3, 4), (4, 2), (1, 4)]).unwrap();
        let (sub, parent) = g.induced_subgraph(&[2, 3, 4]).unwrap();
        assert_eq!(sub.num_vertices(), 3);
        assert_eq!(sub.num_edges(), 3);
        assert_eq!(parent, vec![1, 2, 3]);
        assert_eq!(sub.edge(2), (2, 0));
    }
}
