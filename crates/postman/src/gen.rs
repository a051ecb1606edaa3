//! Seeded graph generators for tests and benchmarks.
//!
//! All generators are deterministic in `seed` (`StdRng::seed_from_u64`), so a
//! failing case can be replayed from its seed alone.

use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::Result;
use crate::graph::Graph;

/// Random connected graph: a random spanning tree on `n` vertices plus up to
/// `extra_edges` further distinct edges. Costs are uniform in `[1, 10)`.
pub fn random_connected_graph(
    n: usize,
    extra_edges: usize,
    seed: u64,
) -> Result<(Graph, Vec<f64>)> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut g = Graph::new(n);
    let mut cost = Vec::new();
    for v in 1..n {
        let u = rng.gen_range(0..v);
        g.add_edge(u, v)?;
        cost.push(rng.gen_range(1.0..10.0));
    }

    let max_edges = n * n.saturating_sub(1) / 2;
    let target = (g.num_edges() + extra_edges).min(max_edges);
    while g.num_edges() < target {
        let u = rng.gen_range(0..n);
        let v = rng.gen_range(0..n);
        if u == v || g.find_edge(u, v).is_some() {
            continue;
        }
        g.add_edge(u, v)?;
        cost.push(rng.gen_range(1.0..10.0));
    }
    Ok((g, cost))
}

/// `w x h` grid graph; vertex `(x, y)` has id `y * w + x`.
pub fn grid_graph(w: usize, h: usize) -> Result<Graph> {
    let mut g = Graph::new(w * h);
    for y in 0..h {
        for x in 0..w {
            let v = y * w + x;
            if x + 1 < w {
                g.add_edge(v, v + 1)?;
            }
            if y + 1 < h {
                g.add_edge(v, v + w)?;
            }
        }
    }
    Ok(g)
}

/// Complete graph over `n` random points in the unit square with Euclidean
/// costs, the shape of input the postman solver hands to the matching.
pub fn random_complete_graph(n: usize, seed: u64) -> Result<(Graph, Vec<f64>)> {
    let mut rng = StdRng::seed_from_u64(seed);
    let pts: Vec<Vector2<f64>> = (0..n)
        .map(|_| Vector2::new(rng.gen::<f64>(), rng.gen::<f64>()))
        .collect();
    let mut g = Graph::new(n);
    let mut cost = Vec::with_capacity(n * n.saturating_sub(1) / 2);
    for u in 0..n {
        for v in u + 1..n {
            g.add_edge(u, v)?;
            cost.push((pts[u] - pts[v]).norm());
        }
    }
    Ok((g, cost))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_graph_is_connected_and_seeded() {
        let (g, c) = random_connected_graph(30, 20, 7).unwrap();
        assert!(g.is_connected());
        assert_eq!(g.num_edges(), 49);
        assert_eq!(c.len(), g.num_edges());
        assert!(c.iter().all(|&x| (1.0..10.0).contains(&x)));
        let (g2, c2) = random_connected_graph(30, 20, 7).unwrap();
        assert_eq!(g.edges(), g2.edges());
        assert_eq!(c, c2);
    }

    #[test]
    fn extra_edges_saturate_at_complete_graph() {
        let (g, _) = random_connected_graph(5, 100, 1).unwrap();
        assert_eq!(g.num_edges(), 10);
    }

    #[test]
    fn grid_shape() {
        let g = grid_graph(3, 2).unwrap();
        assert_eq!(g.num_vertices(), 6);
        assert_eq!(g.num_edges(), 7);
        assert_eq!(g.degree(1), 3);
        assert_eq!(g.degree(0), 2);
    }

    #[test]
    fn complete_graph_costs_are_distances() {
        let (g, c) = random_complete_graph(6, 3).unwrap();
        assert_eq!(g.num_edges(), 15);
        let max = std::f64::consts::SQRT_2;
        assert!(c.iter().all(|&x| (0.0..=max).contains(&x)));
    }
}
