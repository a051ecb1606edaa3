//! Chinese Postman core: the cheapest closed walk covering every edge of a
//! connected weighted graph.
//!
//! Layers, leaf first:
//! - `graph` (simple undirected graph with stable edge indices),
//! - `heap` (indexed binary min-heap with decrease-key),
//! - `dijkstra` (single-source shortest paths),
//! - `matching` (Edmonds' blossom algorithm, minimum-cost perfect matching),
//! - `solver` (odd vertices, path duplication, Eulerian circuit).
//!
//! `mesh` turns OBJ wireframes into continuous segment paths on top of the
//! solver; `gen` holds seeded graph generators for tests and benchmarks.
//!
//! Costs never live inside a [`Graph`]: they are `&[f64]` slices indexed by
//! edge index, `None` meaning unit costs.

pub mod cfg;
pub mod dijkstra;
pub mod error;
pub mod gen;
pub mod graph;
pub mod heap;
pub mod matching;
pub mod mesh;
pub mod solver;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use cfg::{MatchingCfg, PostmanCfg, EPS};
pub use error::{Error, ErrorKind, Result};
pub use graph::Graph;
pub use solver::{chinese_postman, chinese_postman_with, PostmanTour};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::cfg::{MatchingCfg, PostmanCfg};
    pub use crate::dijkstra::{dijkstra, ShortestPaths};
    pub use crate::graph::Graph;
    pub use crate::heap::IndexedMinHeap;
    pub use crate::matching::{Matching, MinCostMatching};
    pub use crate::mesh::{trace_mesh, Line3, Mesh};
    pub use crate::solver::{chinese_postman, chinese_postman_with, PostmanTour};
}
