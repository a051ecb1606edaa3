//! Error types for the postman core.
//!
//! Variants fall into two kinds (see [`ErrorKind`]):
//! - `Input`: the caller handed us something we cannot solve (disconnected
//!   graph, unknown edge, bad costs, malformed mesh). Callers may recover.
//! - `Internal`: an algorithmic invariant broke (heap misuse, failed
//!   matching). Treat these as assertions.

use thiserror::Error;

/// Result type alias using the crate's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification of an [`Error`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Input,
    Internal,
}

/// Errors raised by graph construction, search, matching and the solver.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The graph has no vertices.
    #[error("graph has no vertices")]
    EmptyGraph,

    /// Not every vertex is reachable from the start vertex.
    #[error("graph is not connected: reached {reached} of {total} vertices")]
    Disconnected {
        /// Vertices reached from the start vertex
        reached: usize,
        /// Vertices in the graph
        total: usize,
    },

    /// Lookup of an edge that was never added.
    #[error("unknown edge {{{u}, {v}}}")]
    UnknownEdge { u: usize, v: usize },

    /// Vertex id outside `0..n`.
    #[error("vertex {vertex} out of range for graph with {n} vertices")]
    VertexOutOfRange { vertex: usize, n: usize },

    /// Edge from a vertex to itself.
    #[error("self-loop at vertex {vertex}")]
    SelfLoop { vertex: usize },

    /// Cost vector length does not match the edge count.
    #[error("cost vector has {got} entries, graph has {expected} edges")]
    CostLength { expected: usize, got: usize },

    /// Negative or non-finite edge cost.
    #[error("invalid cost {cost} on edge {edge}")]
    InvalidCost { edge: usize, cost: f64 },

    /// Malformed mesh input.
    #[error("mesh parse error at line {line}: {reason}")]
    MeshParse { line: usize, reason: String },

    /// Heap used against its contract (duplicate insert, empty delete, ...).
    #[error("invalid heap operation: {0}")]
    InvalidHeapOperation(&'static str),

    /// The matching graph admits no perfect matching.
    #[error("the graph does not have a perfect matching")]
    NoPerfectMatching,

    /// Blossom bookkeeping reached an impossible state.
    #[error("matching invariant violated: {0}")]
    MatchingInvariant(&'static str),

    /// A vertex of the duplicated multigraph has odd degree.
    #[error("vertex {vertex} has odd traversal degree")]
    OddDegree { vertex: usize },

    /// Edges were left over after the closed walk returned to its start.
    #[error("duplicated multigraph is not Eulerian: {untraversed} traversals left")]
    NotEulerian { untraversed: usize },
}

impl Error {
    /// Whether the caller caused this error or the algorithm did.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidHeapOperation(_)
            | Error::NoPerfectMatching
            | Error::MatchingInvariant(_)
            | Error::OddDegree { .. }
            | Error::NotEulerian { .. } => ErrorKind::Internal,
            _ => ErrorKind::Input,
        }
    }
}
