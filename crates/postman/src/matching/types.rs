//! Matching state and result types.

use std::collections::VecDeque;

use crate::cfg::MatchingCfg;
use crate::graph::Graph;

/// Label of an outermost vertex/blossom in the alternating forest.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Label {
    Unlabeled,
    Odd,
    Even,
}

/// Minimum-cost perfect matching: edge indices (ascending) and their total cost.
#[derive(Clone, Debug, PartialEq)]
pub struct MinCostMatching {
    pub edges: Vec<usize>,
    pub cost: f64,
}

impl MinCostMatching {
    /// Matched vertex pairs, in edge order.
    pub fn pairs(&self, g: &Graph) -> Vec<(usize, usize)> {
        self.edges.iter().map(|&e| g.edge(e)).collect()
    }
}

/// Blossom-algorithm solver bound to one graph.
///
/// Slots `0..n` are the graph's vertices; slots `n..2n` are blossoms.
///
/// Invariants (between phases):
/// - `mate` is symmetric on outermost slots;
/// - `outer[outer[x]] == outer[x]`;
/// - `deep[b]` lists the vertices inside `b`, `shallow[b]` its odd cycle of
///   direct children starting at the tip.
pub struct Matching<'g> {
    pub(super) g: &'g Graph,
    pub(super) cfg: MatchingCfg,
    pub(super) n: usize,
    pub(super) m: usize,

    /// Unused blossom ids in `n..2n`.
    pub(super) free: Vec<usize>,
    /// Outermost blossom containing the slot (itself if none).
    pub(super) outer: Vec<usize>,
    pub(super) deep: Vec<Vec<usize>>,
    pub(super) shallow: Vec<VecDeque<usize>>,
    /// Slot currently in use (vertices are always active).
    pub(super) active: Vec<bool>,

    pub(super) label: Vec<Label>,
    /// Parent vertex in the alternating forest.
    pub(super) forest: Vec<Option<usize>>,
    pub(super) root: Vec<usize>,

    pub(super) blocked: Vec<bool>,
    pub(super) dual: Vec<f64>,
    /// Reduced cost per edge; the edge is usable iff `slack <= 0` (within EPS).
    pub(super) slack: Vec<f64>,
    pub(super) mate: Vec<Option<usize>>,

    pub(super) perfect: bool,
    pub(super) forest_list: VecDeque<usize>,
    pub(super) visited: Vec<bool>,
}
