//! Entry points and per-run bookkeeping.

use std::collections::VecDeque;

use tracing::{debug, trace};

use crate::cfg::{greater, MatchingCfg};
use crate::error::{Error, Result};
use crate::graph::Graph;

use super::types::{Label, Matching, MinCostMatching};

impl<'g> Matching<'g> {
    /// Solver for `g` with default configuration.
    pub fn new(g: &'g Graph) -> Self {
        Self::with_cfg(g, MatchingCfg::default())
    }

    pub fn with_cfg(g: &'g Graph, cfg: MatchingCfg) -> Self {
        let n = g.num_vertices();
        let m = g.num_edges();
        Self {
            g,
            cfg,
            n,
            m,
            free: Vec::with_capacity(n),
            outer: vec![0; 2 * n],
            deep: vec![Vec::new(); 2 * n],
            shallow: vec![VecDeque::new(); 2 * n],
            active: vec![false; 2 * n],
            label: vec![Label::Unlabeled; 2 * n],
            forest: vec![None; 2 * n],
            root: vec![0; 2 * n],
            blocked: vec![false; 2 * n],
            dual: vec![0.0; 2 * n],
            slack: vec![0.0; m],
            mate: vec![None; 2 * n],
            perfect: false,
            forest_list: VecDeque::new(),
            visited: vec![false; 2 * n],
        }
    }

    /// Minimum-cost perfect matching under `cost` (indexed by edge index).
    ///
    /// Costs may be negative; they are shifted so the smallest is zero.
    /// Fails with `NoPerfectMatching` if the graph has none.
    pub fn solve_minimum_cost_perfect_matching(&mut self, cost: &[f64]) -> Result<MinCostMatching> {
        if cost.len() != self.m {
            return Err(Error::CostLength {
                expected: self.m,
                got: cost.len(),
            });
        }
        if let Some((edge, &c)) = cost.iter().enumerate().find(|(_, c)| !c.is_finite()) {
            return Err(Error::InvalidCost { edge, cost: c });
        }

        self.solve_maximum_matching()?;
        if !self.perfect {
            return Err(Error::NoPerfectMatching);
        }

        self.clear();
        self.slack.copy_from_slice(cost);
        self.positive_costs();

        let mut phases = 0usize;
        self.perfect = false;
        while !self.perfect {
            if self.cfg.greedy_warm_start {
                self.heuristic()?;
            }
            self.grow()?;
            self.update_dual_costs()?;
            self.reset();
            phases += 1;
            trace!(phases, "matching phase done");
        }

        let edges = self.retrieve_matching()?;
        let total: f64 = edges.iter().map(|&e| cost[e]).sum();
        debug!(
            vertices = self.n,
            edges = self.m,
            phases,
            cost = total,
            "minimum cost perfect matching"
        );
        Ok(MinCostMatching {
            edges,
            cost: total,
        })
    }

    /// Maximum-cardinality matching, ignoring costs. Returns edge indices.
    pub fn solve_maximum_matching(&mut self) -> Result<Vec<usize>> {
        self.clear();
        self.grow()?;
        self.retrieve_matching()
    }

    /// Resets all state for a new run; every edge starts tight.
    pub(super) fn clear(&mut self) {
        self.free.clear();
        self.free.extend(self.n..2 * self.n);

        for i in 0..2 * self.n {
            self.outer[i] = i;
            self.deep[i].clear();
            if i < self.n {
                self.deep[i].push(i);
            }
            self.shallow[i].clear();
            self.active[i] = i < self.n;
            self.label[i] = Label::Unlabeled;
            self.forest[i] = None;
            self.root[i] = i;
            self.blocked[i] = false;
            self.dual[i] = 0.0;
            self.mate[i] = None;
        }
        self.slack.fill(0.0);
    }

    /// Opens every remaining blossom and reads the matched edges.
    fn retrieve_matching(&mut self) -> Result<Vec<usize>> {
        for i in 0..2 * self.n {
            if self.active[i] && self.mate[i].is_some() && self.outer[i] == i {
                self.expand(i, true)?;
            }
        }
        Ok(self
            .g
            .edges()
            .iter()
            .enumerate()
            .filter(|&(_, &(u, v))| self.mate[u] == Some(v))
            .map(|(e, _)| e)
            .collect())
    }

    pub(super) fn take_blossom_index(&mut self) -> Result<usize> {
        self.free
            .pop()
            .ok_or(Error::MatchingInvariant("out of blossom indices"))
    }

    #[inline]
    pub(super) fn release_blossom_index(&mut self, b: usize) {
        self.free.push(b);
    }

    #[inline]
    pub(super) fn is_edge_blocked(&self, e: usize) -> bool {
        greater(self.slack[e], 0.0)
    }

    #[inline]
    pub(super) fn is_pair_blocked(&self, u: usize, v: usize) -> Result<bool> {
        Ok(self.is_edge_blocked(self.g.edge_index(u, v)?))
    }

    /// Edge index of `{u, v}` if it exists and is not blocked.
    #[inline]
    pub(super) fn usable_edge(&self, u: usize, v: usize) -> Option<usize> {
        self.g.find_edge(u, v).filter(|&e| !self.is_edge_blocked(e))
    }
}
