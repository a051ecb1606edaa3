//! Dual variables: the per-phase dual update, cost normalization and the
//! greedy warm start.

use crate::cfg::greater;
use crate::error::Result;
use crate::heap::IndexedMinHeap;

use super::types::{Label, Matching};

impl<'g> Matching<'g> {
    /// Largest uniform dual step that keeps all slacks non-negative, applied.
    ///
    /// Bounds: slack of even-unlabeled edges; half the slack of even-even
    /// edges across blossoms; dual of odd blossoms. Blossoms whose dual drops
    /// to zero lose their `blocked` flag and are dissolved (unmatched) or
    /// expanded (matched).
    pub(super) fn update_dual_costs(&mut self) -> Result<()> {
        let g = self.g;
        let mut e1: Option<f64> = None;
        let mut e2: Option<f64> = None;
        let mut e3: Option<f64> = None;

        for (i, &(u, v)) in g.edges().iter().enumerate() {
            let (ou, ov) = (self.outer[u], self.outer[v]);
            let (lu, lv) = (self.label[ou], self.label[ov]);
            let s = self.slack[i];
            let even_unlabeled = (lu == Label::Even && lv == Label::Unlabeled)
                || (lv == Label::Even && lu == Label::Unlabeled);
            let even_even = ou != ov && lu == Label::Even && lv == Label::Even;
            if even_unlabeled && e1.is_none_or(|x| greater(x, s)) {
                e1 = Some(s);
            } else if even_even && e2.is_none_or(|x| greater(x, s)) {
                e2 = Some(s);
            }
        }
        for i in self.n..2 * self.n {
            if self.active[i]
                && self.outer[i] == i
                && self.label[i] == Label::Odd
                && e3.is_none_or(|x| greater(x, self.dual[i]))
            {
                e3 = Some(self.dual[i]);
            }
        }

        let mut e = e1.or(e2).or(e3).unwrap_or(0.0);
        if let Some(x) = e2 {
            if greater(e, x / 2.0) {
                e = x / 2.0;
            }
        }
        if let Some(x) = e3 {
            if greater(e, x) {
                e = x;
            }
        }

        for i in 0..2 * self.n {
            if i != self.outer[i] || !self.active[i] {
                continue;
            }
            match self.label[i] {
                Label::Even => self.dual[i] += e,
                Label::Odd => self.dual[i] -= e,
                Label::Unlabeled => {}
            }
        }

        for (i, &(u, v)) in g.edges().iter().enumerate() {
            let (ou, ov) = (self.outer[u], self.outer[v]);
            if ou == ov {
                continue;
            }
            match (self.label[ou], self.label[ov]) {
                (Label::Even, Label::Even) => self.slack[i] -= 2.0 * e,
                (Label::Odd, Label::Odd) => self.slack[i] += 2.0 * e,
                (Label::Even, Label::Unlabeled) | (Label::Unlabeled, Label::Even) => {
                    self.slack[i] -= e
                }
                (Label::Odd, Label::Unlabeled) | (Label::Unlabeled, Label::Odd) => {
                    self.slack[i] += e
                }
                _ => {}
            }
        }

        for i in self.n..2 * self.n {
            if greater(self.dual[i], 0.0) {
                self.blocked[i] = true;
            } else if self.active[i] && self.blocked[i] {
                // The blossom is becoming unblocked.
                if self.mate[i].is_none() {
                    self.destroy_blossom(i);
                } else {
                    self.blocked[i] = false;
                    self.expand(i, false)?;
                }
            }
        }
        Ok(())
    }

    /// Shifts all slacks by the most negative cost so that every slack is
    /// non-negative. Non-negative costs are left as they are.
    pub(super) fn positive_costs(&mut self) {
        let mut min_edge = 0.0;
        for &s in &self.slack {
            if greater(min_edge - s, 0.0) {
                min_edge = s;
            }
        }
        for s in &mut self.slack {
            *s -= min_edge;
        }
    }

    /// Greedy warm start: visit vertices by ascending tight-edge degree and
    /// match each unmatched one to its free tight neighbor of least degree.
    pub(super) fn heuristic(&mut self) -> Result<()> {
        let g = self.g;
        let mut degree = vec![0usize; self.n];
        for (e, &(u, v)) in g.edges().iter().enumerate() {
            if self.is_edge_blocked(e) {
                continue;
            }
            degree[u] += 1;
            degree[v] += 1;
        }

        let mut heap = IndexedMinHeap::with_capacity(self.n);
        for (i, &d) in degree.iter().enumerate() {
            heap.insert(d as f64, i)?;
        }

        while !heap.is_empty() {
            let u = heap.delete_min()?;
            if self.mate[self.outer[u]].is_some() {
                continue;
            }
            let mut best: Option<usize> = None;
            for &v in g.adj_list(u)? {
                if self.is_pair_blocked(u, v)?
                    || self.outer[u] == self.outer[v]
                    || self.mate[self.outer[v]].is_some()
                {
                    continue;
                }
                if best.is_none_or(|b| degree[v] < degree[b]) {
                    best = Some(v);
                }
            }
            if let Some(v) = best {
                let (ou, ov) = (self.outer[u], self.outer[v]);
                self.mate[ou] = Some(v);
                self.mate[ov] = Some(u);
            }
        }
        Ok(())
    }
}
