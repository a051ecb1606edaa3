//! Alternating forest: growth, augmentation, blossom contraction and expansion.

use std::collections::VecDeque;

use crate::cfg::greater;
use crate::error::{Error, Result};

use super::types::{Label, Matching};

impl<'g> Matching<'g> {
    /// Grows an alternating forest from all unmatched outermost slots.
    ///
    /// Explores tight edges out of even blossoms in BFS order. An edge to an
    /// unlabeled blossom extends the tree by an odd/even pair; an edge between
    /// two trees augments; an edge inside one tree contracts a blossom.
    /// Sets `perfect` when every vertex ends up matched.
    pub(super) fn grow(&mut self) -> Result<()> {
        self.reset();
        let g = self.g;

        while let Some(front) = self.forest_list.pop_front() {
            let w = self.outer[front];

            // w may be a blossom: scan the edges of every vertex inside it.
            let mut restart = false;
            let mut k = 0;
            while k < self.deep[w].len() && !restart {
                let u = self.deep[w][k];
                k += 1;

                for &v in g.adj_list(u)? {
                    if self.is_pair_blocked(u, v)? {
                        continue;
                    }
                    let ov = self.outer[v];
                    match self.label[ov] {
                        Label::Odd => continue,
                        Label::Unlabeled => {
                            let Some(vm) = self.mate[ov] else {
                                return Err(Error::MatchingInvariant("unlabeled and unmatched"));
                            };
                            let ou = self.outer[u];
                            let ovm = self.outer[vm];

                            self.forest[ov] = Some(u);
                            self.label[ov] = Label::Odd;
                            self.root[ov] = self.root[ou];
                            self.forest[ovm] = Some(v);
                            self.label[ovm] = Label::Even;
                            self.root[ovm] = self.root[ou];

                            if !self.visited[ovm] {
                                self.forest_list.push_back(vm);
                                self.visited[ovm] = true;
                            }
                        }
                        Label::Even if self.root[ov] != self.root[self.outer[u]] => {
                            self.augment(u, v)?;
                            self.reset();
                            restart = true;
                            break;
                        }
                        Label::Even if self.outer[u] != ov => {
                            let b = self.blossom(u, v)?;
                            self.forest_list.push_front(b);
                            self.visited[b] = true;
                            restart = true;
                            break;
                        }
                        Label::Even => {}
                    }
                }
            }
        }

        self.perfect = (0..self.n).all(|i| self.mate[self.outer[i]].is_some());
        Ok(())
    }

    /// Flips the matching along `root(u) .. u - v .. root(v)`.
    pub(super) fn augment(&mut self, u: usize, v: usize) -> Result<()> {
        let p = self.outer[u];
        let q = self.outer[v];
        self.mate[p] = Some(q);
        self.mate[q] = Some(p);
        self.expand(p, false)?;
        self.expand(q, false)?;

        self.augment_to_root(p)?;
        self.augment_to_root(q)
    }

    fn augment_to_root(&mut self, start: usize) -> Result<()> {
        let mut p = start;
        while let Some(fp) = self.forest[p] {
            let q = self.outer[fp];
            let Some(fq) = self.forest[q] else {
                return Err(Error::MatchingInvariant("odd blossom without parent"));
            };
            p = self.outer[fq];

            self.mate[p] = Some(q);
            self.mate[q] = Some(p);
            self.expand(p, false)?;
            self.expand(q, false)?;
        }
        Ok(())
    }

    /// Resets the forest: frees unblocked blossoms, labels unmatched slots even
    /// and queues them as roots.
    pub(super) fn reset(&mut self) {
        for i in 0..2 * self.n {
            self.forest[i] = None;
            self.root[i] = i;

            if i >= self.n && self.active[i] && self.outer[i] == i {
                self.destroy_blossom(i);
            }
        }

        self.visited.fill(false);
        self.forest_list.clear();
        for i in 0..self.n {
            let oi = self.outer[i];
            if self.mate[oi].is_none() {
                self.label[oi] = Label::Even;
                if !self.visited[oi] {
                    self.forest_list.push_back(i);
                }
                self.visited[oi] = true;
            } else {
                self.label[oi] = Label::Unlabeled;
            }
        }
    }

    /// Contracts the odd cycle `tip .. u - v .. tip` into a new even blossom,
    /// where `tip` is the first common ancestor of `u` and `v`.
    pub(super) fn blossom(&mut self, u: usize, v: usize) -> Result<usize> {
        let t = self.take_blossom_index()?;

        let mut in_path = vec![false; 2 * self.n];
        let mut x = Some(u);
        while let Some(y) = x {
            let oy = self.outer[y];
            in_path[oy] = true;
            x = self.forest[oy];
        }

        let mut tip = self.outer[v];
        while !in_path[tip] {
            tip = self.outer[self.parent_of(tip)?];
        }

        // Odd cycle: tip .. outer[u] (reversed walk up from u), then outer[v] .. tip.
        let mut circuit = VecDeque::new();
        let mut x = self.outer[u];
        circuit.push_front(x);
        while x != tip {
            x = self.outer[self.parent_of(x)?];
            circuit.push_front(x);
        }
        let mut x = self.outer[v];
        while x != tip {
            circuit.push_back(x);
            x = self.outer[self.parent_of(x)?];
        }

        self.deep[t].clear();
        for &s in &circuit {
            self.outer[s] = t;
            for j in 0..self.deep[s].len() {
                let d = self.deep[s][j];
                self.deep[t].push(d);
                self.outer[d] = t;
            }
        }
        self.shallow[t] = circuit;

        self.forest[t] = self.forest[tip];
        self.label[t] = Label::Even;
        self.root[t] = self.root[tip];
        self.active[t] = true;
        self.outer[t] = t;
        self.mate[t] = self.mate[tip];

        Ok(t)
    }

    #[inline]
    fn parent_of(&self, x: usize) -> Result<usize> {
        self.forest[x].ok_or(Error::MatchingInvariant("blossom walk left the tree"))
    }

    /// Opens blossom `u` (and nested blossoms) so internal mates agree with
    /// `u`'s external mate.
    ///
    /// The external edge is the usable edge of minimum index between `u` and
    /// its mate's blossom; both sides of a pair pick the same one. Blocked
    /// blossoms stay closed unless `expand_blocked` is set.
    pub(super) fn expand(&mut self, u: usize, expand_blocked: bool) -> Result<()> {
        let mut work = vec![u];
        while let Some(u) = work.pop() {
            let Some(mu) = self.mate[u] else {
                return Err(Error::MatchingInvariant("expanding an unmatched slot"));
            };
            let v = self.outer[mu];

            let mut best: Option<(usize, usize, usize)> = None;
            for &di in &self.deep[u] {
                for &dj in &self.deep[v] {
                    if let Some(e) = self.usable_edge(di, dj) {
                        if best.is_none_or(|(b, _, _)| e < b) {
                            best = Some((e, di, dj));
                        }
                    }
                }
            }
            let Some((_, p, q)) = best else {
                return Err(Error::MatchingInvariant("no usable edge between mates"));
            };
            self.mate[u] = Some(q);
            self.mate[v] = Some(p);

            if u < self.n || (self.blocked[u] && !expand_blocked) {
                continue;
            }

            // Rotate the cycle so the child holding p becomes the tip.
            let at = self.shallow[u]
                .iter()
                .position(|&s| self.deep[s].contains(&p))
                .ok_or(Error::MatchingInvariant("mate endpoint not inside blossom"))?;
            self.shallow[u].rotate_left(at);

            let len = self.shallow[u].len();
            let tip = self.shallow[u][0];
            self.mate[tip] = self.mate[u];
            let mut i = 1;
            while i + 1 < len {
                let (a, b) = (self.shallow[u][i], self.shallow[u][i + 1]);
                self.mate[a] = Some(b);
                self.mate[b] = Some(a);
                i += 2;
            }

            for k in 0..len {
                let s = self.shallow[u][k];
                self.outer[s] = s;
                for j in 0..self.deep[s].len() {
                    let d = self.deep[s][j];
                    self.outer[d] = s;
                }
            }
            self.active[u] = false;
            self.release_blossom_index(u);

            // Children in cycle order: push reversed so the tip is handled first.
            work.extend(self.shallow[u].iter().rev().copied());
        }
        Ok(())
    }

    /// Dissolves blossom `t` and its unblocked sub-blossoms without touching
    /// mates of the children. Blocked blossoms with positive dual survive.
    pub(super) fn destroy_blossom(&mut self, t: usize) {
        // (slot, children already scheduled)
        let mut work = vec![(t, false)];
        while let Some((t, scheduled)) = work.pop() {
            if scheduled {
                self.active[t] = false;
                self.blocked[t] = false;
                self.release_blossom_index(t);
                self.mate[t] = None;
                continue;
            }
            if t < self.n || (self.blocked[t] && greater(self.dual[t], 0.0)) {
                continue;
            }

            for k in 0..self.shallow[t].len() {
                let s = self.shallow[t][k];
                self.outer[s] = s;
                for j in 0..self.deep[s].len() {
                    let d = self.deep[s][j];
                    self.outer[d] = s;
                }
            }
            work.push((t, true));
            work.extend(self.shallow[t].iter().rev().map(|&s| (s, false)));
        }
    }
}
