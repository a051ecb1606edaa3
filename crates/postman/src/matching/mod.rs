//! Minimum-cost perfect matching (Edmonds' blossom algorithm, primal-dual).
//!
//! Purpose
//! - Pair up the odd-degree vertices of a postman instance at minimum total
//!   shortest-path cost. Works on any graph that admits a perfect matching;
//!   the solver feeds it the complete graph over the odd vertices.
//!
//! Model
//! - Each phase grows an alternating forest from the unmatched vertices over
//!   tight edges (`slack <= 0`), augmenting between trees and contracting odd
//!   cycles into blossoms. When the forest is stuck, a dual update raises even
//!   and lowers odd blossom duals by the largest step that keeps every slack
//!   non-negative, which tightens at least one new edge or frees a blossom.
//! - Blossoms with positive dual are `blocked`: they act as a single vertex
//!   and are only opened when the matching is read back.
//!
//! Layout
//! - Arena of `2n` slots: `0..n` are vertices, `n..2n` blossom ids handed out
//!   from a free list. All per-slot state is a plain `Vec` indexed by slot.
//! - `types.rs` (state and result types), `solve.rs` (entry points,
//!   bookkeeping), `forest.rs` (grow/augment/blossom/expand),
//!   `dual.rs` (dual update, cost normalization, greedy warm start).

mod dual;
mod forest;
mod solve;
mod types;

pub use types::{Label, Matching, MinCostMatching};
