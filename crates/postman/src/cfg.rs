//! Tolerances and solver configuration.
//!
//! Policy
//! - One tolerance `EPS` is shared by the heap, Dijkstra and the matching so
//!   that near-equal keys and slacks tie-break the same way everywhere.
//! - Knobs that change the amount of work (not the result) live in small
//!   `Copy` config structs with a `Default`.

/// Absolute tolerance for floating point comparisons of costs, keys and slacks.
pub const EPS: f64 = 1e-6;

/// `a > b` beyond tolerance.
#[inline]
pub fn greater(a: f64, b: f64) -> bool {
    a > b + EPS
}

/// `a < b` beyond tolerance.
#[inline]
pub fn less(a: f64, b: f64) -> bool {
    a < b - EPS
}

/// `|a - b| <= EPS`.
#[inline]
pub fn approx_eq(a: f64, b: f64) -> bool {
    !greater(a, b) && !less(a, b)
}

/// Matching configuration.
#[derive(Clone, Copy, Debug)]
pub struct MatchingCfg {
    /// Run the greedy degree-ordered warm start before each forest growth.
    /// Only affects running time; the optimum is the same either way.
    pub greedy_warm_start: bool,
}

impl Default for MatchingCfg {
    fn default() -> Self {
        Self {
            greedy_warm_start: true,
        }
    }
}

/// Chinese Postman solver configuration.
#[derive(Clone, Copy, Debug, Default)]
pub struct PostmanCfg {
    pub matching: MatchingCfg,
}
