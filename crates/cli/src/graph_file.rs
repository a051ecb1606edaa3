//! Weighted-graph text format.
//!
//! ```text
//! n          # vertex count
//! m          # edge count
//! u v [c]    # m edge lines, 0-based endpoints, cost defaults to 1
//! ```
//!
//! Blank lines and `#` comments are ignored. A repeated `{u, v}` collapses
//! onto the first edge and keeps the last cost.

use anyhow::{anyhow, bail, Context, Result};
use postman::Graph;
use std::fs;
use std::path::Path;

/// Graph plus one cost per edge index.
#[derive(Debug)]
pub struct Instance {
    pub graph: Graph,
    pub cost: Vec<f64>,
}

pub fn read_instance<P: AsRef<Path>>(path: P) -> Result<Instance> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    parse_instance(&text).with_context(|| format!("parsing {}", path.display()))
}

pub fn parse_instance(text: &str) -> Result<Instance> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.split('#').next().unwrap_or("").trim()))
        .filter(|(_, l)| !l.is_empty());

    let n = header(lines.next(), "vertex count")?;
    let m = header(lines.next(), "edge count")?;

    let mut graph = Graph::new(n);
    let mut cost = Vec::with_capacity(m);
    for k in 0..m {
        let (line, text) = lines
            .next()
            .ok_or_else(|| anyhow!("expected {m} edge lines, found {k}"))?;
        let fields: Vec<&str> = text.split_whitespace().collect();
        if !(2..=3).contains(&fields.len()) {
            bail!("line {line}: expected 'u v [cost]', got '{text}'");
        }
        let u: usize = fields[0]
            .parse()
            .with_context(|| format!("line {line}: bad endpoint '{}'", fields[0]))?;
        let v: usize = fields[1]
            .parse()
            .with_context(|| format!("line {line}: bad endpoint '{}'", fields[1]))?;
        let c: f64 = match fields.get(2) {
            Some(s) => s
                .parse()
                .with_context(|| format!("line {line}: bad cost '{s}'"))?,
            None => 1.0,
        };
        let e = graph
            .add_edge(u, v)
            .with_context(|| format!("line {line}: edge {u} {v}"))?;
        if e == cost.len() {
            cost.push(c);
        } else {
            cost[e] = c;
        }
    }
    Ok(Instance { graph, cost })
}

fn header(entry: Option<(usize, &str)>, what: &str) -> Result<usize> {
    let (line, text) = entry.ok_or_else(|| anyhow!("missing {what}"))?;
    text.parse()
        .with_context(|| format!("line {line}: bad {what} '{text}'"))
}
