//! Wireframe meshes: OBJ parsing, normalization and tracing as one
//! continuous path per connected component.
//!
//! Conventions
//! - Only `v` and `f` records are read; other keys (`vt`, `vn`, `o`, `g`,
//!   `usemtl`, comments) are skipped.
//! - Face tokens may be `i`, `i/t`, `i//n` or `i/t/n`; only `i` is used.
//!   Indices are 1-based, negative indices count back from the last vertex
//!   read so far.
//! - The edge graph joins consecutive face vertices (last back to first),
//!   deduplicated, with Euclidean length as cost.

use nalgebra::Vector3;
use tracing::debug;

use crate::cfg::PostmanCfg;
use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::solver::chinese_postman_with;

pub type Vec3 = Vector3<f64>;

/// Straight segment between two mesh vertices.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Line3 {
    pub start: Vec3,
    pub end: Vec3,
}

impl Line3 {
    #[inline]
    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }
}

/// Vertex positions and polygonal faces (0-based vertex indices).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Vec3>,
    pub faces: Vec<Vec<usize>>,
}

impl Mesh {
    /// Parses Wavefront OBJ text. Errors carry the 1-based line number.
    pub fn parse_obj(text: &str) -> Result<Self> {
        let mut mesh = Mesh::default();
        for (i, raw) in text.lines().enumerate() {
            let line = i + 1;
            let mut tokens = raw.split_whitespace();
            match tokens.next() {
                Some("v") => {
                    let coords = tokens
                        .take(3)
                        .map(|t| t.parse::<f64>())
                        .collect::<std::result::Result<Vec<_>, _>>()
                        .map_err(|e| parse_error(line, e.to_string()))?;
                    if coords.len() < 3 {
                        return Err(parse_error(line, "vertex needs x y z".into()));
                    }
                    mesh.vertices.push(Vec3::from_column_slice(&coords));
                }
                Some("f") => {
                    let face = tokens
                        .map(|t| face_index(t, mesh.vertices.len(), line))
                        .collect::<Result<Vec<_>>>()?;
                    if face.is_empty() {
                        return Err(parse_error(line, "empty face".into()));
                    }
                    mesh.faces.push(face);
                }
                _ => {}
            }
        }
        Ok(mesh)
    }

    /// Copy centered on the vertex mean and divided by the largest absolute
    /// input coordinate, so the mesh fits in `[-2, 2]^3` around the origin.
    pub fn normalized(&self) -> Self {
        if self.vertices.is_empty() {
            return self.clone();
        }
        let mut sum = Vec3::zeros();
        let mut max = 0.0f64;
        for v in &self.vertices {
            sum += v;
            max = max.max(v.amax());
        }
        let mean = sum / self.vertices.len() as f64;
        let scale = if max > 0.0 { max } else { 1.0 };
        let center = |v: &Vec3| (v - mean) / scale;
        Self {
            vertices: self.vertices.iter().map(center).collect(),
            faces: self.faces.clone(),
        }
    }

    /// Deduplicated undirected edges of all face boundaries, with lengths.
    pub fn edge_graph(&self) -> Result<(Graph, Vec<f64>)> {
        let mut g = Graph::new(self.vertices.len());
        let mut cost = Vec::new();
        for face in &self.faces {
            let k = face.len();
            for i in 0..k {
                let (a, b) = (face[i], face[(i + 1) % k]);
                if a == b || g.find_edge(a, b).is_some() {
                    continue;
                }
                g.add_edge(a, b)?;
                cost.push((self.vertices[a] - self.vertices[b]).norm());
            }
        }
        Ok((g, cost))
    }
}

fn parse_error(line: usize, reason: String) -> Error {
    Error::MeshParse { line, reason }
}

/// Vertex index of one face token against `count` vertices read so far.
fn face_index(token: &str, count: usize, line: usize) -> Result<usize> {
    let head = token.split('/').next().unwrap_or(token);
    let raw: i64 = head
        .parse()
        .map_err(|_| parse_error(line, format!("bad face index '{token}'")))?;
    let index = match raw {
        r if r > 0 => (r - 1) as usize,
        r if r < 0 && r.unsigned_abs() as usize <= count => count - r.unsigned_abs() as usize,
        _ => return Err(parse_error(line, format!("face index {raw} out of range"))),
    };
    if index >= count {
        return Err(parse_error(line, format!("face index {raw} out of range")));
    }
    Ok(index)
}

/// Traces every connected component of the mesh's edge graph with a Chinese
/// Postman tour and returns the segments in walk order, component by
/// component. Components without edges are skipped.
pub fn trace_mesh(mesh: &Mesh, cfg: &PostmanCfg) -> Result<Vec<Line3>> {
    let (g, cost) = mesh.edge_graph()?;
    let mut lines = Vec::new();
    for comp in g.connected_components() {
        if comp.len() < 2 {
            continue;
        }
        let (sub, parent) = g.induced_subgraph(&comp)?;
        let sub_cost: Vec<f64> = parent.iter().map(|&e| cost[e]).collect();
        let tour = chinese_postman_with(&sub, Some(&sub_cost), *cfg)?;
        debug!(
            vertices = comp.len(),
            edges = sub.num_edges(),
            steps = tour.len(),
            cost = tour.cost,
            "component traced"
        );
        lines.extend(tour.walk.windows(2).map(|w| Line3 {
            start: mesh.vertices[comp[w[0]]],
            end: mesh.vertices[comp[w[1]]],
        }));
    }
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cfg::approx_eq;

    const CUBE: &str = "\
# unit cube
o cube
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
v 0 0 1
v 1 0 1
v 1 1 1
v 0 1 1
vn 0 0 1
f 1 2 3 4
f 5 6 7 8
f 1 2 6 5
f 2 3 7 6
f 3 4 8 7
f 4 1 5 8
";

    #[test]
    fn cube_has_twelve_edges() {
        let mesh = Mesh::parse_obj(CUBE).unwrap();
        assert_eq!(mesh.vertices.len(), 8);
        assert_eq!(mesh.faces.len(), 6);
        let (g, cost) = mesh.edge_graph().unwrap();
        assert_eq!(g.num_edges(), 12);
        assert!(cost.iter().all(|&c| approx_eq(c, 1.0)));
    }

    #[test]
    fn cube_trace_is_one_continuous_path() {
        let mesh = Mesh::parse_obj(CUBE).unwrap();
        let lines = trace_mesh(&mesh, &PostmanCfg::default()).unwrap();
        // 8 odd corners: 4 extra edges on top of 12.
        assert_eq!(lines.len(), 16);
        for w in lines.windows(2) {
            assert_eq!(w[0].end, w[1].start);
        }
        assert_eq!(lines[0].start, lines[15].end);
        let total: f64 = lines.iter().map(Line3::length).sum();
        assert!(approx_eq(total, 16.0));
    }

    #[test]
    fn face_token_forms() {
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nv 0 0 1\nf 1/1/1 2//3 3/2\nf -1 -2 -3\n";
        let mesh = Mesh::parse_obj(text).unwrap();
        assert_eq!(mesh.faces, vec![vec![0, 1, 2], vec![3, 2, 1]]);
    }

    #[test]
    fn malformed_lines_report_their_number() {
        assert_eq!(
            Mesh::parse_obj("v 0 0 0\nv 1 2\n"),
            Err(Error::MeshParse {
                line: 2,
                reason: "vertex needs x y z".into()
            })
        );
        assert!(matches!(
            Mesh::parse_obj("v 0 0 0\nf 1 2\n"),
            Err(Error::MeshParse { line: 2, .. })
        ));
        assert!(matches!(
            Mesh::parse_obj("v 0 0 0\nf 0\n"),
            Err(Error::MeshParse { line: 2, .. })
        ));
        assert!(matches!(
            Mesh::parse_obj("v a 0 0\n"),
            Err(Error::MeshParse { line: 1, .. })
        ));
    }

    #[test]
    fn normalized_is_centered_and_scaled() {
        let mesh = Mesh::parse_obj("v 2 0 0\nv 4 0 0\nv 3 3 0\n").unwrap();
        let n = mesh.normalized();
        let mean: Vec3 = n.vertices.iter().sum::<Vec3>() / 3.0;
        assert!(mean.norm() < 1e-12);
        assert!(approx_eq(n.vertices[0].x, -0.25));
        assert!(approx_eq(n.vertices[2].y, 0.5));
        assert!(Mesh::default().normalized().vertices.is_empty());
    }

    #[test]
    fn components_are_traced_separately() {
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nv 5 5 5\nv 6 5 5\nv 5 6 5\nv 9 9 9\n\
                    f 1 2 3\nf 4 5 6\n";
        let mesh = Mesh::parse_obj(text).unwrap();
        let lines = trace_mesh(&mesh, &PostmanCfg::default()).unwrap();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0].start, mesh.vertices[0]);
        assert_eq!(lines[2].end, mesh.vertices[0]);
        assert_eq!(lines[3].start, mesh.vertices[3]);
    }
}
