use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use postman::mesh::{trace_mesh, Line3, Mesh};
use postman::{chinese_postman_with, MatchingCfg, PostmanCfg};
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing_subscriber::fmt::SubscriberBuilder;

mod graph_file;
mod provenance;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Chinese Postman solver and wireframe tracer")]
struct Cmd {
    /// Optional run label; propagated to provenance sidecars and logs
    #[arg(long)]
    tag: Option<String>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Solve a graph given as `n`, `m`, then `m` lines `u v [cost]`
    Solve {
        #[arg(long)]
        input: String,
        /// Write the tour as JSON (plus a provenance sidecar)
        #[arg(long)]
        out: Option<String>,
        /// Skip the greedy matching warm start
        #[arg(long)]
        no_warm_start: bool,
    },
    /// Trace an OBJ mesh as one continuous path per connected component
    Mesh {
        #[arg(long)]
        input: String,
        #[arg(long)]
        out: Option<String>,
        /// Keep raw coordinates instead of centering and scaling
        #[arg(long)]
        no_normalize: bool,
        #[arg(long)]
        no_warm_start: bool,
    },
    /// Print a small provenance JSON block
    Report,
}

#[derive(Serialize)]
struct TourOutput {
    cost: f64,
    walk: Vec<usize>,
    vertices: usize,
    edges: usize,
    multiplicity: Vec<usize>,
}

#[derive(Serialize)]
struct TraceOutput {
    vertices: usize,
    faces: usize,
    length: f64,
    segments: Vec<[[f64; 3]; 2]>,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let Cmd { tag, action } = Cmd::parse();
    match action {
        Action::Solve {
            input,
            out,
            no_warm_start,
        } => solve(&input, out.as_deref(), no_warm_start, tag),
        Action::Mesh {
            input,
            out,
            no_normalize,
            no_warm_start,
        } => mesh(&input, out.as_deref(), no_normalize, no_warm_start, tag),
        Action::Report => report(tag),
    }
}

fn postman_cfg(no_warm_start: bool) -> PostmanCfg {
    PostmanCfg {
        matching: MatchingCfg {
            greedy_warm_start: !no_warm_start,
        },
    }
}

fn solve(input: &str, out: Option<&str>, no_warm_start: bool, tag: Option<String>) -> Result<()> {
    tracing::info!(input, out = ?out, no_warm_start, tag = ?tag, "solve");
    let inst = graph_file::read_instance(input)?;
    let tour = chinese_postman_with(&inst.graph, Some(&inst.cost), postman_cfg(no_warm_start))
        .with_context(|| format!("solving {input}"))?;

    println!("Solution cost: {}", tour.cost);
    println!("Solution:");
    let walk: Vec<String> = tour.walk.iter().map(usize::to_string).collect();
    println!("{}", walk.join(" "));

    if let Some(out) = out {
        let doc = TourOutput {
            cost: tour.cost,
            walk: tour.walk.clone(),
            vertices: inst.graph.num_vertices(),
            edges: inst.graph.num_edges(),
            multiplicity: tour.multiplicity.clone(),
        };
        write_json(out, &doc)?;
        let payload = provenance::Payload::new(
            serde_json::json!({ "input": input, "no_warm_start": no_warm_start }),
            serde_json::json!({ "cost": tour.cost, "steps": tour.len() }),
        )
        .with_tag(tag);
        let sidecar = provenance::write_sidecar(out, payload)?;
        tracing::info!(out, sidecar = %sidecar.display(), "tour written");
    }
    Ok(())
}

fn mesh(
    input: &str,
    out: Option<&str>,
    no_normalize: bool,
    no_warm_start: bool,
    tag: Option<String>,
) -> Result<()> {
    tracing::info!(input, out = ?out, no_normalize, tag = ?tag, "mesh");
    let text = fs::read_to_string(input).with_context(|| format!("reading {input}"))?;
    let raw = Mesh::parse_obj(&text).with_context(|| format!("parsing {input}"))?;
    let mesh = if no_normalize { raw } else { raw.normalized() };
    let lines = trace_mesh(&mesh, &postman_cfg(no_warm_start))
        .with_context(|| format!("tracing {input}"))?;
    let length: f64 = lines.iter().map(Line3::length).sum();

    println!("Segments: {}", lines.len());
    println!("Length: {length}");

    if let Some(out) = out {
        let doc = TraceOutput {
            vertices: mesh.vertices.len(),
            faces: mesh.faces.len(),
            length,
            segments: lines
                .iter()
                .map(|l| {
                    [
                        [l.start.x, l.start.y, l.start.z],
                        [l.end.x, l.end.y, l.end.z],
                    ]
                })
                .collect(),
        };
        write_json(out, &doc)?;
        let payload = provenance::Payload::new(
            serde_json::json!({
                "input": input,
                "no_normalize": no_normalize,
                "no_warm_start": no_warm_start
            }),
            serde_json::json!({ "segments": lines.len(), "length": length }),
        )
        .with_tag(tag);
        let sidecar = provenance::write_sidecar(out, payload)?;
        tracing::info!(out, sidecar = %sidecar.display(), "trace written");
    }
    Ok(())
}

fn write_json<T: Serialize>(out: &str, doc: &T) -> Result<()> {
    let out_path = Path::new(out);
    if let Some(parent) = out_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    fs::write(out_path, serde_json::to_vec_pretty(doc)?).with_context(|| format!("writing {out}"))
}

fn report(tag: Option<String>) -> Result<()> {
    let obj = serde_json::json!({
        "code_rev": provenance::current_git_rev(),
        "version": postman::VERSION,
        "tag": tag,
        "params": {},
        "outputs": []
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use tempfile::tempdir;

    #[test]
    fn solve_writes_tour_and_sidecar() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("path.txt");
        fs::write(&input, "4\n3\n0 1\n1 2\n2 3\n").unwrap();
        let out = dir.path().join("out").join("tour.json");
        solve(
            input.to_str().unwrap(),
            Some(out.to_str().unwrap()),
            false,
            None,
        )
        .unwrap();

        let doc: Value = serde_json::from_slice(&fs::read(&out).unwrap()).unwrap();
        assert_eq!(doc["cost"], 6.0);
        assert_eq!(doc["walk"], serde_json::json!([0, 1, 2, 3, 2, 1, 0]));
        assert_eq!(doc["edges"], 3);
        assert!(dir.path().join("out").join("tour.provenance.json").exists());
    }

    #[test]
    fn solve_reports_disconnected_input() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("split.txt");
        fs::write(&input, "4\n2\n0 1\n2 3\n").unwrap();
        let err = solve(input.to_str().unwrap(), None, true, None).unwrap_err();
        assert!(format!("{err:#}").contains("not connected"));
    }

    #[test]
    fn mesh_traces_a_square() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("square.obj");
        fs::write(&input, "v 0 0 0\nv 2 0 0\nv 2 2 0\nv 0 2 0\nf 1 2 3 4\n").unwrap();
        let out = dir.path().join("square.json");
        mesh(
            input.to_str().unwrap(),
            Some(out.to_str().unwrap()),
            true,
            false,
            Some("unit".into()),
        )
        .unwrap();
        let doc: Value = serde_json::from_slice(&fs::read(&out).unwrap()).unwrap();
        assert_eq!(doc["segments"].as_array().unwrap().len(), 4);
        assert_eq!(doc["length"], 8.0);
        let sidecar = dir.path().join("square.provenance.json");
        let prov: Value = serde_json::from_slice(&fs::read(sidecar).unwrap()).unwrap();
        assert_eq!(prov["tag"], "unit");
    }
}
