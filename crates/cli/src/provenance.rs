//! Provenance sidecars: a `<stem>.provenance.json` next to each CLI output,
//! recording the code revision and the inputs that produced it.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Metadata recorded next to an output file.
pub struct Payload {
    /// Command parameters (input path, solver flags).
    pub params: Value,
    /// Result summary (cost, walk length, segment count).
    pub summary: Value,
    /// Optional run label from `--tag`.
    pub tag: Option<String>,
}

impl Payload {
    pub fn new(params: Value, summary: Value) -> Self {
        Self {
            params,
            summary,
            tag: None,
        }
    }

    pub fn with_tag(mut self, tag: Option<String>) -> Self {
        self.tag = tag;
        self
    }
}

#[derive(Serialize)]
struct Sidecar<'a> {
    code_rev: String,
    version: &'static str,
    callsite: Callsite,
    tag: Option<&'a str>,
    params: &'a Value,
    summary: &'a Value,
    outputs: Vec<String>,
}

#[derive(Serialize)]
struct Callsite {
    file: &'static str,
    line: u32,
}

/// Write the sidecar for `artifact` into the artifact's directory, which must
/// already exist. The callsite is the caller of this function.
#[track_caller]
pub fn write_sidecar<P: AsRef<Path>>(artifact: P, payload: Payload) -> Result<PathBuf> {
    let artifact = artifact.as_ref();
    let caller = Location::caller();
    let sidecar = Sidecar {
        code_rev: current_git_rev(),
        version: postman::VERSION,
        callsite: Callsite {
            file: caller.file(),
            line: caller.line(),
        },
        tag: payload.tag.as_deref(),
        params: &payload.params,
        summary: &payload.summary,
        outputs: vec![artifact.display().to_string()],
    };
    let path = provenance_path(artifact);
    let bytes = serde_json::to_vec_pretty(&sidecar)?;
    fs::write(&path, bytes).with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

/// `dir/tour.json` becomes `dir/tour.provenance.json`.
fn provenance_path(artifact: &Path) -> PathBuf {
    artifact.with_extension("provenance.json")
}

/// `GIT_COMMIT` from the environment when set, else `git rev-parse`, else
/// `"unknown"`.
pub fn current_git_rev() -> String {
    std::env::var("GIT_COMMIT")
        .ok()
        .filter(|rev| !rev.is_empty())
        .or_else(git_head)
        .unwrap_or_else(|| "unknown".into())
}

fn git_head() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--verify", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let rev = String::from_utf8(output.stdout).ok()?;
    Some(rev.trim().to_owned())
}
