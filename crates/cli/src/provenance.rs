//! Provenance sidecars for CLI artifacts.
//!
//! Every file the CLI writes gets a `<stem>.provenance.json` next to it
//! recording the engine version, code revision, call site, the command's
//! parameters and the optional run tag.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::borrow::Cow;
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Command parameters plus the optional `--tag`.
pub struct Payload {
    pub params: Value,
    pub tag: Option<String>,
}

impl Payload {
    pub fn new(params: Value) -> Self {
        Self { params, tag: None }
    }

    pub fn tagged(mut self, tag: Option<&str>) -> Self {
        self.tag = tag.map(str::to_owned);
        self
    }
}

/// Shared by sidecars and `report`.
#[derive(Clone, Debug, Serialize)]
pub struct BuildInfo {
    pub engine_version: &'static str,
    pub code_rev: String,
}

pub fn build_info() -> BuildInfo {
    BuildInfo {
        engine_version: ringclip::VERSION,
        code_rev: git_rev(),
    }
}

#[derive(Serialize)]
struct Callsite {
    file: &'static str,
    line: u32,
}

#[derive(Serialize)]
struct Sidecar<'a> {
    build: BuildInfo,
    callsite: Callsite,
    tag: Option<&'a str>,
    params: &'a Value,
    outputs: Vec<Cow<'a, str>>,
}

/// Write the sidecar for `artifact` and return its path. The call site
/// recorded is the caller's.
#[track_caller]
pub fn write_sidecar(artifact: impl AsRef<Path>, payload: Payload) -> Result<PathBuf> {
    let caller = Location::caller();
    let artifact = artifact.as_ref();
    let doc = Sidecar {
        build: build_info(),
        callsite: Callsite {
            file: caller.file(),
            line: caller.line(),
        },
        tag: payload.tag.as_deref(),
        params: &payload.params,
        outputs: vec![artifact.to_string_lossy()],
    };
    let path = sidecar_path(artifact);
    fs::write(&path, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", path.display()))?;
    tracing::debug!(sidecar = %path.display(), "provenance");
    Ok(path)
}

fn sidecar_path(artifact: &Path) -> PathBuf {
    let stem = artifact
        .file_stem()
        .map_or(Cow::Borrowed("artifact"), |s| s.to_string_lossy());
    artifact.with_file_name(format!("{stem}.provenance.json"))
}

/// `GIT_COMMIT` (build time, then run time), else `git rev-parse HEAD`, else `"unknown"`.
fn git_rev() -> String {
    let set = |s: String| (!s.is_empty()).then_some(s);
    option_env!("GIT_COMMIT")
        .map(str::to_owned)
        .and_then(set)
        .or_else(|| std::env::var("GIT_COMMIT").ok().and_then(set))
        .or_else(git_head)
        .unwrap_or_else(|| "unknown".to_owned())
}

fn git_head() -> Option<String> {
    let out = Command::new("git").args(["rev-parse", "HEAD"]).output().ok()?;
    if !out.status.success() {
        return None;
    }
    String::from_utf8(out.stdout).ok().map(|s| s.trim().to_owned())
}
