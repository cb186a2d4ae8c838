//! Shared JSON fixtures for tests and benches, indexed by `fixtures/manifest.json`.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    timelines: HashMap<String, TimelineEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TimelineEntry {
    Path(String),
    Detailed {
        path: String,
        #[serde(default)]
        invalid: bool,
    },
}

impl TimelineEntry {
    fn as_path(&self) -> &str {
        match self {
            TimelineEntry::Path(path) => path,
            TimelineEntry::Detailed { path, .. } => path,
        }
    }

    fn is_invalid(&self) -> bool {
        matches!(self, TimelineEntry::Detailed { invalid: true, .. })
    }
}

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../fixtures")
}

fn resolve_path(rel: &str) -> PathBuf {
    fixtures_root().join(rel)
}

fn read_to_string(rel: &str) -> Result<String> {
    let path = resolve_path(rel);
    fs::read_to_string(&path)
        .with_context(|| format!("failed to read fixture at {}", path.display()))
}

fn load_json<T: DeserializeOwned>(rel: &str) -> Result<T> {
    let text = read_to_string(rel)?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse JSON fixture {rel}"))
}

fn lookup<'a, T>(map: &'a HashMap<String, T>, kind: &str, name: &str) -> Result<&'a T> {
    map.get(name)
        .ok_or_else(|| anyhow!("unknown {kind} fixture '{name}'"))
}

pub mod timelines {
    use super::*;

    /// Names of every timeline fixture, sorted.
    pub fn keys() -> Vec<String> {
        let mut keys: Vec<String> = MANIFEST.timelines.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Names of fixtures a conforming loader must accept.
    pub fn valid_keys() -> Vec<String> {
        keys()
            .into_iter()
            .filter(|k| !MANIFEST.timelines[k].is_invalid())
            .collect()
    }

    /// Names of fixtures a conforming loader must reject.
    pub fn invalid_keys() -> Vec<String> {
        keys()
            .into_iter()
            .filter(|k| MANIFEST.timelines[k].is_invalid())
            .collect()
    }

    pub fn json(name: &str) -> Result<String> {
        let entry = lookup(&MANIFEST.timelines, "timeline", name)?;
        read_to_string(entry.as_path())
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        let entry = lookup(&MANIFEST.timelines, "timeline", name)?;
        super::load_json(entry.as_path())
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        let entry = lookup(&MANIFEST.timelines, "timeline", name)?;
        Ok(resolve_path(entry.as_path()))
    }
}
