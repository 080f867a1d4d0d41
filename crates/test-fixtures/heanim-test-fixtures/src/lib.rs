//! Shared fixture documents for the workspace's tests and examples.
//!
//! Fixture XML lives under the repository-root `fixtures/` directory; the
//! manifest maps stable names to relative paths so tests never hardcode
//! filenames.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    animations: HashMap<String, String>,
}

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../fixtures")
}

pub mod animations {
    use super::*;

    /// Raw XML text of a named animation fixture.
    pub fn xml(name: &str) -> Result<String> {
        let rel = MANIFEST
            .animations
            .get(name)
            .ok_or_else(|| anyhow!("unknown animation fixture `{name}`"))?;
        let path = fixtures_root().join(rel);
        fs::read_to_string(&path)
            .with_context(|| format!("failed to read fixture at {}", path.display()))
    }

    /// All registered fixture names.
    pub fn names() -> Vec<&'static str> {
        let mut names: Vec<&'static str> =
            MANIFEST.animations.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }
}
