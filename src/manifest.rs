//! Scan manifest hand-off between the `scan` and `generate` phases.
//!
//! The manifest is a JSON object whose `icons` array lists identifiers in scan
//! order. Object keys are emitted sorted; the array itself is never re-sorted.
//! Loading validates the document against an embedded JSON Schema before
//! deserializing so malformed manifests fail with a precise message.

use anyhow::{Context, Result, anyhow, bail};
use jsonschema::JSONSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

static MANIFEST_SCHEMA: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "type": "object",
        "required": ["icons"],
        "properties": {
            "icons": {
                "type": "array",
                "items": { "type": "string" }
            }
        }
    })
});

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub icons: Vec<String>,
}

impl Manifest {
    pub fn new(icons: Vec<String>) -> Self {
        Self { icons }
    }

    /// Serialize with sorted object keys.
    pub fn to_json(&self) -> Result<String> {
        // serde_json's default map is ordered by key.
        let value = serde_json::to_value(self).context("serializing manifest")?;
        serde_json::to_string_pretty(&value).context("rendering manifest")
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        fs::write(path, self.to_json()?)
            .with_context(|| format!("writing manifest {}", path.display()))
    }

    /// Read and validate a manifest from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading manifest {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("loading manifest {}", path.display()))
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(raw).context("parsing manifest JSON")?;
        validate_manifest(&value)?;
        serde_json::from_value(value).context("decoding manifest")
    }
}

fn validate_manifest(value: &Value) -> Result<()> {
    let compiled = JSONSchema::compile(&MANIFEST_SCHEMA)
        .map_err(|err| anyhow!("compiling manifest schema: {err}"))?;
    if let Err(errors) = compiled.validate(value) {
        let details = errors
            .map(|err| err.to_string())
            .collect::<Vec<_>>()
            .join("\n");
        bail!("manifest failed schema validation:\n{}", details);
    }
    Ok(())
}

/// Render the manifest JSON for a list of identifiers.
pub fn manifest_json(icons: &[String]) -> Result<String> {
    Manifest::new(icons.to_vec()).to_json()
}
