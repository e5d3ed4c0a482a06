//! `Contents.json` documents for the catalog root and each image set.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const CATALOG_AUTHOR: &str = "xcode";
pub const CATALOG_VERSION: u32 = 1;
pub const UNIVERSAL_IDIOM: &str = "universal";
pub const TEMPLATE_INTENT: &str = "template";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogInfo {
    pub author: String,
    pub version: u32,
}

impl Default for CatalogInfo {
    fn default() -> Self {
        Self {
            author: CATALOG_AUTHOR.to_string(),
            version: CATALOG_VERSION,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootContents {
    pub info: CatalogInfo,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    pub filename: String,
    pub idiom: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageProperties {
    #[serde(rename = "template-rendering-intent")]
    pub template_rendering_intent: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryContents {
    pub images: Vec<ImageRecord>,
    pub info: CatalogInfo,
    pub properties: ImageProperties,
}

impl EntryContents {
    /// Single universal template image.
    pub fn template_image(filename: &str) -> Self {
        Self {
            images: vec![ImageRecord {
                filename: filename.to_string(),
                idiom: UNIVERSAL_IDIOM.to_string(),
            }],
            info: CatalogInfo::default(),
            properties: ImageProperties {
                template_rendering_intent: TEMPLATE_INTENT.to_string(),
            },
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&data).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn first_filename(&self) -> Option<&str> {
        self.images.first().map(|image| image.filename.as_str())
    }
}

pub(crate) fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .with_context(|| format!("serializing {}", path.display()))?;
    fs::write(path, json).with_context(|| format!("writing {}", path.display()))
}
