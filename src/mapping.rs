//! Identifier to source-image path mapping.
//!
//! Phosphor images live in per-weight folders (`regular/house.svg`,
//! `fill/house-fill.svg`); Ionicons images sit flat in one folder with the
//! variant as a file-name suffix (`home-outline.svg`).

use crate::config::ResourceRoots;
use crate::identifier::{self, IconIdentifier, Modifier};
use std::path::PathBuf;

pub const IMAGE_EXTENSION: &str = "svg";

/// Order-preserving split of identifiers into usable and unusable ones.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Validation {
    pub valid: Vec<String>,
    pub invalid: Vec<String>,
}

/// Map a raw identifier to its source image path. `None` when the identifier
/// does not parse or its provider has no configured root.
pub fn map_path(raw: &str, roots: &ResourceRoots) -> Option<PathBuf> {
    let parsed = identifier::parse(raw)?;
    map_identifier(&parsed, roots)
}

pub fn map_identifier(icon: &IconIdentifier, roots: &ResourceRoots) -> Option<PathBuf> {
    let stem = icon.path_stem();
    match icon.modifier() {
        Modifier::Weight(weight) => {
            let root = roots.phosphor.as_ref()?;
            let weight = weight.as_str();
            let file = if icon.modifier().is_default() {
                format!("{stem}.{IMAGE_EXTENSION}")
            } else {
                format!("{stem}-{weight}.{IMAGE_EXTENSION}")
            };
            Some(root.join(weight).join(file))
        }
        Modifier::Variant(variant) => {
            let root = roots.ionicons.as_ref()?;
            let file = if icon.modifier().is_default() {
                format!("{stem}.{IMAGE_EXTENSION}")
            } else {
                format!("{stem}-{}.{IMAGE_EXTENSION}", variant.as_str())
            };
            Some(root.join(file))
        }
    }
}

/// Partition identifiers by whether their source image exists on disk.
///
/// Never fails: unparseable identifiers, unconfigured roots and missing files
/// all land in `invalid`.
pub fn validate(icons: &[String], roots: &ResourceRoots) -> Validation {
    let mut validation = Validation::default();
    for icon in icons {
        let exists = map_path(icon, roots)
            .map(|path| path.is_file())
            .unwrap_or(false);
        if exists {
            validation.valid.push(icon.clone());
        } else {
            validation.invalid.push(icon.clone());
        }
    }
    validation
}
