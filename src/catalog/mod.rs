//! Asset catalog generation.
//!
//! This module writes the `GeneratedIcons.xcassets` tree consumed by the
//! platform catalog compiler: one `<asset>.imageset` folder per icon holding
//! the source SVG and its `Contents.json`, plus a root `Contents.json`. The
//! tree is rebuilt from scratch on every run.

pub mod contents;
pub mod generator;

pub use contents::{CatalogInfo, EntryContents, ImageRecord, RootContents};
pub use generator::{CatalogEntry, GeneratedCatalog, generate, process_outline_svg};

/// Directory name of the generated catalog inside the output directory.
pub const CATALOG_DIR_NAME: &str = "GeneratedIcons.xcassets";

/// Directory name of the compiled bundle inside the output directory.
pub const BUNDLE_DIR_NAME: &str = "GeneratedIcons.bundle";

/// Suffix for per-icon folders inside the catalog.
pub const IMAGESET_EXTENSION: &str = "imageset";

/// Per-directory manifest file name.
pub const CONTENTS_FILE: &str = "Contents.json";

pub fn imageset_dir_name(asset_name: &str) -> String {
    format!("{asset_name}.{IMAGESET_EXTENSION}")
}
