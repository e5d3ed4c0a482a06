//! Icon catalog tooling.
//!
//! Build time: [`scanner`] finds `Image("ph.house")`-style references in a
//! source tree, [`mapping`] locates the matching SVGs under the provider
//! resource roots, and [`catalog`] writes an asset catalog that the platform
//! compiler ([`compiler`]) turns into a bundle. [`pipeline`] strings these
//! together for the `icon-catalog` binary.
//!
//! Run time: [`runtime`] resolves the same identifiers back to images.

pub mod catalog;
pub mod compiler;
pub mod config;
pub mod identifier;
pub mod manifest;
pub mod mapping;
pub mod pipeline;
pub mod platform;
pub mod runtime;
pub mod scanner;

pub use catalog::{CatalogEntry, GeneratedCatalog};
pub use compiler::{ActoolCompiler, CatalogCompiler, CompileOutcome, CompileRequest};
pub use config::{Config, ResourceRoots};
pub use identifier::{IconIdentifier, IoniconsVariant, Modifier, PhosphorWeight, Provider, parse};
pub use manifest::{Manifest, manifest_json};
pub use mapping::{Validation, map_path, validate};
pub use pipeline::{BuildOptions, BuildOutcome, GenerateOptions, ScanOptions};
pub use platform::{PlatformResolver, PlatformTarget};
pub use runtime::{
    CatalogStore, ImageStore, LocatedImage, RuntimeResolver, resolve_image, set_default_location,
};
pub use scanner::{scan, scan_tree};
