//! Run-time lookup of generated icons.
//!
//! A [`RuntimeResolver`] turns an identifier into its canonical asset name and
//! probes an ordered list of locations for it:
//!
//! 1. the catalog container inside the hint location,
//! 2. the catalog container inside the default location,
//! 3. the hint location itself,
//! 4. the default location itself.
//!
//! Locations that are not directories are dropped before probing. The first
//! location containing the asset wins.
//!
//! [`CatalogStore`] only reads the uncompiled `GeneratedIcons.xcassets` tree
//! that the build leaves beside the compiled `GeneratedIcons.bundle`. It
//! cannot read the compiled bundle. Loading compiled assets takes a
//! platform-specific [`ImageStore`] passed through
//! [`RuntimeResolver::with_store`].
//!
//! For call sites that cannot thread a resolver through, a process-wide
//! default location can be set once at start-up with
//! [`set_default_location`]; [`resolve_image`] uses it.

use crate::catalog::contents::EntryContents;
use crate::catalog::{CATALOG_DIR_NAME, CONTENTS_FILE, imageset_dir_name};
use crate::identifier;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::debug;

static DEFAULT_LOCATION: OnceLock<PathBuf> = OnceLock::new();

/// An image found in one of the candidate locations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocatedImage {
    pub asset_name: String,
    pub container: PathBuf,
    pub path: PathBuf,
    pub data: Vec<u8>,
}

/// Existence check and loader for assets stored in a location.
pub trait ImageStore {
    fn contains(&self, location: &Path, asset_name: &str) -> bool;
    fn load(&self, location: &Path, asset_name: &str) -> Option<LocatedImage>;
}

/// Reads uncompiled catalogs: `<location>/<asset>.imageset/Contents.json`.
#[derive(Clone, Copy, Debug, Default)]
pub struct CatalogStore;

impl ImageStore for CatalogStore {
    fn contains(&self, location: &Path, asset_name: &str) -> bool {
        location
            .join(imageset_dir_name(asset_name))
            .join(CONTENTS_FILE)
            .is_file()
    }

    fn load(&self, location: &Path, asset_name: &str) -> Option<LocatedImage> {
        let imageset = location.join(imageset_dir_name(asset_name));
        let contents = EntryContents::load(&imageset.join(CONTENTS_FILE)).ok()?;
        let path = imageset.join(contents.first_filename()?);
        let data = fs::read(&path).ok()?;
        Some(LocatedImage {
            asset_name: asset_name.to_string(),
            container: location.to_path_buf(),
            path,
            data,
        })
    }
}

pub struct RuntimeResolver<S = CatalogStore> {
    default_location: PathBuf,
    store: S,
}

impl RuntimeResolver<CatalogStore> {
    pub fn new(default_location: impl Into<PathBuf>) -> Self {
        Self::with_store(default_location, CatalogStore)
    }

    /// Resolver using the process-wide default location.
    pub fn from_process_default() -> Self {
        Self::new(default_location())
    }
}

impl<S: ImageStore> RuntimeResolver<S> {
    pub fn with_store(default_location: impl Into<PathBuf>, store: S) -> Self {
        Self {
            default_location: default_location.into(),
            store,
        }
    }

    pub fn default_location(&self) -> &Path {
        &self.default_location
    }

    /// Candidate locations for `hint`, in probe order, limited to existing
    /// directories. Without a hint the default location stands in for it.
    pub fn candidate_locations(&self, hint: Option<&Path>) -> Vec<PathBuf> {
        let hint = hint.unwrap_or(self.default_location.as_path());
        [
            hint.join(CATALOG_DIR_NAME),
            self.default_location.join(CATALOG_DIR_NAME),
            hint.to_path_buf(),
            self.default_location.clone(),
        ]
        .into_iter()
        .filter(|candidate| candidate.is_dir())
        .collect()
    }

    pub fn resolve_image(&self, raw: &str, hint: Option<&Path>) -> Option<LocatedImage> {
        let asset_name = identifier::parse(raw)?.asset_name();
        let found = self
            .candidate_locations(hint)
            .into_iter()
            .find(|location| self.store.contains(location, &asset_name));
        match found {
            Some(location) => {
                debug!("{raw} found as {asset_name} in {}", location.display());
                self.store.load(&location, &asset_name)
            }
            None => {
                debug!("{raw} ({asset_name}) not found in any candidate location");
                None
            }
        }
    }
}

/// Set the process-wide default location. Only the first call succeeds; later
/// calls hand the rejected path back. Call during start-up, before any lookup.
pub fn set_default_location(location: impl Into<PathBuf>) -> Result<(), PathBuf> {
    DEFAULT_LOCATION.set(location.into())
}

/// The process-wide default location: the configured one, else the directory
/// holding the current executable, else the working directory.
pub fn default_location() -> PathBuf {
    if let Some(location) = DEFAULT_LOCATION.get() {
        return location.clone();
    }
    env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Resolve `raw` against the process-wide default location.
pub fn resolve_image(raw: &str, hint: Option<&Path>) -> Option<LocatedImage> {
    RuntimeResolver::from_process_default().resolve_image(raw, hint)
}
