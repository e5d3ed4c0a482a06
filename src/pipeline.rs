//! The `build`, `scan` and `generate` operations.
//!
//! Each operation runs synchronously from start to finish. Invalid icons and
//! compiler failures are reported as warnings and never fail a run; only
//! unreadable inputs on the `generate` path and I/O errors while writing the
//! catalog are fatal.

use crate::catalog::{self, BUNDLE_DIR_NAME, GeneratedCatalog};
use crate::compiler::{CatalogCompiler, CompileOutcome, CompileRequest};
use crate::config::{Config, ResourceRoots};
use crate::manifest::Manifest;
use crate::mapping;
use crate::platform::PlatformResolver;
use crate::scanner;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Clone, Debug, Default)]
pub struct BuildOptions {
    pub source: PathBuf,
    pub output: PathBuf,
    pub config: Option<PathBuf>,
    pub resources: Option<PathBuf>,
    pub platform: Option<String>,
    pub deployment_target: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct ScanOptions {
    pub source: PathBuf,
    pub output: PathBuf,
}

#[derive(Clone, Debug, Default)]
pub struct GenerateOptions {
    pub manifest: PathBuf,
    pub output: PathBuf,
    pub config: PathBuf,
    pub platform: Option<String>,
    pub deployment_target: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BuildOutcome {
    /// No icon references were found.
    NoIcons,
    /// References were found but none maps to an existing image.
    NothingValid { invalid: Vec<String> },
    Generated {
        catalog: GeneratedCatalog,
        invalid: Vec<String>,
        /// Bundle directory when the compiler ran and succeeded.
        compiled: Option<PathBuf>,
    },
}

/// Scan sources and generate the catalog in one pass.
///
/// An unreadable config is reported and ignored here; the resources
/// directory (if any) still supplies default roots.
pub fn build(options: &BuildOptions, compiler: Option<&dyn CatalogCompiler>) -> Result<BuildOutcome> {
    let icons = scanner::scan_tree(&options.source);
    info!(
        "found {} icon reference(s) under {}",
        icons.len(),
        options.source.display()
    );
    if icons.is_empty() {
        return Ok(BuildOutcome::NoIcons);
    }

    let config = match options.config.as_deref() {
        Some(path) => match Config::load(path) {
            Ok(config) => Some(config),
            Err(err) => {
                warn!("ignoring config: {err:#}");
                None
            }
        },
        None => None,
    };
    let roots = ResourceRoots::resolve(config.as_ref(), options.resources.as_deref());

    generate_from_icons(
        &icons,
        &roots,
        &options.output,
        options.platform.as_deref(),
        options.deployment_target.as_deref(),
        compiler,
    )
}

/// Scan sources and write the manifest. Returns the identifiers written.
pub fn scan(options: &ScanOptions) -> Result<Vec<String>> {
    let icons = scanner::scan_tree(&options.source);
    Manifest::new(icons.clone()).write(&options.output)?;
    info!(
        "wrote {} icon reference(s) to {}",
        icons.len(),
        options.output.display()
    );
    Ok(icons)
}

/// Generate the catalog from a manifest written by [`scan`].
pub fn generate(
    options: &GenerateOptions,
    compiler: Option<&dyn CatalogCompiler>,
) -> Result<BuildOutcome> {
    let manifest = Manifest::load(&options.manifest).context("failed to read manifest")?;
    let config = Config::load(&options.config).context("failed to read config")?;
    if manifest.icons.is_empty() {
        return Ok(BuildOutcome::NoIcons);
    }
    let roots = ResourceRoots::resolve(Some(&config), None);

    generate_from_icons(
        &manifest.icons,
        &roots,
        &options.output,
        options.platform.as_deref(),
        options.deployment_target.as_deref(),
        compiler,
    )
}

fn generate_from_icons(
    icons: &[String],
    roots: &ResourceRoots,
    output: &Path,
    platform: Option<&str>,
    deployment_target: Option<&str>,
    compiler: Option<&dyn CatalogCompiler>,
) -> Result<BuildOutcome> {
    let validation = mapping::validate(icons, roots);
    for icon in &validation.invalid {
        warn!("invalid icon name or missing source file: {icon}");
    }
    if validation.valid.is_empty() {
        info!("no valid icons; skipping catalog generation");
        return Ok(BuildOutcome::NothingValid {
            invalid: validation.invalid,
        });
    }

    let catalog = catalog::generate(&validation.valid, roots, output)?;

    let compiled = match compiler {
        Some(compiler) => {
            let target = PlatformResolver::from_env().resolve(platform, deployment_target);
            let request = CompileRequest {
                catalog_dir: catalog.path.clone(),
                bundle_dir: output.join(BUNDLE_DIR_NAME),
                target,
            };
            info!("compiling catalog for {}", request.target);
            match compiler.compile(&request) {
                CompileOutcome::Compiled { .. } => Some(request.bundle_dir),
                CompileOutcome::Failed { diagnostics } => {
                    warn!(
                        "catalog compilation failed; keeping uncompiled catalog at {}: {}",
                        catalog.path.display(),
                        diagnostics.trim()
                    );
                    None
                }
            }
        }
        None => None,
    };

    Ok(BuildOutcome::Generated {
        catalog,
        invalid: validation.invalid,
        compiled,
    })
}
