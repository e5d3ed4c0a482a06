use crate::catalog::contents::{EntryContents, RootContents, write_json};
use crate::catalog::{CATALOG_DIR_NAME, CONTENTS_FILE, imageset_dir_name};
use crate::config::ResourceRoots;
use crate::identifier;
use crate::mapping::map_identifier;
use anyhow::{Context, Result, anyhow};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const HARDCODED_STROKE: &str = r##"stroke="#000""##;
const CURRENT_COLOR_STROKE: &str = r#"stroke="currentColor""#;

/// One written image set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogEntry {
    pub asset_name: String,
    pub directory: PathBuf,
    pub filename: String,
}

/// The catalog tree produced by [`generate`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedCatalog {
    pub path: PathBuf,
    pub entries: Vec<CatalogEntry>,
}

/// Swap the hardcoded black stroke in Ionicons outline SVGs for
/// `currentColor` so template tinting applies to the outline.
pub fn process_outline_svg(content: &str) -> String {
    content.replace(HARDCODED_STROKE, CURRENT_COLOR_STROKE)
}

/// Write a fresh catalog for `icons` under `output_dir`.
///
/// The tree is staged in a temporary directory beside the final location and
/// swapped in once complete, replacing whatever catalog was there before.
/// Identifiers that no longer parse or map are skipped; identifiers sharing a
/// canonical asset name are written once.
pub fn generate(icons: &[String], roots: &ResourceRoots, output_dir: &Path) -> Result<GeneratedCatalog> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("creating output directory {}", output_dir.display()))?;
    let staging = tempfile::Builder::new()
        .prefix(".GeneratedIcons-")
        .tempdir_in(output_dir)
        .with_context(|| format!("creating staging directory in {}", output_dir.display()))?;

    let catalog_path = output_dir.join(CATALOG_DIR_NAME);
    let mut written = BTreeSet::new();
    let mut entries = Vec::new();

    for raw in icons {
        let Some(icon) = identifier::parse(raw) else {
            warn!("skipping unparseable icon identifier {raw}");
            continue;
        };
        let Some(source) = map_identifier(&icon, roots) else {
            warn!("skipping {raw}: no resource root configured for its provider");
            continue;
        };
        let asset_name = icon.asset_name();
        if !written.insert(asset_name.clone()) {
            debug!("{raw} resolves to already written asset {asset_name}");
            continue;
        }

        let filename = source
            .file_name()
            .and_then(|name| name.to_str())
            .map(str::to_string)
            .ok_or_else(|| anyhow!("source path {} has no file name", source.display()))?;
        let dir_name = imageset_dir_name(&asset_name);
        let staged_dir = staging.path().join(&dir_name);
        fs::create_dir_all(&staged_dir)
            .with_context(|| format!("creating {}", staged_dir.display()))?;

        let payload = fs::read(&source)
            .with_context(|| format!("reading source image {}", source.display()))?;
        let payload = if icon.is_outline_variant() {
            transform_outline_payload(payload)
        } else {
            payload
        };
        fs::write(staged_dir.join(&filename), payload)
            .with_context(|| format!("writing image for {asset_name}"))?;
        write_json(
            &staged_dir.join(CONTENTS_FILE),
            &EntryContents::template_image(&filename),
        )?;

        entries.push(CatalogEntry {
            asset_name,
            directory: catalog_path.join(dir_name),
            filename,
        });
    }

    write_json(&staging.path().join(CONTENTS_FILE), &RootContents::default())?;

    let staged = staging.keep();
    swap_into_place(&staged, &catalog_path)?;

    info!(
        "wrote {} icon(s) to {}",
        entries.len(),
        catalog_path.display()
    );
    Ok(GeneratedCatalog {
        path: catalog_path,
        entries,
    })
}

/// Move `staged` to `target`. An existing `target` is set aside first and
/// restored if the move fails; it is deleted only once the new tree is in
/// place.
fn swap_into_place(staged: &Path, target: &Path) -> Result<()> {
    if !target.exists() {
        return fs::rename(staged, target)
            .with_context(|| format!("moving catalog into {}", target.display()));
    }

    let backup = previous_catalog_path(target);
    if backup.exists() {
        fs::remove_dir_all(&backup)
            .with_context(|| format!("removing stale catalog {}", backup.display()))?;
    }
    fs::rename(target, &backup)
        .with_context(|| format!("setting aside previous catalog {}", target.display()))?;

    if let Err(err) = fs::rename(staged, target) {
        if let Err(restore_err) = fs::rename(&backup, target) {
            warn!(
                "could not restore previous catalog from {}: {restore_err}",
                backup.display()
            );
        }
        if staged.exists() {
            let _ = fs::remove_dir_all(staged);
        }
        return Err(err).with_context(|| format!("moving catalog into {}", target.display()));
    }

    if let Err(err) = fs::remove_dir_all(&backup) {
        warn!("could not remove previous catalog {}: {err}", backup.display());
    }
    Ok(())
}

fn previous_catalog_path(target: &Path) -> PathBuf {
    let name = target
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| CATALOG_DIR_NAME.to_string());
    target.with_file_name(format!(".{name}.previous"))
}

fn transform_outline_payload(payload: Vec<u8>) -> Vec<u8> {
    match String::from_utf8(payload) {
        Ok(text) => process_outline_svg(&text).into_bytes(),
        Err(err) => err.into_bytes(),
    }
}
