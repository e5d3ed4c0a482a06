//! Source scanning for icon identifiers.
//!
//! `scan` strips comments from a single source text and collects every quoted
//! identifier passed to an `Image(...)` / `Image(icon: ...)` call. `scan_tree`
//! walks a directory and merges per-file results into one list. Both keep the
//! first-seen order and drop exact duplicates.

pub mod comments;

use crate::identifier::Provider;
use indexmap::IndexSet;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

pub use comments::strip_comments;

/// Extension of the source files visited by [`scan_tree`].
pub const SOURCE_EXTENSION: &str = "swift";

static CALL_SITE: LazyLock<Regex> = LazyLock::new(|| {
    let prefixes = Provider::ALL
        .iter()
        .map(|provider| regex::escape(provider.prefix()))
        .collect::<Vec<_>>()
        .join("|");
    let pattern = format!(
        r#"Image\s*\(\s*(?:icon\s*:\s*)?"((?:{prefixes})\.[a-z0-9.\-]+)"\s*\)"#
    );
    Regex::new(&pattern).expect("call-site pattern is valid")
});

/// Collect icon identifiers from one source text.
pub fn scan(source: &str) -> Vec<String> {
    let mut icons = IndexSet::new();
    collect_into(source, &mut icons);
    icons.into_iter().collect()
}

/// Collect icon identifiers from every source file below `root`.
///
/// Hidden files and directories are skipped, as is anything without the
/// source extension. Unreadable files are logged and ignored, so the walk
/// always produces a result.
pub fn scan_tree(root: &Path) -> Vec<String> {
    let mut icons = IndexSet::new();

    if !root.exists() {
        warn!("source directory {} does not exist", root.display());
        return Vec::new();
    }

    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!("skipping unreadable entry under {}: {err}", root.display());
                continue;
            }
        };
        if !entry.file_type().is_file() || !has_source_extension(entry.path()) {
            continue;
        }
        match fs::read_to_string(entry.path()) {
            Ok(contents) => {
                let before = icons.len();
                collect_into(&contents, &mut icons);
                debug!(
                    "{}: {} new icon reference(s)",
                    entry.path().display(),
                    icons.len() - before
                );
            }
            Err(err) => warn!("skipping {}: {err}", entry.path().display()),
        }
    }

    icons.into_iter().collect()
}

fn collect_into(source: &str, icons: &mut IndexSet<String>) {
    let stripped = strip_comments(source);
    for line in stripped.lines() {
        for captures in CALL_SITE.captures_iter(line) {
            if let Some(found) = captures.get(1) {
                icons.insert(found.as_str().to_string());
            }
        }
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

fn has_source_extension(path: &Path) -> bool {
    path.extension().and_then(|ext| ext.to_str()) == Some(SOURCE_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn finds_simple_call() {
        assert_eq!(scan(r#"let img = Image("ph.house")"#), vec!["ph.house"]);
        assert_eq!(scan(r#"Image("ph.gear")"#), vec!["ph.gear"]);
    }

    #[test]
    fn finds_labeled_argument() {
        assert_eq!(
            scan(r#"Image(icon: "ion.home.outline")"#),
            vec!["ion.home.outline"]
        );
        assert_eq!(scan(r#"Image ( icon : "ph.star.bold" )"#), vec!["ph.star.bold"]);
    }

    #[test]
    fn ignores_commented_out_calls() {
        assert!(scan(r#"// Image("ph.house")"#).is_empty());
        assert!(scan(r#"   // Image("ph.house")"#).is_empty());
        assert_eq!(
            scan("Image(\"ph.gear\") // Image(\"ph.house\")"),
            vec!["ph.gear"]
        );
    }

    #[test]
    fn ignores_block_comments() {
        let source = "/* Image(\"ph.house\") */\nImage(\"ph.gear\")";
        assert_eq!(scan(source), vec!["ph.gear"]);
    }

    #[test]
    fn ignores_multiline_block_comments() {
        let source = r#"/*
 Image("ph.house")
 Image("ph.star")
*/
Image("ph.gear")"#;
        assert_eq!(scan(source), vec!["ph.gear"]);
    }

    #[test]
    fn comment_markers_in_strings_do_not_hide_calls() {
        let source = r#"let url = "https://example.com"; let icon = Image("ph.star")"#;
        assert_eq!(scan(source), vec!["ph.star"]);
    }

    #[test]
    fn keeps_first_seen_order_without_duplicates() {
        let source = r#"
Image("ph.house")
Image("ion.home")
Image("ph.house")
Image("ph.gear.fill") Image("ion.home")
"#;
        let icons = scan(source);
        assert_eq!(icons, vec!["ph.house", "ion.home", "ph.gear.fill"]);
        assert_eq!(scan(source), icons);
    }

    #[test]
    fn rejects_unknown_prefixes_and_characters() {
        let source = r#"
Image("house")
Image("sf.house")
Image("phosphor.house")
Image("ph.House")
Image("ph.house_fill")
image("ph.house")
"#;
        assert!(scan(source).is_empty());
    }

    #[test]
    fn scan_tree_merges_files_and_skips_hidden_entries() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("Views")).unwrap();
        fs::create_dir_all(root.join(".build")).unwrap();
        fs::write(root.join("A.swift"), r#"Image("ph.house") Image("ion.home")"#).unwrap();
        fs::write(root.join("Views/B.swift"), r#"Image("ion.home") Image("ph.gear")"#).unwrap();
        fs::write(root.join("Views/.Hidden.swift"), r#"Image("ph.hidden")"#).unwrap();
        fs::write(root.join(".build/C.swift"), r#"Image("ph.build")"#).unwrap();
        fs::write(root.join("notes.txt"), r#"Image("ph.text")"#).unwrap();

        assert_eq!(scan_tree(root), vec!["ph.house", "ion.home", "ph.gear"]);
    }

    #[test]
    fn scan_tree_of_missing_root_is_empty() {
        let temp = TempDir::new().unwrap();
        assert!(scan_tree(&temp.path().join("missing")).is_empty());
    }
}
