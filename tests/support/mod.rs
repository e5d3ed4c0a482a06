#![allow(dead_code)]

use anyhow::{Context, Result};
use icon_catalog::compiler::{CatalogCompiler, CompileOutcome, CompileRequest};
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const OUTLINE_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 512 512"><path stroke="#000" fill="none" d="M1 1"/></svg>"##;

// Temporary project with a source tree, provider resource roots and an
// output directory. Everything is removed on drop.
pub struct Workspace {
    temp: TempDir,
}

impl Workspace {
    pub fn new() -> Result<Self> {
        let temp = TempDir::new().context("failed to allocate temp workspace")?;
        let ws = Self { temp };
        fs::create_dir_all(ws.source())?;
        fs::create_dir_all(ws.phosphor())?;
        fs::create_dir_all(ws.ionicons())?;
        Ok(ws)
    }

    pub fn root(&self) -> &Path {
        self.temp.path()
    }

    pub fn source(&self) -> PathBuf {
        self.root().join("Sources")
    }

    pub fn output(&self) -> PathBuf {
        self.root().join("out")
    }

    pub fn resources(&self) -> PathBuf {
        self.root().join("resources")
    }

    pub fn phosphor(&self) -> PathBuf {
        self.resources().join("phosphor")
    }

    pub fn ionicons(&self) -> PathBuf {
        self.resources().join("ionicons")
    }

    pub fn write_source(&self, relative: &str, contents: &str) -> Result<PathBuf> {
        write_file(&self.source().join(relative), contents)
    }

    /// Install a Phosphor SVG at `<weight>/<file>`.
    pub fn add_phosphor(&self, weight: &str, file: &str, contents: &str) -> Result<PathBuf> {
        write_file(&self.phosphor().join(weight).join(file), contents)
    }

    pub fn add_ionicon(&self, file: &str, contents: &str) -> Result<PathBuf> {
        write_file(&self.ionicons().join(file), contents)
    }

    /// Config file pointing at the workspace resource roots.
    pub fn write_config(&self) -> Result<PathBuf> {
        let json = serde_json::json!({
            "phosphorPath": self.phosphor(),
            "ioniconsPath": self.ionicons(),
        });
        write_file(&self.root().join("icons.json"), &json.to_string())
    }
}

pub fn write_file(path: &Path, contents: &str) -> Result<PathBuf> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path.to_path_buf())
}

// Compiler double that records every request and answers with a fixed
// outcome.
pub struct RecordingCompiler {
    succeed: bool,
    pub requests: RefCell<Vec<CompileRequest>>,
}

impl RecordingCompiler {
    pub fn succeeding() -> Self {
        Self {
            succeed: true,
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            succeed: false,
            requests: RefCell::new(Vec::new()),
        }
    }
}

impl CatalogCompiler for RecordingCompiler {
    fn compile(&self, request: &CompileRequest) -> CompileOutcome {
        self.requests.borrow_mut().push(request.clone());
        if self.succeed {
            CompileOutcome::Compiled {
                diagnostics: String::new(),
            }
        } else {
            CompileOutcome::Failed {
                diagnostics: "simulated compiler failure".to_string(),
            }
        }
    }
}
