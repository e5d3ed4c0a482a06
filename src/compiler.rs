//! Hand-off to the platform asset-catalog compiler.
//!
//! The pipeline only talks to the compiler through [`CatalogCompiler`], so
//! tests can substitute a double. [`ActoolCompiler`] is the real thing: it
//! runs `xcrun actool`, waits for it to exit, and captures stdout and stderr
//! together for diagnostics. There is no timeout.

use crate::platform::PlatformTarget;
use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;
use std::process::Command;

pub const DEFAULT_COMPILER_PROGRAM: &str = "xcrun";
const PARTIAL_INFO_PLIST: &str = "assetcatalog_generated_info.plist";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompileRequest {
    pub catalog_dir: PathBuf,
    pub bundle_dir: PathBuf,
    pub target: PlatformTarget,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CompileOutcome {
    Compiled { diagnostics: String },
    Failed { diagnostics: String },
}

impl CompileOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, CompileOutcome::Compiled { .. })
    }

    pub fn diagnostics(&self) -> &str {
        match self {
            CompileOutcome::Compiled { diagnostics } | CompileOutcome::Failed { diagnostics } => {
                diagnostics
            }
        }
    }
}

/// Turns a catalog directory into a compiled bundle for one platform.
pub trait CatalogCompiler {
    fn compile(&self, request: &CompileRequest) -> CompileOutcome;
}

/// `xcrun actool` invocation.
#[derive(Clone, Debug)]
pub struct ActoolCompiler {
    program: OsString,
    leading_args: Vec<OsString>,
}

impl Default for ActoolCompiler {
    fn default() -> Self {
        Self {
            program: OsString::from(DEFAULT_COMPILER_PROGRAM),
            leading_args: vec![OsString::from("actool")],
        }
    }
}

impl ActoolCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `program` directly instead of `xcrun actool`.
    pub fn with_program(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            leading_args: Vec::new(),
        }
    }

    pub fn command_args(&self, request: &CompileRequest) -> Vec<OsString> {
        let mut args = self.leading_args.clone();
        args.push(request.catalog_dir.clone().into_os_string());
        args.push("--compile".into());
        args.push(request.bundle_dir.clone().into_os_string());
        args.push("--platform".into());
        args.push(request.target.platform.clone().into());
        args.push("--minimum-deployment-target".into());
        args.push(request.target.deployment_target.clone().into());
        args.push("--output-partial-info-plist".into());
        args.push(request.bundle_dir.join(PARTIAL_INFO_PLIST).into_os_string());
        for flag in [
            "--notices",
            "--warnings",
            "--errors",
            "--output-format",
            "human-readable-text",
        ] {
            args.push(flag.into());
        }
        args
    }
}

impl CatalogCompiler for ActoolCompiler {
    fn compile(&self, request: &CompileRequest) -> CompileOutcome {
        if let Err(err) = fs::create_dir_all(&request.bundle_dir) {
            return CompileOutcome::Failed {
                diagnostics: format!(
                    "creating bundle directory {}: {err}",
                    request.bundle_dir.display()
                ),
            };
        }

        let output = match Command::new(&self.program)
            .args(self.command_args(request))
            .output()
        {
            Ok(output) => output,
            Err(err) => {
                return CompileOutcome::Failed {
                    diagnostics: format!(
                        "failed to execute {}: {err}",
                        self.program.to_string_lossy()
                    ),
                };
            }
        };

        let mut diagnostics = String::from_utf8_lossy(&output.stdout).into_owned();
        diagnostics.push_str(&String::from_utf8_lossy(&output.stderr));

        if output.status.success() {
            CompileOutcome::Compiled { diagnostics }
        } else {
            let status = match output.status.code() {
                Some(code) => format!("exit status {code}"),
                None => "terminated by signal".to_string(),
            };
            CompileOutcome::Failed {
                diagnostics: format!("{status}\n{diagnostics}"),
            }
        }
    }
}
