//! Command-line entry point for the host build system.
//!
//! Usage:
//!   icon-catalog build --source Sources/App --output build/icons --config icons.json
//!   icon-catalog scan --source Sources/App --output build/icons.json
//!   icon-catalog generate --manifest build/icons.json --output build/icons --config icons.json

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use icon_catalog::compiler::{ActoolCompiler, CatalogCompiler};
use icon_catalog::pipeline::{self, BuildOptions, BuildOutcome, GenerateOptions, ScanOptions};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "ICON_CATALOG_LOG";

#[derive(Parser, Debug)]
#[command(name = "icon-catalog")]
#[command(about = "Generate icon asset catalogs from source references")]
#[command(arg_required_else_help = true)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scan sources and generate the catalog in one step.
    Build {
        /// Source directory to scan.
        #[arg(long)]
        source: PathBuf,
        /// Directory receiving the catalog (and compiled bundle).
        #[arg(long)]
        output: PathBuf,
        /// JSON config naming the provider resource roots.
        #[arg(long)]
        config: Option<PathBuf>,
        /// Directory holding `phosphor/` and `ionicons/` resource roots.
        #[arg(long)]
        resources: Option<PathBuf>,
        #[command(flatten)]
        target: TargetArgs,
    },
    /// Scan sources and write the icon manifest.
    Scan {
        /// Source directory to scan.
        #[arg(long)]
        source: PathBuf,
        /// Manifest file to write.
        #[arg(long)]
        output: PathBuf,
    },
    /// Generate the catalog from a manifest.
    Generate {
        /// Manifest written by `scan`.
        #[arg(long)]
        manifest: PathBuf,
        /// Directory receiving the catalog (and compiled bundle).
        #[arg(long)]
        output: PathBuf,
        /// JSON config naming the provider resource roots.
        #[arg(long)]
        config: PathBuf,
        #[command(flatten)]
        target: TargetArgs,
    },
}

#[derive(Args, Debug)]
struct TargetArgs {
    /// Platform passed to the catalog compiler (for example `iphoneos`).
    #[arg(long)]
    platform: Option<String>,
    /// Minimum deployment target passed to the catalog compiler.
    #[arg(long)]
    deployment_target: Option<String>,
    /// Skip the catalog compiler and keep only the uncompiled catalog.
    #[arg(long)]
    no_compile: bool,
}

impl TargetArgs {
    fn compiler(&self) -> Option<ActoolCompiler> {
        if self.no_compile {
            None
        } else {
            Some(ActoolCompiler::new())
        }
    }
}

fn main() {
    init_tracing();
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Build {
            source,
            output,
            config,
            resources,
            target,
        } => {
            let compiler = target.compiler();
            let options = BuildOptions {
                source,
                output,
                config,
                resources,
                platform: target.platform,
                deployment_target: target.deployment_target,
            };
            let outcome = pipeline::build(&options, as_dyn(compiler.as_ref()))?;
            report(&outcome);
        }
        Command::Scan { source, output } => {
            pipeline::scan(&ScanOptions { source, output })?;
        }
        Command::Generate {
            manifest,
            output,
            config,
            target,
        } => {
            let compiler = target.compiler();
            let options = GenerateOptions {
                manifest,
                output,
                config,
                platform: target.platform,
                deployment_target: target.deployment_target,
            };
            let outcome = pipeline::generate(&options, as_dyn(compiler.as_ref()))?;
            report(&outcome);
        }
    }

    Ok(())
}

fn as_dyn(compiler: Option<&ActoolCompiler>) -> Option<&dyn CatalogCompiler> {
    compiler.map(|compiler| compiler as &dyn CatalogCompiler)
}

fn report(outcome: &BuildOutcome) {
    match outcome {
        BuildOutcome::NoIcons => tracing::info!("no icon references found"),
        BuildOutcome::NothingValid { invalid } => {
            tracing::info!("none of {} icon reference(s) were usable", invalid.len())
        }
        BuildOutcome::Generated {
            catalog, compiled, ..
        } => match compiled {
            Some(bundle) => tracing::info!("compiled bundle at {}", bundle.display()),
            None => tracing::info!("catalog available at {}", catalog.path.display()),
        },
    }
}
