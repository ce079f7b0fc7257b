//! gen-enumtype: generate closed-set dispatch helpers from annotated structs.
//!
//! Usually run per file from a build step:
//!
//! - `gen-enumtype src/scm.rs` writes `src/scm_gen_enumtype.rs`
//! - `GEN_ENUMTYPE_FILE=src/scm.rs gen-enumtype` does the same from the environment
//! - `gen-enumtype --check 'src/**/*.rs'` fails if any output is out of date

use anyhow::{Context, Result};
use clap::Parser;
use gen_enumtype::{annotation, generate_file, generate_source, writer, Options};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "gen-enumtype",
    about = "Generate closed-set dispatch helpers for annotated Rust structs"
)]
struct Cli {
    /// Input files (glob patterns supported).
    #[arg(env = "GEN_ENUMTYPE_FILE", value_delimiter = ',')]
    files: Vec<String>,

    /// Package name used in generated error messages (default: file stem)
    #[arg(long, env = "GEN_ENUMTYPE_PACKAGE")]
    package: Option<String>,

    /// Annotation marker token
    #[arg(long, default_value = annotation::DEFAULT_MARKER)]
    marker: String,

    /// Suffix appended to the input file stem for the output file
    #[arg(long, default_value = writer::DEFAULT_SUFFIX)]
    suffix: String,

    /// Print generated code to stdout instead of writing files
    #[arg(long, conflicts_with = "check")]
    stdout: bool,

    /// Do not write; fail if an output file is missing or out of date
    #[arg(long)]
    check: bool,

    /// Log pipeline details to stderr (RUST_LOG takes precedence)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "gen_enumtype=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    if cli.files.is_empty() {
        anyhow::bail!("no input files given (pass paths or set GEN_ENUMTYPE_FILE)");
    }

    let options = Options {
        marker: cli.marker.clone(),
        suffix: cli.suffix.clone(),
        package: cli.package.clone(),
    };
    if options.package.is_some() && cli.files.len() > 1 {
        tracing::warn!("--package applies to every input file");
    }

    for path in expand_globs(&cli.files, &cli.suffix)? {
        if cli.stdout {
            print_generated(&path, &options)?;
        } else if cli.check {
            check_generated(&path, &options)?;
        } else {
            let written = generate_file(&path, &options)
                .with_context(|| format!("failed to generate {}", path.display()))?;
            if written.is_none() {
                tracing::info!(input = %path.display(), "no annotations, skipping");
            }
        }
    }
    Ok(())
}

fn print_generated(path: &Path, options: &Options) -> Result<()> {
    let source =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let generated = generate_source(&source, path, options)
        .with_context(|| format!("failed to generate {}", path.display()))?;
    if let Some(generated) = generated {
        io::stdout()
            .write_all(generated.code.as_bytes())
            .context("failed to write stdout")?;
    }
    Ok(())
}

fn check_generated(path: &Path, options: &Options) -> Result<()> {
    let source =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let generated = generate_source(&source, path, options)
        .with_context(|| format!("failed to generate {}", path.display()))?;
    if let Some(generated) = generated {
        writer::check(&generated.output, &generated.code)?;
        tracing::debug!(output = %generated.output.display(), "up to date");
    }
    Ok(())
}

/// Expand glob patterns into a list of real file paths.
fn expand_globs(patterns: &[String], suffix: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }
        let matches: Vec<_> = glob::glob(pattern)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file() && !is_generated(p, suffix))
            .collect();
        if matches.is_empty() {
            anyhow::bail!("no files matched: {}", pattern);
        }
        files.extend(matches);
    }
    // Sort for deterministic processing order
    files.sort();
    files.dedup();
    Ok(files)
}

/// Generated files never carry annotations, skip them when globbing.
fn is_generated(path: &Path, suffix: &str) -> bool {
    path.file_stem()
        .and_then(|s| s.to_str())
        .is_some_and(|s| s.ends_with(suffix))
}
