//! platio - status-gated file I/O and filtered directory listings.
//!
//! Usage:
//!   platio dirs [PATH]          List directories, parents first
//!   platio files [PATH]         List files with sizes
//!   platio mkpath PATH          Create a path and its missing parents
//!   platio touch PATH           Set a file's times to now
//!   platio times PATH           Show a file's creation and modification times
//!   platio cat PATH             Print a file through a file handle
//!   platio write PATH           Write stdin to a file through a file handle
//!   platio --help               Show help

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Context, Result, bail};
use tracing_subscriber::EnvFilter;

use platio_file::{AccessMode, FileHandle, Status, create_path, file_times, file_touch};
use platio_walk::{Depth, TreeWalker, WalkConfig};

const CHUNK_SIZE: usize = 64 * 1024;

#[derive(Parser)]
#[command(
    name = "platio",
    version,
    about = "Status-gated file I/O and filtered directory listings",
    long_about = "platio reads, writes and enumerates files the way the platio \
                  libraries do: through status-gated file handles and a \
                  depth-bounded walker that prunes excluded directories."
)]
struct Cli {
    /// JSON walk configuration (exclusions, default depth)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List directories, parents before children
    Dirs {
        /// Root directory
        #[arg(default_value = ".")]
        path: String,

        #[command(flatten)]
        walk: WalkArgs,

        /// Print paths relative to the root and omit the root itself
        #[arg(short, long)]
        relative: bool,
    },

    /// List files with their sizes
    Files {
        /// Root directory
        #[arg(default_value = ".")]
        path: String,

        #[command(flatten)]
        walk: WalkArgs,
    },

    /// Create a path and all missing parents (trailing '/' creates the last component too)
    Mkpath { path: String },

    /// Set a file's access and modification times to now
    Touch { path: String },

    /// Show a file's creation and modification times
    Times { path: String },

    /// Print a file to stdout
    Cat { path: PathBuf },

    /// Write stdin to a file, creating parent directories
    Write {
        path: String,

        /// Open mode
        #[arg(short, long, default_value = "write")]
        mode: AccessMode,
    },
}

#[derive(clap::Args)]
struct WalkArgs {
    /// Levels to descend below the root (negative for unlimited)
    #[arg(short, long, allow_negative_numbers = true)]
    depth: Option<i64>,

    /// Directory names to skip, in addition to the configured ones
    #[arg(short = 'x', long = "exclude")]
    exclude: Vec<String>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;

    match cli.command {
        Command::Dirs {
            path,
            walk,
            relative,
        } => run_dirs(&config, &path, &walk, relative)?,
        Command::Files { path, walk } => run_files(&config, &path, &walk)?,
        Command::Mkpath { path } => {
            create_path(&path).with_context(|| format!("Failed to create {path}"))?;
        }
        Command::Touch { path } => {
            file_touch(&path).with_context(|| format!("Failed to touch {path}"))?;
        }
        Command::Times { path } => run_times(&path)?,
        Command::Cat { path } => run_cat(&path)?,
        Command::Write { path, mode } => run_write(&path, mode)?,
    }

    Ok(())
}

/// Load the walk configuration, falling back to defaults.
fn load_config(path: Option<&PathBuf>) -> Result<WalkConfig> {
    let Some(path) = path else {
        return Ok(WalkConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config: WalkConfig = serde_json::from_str(&text)
        .with_context(|| format!("Invalid config {}", path.display()))?;
    tracing::debug!(?config, "loaded walk configuration");
    Ok(config)
}

fn build_walker(config: &WalkConfig, args: &WalkArgs) -> (TreeWalker, Depth) {
    let mut walker = TreeWalker::new(config);
    for name in &args.exclude {
        walker.exclude(name);
    }
    let depth = args
        .depth
        .map_or_else(|| walker.default_depth(), Depth::from_budget);
    (walker, depth)
}

fn run_dirs(config: &WalkConfig, path: &str, args: &WalkArgs, relative: bool) -> Result<()> {
    let (walker, depth) = build_walker(config, args);
    let mut dirs = Vec::new();
    walker
        .dump_directories(path, depth, !relative, &mut dirs)
        .with_context(|| format!("Cannot list {path}"))?;

    match args.format {
        OutputFormat::Text => {
            for dir in &dirs {
                println!("{dir}");
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&dirs)?),
    }
    Ok(())
}

fn run_files(config: &WalkConfig, path: &str, args: &WalkArgs) -> Result<()> {
    let (walker, depth) = build_walker(config, args);
    let mut files = Vec::new();
    walker
        .dump_path(path, depth, &mut files)
        .with_context(|| format!("Cannot list {path}"))?;

    match args.format {
        OutputFormat::Text => {
            let total: u64 = files.iter().map(|f| f.file_size).sum();
            for file in &files {
                println!("{:>10}  {}", format_size(file.file_size), file.path());
            }
            eprintln!("{} files, {}", files.len(), format_size(total));
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&files)?),
    }
    Ok(())
}

fn run_times(path: &str) -> Result<()> {
    let times = file_times(path).with_context(|| format!("Cannot stat {path}"))?;
    let created: DateTime<Local> = times.created.into();
    let modified: DateTime<Local> = times.modified.into();
    println!("created:  {}", created.format("%Y-%m-%d %H:%M:%S"));
    println!("modified: {}", modified.format("%Y-%m-%d %H:%M:%S"));
    Ok(())
}

fn run_cat(path: &Path) -> Result<()> {
    let mut file = FileHandle::new();
    let status = file.open(path, AccessMode::Read);
    if status != Status::Ok {
        bail!("Cannot open {}: {status}", path.display());
    }

    let mut stdout = std::io::stdout().lock();
    let mut buf = vec![0u8; CHUNK_SIZE];
    loop {
        let read = file.read(&mut buf)?;
        stdout.write_all(&buf[..read.bytes])?;
        match read.status {
            Status::Ok => continue,
            Status::EndOfStream => break,
            other => bail!("Read failed on {}: {other}", path.display()),
        }
    }
    file.close();
    Ok(())
}

fn run_write(path: &str, mode: AccessMode) -> Result<()> {
    let mut input = Vec::new();
    std::io::stdin()
        .read_to_end(&mut input)
        .context("Failed to read stdin")?;

    create_path(path).with_context(|| format!("Failed to create parents of {path}"))?;

    let mut file = FileHandle::new();
    let status = file.open(path, mode);
    if !status.is_usable() {
        bail!("Cannot open {path}: {status}");
    }
    let written = file.write(&input)?;
    if written.status.is_error() {
        bail!(
            "Wrote {} of {} bytes to {path}: {}",
            written.bytes,
            input.len(),
            written.status
        );
    }
    file.flush()?;
    let status = file.close();
    if status.is_error() {
        bail!("Failed to close {path}: {status}");
    }
    Ok(())
}

/// Format bytes as human-readable size.
fn format_size(bytes: u64) -> String {
    humansize::format_size(bytes, humansize::BINARY)
}
