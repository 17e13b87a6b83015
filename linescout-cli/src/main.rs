use anyhow::{bail, Context, Result};
use clap::Parser;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::debug;

use linescout::config::parse_excludes;
use linescout::{walk, Diagnostics, FileReport, FileScanner, ReportSink, SearchConfig};

/// Recursively searches a file tree for a literal term and prints every
/// matching line with the occurrences highlighted.
#[derive(Parser, Debug)]
#[command(name = "linescout", version, about)]
struct Cli {
    /// Term to be searched (shorthand for --st)
    #[arg(value_name = "TERM")]
    term: Option<String>,

    /// Term to be searched
    #[arg(long = "st", value_name = "STRING")]
    st: Option<String>,

    /// Folder/file to search for the search term
    #[arg(long, default_value = ".", value_name = "PATH")]
    path: PathBuf,

    /// Folders/files to ignore while searching, separated by a comma
    #[arg(long, default_value = "", value_name = "LIST", hide_default_value = true)]
    exclude: String,

    /// Use worker threads to scan each file concurrently
    #[arg(long = "go")]
    go: bool,
}

/// Writes each report in a single locked operation so concurrent workers
/// never interleave lines from different files.
struct StdoutSink;

impl ReportSink for StdoutSink {
    fn emit(&self, report: &FileReport) {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        let _ = handle.write_all(report.render().as_bytes());
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let term = match cli.term.or(cli.st) {
        Some(term) if !term.is_empty() => term,
        _ => bail!("You must pass a Search Term"),
    };

    let metadata = fs::metadata(&cli.path)
        .with_context(|| format!("Couldn't read initial path {}", cli.path.display()))?;

    let mut config = SearchConfig::new(term, cli.path);
    config.excludes = parse_excludes(&cli.exclude);
    config.concurrent = cli.go;

    let scanner = FileScanner::new(&config.term);
    let diagnostics = Diagnostics::new();
    let sink = StdoutSink;

    if metadata.is_dir() {
        let summary = walk(&config, &scanner, &diagnostics, &sink)?;
        debug!(?summary, "walk finished");
    } else {
        // A single-file root is scanned directly: no exclusion filtering
        // and no binary sniff apply.
        match scanner.scan_path(&config.root_path) {
            Ok(report) => {
                if report.has_matches() {
                    sink.emit(&report);
                }
            }
            Err(e) => diagnostics.record(format!("ERROR (Couldn't read file): {e}")),
        }
    }

    let messages = diagnostics.messages();
    if !messages.is_empty() {
        println!();
        println!("------ Not Processed Summary ------");
        for message in &messages {
            println!("{message}");
        }
    }

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
