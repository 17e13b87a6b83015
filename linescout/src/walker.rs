use ignore::WalkBuilder;
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, info};

use crate::config::SearchConfig;
use crate::diagnostics::Diagnostics;
use crate::errors::{ScanError, ScanResult};
use crate::filters::{is_excluded, sniff_is_text};
use crate::results::{FileReport, RunSummary};
use crate::scanner::FileScanner;

/// Where completed file reports go.
///
/// Each call hands over one file's whole batch of report lines;
/// implementations must treat the call as atomic so concurrent workers
/// cannot interleave output from different files.
pub trait ReportSink: Sync {
    fn emit(&self, report: &FileReport);
}

/// Collects reports into memory, for tests and callers that order output
/// themselves.
#[derive(Debug, Default)]
pub struct CollectingSink {
    reports: Mutex<Vec<FileReport>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_reports(self) -> Vec<FileReport> {
        self.reports
            .into_inner()
            .expect("report sink mutex poisoned")
    }
}

impl ReportSink for CollectingSink {
    fn emit(&self, report: &FileReport) {
        self.reports
            .lock()
            .expect("report sink mutex poisoned")
            .push(report.clone());
    }
}

/// Walks the tree under `config.root_path` and scans every eligible file.
///
/// The traversal itself is always sequential and depth-first, visiting
/// siblings in directory-listing order. Excluded entries are pruned
/// whole; files that fail the binary sniff are skipped. In sequential
/// mode each file is scanned in traversal order; in concurrent mode one
/// scoped worker task is spawned per eligible file and the call returns
/// only after every task has finished, so cross-file emit order is
/// unspecified there.
///
/// I/O failures below the root are recorded in `diagnostics` and the walk
/// continues. The root is expected to be a directory; a single-file root
/// is the caller's case to dispatch straight to the scanner.
pub fn walk(
    config: &SearchConfig,
    scanner: &FileScanner,
    diagnostics: &Diagnostics,
    sink: &dyn ReportSink,
) -> ScanResult<RunSummary> {
    info!(
        "searching {} for {:?} ({} mode)",
        config.root_path.display(),
        config.term,
        if config.concurrent {
            "concurrent"
        } else {
            "sequential"
        }
    );

    let summary = Mutex::new(RunSummary::default());

    if config.concurrent {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.thread_count.get())
            .build()
            .map_err(|e| ScanError::config_error(format!("couldn't build worker pool: {e}")))?;
        let summary = &summary;
        pool.scope(|scope| {
            for_each_eligible_file(config, diagnostics, summary, |path| {
                scope.spawn(move |_| scan_one(scanner, &path, diagnostics, summary, sink));
            });
        });
    } else {
        for_each_eligible_file(config, diagnostics, &summary, |path| {
            scan_one(scanner, &path, diagnostics, &summary, sink);
        });
    }

    let summary = summary.into_inner().expect("summary mutex poisoned");
    info!(
        "search complete: {} matching lines in {} of {} files",
        summary.matching_lines, summary.files_with_matches, summary.files_scanned
    );
    Ok(summary)
}

/// Drives the traversal, applying exclusion pruning and the binary sniff,
/// and hands each eligible file path to `dispatch`.
fn for_each_eligible_file(
    config: &SearchConfig,
    diagnostics: &Diagnostics,
    summary: &Mutex<RunSummary>,
    mut dispatch: impl FnMut(std::path::PathBuf),
) {
    let mut builder = WalkBuilder::new(&config.root_path);
    builder.standard_filters(false).follow_links(false);
    if !config.excludes.is_empty() {
        let excludes = config.excludes.clone();
        builder.filter_entry(move |entry| !is_excluded(entry.path(), &excludes));
    }

    for entry in builder.build() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                diagnostics.record(format!("ERROR (Couldn't read directory): {e}"));
                lock_summary(summary).entities_failed += 1;
                continue;
            }
        };
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }
        let path = entry.into_path();
        match sniff_is_text(&path) {
            Ok(true) => dispatch(path),
            Ok(false) => {
                debug!("skipping binary file {}", path.display());
                lock_summary(summary).binaries_skipped += 1;
            }
            Err(e) => {
                diagnostics.record(format!(
                    "ERROR (Could not open file): {}: {e}",
                    path.display()
                ));
                lock_summary(summary).entities_failed += 1;
            }
        }
    }
}

/// Scans one file and emits its report; failures become diagnostics.
fn scan_one(
    scanner: &FileScanner,
    path: &Path,
    diagnostics: &Diagnostics,
    summary: &Mutex<RunSummary>,
    sink: &dyn ReportSink,
) {
    match scanner.scan_path(path) {
        Ok(report) => {
            lock_summary(summary).record_report(&report);
            if report.has_matches() {
                sink.emit(&report);
            }
        }
        Err(e) => {
            diagnostics.record(format!("ERROR (Couldn't read file): {e}"));
            lock_summary(summary).entities_failed += 1;
        }
    }
}

fn lock_summary(summary: &Mutex<RunSummary>) -> std::sync::MutexGuard<'_, RunSummary> {
    summary.lock().expect("summary mutex poisoned")
}
