use std::fs;
use std::path::Path;
use tracing::trace;

use crate::errors::{ScanError, ScanResult};
use crate::finder::{Finder, Span};
use crate::results::{FileReport, Fragment, ReportLine};

/// Scans single files for a fixed search term.
///
/// One scanner serves a whole run and may be shared across workers; a
/// fresh [`Finder`] is created per file and discarded afterwards.
#[derive(Debug, Clone)]
pub struct FileScanner {
    term: Vec<char>,
}

impl FileScanner {
    pub fn new(term: &str) -> Self {
        Self {
            term: term.chars().collect(),
        }
    }

    /// Reads and decodes one file, returning a report with every matching
    /// line. An empty file yields an empty report; unreadable or
    /// undecodable contents yield an error for the caller to record.
    pub fn scan_path(&self, path: &Path) -> ScanResult<FileReport> {
        trace!("scanning {}", path.display());

        let bytes = fs::read(path).map_err(|e| ScanError::from_io(path, e))?;
        let mut report = FileReport::new(path);
        if bytes.is_empty() {
            return Ok(report);
        }
        let contents =
            String::from_utf8(bytes).map_err(|e| ScanError::encoding_error(path, e))?;

        let mut finder = Finder::new(&contents);
        loop {
            let bol = finder.bol();
            let line_number = finder.line_number();
            let (spans, done) = finder.next_line(&self.term);
            if !spans.is_empty() {
                report
                    .lines
                    .push(build_report_line(&finder, bol, line_number, &spans));
            }
            if done {
                break;
            }
        }
        Ok(report)
    }
}

/// Reconstructs the display form of one matching line: plain text up to
/// the first span, the highlighted spans with the plain text between
/// them, then the rest of the line up to (not including) the newline.
fn build_report_line(
    finder: &Finder,
    bol: usize,
    line_number: usize,
    spans: &[Span],
) -> ReportLine {
    let mut fragments = Vec::new();
    let mut pos = bol;
    for span in spans {
        if pos < span.start {
            fragments.push(Fragment::Plain(finder.read_range(pos, span.start)));
        }
        fragments.push(Fragment::Match(finder.read_range(span.start, span.end)));
        pos = span.end;
    }
    let line_end = finder.bol() - 1;
    if pos < line_end {
        fragments.push(Fragment::Plain(finder.read_range(pos, line_end)));
    }
    ReportLine {
        line_number,
        fragments,
    }
}
