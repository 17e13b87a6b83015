use colored::Colorize;
use std::path::PathBuf;

/// One piece of a report line: plain surrounding text or a matched
/// occurrence of the search term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    Plain(String),
    Match(String),
}

/// One line of output: a source line that contained at least one match,
/// broken into an ordered sequence of fragments covering the whole line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLine {
    /// 1-based line number in the source file
    pub line_number: usize,
    /// Plain and matched fragments, in source order
    pub fragments: Vec<Fragment>,
}

impl ReportLine {
    /// The line's full text with no highlighting applied.
    pub fn text(&self) -> String {
        self.fragments
            .iter()
            .map(|fragment| match fragment {
                Fragment::Plain(text) | Fragment::Match(text) => text.as_str(),
            })
            .collect()
    }
}

/// All matching lines found in a single file. Lines appear in source
/// order; non-matching source lines are never represented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub path: PathBuf,
    pub lines: Vec<ReportLine>,
}

impl FileReport {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lines: Vec::new(),
        }
    }

    pub fn has_matches(&self) -> bool {
        !self.lines.is_empty()
    }

    /// Renders the report as `(<path>)[Line <n>]: <text>` rows, one per
    /// matching line, with match fragments in bold red.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(&format!("({})[Line {}]: ", self.path.display(), line.line_number));
            for fragment in &line.fragments {
                match fragment {
                    Fragment::Plain(text) => out.push_str(text),
                    Fragment::Match(text) => out.push_str(&text.red().bold().to_string()),
                }
            }
            out.push('\n');
        }
        out
    }
}

/// Aggregate counters for one run, used for logging and assertions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Text files actually scanned
    pub files_scanned: usize,
    /// Scanned files that produced at least one report line
    pub files_with_matches: usize,
    /// Total report lines across all files
    pub matching_lines: usize,
    /// Files skipped by the binary sniff
    pub binaries_skipped: usize,
    /// Files and directories that could not be processed
    pub entities_failed: usize,
}

impl RunSummary {
    pub fn record_report(&mut self, report: &FileReport) {
        self.files_scanned += 1;
        if report.has_matches() {
            self.files_with_matches += 1;
            self.matching_lines += report.lines.len();
        }
    }
}
