use std::num::NonZeroUsize;
use std::path::PathBuf;

/// Configuration for one search run.
///
/// Everything comes from the command line; there is no config-file or
/// environment layer.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Literal term to search for. Callers must reject an empty term
    /// before building a config.
    pub term: String,

    /// Root file or directory to search
    pub root_path: PathBuf,

    /// Full path strings to skip, compared by exact equality
    pub excludes: Vec<String>,

    /// Scan each eligible file on its own worker instead of in
    /// traversal order
    pub concurrent: bool,

    /// Worker threads backing the concurrent pool.
    /// Defaults to the number of CPU cores.
    pub thread_count: NonZeroUsize,
}

impl SearchConfig {
    pub fn new(term: impl Into<String>, root_path: impl Into<PathBuf>) -> Self {
        Self {
            term: term.into(),
            root_path: root_path.into(),
            excludes: Vec::new(),
            concurrent: false,
            thread_count: default_thread_count(),
        }
    }
}

fn default_thread_count() -> NonZeroUsize {
    NonZeroUsize::new(num_cpus::get()).unwrap_or(NonZeroUsize::MIN)
}

/// Splits a comma-separated exclude list into exact path strings,
/// dropping empty segments.
pub fn parse_excludes(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SearchConfig::new("needle", ".");
        assert_eq!(config.term, "needle");
        assert_eq!(config.root_path, PathBuf::from("."));
        assert!(config.excludes.is_empty());
        assert!(!config.concurrent);
        assert!(config.thread_count.get() >= 1);
    }

    #[test]
    fn test_parse_excludes() {
        assert_eq!(
            parse_excludes("a/b, target,c"),
            vec!["a/b".to_string(), "target".to_string(), "c".to_string()]
        );
        assert!(parse_excludes("").is_empty());
        assert!(parse_excludes(",,").is_empty());
    }
}
