use anyhow::Result;
use linescout::{
    walk, CollectingSink, Diagnostics, FileReport, FileScanner, Fragment, SearchConfig,
};
use std::fs;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tempfile::tempdir;

fn create_test_files(dir: impl AsRef<Path>, files: &[(&str, &str)]) -> Result<()> {
    for (name, content) in files {
        let path = dir.as_ref().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
    }
    Ok(())
}

fn run_walk(config: &SearchConfig) -> Result<(Vec<FileReport>, Diagnostics)> {
    let scanner = FileScanner::new(&config.term);
    let diagnostics = Diagnostics::new();
    let sink = CollectingSink::new();
    walk(config, &scanner, &diagnostics, &sink)?;
    let mut reports = sink.into_reports();
    reports.sort_by(|a, b| a.path.cmp(&b.path));
    Ok((reports, diagnostics))
}

#[test]
fn test_search_tree_end_to_end() -> Result<()> {
    let dir = tempdir()?;
    create_test_files(
        &dir,
        &[
            ("notes.txt", "TODO first thing\nnothing\nTODO second thing\n"),
            ("src/deep/more.txt", "one TODO here\n"),
            ("src/clean.txt", "all done\n"),
        ],
    )?;

    let config = SearchConfig::new("TODO", dir.path());
    let (reports, diagnostics) = run_walk(&config)?;

    assert_eq!(reports.len(), 2);
    assert!(reports[0].path.ends_with("notes.txt"));
    assert_eq!(
        reports[0]
            .lines
            .iter()
            .map(|l| l.line_number)
            .collect::<Vec<_>>(),
        vec![1, 3]
    );
    assert!(reports[1].path.ends_with("src/deep/more.txt"));
    assert!(diagnostics.is_empty());
    Ok(())
}

#[test]
fn test_fragments_cover_the_whole_line() -> Result<()> {
    let dir = tempdir()?;
    create_test_files(&dir, &[("double.txt", "hello world hello\n")])?;

    let config = SearchConfig::new("hello", dir.path());
    let (reports, _) = run_walk(&config)?;

    assert_eq!(reports.len(), 1);
    let line = &reports[0].lines[0];
    assert_eq!(line.line_number, 1);
    assert_eq!(
        line.fragments,
        vec![
            Fragment::Match("hello".to_string()),
            Fragment::Plain(" world ".to_string()),
            Fragment::Match("hello".to_string()),
        ]
    );
    assert_eq!(line.text(), "hello world hello");
    Ok(())
}

#[test]
fn test_exclusion_is_exact_not_prefix() -> Result<()> {
    let dir = tempdir()?;
    create_test_files(
        &dir,
        &[("a/b/hit.txt", "needle\n"), ("a/bc/hit.txt", "needle\n")],
    )?;

    let mut config = SearchConfig::new("needle", dir.path());
    config.excludes = vec![dir.path().join("a/b").to_string_lossy().into_owned()];
    let (reports, _) = run_walk(&config)?;

    assert_eq!(reports.len(), 1);
    assert!(reports[0].path.ends_with("a/bc/hit.txt"));
    Ok(())
}

#[test]
fn test_binary_sniff_window_is_512_bytes() -> Result<()> {
    let dir = tempdir()?;

    // NUL inside the window: binary, skipped.
    let mut early = File::create(dir.path().join("early.dat"))?;
    early.write_all(b"needle\0")?;
    early.write_all(&[b'x'; 1024])?;
    drop(early);

    // NUL only after the window: still treated as text.
    let mut late = File::create(dir.path().join("late.txt"))?;
    late.write_all(b"needle")?;
    late.write_all(&[b' '; 512])?;
    late.write_all(b"\n")?;
    drop(late);

    let config = SearchConfig::new("needle", dir.path());
    let (reports, _) = run_walk(&config)?;

    assert_eq!(reports.len(), 1);
    assert!(reports[0].path.ends_with("late.txt"));
    Ok(())
}

#[test]
fn test_empty_files_produce_no_output_and_no_error() -> Result<()> {
    let dir = tempdir()?;
    create_test_files(&dir, &[("empty.txt", "")])?;

    let config = SearchConfig::new("anything", dir.path());
    let (reports, diagnostics) = run_walk(&config)?;

    assert!(reports.is_empty());
    assert!(diagnostics.is_empty());
    Ok(())
}

#[test]
fn test_concurrent_matches_sequential_on_a_wide_tree() -> Result<()> {
    let dir = tempdir()?;
    for i in 0..30 {
        let sub = format!("d{}/f{}.txt", i % 5, i);
        create_test_files(&dir, &[(sub.as_str(), "filler\nshared needle line\n")])?;
    }
    create_test_files(&dir, &[("plain.txt", "no match at all\n")])?;

    let mut config = SearchConfig::new("needle", dir.path());
    let (sequential, _) = run_walk(&config)?;

    config.concurrent = true;
    let (concurrent, _) = run_walk(&config)?;

    assert_eq!(sequential.len(), 30);
    assert_eq!(sequential, concurrent);
    Ok(())
}

#[test]
fn test_run_is_idempotent() -> Result<()> {
    let dir = tempdir()?;
    create_test_files(
        &dir,
        &[("a.txt", "needle one\n"), ("b.txt", "needle two\nneedle three\n")],
    )?;

    let config = SearchConfig::new("needle", dir.path());
    let (first, _) = run_walk(&config)?;
    let (second, _) = run_walk(&config)?;
    assert_eq!(first, second);
    Ok(())
}
