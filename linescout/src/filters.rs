use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Number of leading bytes inspected by the binary sniff.
const SNIFF_LEN: usize = 512;

/// Whether `path` is named by the exclude list.
///
/// Exclusion is exact equality on the full path string, never a prefix or
/// substring test: excluding `a/b` does not exclude `a/bc`.
pub fn is_excluded(path: &Path, excludes: &[String]) -> bool {
    let path = path.to_string_lossy();
    excludes.iter().any(|exclude| path == exclude.as_str())
}

/// Reads up to the first 512 bytes of `path` and reports whether they look
/// like text. A NUL byte anywhere in that window marks the file as binary;
/// content past the window is never inspected.
pub fn sniff_is_text(path: &Path) -> io::Result<bool> {
    let mut file = File::open(path)?;
    let mut buf = [0u8; SNIFF_LEN];
    let mut filled = 0;
    while filled < SNIFF_LEN {
        let n = file.read(&mut buf[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    Ok(!buf[..filled].contains(&0))
}
