use anyhow::Result;
use std::path::PathBuf;

/// Concerned with reading candidate names from multiple file sources.
pub mod file;
pub use file::MultiFileScanner;

/// Concerned with reading candidate names from standard input.
pub mod stdin;
pub use stdin::StdinScanner;


/// A line whose first non-blank character is this is a comment.
const COMMENT: char = '#';

/// Extracts the candidate name from one input line. Blank lines and comment lines yield
/// nothing. Any other line is judged exactly as written, less a trailing `\r`.
fn candidate(line: &str) -> Option<String> {
    let content = line.trim_start();
    if content.trim_end().is_empty() || content.starts_with(COMMENT) {
        return None;
    }
    Some(line.strip_suffix('\r').unwrap_or(line).to_string())
}

/// Yields the names given on the command line, or reads them from `files`, or from
/// standard input when neither is given.
pub fn init(names: &[String], files: &[PathBuf]) -> Result<Box<dyn Iterator<Item = String>>> {
    if !names.is_empty() {
        log::debug!("checking {} names from the command line", names.len());
        return Ok(Box::new(names.to_vec().into_iter()));
    }
    if files.is_empty() {
        log::debug!("reading names from stdin");
        return Ok(StdinScanner::init());
    }
    MultiFileScanner::init(files)
}
