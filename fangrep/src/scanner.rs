use regex::Regex;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;
use tracing::{debug, trace};

use crate::errors::{SearchError, SearchResult};

const BUFFER_CAPACITY: usize = 8192;

/// Reads one file line-by-line and collects every line the matcher accepts,
/// in file order.
///
/// A failed open or a read failure mid-file (including invalid UTF-8) is
/// returned as an error; the scheduler treats either as fatal to the whole
/// search rather than skipping the file.
pub fn scan_file(matcher: &Regex, path: &Path) -> SearchResult<Vec<String>> {
    trace!("scanning file: {}", path.display());
    let file = File::open(path).map_err(|e| SearchError::file_open(path, e))?;
    let mut reader = BufReader::with_capacity(BUFFER_CAPACITY, file);

    let mut matches = Vec::new();
    let mut line = String::with_capacity(256);
    loop {
        line.clear();
        let read = reader
            .read_line(&mut line)
            .map_err(|e| SearchError::file_read(path, e))?;
        if read == 0 {
            break;
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        if matcher.is_match(&line) {
            trace!("match in {}: {}", path.display(), line);
            matches.push(line.clone());
        }
    }

    debug!("found {} matches in {}", matches.len(), path.display());
    Ok(matches)
}

/// Writes each matched line to the results stream, one per line.
///
/// Each line is a separate write call; when many scanners emit concurrently
/// the stream serializes individual calls only, so lines from different
/// files may interleave.
pub fn emit_matches<W: Write>(out: &mut W, matches: &[String]) -> io::Result<()> {
    for line in matches {
        writeln!(out, "{line}")?;
    }
    Ok(())
}
