//! Workload trace parsing and loading.
//!
//! A trace is a text stream with one instruction number per line. Lines with
//! no decimal digit are skipped and a line reading `end` (any case) stops the
//! trace.

use pagesim_common::{Page, ProcessId, Result, SimError};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::warn;

/// Pages read from one trace stream.
#[derive(Debug, Default)]
pub struct TraceScan {
    /// Pages in program order, at most the configured limit.
    pub pages: Vec<Page>,
    /// Pages read past the limit and discarded.
    pub dropped: usize,
    /// Error that stopped the scan early, if any.
    pub error: Option<SimError>,
}

/// Reads pages from `reader` until `end`, EOF, or the first error.
///
/// `source` names the stream in error messages. Pages read before an error
/// are kept.
pub fn scan_trace<R: BufRead>(reader: R, source: &str, max_pages: usize) -> TraceScan {
    let mut scan = TraceScan::default();

    for (index, line) in reader.lines().enumerate() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                scan.error = Some(SimError::Io(e));
                break;
            }
        };
        let text = line.trim();
        if text.eq_ignore_ascii_case("end") {
            break;
        }
        if !text.bytes().any(|b| b.is_ascii_digit()) {
            continue;
        }

        let Some(page) = text.parse::<u32>().ok().and_then(Page::new) else {
            scan.error = Some(SimError::InvalidInstruction {
                trace: source.to_string(),
                line: index + 1,
                text: text.to_string(),
            });
            break;
        };

        if scan.pages.len() < max_pages {
            scan.pages.push(page);
        } else {
            scan.dropped += 1;
        }
    }

    scan
}

/// Extracts the process id from the digits of a trace path, as given.
///
/// `process12.txt` yields 12 and `run2/process1.txt` yields 21. The path is
/// not canonicalized, so the same file named two ways can get two ids.
pub fn process_id_from_path(path: &Path) -> Result<ProcessId> {
    let name = path.display().to_string();
    let digits: String = name.chars().filter(char::is_ascii_digit).collect();

    digits
        .parse::<u32>()
        .map(ProcessId)
        .map_err(|_| SimError::MissingProcessId { trace: name })
}

/// A loaded trace ready to become a process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trace {
    pub id: ProcessId,
    pub name: String,
    pub pages: Vec<Page>,
}

impl Trace {
    /// Creates a trace from pages already in memory.
    pub fn new(id: ProcessId, name: impl Into<String>, pages: Vec<Page>) -> Self {
        Self {
            id,
            name: name.into(),
            pages,
        }
    }

    /// Loads a trace file.
    ///
    /// A path without digits is an error. Failing to open or read the
    /// file is logged and yields the pages read before the failure, possibly
    /// none.
    pub fn load(path: &Path, max_pages: usize) -> Result<Self> {
        let id = process_id_from_path(path)?;
        let name = path.display().to_string();

        let scan = match File::open(path) {
            Ok(file) => scan_trace(BufReader::new(file), &name, max_pages),
            Err(e) => TraceScan {
                error: Some(SimError::Io(e)),
                ..TraceScan::default()
            },
        };

        if let Some(error) = &scan.error {
            warn!(trace = %name, pages = scan.pages.len(), %error, "trace read stopped early");
        }
        if scan.dropped > 0 {
            warn!(trace = %name, dropped = scan.dropped, max_pages, "trace truncated");
        }

        Ok(Self::new(id, name, scan.pages))
    }
}
