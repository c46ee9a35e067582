//! The JSON Lines events file.
//!
//! One raw event per line. Malformed lines and records that fail validation
//! are reported by line number and left out of the schedule.

use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;
use ug_core::{IngestReport, RawEvent, Rejection, Schedule};

/// A line that could not be read as a raw event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedLine {
    pub line: usize,
    pub error: String,
}

impl fmt::Display for MalformedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: invalid JSON: {}", self.line, self.error)
    }
}

/// Raw records with the line each came from.
#[derive(Debug, Default)]
pub struct ParsedLines {
    pub records: Vec<RawEvent>,
    pub lines: Vec<usize>,
    pub malformed: Vec<MalformedLine>,
}

/// The events file after parsing and validation.
#[derive(Debug, Default)]
pub struct LoadedEvents {
    pub schedule: Schedule,
    pub report: IngestReport,
    pub malformed: Vec<MalformedLine>,
    lines: Vec<usize>,
}

impl LoadedEvents {
    /// Line number of a rejected record.
    pub fn line_of(&self, rejection: &Rejection) -> usize {
        self.lines.get(rejection.index).copied().unwrap_or(0)
    }

    /// Human-readable problems in file order.
    pub fn problems(&self) -> Vec<(usize, String)> {
        let mut problems: Vec<(usize, String)> = self
            .malformed
            .iter()
            .map(|m| (m.line, m.to_string()))
            .chain(self.report.rejected.iter().map(|r| {
                let line = self.line_of(r);
                let text = if r.id.is_empty() {
                    format!("line {line}: {}", r.error)
                } else {
                    format!("line {line} ({}): {}", r.id, r.error)
                };
                (line, text)
            }))
            .collect();
        problems.sort_by_key(|(line, _)| *line);
        problems
    }

    pub fn rejected_count(&self) -> usize {
        self.malformed.len() + self.report.rejected.len()
    }
}

pub fn parse_lines<R: BufRead>(reader: R) -> Result<ParsedLines> {
    let mut parsed = ParsedLines::default();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("failed to read line {}", idx + 1))?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        match serde_json::from_str::<RawEvent>(trimmed) {
            Ok(record) => {
                parsed.records.push(record);
                parsed.lines.push(idx + 1);
            }
            Err(e) => {
                tracing::warn!(line = idx + 1, error = %e, "skipping malformed line");
                parsed.malformed.push(MalformedLine {
                    line: idx + 1,
                    error: e.to_string(),
                });
            }
        }
    }
    Ok(parsed)
}

/// Reads and validates the events file. A missing file is an empty schedule.
pub fn load(path: &Path) -> Result<LoadedEvents> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "events file does not exist yet");
        return Ok(LoadedEvents::default());
    }
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let parsed = parse_lines(BufReader::new(file))
        .with_context(|| format!("failed to read {}", path.display()))?;
    Ok(ingest(parsed))
}

pub fn ingest(parsed: ParsedLines) -> LoadedEvents {
    let (schedule, report) = Schedule::from_raw(parsed.records);
    LoadedEvents {
        schedule,
        report,
        malformed: parsed.malformed,
        lines: parsed.lines,
    }
}

fn create_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    Ok(())
}

/// Sibling lock file, `events.jsonl` -> `events.jsonl.lock`.
pub fn lock_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".lock");
    PathBuf::from(name)
}

/// Takes an exclusive lock on the events file's sibling lock file.
///
/// The lock is released when the returned file is dropped.
pub fn lock(path: &Path) -> Result<File> {
    create_parent(path)?;
    let lock_file = File::create(lock_path(path)).context("failed to create lock file")?;
    lock_file
        .lock_exclusive()
        .context("failed to acquire lock")?;
    Ok(lock_file)
}

fn ends_without_newline(file: &mut File) -> io::Result<bool> {
    if file.metadata()?.len() == 0 {
        return Ok(false);
    }
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] != b'\n')
}

/// Appends one record, creating the file and its directory if needed.
///
/// A last line left without a newline is terminated first.
pub fn append(path: &Path, record: &RawEvent) -> Result<()> {
    create_parent(path)?;
    let line = serde_json::to_string(record).context("failed to encode event")?;
    let mut file = OpenOptions::new()
        .create(true)
        .read(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    if ends_without_newline(&mut file)
        .with_context(|| format!("failed to read {}", path.display()))?
    {
        writeln!(file).with_context(|| format!("failed to write {}", path.display()))?;
    }
    writeln!(file, "{line}").with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
