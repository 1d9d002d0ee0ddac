//! Rotating log files
//!
//! The active file always lives at `<dir>/<stem>.log`. Rotation renames it to
//! `<stem>.<YYYY-MM-DD_HH-MM-SS_ffffff>.log`, optionally gzips it, applies the
//! retention policy to this stem's history and starts a fresh active file.

use crate::domain::{Compression, Retention, Rotation};
use crate::{Error, Result};
use chrono::{DateTime, Duration, Local, NaiveTime, TimeZone};
use flate2::write::GzEncoder;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

const STAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S_%6f";

/// Rotation, compression and retention for one file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilePolicy {
    pub rotation: Rotation,
    pub compression: Compression,
    pub retention: Retention,
}

/// An open log file together with its rotation state
#[derive(Debug)]
pub struct RotatingFile {
    dir: PathBuf,
    stem: String,
    path: PathBuf,
    file: File,
    size: u64,
    next_rotation: Option<DateTime<Local>>,
    reopen_pending: bool,
    policy: FilePolicy,
}

impl RotatingFile {
    /// Open (or create) `path` for appending. The parent directory must exist.
    pub fn open(path: impl Into<PathBuf>, policy: FilePolicy) -> Result<Self> {
        let path = path.into();
        let dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("log")
            .to_string();

        let file = open_append(&path).map_err(|e| Error::io("failed to open log file", &path, e))?;
        let metadata = file
            .metadata()
            .map_err(|e| Error::io("failed to stat log file", &path, e))?;
        let size = metadata.len();

        // A non-empty file carried over from an earlier run rotates on the
        // schedule that applied when it was last written
        let base = match metadata.modified() {
            Ok(modified) if size > 0 => DateTime::<Local>::from(modified),
            _ => Local::now(),
        };
        let next_rotation = match policy.rotation {
            Rotation::Daily(at) => Some(next_boundary(base, at)),
            _ => None,
        };

        Ok(Self {
            dir,
            stem,
            path,
            file,
            size,
            next_rotation,
            reopen_pending: false,
            policy,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn policy(&self) -> FilePolicy {
        self.policy
    }

    /// Append one line (a newline is added)
    pub fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.write_line_at(line, Local::now())
    }

    pub(crate) fn write_line_at(&mut self, line: &str, now: DateTime<Local>) -> io::Result<()> {
        let mut buf = String::with_capacity(line.len() + 1);
        buf.push_str(line);
        buf.push('\n');
        let len = buf.len() as u64;

        if self.should_rotate(now, len) {
            self.rotate(now)?;
        } else if self.reopen_pending {
            self.reopen()?;
        }

        self.file.write_all(buf.as_bytes())?;
        self.file.flush()?;
        self.size += len;
        Ok(())
    }

    fn should_rotate(&self, now: DateTime<Local>, incoming: u64) -> bool {
        match self.policy.rotation {
            Rotation::Daily(_) => self.next_rotation.is_some_and(|at| now >= at),
            Rotation::Size(max) => self.size > 0 && self.size + incoming > max,
            Rotation::Never => false,
        }
    }

    fn rotate(&mut self, now: DateTime<Local>) -> io::Result<()> {
        // Move the schedule first so a failed rotation is not retried on
        // every following write
        if let Rotation::Daily(at) = self.policy.rotation {
            self.next_rotation = Some(next_boundary(now, at));
        }
        if let Err(e) = self.file.flush() {
            eprintln!("funlog: failed to flush {}: {}", self.path.display(), e);
        }

        let rotated = self
            .dir
            .join(format!("{}.{}.log", self.stem, now.format(STAMP_FORMAT)));
        let moved = match fs::rename(&self.path, &rotated) {
            Ok(()) => true,
            // The active file was removed behind our back: nothing to keep
            Err(e) if e.kind() == io::ErrorKind::NotFound => false,
            Err(e) => {
                eprintln!(
                    "funlog: failed to rotate {}: {}",
                    self.path.display(),
                    e
                );
                false
            }
        };

        self.reopen()?;

        if !moved {
            return Ok(());
        }

        // The fresh file is in place; failures past this point only affect history
        if self.policy.compression == Compression::Gzip {
            if let Err(e) = compress_log_file(&rotated) {
                eprintln!(
                    "funlog: failed to compress {}: {}",
                    rotated.display(),
                    e
                );
            }
        }

        if let Err(e) = self.cleanup_old_files(now) {
            eprintln!(
                "funlog: failed to apply retention in {}: {}",
                self.dir.display(),
                e
            );
        }

        Ok(())
    }

    /// Point the handle back at `path`. Until this succeeds every write
    /// tries again.
    fn reopen(&mut self) -> io::Result<()> {
        self.reopen_pending = true;
        let file = open_append(&self.path)?;
        self.size = file.metadata().map(|m| m.len()).unwrap_or(0);
        self.file = file;
        self.reopen_pending = false;
        Ok(())
    }

    /// Rotated files of this stem, oldest first
    fn history(&self) -> io::Result<Vec<(PathBuf, SystemTime)>> {
        let prefix = format!("{}.", self.stem);
        let mut files = Vec::new();

        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let path = entry.path();
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let Some(rest) = name.strip_prefix(&prefix) else {
                continue;
            };
            let stamp = rest
                .strip_suffix(".log.gz")
                .or_else(|| rest.strip_suffix(".log"));
            if !stamp.is_some_and(is_rotation_stamp) {
                continue;
            }
            if let Ok(modified) = entry.metadata().and_then(|m| m.modified()) {
                files.push((path, modified));
            }
        }

        files.sort_by_key(|(_, modified)| *modified);
        Ok(files)
    }

    fn cleanup_old_files(&self, now: DateTime<Local>) -> io::Result<()> {
        let history = self.history()?;

        let expired: Vec<&PathBuf> = match self.policy.retention {
            Retention::Forever => return Ok(()),
            Retention::Days(days) => {
                let cutoff = SystemTime::from(now - Duration::days(i64::from(days)));
                history
                    .iter()
                    .filter(|(_, modified)| *modified < cutoff)
                    .map(|(path, _)| path)
                    .collect()
            }
            Retention::Count(keep) => {
                let excess = history.len().saturating_sub(keep);
                history.iter().take(excess).map(|(path, _)| path).collect()
            }
        };

        for path in expired {
            if let Err(e) = fs::remove_file(path) {
                eprintln!("funlog: failed to remove {}: {}", path.display(), e);
            }
        }

        Ok(())
    }
}

fn open_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// First local instant at wall-clock `at` strictly after `after`
fn next_boundary(after: DateTime<Local>, at: NaiveTime) -> DateTime<Local> {
    let mut date = after.date_naive();
    loop {
        let candidate = Local.from_local_datetime(&date.and_time(at)).earliest();
        match candidate {
            Some(candidate) if candidate > after => return candidate,
            _ => {}
        }
        date = match date.succ_opt() {
            Some(next) => next,
            None => return after + Duration::days(1),
        };
    }
}

/// `YYYY-MM-DD_HH-MM-SS_ffffff`
fn is_rotation_stamp(s: &str) -> bool {
    const SHAPE: &[u8] = b"dddd-dd-dd_dd-dd-dd_dddddd";
    s.len() == SHAPE.len()
        && s.bytes().zip(SHAPE).all(|(b, &shape)| match shape {
            b'd' => b.is_ascii_digit(),
            sep => b == sep,
        })
}

/// Gzip `path` into `path.log.gz` and remove the original
pub fn compress_log_file(path: &Path) -> io::Result<PathBuf> {
    let gz_path = path.with_extension("log.gz");

    let mut input = File::open(path)?;
    let output = File::create(&gz_path)?;
    let mut encoder = GzEncoder::new(output, flate2::Compression::default());
    io::copy(&mut input, &mut encoder)?;
    encoder.finish()?;

    fs::remove_file(path)?;
    Ok(gz_path)
}
