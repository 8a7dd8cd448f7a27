use std::fs::{self, File};
use std::io::{Read, Seek, SeekFrom};
use std::path::PathBuf;

use memchr::memchr_iter;

use crate::context::LogFinder;
use crate::error::TrackerError;

/// What a call to [`LogTailer::load`] found on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// No log path could be resolved.
    NotReady,
    /// File size matches what we already have.
    Unchanged,
    /// The file grew; this many new bytes were appended to the cache.
    Appended(usize),
    /// The file shrank or was seen for the first time and has been read in full.
    Replaced,
}

/// Owns the log file handle and a cached copy of everything read so far.
///
/// The cache only ever grows by appending, or is swapped out wholesale when
/// the game starts a fresh log.
#[derive(Debug, Default)]
pub struct LogTailer {
    path: Option<PathBuf>,
    handle: Option<File>,
    content: Vec<u8>,
}

impl LogTailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    pub fn byte_length(&self) -> usize {
        self.content.len()
    }

    /// Close the handle and drop the cache. The next load re-resolves the path.
    pub fn reset(&mut self) {
        self.handle = None;
        self.path = None;
        self.content.clear();
    }

    /// Pull any new bytes from the log into the cache.
    pub fn load(&mut self, finder: &dyn LogFinder) -> Result<LoadOutcome, TrackerError> {
        if self.path.is_none() {
            self.path = finder.find_log_path();
        }
        let Some(path) = self.path.clone() else {
            return Ok(LoadOutcome::NotReady);
        };

        let file_size = match fs::metadata(&path) {
            Ok(meta) => meta.len(),
            Err(e) => {
                // Gone for now; look it up again next poll
                self.handle = None;
                self.path = None;
                return Err(TrackerError::io(path, e));
            }
        };
        let cached_length = self.content.len() as u64;

        if file_size < cached_length || (cached_length == 0 && file_size > 0) {
            return self.reload(finder);
        }

        if file_size > cached_length {
            let mut handle = match self.handle.take() {
                Some(handle) => handle,
                None => File::open(&path).map_err(|e| TrackerError::io(&path, e))?,
            };

            let mut delta = Vec::new();
            handle
                .seek(SeekFrom::Start(cached_length))
                .and_then(|_| handle.read_to_end(&mut delta))
                .map_err(|e| TrackerError::io(&path, e))?;

            self.handle = Some(handle);
            self.content.extend_from_slice(&delta);
            return Ok(LoadOutcome::Appended(delta.len()));
        }

        Ok(LoadOutcome::Unchanged)
    }

    /// Reopen the (re-resolved) log and read it from the start. The cache is
    /// only replaced once the read succeeds.
    fn reload(&mut self, finder: &dyn LogFinder) -> Result<LoadOutcome, TrackerError> {
        self.handle = None;
        self.path = finder.find_log_path();
        let Some(path) = self.path.clone() else {
            self.content.clear();
            return Ok(LoadOutcome::NotReady);
        };

        let mut file = File::open(&path).map_err(|e| TrackerError::io(&path, e))?;
        let mut content = Vec::new();
        file.read_to_end(&mut content)
            .map_err(|e| TrackerError::io(&path, e))?;

        tracing::info!(path = %path.display(), bytes = content.len(), "Loaded new log file");
        self.content = content;
        self.handle = Some(file);
        Ok(LoadOutcome::Replaced)
    }

    /// Complete (newline-terminated) lines starting at byte offset `from`,
    /// plus the offset just past the last one. A trailing partial line is
    /// left for a later call.
    pub fn complete_lines(&self, from: usize) -> (Vec<String>, usize) {
        let Some(bytes) = self.content.get(from..) else {
            return (Vec::new(), from);
        };

        let mut lines = Vec::new();
        let mut start = 0;
        for end in memchr_iter(b'\n', bytes) {
            let raw = &bytes[start..end];
            let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
            lines.push(String::from_utf8_lossy(raw).into_owned());
            start = end + 1;
        }
        (lines, from + start)
    }
}
