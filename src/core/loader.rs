//! Event file session management.
//!
//! `EventFile` owns the open file handle for the lifetime of a viewing
//! session and serves decoded events by index. Dropping the value releases
//! the handle, on every exit path.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use super::error::{self, AppError};
use super::event::Event;
use super::format::{FormatError, SctReader};

/// Decoded events kept around the cursor. The map is cleared wholesale when
/// full; stepping through a file never grows memory without bound.
const CACHE_CAPACITY: usize = 64;

/// An open SCT event file.
pub struct EventFile {
    path: PathBuf,
    reader: SctReader<BufReader<File>>,
    cache: HashMap<usize, Event>,
}

impl EventFile {
    /// Open `path` and validate its header.
    pub fn open(path: &Path) -> Result<Self, AppError> {
        let file = File::open(path).map_err(|e| error::from_io_error(path.to_path_buf(), e))?;
        let reader = SctReader::new(BufReader::new(file))
            .map_err(|e| error::from_format_error(path, e))?;

        Ok(Self {
            path: path.to_path_buf(),
            reader,
            cache: HashMap::new(),
        })
    }

    /// Path this session was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Total number of events in the file.
    pub fn event_count(&self) -> usize {
        self.reader.event_count()
    }

    /// Fetch one event, decoding it on demand.
    pub fn event(&mut self, index: usize) -> Result<Event, AppError> {
        if let Some(event) = self.cache.get(&index) {
            return Ok(event.clone());
        }

        let event = self.reader.read_event(index).map_err(|e| match e {
            FormatError::EventOutOfRange { index, count } => {
                AppError::EventOutOfRange { index, count }
            }
            other => AppError::EventDecode {
                index,
                message: other.to_string(),
            },
        })?;

        if self.cache.len() >= CACHE_CAPACITY {
            self.cache.clear();
        }
        self.cache.insert(index, event.clone());
        Ok(event)
    }
}
