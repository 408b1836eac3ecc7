//! Line-delimited JSON story cache.
//!
//! One [`Story`] per line, no header or version. The file is always replaced
//! wholesale; there is no incremental update and no expiry.

/// Cache error types.
pub mod error;


pub use error::{CacheError, CacheResult};

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::story::Story;

/// Reads and replaces the on-disk story collection.
#[derive(Debug)]
pub struct StoryCache {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl StoryCache {
    /// Creates a cache backed by the file at `path` (not created until [`save`](Self::save)).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Returns the cache file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns `true` if a cache file is present.
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Loads the cached collection in file order.
    ///
    /// Returns `Ok(None)` when no cache file exists. Any line that does not
    /// decode as a [`Story`] fails the whole load.
    pub fn load(&self) -> CacheResult<Option<Vec<Story>>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No story cache present");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let mut stories = Vec::new();
        for (idx, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            let story: Story =
                serde_json::from_str(&line).map_err(|source| CacheError::Decode {
                    path: self.path.clone(),
                    line: idx + 1,
                    source,
                })?;
            stories.push(story);
        }

        info!(
            path = %self.path.display(),
            stories = stories.len(),
            "Loaded story cache"
        );

        Ok(Some(stories))
    }

    /// Replaces the cache file with `stories`, one JSON object per line.
    ///
    /// Lines are written to a sibling temp file which is then renamed over the
    /// cache, so readers see either the old or the new collection.
    pub fn save(&self, stories: &[Story]) -> CacheResult<()> {
        let _guard = self.write_lock.lock();

        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let temp = NamedTempFile::new_in(dir)?;
        {
            let mut writer = BufWriter::new(temp.as_file());
            for story in stories {
                serde_json::to_writer(&mut writer, story).map_err(CacheError::Encode)?;
                writer.write_all(b"\n")?;
            }
            writer.flush()?;
        }
        temp.as_file().sync_all()?;
        temp.persist(&self.path).map_err(|e| CacheError::Io(e.error))?;

        info!(
            path = %self.path.display(),
            stories = stories.len(),
            "Wrote story cache"
        );

        Ok(())
    }
}
