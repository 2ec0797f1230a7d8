//! Flat-file page storage.
//!
//! Each page body lives in `<data_dir>/<title>.txt`. There is no caching,
//! locking, temp-file or fsync discipline: a save is a single whole-file
//! write and concurrent saves to one title are last-write-wins.

use std::io;
use std::path::{Path, PathBuf};

use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

use crate::page::Title;

/// Extension appended to the title to form the file name.
const PAGE_EXTENSION: &str = "txt";

/// Owner read/write only. Applied when the file is created.
#[cfg(unix)]
const PAGE_FILE_MODE: u32 = 0o600;

/// Reads and writes raw page bodies under a data directory.
#[derive(Debug, Clone)]
pub struct Storage {
    data_dir: PathBuf,
}

impl Storage {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// File that holds the body of `title`.
    pub fn path_for(&self, title: &Title) -> PathBuf {
        self.data_dir.join(format!("{title}.{PAGE_EXTENSION}"))
    }

    /// Create the data directory if it does not exist yet.
    pub async fn ensure_data_dir(&self) -> io::Result<()> {
        fs::create_dir_all(&self.data_dir).await
    }

    /// Whether the data directory exists and is not marked read-only.
    ///
    /// Only inspects permission bits; it does not attempt a write.
    pub async fn is_writable(&self) -> bool {
        match fs::metadata(&self.data_dir).await {
            Ok(meta) => meta.is_dir() && !meta.permissions().readonly(),
            Err(_) => false,
        }
    }

    /// Write `body` to the page file, creating or truncating it.
    pub async fn save(&self, title: &Title, body: &[u8]) -> io::Result<()> {
        let path = self.path_for(title);

        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(PAGE_FILE_MODE);

        let mut file = options.open(&path).await?;
        file.write_all(body).await?;
        // tokio completes writes in the background; flush so errors surface here
        file.flush().await?;
        Ok(())
    }

    /// Read the full page file.
    pub async fn load(&self, title: &Title) -> io::Result<Vec<u8>> {
        fs::read(self.path_for(title)).await
    }
}
