//! Storage capabilities consumed by the loader
//!
//! - `StorageProbe`: can the storage root be read, written, entered
//! - `ConfigScanner`: which configuration files sit in a directory

#[cfg(not(unix))]
mod fallback;
mod scan;
#[cfg(unix)]
mod unix;

use std::io;
use std::path::{Path, PathBuf};

pub use scan::FsScanner;

/// Availability checks on the storage that holds the configuration directory
pub trait StorageProbe: Send + Sync {
    /// Storage is mounted and readable at all
    fn is_readable(&self) -> bool;

    /// Storage accepts writes (needed to create the configuration directory)
    fn is_writable(&self) -> bool;

    /// The process is allowed to access the storage contents
    fn permission_granted(&self) -> bool;
}

/// Non-recursive listing of configuration files
pub trait ConfigScanner: Send + Sync {
    /// Files directly inside `dir` whose extension equals one of `extensions`
    fn list_files(&self, dir: &Path, extensions: &[&str]) -> io::Result<Vec<PathBuf>>;
}

/// Probe backed by the local filesystem at `root`
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root: PathBuf,
}

impl LocalStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl StorageProbe for LocalStorage {
    fn is_readable(&self) -> bool {
        self.root.is_dir() && platform::can_read(&self.root)
    }

    fn is_writable(&self) -> bool {
        platform::can_write(&self.root)
    }

    fn permission_granted(&self) -> bool {
        platform::can_enter(&self.root)
    }
}

#[cfg(not(unix))]
use fallback as platform;
#[cfg(unix)]
use unix as platform;
