//! Metadata-based checks where access(2) is not available

use std::fs;
use std::path::Path;

pub fn can_read(path: &Path) -> bool {
    fs::read_dir(path).is_ok()
}

pub fn can_write(path: &Path) -> bool {
    fs::metadata(path)
        .map(|m| !m.permissions().readonly())
        .unwrap_or(false)
}

pub fn can_enter(path: &Path) -> bool {
    can_read(path)
}
