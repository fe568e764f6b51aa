//! Directory listing filtered by extension

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::ConfigScanner;

/// Lists regular files with `read_dir`, sorted by file name
#[derive(Debug, Clone, Copy, Default)]
pub struct FsScanner;

impl ConfigScanner for FsScanner {
    fn list_files(&self, dir: &Path, extensions: &[&str]) -> io::Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();

            // Symlinks to files count; directories are never descended into
            if !path.is_file() {
                continue;
            }

            let matches = path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| extensions.contains(&ext))
                .unwrap_or(false);

            if matches {
                files.push(path);
            }
        }

        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(files)
    }
}
