use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};

use crate::export::EXPORT_BASENAME;

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_file()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(())
    }

    /// Read a whole file into memory
    pub fn read_bytes<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
        fs::read(&path).with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write bytes to a file, creating the parent directory first
    pub fn write_bytes<P: AsRef<Path>>(path: P, content: &[u8]) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                Self::ensure_dir(parent)?;
            }
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))
    }

    // @generates: `<dir>/translations.<ext>`
    pub fn export_path<P: AsRef<Path>>(dir: P, extension: &str) -> PathBuf {
        dir.as_ref().join(format!("{}.{}", EXPORT_BASENAME, extension))
    }

    // @generates: `<dir>/translations_<YYYYMMDD-HHMMSS>.<ext>`
    pub fn timestamped_path<P: AsRef<Path>>(dir: P, extension: &str, at: DateTime<Local>) -> PathBuf {
        dir.as_ref().join(format!(
            "{}_{}.{}",
            EXPORT_BASENAME,
            at.format("%Y%m%d-%H%M%S"),
            extension
        ))
    }

    /// Write each `(extension, bytes)` export into `dir` and return the written paths.
    ///
    /// With `timestamp` set the files get timestamped names, otherwise the fixed
    /// `translations.<ext>` names are used and earlier exports are overwritten.
    pub fn save_exports<P: AsRef<Path>>(
        dir: P,
        exports: &[(&str, &[u8])],
        timestamp: Option<DateTime<Local>>,
    ) -> Result<Vec<PathBuf>> {
        let dir = dir.as_ref();
        Self::ensure_dir(dir)?;

        let mut written = Vec::with_capacity(exports.len());
        for (extension, bytes) in exports {
            let path = match timestamp {
                Some(at) => Self::timestamped_path(dir, extension, at),
                None => Self::export_path(dir, extension),
            };
            Self::write_bytes(&path, bytes)?;
            written.push(path);
        }
        Ok(written)
    }
}
