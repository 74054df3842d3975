pub mod ingest;

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::AppError;

pub const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "tiff"];
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;
pub const MAX_DIMENSIONS: (u32, u32) = (1920, 1080);
pub const JPEG_QUALITY: u8 = 85;

/// Directory holding normalized inspection photos.
#[derive(Debug, Clone)]
pub struct PhotoStore {
    dir: PathBuf,
    max_file_size: u64,
    max_dimensions: (u32, u32),
    jpeg_quality: u8,
}

impl PhotoStore {
    /// Opens the store, creating its directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, AppError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .map_err(|e| AppError::Io(format!("create photo dir {}: {e}", dir.display())))?;

        Ok(Self {
            dir,
            max_file_size: MAX_FILE_SIZE,
            max_dimensions: MAX_DIMENSIONS,
            jpeg_quality: JPEG_QUALITY,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Regular files currently in the photo directory.
    pub fn list_photos(&self) -> Result<Vec<PathBuf>, AppError> {
        let mut out = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.is_file() {
                out.push(path);
            }
        }
        out.sort();
        Ok(out)
    }

    /// Removes every file in the directory and returns how many went away.
    pub fn purge_all(&self) -> usize {
        match self.list_photos() {
            Ok(paths) => paths.iter().filter(|p| remove_photo_file(p)).count(),
            Err(e) => {
                tracing::warn!(dir = %self.dir.display(), error = %e, "Could not list photo directory");
                0
            }
        }
    }

    /// Removes files no inspection references anymore.
    pub fn cleanup_orphans(&self, referenced: &HashSet<PathBuf>) -> Result<usize, AppError> {
        let removed = self
            .list_photos()?
            .into_iter()
            .filter(|p| !referenced.contains(p))
            .filter(|p| remove_photo_file(p))
            .count();

        if removed > 0 {
            tracing::info!(removed, "Orphaned photos removed");
        }
        Ok(removed)
    }
}

/// Best-effort removal of a photo file. A missing file counts as removed;
/// any other failure is logged and reported as `false`.
pub fn remove_photo_file(path: impl AsRef<Path>) -> bool {
    let path = path.as_ref();
    match fs::remove_file(path) {
        Ok(()) => {
            tracing::debug!(path = %path.display(), "Photo removed");
            true
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => true,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Failed to remove photo");
            false
        }
    }
}
