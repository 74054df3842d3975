use chrono::Local;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::DynamicImage;
use rand::Rng;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use super::{PhotoStore, SUPPORTED_EXTENSIONS};
use crate::errors::AppError;

impl PhotoStore {
    /// Validates a user-supplied image and stores a normalized JPEG copy of
    /// it, returning the stored path.
    pub fn ingest(&self, source: &Path) -> Result<PathBuf, AppError> {
        self.check_source(source)?;

        let img = image::open(source).map_err(|e| {
            AppError::Validation(format!("{} is not a valid image: {e}", source.display()))
        })?;
        let img = self.fit_within_limits(img);

        let target = self.dir().join(unique_name(source));
        if let Err(e) = self.write_jpeg(&img, &target) {
            super::remove_photo_file(&target);
            return Err(e);
        }

        tracing::info!(
            source = %source.display(),
            stored = %target.display(),
            width = img.width(),
            height = img.height(),
            "Photo ingested"
        );
        Ok(target)
    }

    fn write_jpeg(&self, img: &DynamicImage, target: &Path) -> Result<(), AppError> {
        let mut writer = BufWriter::new(File::create(target)?);
        JpegEncoder::new_with_quality(&mut writer, self.jpeg_quality).encode_image(&img.to_rgb8())?;
        writer.flush()?;
        Ok(())
    }

    fn check_source(&self, source: &Path) -> Result<(), AppError> {
        let meta = fs::metadata(source)
            .map_err(|_| AppError::Validation(format!("file not found: {}", source.display())))?;
        if !meta.is_file() {
            return Err(AppError::Validation(format!(
                "not a file: {}",
                source.display()
            )));
        }

        let ext = source
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();
        if !SUPPORTED_EXTENSIONS.contains(&ext.as_str()) {
            return Err(AppError::Validation(format!(
                "unsupported photo format: .{ext}"
            )));
        }

        if meta.len() > self.max_file_size {
            return Err(AppError::Validation(format!(
                "photo too large: {:.1}MB",
                meta.len() as f64 / (1024.0 * 1024.0)
            )));
        }
        Ok(())
    }

    /// Downscales, keeping the aspect ratio, when either side exceeds the limit.
    fn fit_within_limits(&self, img: DynamicImage) -> DynamicImage {
        let (max_w, max_h) = self.max_dimensions;
        if img.width() > max_w || img.height() > max_h {
            img.resize(max_w, max_h, FilterType::Lanczos3)
        } else {
            img
        }
    }
}

/// `<stem>_<YYYYmmdd_HHMMSS>_<random>.jpg`
fn unique_name(source: &Path) -> String {
    let stem: String = source
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("photo")
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect();
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let suffix: u32 = rand::thread_rng().gen();
    format!("{stem}_{timestamp}_{suffix:08x}.jpg")
}
