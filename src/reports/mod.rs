//! Document output: one HTML report per inspection, batches of them, and an
//! aggregate summary.

pub mod document;
pub mod inspection_report;
pub mod summary_report;

use chrono::{Local, NaiveDateTime};
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::inspection::Inspection;
use crate::domain::status::today;
use crate::errors::AppError;

pub use inspection_report::{load_photo, render_inspection_report};
pub use summary_report::{render_summary_report, summarize};

/// Result of rendering many reports; individual failures do not stop a batch.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub total: usize,
    pub generated: Vec<PathBuf>,
    /// Inspection id and the reason its report failed.
    pub failures: Vec<(i64, String)>,
}

impl BatchOutcome {
    pub fn succeeded(&self) -> usize {
        self.generated.len()
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }
}

#[derive(Debug, Clone)]
pub struct ReportGenerator {
    output_dir: PathBuf,
    validity_months: u32,
}

impl ReportGenerator {
    /// Creates the output directory if needed.
    pub fn new(output_dir: impl Into<PathBuf>, validity_months: u32) -> Result<Self, AppError> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir).map_err(|e| {
            AppError::Io(format!("create report dir {}: {e}", output_dir.display()))
        })?;
        Ok(Self {
            output_dir,
            validity_months,
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn validity_months(&self) -> u32 {
        self.validity_months
    }

    /// Writes `inspection_report_<tag>_<id>_<timestamp>.html`.
    pub fn generate_inspection_report(&self, inspection: &Inspection) -> Result<PathBuf, AppError> {
        let generated_at = Local::now().naive_local();
        let photo = load_photo(inspection.fields.photo_path.as_deref())?;
        let markup = render_inspection_report(
            inspection,
            photo.as_ref(),
            self.validity_months,
            today(),
            generated_at,
        )?;

        let file_name = format!(
            "inspection_report_{}_{}_{}.html",
            file_safe(&inspection.fields.tag),
            inspection.id,
            stamp(generated_at)
        );
        let path = self.output_dir.join(file_name);
        fs::write(&path, markup.into_string())?;

        tracing::info!(inspection_id = inspection.id, path = %path.display(), "Report generated");
        Ok(path)
    }

    /// One report per inspection. A failing record is logged and skipped.
    pub fn generate_batch_reports(&self, inspections: &[Inspection]) -> BatchOutcome {
        let mut outcome = BatchOutcome {
            total: inspections.len(),
            ..Default::default()
        };
        tracing::info!(total = outcome.total, "Generating batch reports");

        for (i, inspection) in inspections.iter().enumerate() {
            match self.generate_inspection_report(inspection) {
                Ok(path) => outcome.generated.push(path),
                Err(e) => {
                    tracing::error!(
                        inspection_id = inspection.id,
                        position = i + 1,
                        error = %e,
                        "Report generation failed"
                    );
                    outcome.failures.push((inspection.id, e.to_string()));
                }
            }
        }

        tracing::info!(
            succeeded = outcome.succeeded(),
            total = outcome.total,
            "Batch generation finished"
        );
        outcome
    }

    /// Writes `inspection_summary_<timestamp>.html`.
    pub fn generate_summary_report(&self, inspections: &[Inspection]) -> Result<PathBuf, AppError> {
        let generated_at = Local::now().naive_local();
        let markup = render_summary_report(inspections, self.validity_months, today(), generated_at);

        let path = self
            .output_dir
            .join(format!("inspection_summary_{}.html", stamp(generated_at)));
        fs::write(&path, markup.into_string())?;

        tracing::info!(records = inspections.len(), path = %path.display(), "Summary generated");
        Ok(path)
    }
}

fn stamp(at: NaiveDateTime) -> String {
    at.format("%Y%m%d_%H%M%S").to_string()
}

/// Keeps a tag usable as part of a file name.
fn file_safe(tag: &str) -> String {
    let cleaned: String = tag
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect();
    if cleaned.is_empty() {
        "UNKNOWN".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_safe_strips_separators() {
        assert_eq!(file_safe("TQ-001"), "TQ-001");
        assert_eq!(file_safe("../x y"), "___x_y");
        assert_eq!(file_safe("  "), "UNKNOWN");
    }
}
