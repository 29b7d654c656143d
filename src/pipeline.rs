//! Batch conversion pipeline: every register spreadsheet in a directory
//! becomes one styled document in another.
//!
//! Each file is converted independently and sequentially; a failure on one
//! file is recorded and the batch continues.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{ExtractConfig, RenderConfig};
use crate::docx::DocxRenderer;
use crate::error::{ConvertError, ConvertResult};
use crate::xlsx::{RecordExtractor, XLSX_EXTENSION};

/// Outcome of one batch run
#[derive(Debug, Default)]
pub struct ConversionSummary {
    /// Output paths of successfully converted files, in batch order
    pub converted: Vec<PathBuf>,
    /// Input paths that failed, with the per-file error
    pub failed: Vec<(PathBuf, ConvertError)>,
}

impl ConversionSummary {
    pub fn total(&self) -> usize {
        self.converted.len() + self.failed.len()
    }
}

/// Convert every `*.xlsx` file in `input_dir` into a `.docx` in `output_dir`.
///
/// Both directories are validated up front; per-file extraction or
/// rendering errors land in the summary instead of aborting the batch.
pub fn convert_directory(
    input_dir: &Path,
    output_dir: &Path,
    extract_config: &ExtractConfig,
    render_config: &RenderConfig,
) -> ConvertResult<ConversionSummary> {
    if !input_dir.is_dir() {
        return Err(ConvertError::InvalidInputLocation(format!(
            "{}: directory does not exist",
            input_dir.display()
        )));
    }
    if !output_dir.is_dir() {
        return Err(ConvertError::UnwritableOutput(format!(
            "{}: directory does not exist",
            output_dir.display()
        )));
    }

    let extractor = RecordExtractor::new(extract_config.clone());
    let renderer = DocxRenderer::new(render_config.clone());

    let mut summary = ConversionSummary::default();
    for path in list_spreadsheets(input_dir)? {
        match convert_file(&extractor, &renderer, &path, output_dir) {
            Ok(output) => {
                tracing::info!(input = %path.display(), output = %output.display(), "converted");
                summary.converted.push(output);
            }
            Err(e) => {
                tracing::warn!(input = %path.display(), error = %e, "conversion failed");
                summary.failed.push((path, e));
            }
        }
    }

    Ok(summary)
}

/// Convert a single spreadsheet: extract, then render.
///
/// Pure function of (input file, configuration); the workbook handle is
/// released before the document is written.
pub fn convert_file(
    extractor: &RecordExtractor,
    renderer: &DocxRenderer,
    input: &Path,
    output_dir: &Path,
) -> ConvertResult<PathBuf> {
    let record = extractor.extract(input)?;
    renderer.render(&record, output_dir)
}

/// Candidate input files: extension `xlsx`, case-insensitive, sorted by
/// name for a deterministic batch order
fn list_spreadsheets(dir: &Path) -> ConvertResult<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case(XLSX_EXTENSION))
        })
        .collect();
    files.sort();
    Ok(files)
}
