//! Record extractor implementation - Excel (.xlsx) → ExtractedRecord

use crate::config::ExtractConfig;
use crate::error::{ConvertError, ConvertResult};
use crate::types::{Entry, ExtractedRecord};
use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use regex::Regex;
use std::path::Path;

/// Spreadsheet extension token stripped from input filenames
pub const XLSX_EXTENSION: &str = "xlsx";

/// Extractor turning one register spreadsheet into one [`ExtractedRecord`].
///
/// The workbook is opened read-only and values-only: stored formulas are
/// never evaluated, only their cached results are read. The handle lives
/// for the duration of a single [`extract`](RecordExtractor::extract) call.
pub struct RecordExtractor {
    config: ExtractConfig,
    whitespace: Regex,
}

impl RecordExtractor {
    /// Create an extractor for the given register layout
    pub fn new(config: ExtractConfig) -> Self {
        Self {
            config,
            whitespace: Regex::new(r"\s+").expect("literal regex"),
        }
    }

    /// Extract the record from the spreadsheet at `path`
    pub fn extract(&self, path: &Path) -> ConvertResult<ExtractedRecord> {
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                ConvertError::MalformedSpreadsheet(format!(
                    "{}: file name is not valid UTF-8",
                    path.display()
                ))
            })?;

        let base_identifier = strip_extension(filename);
        if base_identifier.is_empty() {
            return Err(ConvertError::MalformedSpreadsheet(format!(
                "{}: file name reduces to an empty base identifier",
                path.display()
            )));
        }

        let mut workbook: Xlsx<_> = open_workbook(path).map_err(|e| {
            ConvertError::MalformedSpreadsheet(format!(
                "{}: failed to open workbook: {e}",
                path.display()
            ))
        })?;

        // Active sheet = first sheet of the workbook
        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| {
                ConvertError::MalformedSpreadsheet(format!(
                    "{}: workbook has no sheets",
                    path.display()
                ))
            })?;
        let range = workbook.worksheet_range(&sheet_name).map_err(|e| {
            ConvertError::MalformedSpreadsheet(format!(
                "{}: cannot open sheet '{sheet_name}': {e}",
                path.display()
            ))
        })?;

        let administrator = self.read_administrator(&range, path)?;

        // Rows are 1-indexed in the layout configuration
        if self.config.key_row == 0 || self.config.value_row == 0 {
            return Err(ConvertError::MalformedSpreadsheet(format!(
                "{}: key/value rows are 1-indexed and must be at least 1",
                path.display()
            )));
        }

        let keys = self.reduce_merged_row(&read_physical_row(&range, self.config.key_row - 1));
        let values = self.reduce_merged_row(&read_physical_row(&range, self.config.value_row - 1));

        if keys.len() != values.len() {
            return Err(ConvertError::MalformedSpreadsheet(format!(
                "{}: row layout mismatch: {} keys vs {} values after merged-cell reduction",
                path.display(),
                keys.len(),
                values.len()
            )));
        }
        ensure_no_empty_cells(&keys, "key", self.config.key_row, path)?;
        ensure_no_empty_cells(&values, "value", self.config.value_row, path)?;

        let entries: Vec<Entry> = keys
            .into_iter()
            .zip(values)
            .map(|(key, value)| Entry::new(key, value))
            .collect();

        tracing::debug!(
            file = %path.display(),
            entries = entries.len(),
            "extracted register record"
        );

        Ok(ExtractedRecord::new(base_identifier, administrator, entries))
    }

    /// Read the administrator display name at the configured cell, as-is
    fn read_administrator(&self, range: &Range<Data>, path: &Path) -> ConvertResult<String> {
        let (row, col) = parse_a1(&self.config.administrator_cell).ok_or_else(|| {
            ConvertError::MalformedSpreadsheet(format!(
                "invalid administrator cell reference '{}'",
                self.config.administrator_cell
            ))
        })?;

        match range.get_value((row, col)) {
            Some(Data::Empty) | None => Err(ConvertError::MalformedSpreadsheet(format!(
                "{}: administrator cell {} is absent",
                path.display(),
                self.config.administrator_cell
            ))),
            Some(value) => Ok(value.to_string()),
        }
    }

    /// Recover the logical row from a physically merged one.
    ///
    /// The register template merges each logical cell across two physical
    /// columns and stores the value in the second one, so only cells at odd
    /// physical indices (1, 3, 5, ...) are kept. Each kept value has every
    /// whitespace run, edges included, collapsed to a single space.
    fn reduce_merged_row(&self, cells: &[String]) -> Vec<String> {
        cells
            .iter()
            .enumerate()
            .filter(|(i, _)| i % 2 == 1)
            .map(|(_, cell)| self.normalize_whitespace(cell))
            .collect()
    }

    /// Collapse every whitespace run (newlines included) into one space
    fn normalize_whitespace(&self, text: &str) -> String {
        self.whitespace.replace_all(text, " ").into_owned()
    }
}

/// Read one physical row (0-indexed) up to its last non-empty cell.
///
/// Trailing never-written cells are dropped so the two target rows keep
/// their own extents, the way a streaming reader yields ragged rows.
fn read_physical_row(range: &Range<Data>, row: u32) -> Vec<String> {
    let Some((_, end_col)) = range.end() else {
        return Vec::new();
    };

    let mut cells: Vec<String> = (0..=end_col)
        .map(|col| match range.get_value((row, col)) {
            Some(Data::Empty) | None => String::new(),
            Some(value) => value.to_string(),
        })
        .collect();

    while cells.last().is_some_and(|cell| cell.is_empty()) {
        cells.pop();
    }
    cells
}

/// A logical cell left empty after reduction means the register form was
/// filled out incompletely; the record would be malformed, so refuse it.
fn ensure_no_empty_cells(
    cells: &[String],
    row_name: &str,
    row: u32,
    path: &Path,
) -> ConvertResult<()> {
    if cells.iter().any(|cell| cell.is_empty()) {
        return Err(ConvertError::MalformedSpreadsheet(format!(
            "{}: empty cell after merged-cell reduction in {row_name} row {row}",
            path.display()
        )));
    }
    Ok(())
}

/// Strip a trailing `xlsx` token (any letter case, matching the pipeline's
/// case-insensitive candidate filter), then any trailing dots.
///
/// `"Report.xlsx"` and `"Report.XLSX"` → `"Report"`; a name without the
/// token is unchanged.
pub fn strip_extension(filename: &str) -> &str {
    let token_len = XLSX_EXTENSION.len();
    let stripped = match filename.len().checked_sub(token_len) {
        Some(cut)
            if filename.is_char_boundary(cut)
                && filename[cut..].eq_ignore_ascii_case(XLSX_EXTENSION) =>
        {
            &filename[..cut]
        }
        _ => filename,
    };
    stripped.trim_end_matches('.')
}

/// Parse an A1 cell reference into 0-indexed (row, column)
pub fn parse_a1(reference: &str) -> Option<(u32, u32)> {
    let letters: String = reference
        .chars()
        .take_while(|c| c.is_ascii_alphabetic())
        .collect();
    let digits = &reference[letters.len()..];
    if letters.is_empty() || digits.is_empty() {
        return None;
    }

    let mut col: u32 = 0;
    for c in letters.chars() {
        col = col * 26 + (c.to_ascii_uppercase() as u32 - 'A' as u32 + 1);
    }
    let row: u32 = digits.parse().ok()?;
    if row == 0 {
        return None;
    }
    Some((row - 1, col - 1))
}
