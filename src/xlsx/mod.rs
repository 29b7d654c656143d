//! Register extraction from Excel (.xlsx) files
//!
//! Reads fixed rows and a fixed administrator cell from the active sheet,
//! undoing the merged-cell artifacts the register template produces.

mod extractor;

pub use extractor::{RecordExtractor, XLSX_EXTENSION};
