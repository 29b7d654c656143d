//! rcpd-convert - Register of Processing Operations converter
//!
//! This library turns register spreadsheets (.xlsx) into styled Word
//! documents (.docx), one output per input file.
//!
//! # Features
//!
//! - Fixed-address extraction (administrator cell, key row, value row)
//! - Merged-cell artifact reduction (odd physical indices carry the values)
//! - Deterministic styling: A4 page with doubled top margin, page header,
//!   bold-label subtitle, centered three-column table with shaded columns
//! - Per-file isolation: one bad register never aborts the batch
//!
//! # Example
//!
//! ```no_run
//! use rcpd_convert::config::{ExtractConfig, RenderConfig};
//! use rcpd_convert::pipeline::convert_directory;
//! use std::path::Path;
//!
//! let summary = convert_directory(
//!     Path::new("excel"),
//!     Path::new("word"),
//!     &ExtractConfig::default(),
//!     &RenderConfig::default(),
//! )?;
//!
//! println!("Converted: {}", summary.converted.len());
//! println!("Failed: {}", summary.failed.len());
//! # Ok::<(), rcpd_convert::error::ConvertError>(())
//! ```

pub mod cli;
pub mod config;
pub mod docx;
pub mod error;
pub mod pipeline;
pub mod types;
pub mod xlsx;

// Re-export commonly used types
pub use config::{ExtractConfig, RenderConfig};
pub use docx::{DocxRenderer, DOCX_EXTENSION};
pub use error::{ConvertError, ConvertResult};
pub use pipeline::{convert_directory, ConversionSummary};
pub use types::{Entry, ExtractedRecord};
pub use xlsx::RecordExtractor;
