//! Styled Word (.docx) rendering
//!
//! A .docx file is a ZIP of OOXML parts. The renderer builds each part as a
//! string (content types, relationships, styles, page header, document body)
//! and packages them in memory before a single filesystem write.

mod renderer;

pub use renderer::{DocxRenderer, DOCX_EXTENSION};
