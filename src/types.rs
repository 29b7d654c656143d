//! Data model for one converted register.

/// One key/value field of the register, in source column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Field name from the key row
    pub key: String,
    /// Field content from the value row
    pub value: String,
}

impl Entry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Immutable result of extracting one register spreadsheet.
///
/// `entries` keeps the column order of the source rows; entry *i* becomes
/// row *i* of the rendered table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedRecord {
    /// Input filename with the spreadsheet extension and trailing dots removed
    pub base_identifier: String,
    /// Display name of the register administrator (cell F1 by convention)
    pub administrator: String,
    /// Ordered (key, value) pairs recovered from the key/value rows
    pub entries: Vec<Entry>,
}

impl ExtractedRecord {
    pub fn new(
        base_identifier: impl Into<String>,
        administrator: impl Into<String>,
        entries: Vec<Entry>,
    ) -> Self {
        Self {
            base_identifier: base_identifier.into(),
            administrator: administrator.into(),
            entries,
        }
    }
}
