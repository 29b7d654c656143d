//! Conversion configuration: fixed addressing and styling as data.
//!
//! The register layout (which rows hold keys and values, where the
//! administrator name lives) and the full styling contract of the output
//! document are explicit values handed to the extractor and renderer, so an
//! alternate register layout is a configuration change, not a code change.

/// Where the register's data lives on the active sheet.
///
/// Rows are 1-indexed, matching the spreadsheet UI convention used by the
/// register template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractConfig {
    /// A1 reference of the cell holding the administrator name
    pub administrator_cell: String,
    /// 1-indexed row holding the field names
    pub key_row: u32,
    /// 1-indexed row holding the field contents
    pub value_row: u32,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            administrator_cell: "F1".to_string(),
            key_row: 12,
            value_row: 15,
        }
    }
}

/// Full styling contract of the rendered document.
///
/// Linear measures keep the units of the register template: page geometry
/// and margins in millimeters, table column widths in inches, font size in
/// points. The renderer converts everything to twips on write.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Base font applied to all unstyled text
    pub font_name: String,
    /// Base font size in points
    pub font_size_pt: f64,
    /// Page height in millimeters (A4 portrait: 297)
    pub page_height_mm: f64,
    /// Page width in millimeters (A4 portrait: 210)
    pub page_width_mm: f64,
    /// Uniform margin and header/footer distance in millimeters;
    /// the top margin is doubled to make room for the page header
    pub space_mm: f64,
    /// Width of the ordinal column in inches
    pub ordinal_column_in: f64,
    /// Width of the key column in inches
    pub key_column_in: f64,
    /// Width of the value column in inches
    pub value_column_in: f64,
    /// Hex RGB fill for the ordinal and key columns
    pub shading_fill: String,
    /// Page header text naming the register
    pub title: String,
    /// Plain-text label preceding the bold administrator name
    pub subtitle_label: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            font_name: "Times New Roman".to_string(),
            font_size_pt: 12.0,
            page_height_mm: 297.0,
            page_width_mm: 210.0,
            space_mm: 12.7,
            ordinal_column_in: 0.42,
            key_column_in: 2.10,
            value_column_in: 4.68,
            shading_fill: "f2f2f2".to_string(),
            title: "Rejestr czynności przetwarzania danych".to_string(),
            subtitle_label: "Administrator Danych Osobowych - ".to_string(),
        }
    }
}
