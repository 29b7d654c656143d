//! DOCX writer

use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use crate::config::RenderConfig;
use crate::error::{ConvertError, ConvertResult};
use crate::types::ExtractedRecord;

/// Document extension appended to the base identifier
pub const DOCX_EXTENSION: &str = "docx";

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
    <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
    <Default Extension="xml" ContentType="application/xml"/>
    <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
    <Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/>
    <Override PartName="/word/header1.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.header+xml"/>
</Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
</Relationships>"#;

const DOCUMENT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
    <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/header" Target="header1.xml"/>
</Relationships>"#;

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const R_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// Renderer turning one [`ExtractedRecord`] into a saved, styled document.
///
/// Rendering order follows the structure of the output: base style, page
/// geometry, page header, subtitle paragraph, then the three-column table.
pub struct DocxRenderer {
    config: RenderConfig,
}

impl DocxRenderer {
    /// Create a renderer with the given styling contract
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Render `record` to `<out_dir>/<base_identifier>.docx`.
    ///
    /// The document is packaged fully in memory and persisted with a single
    /// write, so a failed save leaves no half-written file behind.
    pub fn render(&self, record: &ExtractedRecord, out_dir: &Path) -> ConvertResult<PathBuf> {
        if !out_dir.is_dir() {
            return Err(ConvertError::UnwritableOutput(format!(
                "{}: directory does not exist",
                out_dir.display()
            )));
        }

        let path = out_dir.join(format!("{}.{}", record.base_identifier, DOCX_EXTENSION));
        let bytes = self.package(record)?;
        fs::write(&path, bytes).map_err(|e| {
            ConvertError::UnwritableOutput(format!("{}: {e}", path.display()))
        })?;

        tracing::debug!(file = %path.display(), rows = record.entries.len(), "rendered document");
        Ok(path)
    }

    /// Package all OOXML parts into an in-memory ZIP
    fn package(&self, record: &ExtractedRecord) -> ConvertResult<Vec<u8>> {
        let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = zip::write::SimpleFileOptions::default();

        zip.start_file("[Content_Types].xml", options)?;
        zip.write_all(CONTENT_TYPES.as_bytes())?;

        zip.start_file("_rels/.rels", options)?;
        zip.write_all(ROOT_RELS.as_bytes())?;

        zip.start_file("word/_rels/document.xml.rels", options)?;
        zip.write_all(DOCUMENT_RELS.as_bytes())?;

        zip.start_file("word/styles.xml", options)?;
        zip.write_all(self.styles_xml().as_bytes())?;

        zip.start_file("word/header1.xml", options)?;
        zip.write_all(self.header_xml().as_bytes())?;

        zip.start_file("word/document.xml", options)?;
        zip.write_all(self.document_xml(record).as_bytes())?;

        let cursor = zip.finish()?;
        Ok(cursor.into_inner())
    }

    /// Base style part: default font family and size for all unstyled text
    fn styles_xml(&self) -> String {
        let size = points_to_half_points(self.config.font_size_pt);
        let font = escape_xml(&self.config.font_name);
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="{W_NS}">
    <w:docDefaults>
        <w:rPrDefault>
            <w:rPr>
                <w:rFonts w:ascii="{font}" w:hAnsi="{font}" w:cs="{font}"/>
                <w:sz w:val="{size}"/>
                <w:szCs w:val="{size}"/>
            </w:rPr>
        </w:rPrDefault>
    </w:docDefaults>
    <w:style w:type="paragraph" w:default="1" w:styleId="Normal">
        <w:name w:val="Normal"/>
    </w:style>
</w:styles>"#
        )
    }

    /// Page header part: one centered, bold title run on every page
    fn header_xml(&self) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:hdr xmlns:w="{W_NS}">
    <w:p>
        <w:pPr>
            <w:jc w:val="center"/>
        </w:pPr>
        <w:r>
            <w:rPr><w:b/></w:rPr>
            <w:t>{}</w:t>
        </w:r>
    </w:p>
</w:hdr>"#,
            escape_xml(&self.config.title)
        )
    }

    /// Main document part: subtitle paragraph, data table, section geometry
    fn document_xml(&self, record: &ExtractedRecord) -> String {
        let mut content = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="{W_NS}" xmlns:r="{R_NS}">
    <w:body>"#
        );

        self.write_subtitle(&mut content, &record.administrator);
        self.write_table(&mut content, record);
        self.write_section_properties(&mut content);

        content.push_str("\n    </w:body>\n</w:document>");
        content
    }

    /// Subtitle: plain label run followed by the administrator name in bold
    fn write_subtitle(&self, content: &mut String, administrator: &str) {
        content.push_str(&format!(
            r#"
        <w:p>
            <w:r>
                <w:t xml:space="preserve">{}</w:t>
            </w:r>
            <w:r>
                <w:rPr><w:b/></w:rPr>
                <w:t xml:space="preserve">{}</w:t>
            </w:r>
        </w:p>"#,
            escape_xml(&self.config.subtitle_label),
            escape_xml(administrator)
        ));
    }

    /// Three-column table: ordinal, key, value per entry, in source order.
    ///
    /// There is no separate header row; every run of row 0 (the first data
    /// row) is bold, and the ordinal and key columns are shaded on every
    /// row. Both rules are part of the register's fixed look.
    fn write_table(&self, content: &mut String, record: &ExtractedRecord) {
        let widths = [
            inches_to_twips(self.config.ordinal_column_in),
            inches_to_twips(self.config.key_column_in),
            inches_to_twips(self.config.value_column_in),
        ];

        content.push_str(&format!(
            r#"
        <w:tbl>
            <w:tblPr>
                <w:jc w:val="center"/>
                <w:tblLayout w:type="fixed"/>
                <w:tblBorders>
                    <w:top w:val="single" w:sz="4" w:space="0" w:color="auto"/>
                    <w:left w:val="single" w:sz="4" w:space="0" w:color="auto"/>
                    <w:bottom w:val="single" w:sz="4" w:space="0" w:color="auto"/>
                    <w:right w:val="single" w:sz="4" w:space="0" w:color="auto"/>
                    <w:insideH w:val="single" w:sz="4" w:space="0" w:color="auto"/>
                    <w:insideV w:val="single" w:sz="4" w:space="0" w:color="auto"/>
                </w:tblBorders>
            </w:tblPr>
            <w:tblGrid>
                <w:gridCol w:w="{}"/>
                <w:gridCol w:w="{}"/>
                <w:gridCol w:w="{}"/>
            </w:tblGrid>"#,
            widths[0], widths[1], widths[2]
        ));

        for (i, entry) in record.entries.iter().enumerate() {
            let bold = i == 0;
            let cells = [ordinal_label(i), entry.key.clone(), entry.value.clone()];

            content.push_str("\n            <w:tr>");
            for (col, text) in cells.iter().enumerate() {
                // Columns 0 and 1 carry the light grey fill, column 2 stays clear
                let shading = if col < 2 {
                    format!(
                        "\n                        <w:shd w:val=\"clear\" w:color=\"auto\" w:fill=\"{}\"/>",
                        escape_xml(&self.config.shading_fill)
                    )
                } else {
                    String::new()
                };
                let run_properties = if bold {
                    "\n                            <w:rPr><w:b/></w:rPr>"
                } else {
                    ""
                };

                content.push_str(&format!(
                    r#"
                <w:tc>
                    <w:tcPr>
                        <w:tcW w:w="{}" w:type="dxa"/>{shading}
                    </w:tcPr>
                    <w:p>
                        <w:r>{run_properties}
                            <w:t xml:space="preserve">{}</w:t>
                        </w:r>
                    </w:p>
                </w:tc>"#,
                    widths[col],
                    escape_xml(text)
                ));
            }
            content.push_str("\n            </w:tr>");
        }

        content.push_str("\n        </w:tbl>");
    }

    /// Page geometry: A4-style size, uniform margins with a doubled top
    /// margin reserving room for the header, and the header reference
    fn write_section_properties(&self, content: &mut String) {
        let height = mm_to_twips(self.config.page_height_mm);
        let width = mm_to_twips(self.config.page_width_mm);
        let space = mm_to_twips(self.config.space_mm);

        content.push_str(&format!(
            r#"
        <w:sectPr>
            <w:headerReference w:type="default" r:id="rId2"/>
            <w:pgSz w:w="{width}" w:h="{height}"/>
            <w:pgMar w:top="{top}" w:right="{space}" w:bottom="{space}" w:left="{space}" w:header="{space}" w:footer="{space}" w:gutter="0"/>
        </w:sectPr>"#,
            top = space * 2,
        ));
    }
}

/// 1-based ordinal label for table row `i` (0-based): `"1."`, `"2."`, ...
pub fn ordinal_label(i: usize) -> String {
    format!("{}.", i + 1)
}

/// Millimeters to twips (1/20 pt), rounded
pub fn mm_to_twips(mm: f64) -> u32 {
    (mm * 1440.0 / 25.4).round() as u32
}

/// Inches to twips, rounded
pub fn inches_to_twips(inches: f64) -> u32 {
    (inches * 1440.0).round() as u32
}

/// Points to OOXML half-points
pub fn points_to_half_points(points: f64) -> u32 {
    (points * 2.0).round() as u32
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Entry;
    use pretty_assertions::assert_eq;

    fn sample_record() -> ExtractedRecord {
        ExtractedRecord::new(
            "Report",
            "Acme Corp",
            vec![
                Entry::new("Purpose", "Marketing"),
                Entry::new("Scope", "EU"),
            ],
        )
    }

    #[test]
    fn unit_conversions_match_register_geometry() {
        assert_eq!(mm_to_twips(297.0), 16838);
        assert_eq!(mm_to_twips(210.0), 11906);
        assert_eq!(mm_to_twips(12.7), 720);
        assert_eq!(inches_to_twips(0.42), 605);
        assert_eq!(inches_to_twips(2.10), 3024);
        assert_eq!(inches_to_twips(4.68), 6739);
        assert_eq!(points_to_half_points(12.0), 24);
    }

    #[test]
    fn ordinal_labels_are_one_based_with_period() {
        assert_eq!(ordinal_label(0), "1.");
        assert_eq!(ordinal_label(1), "2.");
        assert_eq!(ordinal_label(9), "10.");
    }

    #[test]
    fn escape_xml_covers_reserved_characters() {
        assert_eq!(escape_xml("a & b < c"), "a &amp; b &lt; c");
        assert_eq!(escape_xml(r#""x" > 'y'"#), "&quot;x&quot; &gt; &apos;y&apos;");
    }

    #[test]
    fn document_has_one_table_row_per_entry() {
        let renderer = DocxRenderer::new(RenderConfig::default());
        let document = renderer.document_xml(&sample_record());
        assert_eq!(document.matches("<w:tr>").count(), 2);
        assert!(document.contains("<w:t xml:space=\"preserve\">1.</w:t>"));
        assert!(document.contains("<w:t xml:space=\"preserve\">2.</w:t>"));
        assert!(document.contains("Purpose"));
        assert!(document.contains("Marketing"));
    }

    #[test]
    fn only_first_data_row_is_bold_in_table() {
        let renderer = DocxRenderer::new(RenderConfig::default());
        let document = renderer.document_xml(&sample_record());
        let table = &document[document.find("<w:tbl>").unwrap()..];
        let table = &table[..table.find("</w:tbl>").unwrap()];
        // Three bold runs: the three cells of row 0
        assert_eq!(table.matches("<w:rPr><w:b/></w:rPr>").count(), 3);
    }

    #[test]
    fn shading_covers_two_columns_of_every_row() {
        let renderer = DocxRenderer::new(RenderConfig::default());
        let document = renderer.document_xml(&sample_record());
        assert_eq!(document.matches("w:fill=\"f2f2f2\"").count(), 4);
    }

    #[test]
    fn top_margin_is_doubled_space() {
        let renderer = DocxRenderer::new(RenderConfig::default());
        let document = renderer.document_xml(&sample_record());
        assert!(document.contains("w:top=\"1440\""));
        assert!(document.contains("w:right=\"720\""));
        assert!(document.contains("w:bottom=\"720\""));
        assert!(document.contains("w:header=\"720\""));
        assert!(document.contains("w:footer=\"720\""));
        assert!(document.contains("<w:pgSz w:w=\"11906\" w:h=\"16838\"/>"));
    }

    #[test]
    fn subtitle_has_plain_label_and_bold_administrator() {
        let renderer = DocxRenderer::new(RenderConfig::default());
        let document = renderer.document_xml(&sample_record());
        assert!(document
            .contains("<w:t xml:space=\"preserve\">Administrator Danych Osobowych - </w:t>"));
        assert!(document.contains("<w:t xml:space=\"preserve\">Acme Corp</w:t>"));
    }

    #[test]
    fn header_part_is_centered_and_bold() {
        let renderer = DocxRenderer::new(RenderConfig::default());
        let header = renderer.header_xml();
        assert!(header.contains("<w:jc w:val=\"center\"/>"));
        assert!(header.contains("<w:rPr><w:b/></w:rPr>"));
        assert!(header.contains("Rejestr czynności przetwarzania danych"));
    }

    #[test]
    fn styles_carry_font_and_half_point_size() {
        let renderer = DocxRenderer::new(RenderConfig::default());
        let styles = renderer.styles_xml();
        assert!(styles.contains("w:ascii=\"Times New Roman\""));
        assert!(styles.contains("<w:sz w:val=\"24\"/>"));
    }
}
