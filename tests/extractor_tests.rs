//! Record extraction tests against real .xlsx fixtures

use pretty_assertions::assert_eq;
use rcpd_convert::{ConvertError, Entry, ExtractConfig, RecordExtractor};
use rust_xlsxwriter::Workbook;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Write a register fixture: administrator in F1, merged-pair values at odd
/// columns of the key row (12) and value row (15), both 1-indexed.
fn write_register(
    dir: &Path,
    filename: &str,
    administrator: Option<&str>,
    keys: &[&str],
    values: &[&str],
) -> PathBuf {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    if let Some(name) = administrator {
        worksheet.write_string(0, 5, name).unwrap();
    }
    for (i, key) in keys.iter().enumerate() {
        worksheet.write_string(11, (i as u16) * 2 + 1, *key).unwrap();
    }
    for (i, value) in values.iter().enumerate() {
        worksheet.write_string(14, (i as u16) * 2 + 1, *value).unwrap();
    }

    let path = dir.join(filename);
    workbook.save(&path).unwrap();
    path
}

#[test]
fn extracts_scenario_record() {
    let dir = TempDir::new().unwrap();
    let path = write_register(
        dir.path(),
        "Report.xlsx",
        Some("Acme Corp"),
        &["Purpose", "Scope"],
        &["Marketing", "EU"],
    );

    let record = RecordExtractor::new(ExtractConfig::default())
        .extract(&path)
        .unwrap();

    assert_eq!(record.base_identifier, "Report");
    assert_eq!(record.administrator, "Acme Corp");
    assert_eq!(
        record.entries,
        vec![
            Entry::new("Purpose", "Marketing"),
            Entry::new("Scope", "EU"),
        ]
    );
}

#[test]
fn normalizes_whitespace_runs_in_cells() {
    let dir = TempDir::new().unwrap();
    let path = write_register(
        dir.path(),
        "Rejestr.xlsx",
        Some("Acme Corp"),
        &["Cel\n  przetwarzania"],
        &["Marketing   bezpośredni"],
    );

    let record = RecordExtractor::new(ExtractConfig::default())
        .extract(&path)
        .unwrap();

    assert_eq!(
        record.entries,
        vec![Entry::new("Cel przetwarzania", "Marketing bezpośredni")]
    );
}

#[test]
fn administrator_is_read_as_is() {
    let dir = TempDir::new().unwrap();
    let path = write_register(
        dir.path(),
        "Rejestr.xlsx",
        Some("  Acme   Corp  "),
        &["Purpose"],
        &["Marketing"],
    );

    let record = RecordExtractor::new(ExtractConfig::default())
        .extract(&path)
        .unwrap();

    // No normalization on the administrator cell
    assert_eq!(record.administrator, "  Acme   Corp  ");
}

#[test]
fn key_value_count_mismatch_is_malformed() {
    let dir = TempDir::new().unwrap();
    let path = write_register(
        dir.path(),
        "Report.xlsx",
        Some("Acme Corp"),
        &["Purpose", "Scope"],
        &["Marketing", "EU", "Orphan"],
    );

    let result = RecordExtractor::new(ExtractConfig::default()).extract(&path);
    match result {
        Err(ConvertError::MalformedSpreadsheet(message)) => {
            assert!(message.contains("row layout mismatch"), "{message}");
            assert!(message.contains("Report.xlsx"), "{message}");
        }
        other => panic!("expected MalformedSpreadsheet, got {other:?}"),
    }
}

#[test]
fn empty_kept_key_cell_is_malformed() {
    let dir = TempDir::new().unwrap();
    // Keys at odd columns 1 and 5 leave the logical cell at column 3 empty;
    // values fill all three logical cells, so only the key row is incomplete.
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.write_string(0, 5, "Acme Corp").unwrap();
    worksheet.write_string(11, 1, "A").unwrap();
    worksheet.write_string(11, 5, "C").unwrap();
    worksheet.write_string(14, 1, "v1").unwrap();
    worksheet.write_string(14, 3, "v2").unwrap();
    worksheet.write_string(14, 5, "v3").unwrap();
    let path = dir.path().join("Gappy.xlsx");
    workbook.save(&path).unwrap();

    let result = RecordExtractor::new(ExtractConfig::default()).extract(&path);
    match result {
        Err(ConvertError::MalformedSpreadsheet(message)) => {
            assert!(message.contains("empty cell"), "{message}");
            assert!(message.contains("key row 12"), "{message}");
            assert!(message.contains("Gappy.xlsx"), "{message}");
        }
        other => panic!("expected MalformedSpreadsheet, got {other:?}"),
    }
}

#[test]
fn empty_kept_value_cell_is_malformed() {
    let dir = TempDir::new().unwrap();
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.write_string(0, 5, "Acme Corp").unwrap();
    worksheet.write_string(11, 1, "Purpose").unwrap();
    worksheet.write_string(11, 3, "Scope").unwrap();
    worksheet.write_string(14, 3, "EU").unwrap();
    let path = dir.path().join("Blanky.xlsx");
    workbook.save(&path).unwrap();

    let result = RecordExtractor::new(ExtractConfig::default()).extract(&path);
    match result {
        Err(ConvertError::MalformedSpreadsheet(message)) => {
            assert!(message.contains("value row 15"), "{message}");
        }
        other => panic!("expected MalformedSpreadsheet, got {other:?}"),
    }
}

#[test]
fn uppercase_extension_still_strips_to_base_identifier() {
    let dir = TempDir::new().unwrap();
    let path = write_register(
        dir.path(),
        "Report.XLSX",
        Some("Acme Corp"),
        &["Purpose"],
        &["Marketing"],
    );

    let record = RecordExtractor::new(ExtractConfig::default())
        .extract(&path)
        .unwrap();

    assert_eq!(record.base_identifier, "Report");
}

#[test]
fn absent_administrator_cell_is_malformed() {
    let dir = TempDir::new().unwrap();
    let path = write_register(dir.path(), "Report.xlsx", None, &["Purpose"], &["Marketing"]);

    let result = RecordExtractor::new(ExtractConfig::default()).extract(&path);
    match result {
        Err(ConvertError::MalformedSpreadsheet(message)) => {
            assert!(message.contains("administrator cell F1"), "{message}");
        }
        other => panic!("expected MalformedSpreadsheet, got {other:?}"),
    }
}

#[test]
fn zero_row_configuration_error_names_the_file() {
    let dir = TempDir::new().unwrap();
    let path = write_register(
        dir.path(),
        "Report.xlsx",
        Some("Acme Corp"),
        &["Purpose"],
        &["Marketing"],
    );

    let config = ExtractConfig {
        key_row: 0,
        ..ExtractConfig::default()
    };
    let result = RecordExtractor::new(config).extract(&path);
    match result {
        Err(ConvertError::MalformedSpreadsheet(message)) => {
            assert!(message.contains("Report.xlsx"), "{message}");
            assert!(message.contains("1-indexed"), "{message}");
        }
        other => panic!("expected MalformedSpreadsheet, got {other:?}"),
    }
}

#[test]
fn unreadable_workbook_is_malformed() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("garbage.xlsx");
    std::fs::write(&path, b"this is not a zip archive").unwrap();

    let result = RecordExtractor::new(ExtractConfig::default()).extract(&path);
    assert!(matches!(result, Err(ConvertError::MalformedSpreadsheet(_))));
}

#[test]
fn alternate_layout_is_a_configuration_change() {
    let dir = TempDir::new().unwrap();
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.write_string(1, 0, "Inna Firma").unwrap();
    worksheet.write_string(4, 1, "Zakres").unwrap();
    worksheet.write_string(6, 1, "UE").unwrap();
    let path = dir.path().join("inny.xlsx");
    workbook.save(&path).unwrap();

    let config = ExtractConfig {
        administrator_cell: "A2".to_string(),
        key_row: 5,
        value_row: 7,
    };
    let record = RecordExtractor::new(config).extract(&path).unwrap();

    assert_eq!(record.administrator, "Inna Firma");
    assert_eq!(record.entries, vec![Entry::new("Zakres", "UE")]);
}
