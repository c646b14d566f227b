use std::fs;
use std::io::Write;
use std::path::Path;

use memorial_import::{ExtractOptions, ImportError, SourceFormat, ValidationPolicy, extract};
use tempfile::TempDir;
use zip::write::SimpleFileOptions;

fn write_xlsx(path: &Path, sheet_rows: &[[&str; 3]]) {
    let mut sheet = String::from("<worksheet><sheetData>");
    for (i, row) in sheet_rows.iter().enumerate() {
        let n = i + 1;
        sheet.push_str(&format!("<row r=\"{n}\">"));
        for (col, value) in ["A", "B", "C"].iter().zip(row.iter()) {
            if !value.is_empty() {
                sheet.push_str(&format!(
                    "<c r=\"{col}{n}\" t=\"inlineStr\"><is><t>{value}</t></is></c>"
                ));
            }
        }
        sheet.push_str("</row>");
    }
    sheet.push_str("</sheetData></worksheet>");

    let file = fs::File::create(path).unwrap();
    let mut zip = zip::ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
    zip.start_file("xl/worksheets/sheet1.xml", options).unwrap();
    zip.write_all(sheet.as_bytes()).unwrap();
    zip.finish().unwrap();
}

#[test]
fn missing_source_is_fatal() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("boat_items.csv");
    let err = extract(&path, &ExtractOptions::new(SourceFormat::Delimited)).unwrap_err();
    match err {
        ImportError::SourceNotFound(p) => assert_eq!(p, path),
        other => panic!("expected SourceNotFound, got {other:?}"),
    }
}

#[test]
fn csv_end_to_end_example() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("boat_items.csv");
    fs::write(
        &path,
        "OKEAN\n\nModelo,Categoria,Descrição\nFY550,Casco,Motor principal\nFY 670,Convés,\n",
    )
    .unwrap();

    let ex = extract(&path, &ExtractOptions::new(SourceFormat::Delimited)).unwrap();
    assert_eq!(ex.records.len(), 1);
    assert_eq!(ex.records[0].model, "FY 550");
    assert_eq!(ex.records[0].category, "Casco");
    assert_eq!(ex.records[0].description, "Motor principal");

    let summary = ex.distribution();
    assert_eq!(summary.count("FY 550"), 1);
    assert_eq!(summary.len(), 1);
}

#[test]
fn header_row_override() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("items.csv");
    fs::write(&path, "Modelo,Categoria,Descrição\nFY550,Casco,Motor\n").unwrap();

    let options = ExtractOptions::new(SourceFormat::Delimited).header_rows(1);
    assert_eq!(options.effective_header_rows(), 1);
    let ex = extract(&path, &options).unwrap();
    assert_eq!(ex.records.len(), 1);
}

#[test]
fn spreadsheet_preserves_row_order() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("combined_boat_items.xlsx");
    write_xlsx(
        &path,
        &[
            ["Modelo", "Categoria", "Descrição"],
            ["FY850", "Interior", "Cama"],
            ["FY550", "Casco", "Motor"],
            ["FY 670", "Convés", ""],
            ["FY720", "Elétrica", "Gerador"],
        ],
    );

    let ex = extract(&path, &ExtractOptions::new(SourceFormat::Spreadsheet)).unwrap();
    let models: Vec<&str> = ex.records.iter().map(|r| r.model.as_str()).collect();
    assert_eq!(models, vec!["FY 850", "FY 550", "FY 720"]);

    let lenient = ExtractOptions::new(SourceFormat::Spreadsheet).policy(ValidationPolicy::ModelOnly);
    let ex = extract(&path, &lenient).unwrap();
    assert_eq!(ex.records.len(), 4);
}

#[test]
fn markdown_export() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("parsed.md");
    fs::write(
        &path,
        "# Itens\n|Modelo|Categoria|Descrição|\n|-|-|-|\n|FY550|Casco|Motor|\n",
    )
    .unwrap();

    let ex = extract(&path, &ExtractOptions::new(SourceFormat::MarkdownTable)).unwrap();
    assert_eq!(ex.records.len(), 1);
    assert_eq!(ex.records[0].model, "FY 550");
}
