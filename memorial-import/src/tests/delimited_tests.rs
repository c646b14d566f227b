use super::*;

const TITLE: &str = "Memorial Descritivo OKEAN\nExportado em 2025-10-24\nModelo,Categoria,Descrição\n";

fn parse(body: &str) -> Extraction {
    let content = format!("{TITLE}{body}");
    parse_delimited(content.as_bytes(), 3, ValidationPolicy::RequireAll)
}

#[test]
fn skips_title_lines_and_normalizes() {
    let ex = parse("FY550,Casco,Motor principal\nFY 670,Convés,Guarda-mancebo\n");
    assert_eq!(ex.records.len(), 2);
    assert_eq!(ex.records[0].model, "FY 550");
    assert_eq!(ex.records[0].category, "Casco");
    assert_eq!(ex.records[0].description, "Motor principal");
    assert_eq!(ex.records[1].model, "FY 670");
    assert!(ex.skipped.is_empty());
}

#[test]
fn quoted_field_keeps_commas() {
    let ex = parse("FY550,Casco,\"Casco em fibra, com reforço, pintado\"\n");
    assert_eq!(ex.records.len(), 1);
    assert_eq!(ex.records[0].description, "Casco em fibra, com reforço, pintado");
}

#[test]
fn doubled_quotes_inside_quoted_field() {
    let ex = parse("FY550,Casco,\"Tela 12\"\" touch\"\n");
    assert_eq!(ex.records[0].description, "Tela 12\" touch");
}

#[test]
fn extra_columns_ignored() {
    let ex = parse("FY720,Elétrica,Gerador,Onan,9kW\n");
    assert_eq!(ex.records.len(), 1);
    assert_eq!(ex.records[0].description, "Gerador");
}

#[test]
fn malformed_rows_are_skipped_silently() {
    let ex = parse(
        "FY550,Casco,Motor principal\n\
         \n\
         ,Casco,Sem modelo\n\
         FY670,Convés\n\
         FY 670,Convés,\n\
         FY850,Interior,Cama de casal\n",
    );
    let models: Vec<&str> = ex.records.iter().map(|r| r.model.as_str()).collect();
    assert_eq!(models, vec!["FY 550", "FY 850"]);

    let defects: Vec<&RowDefect> = ex.defects().map(|s| &s.defect).collect();
    assert_eq!(
        defects,
        vec![
            &RowDefect::EmptyModel,
            &RowDefect::TooFewFields(2),
            &RowDefect::MissingField("description"),
        ]
    );
}

#[test]
fn skipped_rows_report_source_lines() {
    let ex = parse("FY550,Casco,Motor\n,Casco,Sem modelo\n");
    let skipped: Vec<_> = ex.defects().collect();
    assert_eq!(skipped.len(), 1);
    assert_eq!(skipped[0].line, 5);
}

#[test]
fn model_only_policy_keeps_empty_description() {
    let content = format!("{TITLE}FY 670,Convés,\n");
    let ex = parse_delimited(content.as_bytes(), 3, ValidationPolicy::ModelOnly);
    assert_eq!(ex.records.len(), 1);
    assert_eq!(ex.records[0].description, "");
}

#[test]
fn crlf_line_endings() {
    let content = "a\r\nb\r\nc\r\nFY550,Casco,Motor\r\nFY670,Convés,Âncora\r\n";
    let ex = parse_delimited(content.as_bytes(), 3, ValidationPolicy::RequireAll);
    assert_eq!(ex.records.len(), 2);
    assert_eq!(ex.records[1].description, "Âncora");
}

#[test]
fn invalid_utf8_row_is_unreadable_not_fatal() {
    let mut content = TITLE.as_bytes().to_vec();
    content.extend_from_slice(b"FY550,Casco,Motor\n");
    content.extend_from_slice(b"FY670,Cas\xffco,Motor\n");
    content.extend_from_slice(b"FY850,Casco,Motor\n");
    let ex = parse_delimited(&content, 3, ValidationPolicy::RequireAll);

    assert_eq!(ex.records.len(), 2);
    assert!(matches!(ex.skipped[0].defect, RowDefect::Unreadable(_)));
}

#[test]
fn header_only_or_short_file_yields_nothing() {
    let ex = parse_delimited(b"only one line", 3, ValidationPolicy::RequireAll);
    assert!(ex.records.is_empty());
    let ex = parse_delimited(TITLE.as_bytes(), 3, ValidationPolicy::RequireAll);
    assert!(ex.records.is_empty());
}

#[test]
fn line_start_offsets() {
    assert_eq!(line_start(b"a\nb\nc", 0), Some(0));
    assert_eq!(line_start(b"a\nb\nc", 2), Some(4));
    assert_eq!(line_start(b"a\nb\nc", 3), None);
}
