use std::fs;

use leads_ingest::{SheetFormat, parse_bytes, parse_file};

#[test]
fn csv_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("leads.csv");
    fs::write(
        &path,
        "Nome,E-mail,Whatsapp\nAna,ana@x.com,11987654321\n, ,\nBruno,,5511912345678\n",
    )
    .unwrap();

    let sheet = parse_file(&path);
    assert!(sheet.errors.is_empty());
    assert_eq!(sheet.rows.len(), 2);
    assert_eq!(sheet.rows[0].value("nome"), Some("Ana"));
    assert_eq!(sheet.rows[0].value("whatsapp"), Some("11987654321"));
    assert_eq!(sheet.rows[1].value("e-mail"), None);
}

#[test]
fn bom_and_padding_are_normalized() {
    let sheet = parse_bytes(
        SheetFormat::Csv,
        "\u{feff}  Razão Social ,Telefone\nPadaria Sol,11 98765-4321\n".as_bytes(),
    );
    assert_eq!(sheet.rows.len(), 1);
    assert_eq!(sheet.rows[0].value("razão social"), Some("Padaria Sol"));
    assert_eq!(sheet.rows[0].value("telefone"), Some("11 98765-4321"));
}

#[test]
fn unknown_extension_fails_softly() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("leads.pdf");
    fs::write(&path, b"whatever").unwrap();

    let sheet = parse_file(&path);
    assert!(sheet.rows.is_empty());
    assert_eq!(sheet.errors.len(), 1);
    assert!(sheet.errors[0].contains("unsupported file format"));
}

#[test]
fn corrupt_xlsx_fails_softly() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("leads.xlsx");
    fs::write(&path, b"definitely not a workbook").unwrap();

    let sheet = parse_file(&path);
    assert!(sheet.rows.is_empty());
    assert_eq!(sheet.errors.len(), 1);
}
