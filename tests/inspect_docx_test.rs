mod common;

use docdeck::{docx_summary, DeckError, LineSpacing};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_full_normal_style() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("styled.docx");
    common::write_docx(&path, common::DOCUMENT_MINIMAL, common::STYLES_FULL);

    let summary = docx_summary(&path).expect("Failed to inspect document");
    assert_eq!(summary.font.as_deref(), Some("Times New Roman"));
    assert_eq!(summary.font_size_pt, Some(14.0));
    assert_eq!(summary.line_spacing, Some(LineSpacing::Multiple(1.5)));
    assert_eq!(
        summary.to_string(),
        format!(
            "{{'file': '{}', 'paragraphs': 1, 'margins_cm': (3.0, 1.5, 2.0, 2.0), 'font': 'Times New Roman', \
             'font_size_pt': 14.0, 'line_spacing': 1.5, 'different_first_page': False}}",
            path.display()
        )
    );
}

#[test]
fn test_margins_are_rounded_and_in_range() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("odd.docx");
    let document = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body><w:p/><w:p/><w:sectPr><w:pgMar w:top="1000" w:right="777" w:bottom="1441" w:left="1" w:header="0" w:footer="0" w:gutter="0"/><w:titlePg/></w:sectPr></w:body></w:document>"#;
    common::write_docx(&path, document, common::STYLES_NO_SIZE);

    let summary = docx_summary(&path).expect("Failed to inspect document");
    let m = summary.margins_cm;
    for value in [m.left, m.right, m.top, m.bottom] {
        assert!((0.0..=50.0).contains(&value));
        assert_eq!((value * 100.0).round() / 100.0, value);
    }
    assert_eq!(m.top, 1.76);
    assert_eq!(m.right, 1.37);
    assert_eq!(m.bottom, 2.54);
    assert_eq!(m.left, 0.0);
    assert_eq!(summary.paragraphs, 2);
    assert!(summary.different_first_page);
}

#[test]
fn test_word_2003_margins_round_like_the_stored_value() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("word2003.docx");
    let document = r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
<w:body><w:p/><w:sectPr><w:pgMar w:top="1440" w:right="1800" w:bottom="1440" w:left="1800"/></w:sectPr></w:body>
</w:document>"#;
    common::write_docx(&path, document, common::STYLES_NO_SIZE);

    let summary = docx_summary(&path).expect("Failed to inspect document");
    assert_eq!(summary.margins_cm.left, 3.17);
    assert_eq!(summary.margins_cm.right, 3.17);
    assert!(summary.to_string().contains("'margins_cm': (3.17, 3.17, 2.54, 2.54)"));
}

#[test]
fn test_section_without_margins_is_invalid() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("nomargins.docx");
    let document = r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body><w:p/><w:sectPr/></w:body></w:document>"#;
    common::write_docx(&path, document, common::STYLES_NO_SIZE);

    let err = docx_summary(&path).unwrap_err();
    assert!(matches!(err, DeckError::InvalidFormat { .. }), "unexpected error: {}", err);
}

#[test]
fn test_missing_document_part_is_invalid() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("empty.docx");
    let file = fs::File::create(&path).expect("Failed to create file");
    let mut zip = zip::ZipWriter::new(file);
    zip.start_file("hello.txt", zip::write::FileOptions::default())
        .expect("Failed to start entry");
    zip.finish().expect("Failed to finish zip");

    let err = docx_summary(&path).unwrap_err();
    assert!(matches!(err, DeckError::InvalidFormat { .. }), "unexpected error: {}", err);
}

#[test]
fn test_directory_is_not_a_document() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let err = docx_summary(temp_dir.path()).unwrap_err();
    assert!(matches!(err, DeckError::ValidationError(_)), "unexpected error: {}", err);
}
