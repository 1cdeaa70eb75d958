use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use xliffcodec::traits::Parser;
use xliffcodec::{
    Document, Error, ReadOptions, ValidationError, ValidationErrorCode, read_with_options,
    with_note, with_target,
};

fn data_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

fn read_fixture(name: &str) -> Document {
    Document::read_from(data_path(name)).unwrap()
}

fn contains_code(errors: &[ValidationError], code: ValidationErrorCode) -> bool {
    errors.iter().any(|e| {
        if e.code != code {
            return false;
        }
        let rendered = e.to_string();
        assert!(
            !rendered.starts_with("Unknown"),
            "finding has no proper name: {rendered}"
        );
        assert!(rendered.starts_with(code.as_str()));
        true
    })
}

#[test]
fn test_parse_good_file() {
    let doc = read_fixture("good.xliff");
    assert_eq!(doc.version, "1.2");
    assert_eq!(doc.files.len(), 2);
    assert_eq!(doc.trans_unit_count(), 5);

    let file = &doc.files[1];
    assert_eq!(file.original, "Blockzilla/en.lproj/Localizable.strings");
    assert_eq!(file.source_language, "en");
    assert_eq!(file.target_language, "it");
    assert_eq!(file.datatype, "plaintext");
    assert_eq!(file.header.tool.tool_id, "com.apple.dt.xcode");
    assert_eq!(
        file.trans_unit("Settings.searchTitle").unwrap().target,
        "Ricerca & suggerimenti"
    );
}

#[test]
fn test_parse_non_existent_file() {
    let err = Document::read_from(data_path("doesnotexist.xliff")).unwrap_err();
    assert!(err.is_not_found(), "{err:?}");
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn test_parse_bad_xml_file() {
    let err = Document::read_from(data_path("badxml.xliff")).unwrap_err();
    assert!(err.is_syntax(), "{err:?}");
}

#[test]
fn test_parse_rejects_malformed_skipped_content() {
    let good = fs::read_to_string(data_path("good.xliff")).unwrap();
    for broken in [
        good.replacen("<body>", "<body>stray & text", 1),
        good.replacen("<body>", "<body><group foo=bar baz></group>", 1),
        good.replacen("<body>", "<body><group a=\"1\" a=\"2\"/>", 1),
        format!("{good}<xliff/>"),
    ] {
        let err = Document::from_str(&broken).unwrap_err();
        assert!(err.is_syntax(), "{err:?}");
    }
    assert!(Document::from_str(&good).is_ok());
}

#[test]
fn test_validate_good() {
    let doc = read_fixture("good.xliff");
    assert!(doc.validate().is_empty());
}

#[test]
fn test_validate_errors() {
    let doc = read_fixture("errors.xliff");
    let errors = doc.validate();
    assert!(!errors.is_empty());

    for code in [
        ValidationErrorCode::UnsupportedVersion,
        ValidationErrorCode::MissingOriginalAttribute,
        ValidationErrorCode::MissingSourceLanguage,
        ValidationErrorCode::MissingTargetLanguage,
        ValidationErrorCode::UnsupportedDatatype,
        ValidationErrorCode::InconsistentSourceLanguage,
        ValidationErrorCode::InconsistentTargetLanguage,
        ValidationErrorCode::MissingTransUnitID,
        ValidationErrorCode::MissingTransUnitSource,
        ValidationErrorCode::MissingTransUnitTarget,
    ] {
        assert!(
            contains_code(&errors, code),
            "expected validation to fail with {code}"
        );
    }
    assert!(!contains_code(&errors, ValidationErrorCode::MissingFile));
}

#[test]
fn test_validate_errors_are_in_check_order() {
    let doc = read_fixture("errors.xliff");
    let codes: Vec<_> = doc.validate().iter().map(|e| e.code).collect();
    assert_eq!(
        codes,
        vec![
            ValidationErrorCode::UnsupportedVersion,
            ValidationErrorCode::MissingOriginalAttribute,
            ValidationErrorCode::MissingSourceLanguage,
            ValidationErrorCode::MissingTargetLanguage,
            ValidationErrorCode::UnsupportedDatatype,
            ValidationErrorCode::InconsistentSourceLanguage,
            ValidationErrorCode::InconsistentTargetLanguage,
            ValidationErrorCode::MissingTransUnitID,
            ValidationErrorCode::MissingTransUnitSource,
            ValidationErrorCode::MissingTransUnitTarget,
        ]
    );
}

#[test]
fn test_strict_read_rejects_errors_file() {
    let options = ReadOptions::new().with_strict(true);
    match read_with_options(data_path("errors.xliff"), &options) {
        Err(Error::Validation(findings)) => assert_eq!(findings.len(), 10),
        other => panic!("expected validation failure, got {other:?}"),
    }
    assert!(read_with_options(data_path("good.xliff"), &options).is_ok());
}

#[test]
fn test_is_complete() {
    assert!(read_fixture("complete.xliff").is_complete());
    assert!(!read_fixture("incomplete.xliff").is_complete());
}

#[test]
fn test_file_lookup() {
    let doc = read_fixture("complete.xliff");
    assert!(doc.file("One.strings").is_some());
    assert!(doc.file("Unknown.strings").is_none());
}

#[test]
fn test_save_and_reread_is_semantically_equal() {
    let temp_dir = TempDir::new().unwrap();
    let duplicate = temp_dir.path().join("good-duplicate.xliff");

    let doc = read_fixture("good.xliff");
    doc.write_to(&duplicate).unwrap();
    let reread = Document::read_from(&duplicate).unwrap();

    assert_eq!(doc, reread);
    assert!(reread.validate().is_empty());
}

#[test]
fn test_reencoding_does_not_duplicate_namespaces() {
    let doc = read_fixture("good.xliff");
    let once = xliffcodec::encode(&doc).unwrap();
    let twice = xliffcodec::encode(&xliffcodec::decode(&once).unwrap()).unwrap();
    assert_eq!(once, twice);

    let text = String::from_utf8(twice).unwrap();
    assert_eq!(text.matches("xmlns:xsi=").count(), 1);
}

#[test]
fn test_create_document_and_write() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("test_built_in.xliff");

    let mut doc = Document::new("de", "en");
    doc.files[0].original = "Main.strings".to_string();
    doc.add_trans_unit("Hallo Welt", []).unwrap();
    doc.add_trans_unit(
        "Wie geht es dir?",
        [with_note("This is a test."), with_target("How are you?")],
    )
    .unwrap();

    let findings = doc.validate();
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].code, ValidationErrorCode::MissingTransUnitTarget);

    doc.write_to(&path).unwrap();
    let written = fs::read_to_string(&path).unwrap();
    assert!(written.contains("<note>This is a test.</note>"));
    assert!(written.contains(r#"<trans-unit id="1">"#));

    let reread = Document::read_from(&path).unwrap();
    assert_eq!(reread, doc);
}

#[test]
fn test_add_trans_unit_after_reading() {
    let mut doc = read_fixture("complete.xliff");
    doc.add_trans_unit("Four", [with_target("Quatre")]).unwrap();
    let last = doc.files[1].body.trans_units.last().unwrap();
    assert_eq!(last.id, "1");
    assert!(doc.is_complete());
}

#[test]
fn test_add_trans_unit_after_non_numeric_id() {
    let mut doc = read_fixture("good.xliff");
    let err = doc.add_trans_unit("x", []).unwrap_err();
    assert!(matches!(err, Error::InvalidLastId(ref id) if id == "Settings.searchTitle"));
}

#[test]
fn test_json_dump_of_model() {
    let doc = read_fixture("complete.xliff");
    let json = serde_json::to_string(&doc).unwrap();
    let back: Document = serde_json::from_str(&json).unwrap();
    assert_eq!(back, doc);
}
