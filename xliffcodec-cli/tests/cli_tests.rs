use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const GOOD: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<xliff xmlns="urn:oasis:names:tc:xliff:document:1.2" version="1.2">
  <file original="One.strings" source-language="de" datatype="plaintext" target-language="en">
    <body>
      <trans-unit id="0">
        <source>Hallo Welt</source>
        <target>Hello World</target>
      </trans-unit>
    </body>
  </file>
</xliff>
"#;

const BROKEN: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<xliff version="2.0">
  <file original="One.strings" source-language="de" datatype="html" target-language="en">
    <body>
      <trans-unit id="0">
        <source>Hallo Welt</source>
      </trans-unit>
    </body>
  </file>
</xliff>
"#;

fn xliffcodec(args: &[&str]) -> Output {
    Command::new(assert_cmd::cargo::cargo_bin!("xliffcodec"))
        .args(args)
        .output()
        .unwrap()
}

fn write_fixture(dir: &Path, name: &str, content: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path.to_str().unwrap().to_string()
}

#[test]
fn test_validate_good_file() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_fixture(temp_dir.path(), "good.xliff", GOOD);

    let output = xliffcodec(&["validate", "-i", &input]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(String::from_utf8_lossy(&output.stdout).contains("is valid"));
}

#[test]
fn test_validate_reports_findings() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_fixture(temp_dir.path(), "broken.xliff", BROKEN);

    let output = xliffcodec(&["validate", "-i", &input]);
    assert!(!output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("UnsupportedVersion: Version 2.0 is not supported"));
    assert!(stdout.contains("UnsupportedDatatype"));
    assert!(stdout.contains("MissingTransUnitTarget"));
}

#[test]
fn test_validate_missing_file() {
    let output = xliffcodec(&["validate", "-i", "does-not-exist.xliff"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("File does not exist"));
}

#[test]
fn test_validate_bad_xml() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_fixture(temp_dir.path(), "bad.xliff", "<xliff><file></xliff>");

    let output = xliffcodec(&["validate", "-i", &input]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("XML syntax error"));
}

#[test]
fn test_new_then_add_then_stats() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("new.xliff");
    let path = path.to_str().unwrap();

    let created = xliffcodec(&[
        "new",
        "-o",
        path,
        "--source-language",
        "de",
        "--target-language",
        "en",
        "--original",
        "Main.strings",
    ]);
    assert!(
        created.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&created.stderr)
    );

    let added = xliffcodec(&[
        "add",
        "-i",
        path,
        "-s",
        "Hallo Welt",
        "-t",
        "Hello World",
        "-n",
        "greeting",
    ]);
    assert!(
        added.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&added.stderr)
    );
    assert!(String::from_utf8_lossy(&added.stdout).contains("Added trans-unit '0'"));

    let added_again = xliffcodec(&["add", "-i", path, "-s", "Tschüss"]);
    assert!(added_again.status.success());

    let written = fs::read_to_string(path).unwrap();
    assert!(written.contains(r#"<trans-unit id="1">"#));
    assert!(written.contains("<note>greeting</note>"));

    let stats = xliffcodec(&["stats", "-i", path, "--json"]);
    assert!(stats.status.success());
    let v: serde_json::Value = serde_json::from_slice(&stats.stdout).unwrap();
    assert_eq!(v["summary"]["files"], 1);
    assert_eq!(v["summary"]["trans_units"], 2);
    assert_eq!(v["summary"]["complete"], false);
    assert_eq!(v["files"][0]["translated"], 1);
    assert_eq!(v["files"][0]["untranslated"], 1);
}

#[test]
fn test_new_rejects_invalid_language() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("new.xliff");

    let output = xliffcodec(&[
        "new",
        "-o",
        path.to_str().unwrap(),
        "--source-language",
        "not a tag!",
        "--target-language",
        "en",
    ]);
    assert!(!output.status.success());
    assert!(!path.exists());
}

#[test]
fn test_add_to_separate_output() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_fixture(temp_dir.path(), "good.xliff", GOOD);
    let out = temp_dir.path().join("out.xliff");

    let output = xliffcodec(&[
        "add",
        "-i",
        &input,
        "-s",
        "Neu",
        "-o",
        out.to_str().unwrap(),
    ]);
    assert!(output.status.success());
    assert_eq!(fs::read_to_string(&input).unwrap(), GOOD);
    assert!(fs::read_to_string(&out).unwrap().contains("<source>Neu</source>"));
}

#[test]
fn test_add_after_non_numeric_id_fails() {
    let temp_dir = TempDir::new().unwrap();
    let content = GOOD.replace(r#"id="0""#, r#"id="abc""#);
    let input = write_fixture(temp_dir.path(), "abc.xliff", &content);

    let output = xliffcodec(&["add", "-i", &input, "-s", "Neu"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("not a number"));
    assert_eq!(fs::read_to_string(&input).unwrap(), content);
}

#[test]
fn test_view_json() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_fixture(temp_dir.path(), "good.xliff", GOOD);

    let output = xliffcodec(&["view", "-i", &input, "--json"]);
    assert!(output.status.success());
    let v: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(v["version"], "1.2");
    assert_eq!(v["files"][0]["body"]["trans_units"][0]["target"], "Hello World");
}

#[test]
fn test_view_text() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_fixture(temp_dir.path(), "broken.xliff", BROKEN);

    let output = xliffcodec(&["view", "-i", &input]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("=== File 1: One.strings ==="));
    assert!(stdout.contains("Target: (untranslated)"));
}
