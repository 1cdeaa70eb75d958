use crate::validation::{ValidationContext, validate_context};
use xliffcodec::{Document, ValidationError, traits::Parser};

/// Load an XLIFF document after checking that the path is usable.
pub fn load_document(input: &str) -> Result<Document, String> {
    validate_context(&ValidationContext::new().with_input_file(input.to_string()))?;
    Document::read_from(input).map_err(|e| format!("Failed to read {}: {}", input, e))
}

/// Run the validator over `input` and print every finding.
///
/// Returns `Ok(true)` when the document has no findings.
pub fn run_validate_command(input: &str) -> Result<bool, String> {
    let doc = load_document(input)?;
    let findings = doc.validate();
    print_findings(input, &findings);
    Ok(findings.is_empty())
}

fn print_findings(input: &str, findings: &[ValidationError]) {
    if findings.is_empty() {
        println!("✅ {} is valid", input);
        return;
    }

    for finding in findings {
        println!("{}", finding);
    }
    eprintln!("❌ {} has {} validation finding(s)", input, findings.len());
}
