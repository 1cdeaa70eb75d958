use crate::check::load_document;
use crate::validation::{ValidationContext, validate_context};
use log::info;
use xliffcodec::{Document, TransUnitOption, traits::Parser, with_note, with_target};

fn write_back(doc: &Document, path: &str) -> Result<(), String> {
    doc.write_to(path)
        .map_err(|e| format!("Error writing output: {}", e))
}

/// Create a fresh document with one empty `plaintext` file.
pub fn run_new_command(
    output: String,
    source_language: String,
    target_language: String,
    original: Option<String>,
) -> Result<(), String> {
    let vctx = ValidationContext::new()
        .with_output_file(output.clone())
        .with_language_code(source_language.clone())
        .with_language_code(target_language.clone());
    validate_context(&vctx)?;

    let mut doc = Document::new(source_language, target_language);
    if let Some(original) = original {
        doc.files[0].original = original;
    }

    write_back(&doc, &output)?;
    println!("📄 Created {}", output);
    Ok(())
}

/// Append a trans-unit to the last file of `input` and write the result back.
pub fn run_add_command(
    input: String,
    source: String,
    target: Option<String>,
    note: Option<String>,
    output: Option<String>,
) -> Result<(), String> {
    if let Some(o) = &output {
        validate_context(&ValidationContext::new().with_output_file(o.clone()))?;
    }
    let mut doc = load_document(&input)?;

    let mut options: Vec<TransUnitOption> = Vec::new();
    if let Some(note) = note {
        options.push(with_note(note));
    }
    if let Some(target) = target {
        options.push(with_target(target));
    }

    doc.add_trans_unit(source, options)
        .map_err(|e| format!("Cannot add trans-unit: {}", e))?;

    if let Some(unit) = doc
        .files
        .last()
        .and_then(|f| f.body.trans_units.last())
    {
        info!("added trans-unit {}", unit.id);
        println!("✅ Added trans-unit '{}'", unit.id);
    }

    let out = output.as_deref().unwrap_or(&input);
    write_back(&doc, out)?;
    if output.is_some() {
        println!("📄 Wrote changes to {}", out);
    } else {
        println!("📄 Updated {} in place", input);
    }
    Ok(())
}
