use xliffcodec::Document;

const TRUNCATE_AT: usize = 50;

fn display_value(value: &str, full: bool) -> String {
    if full || value.chars().count() <= TRUNCATE_AT {
        value.to_string()
    } else {
        let truncated: String = value.chars().take(TRUNCATE_AT).collect();
        format!("{}...", truncated)
    }
}

/// Print a view of the files and trans-units in a document.
pub fn print_view(doc: &Document, full: bool, json_output: bool) -> Result<(), String> {
    if json_output {
        let body = serde_json::to_string_pretty(doc)
            .map_err(|e| format!("Failed to serialize document: {}", e))?;
        println!("{}", body);
        return Ok(());
    }

    println!("XLIFF version: {}", doc.version);
    println!("Files: {}", doc.files.len());

    for (i, file) in doc.files.iter().enumerate() {
        println!("\n=== File {}: {} ===", i + 1, file.original);
        println!(
            "Languages: {} -> {}",
            file.source_language, file.target_language
        );
        println!("Datatype: {}", file.datatype);
        if !file.header.tool.tool_name.is_empty() {
            println!(
                "Tool: {} {}",
                file.header.tool.tool_name, file.header.tool.tool_version
            );
        }
        println!("Trans-units: {}", file.body.trans_units.len());

        for unit in &file.body.trans_units {
            println!("\n  Trans-unit: {}", unit.id);
            println!("    Source: {}", display_value(&unit.source, full));
            if unit.target.is_empty() {
                println!("    Target: (untranslated)");
            } else {
                println!("    Target: {}", display_value(&unit.target, full));
            }
            if !unit.note.is_empty() {
                println!("    Note: {}", unit.note);
            }
        }
    }

    Ok(())
}
