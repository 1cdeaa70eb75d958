use serde_json::json;
use xliffcodec::{Document, File};

#[derive(Debug, Default, PartialEq)]
pub struct FileStats {
    pub total: usize,
    pub translated: usize,
    pub untranslated: usize,
}

impl FileStats {
    pub fn from_file(file: &File) -> Self {
        let total = file.body.trans_units.len();
        let translated = file
            .body
            .trans_units
            .iter()
            .filter(|u| u.is_translated())
            .count();
        FileStats {
            total,
            translated,
            untranslated: total - translated,
        }
    }

    /// Completion in percent, rounded to two decimals. An empty file is complete.
    pub fn completion_percent(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        let percent = (self.translated as f64) * 100.0 / (self.total as f64);
        (percent * 100.0).round() / 100.0
    }
}

pub fn print_stats(doc: &Document, json_output: bool) {
    let per_file: Vec<_> = doc
        .files
        .iter()
        .map(|f| (f, FileStats::from_file(f)))
        .collect();

    if json_output {
        let files: Vec<_> = per_file
            .iter()
            .map(|(file, stats)| {
                json!({
                    "original": file.original,
                    "source_language": file.source_language,
                    "target_language": file.target_language,
                    "total": stats.total,
                    "translated": stats.translated,
                    "untranslated": stats.untranslated,
                    "completion_percent": stats.completion_percent(),
                })
            })
            .collect();
        let body = json!({
            "summary": {
                "files": doc.files.len(),
                "trans_units": doc.trans_unit_count(),
                "complete": doc.is_complete(),
            },
            "files": files,
        });
        println!("{}", body);
        return;
    }

    println!("=== Stats ===");
    println!("Files: {}", doc.files.len());
    println!("Trans-units: {}", doc.trans_unit_count());
    println!("Complete: {}", if doc.is_complete() { "yes" } else { "no" });

    for (file, stats) in &per_file {
        println!("\nFile: {}", file.original);
        println!("  Total: {}", stats.total);
        println!("  Translated: {}", stats.translated);
        println!("  Untranslated: {}", stats.untranslated);
        println!("  Completion: {:.2}%", stats.completion_percent());
    }
}
