use std::path::Path;
use unic_langid::LanguageIdentifier;

/// Validation context for different command types
#[derive(Default)]
pub struct ValidationContext {
    pub input_file: Option<String>,
    pub output_file: Option<String>,
    pub language_codes: Vec<String>,
}

impl ValidationContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input_file(mut self, file: String) -> Self {
        self.input_file = Some(file);
        self
    }

    pub fn with_output_file(mut self, file: String) -> Self {
        self.output_file = Some(file);
        self
    }

    pub fn with_language_code(mut self, lang: String) -> Self {
        self.language_codes.push(lang);
        self
    }
}

/// Validate file path exists and is a regular file
pub fn validate_file_path(path: &str) -> Result<(), String> {
    let path_obj = Path::new(path);

    if !path_obj.exists() {
        return Err(format!("File does not exist: {}", path));
    }

    if !path_obj.is_file() {
        return Err(format!("Path is not a file: {}", path));
    }

    Ok(())
}

/// Validate output directory exists or can be created
pub fn validate_output_path(path: &str) -> Result<(), String> {
    let path_obj = Path::new(path);

    if let Some(parent) = path_obj.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                return Err(format!("Cannot create output directory: {}", e));
            }
        }
    }

    Ok(())
}

/// Validate a BCP 47 language tag for `source-language` / `target-language`
pub fn validate_language_code(lang: &str) -> Result<(), String> {
    if lang.is_empty() {
        return Err("Language code cannot be empty".to_string());
    }

    lang.parse::<LanguageIdentifier>().map(|_| ()).map_err(|_| {
        format!(
            "Invalid language code format: {}. Expected valid BCP 47 language identifier",
            lang
        )
    })
}

/// Validate a complete validation context
pub fn validate_context(context: &ValidationContext) -> Result<(), String> {
    if let Some(ref input) = context.input_file {
        validate_file_path(input).map_err(|e| format!("Input validation failed: {}", e))?;
    }

    if let Some(ref output) = context.output_file {
        validate_output_path(output).map_err(|e| format!("Output validation failed: {}", e))?;
    }

    for lang in &context.language_codes {
        validate_language_code(lang)
            .map_err(|e| format!("Language code validation failed: {}", e))?;
    }

    Ok(())
}
