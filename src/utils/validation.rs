use crate::utils::error::{RenderError, Result};
use std::collections::HashSet;
use url::Url;

pub const OUTPUT_FORMATS: [&str; 2] = ["html", "json"];
pub const CALENDAR_EXTENSIONS: [&str; 3] = ["ics", "ical", "ifb"];

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field_name: &str, value: impl ToString, reason: impl Into<String>) -> RenderError {
    RenderError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(invalid(field_name, url_str, "URL cannot be empty"));
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(invalid(
                field_name,
                url_str,
                format!("Unsupported URL scheme: {}", scheme),
            )),
        },
        Err(e) => Err(invalid(
            field_name,
            url_str,
            format!("Invalid URL format: {}", e),
        )),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(invalid(field_name, path, "Path cannot be empty"));
    }

    if path.contains('\0') {
        return Err(invalid(field_name, path, "Path contains null bytes"));
    }

    Ok(())
}

pub fn validate_file_extension(field_name: &str, file: &str, allowed_extensions: &[&str]) -> Result<()> {
    let allowed_set: HashSet<&str> = allowed_extensions.iter().copied().collect();

    match std::path::Path::new(file)
        .extension()
        .and_then(|ext| ext.to_str())
    {
        Some(extension) if allowed_set.contains(extension.to_ascii_lowercase().as_str()) => Ok(()),
        Some(extension) => Err(invalid(
            field_name,
            file,
            format!(
                "Unsupported file extension: {}. Allowed extensions: {}",
                extension,
                allowed_extensions.join(", ")
            ),
        )),
        None => Err(invalid(
            field_name,
            file,
            "File has no extension or invalid filename",
        )),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(
            field_name,
            value,
            "Value cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(invalid(
            field_name,
            value,
            format!("Value must be between {} and {}", min, max),
        ));
    }
    Ok(())
}

/// A slot quantum must tile an hour exactly.
pub fn validate_quantum(field_name: &str, minutes: u32) -> Result<()> {
    validate_range(field_name, minutes, 1, 60)?;
    if 60 % minutes != 0 {
        return Err(invalid(field_name, minutes, "Value must divide 60 evenly"));
    }
    Ok(())
}

pub fn validate_locale(field_name: &str, locale: &str) -> Result<chrono::Locale> {
    chrono::Locale::try_from(locale)
        .map_err(|_| invalid(field_name, locale, "Unknown locale, expected e.g. en_US or fr_FR"))
}

pub fn validate_output_formats(field_name: &str, formats: &[String]) -> Result<()> {
    if formats.is_empty() {
        return Err(invalid(field_name, "", "At least one output format is required"));
    }
    for format in formats {
        if !OUTPUT_FORMATS.contains(&format.as_str()) {
            return Err(invalid(
                field_name,
                format,
                format!(
                    "Unsupported format. Valid formats: {}",
                    OUTPUT_FORMATS.join(", ")
                ),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("source.location", "https://example.com/cal.ics").is_ok());
        assert!(validate_url("source.location", "http://example.com").is_ok());
        assert!(validate_url("source.location", "").is_err());
        assert!(validate_url("source.location", "invalid-url").is_err());
        assert!(validate_url("source.location", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_quantum() {
        assert!(validate_quantum("view.quantum_minutes", 15).is_ok());
        assert!(validate_quantum("view.quantum_minutes", 60).is_ok());
        assert!(validate_quantum("view.quantum_minutes", 0).is_err());
        assert!(validate_quantum("view.quantum_minutes", 7).is_err());
        assert!(validate_quantum("view.quantum_minutes", 90).is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension("source.location", "team.ics", &CALENDAR_EXTENSIONS).is_ok());
        assert!(validate_file_extension("source.location", "TEAM.ICS", &CALENDAR_EXTENSIONS).is_ok());
        assert!(validate_file_extension("source.location", "team.txt", &CALENDAR_EXTENSIONS).is_err());
        assert!(validate_file_extension("source.location", "team", &CALENDAR_EXTENSIONS).is_err());
    }

    #[test]
    fn test_validate_locale() {
        assert!(validate_locale("view.locale", "fr_FR").is_ok());
        assert!(validate_locale("view.locale", "not_a_locale").is_err());
    }

    #[test]
    fn test_validate_output_formats() {
        let formats = vec!["html".to_string(), "json".to_string()];
        assert!(validate_output_formats("output.formats", &formats).is_ok());
        assert!(validate_output_formats("output.formats", &["png".to_string()]).is_err());
        assert!(validate_output_formats("output.formats", &[]).is_err());
    }
}
