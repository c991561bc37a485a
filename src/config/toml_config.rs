use crate::adapters::fetch::DEFAULT_TIMEOUT_SECONDS;
use crate::core::bucket::days_between;
use crate::core::quantize::DEFAULT_QUANTUM_MINUTES;
use crate::core::ConfigProvider;
use crate::domain::model::CalendarSource;
use crate::render::format::{DEFAULT_DAY_FORMAT, DEFAULT_LOCALE, DEFAULT_TIME_FORMAT};
use crate::render::{LabelFormat, StyleRegion, StyleSheet};
use crate::utils::error::{RenderError, Result};
use crate::utils::validation::{self, Validate};
use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

/// A `${VAR}` left behind because the variable was not set.
fn unresolved_var() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{[^}]+\}").expect("placeholder pattern is valid"))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub source: SourceConfig,
    pub view: ViewConfig,
    pub output: OutputConfig,
    pub style: Option<BTreeMap<StyleRegion, String>>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub r#type: String,
    pub location: String,
    pub timeout_seconds: Option<u64>,
}

/// Days are written as quoted `"YYYY-MM-DD"` strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ViewConfig {
    pub days: Option<Vec<NaiveDate>>,
    pub first_day: Option<NaiveDate>,
    pub last_day: Option<NaiveDate>,
    pub quantum_minutes: Option<u32>,
    pub locale: Option<String>,
    pub time_format: Option<String>,
    pub day_format: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub output_path: String,
    pub formats: Vec<String>,
    pub filename: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

impl TomlConfig {
    /// Load and parse a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(RenderError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| RenderError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| RenderError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        let location = self.source.location.trim();
        if location.is_empty() || unresolved_var().is_match(location) {
            return Err(RenderError::MissingConfigError {
                field: "source.location".to_string(),
            });
        }

        match self.source.r#type.as_str() {
            "url" => validation::validate_url("source.location", &self.source.location)?,
            "file" => {
                validation::validate_path("source.location", &self.source.location)?;
                validation::validate_file_extension(
                    "source.location",
                    &self.source.location,
                    &validation::CALENDAR_EXTENSIONS,
                )?;
            }
            other => {
                return Err(RenderError::InvalidConfigValueError {
                    field: "source.type".to_string(),
                    value: other.to_string(),
                    reason: "Expected \"file\" or \"url\"".to_string(),
                })
            }
        }

        if let Some(timeout) = self.source.timeout_seconds {
            validation::validate_range("source.timeout_seconds", timeout, 1, 600)?;
        }

        if self.view.days.is_some() && (self.view.first_day.is_some() || self.view.last_day.is_some()) {
            return Err(RenderError::ConfigValidationError {
                field: "view".to_string(),
                message: "Use either days or first_day/last_day, not both".to_string(),
            });
        }

        validation::validate_quantum("view.quantum_minutes", self.quantum_minutes())?;
        validation::validate_locale("view.locale", self.locale())?;
        validation::validate_path("output.output_path", &self.output.output_path)?;
        validation::validate_output_formats("output.formats", &self.output.formats)?;
        validation::validate_non_empty_string("output.filename", self.output_stem())?;

        // Style payloads are checked when the sheet is assembled
        self.build_style_sheet()?;

        Ok(())
    }

    pub fn locale(&self) -> &str {
        self.view.locale.as_deref().unwrap_or(DEFAULT_LOCALE)
    }

    pub fn verbose(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.verbose).unwrap_or(false)
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }

    pub fn build_style_sheet(&self) -> Result<StyleSheet> {
        match &self.style {
            Some(overrides) => StyleSheet::with_overrides(overrides),
            None => Ok(StyleSheet::default()),
        }
    }
}

impl ConfigProvider for TomlConfig {
    fn source(&self) -> CalendarSource {
        match self.source.r#type.as_str() {
            "url" => CalendarSource::Url(self.source.location.clone()),
            _ => CalendarSource::File(self.source.location.clone()),
        }
    }

    fn days(&self) -> Vec<NaiveDate> {
        if let Some(days) = &self.view.days {
            return days.clone();
        }
        match (self.view.first_day, self.view.last_day) {
            (Some(first), Some(last)) => days_between(first, last),
            (Some(day), None) | (None, Some(day)) => vec![day],
            (None, None) => Vec::new(),
        }
    }

    fn output_path(&self) -> &str {
        &self.output.output_path
    }

    fn output_formats(&self) -> &[String] {
        &self.output.formats
    }

    fn output_stem(&self) -> &str {
        self.output.filename.as_deref().unwrap_or("calendar")
    }

    fn quantum_minutes(&self) -> u32 {
        self.view.quantum_minutes.unwrap_or(DEFAULT_QUANTUM_MINUTES)
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.source.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS))
    }

    fn label_format(&self) -> Result<LabelFormat> {
        LabelFormat::new(
            self.locale(),
            self.view.time_format.as_deref().unwrap_or(DEFAULT_TIME_FORMAT),
            self.view.day_format.as_deref().unwrap_or(DEFAULT_DAY_FORMAT),
        )
    }

    fn style_sheet(&self) -> Result<StyleSheet> {
        self.build_style_sheet()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
