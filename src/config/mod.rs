pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use args::CliConfig;

#[cfg(feature = "cli")]
mod args {
    use crate::adapters::fetch::DEFAULT_TIMEOUT_SECONDS;
    use crate::core::bucket::days_between;
    use crate::core::ConfigProvider;
    use crate::domain::model::CalendarSource;
    use crate::render::format::{DEFAULT_DAY_FORMAT, DEFAULT_LOCALE, DEFAULT_TIME_FORMAT};
    use crate::render::{LabelFormat, StyleSheet};
    use crate::utils::error::{RenderError, Result};
    use crate::utils::validation::{self, Validate};
    use chrono::NaiveDate;
    use clap::Parser;
    use serde::{Deserialize, Serialize};
    use std::time::Duration;

    fn parse_source(value: &str) -> std::result::Result<CalendarSource, String> {
        if value.trim().is_empty() {
            return Err("calendar source cannot be empty".to_string());
        }
        Ok(CalendarSource::from_location(value))
    }

    #[derive(Debug, Clone, Serialize, Deserialize, Parser)]
    #[command(name = "day-grid")]
    #[command(about = "Render an iCalendar feed as a day-by-day HTML grid")]
    pub struct CliConfig {
        /// Path to an .ics file, or an http(s) URL
        #[arg(long, value_parser = parse_source)]
        pub source: CalendarSource,

        /// Day to show (YYYY-MM-DD); repeat or comma-separate for several
        #[arg(long = "day", value_delimiter = ',')]
        pub days: Vec<NaiveDate>,

        /// First day of an inclusive range
        #[arg(long, conflicts_with = "days")]
        pub from: Option<NaiveDate>,

        /// Last day of an inclusive range
        #[arg(long, conflicts_with = "days")]
        pub to: Option<NaiveDate>,

        #[arg(long, default_value = "./output")]
        pub output_path: String,

        #[arg(long = "format", value_delimiter = ',', default_value = "html")]
        pub formats: Vec<String>,

        #[arg(long, default_value = "calendar")]
        pub output_stem: String,

        #[arg(long, default_value_t = 15)]
        pub quantum_minutes: u32,

        #[arg(long, default_value = DEFAULT_LOCALE)]
        pub locale: String,

        #[arg(long, default_value = DEFAULT_TIME_FORMAT)]
        pub time_format: String,

        #[arg(long, default_value = DEFAULT_DAY_FORMAT)]
        pub day_format: String,

        #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECONDS)]
        pub timeout_seconds: u64,

        #[arg(long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, help = "Emit logs as JSON")]
        pub log_json: bool,
    }

    impl ConfigProvider for CliConfig {
        fn source(&self) -> CalendarSource {
            self.source.clone()
        }

        fn days(&self) -> Vec<NaiveDate> {
            if !self.days.is_empty() {
                return self.days.clone();
            }
            match (self.from, self.to) {
                (Some(from), Some(to)) => days_between(from, to),
                (Some(day), None) | (None, Some(day)) => vec![day],
                (None, None) => Vec::new(),
            }
        }

        fn output_path(&self) -> &str {
            &self.output_path
        }

        fn output_formats(&self) -> &[String] {
            &self.formats
        }

        fn output_stem(&self) -> &str {
            &self.output_stem
        }

        fn quantum_minutes(&self) -> u32 {
            self.quantum_minutes
        }

        fn request_timeout(&self) -> Duration {
            Duration::from_secs(self.timeout_seconds)
        }

        fn label_format(&self) -> Result<LabelFormat> {
            LabelFormat::new(&self.locale, &self.time_format, &self.day_format)
        }

        fn style_sheet(&self) -> Result<StyleSheet> {
            Ok(StyleSheet::default())
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            match &self.source {
                CalendarSource::Url(url) => validation::validate_url("source", url)?,
                CalendarSource::File(path) => {
                    validation::validate_path("source", path)?;
                    validation::validate_file_extension(
                        "source",
                        path,
                        &validation::CALENDAR_EXTENSIONS,
                    )?;
                }
            }
            if !self.days.is_empty() && (self.from.is_some() || self.to.is_some()) {
                return Err(RenderError::ConfigError {
                    message: "--day cannot be combined with --from/--to".to_string(),
                });
            }
            validation::validate_path("output_path", &self.output_path)?;
            validation::validate_non_empty_string("output_stem", &self.output_stem)?;
            validation::validate_output_formats("format", &self.formats)?;
            validation::validate_quantum("quantum_minutes", self.quantum_minutes)?;
            validation::validate_locale("locale", &self.locale)?;
            validation::validate_range("timeout_seconds", self.timeout_seconds, 1, 600)?;
            Ok(())
        }
    }

}
