use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Calendar request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Calendar parse error: {message}")]
    CalendarParseError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("At least one day must be requested")]
    EmptyDayList,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Io,
    Data,
    Configuration,
    Caller,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl RenderError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            RenderError::HttpError(_) => ErrorCategory::Network,
            RenderError::IoError(_) => ErrorCategory::Io,
            RenderError::SerializationError(_) | RenderError::CalendarParseError { .. } => {
                ErrorCategory::Data
            }
            RenderError::ConfigError { .. }
            | RenderError::ConfigValidationError { .. }
            | RenderError::InvalidConfigValueError { .. }
            | RenderError::MissingConfigError { .. } => ErrorCategory::Configuration,
            RenderError::EmptyDayList => ErrorCategory::Caller,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Caller | ErrorCategory::Configuration => {
                ErrorSeverity::High
            }
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            RenderError::HttpError(_) => {
                "Check that the calendar URL is reachable and retry, or raise the request timeout"
            }
            RenderError::IoError(_) => {
                "Check that the calendar file exists and the output directory is writable"
            }
            RenderError::SerializationError(_) => "Report the grid that failed to serialize",
            RenderError::CalendarParseError { .. } => {
                "Make sure the source is a valid iCalendar (.ics) document"
            }
            RenderError::ConfigError { .. }
            | RenderError::ConfigValidationError { .. }
            | RenderError::InvalidConfigValueError { .. }
            | RenderError::MissingConfigError { .. } => {
                "Fix the reported configuration value and run again"
            }
            RenderError::EmptyDayList => "Pass at least one --day, or a --from/--to range",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            RenderError::HttpError(e) => format!("Could not download the calendar: {}", e),
            RenderError::IoError(e) => format!("File access failed: {}", e),
            RenderError::CalendarParseError { message } => {
                format!("The calendar could not be read: {}", message)
            }
            RenderError::EmptyDayList => "No days were requested".to_string(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RenderError>;
