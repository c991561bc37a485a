use crate::utils::error::Result;
use crate::utils::validation::validate_locale;
use chrono::{Locale, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

pub const DEFAULT_LOCALE: &str = "en_US";
pub const DEFAULT_TIME_FORMAT: &str = "%H:%M";
pub const DEFAULT_DAY_FORMAT: &str = "%A %-d/%-m";

/// Locale-aware text for day headers, hour labels and event times.
#[derive(Debug, Clone)]
pub struct LabelFormat {
    locale: Locale,
    time_format: String,
    day_format: String,
}

impl Default for LabelFormat {
    fn default() -> Self {
        Self {
            locale: Locale::en_US,
            time_format: DEFAULT_TIME_FORMAT.to_string(),
            day_format: DEFAULT_DAY_FORMAT.to_string(),
        }
    }
}

impl LabelFormat {
    pub fn new(locale: &str, time_format: &str, day_format: &str) -> Result<Self> {
        Ok(Self {
            locale: validate_locale("locale", locale)?,
            time_format: time_format.to_string(),
            day_format: day_format.to_string(),
        })
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    // Localized formatting is only offered on zoned values; wall-clock times
    // are pinned to UTC so no offset is applied.
    fn localized(&self, value: NaiveDateTime, format: &str) -> String {
        Utc.from_utc_datetime(&value)
            .format_localized(format, self.locale)
            .to_string()
    }

    pub fn day(&self, date: NaiveDate) -> String {
        self.localized(date.and_time(NaiveTime::MIN), &self.day_format)
    }

    pub fn time(&self, value: NaiveDateTime) -> String {
        self.localized(value, &self.time_format)
    }

    /// Label for `slot`; slots past midnight wrap around.
    pub fn slot(&self, slot: u32, quantum_minutes: u32) -> String {
        let minutes = (slot * quantum_minutes) % (24 * 60);
        let time = NaiveTime::from_num_seconds_from_midnight_opt(minutes * 60, 0)
            .unwrap_or(NaiveTime::MIN);
        self.localized(NaiveDate::default().and_time(time), &self.time_format)
    }
}
