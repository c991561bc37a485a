use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// An event as it comes out of the calendar source, before quantization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEvent {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub label: String,
}

/// A quantized event, attributed to the day of its start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub day: NaiveDate,
    pub start_slot: u32,
    pub slot_span: u32,
    pub actual_start: NaiveDateTime,
    pub actual_end: NaiveDateTime,
    pub label: String,
}

/// Events of one requested day, ascending by `start_slot`, ties in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayColumn {
    pub date: NaiveDate,
    pub events: Vec<Event>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Cell {
    EventStart { row_span: u32, event: Event },
    /// Covered by an earlier row-span; renders nothing.
    Suppressed,
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeLabel {
    pub slot: u32,
    pub row_span: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridRow {
    pub slot: u32,
    pub time_label: Option<TimeLabel>,
    pub cells: Vec<Cell>,
}

/// Inclusive hour-aligned slot range. `low > high` means there is nothing to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotBounds {
    pub low: u32,
    pub high: u32,
}

impl SlotBounds {
    pub fn is_empty(&self) -> bool {
        self.low > self.high
    }

    pub fn row_count(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            (self.high - self.low + 1) as usize
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub bounds: SlotBounds,
    pub quantum_minutes: u32,
    pub days: Vec<NaiveDate>,
    pub rows: Vec<GridRow>,
}

impl Grid {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cells of one day, top to bottom.
    pub fn column(&self, index: usize) -> impl Iterator<Item = &Cell> + '_ {
        self.rows.iter().filter_map(move |row| row.cells.get(index))
    }
}

#[derive(Debug, Clone)]
pub struct RenderResult {
    pub grid: Grid,
    pub html_output: String,
    pub json_output: Option<String>,
}

/// Where the iCalendar document is read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "location", rename_all = "snake_case")]
pub enum CalendarSource {
    File(String),
    Url(String),
}

impl CalendarSource {
    /// `http://` and `https://` locations are fetched, anything else is a local path.
    pub fn from_location(location: &str) -> Self {
        let lower = location.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            CalendarSource::Url(location.to_string())
        } else {
            CalendarSource::File(location.to_string())
        }
    }

    pub fn location(&self) -> &str {
        match self {
            CalendarSource::File(path) => path,
            CalendarSource::Url(url) => url,
        }
    }
}
