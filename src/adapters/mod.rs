// Adapters layer: calendar sources and their parsing.

pub mod fetch;
pub mod ics;

pub use fetch::CalendarFetcher;
pub use ics::{parse_ics_bytes, parse_ics_str};
