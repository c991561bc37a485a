use crate::domain::model::{DayColumn, Event, RawEvent, SlotBounds};
use crate::utils::error::{RenderError, Result};
use crate::utils::validation::validate_quantum;
use chrono::{NaiveDateTime, Timelike};

pub const DEFAULT_QUANTUM_MINUTES: u32 = 15;

/// Maps wall-clock times onto fixed-size slots counted from midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotQuantizer {
    quantum_minutes: u32,
}

impl Default for SlotQuantizer {
    fn default() -> Self {
        Self {
            quantum_minutes: DEFAULT_QUANTUM_MINUTES,
        }
    }
}

impl SlotQuantizer {
    pub fn new(quantum_minutes: u32) -> Result<Self> {
        validate_quantum("quantum_minutes", quantum_minutes).map_err(|e| match e {
            RenderError::InvalidConfigValueError { reason, .. } => {
                RenderError::ConfigValidationError {
                    field: "quantum_minutes".to_string(),
                    message: reason,
                }
            }
            other => other,
        })?;
        Ok(Self { quantum_minutes })
    }

    pub fn quantum_minutes(&self) -> u32 {
        self.quantum_minutes
    }

    pub fn slots_per_hour(&self) -> u32 {
        60 / self.quantum_minutes
    }

    pub fn slots_per_day(&self) -> u32 {
        24 * self.slots_per_hour()
    }

    pub fn start_slot(&self, start: NaiveDateTime) -> u32 {
        (start.hour() * 60 + start.minute()) / self.quantum_minutes
    }

    /// Floored duration in slots. Zero-length and inverted events report 0.
    pub fn slot_span(&self, start: NaiveDateTime, end: NaiveDateTime) -> u32 {
        let minutes = (end - start).num_minutes().max(0);
        u32::try_from(minutes / i64::from(self.quantum_minutes)).unwrap_or(u32::MAX)
    }

    pub fn quantize(&self, raw: &RawEvent) -> Event {
        let actual_end = raw.end.max(raw.start);
        Event {
            day: raw.start.date(),
            start_slot: self.start_slot(raw.start),
            slot_span: self.slot_span(raw.start, raw.end),
            actual_start: raw.start,
            actual_end,
            label: raw.label.clone(),
        }
    }

    /// Hour-aligned slot range covering every event in every column.
    pub fn bounds(&self, columns: &[DayColumn]) -> SlotBounds {
        let events = columns.iter().flat_map(|column| column.events.iter());

        let (min_slot, max_slot) = events.fold(
            (self.slots_per_day(), 0),
            |(min_slot, max_slot), event| {
                (
                    min_slot.min(event.start_slot),
                    max_slot.max(event.start_slot.saturating_add(event.slot_span)),
                )
            },
        );

        let per_hour = self.slots_per_hour();
        SlotBounds {
            low: min_slot / per_hour * per_hour,
            high: max_slot
                .div_ceil(per_hour)
                .checked_mul(per_hour)
                .unwrap_or(u32::MAX / per_hour * per_hour),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn column(events: Vec<Event>) -> DayColumn {
        DayColumn {
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            events,
        }
    }

    fn event(start_slot: u32, slot_span: u32) -> Event {
        Event {
            day: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            start_slot,
            slot_span,
            actual_start: at(0, 0),
            actual_end: at(0, 0),
            label: String::new(),
        }
    }

    #[test]
    fn test_start_slot_floors_to_quantum() {
        let quantizer = SlotQuantizer::default();
        assert_eq!(quantizer.start_slot(at(9, 0)), 36);
        assert_eq!(quantizer.start_slot(at(9, 14)), 36);
        assert_eq!(quantizer.start_slot(at(9, 15)), 37);
        assert_eq!(quantizer.start_slot(at(23, 59)), 95);
    }

    #[test]
    fn test_slot_span_floors_duration() {
        let quantizer = SlotQuantizer::default();
        assert_eq!(quantizer.slot_span(at(9, 0), at(10, 30)), 6);
        assert_eq!(quantizer.slot_span(at(9, 0), at(9, 29)), 1);
        assert_eq!(quantizer.slot_span(at(14, 0), at(14, 0)), 0);
        assert_eq!(quantizer.slot_span(at(14, 0), at(13, 0)), 0);
    }

    #[test]
    fn test_slot_span_saturates_for_very_long_events() {
        let quantizer = SlotQuantizer::default();
        let start = at(9, 0);
        let end = NaiveDate::from_ymd_opt(250_000, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(quantizer.slot_span(start, end), u32::MAX);

        let bounds = quantizer.bounds(&[column(vec![event(36, u32::MAX)])]);
        assert_eq!(bounds.low, 36);
        assert_eq!(bounds.high, u32::MAX - 3);
    }

    #[test]
    fn test_quantize_keeps_actual_times() {
        let raw = RawEvent {
            start: at(9, 5),
            end: at(10, 35),
            label: "Standup".to_string(),
        };
        let event = SlotQuantizer::default().quantize(&raw);
        assert_eq!(event.start_slot, 36);
        assert_eq!(event.slot_span, 6);
        assert_eq!(event.actual_start, at(9, 5));
        assert_eq!(event.actual_end, at(10, 35));
        assert_eq!(event.day, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    }

    #[test]
    fn test_bounds_round_outward_to_hours() {
        let quantizer = SlotQuantizer::default();
        let bounds = quantizer.bounds(&[column(vec![event(37, 6)])]);
        assert_eq!(bounds, SlotBounds { low: 36, high: 44 });
    }

    #[test]
    fn test_bounds_already_aligned() {
        let quantizer = SlotQuantizer::default();
        let bounds = quantizer.bounds(&[column(vec![event(36, 6)])]);
        assert_eq!(bounds, SlotBounds { low: 36, high: 44 });
    }

    #[test]
    fn test_bounds_without_events_are_empty() {
        let quantizer = SlotQuantizer::default();
        let bounds = quantizer.bounds(&[column(vec![]), column(vec![])]);
        assert!(bounds.low > bounds.high);
        assert!(bounds.is_empty());
        assert_eq!(bounds.row_count(), 0);
    }

    #[test]
    fn test_custom_quantum() {
        let quantizer = SlotQuantizer::new(30).unwrap();
        assert_eq!(quantizer.slots_per_hour(), 2);
        assert_eq!(quantizer.start_slot(at(9, 45)), 19);
        assert!(SlotQuantizer::new(25).is_err());
    }
}
