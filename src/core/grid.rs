use crate::core::bucket::bucket_events;
use crate::core::quantize::SlotQuantizer;
use crate::domain::model::{
    Cell, DayColumn, Event, Grid, GridRow, RawEvent, TimeLabel,
};
use crate::utils::error::{RenderError, Result};
use chrono::NaiveDate;

/// Per-column walk state for one build.
struct ColumnCursor<'a> {
    events: &'a [Event],
    next: usize,
    occupied_until: u32,
}

impl<'a> ColumnCursor<'a> {
    fn new(column: &'a DayColumn, low: u32) -> Self {
        Self {
            events: &column.events,
            next: 0,
            occupied_until: low,
        }
    }

    /// First event starting exactly at `slot`. Later events with the same
    /// start are skipped and never rendered.
    fn take_starting_at(&mut self, slot: u32) -> Option<&'a Event> {
        let events = self.events;
        while events
            .get(self.next)
            .is_some_and(|event| event.start_slot < slot)
        {
            self.next += 1;
        }

        let event = events.get(self.next).filter(|e| e.start_slot == slot)?;
        let skipped = events[self.next + 1..]
            .iter()
            .take_while(|e| e.start_slot == slot)
            .count();
        if skipped > 0 {
            tracing::debug!(
                "{} event(s) on {} share slot {} with '{}' and are hidden",
                skipped,
                event.day,
                slot,
                event.label
            );
        }
        self.next += 1 + skipped;
        Some(event)
    }

    fn cell_at(&mut self, slot: u32) -> Cell {
        if let Some(event) = self.take_starting_at(slot) {
            self.occupied_until = slot.saturating_add(event.slot_span);
            Cell::EventStart {
                row_span: event.slot_span.max(1),
                event: event.clone(),
            }
        } else if self.occupied_until > slot {
            Cell::Suppressed
        } else {
            Cell::Empty
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GridBuilder {
    quantizer: SlotQuantizer,
}

impl GridBuilder {
    pub fn new(quantizer: SlotQuantizer) -> Self {
        Self { quantizer }
    }

    pub fn quantizer(&self) -> &SlotQuantizer {
        &self.quantizer
    }

    /// Bucket `events` into `days` and lay them out. An empty `days` is a
    /// caller error; days without any events are not.
    pub fn build(&self, days: &[NaiveDate], events: &[RawEvent]) -> Result<Grid> {
        if days.is_empty() {
            return Err(RenderError::EmptyDayList);
        }
        let columns = bucket_events(days, events, &self.quantizer);
        Ok(self.build_from_columns(&columns))
    }

    pub fn build_from_columns(&self, columns: &[DayColumn]) -> Grid {
        let bounds = self.quantizer.bounds(columns);
        let per_hour = self.quantizer.slots_per_hour();

        let mut cursors: Vec<ColumnCursor<'_>> = columns
            .iter()
            .map(|column| ColumnCursor::new(column, bounds.low))
            .collect();

        let mut rows = Vec::with_capacity(bounds.row_count());
        if !bounds.is_empty() {
            for slot in bounds.low..=bounds.high {
                let time_label = (slot % per_hour == 0).then_some(TimeLabel {
                    slot,
                    row_span: per_hour,
                });
                let cells = cursors.iter_mut().map(|cursor| cursor.cell_at(slot)).collect();
                rows.push(GridRow {
                    slot,
                    time_label,
                    cells,
                });
            }
        }

        tracing::debug!(
            "Built grid: {} days, {} rows, slots {}..={}",
            columns.len(),
            rows.len(),
            bounds.low,
            bounds.high
        );

        Grid {
            bounds,
            quantum_minutes: self.quantizer.quantum_minutes(),
            days: columns.iter().map(|column| column.date).collect(),
            rows,
        }
    }
}

/// Convenience entry point over an inclusive day range.
pub fn build_grid_for_range(
    builder: &GridBuilder,
    first: NaiveDate,
    last: NaiveDate,
    events: &[RawEvent],
) -> Result<Grid> {
    let days = crate::core::bucket::days_between(first, last);
    builder.build(&days, events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::SlotBounds;
    use chrono::{Duration, NaiveDateTime};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn at(d: u32, hour: u32, minute: u32) -> NaiveDateTime {
        day(d).and_hms_opt(hour, minute, 0).unwrap()
    }

    fn raw(start: NaiveDateTime, minutes: i64, label: &str) -> RawEvent {
        RawEvent {
            start,
            end: start + Duration::minutes(minutes),
            label: label.to_string(),
        }
    }

    fn kinds(grid: &Grid, column: usize) -> Vec<&'static str> {
        grid.column(column)
            .map(|cell| match cell {
                Cell::EventStart { .. } => "start",
                Cell::Suppressed => "suppressed",
                Cell::Empty => "empty",
            })
            .collect()
    }

    #[test]
    fn test_standup_scenario() {
        let events = vec![raw(at(1, 9, 0), 90, "Standup")];
        let grid = GridBuilder::default().build(&[day(1)], &events).unwrap();

        assert_eq!(grid.bounds.low, 36);
        assert_eq!(grid.bounds.high, 44);
        assert_eq!(grid.rows.len(), 9);

        match &grid.rows[0].cells[0] {
            Cell::EventStart { row_span, event } => {
                assert_eq!(*row_span, 6);
                assert_eq!(event.start_slot, 36);
                assert_eq!(event.slot_span, 6);
                assert_eq!(event.label, "Standup");
            }
            other => panic!("expected event start, got {:?}", other),
        }
        for row in &grid.rows[1..6] {
            assert_eq!(row.cells[0], Cell::Suppressed, "slot {}", row.slot);
        }
        for row in &grid.rows[6..] {
            assert_eq!(row.cells[0], Cell::Empty, "slot {}", row.slot);
        }
        assert_eq!(grid.rows[6].slot, 42);
    }

    #[test]
    fn test_zero_duration_event_spans_one_row() {
        let events = vec![raw(at(1, 14, 0), 0, "Reminder")];
        let grid = GridBuilder::default().build(&[day(1), day(2)], &events).unwrap();

        assert_eq!(grid.bounds, SlotBounds { low: 56, high: 56 });
        assert_eq!(grid.rows.len(), 1);
        match &grid.rows[0].cells[0] {
            Cell::EventStart { row_span, .. } => assert_eq!(*row_span, 1),
            other => panic!("expected event start, got {:?}", other),
        }
        assert_eq!(grid.rows[0].cells[1], Cell::Empty);
    }

    #[test]
    fn test_zero_duration_does_not_suppress_next_row() {
        let events = vec![
            raw(at(1, 14, 0), 0, "Reminder"),
            raw(at(1, 14, 30), 30, "Call"),
        ];
        let grid = GridBuilder::default().build(&[day(1)], &events).unwrap();
        assert_eq!(
            kinds(&grid, 0),
            vec!["start", "empty", "start", "suppressed", "empty"]
        );
    }

    #[test]
    fn test_no_events_yields_empty_grid() {
        let grid = GridBuilder::default().build(&[day(1), day(2)], &[]).unwrap();
        assert!(grid.bounds.low > grid.bounds.high);
        assert!(grid.is_empty());
        assert_eq!(grid.days, vec![day(1), day(2)]);
    }

    #[test]
    fn test_empty_day_list_is_rejected() {
        let events = vec![raw(at(1, 9, 0), 60, "x")];
        let err = GridBuilder::default().build(&[], &events).unwrap_err();
        assert!(matches!(err, RenderError::EmptyDayList));
    }

    #[test]
    fn test_same_start_slot_keeps_first_event_only() {
        let events = vec![
            raw(at(1, 10, 0), 30, "First"),
            raw(at(1, 10, 5), 60, "Second"),
        ];
        let grid = GridBuilder::default().build(&[day(1)], &events).unwrap();

        let starts: Vec<&str> = grid
            .column(0)
            .filter_map(|cell| match cell {
                Cell::EventStart { event, .. } => Some(event.label.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(starts, vec!["First"]);
        assert_eq!(kinds(&grid, 0), vec!["start", "suppressed", "empty", "empty", "empty"]);
    }

    #[test]
    fn test_start_inside_span_moves_the_cursor() {
        let events = vec![
            raw(at(1, 9, 0), 120, "Workshop"),
            raw(at(1, 9, 30), 15, "Call"),
        ];
        let grid = GridBuilder::default().build(&[day(1)], &events).unwrap();

        assert_eq!(grid.bounds, SlotBounds { low: 36, high: 44 });
        // Call at slot 38 ends the suppression at 39, not at the workshop's 44
        assert_eq!(
            kinds(&grid, 0),
            vec![
                "start",
                "suppressed",
                "start",
                "empty",
                "empty",
                "empty",
                "empty",
                "empty",
                "empty"
            ]
        );
        assert!(matches!(grid.rows[0].cells[0], Cell::EventStart { row_span: 8, .. }));
        assert!(matches!(grid.rows[2].cells[0], Cell::EventStart { row_span: 1, .. }));
    }

    #[test]
    fn test_rows_are_uniform_across_days() {
        let events = vec![
            raw(at(1, 8, 0), 45, "a"),
            raw(at(2, 13, 15), 120, "b"),
            raw(at(3, 18, 0), 15, "c"),
        ];
        let grid = GridBuilder::default()
            .build(&[day(1), day(2), day(3)], &events)
            .unwrap();

        let expected = (grid.bounds.high - grid.bounds.low + 1) as usize;
        assert_eq!(grid.rows.len(), expected);
        for row in &grid.rows {
            assert_eq!(row.cells.len(), 3);
        }
    }

    #[test]
    fn test_event_covers_exactly_its_span() {
        let events = vec![
            raw(at(1, 8, 15), 45, "a"),
            raw(at(1, 10, 0), 120, "b"),
            raw(at(1, 12, 30), 10, "c"),
        ];
        let grid = GridBuilder::default().build(&[day(1)], &events).unwrap();
        let cells: Vec<&Cell> = grid.column(0).collect();

        for (index, cell) in cells.iter().enumerate() {
            if let Cell::EventStart { row_span, .. } = cell {
                let covered = &cells[index + 1..index + *row_span as usize];
                assert!(covered.iter().all(|c| **c == Cell::Suppressed));
                if let Some(after) = cells.get(index + *row_span as usize) {
                    assert_ne!(**after, Cell::Suppressed);
                }
            }
        }
        let suppressed = cells.iter().filter(|c| ***c == Cell::Suppressed).count();
        // 3 + 8 + 1 rows covered, minus the three start rows
        assert_eq!(suppressed, 2 + 7);
    }

    #[test]
    fn test_time_labels_every_hour() {
        let events = vec![raw(at(1, 9, 0), 90, "Standup")];
        let grid = GridBuilder::default().build(&[day(1)], &events).unwrap();

        let labelled: Vec<u32> = grid
            .rows
            .iter()
            .filter_map(|row| row.time_label.map(|label| label.slot))
            .collect();
        assert_eq!(labelled, vec![36, 40, 44]);
        assert!(grid
            .rows
            .iter()
            .filter_map(|row| row.time_label)
            .all(|label| label.row_span == 4));
    }

    #[test]
    fn test_build_is_idempotent() {
        let events = vec![
            raw(at(1, 9, 0), 90, "Standup"),
            raw(at(2, 11, 0), 30, "Review"),
        ];
        let builder = GridBuilder::default();
        let first = builder.build(&[day(1), day(2)], &events).unwrap();
        let second = builder.build(&[day(1), day(2)], &events).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_range_entry_point_includes_both_ends() {
        let events = vec![raw(at(3, 9, 0), 60, "x")];
        let grid = build_grid_for_range(&GridBuilder::default(), day(3), day(1), &events).unwrap();
        assert_eq!(grid.days, vec![day(1), day(2), day(3)]);
        assert_eq!(kinds(&grid, 0), vec!["empty"; 5]);
        let first_start = grid.column(2).find_map(|cell| match cell {
            Cell::EventStart { event, .. } => Some(event.start_slot),
            _ => None,
        });
        assert_eq!(first_start, Some(36));
    }

    #[test]
    fn test_half_hour_quantum() {
        let builder = GridBuilder::new(SlotQuantizer::new(30).unwrap());
        let events = vec![raw(at(1, 9, 30), 60, "x")];
        let grid = builder.build(&[day(1)], &events).unwrap();

        assert_eq!(grid.bounds, SlotBounds { low: 18, high: 22 });
        assert_eq!(
            kinds(&grid, 0),
            vec!["empty", "start", "suppressed", "empty", "empty"]
        );
        assert!(grid.rows[0].time_label.is_some());
        assert_eq!(grid.rows[0].time_label.unwrap().row_span, 2);
    }
}
