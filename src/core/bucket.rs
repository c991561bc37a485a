use crate::core::quantize::SlotQuantizer;
use crate::domain::model::{DayColumn, RawEvent};
use chrono::NaiveDate;
use std::collections::HashMap;

/// Every day from `first` to `last` inclusive, in either argument order.
pub fn days_between(first: NaiveDate, last: NaiveDate) -> Vec<NaiveDate> {
    let (start, end) = if first <= last { (first, last) } else { (last, first) };
    start.iter_days().take_while(|day| *day <= end).collect()
}

/// One column per distinct requested day, in first-seen order.
///
/// Events land in the column matching their start date; the rest are
/// outside the viewing window and dropped. Each column is sorted by start
/// slot with a stable sort, so simultaneous starts keep input order.
pub fn bucket_events(
    days: &[NaiveDate],
    events: &[RawEvent],
    quantizer: &SlotQuantizer,
) -> Vec<DayColumn> {
    let mut columns: Vec<DayColumn> = Vec::with_capacity(days.len());
    let mut index_by_date: HashMap<NaiveDate, usize> = HashMap::with_capacity(days.len());

    for day in days {
        index_by_date.entry(*day).or_insert_with(|| {
            columns.push(DayColumn {
                date: *day,
                events: Vec::new(),
            });
            columns.len() - 1
        });
    }

    let mut dropped = 0usize;
    for raw in events {
        match index_by_date.get(&raw.start.date()) {
            Some(&index) => columns[index].events.push(quantizer.quantize(raw)),
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        tracing::debug!("Dropped {} events outside the requested days", dropped);
    }

    for column in &mut columns {
        column.events.sort_by_key(|event| event.start_slot);
    }

    columns
}
