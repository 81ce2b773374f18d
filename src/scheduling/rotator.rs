use chrono::{NaiveDateTime, TimeZone};
use chrono_tz::Tz;

use crate::models::slot::Suggestion;
use crate::scheduling::categorizer::{Bucket, Buckets};
use crate::scheduling::constants::{INVALID_DATE, SUGGESTION_FORMAT};

const ORDER: [Bucket; 3] = [Bucket::Morning, Bucket::Midday, Bucket::Afternoon];

/// Shared cursor into all three buckets.
#[derive(Debug, Clone, Copy)]
pub struct Rotator {
    cursor: usize,
    slot_zone: Tz,
    display_zone: Tz,
}

impl Rotator {
    pub fn new(slot_zone: Tz, display_zone: Tz) -> Self {
        Self {
            cursor: 0,
            slot_zone,
            display_zone,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The slot at the cursor from each bucket that still has one.
    pub fn peek(&self, buckets: &Buckets) -> Vec<Suggestion> {
        ORDER
            .iter()
            .filter_map(|&bucket| buckets.get(bucket).get(self.cursor))
            .map(|entry| Suggestion {
                slot: entry.slot.clone(),
                formatted_time: format_for_display(entry.local, self.slot_zone, self.display_zone),
            })
            .collect()
    }

    /// Like [`Rotator::peek`], advancing the cursor when anything was found.
    pub fn next(&mut self, buckets: &Buckets) -> Vec<Suggestion> {
        let suggestions = self.peek(buckets);
        if !suggestions.is_empty() {
            self.cursor += 1;
        }
        suggestions
    }

    pub fn reset(&mut self) {
        self.cursor = 0;
    }
}

/// Renders a slot-zone local time in the display zone, e.g. `Friday 9:00 am`.
pub fn format_for_display(local: NaiveDateTime, slot_zone: Tz, display_zone: Tz) -> String {
    match slot_zone.from_local_datetime(&local).earliest() {
        Some(instant) => instant
            .with_timezone(&display_zone)
            .format(SUGGESTION_FORMAT)
            .to_string(),
        None => INVALID_DATE.to_string(),
    }
}
