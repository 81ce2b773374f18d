use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{info, warn};

use crate::error::SlotTimeError;
use crate::models::slot::Slot;
use crate::scheduling::constants::{AFTERNOON_HOURS, MIDDAY_HOURS, MORNING_HOURS};

static SLOT_TIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(\d{1,2})/(\d{1,2})/(\d{4}),\s*(\d{1,2}):(\d{2})(?::(\d{2}))?\s*(am|pm)\s*$")
        .expect("slot time pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    Morning,
    Midday,
    Afternoon,
}

impl Bucket {
    pub fn for_hour(hour: u32) -> Option<Bucket> {
        if MORNING_HOURS.contains(&hour) {
            Some(Bucket::Morning)
        } else if MIDDAY_HOURS.contains(&hour) {
            Some(Bucket::Midday)
        } else if AFTERNOON_HOURS.contains(&hour) {
            Some(Bucket::Afternoon)
        } else {
            None
        }
    }
}

/// A slot together with its start time in the slot timezone.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorizedSlot {
    pub slot: Slot,
    pub local: NaiveDateTime,
}

#[derive(Debug, Default, Clone)]
pub struct Buckets {
    pub morning: Vec<CategorizedSlot>,
    pub midday: Vec<CategorizedSlot>,
    pub afternoon: Vec<CategorizedSlot>,
}

impl Buckets {
    pub fn get(&self, bucket: Bucket) -> &[CategorizedSlot] {
        match bucket {
            Bucket::Morning => &self.morning,
            Bucket::Midday => &self.midday,
            Bucket::Afternoon => &self.afternoon,
        }
    }

    fn get_mut(&mut self, bucket: Bucket) -> &mut Vec<CategorizedSlot> {
        match bucket {
            Bucket::Morning => &mut self.morning,
            Bucket::Midday => &mut self.midday,
            Bucket::Afternoon => &mut self.afternoon,
        }
    }

    /// Appends every readable slot to its bucket.
    ///
    /// Slots outside all three ranges are dropped and unreadable ones are
    /// logged and skipped. Calling this twice with the same input
    /// duplicates entries.
    pub fn categorize<I>(&mut self, slots: I)
    where
        I: IntoIterator<Item = Slot>,
    {
        for slot in slots {
            let local = match parse_slot_time(&slot.time) {
                Ok(local) => local,
                Err(e) => {
                    warn!("Skipping slot {:?}: {}", slot.time, e);
                    continue;
                }
            };

            if let Some(bucket) = Bucket::for_hour(local.hour()) {
                self.get_mut(bucket).push(CategorizedSlot { slot, local });
            }
        }

        info!("Morning slots: {}", self.morning.len());
        info!("Midday slots: {}", self.midday.len());
        info!("Afternoon slots: {}", self.afternoon.len());
    }
}

/// Reads `"DD/MM/YYYY, H:MM[:SS] am|pm"` into a naive local date-time.
pub fn parse_slot_time(value: &str) -> Result<NaiveDateTime, SlotTimeError> {
    let caps = SLOT_TIME.captures(value).ok_or(SlotTimeError::Layout)?;
    let num = |i: usize| caps.get(i).map_or(Ok(0), |m| m.as_str().parse::<u32>());

    let (day, month, year) = match (num(1), num(2), caps[3].parse::<i32>()) {
        (Ok(d), Ok(m), Ok(y)) => (d, m, y),
        _ => return Err(SlotTimeError::Date(value.to_string())),
    };
    let date = NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| SlotTimeError::Date(value.to_string()))?;

    let (mut hour, minute, second) = match (num(4), num(5), num(6)) {
        (Ok(h), Ok(m), Ok(s)) => (h, m, s),
        _ => return Err(SlotTimeError::Time(value.to_string())),
    };
    if hour > 12 {
        return Err(SlotTimeError::Time(value.to_string()));
    }
    let pm = caps[7].eq_ignore_ascii_case("pm");
    if pm && hour != 12 {
        hour += 12;
    } else if !pm && hour == 12 {
        hour = 0;
    }
    let time = NaiveTime::from_hms_opt(hour, minute, second)
        .ok_or_else(|| SlotTimeError::Time(value.to_string()))?;

    Ok(date.and_time(time))
}
