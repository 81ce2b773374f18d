//! Conversational date phrases ("next friday at 3:30pm") to UTC instants.
//!
//! Parsing happens in two steps: [`tokenize`] turns the phrase into a
//! [`ParsedPhrase`], and [`ConversationalDateParser::resolve`] anchors that
//! against "now" in the source timezone.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc, Weekday};
use chrono_tz::Tz;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::DateParseError;

static CLOCK_TIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\d+):?(\d{0,2})?\s?(am|pm)?").expect("clock time pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayReference {
    Tomorrow,
    Weekday { weekday: Weekday, next_week: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Am,
    Pm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockTime {
    pub hour: u32,
    pub minute: u32,
    pub period: Option<Period>,
}

impl ClockTime {
    /// Hour on a 24-hour clock.
    pub fn hour24(&self) -> u32 {
        match (self.period, self.hour) {
            (Some(Period::Pm), h) if h != 12 => h.saturating_add(12),
            (Some(Period::Am), 12) => 0,
            (_, h) => h,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedPhrase {
    pub day: DayReference,
    pub time: ClockTime,
}

/// Splits a phrase into its day reference and clock time.
pub fn tokenize(phrase: &str) -> Result<ParsedPhrase, DateParseError> {
    let lowered = phrase.to_lowercase();
    let words: Vec<&str> = lowered.split_whitespace().collect();
    if words.is_empty() {
        return Err(DateParseError::Empty);
    }

    let (day, time_words) = if words.contains(&"tomorrow") {
        // Everything after the first "at", or the whole phrase without one.
        let start = words.iter().position(|w| *w == "at").map_or(0, |i| i + 1);
        (DayReference::Tomorrow, &words[start..])
    } else if words[0] == "next" {
        let name = words.get(1).copied().unwrap_or_default();
        let weekday = weekday_from_name(name)?;
        (
            DayReference::Weekday {
                weekday,
                next_week: true,
            },
            words.get(3..).unwrap_or_default(),
        )
    } else {
        let weekday = weekday_from_name(words[0])?;
        (
            DayReference::Weekday {
                weekday,
                next_week: false,
            },
            words.get(2..).unwrap_or_default(),
        )
    };

    let time = parse_clock_time(&time_words.join(" "))?;
    Ok(ParsedPhrase { day, time })
}

/// Full English weekday names only; "fri" is not a weekday.
fn weekday_from_name(name: &str) -> Result<Weekday, DateParseError> {
    let weekday = match name {
        "monday" => Weekday::Mon,
        "tuesday" => Weekday::Tue,
        "wednesday" => Weekday::Wed,
        "thursday" => Weekday::Thu,
        "friday" => Weekday::Fri,
        "saturday" => Weekday::Sat,
        "sunday" => Weekday::Sun,
        _ => return Err(DateParseError::UnknownWeekday(name.to_string())),
    };
    Ok(weekday)
}

fn parse_clock_time(text: &str) -> Result<ClockTime, DateParseError> {
    let missing = || DateParseError::MissingTime(text.to_string());
    let caps = CLOCK_TIME.captures(text).ok_or_else(missing)?;

    let hour: u32 = caps[1].parse().map_err(|_| missing())?;
    let minute: u32 = match caps.get(2).map(|m| m.as_str()) {
        Some(m) if !m.is_empty() => m.parse().map_err(|_| missing())?,
        _ => 0,
    };
    let period = caps.get(3).map(|m| {
        if m.as_str().eq_ignore_ascii_case("pm") {
            Period::Pm
        } else {
            Period::Am
        }
    });

    // Reject before the period shift so huge hours never wrap.
    if hour > 23 || minute > 59 {
        return Err(DateParseError::OutOfRange { hour, minute });
    }

    let time = ClockTime {
        hour,
        minute,
        period,
    };
    if time.hour24() > 23 {
        return Err(DateParseError::OutOfRange {
            hour: time.hour24(),
            minute,
        });
    }
    Ok(time)
}

#[derive(Debug, Clone, Copy)]
pub struct ConversationalDateParser {
    zone: Tz,
}

impl ConversationalDateParser {
    pub fn new(zone: Tz) -> Self {
        Self { zone }
    }

    pub fn parse(&self, phrase: &str) -> Result<DateTime<Utc>, DateParseError> {
        self.parse_at(phrase, Utc::now())
    }

    pub fn parse_at(&self, phrase: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>, DateParseError> {
        let parsed = tokenize(phrase)?;
        self.resolve(&parsed, now)
    }

    /// Anchors a parsed phrase to a concrete instant, always in the future
    /// of `now`'s calendar day.
    pub fn resolve(&self, parsed: &ParsedPhrase, now: DateTime<Utc>) -> Result<DateTime<Utc>, DateParseError> {
        let today = now.with_timezone(&self.zone).date_naive();
        let tomorrow = today + Duration::days(1);

        let date = match parsed.day {
            DayReference::Tomorrow => tomorrow,
            DayReference::Weekday { weekday, next_week } => {
                let ahead = days_until(tomorrow, weekday);
                let extra = if next_week { 7 } else { 0 };
                tomorrow + Duration::days(ahead + extra)
            }
        };

        let local = date
            .and_hms_opt(parsed.time.hour24(), parsed.time.minute, 0)
            .ok_or(DateParseError::OutOfRange {
                hour: parsed.time.hour24(),
                minute: parsed.time.minute,
            })?;

        self.localize(local).map(|dt| dt.with_timezone(&Utc))
    }

    // Times inside a DST gap move forward an hour; ambiguous ones take the
    // first occurrence.
    fn localize(&self, local: NaiveDateTime) -> Result<DateTime<Tz>, DateParseError> {
        self.zone
            .from_local_datetime(&local)
            .earliest()
            .or_else(|| {
                self.zone
                    .from_local_datetime(&(local + Duration::hours(1)))
                    .earliest()
            })
            .ok_or(DateParseError::Unresolvable(local))
    }
}

fn days_until(from: NaiveDate, weekday: Weekday) -> i64 {
    let from = from.weekday().num_days_from_monday() as i64;
    let to = weekday.num_days_from_monday() as i64;
    (to - from).rem_euclid(7)
}

/// `2024-12-25T22:00:00.000Z`
pub fn to_iso(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Wednesday 2024-12-25 11:00 in Sydney (AEDT, +11)
    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 12, 25, 0, 0, 0).unwrap()
    }

    fn parser() -> ConversationalDateParser {
        ConversationalDateParser::new(chrono_tz::Australia::Sydney)
    }

    fn convert(phrase: &str) -> Result<String, DateParseError> {
        parser().parse_at(phrase, now()).map(to_iso)
    }

    #[test]
    fn tokenizes_relative_and_weekday_phrases() {
        assert_eq!(
            tokenize("Tomorrow at 9am").unwrap(),
            ParsedPhrase {
                day: DayReference::Tomorrow,
                time: ClockTime {
                    hour: 9,
                    minute: 0,
                    period: Some(Period::Am)
                },
            }
        );
        assert_eq!(
            tokenize("next Friday at 3:30pm").unwrap(),
            ParsedPhrase {
                day: DayReference::Weekday {
                    weekday: Weekday::Fri,
                    next_week: true
                },
                time: ClockTime {
                    hour: 3,
                    minute: 30,
                    period: Some(Period::Pm)
                },
            }
        );
        assert_eq!(
            tokenize("monday at 14:15").unwrap().time,
            ClockTime {
                hour: 14,
                minute: 15,
                period: None
            }
        );
    }

    #[test]
    fn tomorrow_at_nine() {
        assert_eq!(convert("tomorrow at 9am").unwrap(), "2024-12-25T22:00:00.000Z");
    }

    #[test]
    fn tomorrow_without_at_scans_whole_phrase() {
        assert_eq!(convert("tomorrow 9am").unwrap(), "2024-12-25T22:00:00.000Z");
    }

    #[test]
    fn twelve_oclock_periods() {
        assert_eq!(convert("tomorrow at 12am").unwrap(), "2024-12-25T13:00:00.000Z");
        assert_eq!(convert("tomorrow at 12pm").unwrap(), "2024-12-26T01:00:00.000Z");
    }

    #[test]
    fn plain_weekday_is_the_next_occurrence() {
        assert_eq!(convert("Friday at 3:30pm").unwrap(), "2024-12-27T04:30:00.000Z");
        assert_eq!(convert("friday at 9").unwrap(), "2024-12-26T22:00:00.000Z");
    }

    #[test]
    fn same_weekday_as_today_skips_to_next_week() {
        // today is Wednesday, so "wednesday" is 2025-01-01
        assert_eq!(convert("wednesday at 10am").unwrap(), "2024-12-31T23:00:00.000Z");
    }

    #[test]
    fn next_weekday_adds_a_week() {
        let plain = parser().parse_at("friday at 3:30pm", now()).unwrap();
        let next = parser().parse_at("next friday at 3:30pm", now()).unwrap();
        assert_eq!(next - plain, Duration::days(7));
        assert_eq!(to_iso(next), "2025-01-03T04:30:00.000Z");
    }

    #[test]
    fn failures_are_typed() {
        assert_eq!(convert("   "), Err(DateParseError::Empty));
        assert_eq!(
            convert("funday at 9am"),
            Err(DateParseError::UnknownWeekday("funday".to_string()))
        );
        assert_eq!(
            convert("fri at 9am"),
            Err(DateParseError::UnknownWeekday("fri".to_string()))
        );
        assert!(matches!(convert("friday at banana"), Err(DateParseError::MissingTime(_))));
        assert!(matches!(convert("next friday"), Err(DateParseError::MissingTime(_))));
        assert!(matches!(convert("next"), Err(DateParseError::UnknownWeekday(_))));
        assert_eq!(
            convert("friday at 13pm"),
            Err(DateParseError::OutOfRange { hour: 25, minute: 0 })
        );
        assert_eq!(
            convert("friday at 4294967295pm"),
            Err(DateParseError::OutOfRange {
                hour: u32::MAX,
                minute: 0
            })
        );
        assert!(matches!(
            convert("friday at 99999999999pm"),
            Err(DateParseError::MissingTime(_))
        ));
        assert_eq!(
            convert("friday at 9:75"),
            Err(DateParseError::OutOfRange { hour: 9, minute: 75 })
        );
    }

    #[test]
    fn dst_gap_moves_forward() {
        // Sydney skips 02:00-03:00 on Sunday 2024-10-06
        let now = Utc.with_ymd_and_hms(2024, 10, 3, 0, 0, 0).unwrap();
        let resolved = parser().parse_at("sunday at 2:30am", now).unwrap();
        assert_eq!(to_iso(resolved), "2024-10-05T16:30:00.000Z");
    }
}
