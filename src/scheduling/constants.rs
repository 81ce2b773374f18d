// Cal.com v2 defaults
pub const DEFAULT_API_URL: &str = "https://api.cal.com/v2";
pub const DEFAULT_EVENT_TYPE_ID: u64 = 1408517;
pub const DEFAULT_EVENT_TYPE_SLUG: &str = "callbackevent";
pub const DEFAULT_DURATION_MINUTES: u32 = 30;
pub const DEFAULT_WINDOW_DAYS: i64 = 7;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 80;

// Slot time strings, e.g. "25/12/2024, 9:00 am"
pub const SLOT_TIME_FORMAT: &str = "%d/%m/%Y, %-I:%M %P";
// Suggestion annotation, e.g. "Friday 9:00 am"
pub const SUGGESTION_FORMAT: &str = "%A %-I:%M %P";
pub const INVALID_DATE: &str = "Invalid Date";

// Hour-of-day bucket bounds, half open
pub const MORNING_HOURS: std::ops::Range<u32> = 6..12;
pub const MIDDAY_HOURS: std::ops::Range<u32> = 12..17;
pub const AFTERNOON_HOURS: std::ops::Range<u32> = 17..22;

pub const NO_MORE_SLOTS: &str = "No more available slots.";
pub const SLOTS_RESET: &str = "Slot suggestions have been reset.";
pub const DATE_REQUIRED: &str = "Conversational date is required.";
pub const DATE_INVALID: &str = "Invalid conversational date format.";
pub const FETCH_FAILED: &str = "Error fetching available slots";
