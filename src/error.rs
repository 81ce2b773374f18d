use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("CALCOM_API_KEY is not set")]
    MissingToken,

    #[error("invalid slots endpoint: {0}")]
    Url(#[from] url::ParseError),

    #[error("request to slots API failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("slots API returned status {0:?}")]
    Unsuccessful(String),

    #[error("slots API response had no data")]
    MissingData,

    #[error("slot {date} has an unreadable time {time:?}")]
    MalformedSlot { date: String, time: String },
}

/// Reasons a slot's localized time string could not be read.
#[derive(Error, Debug, PartialEq)]
pub enum SlotTimeError {
    #[error("expected \"<date>, <time> <am|pm>\"")]
    Layout,

    #[error("invalid calendar date {0:?}")]
    Date(String),

    #[error("invalid clock time {0:?}")]
    Time(String),
}

#[derive(Error, Debug, PartialEq)]
pub enum DateParseError {
    #[error("phrase is empty")]
    Empty,

    #[error("phrase is not text")]
    NotText,

    #[error("unknown weekday {0:?}")]
    UnknownWeekday(String),

    #[error("no time found in {0:?}")]
    MissingTime(String),

    #[error("time {hour}:{minute:02} is out of range")]
    OutOfRange { hour: u32, minute: u32 },

    #[error("{0} does not exist in the source timezone")]
    Unresolvable(chrono::NaiveDateTime),
}

/// Outcome of a convert-date request that produced no timestamp.
#[derive(Error, Debug, PartialEq)]
pub enum ConvertError {
    #[error("no conversational date given")]
    Missing,

    #[error(transparent)]
    Invalid(#[from] DateParseError),
}
