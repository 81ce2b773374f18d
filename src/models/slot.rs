use serde::{Deserialize, Serialize};

/// A bookable time returned by the scheduling API.
///
/// `date` is the upstream day key (`2024-12-25`), `time` the slot start
/// rendered in the slot timezone, e.g. `25/12/2024, 9:00 am`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Slot {
    pub date: String,
    pub time: String,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Suggestion {
    #[serde(flatten)]
    pub slot: Slot,
    #[serde(rename = "formattedTime")]
    pub formatted_time: String,
}
