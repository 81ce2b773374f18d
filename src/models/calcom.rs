use serde::Deserialize;
use std::collections::BTreeMap;

// GET /slots/available
#[derive(Deserialize, Debug)]
pub struct SlotsResponse {
    pub status: String,
    pub data: Option<SlotsData>,
}

#[derive(Deserialize, Debug)]
pub struct SlotsData {
    /// Keyed by ISO date, so iteration order is chronological.
    #[serde(default)]
    pub slots: BTreeMap<String, Vec<SlotTime>>,
}

#[derive(Deserialize, Debug)]
pub struct SlotTime {
    pub time: String,
}
