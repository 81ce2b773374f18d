use serde::{Deserialize, Serialize};

use crate::models::slot::Suggestion;

pub const SUCCESS: &str = "success";
pub const ERROR: &str = "error";

#[derive(Serialize)]
pub struct SuggestionsResponse {
    pub status: &'static str,
    pub slots: Vec<Suggestion>,
}

#[derive(Serialize, Debug)]
pub struct MessageResponse {
    pub status: String,
    pub message: String,
}

impl MessageResponse {
    pub fn success(message: &str) -> Self {
        Self {
            status: SUCCESS.to_string(),
            message: message.to_string(),
        }
    }

    pub fn error(message: &str) -> Self {
        Self {
            status: ERROR.to_string(),
            message: message.to_string(),
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct ConvertDateRequest {
    /// Any JSON value; only non-empty strings are phrases.
    #[serde(rename = "conversationalDate", default)]
    pub conversational_date: Option<serde_json::Value>,
}

#[derive(Serialize)]
pub struct ConvertDateResponse {
    pub status: &'static str,
    #[serde(rename = "isoDate")]
    pub iso_date: String,
}

#[derive(Serialize)]
pub struct FetchErrorResponse {
    pub error: &'static str,
}

#[derive(Serialize)]
pub struct ReadinessResponse {
    pub status: &'static str,
    pub readiness: crate::state::Readiness,
    pub morning: usize,
    pub midday: usize,
    pub afternoon: usize,
    pub cursor: usize,
}
