use chrono::{DateTime, Duration, SecondsFormat, Utc};
use chrono_tz::Tz;
use reqwest::Client;
use std::future::Future;
use tracing::{error, info};
use url::Url;

use crate::config::Config;
use crate::error::FetchError;
use crate::models::calcom::{SlotsData, SlotsResponse};
use crate::models::slot::Slot;
use crate::scheduling::constants::SLOT_TIME_FORMAT;

/// Anything that can produce the currently open slots.
pub trait SlotSource {
    fn fetch_available_slots(&self) -> impl Future<Output = Result<Vec<Slot>, FetchError>> + Send;
}

pub struct CalComClient {
    http: Client,
    api_url: String,
    api_key: Option<String>,
    event_type_id: u64,
    event_type_slug: String,
    duration_minutes: u32,
    window_days: i64,
    slot_zone: Tz,
}

impl CalComClient {
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(CalComClient {
            http: builder.build()?,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            event_type_id: config.event_type_id,
            event_type_slug: config.event_type_slug.clone(),
            duration_minutes: config.duration_minutes,
            window_days: config.window_days,
            slot_zone: config.slot_zone,
        })
    }

    /// Query URL for the window starting at `start`.
    pub fn slots_url(&self, start: DateTime<Utc>) -> Result<Url, FetchError> {
        let end = start + Duration::days(self.window_days);
        let url = Url::parse_with_params(
            &format!("{}/slots/available", self.api_url),
            &[
                ("startTime", start.to_rfc3339_opts(SecondsFormat::Millis, true)),
                ("endTime", end.to_rfc3339_opts(SecondsFormat::Millis, true)),
                ("eventTypeId", self.event_type_id.to_string()),
                ("eventTypeSlug", self.event_type_slug.clone()),
                ("duration", self.duration_minutes.to_string()),
            ],
        )?;
        Ok(url)
    }

    async fn fetch(&self) -> Result<Vec<Slot>, FetchError> {
        let token = self.api_key.as_deref().ok_or(FetchError::MissingToken)?;
        let url = self.slots_url(Utc::now())?;

        let response: SlotsResponse = self
            .http
            .get(url)
            .bearer_auth(token)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .send()
            .await?
            .json()
            .await?;

        if response.status != "success" {
            return Err(FetchError::Unsuccessful(response.status));
        }
        let data = response.data.ok_or(FetchError::MissingData)?;
        localize_slots(data, self.slot_zone)
    }
}

impl SlotSource for CalComClient {
    async fn fetch_available_slots(&self) -> Result<Vec<Slot>, FetchError> {
        match self.fetch().await {
            Ok(slots) => {
                info!("Fetched {} available slots", slots.len());
                Ok(slots)
            }
            Err(e) => {
                error!("Error fetching slots: {}", e);
                Err(e)
            }
        }
    }
}

/// Flattens the per-day slot map into [`Slot`]s rendered in `zone`.
pub fn localize_slots(data: SlotsData, zone: Tz) -> Result<Vec<Slot>, FetchError> {
    let mut slots = Vec::new();
    for (date, times) in data.slots {
        for entry in times {
            let instant = DateTime::parse_from_rfc3339(&entry.time).map_err(|_| {
                FetchError::MalformedSlot {
                    date: date.clone(),
                    time: entry.time.clone(),
                }
            })?;
            slots.push(Slot {
                date: date.clone(),
                time: instant.with_timezone(&zone).format(SLOT_TIME_FORMAT).to_string(),
            });
        }
    }
    Ok(slots)
}
