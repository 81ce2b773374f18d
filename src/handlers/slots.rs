use crate::error::FetchError;
use crate::models::slot::{Slot, Suggestion};
use crate::scheduling::fetcher::SlotSource;
use crate::state::SchedulerState;

/// Next round of suggestions, or `None` once every bucket is exhausted.
pub fn suggest(state: &SchedulerState) -> Option<Vec<Suggestion>> {
    let suggestions = state.next_suggestions();
    if suggestions.is_empty() {
        tracing::info!("No suggestions left at cursor {}", state.snapshot().cursor);
        None
    } else {
        Some(suggestions)
    }
}

pub fn reset(state: &SchedulerState) {
    state.reset();
    tracing::info!("Suggestion cursor reset");
}

/// Fetches straight from `source`, leaving the suggestion buckets untouched.
pub async fn live_slots<S: SlotSource>(source: &S) -> Result<Vec<Slot>, FetchError> {
    let slots = source.fetch_available_slots().await.map_err(|e| {
        tracing::error!("Live slot fetch failed: {}", e);
        e
    })?;
    tracing::info!("Serving {} live slots", slots.len());
    Ok(slots)
}
