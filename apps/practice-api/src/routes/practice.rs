//! Practice attempt endpoint: grade, score, schedule.

use axum::{extract::State, Json};
use latex_drill_core::check_answer;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::AppState;

/// POST /api/practice/submit
pub async fn submit(
    State(state): State<AppState>,
    Json(payload): Json<SubmitPracticeRequest>,
) -> Result<Json<SubmitPracticeResponse>> {
    // First attempt at a prompt creates its state implicitly
    let current = match payload.item {
        Some(item) if item.item_id != payload.item_id => {
            return Err(ApiError::BadRequest(format!(
                "item {} does not match itemId {}",
                item.item_id, payload.item_id
            )));
        }
        Some(item) => item,
        None => state.scheduler.initial_item(payload.item_id),
    };

    let check = check_answer(&payload.user_answer, &payload.target_answer, &state.table);
    let quality = state.quality.score(
        check.is_correct,
        payload.hints_used,
        payload.time_spent_seconds,
    );

    // Incorrect attempts schedule too: quality 0 resets the streak.
    let item = state
        .scheduler
        .compute_next_review(&current, quality.into(), state.clock.now());

    tracing::info!(
        item_id = %item.item_id,
        correct = check.is_correct,
        quality = quality.value(),
        interval = item.interval,
        "Practice attempt graded"
    );

    Ok(Json(SubmitPracticeResponse {
        check,
        quality,
        item,
    }))
}
