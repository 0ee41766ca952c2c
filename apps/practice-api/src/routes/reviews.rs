//! Review scheduling endpoints

use axum::{extract::State, Json};
use latex_drill_core::{due_queue, recommend};

use crate::error::Result;
use crate::models::*;
use crate::AppState;

/// POST /api/reviews/schedule
pub async fn schedule(
    State(state): State<AppState>,
    Json(payload): Json<ScheduleReviewRequest>,
) -> Result<Json<ScheduleReviewResponse>> {
    let quality = QualityScore::try_from(payload.quality)?;
    let item = state
        .scheduler
        .compute_next_review(&payload.item, quality.into(), state.clock.now());

    Ok(Json(ScheduleReviewResponse { item }))
}

/// POST /api/reviews/queue
pub async fn queue(
    State(state): State<AppState>,
    Json(payload): Json<ReviewQueueRequest>,
) -> Json<ReviewQueueResponse> {
    let now = state.clock.now();

    Json(ReviewQueueResponse {
        recommendation: recommend(&payload.items, now),
        due: due_queue(&payload.items, now),
    })
}
