//! Answer grading endpoints

use axum::{extract::State, Json};
use latex_drill_core::check_answer;

use crate::models::*;
use crate::AppState;

/// POST /api/answers/check
pub async fn check(
    State(state): State<AppState>,
    Json(payload): Json<CheckAnswerRequest>,
) -> Json<AnswerCheck> {
    Json(check_answer(
        &payload.user_answer,
        &payload.target_answer,
        &state.table,
    ))
}
