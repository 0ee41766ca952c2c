//! API request and response types

use serde::{Deserialize, Serialize};

// Re-export shared types from latex-drill-core
pub use latex_drill_core::{AnswerCheck, DueItem, QualityScore, Recommendation, ReviewItem};

/// POST /api/answers/check
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckAnswerRequest {
    pub user_answer: String,
    pub target_answer: String,
}

/// POST /api/reviews/schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleReviewRequest {
    pub item: ReviewItem,
    /// Validated against 0..=5 before scheduling.
    pub quality: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleReviewResponse {
    pub item: ReviewItem,
}

/// POST /api/reviews/queue
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewQueueRequest {
    pub items: Vec<ReviewItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewQueueResponse {
    pub recommendation: Recommendation,
    pub due: Vec<DueItem>,
}

/// POST /api/practice/submit
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitPracticeRequest {
    pub item_id: String,
    /// Current state; omitted on the first attempt at a prompt.
    #[serde(default)]
    pub item: Option<ReviewItem>,
    pub user_answer: String,
    pub target_answer: String,
    #[serde(default)]
    pub hints_used: u32,
    #[serde(default)]
    pub time_spent_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitPracticeResponse {
    pub check: AnswerCheck,
    pub quality: QualityScore,
    pub item: ReviewItem,
}
