//! Test fixtures and factory functions for creating request bodies.

use chrono::{DateTime, Duration, Utc};
use serde_json::{json, Value};

use latex_drill_core::ReviewItem;

use super::now;

/// Review item with the given scheduling state and no dates.
pub fn review_item(item_id: &str, interval: u32, ease_factor: f64, repetitions: u32) -> ReviewItem {
    ReviewItem {
        interval,
        ease_factor,
        repetitions,
        ..ReviewItem::new(item_id)
    }
}

/// Review item due at the given offset from the test clock (negative is overdue).
pub fn item_due_in(item_id: &str, offset: Duration) -> ReviewItem {
    let due: DateTime<Utc> = now() + offset;
    ReviewItem {
        interval: 3,
        repetitions: 2,
        last_review_date: Some(due - Duration::days(3)),
        next_review_date: Some(due),
        ..ReviewItem::new(item_id)
    }
}

/// Body for POST /api/practice/submit.
pub fn submit_request(
    item_id: &str,
    item: Option<&ReviewItem>,
    user_answer: &str,
    target_answer: &str,
    hints_used: u32,
    time_spent_seconds: u64,
) -> Value {
    json!({
        "itemId": item_id,
        "item": item,
        "userAnswer": user_answer,
        "targetAnswer": target_answer,
        "hintsUsed": hints_used,
        "timeSpentSeconds": time_spent_seconds,
    })
}
