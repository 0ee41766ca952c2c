//! Due checks and review queue ordering.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Recommendation, ReviewItem};

/// Priority of an item that has never been reviewed.
pub const MAX_PRIORITY: u8 = 100;

/// Whether an item with this next review date is due at `now`.
pub fn needs_review(next_review_date: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    match next_review_date {
        Some(next) => now >= next,
        None => true,
    }
}

/// Rank a due item in `0..=100`, higher first.
///
/// Never-reviewed items score 100, items not yet due score 0, and overdue
/// items score 10 per full day overdue. An item due for less than a day
/// scores 0 even though it is due.
pub fn review_priority(next_review_date: Option<DateTime<Utc>>, now: DateTime<Utc>) -> u8 {
    let Some(next) = next_review_date else {
        return MAX_PRIORITY;
    };
    if now < next {
        return 0;
    }
    let overdue_days = (now - next).num_days();
    overdue_days
        .saturating_mul(10)
        .min(i64::from(MAX_PRIORITY)) as u8
}

/// Review if anything is due, otherwise learn new material.
pub fn recommend(items: &[ReviewItem], now: DateTime<Utc>) -> Recommendation {
    if items
        .iter()
        .any(|item| needs_review(item.next_review_date, now))
    {
        Recommendation::Review
    } else {
        Recommendation::Learn
    }
}

/// A due item with its queue priority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DueItem {
    pub item_id: String,
    pub priority: u8,
    pub next_review_date: Option<DateTime<Utc>>,
}

/// Due items, most urgent first.
///
/// Ordered by priority, then earliest due date, then item id so the queue is
/// stable across calls.
pub fn due_queue(items: &[ReviewItem], now: DateTime<Utc>) -> Vec<DueItem> {
    let mut due: Vec<DueItem> = items
        .iter()
        .filter(|item| needs_review(item.next_review_date, now))
        .map(|item| DueItem {
            item_id: item.item_id.clone(),
            priority: review_priority(item.next_review_date, now),
            next_review_date: item.next_review_date,
        })
        .collect();

    // None sorts before Some, so never-reviewed items lead within a priority.
    due.sort_by(|a, b| {
        b.priority
            .cmp(&a.priority)
            .then(a.next_review_date.cmp(&b.next_review_date))
            .then_with(|| a.item_id.cmp(&b.item_id))
    });
    due
}
