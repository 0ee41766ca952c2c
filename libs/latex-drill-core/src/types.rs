//! Core types shared by the scheduler, the review queue and the service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::QualityOutOfRange;

/// Ease factor given to items that have never been scheduled.
pub const DEFAULT_EASE_FACTOR: f64 = 2.5;

/// Spaced-repetition state for one practice prompt.
///
/// Serialized in camelCase to match the records kept by the browser client.
/// Missing or `null` scheduling fields fall back to a never-reviewed state, so
/// a first-time item can be scheduled without a separate initialization call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewItem {
    pub item_id: String,
    /// Days until the next review.
    #[serde(default, deserialize_with = "null_as_default")]
    pub interval: u32,
    #[serde(default = "default_ease", deserialize_with = "null_as_default_ease")]
    pub ease_factor: f64,
    /// Consecutive correct recalls.
    #[serde(default, deserialize_with = "null_as_default")]
    pub repetitions: u32,
    /// `None` means never reviewed, due immediately.
    #[serde(default)]
    pub next_review_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_review_date: Option<DateTime<Utc>>,
}

impl ReviewItem {
    /// A never-reviewed item.
    pub fn new(item_id: impl Into<String>) -> Self {
        Self {
            item_id: item_id.into(),
            interval: 0,
            ease_factor: DEFAULT_EASE_FACTOR,
            repetitions: 0,
            next_review_date: None,
            last_review_date: None,
        }
    }
}

fn default_ease() -> f64 {
    DEFAULT_EASE_FACTOR
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_default_ease<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(DEFAULT_EASE_FACTOR))
}

/// Recall quality of one attempt on the 0-5 scale.
///
/// Scores of 3 and above count as a correct recall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct QualityScore(u8);

impl QualityScore {
    pub const MIN: Self = Self(0);
    pub const MAX: Self = Self(5);

    /// Create from a 0-5 value.
    pub fn new(value: u8) -> Option<Self> {
        (value <= Self::MAX.0).then_some(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn is_passing(self) -> bool {
        self.0 >= 3
    }
}

impl TryFrom<i32> for QualityScore {
    type Error = QualityOutOfRange;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .ok()
            .and_then(Self::new)
            .ok_or(QualityOutOfRange(value))
    }
}

impl From<QualityScore> for i32 {
    fn from(score: QualityScore) -> Self {
        i32::from(score.0)
    }
}

/// What the application should present next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    /// At least one item is due.
    Review,
    /// Nothing is due; introduce new material.
    Learn,
}
