//! SM-2 spaced repetition scheduler.
//!
//! Based on SuperMemo 2 with configurable parameters. A review moves an item
//! through its repetition streak:
//! - quality >= 3: the streak grows and intervals go 1 day, 3 days, then
//!   previous interval times ease factor
//! - quality < 3: the streak resets and the item comes back the next day
//!
//! The ease factor is clamped to `[minimum_ease, maximum_ease]` both when
//! read from the incoming item and after every transition. Intervals never
//! exceed `maximum_interval`.

use std::path::Path;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::types::{ReviewItem, DEFAULT_EASE_FACTOR};

/// SM-2 scheduler with configurable parameters.
///
/// Loadable from JSON with [`Sm2::from_path`]; missing fields keep their
/// defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sm2 {
    pub initial_ease: f64,
    pub minimum_ease: f64,
    pub maximum_ease: f64,
    /// Interval in days after the first correct recall.
    pub first_interval: u32,
    /// Interval in days after the second consecutive correct recall.
    pub second_interval: u32,
    /// Interval in days after a failed recall.
    pub lapse_interval: u32,
    /// Upper bound on any interval, in days.
    pub maximum_interval: u32,
    pub lapse_penalty: f64,
    /// Lowest quality counted as a correct recall.
    pub passing_quality: i32,
}

impl Default for Sm2 {
    fn default() -> Self {
        Self {
            initial_ease: DEFAULT_EASE_FACTOR,
            minimum_ease: 1.3,
            maximum_ease: 2.5,
            first_interval: 1,
            second_interval: 3,
            lapse_interval: 1,
            maximum_interval: 36500,
            lapse_penalty: 0.2,
            passing_quality: 3,
        }
    }
}

impl Sm2 {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let sm2: Self = serde_json::from_str(content)?;
        sm2.validate()?;
        Ok(sm2)
    }

    /// Check the ease bounds form a usable range and the penalty is sane.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("initial_ease", self.initial_ease),
            ("minimum_ease", self.minimum_ease),
            ("maximum_ease", self.maximum_ease),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::invalid(
                    name,
                    format!("{value} is not a finite positive number"),
                ));
            }
        }
        if self.minimum_ease > self.maximum_ease {
            return Err(ConfigError::invalid(
                "maximum_ease",
                format!(
                    "{} is below minimum_ease {}",
                    self.maximum_ease, self.minimum_ease
                ),
            ));
        }
        if !self.lapse_penalty.is_finite() || self.lapse_penalty < 0.0 {
            return Err(ConfigError::invalid(
                "lapse_penalty",
                format!("{} is not a finite non-negative number", self.lapse_penalty),
            ));
        }
        if self.maximum_interval == 0 {
            return Err(ConfigError::invalid("maximum_interval", "must be at least 1 day"));
        }
        Ok(())
    }

    /// Item state before its first review.
    pub fn initial_item(&self, item_id: impl Into<String>) -> ReviewItem {
        ReviewItem {
            ease_factor: self.initial_ease,
            ..ReviewItem::new(item_id)
        }
    }

    /// Compute the item's state after a review of the given quality at `now`.
    ///
    /// Total over every `quality`; values outside 0..=5 only push the ease
    /// factor to one of its bounds.
    pub fn compute_next_review(
        &self,
        item: &ReviewItem,
        quality: i32,
        now: DateTime<Utc>,
    ) -> ReviewItem {
        let (interval, ease, repetitions) = if quality >= self.passing_quality {
            self.schedule_recall(item, quality)
        } else {
            self.schedule_lapse(item)
        };
        let ease = ease.clamp(self.minimum_ease, self.maximum_ease);
        let interval = interval.min(self.maximum_interval);
        let next_review_date = now
            .checked_add_signed(Duration::days(i64::from(interval)))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        tracing::debug!(
            item_id = %item.item_id,
            quality,
            interval,
            ease,
            repetitions,
            "scheduled review"
        );

        ReviewItem {
            item_id: item.item_id.clone(),
            interval,
            ease_factor: ease,
            repetitions,
            next_review_date: Some(next_review_date),
            last_review_date: Some(now),
        }
    }

    /// Prior ease, brought back into range. Non-finite values restart at
    /// `initial_ease`.
    fn prior_ease(&self, item: &ReviewItem) -> f64 {
        let ease = if item.ease_factor.is_finite() {
            item.ease_factor
        } else {
            self.initial_ease
        };
        ease.clamp(self.minimum_ease, self.maximum_ease)
    }

    fn schedule_recall(&self, item: &ReviewItem, quality: i32) -> (u32, f64, u32) {
        let prior_ease = self.prior_ease(item);
        let repetitions = item.repetitions.saturating_add(1);
        // Uses the prior ease, not the one computed below.
        let interval = match repetitions {
            1 => self.first_interval,
            2 => self.second_interval,
            _ => (f64::from(item.interval) * prior_ease)
                .round()
                .min(f64::from(self.maximum_interval)) as u32,
        };

        let miss = 5.0 - f64::from(quality);
        let ease_adj = 0.1 - miss * (0.08 + miss * 0.02);
        let ease = (prior_ease + ease_adj).max(self.minimum_ease);
        (interval, ease, repetitions)
    }

    fn schedule_lapse(&self, item: &ReviewItem) -> (u32, f64, u32) {
        let ease = (self.prior_ease(item) - self.lapse_penalty).max(self.minimum_ease);
        (self.lapse_interval, ease, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 10, 9, 30, 0).unwrap()
    }

    fn item(interval: u32, ease_factor: f64, repetitions: u32) -> ReviewItem {
        ReviewItem {
            interval,
            ease_factor,
            repetitions,
            ..ReviewItem::new("item")
        }
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn first_recall_schedules_one_day() {
        let next = Sm2::default().compute_next_review(&item(0, 2.5, 0), 5, now());
        assert_eq!(next.interval, 1);
        assert_eq!(next.repetitions, 1);
        // 2.6 clamped back to the maximum
        assert_eq!(next.ease_factor, 2.5);
    }

    #[test]
    fn second_recall_schedules_three_days() {
        let next = Sm2::default().compute_next_review(&item(1, 2.5, 1), 5, now());
        assert_eq!(next.interval, 3);
        assert_eq!(next.repetitions, 2);
    }

    #[test]
    fn third_recall_multiplies_by_ease() {
        // round(3 * 2.5) = round(7.5) = 8
        let next = Sm2::default().compute_next_review(&item(3, 2.5, 2), 5, now());
        assert_eq!(next.interval, 8);
        assert_eq!(next.repetitions, 3);
    }

    #[test]
    fn lapse_resets_streak() {
        let next = Sm2::default().compute_next_review(&item(8, 2.5, 3), 1, now());
        assert_eq!(next.interval, 1);
        assert_eq!(next.repetitions, 0);
        assert!(approx(next.ease_factor, 2.3));
    }

    #[test]
    fn interval_uses_prior_ease() {
        // Quality 3 lowers ease to 2.36, but the interval still uses 2.5.
        let next = Sm2::default().compute_next_review(&item(10, 2.5, 4), 3, now());
        assert_eq!(next.interval, 25);
        assert!(approx(next.ease_factor, 2.36));
    }

    #[test]
    fn quality_four_is_neutral() {
        let next = Sm2::default().compute_next_review(&item(10, 2.0, 4), 4, now());
        assert!(approx(next.ease_factor, 2.0));
    }

    #[test]
    fn ease_never_below_minimum() {
        let sm2 = Sm2::default();
        let next = sm2.compute_next_review(&item(10, 1.4, 3), 0, now());
        assert_eq!(next.ease_factor, sm2.minimum_ease);
        let next = sm2.compute_next_review(&item(10, 1.3, 3), 3, now());
        assert_eq!(next.ease_factor, sm2.minimum_ease);
    }

    #[test]
    fn ease_bounded_for_any_quality() {
        let sm2 = Sm2::default();
        for quality in [-100, -1, 0, 1, 2, 3, 4, 5, 6, 50, i32::MAX / 2] {
            for ease in [1.3, 1.9, 2.5, 4.0] {
                let next = sm2.compute_next_review(&item(6, ease, 2), quality, now());
                assert!(
                    (1.3..=2.5).contains(&next.ease_factor),
                    "quality {quality}, ease {ease} -> {}",
                    next.ease_factor
                );
            }
        }
    }

    #[test]
    fn failure_resets_regardless_of_state() {
        let sm2 = Sm2::default();
        for state in [item(0, 2.5, 0), item(40, 1.3, 9), item(3, 2.1, 2)] {
            for quality in [0, 1, 2] {
                let next = sm2.compute_next_review(&state, quality, now());
                assert_eq!(next.repetitions, 0);
                assert_eq!(next.interval, 1);
            }
        }
    }

    #[test]
    fn success_streak_is_non_decreasing() {
        let sm2 = Sm2::default();
        let mut current = sm2.initial_item("streak");
        let mut intervals = Vec::new();
        for _ in 0..6 {
            current = sm2.compute_next_review(&current, 5, now());
            intervals.push(current.interval);
        }
        assert_eq!(intervals, vec![1, 3, 8, 20, 50, 125]);
    }

    #[test]
    fn dates_follow_interval() {
        let next = Sm2::default().compute_next_review(&item(3, 2.5, 2), 4, now());
        assert_eq!(next.last_review_date, Some(now()));
        assert_eq!(next.next_review_date, Some(now() + Duration::days(8)));
    }

    #[test]
    fn input_is_not_mutated() {
        let before = item(3, 2.5, 2);
        let copy = before.clone();
        let _ = Sm2::default().compute_next_review(&before, 5, now());
        assert_eq!(before, copy);
    }

    #[test]
    fn custom_parameters_apply() {
        let sm2 = Sm2 {
            second_interval: 6,
            maximum_ease: 3.0,
            ..Sm2::default()
        };
        let next = sm2.compute_next_review(&item(1, 2.5, 1), 5, now());
        assert_eq!(next.interval, 6);
        assert!(approx(next.ease_factor, 2.6));
    }

    #[test]
    fn long_streak_caps_interval() {
        let sm2 = Sm2::default();
        let mut current = sm2.initial_item("streak");
        for _ in 0..100 {
            current = sm2.compute_next_review(&current, 5, now());
        }
        assert_eq!(current.interval, sm2.maximum_interval);
        assert_eq!(current.repetitions, 100);
        assert_eq!(
            current.next_review_date,
            Some(now() + Duration::days(i64::from(sm2.maximum_interval)))
        );
    }

    #[test]
    fn huge_prior_interval_is_capped() {
        let sm2 = Sm2::default();
        for interval in [40_000_000, u32::MAX] {
            let next = sm2.compute_next_review(&item(interval, 2.5, 2), 5, now());
            assert_eq!(next.interval, 36500);
            assert_eq!(next.next_review_date, Some(now() + Duration::days(36500)));
        }
    }

    #[test]
    fn due_date_saturates_past_calendar_end() {
        let sm2 = Sm2 {
            maximum_interval: u32::MAX,
            ..Sm2::default()
        };
        let next = sm2.compute_next_review(&item(u32::MAX, 2.5, 2), 5, now());
        assert_eq!(next.interval, u32::MAX);
        assert_eq!(next.next_review_date, Some(DateTime::<Utc>::MAX_UTC));
    }

    #[test]
    fn out_of_range_prior_ease_is_clamped() {
        let sm2 = Sm2::default();
        // Treated as 1.3: round(10 * 1.3) = 13
        let next = sm2.compute_next_review(&item(10, -1.0, 3), 5, now());
        assert_eq!(next.interval, 13);
        assert!(approx(next.ease_factor, 1.4));
        assert!(next.next_review_date > Some(now()));

        // Treated as 2.5: round(10 * 2.5) = 25
        let next = sm2.compute_next_review(&item(10, 9.0, 3), 5, now());
        assert_eq!(next.interval, 25);
        assert_eq!(next.ease_factor, 2.5);

        let next = sm2.compute_next_review(&item(10, 9.0, 3), 1, now());
        assert!(approx(next.ease_factor, 2.3));
    }

    #[test]
    fn non_finite_prior_ease_restarts() {
        let sm2 = Sm2::default();
        for ease in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let next = sm2.compute_next_review(&item(10, ease, 3), 4, now());
            assert_eq!(next.interval, 25);
            assert!(approx(next.ease_factor, 2.5));
        }
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let sm2: Sm2 = serde_json::from_str(r#"{"second_interval": 6}"#).unwrap();
        assert_eq!(sm2.second_interval, 6);
        assert_eq!(sm2.minimum_ease, 1.3);
    }

    #[test]
    fn from_json_validates() {
        let sm2 = Sm2::from_json(r#"{"maximum_interval": 365}"#).unwrap();
        assert_eq!(sm2.maximum_interval, 365);

        for bad in [
            r#"{"minimum_ease": 3.0}"#,
            r#"{"maximum_ease": -1.0}"#,
            r#"{"lapse_penalty": -0.2}"#,
            r#"{"maximum_interval": 0}"#,
        ] {
            let result = Sm2::from_json(bad);
            assert!(
                matches!(result, Err(ConfigError::InvalidParameter { .. })),
                "{bad} -> {result:?}"
            );
        }
        assert!(matches!(Sm2::from_json("{"), Err(ConfigError::Json(_))));
    }

    #[test]
    fn default_is_valid() {
        assert!(Sm2::default().validate().is_ok());
    }
}
