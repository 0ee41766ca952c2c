//! Core library for LaTeX practice drills.
//!
//! Provides:
//! - SM-2 spaced repetition scheduling for practice items
//! - Due checks, review priorities and queue recommendation
//! - Quality scores derived from practice attempts
//! - LaTeX answer grading against a curated equivalence table
//!
//! Everything here is pure computation; the current time is passed in by the
//! caller or taken from a [`Clock`].

pub mod clock;
pub mod equivalence;
pub mod error;
pub mod quality;
pub mod review;
pub mod scheduler;
pub mod types;

pub use clock::{Clock, FixedClock, SystemClock};
pub use equivalence::{
    check_answer, is_equivalent, normalize, AnswerCheck, EquivalenceGroup, EquivalenceTable,
    MatchKind,
};
pub use error::{ConfigError, QualityOutOfRange, Result};
pub use quality::QualityPolicy;
pub use review::{due_queue, needs_review, recommend, review_priority, DueItem};
pub use scheduler::Sm2;
pub use types::{QualityScore, Recommendation, ReviewItem, DEFAULT_EASE_FACTOR};
