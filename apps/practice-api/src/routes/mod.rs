//! HTTP handlers

pub mod answers;
pub mod practice;
pub mod reviews;
