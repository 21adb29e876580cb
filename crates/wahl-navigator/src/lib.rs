//! Party matching for political survey answers.
//!
//! The [`survey`] module holds the position store, the scoring engine and the question filter
//! evaluator. [`config`], [`telemetry`] and [`error`] carry the service plumbing shared with the
//! HTTP API binary.

pub mod config;
pub mod error;
pub mod survey;
pub mod telemetry;
