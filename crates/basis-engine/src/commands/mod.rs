//! Command orchestration layer.
//!
//! Provides boundary command functions that wrap kernel validation and
//! version control with lifecycle logging and request correlation.

pub mod engine_command;
pub mod entity;
