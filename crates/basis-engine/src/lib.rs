//! Basis Engine - Command layer
//!
//! Provides boundary commands that run the pure kernel in `basis-core` over
//! raw JSON values and own the lifecycle logging around each call.

pub mod commands;
