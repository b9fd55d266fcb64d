//! Structured logging facility for Basis
//!
//! - Single initialization point via `init(profile)`
//! - Lifecycle macros (`log_op_start!`, `log_op_end!`, `log_op_error!`)
//! - Test capture mode for deterministic assertions
//!
//! The kernel itself never logs: schemas and the version controller are
//! pure. Lifecycle events belong to the command boundary (`basis-engine`),
//! which wraps each kernel call in one start event and exactly one end or
//! end_error event.
//!
//! # Usage
//!
//! ```rust
//! use basis_core::logging_facility::{init, Profile};
//!
//! // Initialize once at application startup
//! init(Profile::Development);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
