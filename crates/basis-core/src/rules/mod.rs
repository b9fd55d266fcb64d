//! Field-level rules of the base entity contract
//!
//! Each rule inspects one field (or the cross-field ordering) and reports a
//! [`Defect`](crate::errors::Defect) instead of stopping, so a schema can run
//! all of them and report every problem at once.

pub mod validation;
