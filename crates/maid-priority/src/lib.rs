//! Priority classification, round-robin distribution, and ledger merging for
//! housemaid visa processing.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
