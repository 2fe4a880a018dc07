//! Rule-driven priority classification of housemaid records, with the reports and
//! statistics built on top of it.

pub mod breakdown;
mod classifier;
mod counters;
pub mod domain;
pub mod nationality;
pub mod report;
mod rules;
pub mod stats;
pub mod taxonomy;

#[cfg(test)]
mod tests;

pub use breakdown::{ApprovalBreakdown, ApprovalCounts, BreakdownCategory};
pub use classifier::{classify, PriorityClassifier};
pub use counters::{PriorityCounters, PriorityThresholds};
pub use domain::{DocsStatus, Gender, RequestId, WorkerRecord, WorkerType};
pub use report::{Population, PriorityReport, ReportKind, ReportSheet, ReportStatistics};
pub use stats::{GenderCounts, PriorityStatistics};
pub use taxonomy::{GatedCategory, PriorityNames, CATCH_ALL_PRIORITY, DEFAULT_MV_URGENCY_DAYS};
