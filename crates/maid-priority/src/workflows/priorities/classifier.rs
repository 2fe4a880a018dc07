use tracing::debug;

use super::counters::{PriorityCounters, PriorityThresholds};
use super::domain::WorkerRecord;
use super::rules::{rule_table, RuleContext};
use super::taxonomy::{PriorityNames, CATCH_ALL_PRIORITY, DEFAULT_MV_URGENCY_DAYS};

/// Priorities matched by one record, one bit per priority number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct MatchSet(u32);

impl MatchSet {
    fn insert(&mut self, priority: u8) {
        self.0 |= 1 << priority;
    }

    fn min(self) -> Option<u8> {
        (self.0 != 0).then(|| self.0.trailing_zeros() as u8)
    }
}

/// Assign the lowest matching priority number to `record`.
///
/// Every rule is evaluated. A gated rule whose predicate holds consumes a slot from
/// `counters` even when a lower-numbered rule also matched, so quota is spent at
/// evaluation time and not at selection time.
pub fn classify(
    record: &WorkerRecord,
    counters: &mut PriorityCounters,
    thresholds: &PriorityThresholds,
    mv_urgency_days: u32,
) -> u8 {
    let ctx = RuleContext { mv_urgency_days };
    let mut matched = MatchSet::default();

    for rule in rule_table() {
        if !(rule.matches)(record, &ctx) {
            continue;
        }
        let admitted = match rule.gate {
            Some(category) => counters.try_admit(category, thresholds),
            None => true,
        };
        if admitted {
            matched.insert(rule.priority);
        }
    }

    matched.min().unwrap_or(CATCH_ALL_PRIORITY)
}

/// Batch classifier holding the thresholds, urgency window, and initial counter state.
#[derive(Debug, Clone)]
pub struct PriorityClassifier {
    thresholds: PriorityThresholds,
    initial: PriorityCounters,
    mv_urgency_days: u32,
    names: PriorityNames,
}

impl Default for PriorityClassifier {
    fn default() -> Self {
        Self::new(PriorityThresholds::default(), DEFAULT_MV_URGENCY_DAYS)
    }
}

impl PriorityClassifier {
    pub fn new(thresholds: PriorityThresholds, mv_urgency_days: u32) -> Self {
        Self {
            thresholds,
            initial: PriorityCounters::new(),
            mv_urgency_days,
            names: PriorityNames::new(mv_urgency_days),
        }
    }

    pub fn with_initial_counters(mut self, initial: PriorityCounters) -> Self {
        self.initial = initial;
        self
    }

    pub fn names(&self) -> &PriorityNames {
        &self.names
    }

    pub fn thresholds(&self) -> &PriorityThresholds {
        &self.thresholds
    }

    pub fn mv_urgency_days(&self) -> u32 {
        self.mv_urgency_days
    }

    /// Classify one pass in input order and stamp number and name on each record.
    ///
    /// Each call starts from a fresh copy of the initial counters; the counters
    /// reached at the end of the pass are returned for reporting.
    pub fn classify_batch(&self, records: &mut [WorkerRecord]) -> PriorityCounters {
        let mut counters = self.initial.clone();

        for record in records.iter_mut() {
            let priority = classify(
                record,
                &mut counters,
                &self.thresholds,
                self.mv_urgency_days,
            );
            debug!(request_id = %record.request_id, priority, "classified record");
            record.priority_number = Some(u32::from(priority));
            record.priority_name = self.names.get(priority).map(str::to_string);
        }

        counters
    }
}
