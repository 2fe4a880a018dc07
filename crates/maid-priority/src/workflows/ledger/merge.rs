use serde::Serialize;
use tracing::{debug, info};

use super::{CompanionIndex, Ledger, LedgerSide};
use crate::workflows::priorities::WorkerRecord;

pub const DEFAULT_MERGE_PRIORITY_NUMBER: u32 = 24;
pub const DEFAULT_MERGE_PRIORITY_NAME: &str = "new";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOptions {
    pub priority_number: u32,
    pub priority_name: String,
    /// Zero keeps every row.
    pub max_rows: usize,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            priority_number: DEFAULT_MERGE_PRIORITY_NUMBER,
            priority_name: DEFAULT_MERGE_PRIORITY_NAME.to_string(),
            max_rows: crate::config::LedgerSettings::DEFAULT_MAX_ROWS,
        }
    }
}

impl MergeOptions {
    /// Blank names and missing numbers fall back to the defaults.
    pub fn new(priority_number: Option<u32>, priority_name: Option<&str>, max_rows: usize) -> Self {
        let priority_name = priority_name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_MERGE_PRIORITY_NAME);
        Self {
            priority_number: priority_number.unwrap_or(DEFAULT_MERGE_PRIORITY_NUMBER),
            priority_name: priority_name.to_string(),
            max_rows,
        }
    }

    fn joined_name(&self, previous: Option<&str>) -> String {
        match previous {
            Some(previous) if !previous.is_empty() => {
                format!("{} - {}", self.priority_name, previous)
            }
            _ => self.priority_name.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MergeOutcome {
    pub inserted: usize,
    pub moved: usize,
    pub renamed: usize,
    pub skipped_lookup_miss: usize,
    pub skipped_offer: usize,
    pub skipped_unclassified: usize,
    pub truncated: usize,
}

impl MergeOutcome {
    pub fn applied(&self) -> usize {
        self.inserted + self.moved + self.renamed
    }

    pub fn skipped(&self) -> usize {
        self.skipped_lookup_miss + self.skipped_offer + self.skipped_unclassified
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MergedLedgers {
    pub accepted: Ledger,
    pub rejected: Ledger,
    pub outcome: MergeOutcome,
}

impl MergedLedgers {
    pub fn ledger(&self, side: LedgerSide) -> &Ledger {
        match side {
            LedgerSide::Accepted => &self.accepted,
            LedgerSide::Rejected => &self.rejected,
        }
    }
}

enum Upsert {
    Inserted,
    Moved,
    Renamed,
}

/// Fold `batch` into the ledgers. Each worker is looked up in `companions`; the
/// companion row decides the ledger through its docs status and supplies type and
/// gender. Workers with an existing offer are left out.
pub fn merge(
    accepted: Ledger,
    rejected: Ledger,
    batch: Vec<WorkerRecord>,
    companions: &CompanionIndex,
    options: &MergeOptions,
) -> MergedLedgers {
    let mut merged = MergedLedgers {
        accepted,
        rejected,
        outcome: MergeOutcome::default(),
    };

    for mut row in batch {
        let Some(companion) = companions.get(&row.request_id) else {
            debug!(request_id = %row.request_id, "no companion row; skipped");
            merged.outcome.skipped_lookup_miss += 1;
            continue;
        };
        if companion.has_offer {
            debug!(request_id = %row.request_id, "offer already exists; skipped");
            merged.outcome.skipped_offer += 1;
            continue;
        }
        let Some(side) = LedgerSide::for_docs(companion.docs_status) else {
            debug!(request_id = %row.request_id, "docs status unclassified; skipped");
            merged.outcome.skipped_unclassified += 1;
            continue;
        };

        row.worker_type = companion.worker_type.or(row.worker_type);
        row.gender = companion.gender.or(row.gender);
        row.docs_status = companion.docs_status;
        row.days_in_table = None;
        row.priority_number = Some(options.priority_number);
        row.priority_name = Some(options.priority_name.clone());

        let ledger = match side {
            LedgerSide::Accepted => &mut merged.accepted,
            LedgerSide::Rejected => &mut merged.rejected,
        };
        match upsert(ledger, row, options) {
            Upsert::Inserted => merged.outcome.inserted += 1,
            Upsert::Moved => merged.outcome.moved += 1,
            Upsert::Renamed => merged.outcome.renamed += 1,
        }
    }

    if options.max_rows > 0 {
        merged.outcome.truncated += merged.accepted.truncate(options.max_rows);
        merged.outcome.truncated += merged.rejected.truncate(options.max_rows);
    }

    info!(
        inserted = merged.outcome.inserted,
        moved = merged.outcome.moved,
        renamed = merged.outcome.renamed,
        skipped = merged.outcome.skipped(),
        truncated = merged.outcome.truncated,
        "ledgers merged"
    );
    merged
}

// Both ledgers share one comparison: a larger incoming number only renames the
// existing row, anything else moves it to the top of the incoming block.
fn upsert(ledger: &mut Ledger, mut row: WorkerRecord, options: &MergeOptions) -> Upsert {
    let Some(index) = ledger.position_of(&row.request_id) else {
        ledger.insert_at_block_top(row);
        return Upsert::Inserted;
    };

    let existing = &ledger.rows()[index];
    let name = options.joined_name(existing.priority_name.as_deref());
    let rename_only = existing
        .priority_number
        .is_some_and(|previous| options.priority_number > previous);

    if rename_only {
        if let Some(existing) = ledger.row_mut(index) {
            existing.priority_name = Some(name);
        }
        return Upsert::Renamed;
    }

    ledger.remove(index);
    row.priority_name = Some(name);
    ledger.insert_at_block_top(row);
    Upsert::Moved
}
