//! Accepted and rejected ledgers carried between runs, and the merge that folds a
//! new batch of workers into them.

mod merge;

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use serde::Serialize;

use crate::workflows::intake::{self, IntakeError};
use crate::workflows::priorities::{DocsStatus, RequestId, WorkerRecord};

pub use merge::{
    merge, MergeOptions, MergeOutcome, MergedLedgers, DEFAULT_MERGE_PRIORITY_NAME,
    DEFAULT_MERGE_PRIORITY_NUMBER,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LedgerSide {
    Accepted,
    Rejected,
}

impl LedgerSide {
    pub const fn ordered() -> [Self; 2] {
        [Self::Accepted, Self::Rejected]
    }

    /// Sheet name the ledger is stored under.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Accepted => "Accepted",
            Self::Rejected => "Rejected",
        }
    }

    /// Docs status every row of this ledger carries.
    pub const fn docs_status(self) -> DocsStatus {
        match self {
            Self::Accepted => DocsStatus::Approved,
            Self::Rejected => DocsStatus::Rejected,
        }
    }

    pub const fn for_docs(status: DocsStatus) -> Option<Self> {
        match status {
            DocsStatus::Approved => Some(Self::Accepted),
            DocsStatus::Rejected => Some(Self::Rejected),
            DocsStatus::Unknown => None,
        }
    }
}

/// Rows ordered by priority number, most recent first within a priority block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    rows: Vec<WorkerRecord>,
}

impl Ledger {
    pub fn new(rows: Vec<WorkerRecord>) -> Self {
        Self { rows }
    }

    /// Load a stored ledger; the table must carry a `Priority number` column.
    /// Stored ledgers usually have no `Docs status` column, so every row takes the
    /// status of the side it was read for.
    pub fn read<R: Read>(reader: R, side: LedgerSide) -> Result<Self, LedgerError> {
        let mut rows = intake::read_prioritized_workers(reader, side.label())?;
        for row in &mut rows {
            row.docs_status = side.docs_status();
        }
        Ok(Self::new(rows))
    }

    pub fn rows(&self) -> &[WorkerRecord] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<WorkerRecord> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn position_of(&self, request_id: &RequestId) -> Option<usize> {
        self.rows.iter().position(|row| &row.request_id == request_id)
    }

    pub fn get(&self, request_id: &RequestId) -> Option<&WorkerRecord> {
        self.position_of(request_id).map(|index| &self.rows[index])
    }

    /// Index of the first row carrying `priority`, or the end of the ledger.
    pub fn block_start(&self, priority: u32) -> usize {
        self.rows
            .iter()
            .position(|row| row.priority_number == Some(priority))
            .unwrap_or(self.rows.len())
    }

    /// Insert at the top of the row's priority block and return the index used.
    pub fn insert_at_block_top(&mut self, row: WorkerRecord) -> usize {
        let index = row
            .priority_number
            .map_or(self.rows.len(), |priority| self.block_start(priority));
        self.rows.insert(index, row);
        index
    }

    pub(crate) fn row_mut(&mut self, index: usize) -> Option<&mut WorkerRecord> {
        self.rows.get_mut(index)
    }

    pub(crate) fn remove(&mut self, index: usize) -> WorkerRecord {
        self.rows.remove(index)
    }

    /// Keep the first `max_rows` rows and return how many were dropped.
    pub fn truncate(&mut self, max_rows: usize) -> usize {
        let dropped = self.rows.len().saturating_sub(max_rows);
        self.rows.truncate(max_rows);
        dropped
    }
}

/// Lookup of the full "all maids" table by request id.
#[derive(Debug, Clone, Default)]
pub struct CompanionIndex {
    records: HashMap<RequestId, WorkerRecord>,
}

impl CompanionIndex {
    /// The first row for a request id wins when the table repeats one.
    pub fn from_records(records: Vec<WorkerRecord>) -> Self {
        let mut index = HashMap::with_capacity(records.len());
        for record in records {
            index.entry(record.request_id.clone()).or_insert(record);
        }
        Self { records: index }
    }

    pub fn get(&self, request_id: &RequestId) -> Option<&WorkerRecord> {
        self.records.get(request_id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Both ledgers from `<directory>/Accepted.csv` and `<directory>/Rejected.csv`.
pub fn read_ledgers_from_dir(directory: &Path) -> Result<(Ledger, Ledger), LedgerError> {
    let load = |side: LedgerSide| -> Result<Ledger, LedgerError> {
        let path = directory.join(format!("{}.csv", side.label()));
        if !path.is_file() {
            return Err(LedgerError::MissingSheet(side.label().to_string()));
        }
        let file = std::fs::File::open(&path).map_err(IntakeError::from)?;
        Ledger::read(file, side)
    };
    Ok((load(LedgerSide::Accepted)?, load(LedgerSide::Rejected)?))
}

#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("ledger sheet '{0}' is missing")]
    MissingSheet(String),
    #[error(transparent)]
    Intake(#[from] IntakeError),
}
