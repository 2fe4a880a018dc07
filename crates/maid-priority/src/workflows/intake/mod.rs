//! CSV ingestion of worker tables, replacement pools, and link lists.

mod normalizer;
mod parser;
pub mod writer;

use std::io::Read;
use std::path::Path;

use tracing::{debug, info};

use crate::workflows::distribution::ReplacementCandidate;
use crate::workflows::priorities::WorkerRecord;
use parser::{CandidateRow, LinkRow, WorkerRow, HOUSEMAID_NAME, PRIORITY_NUMBER, REQUEST_ID};

pub use writer::{to_csv_string, write_records, write_table, SheetRow, PRIORITY_SHEET_HEADER};

const REPLACEMENT_COLUMNS: &[&str] = &[
    "Cancelled Employee ID",
    "Cancelled Employee Name",
    "Cancelled Employee Nationality",
    "Gender",
    "Cancelled Work Permit Expiry Date",
];

#[derive(Debug)]
pub enum IntakeError {
    Io(std::io::Error),
    Csv(csv::Error),
    MissingColumns {
        table: &'static str,
        columns: Vec<String>,
    },
    InvalidValue {
        column: &'static str,
        row: usize,
        value: String,
    },
}

impl std::fmt::Display for IntakeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IntakeError::Io(err) => write!(f, "failed to read upload: {}", err),
            IntakeError::Csv(err) => write!(f, "invalid CSV data: {}", err),
            IntakeError::MissingColumns { table, columns } => write!(
                f,
                "{} table is missing required column(s): {}",
                table,
                columns.join(", ")
            ),
            IntakeError::InvalidValue { column, row, value } => write!(
                f,
                "row {} has an invalid '{}' value: '{}'",
                row, column, value
            ),
        }
    }
}

impl std::error::Error for IntakeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IntakeError::Io(err) => Some(err),
            IntakeError::Csv(err) => Some(err),
            IntakeError::MissingColumns { .. } | IntakeError::InvalidValue { .. } => None,
        }
    }
}

impl From<std::io::Error> for IntakeError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for IntakeError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

fn read_records<R: Read>(
    reader: R,
    table: &'static str,
    required: &[&str],
) -> Result<Vec<WorkerRecord>, IntakeError> {
    let rows = parser::read_table::<_, WorkerRow>(reader, table, required)?;
    let total = rows.len();

    let mut records = Vec::with_capacity(total);
    for (line, row) in rows {
        match row.into_record(line)? {
            Some(record) => records.push(record),
            None => debug!(table, line, "row without request id or name dropped"),
        }
    }

    info!(table, rows = total, kept = records.len(), "table ingested");
    Ok(records)
}

/// Worker table as uploaded by operations; only the identity columns are required.
pub fn read_workers<R: Read>(reader: R) -> Result<Vec<WorkerRecord>, IntakeError> {
    read_records(reader, "workers", &[REQUEST_ID, HOUSEMAID_NAME])
}

/// Table that already carries a `Priority number` column, such as a ledger or a
/// combined report sheet.
pub fn read_prioritized_workers<R: Read>(
    reader: R,
    table: &'static str,
) -> Result<Vec<WorkerRecord>, IntakeError> {
    read_records(reader, table, &[REQUEST_ID, HOUSEMAID_NAME, PRIORITY_NUMBER])
}

pub fn read_replacement_pool<R: Read>(
    reader: R,
) -> Result<Vec<ReplacementCandidate>, IntakeError> {
    let rows = parser::read_table::<_, CandidateRow>(reader, "replacement pool", REPLACEMENT_COLUMNS)?;
    let candidates: Vec<ReplacementCandidate> = rows
        .into_iter()
        .filter_map(|(_, row)| row.into_candidate())
        .collect();

    info!(candidates = candidates.len(), "replacement pool ingested");
    Ok(candidates)
}

/// Links from a CSV with a `Login link` column.
pub fn read_links<R: Read>(reader: R) -> Result<Vec<String>, IntakeError> {
    let rows = parser::read_table::<_, LinkRow>(reader, "links", &["Login link"])?;
    Ok(rows.into_iter().filter_map(|(_, row)| row.link).collect())
}

/// Links pasted as free text, one per line.
pub fn parse_link_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn read_workers_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<WorkerRecord>, IntakeError> {
    let file = std::fs::File::open(path)?;
    read_workers(file)
}
