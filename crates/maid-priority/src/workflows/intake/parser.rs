use std::io::Read;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

use super::normalizer;
use super::IntakeError;
use crate::workflows::distribution::ReplacementCandidate;
use crate::workflows::priorities::{Gender, RequestId, WorkerRecord, WorkerType};

pub(crate) const REQUEST_ID: &str = "Request ID";
pub(crate) const HOUSEMAID_NAME: &str = "Housemaid Name";
pub(crate) const PRIORITY_NUMBER: &str = "Priority number";

/// Read a table, validate its header row, and deserialize every row that is not blank.
pub(crate) fn read_table<R, T>(
    reader: R,
    table: &'static str,
    required: &[&str],
) -> Result<Vec<(usize, T)>, IntakeError>
where
    R: Read,
    T: DeserializeOwned,
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers: csv::StringRecord = csv_reader
        .headers()?
        .iter()
        .map(normalizer::header)
        .collect();

    let missing: Vec<String> = required
        .iter()
        .filter(|column| {
            !headers
                .iter()
                .filter(|header| !normalizer::is_unnamed(header))
                .any(|header| header == **column)
        })
        .map(|column| column.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(IntakeError::MissingColumns {
            table,
            columns: missing,
        });
    }

    let mut rows = Vec::new();
    for (index, result) in csv_reader.records().enumerate() {
        let record = result?;
        if record.iter().all(|cell| cell.is_empty()) {
            continue;
        }
        let row: T = record.deserialize(Some(&headers))?;
        // Header is line 1.
        rows.push((index + 2, row));
    }

    Ok(rows)
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct WorkerRow {
    #[serde(rename = "Request ID", deserialize_with = "empty_string_as_none")]
    request_id: Option<String>,
    #[serde(rename = "Housemaid Name", deserialize_with = "empty_string_as_none")]
    name: Option<String>,
    #[serde(rename = "Housemaid Nationality", deserialize_with = "empty_string_as_none")]
    nationality: Option<String>,
    #[serde(rename = "Housemaid Type", deserialize_with = "empty_string_as_none")]
    worker_type: Option<String>,
    #[serde(rename = "Gender", deserialize_with = "empty_string_as_none")]
    gender: Option<String>,
    #[serde(rename = "Docs status", deserialize_with = "empty_string_as_none")]
    docs_status: Option<String>,
    #[serde(rename = "Outcome", deserialize_with = "empty_string_as_none")]
    outcome: Option<String>,
    #[serde(rename = "Live out", deserialize_with = "empty_string_as_none")]
    live_out: Option<String>,
    #[serde(rename = "Housemaid Status", deserialize_with = "empty_string_as_none")]
    housemaid_status: Option<String>,
    #[serde(
        rename = "Been in the table for (in days)",
        deserialize_with = "empty_string_as_none"
    )]
    days_in_table: Option<String>,
    #[serde(rename = "Flight in (days)", deserialize_with = "empty_string_as_none")]
    flight_in_days: Option<String>,
    #[serde(
        rename = "Last day to stay in country in",
        deserialize_with = "empty_string_as_none"
    )]
    last_day_in_country: Option<String>,
    #[serde(rename = "Client Note", deserialize_with = "empty_string_as_none")]
    client_note: Option<String>,
    #[serde(
        rename = "Stage in Freedom Operator Page",
        deserialize_with = "empty_string_as_none"
    )]
    stage_in_operator_page: Option<String>,
    #[serde(rename = "Attested GCC", deserialize_with = "empty_string_as_none")]
    attested_gcc: Option<String>,
    #[serde(rename = "MFA", deserialize_with = "empty_string_as_none")]
    mfa: Option<String>,
    #[serde(rename = "GCC", deserialize_with = "empty_string_as_none")]
    gcc: Option<String>,
    #[serde(rename = "Payment added?", deserialize_with = "empty_string_as_none")]
    payment_added: Option<String>,
    #[serde(rename = "MB?", deserialize_with = "empty_string_as_none")]
    mb: Option<String>,
    #[serde(rename = "Has Contract MB?", deserialize_with = "empty_string_as_none")]
    has_contract_mb: Option<String>,
    #[serde(rename = "Priority number", deserialize_with = "empty_string_as_none")]
    priority_number: Option<String>,
    #[serde(rename = "Priority Name", deserialize_with = "empty_string_as_none")]
    priority_name: Option<String>,
}

impl WorkerRow {
    /// `None` when the identity columns are blank; such rows never reach the rules.
    pub(crate) fn into_record(self, line: usize) -> Result<Option<WorkerRecord>, IntakeError> {
        let (Some(request_id), Some(name)) = (self.request_id, self.name) else {
            return Ok(None);
        };

        let priority_number = match self.priority_number {
            Some(raw) => Some(normalizer::whole_number(&raw).ok_or_else(|| {
                IntakeError::InvalidValue {
                    column: PRIORITY_NUMBER,
                    row: line,
                    value: raw.clone(),
                }
            })?),
            None => None,
        };

        Ok(Some(WorkerRecord {
            request_id: RequestId(request_id),
            name,
            nationality: self.nationality.unwrap_or_default(),
            worker_type: self.worker_type.as_deref().and_then(WorkerType::parse),
            gender: self.gender.as_deref().and_then(Gender::parse),
            docs_status: normalizer::docs_status(self.docs_status.as_deref()),
            outcome: self.outcome,
            live_out: normalizer::tri_state(self.live_out.as_deref()),
            housemaid_status: self.housemaid_status,
            days_in_table: normalizer::number(self.days_in_table.as_deref()),
            flight_in_days: normalizer::number(self.flight_in_days.as_deref()),
            last_day_in_country: normalizer::number(self.last_day_in_country.as_deref()),
            client_note: self.client_note,
            stage_in_operator_page: self.stage_in_operator_page,
            attested_gcc: normalizer::flag(self.attested_gcc.as_deref()),
            mfa: normalizer::flag(self.mfa.as_deref()),
            gcc: normalizer::flag(self.gcc.as_deref()),
            payment_added: normalizer::tri_state(self.payment_added.as_deref()),
            has_offer: normalizer::flag(self.mb.as_deref())
                || normalizer::flag(self.has_contract_mb.as_deref()),
            priority_number,
            priority_name: self.priority_name,
        }))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct CandidateRow {
    #[serde(rename = "Cancelled Employee ID", deserialize_with = "empty_string_as_none")]
    candidate_id: Option<String>,
    #[serde(rename = "Cancelled Employee Name", deserialize_with = "empty_string_as_none")]
    name: Option<String>,
    #[serde(
        rename = "Cancelled Employee Nationality",
        deserialize_with = "empty_string_as_none"
    )]
    nationality: Option<String>,
    #[serde(rename = "Gender", deserialize_with = "empty_string_as_none")]
    gender: Option<String>,
    #[serde(
        rename = "Cancelled Work Permit Expiry Date",
        deserialize_with = "empty_string_as_none"
    )]
    permit_expiry: Option<String>,
}

impl CandidateRow {
    pub(crate) fn into_candidate(self) -> Option<ReplacementCandidate> {
        let candidate_id = self.candidate_id?;
        Some(ReplacementCandidate {
            candidate_id,
            name: self.name.unwrap_or_default(),
            nationality: self.nationality.unwrap_or_default(),
            gender: self.gender.as_deref().and_then(Gender::parse),
            permit_expiry: self.permit_expiry.as_deref().and_then(normalizer::date),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct LinkRow {
    #[serde(rename = "Login link", deserialize_with = "empty_string_as_none")]
    pub(crate) link: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
