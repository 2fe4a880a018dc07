use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::replacement::{ReplacementMatcher, ReplacementPool};
use super::round_robin::{distribute, Distribution, RoundRobin};
use super::DistributionError;
use crate::workflows::intake::writer::{format_date, SheetRow};
use crate::workflows::priorities::WorkerRecord;

/// Row placed on a PC sheet by the quota distribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaRow {
    pub priority_number: Option<u32>,
    pub id: String,
    pub name: String,
    pub nationality: String,
}

impl QuotaRow {
    fn from_record(record: &WorkerRecord) -> Self {
        Self {
            priority_number: record.priority_number,
            id: record.request_id.to_string(),
            name: record.name.clone(),
            nationality: record.nationality.clone(),
        }
    }
}

impl SheetRow for QuotaRow {
    const HEADER: &'static [&'static str] = &["Priority number", "id", "name", "Nationality"];

    fn cells(&self) -> Vec<String> {
        vec![
            optional_number(self.priority_number),
            self.id.clone(),
            self.name.clone(),
            self.nationality.clone(),
        ]
    }
}

/// An incoming worker paired with the cancelled employee whose slot it takes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplacementRow {
    pub priority_number: Option<u32>,
    pub id: String,
    pub name: String,
    pub nationality: String,
    pub gender: String,
    pub cancel_request_id: String,
    pub cancelled_employee_name: String,
    pub replacement_nationality: String,
    pub cancelled_employee_gender: String,
    pub cancelled_work_permit_expiry: Option<chrono::NaiveDate>,
}

impl SheetRow for ReplacementRow {
    const HEADER: &'static [&'static str] = &[
        "Priority number",
        "id",
        "name",
        "Nationality",
        "Gender",
        "cancelRequestID",
        "Cancelled Employee Name",
        "replacementNationality",
        "Cancelled Employee Gender",
        "Cancelled Work Permit Expiry Date",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            optional_number(self.priority_number),
            self.id.clone(),
            self.name.clone(),
            self.nationality.clone(),
            self.gender.clone(),
            self.cancel_request_id.clone(),
            self.cancelled_employee_name.clone(),
            self.replacement_nationality.clone(),
            self.cancelled_employee_gender.clone(),
            self.cancelled_work_permit_expiry
                .map(format_date)
                .unwrap_or_default(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRow {
    pub link: String,
}

impl SheetRow for LinkRow {
    const HEADER: &'static [&'static str] = &["Links"];

    fn cells(&self) -> Vec<String> {
        vec![self.link.clone()]
    }
}

/// Outcome of a replacement run. Unmatched workers are counted, never placed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplacementDistribution {
    pub distribution: Distribution<ReplacementRow>,
    pub unmatched: usize,
    pub unused_candidates: usize,
}

fn optional_number(value: Option<u32>) -> String {
    value.map(|number| number.to_string()).unwrap_or_default()
}

/// Stable sort by priority number; unnumbered rows go last.
fn by_priority(records: &[WorkerRecord]) -> Vec<&WorkerRecord> {
    let mut sorted: Vec<&WorkerRecord> = records.iter().collect();
    sorted.sort_by_key(|record| (record.priority_number.is_none(), record.priority_number));
    sorted
}

/// Spread prioritized workers over the PC sheets in priority order.
pub fn quota_distribution(
    records: &[WorkerRecord],
    destinations: Vec<String>,
) -> Result<Distribution<QuotaRow>, DistributionError> {
    let rows = by_priority(records)
        .into_iter()
        .map(QuotaRow::from_record);
    let distribution = distribute(rows, destinations)?;

    info!(
        placed = distribution.total(),
        destinations = distribution.destinations.len(),
        "quota distribution complete"
    );
    Ok(distribution)
}

/// Pair each worker with a replacement candidate and place only the matched pairs.
pub fn replacement_distribution(
    records: &[WorkerRecord],
    pool: &mut ReplacementPool,
    matcher: &ReplacementMatcher,
    destinations: Vec<String>,
) -> Result<ReplacementDistribution, DistributionError> {
    let mut round_robin = RoundRobin::new(destinations)?;
    let mut unmatched = 0;

    for record in by_priority(records) {
        let Some(index) = matcher.match_candidate(record, pool) else {
            debug!(
                request_id = %record.request_id,
                nationality = %record.nationality,
                "no replacement available"
            );
            unmatched += 1;
            continue;
        };
        let Some(candidate) = pool.get(index) else {
            unmatched += 1;
            continue;
        };

        round_robin.place(ReplacementRow {
            priority_number: record.priority_number,
            id: record.request_id.to_string(),
            name: record.name.clone(),
            nationality: record.nationality.clone(),
            gender: record
                .gender
                .map(|gender| gender.label().to_string())
                .unwrap_or_default(),
            cancel_request_id: candidate.candidate_id.clone(),
            cancelled_employee_name: candidate.name.clone(),
            replacement_nationality: candidate.nationality.clone(),
            cancelled_employee_gender: candidate
                .gender
                .map(|gender| gender.label().to_string())
                .unwrap_or_default(),
            cancelled_work_permit_expiry: candidate.permit_expiry,
        });
    }

    let distribution = round_robin.finish();
    info!(
        placed = distribution.total(),
        unmatched,
        unused_candidates = pool.remaining(),
        "replacement distribution complete"
    );

    Ok(ReplacementDistribution {
        distribution,
        unmatched,
        unused_candidates: pool.remaining(),
    })
}

/// Spread login links over the PC sheets in input order; blank entries are ignored.
pub fn link_distribution(
    links: &[String],
    destinations: Vec<String>,
) -> Result<Distribution<LinkRow>, DistributionError> {
    let rows = links
        .iter()
        .map(|link| link.trim())
        .filter(|link| !link.is_empty())
        .map(|link| LinkRow {
            link: link.to_string(),
        });
    let distribution = distribute(rows, destinations)?;

    info!(placed = distribution.total(), "link distribution complete");
    Ok(distribution)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::distribution::replacement::ReplacementCandidate;
    use crate::workflows::distribution::round_robin::pc_names;
    use crate::workflows::priorities::Gender;

    fn worker(id: &str, priority: Option<u32>, nationality: &str) -> WorkerRecord {
        let mut record = WorkerRecord::new(id, id);
        record.priority_number = priority;
        record.nationality = nationality.to_string();
        record.gender = Some(Gender::Female);
        record
    }

    fn ids<T>(distribution: &Distribution<T>, id: impl Fn(&T) -> &str) -> Vec<Vec<String>> {
        distribution
            .destinations
            .iter()
            .map(|destination| destination.rows.iter().map(|row| id(row).to_string()).collect())
            .collect()
    }

    #[test]
    fn quota_sort_is_stable_and_puts_unnumbered_rows_last() {
        let records = vec![
            worker("none", None, "Filipina"),
            worker("b", Some(2), "Filipina"),
            worker("a1", Some(1), "Filipina"),
            worker("a2", Some(1), "Kenyan"),
        ];

        let distribution = quota_distribution(&records, pc_names(2)).expect("quota");

        assert_eq!(
            ids(&distribution, |row: &QuotaRow| row.id.as_str()),
            vec![vec!["a1", "b"], vec!["a2", "none"]]
        );
    }

    #[test]
    fn unmatched_workers_do_not_take_a_rotation_slot() {
        let records = vec![
            worker("w1", Some(1), "Nepali"),
            worker("w2", Some(2), "Indian"),
            worker("w3", Some(3), "Nepali"),
        ];
        let candidate = |id: &str| ReplacementCandidate {
            candidate_id: id.to_string(),
            name: id.to_string(),
            nationality: "Nepali".to_string(),
            gender: Some(Gender::Female),
            permit_expiry: None,
        };
        let mut pool = ReplacementPool::new(vec![candidate("c1"), candidate("c2")]);

        let outcome = replacement_distribution(
            &records,
            &mut pool,
            &ReplacementMatcher::default(),
            pc_names(2),
        )
        .expect("replacement");

        assert_eq!(outcome.unmatched, 1);
        assert_eq!(outcome.unused_candidates, 0);
        assert_eq!(
            ids(&outcome.distribution, |row: &ReplacementRow| row.id.as_str()),
            vec![vec!["w1"], vec!["w3"]]
        );
    }

    #[test]
    fn blank_links_are_ignored() {
        let links = vec![" https://a.test ".to_string(), String::new(), "https://b.test".to_string()];

        let distribution = link_distribution(&links, pc_names(3)).expect("links");

        assert_eq!(distribution.counts(), vec![1, 1, 0]);
        assert_eq!(distribution.destinations[0].rows[0].link, "https://a.test");
    }
}
