use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::classifier::PriorityClassifier;
use super::domain::{DocsStatus, WorkerRecord};
use super::nationality::excluded_from_non_african_view;
use super::stats::PriorityStatistics;
use super::taxonomy::is_top_priority;

/// Report variants offered to operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    Combined,
    Lawp,
    NonLawp,
    TopPriorities,
}

impl ReportKind {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::Combined,
            Self::Lawp,
            Self::NonLawp,
            Self::TopPriorities,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Combined => "combined",
            Self::Lawp => "lawp",
            Self::NonLawp => "non_lawp",
            Self::TopPriorities => "top_priorities",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_ascii_lowercase().replace('-', "_");
        Self::ordered()
            .into_iter()
            .find(|kind| kind.label() == normalized)
    }

    const fn sheet_suffix(self) -> &'static str {
        match self {
            Self::Combined => "",
            Self::Lawp => " LAWP",
            Self::NonLawp => " Non-LAWP",
            Self::TopPriorities => " Non-LAWP-Top",
        }
    }

    const fn non_african_tag(self) -> &'static str {
        match self {
            Self::TopPriorities => "No-Afr",
            _ => "No-Africans",
        }
    }

    /// Whether a record belongs to the accepted/rejected populations of this report.
    fn admits(self, record: &WorkerRecord) -> bool {
        match self {
            Self::Combined => true,
            Self::Lawp => record.is_lawp(),
            Self::NonLawp | Self::TopPriorities => !record.is_lawp(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Population {
    Accepted,
    Rejected,
    Combined,
}

impl Population {
    pub const fn ordered() -> [Self; 3] {
        [Self::Accepted, Self::Rejected, Self::Combined]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Accepted => "Accepted",
            Self::Rejected => "Rejected",
            Self::Combined => "Combined",
        }
    }

    fn admits(self, status: DocsStatus) -> bool {
        match self {
            Self::Accepted => status == DocsStatus::Approved,
            Self::Rejected => status == DocsStatus::Rejected,
            Self::Combined => status != DocsStatus::Unknown,
        }
    }
}

/// One named output table of a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSheet {
    pub name: String,
    pub population: Population,
    pub excludes_africans: bool,
    pub records: Vec<WorkerRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportStatistics {
    pub accepted: PriorityStatistics,
    pub rejected: PriorityStatistics,
    pub total: PriorityStatistics,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorityReport {
    pub kind: ReportKind,
    pub sheets: Vec<ReportSheet>,
    pub statistics: ReportStatistics,
}

impl PriorityReport {
    pub fn sheet(&self, name: &str) -> Option<&ReportSheet> {
        self.sheets.iter().find(|sheet| sheet.name == name)
    }
}

/// Sort key for report tables: priority ascending, then days in table descending
/// with blanks last. Stable for equal keys.
pub fn report_order(left: &WorkerRecord, right: &WorkerRecord) -> Ordering {
    left.priority_number
        .cmp(&right.priority_number)
        .then_with(|| match (left.days_in_table, right.days_in_table) {
            (Some(left), Some(right)) => right.partial_cmp(&left).unwrap_or(Ordering::Equal),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
}

impl PriorityClassifier {
    /// Build a report over an uploaded batch.
    ///
    /// Only rows whose payment column reads "No" take part; paid and blank rows are
    /// left out. Accepted and rejected
    /// populations are drawn from the report's subset; the combined population is
    /// always drawn from the whole payment-filtered batch. Each population gets its
    /// own counter pass.
    pub fn report(&self, records: &[WorkerRecord], kind: ReportKind) -> PriorityReport {
        let eligible: Vec<&WorkerRecord> =
            records.iter().filter(|record| record.awaits_payment()).collect();

        let mut populations = Vec::with_capacity(3);
        for population in Population::ordered() {
            let mut selected: Vec<WorkerRecord> = eligible
                .iter()
                .filter(|record| population == Population::Combined || kind.admits(record))
                .filter(|record| population.admits(record.docs_status))
                .map(|record| WorkerRecord::clone(record))
                .collect();
            self.classify_batch(&mut selected);
            selected.sort_by(report_order);
            populations.push((population, selected));
        }

        let accepted = statistics_for(&populations, Population::Accepted, self);
        let rejected = statistics_for(&populations, Population::Rejected, self);
        let statistics = ReportStatistics {
            total: accepted.combine(&rejected),
            accepted,
            rejected,
        };

        if kind == ReportKind::TopPriorities {
            for (_, selected) in &mut populations {
                selected.retain(|record| record.priority_number.is_some_and(is_top_priority));
            }
        }

        let mut sheets = Vec::with_capacity(6);
        for (population, selected) in &populations {
            sheets.push(ReportSheet {
                name: format!("{}{}", population.label(), kind.sheet_suffix()),
                population: *population,
                excludes_africans: false,
                records: selected.clone(),
            });
        }
        for (population, selected) in populations {
            let records = selected
                .into_iter()
                .filter(|record| !excluded_from_non_african_view(&record.nationality))
                .collect();
            sheets.push(ReportSheet {
                name: format!(
                    "{} {}{}",
                    population.label(),
                    kind.non_african_tag(),
                    kind.sheet_suffix()
                ),
                population,
                excludes_africans: true,
                records,
            });
        }

        info!(
            report = kind.label(),
            input = records.len(),
            eligible = eligible.len(),
            sheets = sheets.len(),
            "priority report built"
        );

        PriorityReport {
            kind,
            sheets,
            statistics,
        }
    }
}

fn statistics_for(
    populations: &[(Population, Vec<WorkerRecord>)],
    population: Population,
    classifier: &PriorityClassifier,
) -> PriorityStatistics {
    let records = populations
        .iter()
        .filter(|(candidate, _)| *candidate == population)
        .flat_map(|(_, records)| records.iter());
    PriorityStatistics::aggregate(records, classifier.names())
}
