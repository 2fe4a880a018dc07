//! Approval breakdown of an already prioritized combined sheet.

use serde::{Deserialize, Serialize};

use super::domain::{DocsStatus, WorkerRecord, WorkerType};
use super::nationality::{is_african, is_ethiopian, is_filipina, INDIAN};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakdownCategory {
    Mv,
    CcLandedInDubai,
    CcInExitFilipina,
    CcInExitEthiopian,
    CcInExitAfrican,
    CcInExitOther,
    LawpEthiopian,
    LawpIndian,
    LawpOther,
}

impl BreakdownCategory {
    /// Evaluation order; a later match replaces an earlier one.
    pub const fn ordered() -> [Self; 9] {
        [
            Self::Mv,
            Self::CcLandedInDubai,
            Self::CcInExitFilipina,
            Self::CcInExitEthiopian,
            Self::CcInExitAfrican,
            Self::CcInExitOther,
            Self::LawpEthiopian,
            Self::LawpIndian,
            Self::LawpOther,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Mv => "MV",
            Self::CcLandedInDubai => "CC landed in dubai",
            Self::CcInExitFilipina => "CC in exit Filipina",
            Self::CcInExitEthiopian => "CC in exit Ethiopian",
            Self::CcInExitAfrican => "CC in exit African",
            Self::CcInExitOther => "CC in exit Other",
            Self::LawpEthiopian => "LAWP Ethiopian",
            Self::LawpIndian => "LAWP Indian",
            Self::LawpOther => "LAWP Other",
        }
    }

    fn matches(self, record: &WorkerRecord) -> bool {
        let Some(priority) = record.priority_number else {
            return false;
        };
        let nationality = record.nationality.as_str();
        let cc = record.is_type(WorkerType::Cc);

        match self {
            Self::Mv => record.is_type(WorkerType::Mv),
            Self::CcLandedInDubai => cc && [6, 7, 8, 10, 11, 14, 15].contains(&priority),
            Self::CcInExitFilipina => {
                cc && [3, 5, 12, 17, 23].contains(&priority) && is_filipina(nationality)
            }
            Self::CcInExitEthiopian => {
                cc && [5, 9, 19, 21, 23].contains(&priority) && is_ethiopian(nationality)
            }
            Self::CcInExitAfrican => {
                cc && [5, 18, 20, 22, 23].contains(&priority) && is_african(nationality)
            }
            Self::CcInExitOther => {
                cc && [5, 23].contains(&priority)
                    && !is_filipina(nationality)
                    && !is_ethiopian(nationality)
                    && !is_african(nationality)
            }
            Self::LawpEthiopian => priority == 16 && is_ethiopian(nationality),
            Self::LawpIndian => priority == 16 && nationality == INDIAN,
            Self::LawpOther => priority == 16 && !is_ethiopian(nationality) && nationality != INDIAN,
        }
    }

    /// Last category in evaluation order that matches the record.
    pub fn of(record: &WorkerRecord) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .filter(|category| category.matches(record))
            .last()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalCounts {
    pub approved: usize,
    pub rejected: usize,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownRow {
    pub category: String,
    #[serde(flatten)]
    pub counts: ApprovalCounts,
}

/// Approved/rejected counts per category followed by a `Total` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalBreakdown {
    pub rows: Vec<BreakdownRow>,
}

impl ApprovalBreakdown {
    pub fn aggregate<'a>(records: impl IntoIterator<Item = &'a WorkerRecord>) -> Self {
        let categories = BreakdownCategory::ordered();
        let mut counts = [ApprovalCounts::default(); 9];

        for record in records {
            let Some(category) = BreakdownCategory::of(record) else {
                continue;
            };
            let Some(slot) = categories.iter().position(|candidate| *candidate == category) else {
                continue;
            };
            match record.docs_status {
                DocsStatus::Approved => counts[slot].approved += 1,
                DocsStatus::Rejected => counts[slot].rejected += 1,
                DocsStatus::Unknown => continue,
            }
            counts[slot].total += 1;
        }

        let mut total = ApprovalCounts::default();
        let mut rows: Vec<BreakdownRow> = categories
            .iter()
            .zip(counts)
            .map(|(category, counts)| {
                total.approved += counts.approved;
                total.rejected += counts.rejected;
                total.total += counts.total;
                BreakdownRow {
                    category: category.label().to_string(),
                    counts,
                }
            })
            .collect();
        rows.push(BreakdownRow {
            category: "Total".to_string(),
            counts: total,
        });

        Self { rows }
    }

    pub fn get(&self, category: &str) -> Option<&ApprovalCounts> {
        self.rows
            .iter()
            .find(|row| row.category == category)
            .map(|row| &row.counts)
    }
}
