use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::flows::{QuotaRow, ReplacementRow};
use super::round_robin::Distribution;

/// Rows that carry the priority of the worker they were built from.
pub trait Prioritized {
    fn priority_number(&self) -> Option<u32>;
}

impl Prioritized for QuotaRow {
    fn priority_number(&self) -> Option<u32> {
        self.priority_number
    }
}

impl Prioritized for ReplacementRow {
    fn priority_number(&self) -> Option<u32> {
        self.priority_number
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DestinationCount {
    pub name: String,
    pub rows: usize,
}

/// Totals shown after a distribution run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionSummary {
    pub total: usize,
    pub average_per_destination: f64,
    pub destinations: Vec<DestinationCount>,
    /// Placed rows per priority number, ascending. Rows without a number are not counted.
    pub by_priority: BTreeMap<u32, usize>,
}

impl DistributionSummary {
    pub fn of<T: Prioritized>(distribution: &Distribution<T>) -> Self {
        let mut summary = Self::counts_only(distribution);
        for row in distribution.rows() {
            if let Some(priority) = row.priority_number() {
                *summary.by_priority.entry(priority).or_insert(0) += 1;
            }
        }
        summary
    }

    /// Summary for rows without a priority, such as links.
    pub fn counts_only<T>(distribution: &Distribution<T>) -> Self {
        let total = distribution.total();
        let destinations: Vec<DestinationCount> = distribution
            .destinations
            .iter()
            .map(|destination| DestinationCount {
                name: destination.name.clone(),
                rows: destination.rows.len(),
            })
            .collect();
        let average_per_destination = if destinations.is_empty() {
            0.0
        } else {
            total as f64 / destinations.len() as f64
        };

        Self {
            total,
            average_per_destination,
            destinations,
            by_priority: BTreeMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::distribution::round_robin::{distribute, pc_names};

    fn quota(priority: u32, id: &str) -> QuotaRow {
        QuotaRow {
            priority_number: Some(priority),
            id: id.to_string(),
            name: format!("Maid {id}"),
            nationality: "Filipina".to_string(),
        }
    }

    #[test]
    fn summary_counts_priorities_and_average() {
        let rows = vec![quota(1, "a"), quota(3, "b"), quota(3, "c")];
        let distribution = distribute(rows, pc_names(2)).expect("distribution");

        let summary = DistributionSummary::of(&distribution);

        assert_eq!(summary.total, 3);
        assert!((summary.average_per_destination - 1.5).abs() < f64::EPSILON);
        assert_eq!(summary.by_priority.get(&3), Some(&2));
        assert_eq!(summary.destinations[0].rows, 2);
        assert_eq!(summary.destinations[1].name, "PC_2");
    }
}
