use serde::{Deserialize, Serialize};

use super::domain::{Gender, WorkerRecord};
use super::taxonomy::PriorityNames;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenderCounts {
    pub males: usize,
    pub females: usize,
    pub total: usize,
}

impl GenderCounts {
    fn record(&mut self, gender: Option<Gender>) {
        match gender {
            Some(Gender::Male) => self.males += 1,
            Some(Gender::Female) => self.females += 1,
            None => {}
        }
        self.total += 1;
    }

    fn add(&mut self, other: &GenderCounts) {
        self.males += other.males;
        self.females += other.females;
        self.total += other.total;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityStatisticsRow {
    pub priority_number: u8,
    pub priority_name: String,
    #[serde(flatten)]
    pub counts: GenderCounts,
}

/// Gender breakdown per priority name, one row for every priority in the taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityStatistics {
    pub rows: Vec<PriorityStatisticsRow>,
}

impl PriorityStatistics {
    pub fn empty(names: &PriorityNames) -> Self {
        let rows = names
            .iter()
            .map(|(priority_number, name)| PriorityStatisticsRow {
                priority_number,
                priority_name: name.to_string(),
                counts: GenderCounts::default(),
            })
            .collect();
        Self { rows }
    }

    /// Count classified records; rows without a priority in the taxonomy are ignored.
    pub fn aggregate<'a>(
        records: impl IntoIterator<Item = &'a WorkerRecord>,
        names: &PriorityNames,
    ) -> Self {
        let mut stats = Self::empty(names);
        for record in records {
            let Some(priority) = record.priority_number else {
                continue;
            };
            if let Some(row) = stats
                .rows
                .iter_mut()
                .find(|row| u32::from(row.priority_number) == priority)
            {
                row.counts.record(record.gender);
            }
        }
        stats
    }

    /// Element-wise sum of two tables built from the same taxonomy.
    pub fn combine(&self, other: &Self) -> Self {
        let mut combined = self.clone();
        for row in &mut combined.rows {
            if let Some(theirs) = other
                .rows
                .iter()
                .find(|candidate| candidate.priority_number == row.priority_number)
            {
                row.counts.add(&theirs.counts);
            }
        }
        combined
    }

    pub fn get(&self, priority_name: &str) -> Option<&GenderCounts> {
        self.rows
            .iter()
            .find(|row| row.priority_name == priority_name)
            .map(|row| &row.counts)
    }

    pub fn total(&self) -> GenderCounts {
        let mut total = GenderCounts::default();
        for row in &self.rows {
            total.add(&row.counts);
        }
        total
    }
}
