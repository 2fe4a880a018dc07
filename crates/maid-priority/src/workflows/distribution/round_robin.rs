use serde::{Deserialize, Serialize};

use super::DistributionError;

/// One output target (a PC sheet) and the rows placed on it, in placement order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Destination<T> {
    pub name: String,
    pub rows: Vec<T>,
}

/// Rows spread over a fixed set of destinations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Distribution<T> {
    pub destinations: Vec<Destination<T>>,
}

impl<T> Distribution<T> {
    pub fn total(&self) -> usize {
        self.destinations
            .iter()
            .map(|destination| destination.rows.len())
            .sum()
    }

    pub fn counts(&self) -> Vec<usize> {
        self.destinations
            .iter()
            .map(|destination| destination.rows.len())
            .collect()
    }

    pub fn destination(&self, name: &str) -> Option<&Destination<T>> {
        self.destinations
            .iter()
            .find(|destination| destination.name == name)
    }

    pub fn rows(&self) -> impl Iterator<Item = &T> {
        self.destinations
            .iter()
            .flat_map(|destination| destination.rows.iter())
    }
}

/// Default destination names `PC_1 .. PC_N`.
pub fn pc_names(count: usize) -> Vec<String> {
    (1..=count).map(|index| format!("PC_{index}")).collect()
}

/// Rotating placement cursor. The cursor only advances when a row is placed, so
/// rows skipped by the caller never consume a rotation slot.
#[derive(Debug)]
pub struct RoundRobin<T> {
    destinations: Vec<Destination<T>>,
    cursor: usize,
}

impl<T> RoundRobin<T> {
    /// Destinations are created up front and stay present even when empty.
    pub fn new(names: Vec<String>) -> Result<Self, DistributionError> {
        if names.is_empty() {
            return Err(DistributionError::NoDestinations);
        }

        let destinations = names
            .into_iter()
            .map(|name| Destination {
                name,
                rows: Vec::new(),
            })
            .collect();

        Ok(Self {
            destinations,
            cursor: 0,
        })
    }

    pub fn with_count(count: usize) -> Result<Self, DistributionError> {
        Self::new(pc_names(count))
    }

    pub fn place(&mut self, row: T) {
        let slot = self.cursor % self.destinations.len();
        self.destinations[slot].rows.push(row);
        self.cursor += 1;
    }

    pub fn placed(&self) -> usize {
        self.cursor
    }

    pub fn finish(self) -> Distribution<T> {
        Distribution {
            destinations: self.destinations,
        }
    }
}

/// Place every row in input order.
pub fn distribute<T>(
    rows: impl IntoIterator<Item = T>,
    names: Vec<String>,
) -> Result<Distribution<T>, DistributionError> {
    let mut round_robin = RoundRobin::new(names)?;
    for row in rows {
        round_robin.place(row);
    }
    Ok(round_robin.finish())
}
