use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::taxonomy::GatedCategory;
use crate::config::ConfigError;

/// Running admission counts for the gated categories of one classification pass.
///
/// Built fresh for every batch and threaded through the classifier by `&mut`;
/// counts only ever grow while the pass runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityCounters {
    admitted: BTreeMap<GatedCategory, u32>,
}

impl PriorityCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the pass with slots that were already handed out elsewhere.
    pub fn with_initial(initial: impl IntoIterator<Item = (GatedCategory, u32)>) -> Self {
        Self {
            admitted: initial.into_iter().collect(),
        }
    }

    pub fn get(&self, category: GatedCategory) -> u32 {
        self.admitted.get(&category).copied().unwrap_or(0)
    }

    /// Consume one slot when the category is still below its threshold.
    pub fn try_admit(&mut self, category: GatedCategory, thresholds: &PriorityThresholds) -> bool {
        let count = self.admitted.entry(category).or_insert(0);
        if *count < thresholds.limit(category) {
            *count += 1;
            true
        } else {
            false
        }
    }
}

/// Maximum admissions per gated category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityThresholds {
    limits: BTreeMap<GatedCategory, u32>,
}

impl Default for PriorityThresholds {
    fn default() -> Self {
        Self {
            limits: GatedCategory::ordered()
                .into_iter()
                .map(|category| (category, category.default_threshold()))
                .collect(),
        }
    }
}

impl PriorityThresholds {
    pub fn limit(&self, category: GatedCategory) -> u32 {
        self.limits
            .get(&category)
            .copied()
            .unwrap_or_else(|| category.default_threshold())
    }

    pub fn set(&mut self, category: GatedCategory, limit: u32) {
        self.limits.insert(category, limit);
    }

    pub fn with_limit(mut self, category: GatedCategory, limit: u32) -> Self {
        self.set(category, limit);
        self
    }

    /// Build from display labels such as `"African Live-In"`; unknown labels are rejected.
    pub fn from_labels<'a>(
        entries: impl IntoIterator<Item = (&'a str, u32)>,
    ) -> Result<Self, ConfigError> {
        let mut thresholds = Self::default();
        for (label, limit) in entries {
            let category = GatedCategory::from_label(label).ok_or_else(|| {
                ConfigError::InvalidConfiguration(format!("unknown quota category '{label}'"))
            })?;
            thresholds.set(category, limit);
        }
        Ok(thresholds)
    }

    pub fn iter(&self) -> impl Iterator<Item = (GatedCategory, u32)> + '_ {
        GatedCategory::ordered()
            .into_iter()
            .map(|category| (category, self.limit(category)))
    }
}
