use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::workflows::priorities::{Gender, WorkerRecord};

/// A cancelled employee whose visa slot can be reused by an incoming worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplacementCandidate {
    pub candidate_id: String,
    pub name: String,
    pub nationality: String,
    pub gender: Option<Gender>,
    pub permit_expiry: Option<NaiveDate>,
}

/// Position of a candidate inside a [`ReplacementPool`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CandidateIndex(usize);

/// Candidates for one matching run with per-slot consumption flags.
#[derive(Debug, Clone)]
pub struct ReplacementPool {
    candidates: Vec<ReplacementCandidate>,
    consumed: Vec<bool>,
}

impl ReplacementPool {
    pub fn new(candidates: Vec<ReplacementCandidate>) -> Self {
        let consumed = vec![false; candidates.len()];
        Self {
            candidates,
            consumed,
        }
    }

    pub fn get(&self, index: CandidateIndex) -> Option<&ReplacementCandidate> {
        self.candidates.get(index.0)
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.consumed.iter().filter(|used| !**used).count()
    }

    pub fn is_consumed(&self, index: CandidateIndex) -> bool {
        self.consumed.get(index.0).copied().unwrap_or(true)
    }

    /// Consume the unused candidate of this nationality and gender whose permit
    /// expires first. Candidates without an expiry date come last; ties keep pool order.
    fn take(&mut self, nationality: &str, gender: Gender) -> Option<CandidateIndex> {
        let index = self
            .candidates
            .iter()
            .enumerate()
            .filter(|(index, _)| !self.consumed[*index])
            .filter(|(_, candidate)| {
                candidate.nationality == nationality && candidate.gender == Some(gender)
            })
            .min_by_key(|(_, candidate)| {
                (candidate.permit_expiry.is_none(), candidate.permit_expiry)
            })
            .map(|(index, _)| index)?;

        self.consumed[index] = true;
        Some(CandidateIndex(index))
    }
}

/// Acceptable replacement nationalities per outgoing nationality, in preference order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NationalityRules {
    rules: HashMap<String, Vec<String>>,
}

impl Default for NationalityRules {
    fn default() -> Self {
        Self::standard()
    }
}

impl NationalityRules {
    pub fn empty() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }

    /// Compatibility table used by the operations team.
    pub fn standard() -> Self {
        const SAME_ONLY: &[&str] = &[
            "Myanmarese",
            "Uzbekistani",
            "Indian",
            "Spanish",
            "German",
            "Lebanese",
            "Moroccan",
        ];
        const FILIPINA_FALLBACK: &[&str] = &[
            "Nepali",
            "Ugandan",
            "Nigerian",
            "Sri Lankan",
            "Afghan",
            "Cameroonian",
            "Colombian",
            "Georgian",
            "Indonesian",
            "Ghanaian",
            "Kazakhstani",
            "Malagasy",
            "Pakistani",
            "Peruvian",
            "Rwandan",
            "South African",
            "Thai",
            "Turkmen",
            "Ukrainian",
            "Zimbabwean",
        ];

        let mut rules = Self::empty()
            .with_rule("Filipina", ["Filipina", "Ethiopian"])
            .with_rule("Ethiopian", ["Filipina", "Ethiopian"])
            .with_rule("Kenyan", ["Kenyan", "Ethiopian"]);
        for nationality in FILIPINA_FALLBACK {
            rules = rules.with_rule(nationality, [*nationality, "Filipina"]);
        }
        for nationality in SAME_ONLY {
            rules = rules.with_rule(nationality, [*nationality]);
        }
        rules
    }

    pub fn with_rule<'a>(
        mut self,
        nationality: &str,
        acceptable: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        self.rules.insert(
            nationality.to_string(),
            acceptable.into_iter().map(str::to_string).collect(),
        );
        self
    }

    /// Empty for nationalities without a rule.
    pub fn acceptable(&self, nationality: &str) -> &[String] {
        self.rules
            .get(nationality)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// Pairs outgoing workers with unused candidates from a pool.
#[derive(Debug, Clone, Default)]
pub struct ReplacementMatcher {
    rules: NationalityRules,
}

impl ReplacementMatcher {
    pub fn new(rules: NationalityRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &NationalityRules {
        &self.rules
    }

    /// Try each acceptable nationality in order; the first one with an eligible
    /// candidate wins. A worker without a gender never matches.
    pub fn match_candidate(
        &self,
        outgoing: &WorkerRecord,
        pool: &mut ReplacementPool,
    ) -> Option<CandidateIndex> {
        let gender = outgoing.gender?;
        self.rules
            .acceptable(&outgoing.nationality)
            .iter()
            .find_map(|nationality| pool.take(nationality, gender))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(
        id: &str,
        nationality: &str,
        gender: Gender,
        expiry: Option<(i32, u32, u32)>,
    ) -> ReplacementCandidate {
        ReplacementCandidate {
            candidate_id: id.to_string(),
            name: format!("Cancelled {id}"),
            nationality: nationality.to_string(),
            gender: Some(gender),
            permit_expiry: expiry
                .map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).expect("valid date")),
        }
    }

    fn outgoing(nationality: &str, gender: Gender) -> WorkerRecord {
        let mut record = WorkerRecord::new("out-1", "Outgoing");
        record.nationality = nationality.to_string();
        record.gender = Some(gender);
        record
    }

    #[test]
    fn earliest_expiry_is_consumed_first() {
        let mut pool = ReplacementPool::new(vec![
            candidate("late", "Nepali", Gender::Female, Some((2026, 3, 1))),
            candidate("undated", "Nepali", Gender::Female, None),
            candidate("early", "Nepali", Gender::Female, Some((2025, 12, 1))),
        ]);
        let matcher = ReplacementMatcher::default();
        let worker = outgoing("Nepali", Gender::Female);

        let matched: Vec<CandidateIndex> = (0..3)
            .filter_map(|_| matcher.match_candidate(&worker, &mut pool))
            .collect();
        let order: Vec<&str> = matched
            .iter()
            .filter_map(|index| pool.get(*index))
            .map(|candidate| candidate.candidate_id.as_str())
            .collect();

        assert_eq!(order, vec!["early", "late", "undated"]);
        assert_eq!(matcher.match_candidate(&worker, &mut pool), None);
    }

    #[test]
    fn falls_back_to_next_acceptable_nationality() {
        let mut pool = ReplacementPool::new(vec![
            candidate("fil", "Filipina", Gender::Female, Some((2025, 1, 1))),
            candidate("nep-male", "Nepali", Gender::Male, Some((2024, 1, 1))),
        ]);
        let matcher = ReplacementMatcher::default();

        let index = matcher
            .match_candidate(&outgoing("Nepali", Gender::Female), &mut pool)
            .expect("fallback match");
        assert_eq!(pool.get(index).expect("candidate").candidate_id, "fil");
        assert_eq!(pool.remaining(), 1);
    }

    #[test]
    fn unknown_nationality_never_matches() {
        let mut pool = ReplacementPool::new(vec![candidate(
            "fil",
            "Filipina",
            Gender::Female,
            None,
        )]);
        let matcher = ReplacementMatcher::default();

        assert_eq!(
            matcher.match_candidate(&outgoing("Martian", Gender::Female), &mut pool),
            None
        );
        assert_eq!(pool.remaining(), 1);
    }

    #[test]
    fn standard_rules_cover_fallback_groups() {
        let rules = NationalityRules::standard();
        assert_eq!(rules.acceptable("Kenyan"), ["Kenyan", "Ethiopian"]);
        assert_eq!(rules.acceptable("Thai"), ["Thai", "Filipina"]);
        assert_eq!(rules.acceptable("Indian"), ["Indian"]);
        assert!(rules.acceptable("Martian").is_empty());
    }
}
