use serde::{Deserialize, Serialize};

/// Lowest priority number; assigned when nothing more specific matches.
pub const CATCH_ALL_PRIORITY: u8 = 23;

/// Priorities surfaced by the "top priorities" report.
pub const TOP_PRIORITIES: [u8; 5] = [1, 2, 3, 4, 5];

pub const DEFAULT_MV_URGENCY_DAYS: u32 = 5;

pub fn is_top_priority(priority: u32) -> bool {
    TOP_PRIORITIES
        .iter()
        .any(|top| u32::from(*top) == priority)
}

/// Priority categories whose admission is capped per batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GatedCategory {
    FilipinaLiveIn,
    AfricanLiveIn,
    EthiopianLiveIn,
    FilipinaLiveOut,
    AfricanLiveOut,
}

impl GatedCategory {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::FilipinaLiveIn,
            Self::AfricanLiveIn,
            Self::EthiopianLiveIn,
            Self::FilipinaLiveOut,
            Self::AfricanLiveOut,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::FilipinaLiveIn => "Filipina Live-In",
            Self::AfricanLiveIn => "African Live-In",
            Self::EthiopianLiveIn => "Ethiopian Live-In",
            Self::FilipinaLiveOut => "Filipina Live-Out",
            Self::AfricanLiveOut => "African Live-Out",
        }
    }

    pub const fn priority(self) -> u8 {
        match self {
            Self::FilipinaLiveIn => 6,
            Self::AfricanLiveIn => 7,
            Self::EthiopianLiveIn => 8,
            Self::FilipinaLiveOut => 10,
            Self::AfricanLiveOut => 11,
        }
    }

    pub const fn default_threshold(self) -> u32 {
        match self {
            Self::FilipinaLiveIn => 80,
            Self::AfricanLiveIn => 60,
            Self::EthiopianLiveIn => 70,
            Self::FilipinaLiveOut => 60,
            Self::AfricanLiveOut => 40,
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|category| category.label().eq_ignore_ascii_case(label.trim()))
    }

    pub fn from_priority(priority: u8) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|category| category.priority() == priority)
    }
}

/// Display names keyed by priority number. Rules 4 and 13 embed the urgency threshold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriorityNames {
    names: Vec<String>,
}

impl PriorityNames {
    pub fn new(mv_urgency_days: u32) -> Self {
        let names = (1..=CATCH_ALL_PRIORITY)
            .map(|priority| priority_label(priority, mv_urgency_days))
            .collect();
        Self { names }
    }

    pub fn get(&self, priority: u8) -> Option<&str> {
        let index = usize::from(priority).checked_sub(1)?;
        self.names.get(index).map(String::as_str)
    }

    /// Entries in ascending priority order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &str)> {
        self.names
            .iter()
            .enumerate()
            .map(|(index, name)| ((index + 1) as u8, name.as_str()))
    }
}

fn priority_label(priority: u8, mv_urgency_days: u32) -> String {
    match priority {
        1 => "MV with Super Angry Client".to_string(),
        2 => "MV with Visa Prioritization Request".to_string(),
        3 => "Filipina with Flight in more than 2 days and Less Than 4 Days".to_string(),
        4 => format!("MV in Table for More Than {mv_urgency_days} Days"),
        5 => "Last day to stay in country < 5".to_string(),
        6 => "Filipina Live-In in Dubai".to_string(),
        7 => "African Live-In in Dubai".to_string(),
        8 => "Ethiopian Live-In in Dubai".to_string(),
        9 => "Ethiopian Pending COC for More Than 10 Days".to_string(),
        10 => "Filipina Live-Out in Dubai".to_string(),
        11 => "African Live-Out in Dubai".to_string(),
        12 => "Filipina with Flight in 4 to 7 Days".to_string(),
        13 => format!("MV in Table for {mv_urgency_days} Days or Less"),
        14 => "Landed in Dubai Live In".to_string(),
        15 => "Landed in Dubai Live Out".to_string(),
        16 => "Outcome is LAWP".to_string(),
        17 => "Filipina with Flight in 7 to 14 Days".to_string(),
        18 => "African with Attested GCC".to_string(),
        19 => "Ethiopian Pending Exit Permit".to_string(),
        20 => "African with MFA".to_string(),
        21 => "Ethiopian Pending COC".to_string(),
        22 => "African with GCC".to_string(),
        _ => "Other".to_string(),
    }
}
