use serde::{Deserialize, Serialize};

/// Identifier wrapper for a housemaid request row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RequestId(pub String);

impl RequestId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkerType {
    #[serde(rename = "MV")]
    Mv,
    #[serde(rename = "CC")]
    Cc,
}

impl WorkerType {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "MV" => Some(Self::Mv),
            "CC" => Some(Self::Cc),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Mv => "MV",
            Self::Cc => "CC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "Male" => Some(Self::Male),
            "Female" => Some(Self::Female),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
        }
    }
}

/// Document verification state after collapsing the spreadsheet spellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocsStatus {
    Approved,
    Rejected,
    Unknown,
}

impl DocsStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
            Self::Unknown => "Unknown",
        }
    }
}

pub const LANDED_IN_DUBAI: &str = "LANDED_IN_DUBAI";
pub const OUTCOME_LAWP: &str = "LAWP";
pub const NOTE_SUPER_ANGRY_CLIENT: &str = "SUPER_ANGRY_CLIENT";
pub const NOTE_PRIORITIZE_VISA: &str = "PRIORITIZE_VISA";
pub const STAGE_PENDING_COC: &str = "Pending COC";
pub const STAGE_PENDING_EXIT_PERMIT: &str = "Pending Exit Permit";

/// One normalized worker row. Every rule predicate reads from this shape only.
///
/// Day counts stay fractional so the range predicates compare exactly the way
/// the uploaded sheets express them; `None` means the cell was blank or not a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerRecord {
    pub request_id: RequestId,
    pub name: String,
    pub nationality: String,
    pub worker_type: Option<WorkerType>,
    pub gender: Option<Gender>,
    pub docs_status: DocsStatus,
    pub outcome: Option<String>,
    /// `Some(true)` for "Yes", `Some(false)` for "No", `None` when blank.
    pub live_out: Option<bool>,
    pub housemaid_status: Option<String>,
    pub days_in_table: Option<f64>,
    pub flight_in_days: Option<f64>,
    pub last_day_in_country: Option<f64>,
    pub client_note: Option<String>,
    pub stage_in_operator_page: Option<String>,
    pub attested_gcc: bool,
    pub mfa: bool,
    pub gcc: bool,
    /// Tri-state like `live_out`; only an explicit "No" takes part in reports.
    pub payment_added: Option<bool>,
    pub has_offer: bool,
    pub priority_number: Option<u32>,
    pub priority_name: Option<String>,
}

impl WorkerRecord {
    /// Bare record carrying only the identity columns, with no payment added.
    pub fn new(request_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            request_id: RequestId(request_id.into()),
            name: name.into(),
            nationality: String::new(),
            worker_type: None,
            gender: None,
            docs_status: DocsStatus::Unknown,
            outcome: None,
            live_out: None,
            housemaid_status: None,
            days_in_table: None,
            flight_in_days: None,
            last_day_in_country: None,
            client_note: None,
            stage_in_operator_page: None,
            attested_gcc: false,
            mfa: false,
            gcc: false,
            payment_added: Some(false),
            has_offer: false,
            priority_number: None,
            priority_name: None,
        }
    }

    pub fn is_type(&self, worker_type: WorkerType) -> bool {
        self.worker_type == Some(worker_type)
    }

    pub fn is_nationality(&self, nationality: &str) -> bool {
        self.nationality == nationality
    }

    pub fn landed_in_dubai(&self) -> bool {
        self.housemaid_status.as_deref() == Some(LANDED_IN_DUBAI)
    }

    pub fn awaits_payment(&self) -> bool {
        self.payment_added == Some(false)
    }

    pub fn lives_in(&self) -> bool {
        self.live_out == Some(false)
    }

    pub fn lives_out(&self) -> bool {
        self.live_out == Some(true)
    }

    pub fn is_lawp(&self) -> bool {
        self.outcome.as_deref() == Some(OUTCOME_LAWP)
    }

    pub fn has_client_note(&self, note: &str) -> bool {
        self.client_note.as_deref() == Some(note)
    }

    pub fn at_stage(&self, stage: &str) -> bool {
        self.stage_in_operator_page.as_deref() == Some(stage)
    }
}
