//! Round-robin placement of prioritized records onto PC sheets, including the
//! replacement matching flow.

pub mod flows;
pub mod replacement;
pub mod round_robin;
pub mod sink;
pub mod summary;

pub use flows::{
    link_distribution, quota_distribution, replacement_distribution, LinkRow, QuotaRow,
    ReplacementDistribution, ReplacementRow,
};
pub use replacement::{
    CandidateIndex, NationalityRules, ReplacementCandidate, ReplacementMatcher, ReplacementPool,
};
pub use round_robin::{distribute, pc_names, Destination, Distribution, RoundRobin};
pub use sink::{
    write_distribution, write_rows, CsvDirectoryWriter, SheetTable, SheetWriteError, SheetWriter,
};
pub use summary::{DistributionSummary, Prioritized};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DistributionError {
    #[error("at least one destination is required")]
    NoDestinations,
}
