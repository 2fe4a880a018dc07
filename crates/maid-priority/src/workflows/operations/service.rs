use std::io::Cursor;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::{AppConfig, DistributionSettings, LedgerSettings};
use crate::workflows::distribution::{
    link_distribution, pc_names, quota_distribution, replacement_distribution,
    write_distribution, write_rows, Distribution, DistributionError, DistributionSummary,
    NationalityRules, QuotaRow, ReplacementDistribution, ReplacementMatcher, ReplacementPool,
    SheetTable, SheetWriteError, SheetWriter,
};
use crate::workflows::intake::{self, IntakeError};
use crate::workflows::ledger::{
    merge, CompanionIndex, Ledger, LedgerError, LedgerSide, MergeOptions, MergedLedgers,
};
use crate::workflows::priorities::{
    ApprovalBreakdown, PriorityClassifier, PriorityReport, ReportKind,
};

/// Where a distribution run places its rows: explicit sheet names win over a count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Destinations {
    #[serde(default)]
    pub count: Option<usize>,
    #[serde(default)]
    pub names: Option<Vec<String>>,
}

impl Destinations {
    pub fn with_count(count: usize) -> Self {
        Self {
            count: Some(count),
            names: None,
        }
    }

    pub fn named<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            count: None,
            names: Some(names.into_iter().map(Into::into).collect()),
        }
    }

    fn resolve(&self, default_count: usize) -> Vec<String> {
        match &self.names {
            Some(names) => names
                .iter()
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty())
                .collect(),
            None => pc_names(self.count.unwrap_or(default_count)),
        }
    }
}

/// Uploaded tables for a ledger merge, as CSV text.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MergeInput {
    pub accepted_csv: Option<String>,
    pub rejected_csv: Option<String>,
    pub all_maids_csv: String,
    pub new_maids_csv: String,
    #[serde(default)]
    pub priority_number: Option<u32>,
    #[serde(default)]
    pub priority_name: Option<String>,
    #[serde(default)]
    pub max_rows: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplacementRun {
    pub summary: DistributionSummary,
    pub unmatched: usize,
    pub unused_candidates: usize,
}

/// Glue between uploaded tables, the priority engine, and the sheet sink.
pub struct PriorityOperationsService<W> {
    classifier: Arc<PriorityClassifier>,
    matcher: Arc<ReplacementMatcher>,
    sheets: Arc<W>,
    distribution: DistributionSettings,
    ledger: LedgerSettings,
}

impl<W> PriorityOperationsService<W>
where
    W: SheetWriter + 'static,
{
    pub fn new(sheets: Arc<W>, classifier: PriorityClassifier) -> Self {
        Self {
            classifier: Arc::new(classifier),
            matcher: Arc::new(ReplacementMatcher::new(NationalityRules::standard())),
            sheets,
            distribution: DistributionSettings::default(),
            ledger: LedgerSettings::default(),
        }
    }

    pub fn from_config(sheets: Arc<W>, config: &AppConfig) -> Self {
        Self::new(sheets, config.priorities.classifier())
            .with_distribution(config.distribution)
            .with_ledger(config.ledger)
    }

    pub fn with_matcher(mut self, matcher: ReplacementMatcher) -> Self {
        self.matcher = Arc::new(matcher);
        self
    }

    pub fn with_distribution(mut self, settings: DistributionSettings) -> Self {
        self.distribution = settings;
        self
    }

    pub fn with_ledger(mut self, settings: LedgerSettings) -> Self {
        self.ledger = settings;
        self
    }

    pub fn classifier(&self) -> &PriorityClassifier {
        &self.classifier
    }

    pub fn sheets(&self) -> &W {
        &self.sheets
    }

    /// Classify an uploaded worker table and write every report sheet.
    pub fn report(
        &self,
        workers_csv: &str,
        kind: ReportKind,
    ) -> Result<PriorityReport, OperationsError> {
        let records = intake::read_workers(Cursor::new(workers_csv))?;
        let report = self.classifier.report(&records, kind);
        for sheet in &report.sheets {
            write_rows(self.sheets.as_ref(), &sheet.name, &sheet.records)?;
        }
        Ok(report)
    }

    /// Approval breakdown of a table that already carries priority numbers.
    pub fn breakdown(&self, prioritized_csv: &str) -> Result<ApprovalBreakdown, OperationsError> {
        let records = intake::read_prioritized_workers(Cursor::new(prioritized_csv), "breakdown")?;
        Ok(ApprovalBreakdown::aggregate(&records))
    }

    pub fn quota(
        &self,
        prioritized_csv: &str,
        destinations: &Destinations,
    ) -> Result<DistributionSummary, OperationsError> {
        let names = destinations.resolve(self.distribution.quota_destinations);
        let records = intake::read_prioritized_workers(Cursor::new(prioritized_csv), "quota")?;
        let distribution: Distribution<QuotaRow> = quota_distribution(&records, names)?;
        write_distribution(self.sheets.as_ref(), &distribution)?;
        Ok(DistributionSummary::of(&distribution))
    }

    pub fn replacement(
        &self,
        prioritized_csv: &str,
        pool_csv: &str,
        destinations: &Destinations,
    ) -> Result<ReplacementRun, OperationsError> {
        let names = destinations.resolve(self.distribution.replacement_destinations);
        let records =
            intake::read_prioritized_workers(Cursor::new(prioritized_csv), "replacement")?;
        let mut pool = ReplacementPool::new(intake::read_replacement_pool(Cursor::new(pool_csv))?);

        let ReplacementDistribution {
            distribution,
            unmatched,
            unused_candidates,
        } = replacement_distribution(&records, &mut pool, &self.matcher, names)?;
        write_distribution(self.sheets.as_ref(), &distribution)?;

        Ok(ReplacementRun {
            summary: DistributionSummary::of(&distribution),
            unmatched,
            unused_candidates,
        })
    }

    pub fn links(
        &self,
        links: &[String],
        destinations: &Destinations,
    ) -> Result<DistributionSummary, OperationsError> {
        let names = destinations.resolve(self.distribution.quota_destinations);
        let distribution = link_distribution(links, names)?;
        write_distribution(self.sheets.as_ref(), &distribution)?;
        Ok(DistributionSummary::counts_only(&distribution))
    }

    /// Merge new workers into the stored ledgers. Every table is parsed before any
    /// sheet is written, so a bad upload leaves the stored ledgers untouched.
    pub fn merge(&self, input: &MergeInput) -> Result<MergedLedgers, OperationsError> {
        let accepted = load_ledger(input.accepted_csv.as_deref(), LedgerSide::Accepted)?;
        let rejected = load_ledger(input.rejected_csv.as_deref(), LedgerSide::Rejected)?;
        let options = self.merge_options(
            input.priority_number,
            input.priority_name.as_deref(),
            input.max_rows,
        );
        self.merge_ledgers(
            accepted,
            rejected,
            &input.all_maids_csv,
            &input.new_maids_csv,
            &options,
        )
    }

    /// Merge options with the configured row cap unless `max_rows` overrides it.
    pub fn merge_options(
        &self,
        priority_number: Option<u32>,
        priority_name: Option<&str>,
        max_rows: Option<usize>,
    ) -> MergeOptions {
        MergeOptions::new(
            priority_number,
            priority_name,
            max_rows.unwrap_or(self.ledger.max_rows),
        )
    }

    pub fn merge_ledgers(
        &self,
        accepted: Ledger,
        rejected: Ledger,
        all_maids_csv: &str,
        new_maids_csv: &str,
        options: &MergeOptions,
    ) -> Result<MergedLedgers, OperationsError> {
        let companions =
            CompanionIndex::from_records(intake::read_workers(Cursor::new(all_maids_csv))?);
        let batch = intake::read_workers(Cursor::new(new_maids_csv))?;
        let merged = merge(accepted, rejected, batch, &companions, options);

        let sheets = LedgerSide::ordered()
            .map(|side| SheetTable::of(side.label(), merged.ledger(side).rows()));
        self.sheets.write_sheets(&sheets)?;
        info!(
            accepted = merged.accepted.len(),
            rejected = merged.rejected.len(),
            "ledger sheets written"
        );
        Ok(merged)
    }
}

fn load_ledger(csv: Option<&str>, side: LedgerSide) -> Result<Ledger, LedgerError> {
    let csv = csv.ok_or_else(|| LedgerError::MissingSheet(side.label().to_string()))?;
    Ledger::read(Cursor::new(csv), side)
}

/// Error raised by the operations service.
#[derive(Debug, thiserror::Error)]
pub enum OperationsError {
    #[error(transparent)]
    Intake(#[from] IntakeError),
    #[error(transparent)]
    Distribution(#[from] DistributionError),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Sheet(#[from] SheetWriteError),
}
