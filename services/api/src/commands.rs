use crate::infra::parse_report_kind;
use clap::Args;
use maid_priority::config::AppConfig;
use maid_priority::error::AppError;
use maid_priority::workflows::distribution::{CsvDirectoryWriter, DistributionSummary};
use maid_priority::workflows::intake;
use maid_priority::workflows::ledger::{read_ledgers_from_dir, MergeOutcome};
use maid_priority::workflows::operations::{Destinations, PriorityOperationsService};
use maid_priority::workflows::priorities::{ReportKind, ReportStatistics};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

type CliService = PriorityOperationsService<CsvDirectoryWriter>;

#[derive(Args, Debug, Default)]
pub(crate) struct OutputArgs {
    /// Directory receiving the written sheets (defaults to APP_OUTPUT_DIR)
    #[arg(long)]
    pub(crate) output_dir: Option<PathBuf>,
    /// Print the result as JSON instead of a text summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DestinationArgs {
    /// Number of PC_n destination sheets (defaults to the configured count)
    #[arg(long)]
    pub(crate) destinations: Option<usize>,
    /// Comma separated destination sheet names; overrides --destinations
    #[arg(long, value_delimiter = ',')]
    pub(crate) names: Vec<String>,
}

impl DestinationArgs {
    fn resolve(&self) -> Destinations {
        if self.names.is_empty() {
            Destinations {
                count: self.destinations,
                names: None,
            }
        } else {
            Destinations::named(self.names.iter().cloned())
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// Worker table exported as CSV
    #[arg(long)]
    pub(crate) workers: PathBuf,
    /// Report variant: combined, lawp, non-lawp, or top-priorities
    #[arg(long, default_value = "combined", value_parser = parse_report_kind)]
    pub(crate) kind: ReportKind,
    #[command(flatten)]
    pub(crate) output: OutputArgs,
}

#[derive(Args, Debug)]
pub(crate) struct StatsArgs {
    /// Table carrying a `Priority number` column
    #[arg(long)]
    pub(crate) prioritized: PathBuf,
    /// Print the result as JSON instead of a text table
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct QuotaArgs {
    /// Table carrying a `Priority number` column
    #[arg(long)]
    pub(crate) prioritized: PathBuf,
    #[command(flatten)]
    pub(crate) destinations: DestinationArgs,
    #[command(flatten)]
    pub(crate) output: OutputArgs,
}

#[derive(Args, Debug)]
pub(crate) struct ReplacementArgs {
    /// Table carrying a `Priority number` column
    #[arg(long)]
    pub(crate) prioritized: PathBuf,
    /// Cancelled employees available as replacements
    #[arg(long)]
    pub(crate) pool: PathBuf,
    #[command(flatten)]
    pub(crate) destinations: DestinationArgs,
    #[command(flatten)]
    pub(crate) output: OutputArgs,
}

#[derive(Args, Debug)]
pub(crate) struct LinksArgs {
    /// CSV with a `Login link` column, or a text file with one link per line
    #[arg(long)]
    pub(crate) links: PathBuf,
    #[command(flatten)]
    pub(crate) destinations: DestinationArgs,
    #[command(flatten)]
    pub(crate) output: OutputArgs,
}

#[derive(Args, Debug)]
pub(crate) struct MergeArgs {
    /// Directory holding the current Accepted.csv and Rejected.csv ledgers
    #[arg(long)]
    pub(crate) ledger_dir: PathBuf,
    /// Companion table with docs status, type, gender, and offer flags
    #[arg(long)]
    pub(crate) all_maids: PathBuf,
    /// Workers to fold into the ledgers
    #[arg(long)]
    pub(crate) new_maids: PathBuf,
    /// Priority number given to merged rows (default 24)
    #[arg(long)]
    pub(crate) priority_number: Option<u32>,
    /// Priority name given to merged rows (default "new")
    #[arg(long)]
    pub(crate) priority_name: Option<String>,
    /// Row cap per ledger after merging; 0 keeps every row
    #[arg(long)]
    pub(crate) max_rows: Option<usize>,
    #[command(flatten)]
    pub(crate) output: OutputArgs,
}

#[derive(Debug, Serialize)]
struct SheetCount<'a> {
    name: &'a str,
    rows: usize,
}

#[derive(Debug, Serialize)]
struct ReportSummary<'a> {
    kind: ReportKind,
    output_dir: &'a Path,
    sheets: Vec<SheetCount<'a>>,
    statistics: &'a ReportStatistics,
}

#[derive(Debug, Serialize)]
struct MergeSummary<'a> {
    output_dir: &'a Path,
    accepted_rows: usize,
    rejected_rows: usize,
    outcome: &'a MergeOutcome,
}

pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let ReportArgs {
        workers,
        kind,
        output,
    } = args;

    let service = load_service(output.output_dir)?;
    let report = service.report(&read_table(&workers)?, kind)?;

    if output.json {
        let summary = ReportSummary {
            kind: report.kind,
            output_dir: service.sheets().directory(),
            sheets: report
                .sheets
                .iter()
                .map(|sheet| SheetCount {
                    name: &sheet.name,
                    rows: sheet.records.len(),
                })
                .collect(),
            statistics: &report.statistics,
        };
        return print_json(&summary);
    }

    println!(
        "Priority report ({}) written to {}",
        report.kind.label(),
        service.sheets().directory().display()
    );
    for sheet in &report.sheets {
        println!("  {:<32} {:>5} rows", sheet.name, sheet.records.len());
    }

    println!("\nWorkers per priority (accepted + rejected)");
    for row in report
        .statistics
        .total
        .rows
        .iter()
        .filter(|row| row.counts.total > 0)
    {
        println!(
            "  {:>2} {:<48} {:>4} female {:>4} male",
            row.priority_number, row.priority_name, row.counts.females, row.counts.males
        );
    }
    let total = report.statistics.total.total();
    println!(
        "  total: {} ({} female, {} male)",
        total.total, total.females, total.males
    );
    Ok(())
}

pub(crate) fn run_stats(args: StatsArgs) -> Result<(), AppError> {
    let service = load_service(None)?;
    let breakdown = service.breakdown(&read_table(&args.prioritized)?)?;

    if args.json {
        return print_json(&breakdown);
    }

    println!("{:<22} {:>8} {:>8} {:>6}", "Category", "Approved", "Rejected", "Total");
    for row in &breakdown.rows {
        println!(
            "{:<22} {:>8} {:>8} {:>6}",
            row.category, row.counts.approved, row.counts.rejected, row.counts.total
        );
    }
    Ok(())
}

pub(crate) fn run_quota(args: QuotaArgs) -> Result<(), AppError> {
    let service = load_service(args.output.output_dir)?;
    let summary = service.quota(
        &read_table(&args.prioritized)?,
        &args.destinations.resolve(),
    )?;

    if args.output.json {
        return print_json(&summary);
    }
    render_summary("Quota distribution", &service, &summary);
    Ok(())
}

pub(crate) fn run_replacement(args: ReplacementArgs) -> Result<(), AppError> {
    let service = load_service(args.output.output_dir)?;
    let run = service.replacement(
        &read_table(&args.prioritized)?,
        &read_table(&args.pool)?,
        &args.destinations.resolve(),
    )?;

    if args.output.json {
        return print_json(&run);
    }
    render_summary("Replacement distribution", &service, &run.summary);
    println!(
        "  unmatched workers: {}, unused candidates: {}",
        run.unmatched, run.unused_candidates
    );
    Ok(())
}

pub(crate) fn run_links(args: LinksArgs) -> Result<(), AppError> {
    let service = load_service(args.output.output_dir)?;
    let links = read_links(&args.links)?;
    let summary = service.links(&links, &args.destinations.resolve())?;

    if args.output.json {
        return print_json(&summary);
    }
    render_summary("Link distribution", &service, &summary);
    Ok(())
}

pub(crate) fn run_merge(args: MergeArgs) -> Result<(), AppError> {
    let MergeArgs {
        ledger_dir,
        all_maids,
        new_maids,
        priority_number,
        priority_name,
        max_rows,
        output,
    } = args;

    let service = load_service(output.output_dir)?;
    let (accepted, rejected) = read_ledgers_from_dir(&ledger_dir)?;
    let options = service.merge_options(priority_number, priority_name.as_deref(), max_rows);
    let merged = service.merge_ledgers(
        accepted,
        rejected,
        &read_table(&all_maids)?,
        &read_table(&new_maids)?,
        &options,
    )?;

    if output.json {
        return print_json(&MergeSummary {
            output_dir: service.sheets().directory(),
            accepted_rows: merged.accepted.len(),
            rejected_rows: merged.rejected.len(),
            outcome: &merged.outcome,
        });
    }

    let outcome = &merged.outcome;
    println!(
        "Ledgers written to {} (accepted {}, rejected {})",
        service.sheets().directory().display(),
        merged.accepted.len(),
        merged.rejected.len()
    );
    println!(
        "  inserted {}, moved {}, renamed {}",
        outcome.inserted, outcome.moved, outcome.renamed
    );
    println!(
        "  skipped {}: {} not in the companion table, {} with an offer, {} unclassified",
        outcome.skipped(),
        outcome.skipped_lookup_miss,
        outcome.skipped_offer,
        outcome.skipped_unclassified
    );
    if outcome.truncated > 0 {
        println!("  dropped {} rows past the row cap", outcome.truncated);
    }
    Ok(())
}

fn load_service(output_dir: Option<PathBuf>) -> Result<CliService, AppError> {
    let mut config = AppConfig::load()?;
    if let Some(directory) = output_dir {
        config.output_dir = directory;
    }
    let sheets = Arc::new(CsvDirectoryWriter::new(config.output_dir.clone()));
    Ok(PriorityOperationsService::from_config(sheets, &config))
}

fn read_table(path: &Path) -> Result<String, AppError> {
    Ok(fs::read_to_string(path)?)
}

fn read_links(path: &Path) -> Result<Vec<String>, AppError> {
    let is_csv = path
        .extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| extension.eq_ignore_ascii_case("csv"));
    if is_csv {
        Ok(intake::read_links(fs::File::open(path)?)?)
    } else {
        Ok(intake::parse_link_lines(&read_table(path)?))
    }
}

fn render_summary(title: &str, service: &CliService, summary: &DistributionSummary) {
    println!(
        "{title}: {} rows across {} sheets in {} (average {:.1})",
        summary.total,
        summary.destinations.len(),
        service.sheets().directory().display(),
        summary.average_per_destination
    );
    for destination in &summary.destinations {
        println!("  {:<16} {:>5} rows", destination.name, destination.rows);
    }
    if !summary.by_priority.is_empty() {
        println!("  per priority:");
        for (priority, count) in &summary.by_priority {
            println!("    {priority:>2}: {count}");
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    let rendered = serde_json::to_string_pretty(value).map_err(std::io::Error::from)?;
    println!("{rendered}");
    Ok(())
}
