use crate::commands::{
    run_links, run_merge, run_quota, run_replacement, run_report, run_stats, LinksArgs,
    MergeArgs, QuotaArgs, ReplacementArgs, ReportArgs, StatsArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use maid_priority::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Housemaid Priority Engine",
    about = "Classify, distribute, and merge housemaid visa-processing tables",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Classify a worker table and write every priority report sheet
    Report(ReportArgs),
    /// Approved/rejected breakdown of a table that already carries priority numbers
    Stats(StatsArgs),
    /// Spread rows round-robin across destination sheets
    Distribute {
        #[command(subcommand)]
        command: DistributeCommand,
    },
    /// Merge new workers into the accepted and rejected ledgers
    Merge(MergeArgs),
}

#[derive(Subcommand, Debug)]
enum DistributeCommand {
    /// Prioritized workers in priority order
    Quota(QuotaArgs),
    /// Prioritized workers paired with replacement candidates
    Replacement(ReplacementArgs),
    /// Free-text login links
    Links(LinksArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Directory receiving the sheets written by HTTP requests
    #[arg(long)]
    pub(crate) output_dir: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Report(args) => run_report(args),
        Command::Stats(args) => run_stats(args),
        Command::Distribute { command } => match command {
            DistributeCommand::Quota(args) => run_quota(args),
            DistributeCommand::Replacement(args) => run_replacement(args),
            DistributeCommand::Links(args) => run_links(args),
        },
        Command::Merge(args) => run_merge(args),
    }
}
