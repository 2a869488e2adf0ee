use anyhow::{Context, Result};
use clap::Parser;
use compute::TransferGraph;
use data::CommitteeDirectory;
use read::{read_committees, read_transfers};
use std::path::PathBuf;
use tracing::info;
use write::write_report;

mod compute;
mod data;
mod read;
mod write;

/// Counts, for every committee that gave money to another committee, how many
/// distinct committees it gave to and how many distinct committees gave to it.
#[derive(Parser, Debug)]
struct Args {
    /// The file containing the committee to committee transactions (PAC to PAC
    /// transactions), often something like 'itoth.txt'
    #[arg(long, env = "PAC2PAC_COMM2COMM")]
    comm2comm: PathBuf,
    /// The file containing the list of all committees and their information
    /// (a.k.a. the 'Committee master'), often something like 'cm.txt'
    #[arg(long, env = "PAC2PAC_COMM")]
    comm: PathBuf,
    /// Only report committees that sent to more than this many distinct
    /// committees; a negative value picks the default of 100
    #[arg(long, allow_negative_numbers = true)]
    high_traffic: Option<i64>,
    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    log_level: String,
}

/// Logs go to stderr, stdout is reserved for the CSV report.
fn init_logging(level: &str) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);

    let directory = CommitteeDirectory::from_committees(
        read_committees(&args.comm).context("unable to parse comm file (from --comm)")?,
    );
    info!("Committee master has {} committees", directory.len());

    let transfers = read_transfers(&args.comm2comm)
        .context("unable to parse comm2comm file (from --comm2comm)")?;
    let graph = TransferGraph::build(transfers);
    info!(
        "Graph has {} senders and {} receivers",
        graph.outgoing.len(),
        graph.incoming.len()
    );

    let rows = match args.high_traffic {
        Some(lower_limit) => graph.high_traffic_stats(lower_limit, &directory),
        None => graph.sender_stats(&directory),
    };
    write_report(std::io::stdout().lock(), &rows)?;
    Ok(())
}
