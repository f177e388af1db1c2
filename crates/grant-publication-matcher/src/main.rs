//! Grant Publication Matcher - Entry Point
//!
//! Looks up funders and publications for grant identifiers, one at a time or
//! in batch from a CSV file or spreadsheet, and writes the matches as CSV, JSON or Markdown.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use grant_publication_matcher::{
    Config, OpenAlexClient,
    export::write_results,
    formatters::{OutputFormat, format_funders_markdown, format_warnings_markdown},
    input::{DEFAULT_COLUMN, load_grant_ids, trim_grant_id},
    pipeline::{BatchReport, ByFunderId, ByIndex, FunderSelector, Pipeline, PromptSelector, Progress},
};

#[derive(Parser, Debug)]
#[command(name = "grant-matcher")]
#[command(about = "Match research grant IDs to publications via OpenAlex")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Contact email for the OpenAlex polite pool (default: $OPENALEX_MAILTO)
    #[arg(long, global = true)]
    mailto: Option<String>,

    /// OpenAlex API base URL (default: $OPENALEX_API_URL or https://api.openalex.org)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Delay between API calls in milliseconds
    #[arg(long, global = true)]
    delay_ms: Option<u64>,

    /// Request timeout in seconds (default: none)
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    /// Write results to this file instead of stdout
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Output format (default: csv when writing a file, markdown on stdout)
    #[arg(short, long, global = true, value_enum)]
    format: Option<OutputFormat>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn", env = "RUST_LOG")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the funders associated with a grant ID
    Funders {
        /// Grant ID to resolve
        grant_id: String,
    },

    /// Fetch publications for one grant ID and a selected funder
    Fetch {
        /// Grant ID to look up
        grant_id: String,

        /// Select the funder with this OpenAlex ID
        #[arg(long, conflicts_with = "choice")]
        funder_id: Option<String>,

        /// Select the N-th funder (1-based, as listed by `funders`)
        #[arg(long)]
        choice: Option<usize>,
    },

    /// Fetch publications for every grant ID in a CSV or Excel file, across all funders
    Batch {
        /// CSV or workbook (.xlsx, .xls, .ods) with a header row
        file: PathBuf,

        /// Column holding grant IDs (comma-separated values allowed per cell)
        #[arg(long, default_value = DEFAULT_COLUMN)]
        column: String,

        /// Maximum distinct grant IDs accepted
        #[arg(long)]
        max_grant_ids: Option<usize>,
    },
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber
            .with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().compact().with_writer(io::stderr))
            .init();
    }
}

fn build_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = Config::from_env()?;

    if let Some(ref mailto) = cli.mailto {
        config.mailto = Some(mailto.clone());
    }
    if let Some(ref url) = cli.api_url {
        config.api_url.clone_from(url);
    }
    if let Some(ms) = cli.delay_ms {
        config.rate_limit_delay = Duration::from_millis(ms);
    }
    if let Some(secs) = cli.timeout_secs {
        config.request_timeout = Some(Duration::from_secs(secs));
    }
    if let Command::Batch { max_grant_ids: Some(max), .. } = cli.command {
        config.max_grant_ids = max;
    }

    Ok(config)
}

fn print_progress(progress: Progress) {
    eprint!(
        "\rProgress: {:>3.0}% ({}/{})",
        progress.fraction() * 100.0,
        progress.completed,
        progress.total
    );
    if progress.completed >= progress.total {
        eprintln!();
    }
}

fn emit(cli: &Cli, report: &BatchReport) -> anyhow::Result<()> {
    if !report.warnings.is_empty() {
        eprint!("Warnings:\n{}", format_warnings_markdown(&report.warnings));
    }

    match cli.output {
        Some(ref path) => {
            let format = cli.format.unwrap_or(OutputFormat::Csv);
            let file = BufWriter::new(File::create(path)?);
            write_results(&report.results, format, file)?;
            eprintln!(
                "Wrote {} publications to {}",
                report.results.publication_count(),
                path.display()
            );
        }
        None => {
            let format = cli.format.unwrap_or_default();
            let stdout = io::stdout().lock();
            write_results(&report.results, format, stdout)?;
        }
    }

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json_logs);

    let config = build_config(&cli)?;
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        api_url = %config.api_url,
        polite_pool = config.has_mailto(),
        "Starting grant publication matcher"
    );

    let pipeline = Pipeline::new(OpenAlexClient::new(&config)?, &config);

    match cli.command {
        Command::Funders { ref grant_id } => {
            let grant_id = trim_grant_id(grant_id)?;

            let lookup = pipeline.resolve_funders(grant_id).await;
            if let Some(ref warning) = lookup.warning {
                eprintln!("Warning: {warning}");
            }
            let mut stdout = io::stdout().lock();
            stdout.write_all(format_funders_markdown(grant_id, &lookup.items).as_bytes())?;
        }
        Command::Fetch { ref grant_id, ref funder_id, choice } => {
            let mut selector: Box<dyn FunderSelector> = match (funder_id, choice) {
                (Some(id), _) => Box::new(ByFunderId(id.clone())),
                (None, Some(n)) => Box::new(ByIndex(n)),
                (None, None) => Box::new(PromptSelector::stdio()),
            };
            let report = pipeline.run_manual(grant_id, selector.as_mut()).await?;
            if report.results.is_empty() && report.warnings.is_empty() && report.pairs_processed == 0 {
                eprintln!("No funders found for Grant ID {}", grant_id.trim());
            }
            emit(&cli, &report)?;
        }
        Command::Batch { ref file, ref column, .. } => {
            let grant_ids = load_grant_ids(file, column, config.max_grant_ids)?;
            eprintln!("Processing {} unique Grant IDs", grant_ids.len());

            let report = pipeline.run_batch(&grant_ids, print_progress).await;
            emit(&cli, &report)?;
        }
    }

    Ok(())
}
