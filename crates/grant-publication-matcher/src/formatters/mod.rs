//! Human-readable output formatting.

mod markdown;

pub use markdown::{format_funders_markdown, format_results_markdown, format_warnings_markdown};

/// Output format for results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// One row per publication.
    Csv,
    /// Entries grouped per grant/funder.
    Json,
    /// Readable report.
    #[default]
    Markdown,
}
