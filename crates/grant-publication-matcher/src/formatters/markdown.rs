//! Markdown output formatting.

use std::collections::BTreeSet;

use crate::models::{FunderCandidate, PublicationRecord, ResultSet};
use crate::pipeline::Warning;

/// Format the result set grouped by grant/funder.
#[must_use]
pub fn format_results_markdown(results: &ResultSet) -> String {
    if results.is_empty() {
        return "No publications found.\n".to_string();
    }

    let mut output = format!("# Publications Found ({} results)\n\n", results.publication_count());

    for entry in results.entries() {
        output.push_str(&format!("## Grant ID: {} (Funder: {})\n\n", entry.grant_id, entry.funder.name));
        for publication in &entry.publications {
            output.push_str(&format_publication_markdown(publication));
            output.push('\n');
        }
    }

    output
}

/// Format a single publication.
#[must_use]
pub fn format_publication_markdown(publication: &PublicationRecord) -> String {
    let mut output = format!("### {} ({})\n\n", publication.title, publication.publication_year);

    match publication.doi_url() {
        Some(url) => output.push_str(&format!("- **DOI**: [{url}]({url})\n")),
        None => output.push_str(&format!("- **DOI**: {}\n", publication.doi)),
    }
    output.push_str(&format!("- **Authors**: {}\n", publication.authors));
    output.push_str(&format!("- **Institutions**: {}\n", publication.institutions));
    output.push_str(&format!("- **Funder**: {}\n", publication.funder_display_name));

    output
}

/// Format the funder candidates for a grant identifier as a numbered list.
#[must_use]
pub fn format_funders_markdown(grant_id: &str, funders: &BTreeSet<FunderCandidate>) -> String {
    if funders.is_empty() {
        return format!("No funders found for Grant ID {grant_id}.\n");
    }

    let mut output = format!("# Funders for Grant ID {grant_id}\n\n");
    for (i, funder) in funders.iter().enumerate() {
        output.push_str(&format!("{}. {} (`{}`)\n", i + 1, funder.name, funder.id));
    }
    output
}

/// Format surfaced warnings, one bullet each.
#[must_use]
pub fn format_warnings_markdown(warnings: &[Warning]) -> String {
    warnings.iter().map(|w| format!("- {w}\n")).collect()
}
