//! Funder resolution: which funders does the API associate with a grant identifier?

use std::collections::BTreeSet;

use super::{Lookup, Warning};
use crate::client::OpenAlexClient;
use crate::models::{FunderCandidate, WorksResponse};

/// Resolve the distinct funders co-occurring with `grant_id`.
///
/// `grant_id` must already be trimmed. Failures yield an empty set and a warning.
pub async fn resolve_funders(
    client: &OpenAlexClient,
    grant_id: &str,
) -> Lookup<BTreeSet<FunderCandidate>> {
    match client.works_by_grant(grant_id).await {
        Ok(response) => {
            let funders = extract_funders(&response, grant_id);
            tracing::info!(
                grant_id,
                works = response.results.len(),
                funders = funders.len(),
                "Resolved funders"
            );
            Lookup::found(funders)
        }
        Err(e) => Lookup::failed(Warning::funders(grant_id, &e)),
    }
}

/// Collect (name, id) pairs from grant annotations whose award identifier
/// equals `grant_id` exactly.
///
/// Annotations with an empty funder name or no funder id are skipped.
#[must_use]
pub fn extract_funders(response: &WorksResponse, grant_id: &str) -> BTreeSet<FunderCandidate> {
    response
        .results
        .iter()
        .flat_map(|work| work.grants.iter())
        .filter(|grant| grant.award_id.as_deref() == Some(grant_id))
        .filter_map(|grant| {
            let name = grant.funder_display_name.as_deref().filter(|n| !n.is_empty())?;
            let id = grant.funder.as_deref()?;
            Some(FunderCandidate::new(name, id))
        })
        .collect()
}
