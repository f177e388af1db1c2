//! Publication fetching for a grant/funder pair.

use super::{Lookup, Warning};
use crate::client::OpenAlexClient;
use crate::models::{PublicationRecord, WorksResponse};

/// Fetch works matching both `grant_id` and `funder_id`, normalized into records.
///
/// Every record is attributed to `funder_name`, whatever the response itself
/// reports. Failures yield an empty list and a warning.
pub async fn fetch_publications(
    client: &OpenAlexClient,
    grant_id: &str,
    funder_id: &str,
    funder_name: &str,
) -> Lookup<Vec<PublicationRecord>> {
    match client.works_by_grant_and_funder(grant_id, funder_id).await {
        Ok(response) => {
            let records = project_publications(&response, funder_name);
            tracing::info!(grant_id, funder = funder_name, publications = records.len(), "Fetched publications");
            Lookup::found(records)
        }
        Err(e) => Lookup::failed(Warning::publications(grant_id, funder_name, &e)),
    }
}

/// Project every work of a response into a record, in response order.
#[must_use]
pub fn project_publications(response: &WorksResponse, funder_name: &str) -> Vec<PublicationRecord> {
    response.results.iter().map(|work| PublicationRecord::from_work(work, funder_name)).collect()
}
