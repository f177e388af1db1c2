//! Batch and manual orchestration of the resolve-then-fetch pipeline.

use std::collections::BTreeSet;
use std::time::Duration;

use serde::Serialize;

use super::{FunderSelector, Lookup, Warning, fetch_publications, resolve_funders};
use crate::client::OpenAlexClient;
use crate::config::Config;
use crate::error::{InputError, InputResult};
use crate::input::{GrantIdSet, trim_grant_id};
use crate::models::{FunderCandidate, PublicationRecord, ResultSet};

/// Coarse progress through the grant/funder pairs of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Pairs processed so far.
    pub completed: usize,
    /// Total pairs in the batch.
    pub total: usize,
}

impl Progress {
    /// Completed fraction in `[0, 1]`. An empty batch counts as done.
    #[must_use]
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 1.0;
        }
        (self.completed as f64 / self.total as f64).min(1.0)
    }
}

/// Outcome of a run: everything found, and every surfaced warning.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    /// Non-empty results in processing order.
    pub results: ResultSet,

    /// Lookup failures, in the order they occurred.
    pub warnings: Vec<Warning>,

    /// Grant/funder pairs for which publications were requested.
    pub pairs_processed: usize,
}

impl BatchReport {
    fn note<T>(&mut self, lookup: Lookup<T>) -> T
    where
        T: Default,
    {
        let (items, warning) = lookup.into_parts();
        self.warnings.extend(warning);
        items
    }
}

/// Runs lookups sequentially against one client, pausing between API calls.
#[derive(Debug, Clone)]
pub struct Pipeline {
    client: OpenAlexClient,
    rate_limit_delay: Duration,
}

impl Pipeline {
    /// Create a pipeline with the configured courtesy delay.
    #[must_use]
    pub fn new(client: OpenAlexClient, config: &Config) -> Self {
        Self { client, rate_limit_delay: config.rate_limit_delay }
    }

    /// Resolve funders for one grant identifier.
    pub async fn resolve_funders(&self, grant_id: &str) -> Lookup<BTreeSet<FunderCandidate>> {
        resolve_funders(&self.client, grant_id).await
    }

    /// Fetch publications for one grant/funder pair.
    pub async fn fetch_publications(
        &self,
        grant_id: &str,
        funder: &FunderCandidate,
    ) -> Lookup<Vec<PublicationRecord>> {
        fetch_publications(&self.client, grant_id, &funder.id, &funder.name).await
    }

    /// Process every grant identifier against every funder resolved for it.
    ///
    /// Funders are resolved for all identifiers first, so progress can be
    /// reported over the exact number of pairs. No selector is consulted:
    /// every resolved funder is queried.
    pub async fn run_batch<P>(&self, grant_ids: &GrantIdSet, mut on_progress: P) -> BatchReport
    where
        P: FnMut(Progress),
    {
        let mut report = BatchReport::default();

        let mut pairs = Vec::new();
        for grant_id in grant_ids.iter() {
            let funders = report.note(self.resolve_funders(grant_id).await);
            if funders.is_empty() {
                tracing::info!(grant_id, "No funders found");
            }
            pairs.extend(funders.into_iter().map(|f| (grant_id, f)));
            self.pause().await;
        }

        let total = pairs.len();
        tracing::info!(grants = grant_ids.len(), pairs = total, "Fetching publications");
        on_progress(Progress { completed: 0, total });

        for (completed, (grant_id, funder)) in pairs.into_iter().enumerate() {
            let publications = report.note(self.fetch_publications(grant_id, &funder).await);
            report.results.push(grant_id, funder, publications);
            report.pairs_processed += 1;

            on_progress(Progress { completed: completed + 1, total });
            self.pause().await;
        }

        tracing::info!(
            entries = report.results.len(),
            publications = report.results.publication_count(),
            warnings = report.warnings.len(),
            "Batch complete"
        );
        report
    }

    /// Look up a single, operator-entered grant identifier.
    ///
    /// The selector picks one funder among the candidates; only that funder is
    /// queried. No candidates means an empty report, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::EmptyGrantId`] for a blank identifier and
    /// [`InputError::NoFunderSelected`] if the selector declines.
    pub async fn run_manual<S>(&self, grant_id: &str, selector: &mut S) -> InputResult<BatchReport>
    where
        S: FunderSelector + ?Sized,
    {
        let grant_id = trim_grant_id(grant_id)?;

        let mut report = BatchReport::default();
        let candidates = report.note(self.resolve_funders(grant_id).await);
        if candidates.is_empty() {
            tracing::info!(grant_id, "No funders found");
            return Ok(report);
        }

        let funder = selector
            .select(grant_id, &candidates)?
            .ok_or_else(|| InputError::NoFunderSelected { grant_id: grant_id.to_string() })?;
        tracing::info!(grant_id, funder = %funder, "Funder selected");

        let publications = report.note(self.fetch_publications(grant_id, &funder).await);
        report.results.push(grant_id, funder, publications);
        report.pairs_processed = 1;

        Ok(report)
    }

    async fn pause(&self) {
        if !self.rate_limit_delay.is_zero() {
            tokio::time::sleep(self.rate_limit_delay).await;
        }
    }
}
