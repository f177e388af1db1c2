//! Grant → funder → publication resolution pipeline.
//!
//! Each stage makes exactly one API call and never fails past its caller:
//! transport errors, non-success statuses and malformed bodies turn into an
//! empty result plus a [`Warning`].

mod batch;
mod funders;
mod publications;
mod selection;

pub use batch::{BatchReport, Pipeline, Progress};
pub use funders::{extract_funders, resolve_funders};
pub use publications::{fetch_publications, project_publications};
pub use selection::{ByFunderId, ByIndex, FunderSelector, PromptSelector};

use std::fmt;

use serde::Serialize;

use crate::error::ClientError;

/// A lookup failure surfaced to the operator. Processing continues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Warning {
    /// Grant identifier being processed.
    pub grant_id: String,

    /// Funder name, for publication lookups.
    pub funder: Option<String>,

    /// Underlying error message.
    pub message: String,
}

impl Warning {
    fn funders(grant_id: &str, error: &ClientError) -> Self {
        Self { grant_id: grant_id.to_string(), funder: None, message: error.to_string() }
    }

    fn publications(grant_id: &str, funder_name: &str, error: &ClientError) -> Self {
        Self {
            grant_id: grant_id.to_string(),
            funder: Some(funder_name.to_string()),
            message: error.to_string(),
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.funder {
            None => write!(
                f,
                "Failed to fetch funders for Grant ID {} from OpenAlex: {}",
                self.grant_id, self.message
            ),
            Some(funder) => write!(
                f,
                "Failed to fetch publications for Grant ID {} and Funder {} from OpenAlex: {}",
                self.grant_id, funder, self.message
            ),
        }
    }
}

/// Result of one pipeline stage: the items found, and a warning if the call failed.
///
/// A failed call always carries empty items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lookup<T> {
    /// Items found (empty on failure).
    pub items: T,

    /// Present if the API call failed.
    pub warning: Option<Warning>,
}

impl<T: Default> Lookup<T> {
    fn found(items: T) -> Self {
        Self { items, warning: None }
    }

    fn failed(warning: Warning) -> Self {
        tracing::warn!(
            grant_id = %warning.grant_id,
            funder = ?warning.funder,
            error = %warning.message,
            "OpenAlex lookup failed"
        );
        Self { items: T::default(), warning: Some(warning) }
    }

    /// True if the API call failed.
    #[must_use]
    pub fn is_failed(&self) -> bool {
        self.warning.is_some()
    }

    /// Split into items and optional warning.
    #[must_use]
    pub fn into_parts(self) -> (T, Option<Warning>) {
        (self.items, self.warning)
    }
}
