//! Normalized pipeline output: funder candidates, publication records and the result set.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

use super::Work;
use crate::config::sentinels;

/// A funder associated with a grant identifier in the API data.
///
/// Equality and ordering cover the full (name, id) pair, so one funder with
/// two IDs, or two funders sharing a name, stay distinct.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FunderCandidate {
    /// Funder display name.
    pub name: String,

    /// Funder OpenAlex ID.
    pub id: String,
}

impl FunderCandidate {
    /// Create a new candidate.
    #[must_use]
    pub fn new(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self { name: name.into(), id: id.into() }
    }
}

impl fmt::Display for FunderCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// Publication year, or the "Unknown" sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PublicationYear {
    /// Year reported by the API.
    Known(i32),
    /// Year missing from the work.
    #[default]
    Unknown,
}

impl From<Option<i32>> for PublicationYear {
    fn from(year: Option<i32>) -> Self {
        year.map_or(Self::Unknown, Self::Known)
    }
}

impl fmt::Display for PublicationYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(year) => write!(f, "{year}"),
            Self::Unknown => f.write_str(sentinels::UNKNOWN),
        }
    }
}

impl Serialize for PublicationYear {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Known(year) => serializer.serialize_i32(*year),
            Self::Unknown => serializer.serialize_str(sentinels::UNKNOWN),
        }
    }
}

/// One scholarly work matched to a grant/funder pair.
///
/// Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicationRecord {
    /// DOI, or "N/A".
    pub doi: String,

    /// Title, or "Unknown Title".
    pub title: String,

    /// Author names in byline order, comma-joined.
    pub authors: String,

    /// The funder name used in the query, never taken from the response.
    pub funder_display_name: String,

    /// Publication year, or "Unknown".
    pub publication_year: PublicationYear,

    /// Distinct institution names across all authors, comma-joined.
    pub institutions: String,
}

impl PublicationRecord {
    /// Project a work into a record attributed to `funder_name`.
    #[must_use]
    pub fn from_work(work: &Work, funder_name: &str) -> Self {
        let authors = work
            .author_names()
            .map(|name| name.unwrap_or(sentinels::UNKNOWN))
            .collect::<Vec<_>>()
            .join(", ");

        let institutions = work
            .institution_names()
            .map(|name| name.unwrap_or(sentinels::UNKNOWN))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect::<Vec<_>>()
            .join(", ");

        Self {
            doi: work.doi.clone().unwrap_or_else(|| sentinels::DOI.to_string()),
            title: work.title.clone().unwrap_or_else(|| sentinels::TITLE.to_string()),
            authors,
            funder_display_name: funder_name.to_string(),
            publication_year: work.publication_year.into(),
            institutions,
        }
    }

    /// DOI as a resolvable `https://doi.org/` link, if the record has one.
    #[must_use]
    pub fn doi_url(&self) -> Option<String> {
        if self.doi == sentinels::DOI {
            return None;
        }
        let bare = self
            .doi
            .trim_start_matches("https://doi.org/")
            .trim_start_matches("http://doi.org/")
            .trim_start_matches("doi:");
        Some(format!("https://doi.org/{bare}"))
    }
}

/// Publications found for one grant/funder pair.
#[derive(Debug, Clone, Serialize)]
pub struct GrantPublications {
    /// Grant identifier as queried.
    pub grant_id: String,

    /// Funder the query was restricted to.
    pub funder: FunderCandidate,

    /// Records in API response order.
    pub publications: Vec<PublicationRecord>,
}

/// Results accumulated across a run, in processing order.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct ResultSet {
    entries: Vec<GrantPublications>,
}

impl ResultSet {
    /// Create an empty result set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the publications for a pair. Empty lists are dropped.
    pub fn push(&mut self, grant_id: &str, funder: FunderCandidate, publications: Vec<PublicationRecord>) {
        if publications.is_empty() {
            return;
        }
        self.entries.push(GrantPublications { grant_id: grant_id.to_string(), funder, publications });
    }

    /// Entries in processing order.
    #[must_use]
    pub fn entries(&self) -> &[GrantPublications] {
        &self.entries
    }

    /// All records, flattened across entries.
    pub fn records(&self) -> impl Iterator<Item = &PublicationRecord> {
        self.entries.iter().flat_map(|e| e.publications.iter())
    }

    /// Number of grant/funder entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of publication records.
    #[must_use]
    pub fn publication_count(&self) -> usize {
        self.entries.iter().map(|e| e.publications.len()).sum()
    }
}
