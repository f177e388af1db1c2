//! Work data model matching the OpenAlex works API schema.
//!
//! Only the fields the pipeline reads are modeled. Every field tolerates both
//! a missing key and an explicit `null`.

use serde::{Deserialize, Deserializer, Serialize};

/// Response envelope of `GET /works`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorksResponse {
    /// Matching works (first page only).
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<Work>,
}

/// A scholarly work.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Work {
    /// DOI as a URL (e.g. `https://doi.org/10.1234/abc`).
    #[serde(default)]
    pub doi: Option<String>,

    /// Work title.
    #[serde(default)]
    pub title: Option<String>,

    /// Publication year.
    #[serde(default)]
    pub publication_year: Option<i32>,

    /// Authors with their institutions, in byline order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub authorships: Vec<Authorship>,

    /// Funding annotations.
    #[serde(default, deserialize_with = "null_as_default")]
    pub grants: Vec<Grant>,
}

impl Work {
    /// Author display names in byline order. `None` marks a missing name.
    pub fn author_names(&self) -> impl Iterator<Item = Option<&str>> {
        self.authorships.iter().map(|a| a.author.as_ref().and_then(|au| au.display_name.as_deref()))
    }

    /// Institution display names across all authorships, duplicates included.
    pub fn institution_names(&self) -> impl Iterator<Item = Option<&str>> {
        self.authorships.iter().flat_map(|a| a.institutions.iter().map(|i| i.display_name.as_deref()))
    }
}

/// One author's entry on a work.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Authorship {
    /// Author reference.
    #[serde(default)]
    pub author: Option<AuthorRef>,

    /// Institutions at time of publication.
    #[serde(default, deserialize_with = "null_as_default")]
    pub institutions: Vec<InstitutionRef>,
}

/// Minimal author reference.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthorRef {
    /// Author display name.
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Minimal institution reference.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InstitutionRef {
    /// Institution display name.
    #[serde(default)]
    pub display_name: Option<String>,
}

/// A grant annotation linking a work to a funder.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Grant {
    /// Award identifier as reported by the funder.
    #[serde(default)]
    pub award_id: Option<String>,

    /// Funder OpenAlex ID (e.g. `https://openalex.org/F4320306076`).
    #[serde(default)]
    pub funder: Option<String>,

    /// Funder display name.
    #[serde(default)]
    pub funder_display_name: Option<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
