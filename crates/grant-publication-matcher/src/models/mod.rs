//! Data models for OpenAlex works and normalized pipeline output.
//!
//! API models use `#[serde(default)]` for every field; the API omits or nulls
//! fields freely.

mod record;
mod work;

pub use record::{FunderCandidate, GrantPublications, PublicationRecord, PublicationYear, ResultSet};
pub use work::{AuthorRef, Authorship, Grant, InstitutionRef, Work, WorksResponse};
