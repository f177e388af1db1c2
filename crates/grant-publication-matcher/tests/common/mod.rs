//! Shared fixtures for mock-server tests.
#![allow(dead_code)]

use serde_json::json;
use wiremock::MockServer;

use grant_publication_matcher::pipeline::Pipeline;
use grant_publication_matcher::{Config, OpenAlexClient};

pub const FUNDER_A: &str = "https://openalex.org/F4320306076";
pub const FUNDER_B: &str = "https://openalex.org/F4320321001";

/// Create a pipeline against a mock server.
pub fn setup_pipeline(mock_server: &MockServer) -> Pipeline {
    let config = Config::for_testing(&mock_server.uri());
    let client = OpenAlexClient::new(&config).unwrap();
    Pipeline::new(client, &config)
}

/// Filter value the resolver sends for a grant.
pub fn award_filter(grant_id: &str) -> String {
    format!("grants.award_id:{grant_id}")
}

/// Filter value the fetcher sends for a grant/funder pair.
pub fn pair_filter(grant_id: &str, funder_id: &str) -> String {
    format!("grants.award_id:{grant_id},grants.funder:{funder_id}")
}

/// A work carrying one grant annotation.
pub fn work_with_grant(award_id: &str, funder_id: &str, funder_name: &str) -> serde_json::Value {
    json!({
        "id": "https://openalex.org/W1",
        "doi": "https://doi.org/10.5278/vbn.1",
        "title": "A funded work",
        "publication_year": 2023,
        "authorships": [],
        "grants": [{"award_id": award_id, "funder": funder_id, "funder_display_name": funder_name}]
    })
}

/// A fully populated work.
pub fn sample_work(title: &str, year: i32) -> serde_json::Value {
    json!({
        "id": "https://openalex.org/W2",
        "doi": format!("https://doi.org/10.1234/{}", title.len()),
        "title": title,
        "publication_year": year,
        "authorships": [
            {
                "author": {"display_name": "Søren Vidmar"},
                "institutions": [{"display_name": "Aalborg University"}]
            },
            {
                "author": {"display_name": "Jane Doe"},
                "institutions": [
                    {"display_name": "Aalborg University"},
                    {"display_name": "Aarhus University"}
                ]
            }
        ],
        "grants": [{"award_id": "G1", "funder": FUNDER_A, "funder_display_name": "Reported Funder"}]
    })
}

/// Works response envelope.
pub fn works_response(works: Vec<serde_json::Value>) -> serde_json::Value {
    json!({
        "meta": {"count": works.len(), "page": 1, "per_page": 200},
        "results": works
    })
}
