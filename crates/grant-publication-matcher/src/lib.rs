//! Grant Publication Matcher
//!
//! Matches research grant identifiers to scholarly publications through the
//! OpenAlex works API, for research offices enriching local datasets.
//!
//! # Pipeline
//!
//! - **Funder resolution**: which funders use this grant identifier?
//! - **Disambiguation**: pick one funder (manual) or take them all (batch)
//! - **Publication fetch**: works matching grant AND funder, normalized into records
//!
//! # Example
//!
//! ```no_run
//! use grant_publication_matcher::{Config, OpenAlexClient, pipeline::{ByIndex, Pipeline}};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let pipeline = Pipeline::new(OpenAlexClient::new(&config)?, &config);
//!
//!     let report = pipeline.run_manual("0217-00089B", &mut ByIndex(1)).await?;
//!     println!("{} publications", report.results.publication_count());
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod export;
pub mod formatters;
pub mod input;
pub mod models;
pub mod pipeline;

pub use client::OpenAlexClient;
pub use config::Config;
pub use error::{ClientError, ExportError, InputError};
