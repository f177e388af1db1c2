//! Builder for the OpenAlex `filter` query parameter.
//!
//! Conditions are `key:value` pairs joined with `,`, which the API treats as
//! logical AND. Values are passed through verbatim; URL encoding happens when
//! the parameter is attached to the request.

use std::fmt;

/// A set of AND-combined works filter conditions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorksFilter {
    conditions: Vec<(&'static str, String)>,
}

impl WorksFilter {
    /// Create an empty filter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to works whose grants carry this award identifier.
    #[must_use]
    pub fn award_id(self, grant_id: &str) -> Self {
        self.with("grants.award_id", grant_id)
    }

    /// Restrict to works whose grants name this funder.
    #[must_use]
    pub fn funder(self, funder_id: &str) -> Self {
        self.with("grants.funder", funder_id)
    }

    fn with(mut self, key: &'static str, value: &str) -> Self {
        self.conditions.push((key, value.to_string()));
        self
    }
}

impl fmt::Display for WorksFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.conditions.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{key}:{value}")?;
        }
        Ok(())
    }
}
