//! Funder disambiguation for manual lookups.
//!
//! A grant identifier can map to several funders. Manual mode asks a
//! [`FunderSelector`] which one to query; batch mode queries all of them and
//! never consults a selector.

use std::collections::BTreeSet;
use std::io::{BufRead, Write};

use crate::error::InputResult;
use crate::models::FunderCandidate;

/// Chooses one funder among the candidates resolved for a grant identifier.
pub trait FunderSelector {
    /// Pick a candidate, or `None` to decline.
    ///
    /// `candidates` is never empty.
    fn select(
        &mut self,
        grant_id: &str,
        candidates: &BTreeSet<FunderCandidate>,
    ) -> InputResult<Option<FunderCandidate>>;
}

impl<F> FunderSelector for F
where
    F: FnMut(&str, &BTreeSet<FunderCandidate>) -> Option<FunderCandidate>,
{
    fn select(
        &mut self,
        grant_id: &str,
        candidates: &BTreeSet<FunderCandidate>,
    ) -> InputResult<Option<FunderCandidate>> {
        Ok(self(grant_id, candidates))
    }
}

/// Select the candidate with a given funder ID.
#[derive(Debug, Clone)]
pub struct ByFunderId(pub String);

impl FunderSelector for ByFunderId {
    fn select(
        &mut self,
        _grant_id: &str,
        candidates: &BTreeSet<FunderCandidate>,
    ) -> InputResult<Option<FunderCandidate>> {
        Ok(candidates.iter().find(|c| c.id == self.0).cloned())
    }
}

/// Select the N-th candidate (1-based) in display order.
#[derive(Debug, Clone, Copy)]
pub struct ByIndex(pub usize);

impl FunderSelector for ByIndex {
    fn select(
        &mut self,
        _grant_id: &str,
        candidates: &BTreeSet<FunderCandidate>,
    ) -> InputResult<Option<FunderCandidate>> {
        Ok(self.0.checked_sub(1).and_then(|i| candidates.iter().nth(i)).cloned())
    }
}

/// Interactive selector: lists candidates and reads a number from the operator.
///
/// A single candidate is selected without prompting. An empty line or end of
/// input declines.
#[derive(Debug)]
pub struct PromptSelector<R, W> {
    input: R,
    output: W,
}

impl PromptSelector<std::io::StdinLock<'static>, std::io::Stderr> {
    /// Prompt on stderr, read from stdin.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stderr())
    }
}

impl<R: BufRead, W: Write> PromptSelector<R, W> {
    /// Create a selector over arbitrary streams.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> FunderSelector for PromptSelector<R, W> {
    fn select(
        &mut self,
        grant_id: &str,
        candidates: &BTreeSet<FunderCandidate>,
    ) -> InputResult<Option<FunderCandidate>> {
        if candidates.len() == 1 {
            return Ok(candidates.first().cloned());
        }

        writeln!(self.output, "Funders using Grant ID {grant_id}:")?;
        for (i, candidate) in candidates.iter().enumerate() {
            writeln!(self.output, "  {}. {}", i + 1, candidate)?;
        }

        loop {
            write!(self.output, "Select funder [1-{}]: ", candidates.len())?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }

            let choice = line.trim();
            if choice.is_empty() {
                return Ok(None);
            }

            match choice.parse::<usize>().ok().and_then(|n| ByIndex(n).select(grant_id, candidates).ok()) {
                Some(Some(candidate)) => return Ok(Some(candidate)),
                _ => writeln!(self.output, "Invalid choice: {choice}")?,
            }
        }
    }
}
