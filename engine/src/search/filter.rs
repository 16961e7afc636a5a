use crate::search::SearchError;

/// Pre-matching restriction on the candidate set of one entity type.
pub trait CandidateFilter<T> {
    /// Rejects filters whose bounds can never be satisfied. Called once per
    /// search, before any candidate is looked at.
    fn validate(&self) -> Result<(), SearchError> {
        Ok(())
    }

    fn accepts(&self, candidate: &T) -> bool;
}

/// Lets every candidate through.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFilter;

impl<T> CandidateFilter<T> for NoFilter {
    fn accepts(&self, _candidate: &T) -> bool {
        true
    }
}
