//! Query execution: validation, candidate filtering, evaluation, ranking and
//! pagination, plus the result page handed back to callers.

use once_cell::sync::Lazy;
use serde::Serialize;
use thiserror::Error;

use crate::{
    config::SearchConfig,
    data::{EntityId, Searchable},
    lexer::lexer::QueryLexer,
    search_log,
};

pub mod filter;
pub mod paging;

#[cfg(test)]
mod tests;

pub use filter::{CandidateFilter, NoFilter};
pub use paging::{PageRequest, SortOrder, SortRequest};

/// Caller misuse of the search API. Query text itself never fails.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    #[error("Cannot sort {entity} results by '{key}'")]
    UnsupportedSortKey { entity: &'static str, key: String },
    #[error("Page number must be at least 1, got {0}")]
    InvalidPage(u64),
    #[error("Cannot return page with {0} results per page")]
    InvalidPerPage(u64),
    #[error("Cannot return more than {max} results per page, {requested} requested")]
    PerPageTooLarge { requested: u64, max: u64 },
    #[error("Invalid Dates. '{0}' is not a yyyy-MM-dd date")]
    InvalidDate(String),
    #[error("Latest closing date cannot be before earliest closing date")]
    InvalidDateRange,
    #[error("Minimum or maximum price should not be negative, got {0}")]
    NegativePrice(f64),
    #[error("Maximum price {max} cannot be less than minimum price {min}")]
    InvalidPriceRange { min: f64, max: f64 },
}

/// One page of matches plus the number of matches across all pages.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult<'c, T> {
    pub page: Vec<&'c T>,
    pub total_matches: usize,
}

impl<'c, T> SearchResult<'c, T> {
    pub fn is_empty(&self) -> bool {
        self.page.is_empty()
    }

    /// Number of pages of `per_page` needed to show every match.
    pub fn page_count(&self, per_page: u64) -> u64 {
        if per_page == 0 {
            return 0;
        }
        (self.total_matches as u64).div_ceil(per_page)
    }
}

impl<'c, T: Searchable> SearchResult<'c, T> {
    pub fn ids(&self) -> Vec<EntityId> {
        self.page.iter().map(|entity| entity.id()).collect()
    }
}

/// Runs searches with one set of weights and paging limits.
#[derive(Debug, Clone, Default)]
pub struct SearchEngine {
    config: SearchConfig,
}

static DEFAULT_ENGINE: Lazy<SearchEngine> = Lazy::new(SearchEngine::default);

impl SearchEngine {
    pub fn new(config: SearchConfig) -> SearchEngine {
        SearchEngine { config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn search<'c, T: Searchable>(
        &self,
        query: &str,
        candidates: &'c [T],
        page: PageRequest,
        sort: &SortRequest,
    ) -> Result<SearchResult<'c, T>, SearchError> {
        self.search_filtered(query, candidates, &NoFilter, page, sort)
    }

    /// Searches the candidates `filter` accepts. The sort key and filter are
    /// validated before any candidate is evaluated.
    pub fn search_filtered<'c, T, F>(
        &self,
        query: &str,
        candidates: &'c [T],
        filter: &F,
        page: PageRequest,
        sort: &SortRequest,
    ) -> Result<SearchResult<'c, T>, SearchError>
    where
        T: Searchable,
        F: CandidateFilter<T>,
    {
        sort.validate::<T>()?;
        filter.validate()?;

        let lexer = QueryLexer::compile(query, self.config.weights());
        let evaluations = lexer.evaluate(
            candidates
                .iter()
                .filter(|candidate| filter.accepts(candidate)),
        );
        let result = paging::rank(evaluations, sort, page);

        search_log!(
            debug,
            "SearchEngine",
            T::KIND,
            "{} candidate(s), {} match(es), page {} of {} result(s)",
            candidates.len(),
            result.total_matches,
            page.page(),
            result.page.len()
        );
        Ok(result)
    }
}

/// Searches `candidates` with default weights.
///
/// `sort_by` of `"default"` or `""` ranks by relevance; any other value must
/// be a sort key of `T`, matched exactly with no trimming. `sort_order` of
/// `"asc"` sorts ascending, anything else descending.
pub fn search<'c, T: Searchable>(
    raw_query: &str,
    candidates: &'c [T],
    page: u64,
    per_page: u64,
    sort_by: &str,
    sort_order: &str,
) -> Result<SearchResult<'c, T>, SearchError> {
    let page = PageRequest::new(page, per_page)?;
    let sort = SortRequest::parse(Some(sort_by), Some(sort_order));
    DEFAULT_ENGINE.search(raw_query, candidates, page, &sort)
}
