#![forbid(unsafe_code)]
//! Free-text search over marketplace entities.
//!
//! A raw query such as `john OR "Mei Ru" smith` is tokenized, folded left to
//! right into a [`lexer::QueryPlan`], evaluated against every candidate of one
//! [`data::Searchable`] entity type, and returned as a ranked, paginated
//! [`search::SearchResult`] together with the total number of matches.

pub mod config;
pub mod data;
pub mod lexer;
pub mod search;

pub use config::{ConfigError, SearchConfig};
pub use data::{EntityId, SearchField, Searchable, SortValue, SORT_DEFAULT};
pub use lexer::{
    lexer::QueryLexer, scoring::MatchOutcome, scoring::Relevance, scoring::Weights, Operator,
    QueryPlan, SearchTerm, Token,
};
pub use search::{
    search, CandidateFilter, NoFilter, PageRequest, SearchEngine, SearchError, SearchResult,
    SortOrder, SortRequest,
};

#[doc(hidden)]
pub use tracing as __tracing;

/// Emits a `tracing` event tagged with the emitting module and the entity kind
/// (or other scope) it concerns.
#[macro_export]
macro_rules! search_log {
    ($level:ident, $module:expr, $scope:expr, $($arg:tt)+) => {
        $crate::__tracing::$level!(module = $module, scope = $scope, $($arg)+)
    };
}
