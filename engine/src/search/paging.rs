use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::{
    data::{Searchable, SortValue, SORT_DEFAULT},
    lexer::lexer::Evaluation,
    search::{SearchError, SearchResult},
    search_log,
};

/// A validated, 1-based page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    page: u64,
    per_page: u64,
}

impl PageRequest {
    pub fn new(page: u64, per_page: u64) -> Result<PageRequest, SearchError> {
        if page < 1 {
            return Err(SearchError::InvalidPage(page));
        }
        if per_page < 1 {
            return Err(SearchError::InvalidPerPage(per_page));
        }
        Ok(PageRequest { page, per_page })
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn per_page(&self) -> u64 {
        self.per_page
    }

    /// Index of the first item on this page.
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.per_page)
    }

    /// The part of `items` this page covers; empty once past the end.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let len = items.len();
        let start = usize::try_from(self.offset()).unwrap_or(usize::MAX).min(len);
        let size = usize::try_from(self.per_page).unwrap_or(usize::MAX);
        &items[start..start.saturating_add(size).min(len)]
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// `asc` sorts ascending, anything else descending.
    pub fn parse(order: &str) -> SortOrder {
        if order == "asc" {
            SortOrder::Asc
        } else {
            SortOrder::Desc
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

/// How matched candidates are ordered before slicing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SortRequest {
    /// Score descending, ties in candidate order
    #[default]
    Relevance,
    Field { key: String, order: SortOrder },
}

impl SortRequest {
    pub fn parse(sort_by: Option<&str>, order_by: Option<&str>) -> SortRequest {
        match sort_by {
            None | Some("") => SortRequest::Relevance,
            Some(key) if key == SORT_DEFAULT => SortRequest::Relevance,
            Some(key) => SortRequest::Field {
                key: key.to_string(),
                order: SortOrder::parse(order_by.unwrap_or_default()),
            },
        }
    }

    pub fn field(key: &str, order: SortOrder) -> SortRequest {
        SortRequest::Field {
            key: key.to_string(),
            order,
        }
    }

    /// Checks that `T` can be sorted this way.
    pub fn validate<T: Searchable>(&self) -> Result<(), SearchError> {
        match self {
            SortRequest::Relevance => Ok(()),
            SortRequest::Field { key, .. } if T::supports_sort_key(key) => Ok(()),
            SortRequest::Field { key, .. } => {
                search_log!(warn, "Paging", T::KIND, "unsupported sort key '{}'", key);
                Err(SearchError::UnsupportedSortKey {
                    entity: T::KIND,
                    key: key.clone(),
                })
            }
        }
    }
}

/// Keeps matched evaluations, orders them and cuts out the requested page.
/// Sorting is stable, so equal keys keep candidate order.
pub(crate) fn rank<'c, T: Searchable>(
    mut evaluations: Vec<Evaluation<'c, T>>,
    sort: &SortRequest,
    page: PageRequest,
) -> SearchResult<'c, T> {
    evaluations.retain(|evaluation| evaluation.relevance.matched);

    match sort {
        SortRequest::Relevance => {
            evaluations.sort_by(|a, b| b.relevance.score.cmp(&a.relevance.score));
        }
        SortRequest::Field { key, order } => {
            evaluations.sort_by(|a, b| {
                let a_val = a.entity.sort_value(key).unwrap_or(SortValue::Absent);
                let b_val = b.entity.sort_value(key).unwrap_or(SortValue::Absent);
                order.apply(a_val.cmp(&b_val))
            });
        }
    }

    let total_matches = evaluations.len();
    let page = page
        .slice(&evaluations)
        .iter()
        .map(|evaluation| evaluation.entity)
        .collect();

    SearchResult {
        page,
        total_matches,
    }
}
