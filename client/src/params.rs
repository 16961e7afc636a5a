use serde::{Deserialize, Serialize};
use url::Url;

use crate::{query::QueryBuilder, Result};

pub static PARAM_SEARCH_QUERY: &str = "searchQuery";
pub static PARAM_PAGE_NUM: &str = "pageNum";
pub static PARAM_PER_PAGE: &str = "perPage";
pub static PARAM_SORT_BY: &str = "sortBy";
pub static PARAM_ORDER_BY: &str = "orderBy";

/// Sort key that asks the server to rank by relevance
pub static SORT_BY_DEFAULT: &str = "default";

/// Optional sale-listing restrictions, sent alongside the search query.
/// Dates are `yyyy-MM-dd`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleFilterParams {
    pub business_type: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub earliest_closing_date: Option<String>,
    pub latest_closing_date: Option<String>,
}

impl SaleFilterParams {
    fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(business_type) = &self.business_type {
            pairs.push(("businessType", business_type.clone()));
        }
        if let Some(min_price) = self.min_price {
            pairs.push(("minPrice", min_price.to_string()));
        }
        if let Some(max_price) = self.max_price {
            pairs.push(("maxPrice", max_price.to_string()));
        }
        if let Some(earliest) = &self.earliest_closing_date {
            pairs.push(("earliestClosingDate", earliest.clone()));
        }
        if let Some(latest) = &self.latest_closing_date {
            pairs.push(("latestClosingDate", latest.clone()));
        }
        pairs
    }
}

/// Request parameters of a search endpoint. Unset values are left out so
/// the server applies its own defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub search_query: String,
    pub page_num: Option<u64>,
    pub per_page: Option<u64>,
    pub sort_by: Option<String>,
    pub order_by: Option<String>,
    #[serde(flatten)]
    pub filter: SaleFilterParams,
}

impl SearchParams {
    pub fn new<S: Into<String>>(search_query: S) -> Self {
        SearchParams {
            search_query: search_query.into(),
            ..Default::default()
        }
    }

    /// Parameters for a query built with [`QueryBuilder`]
    pub fn from_builder(builder: &QueryBuilder) -> Result<Self> {
        Ok(Self::new(builder.to_query_string()?))
    }

    pub fn page(mut self, page_num: u64, per_page: u64) -> Self {
        self.page_num = Some(page_num);
        self.per_page = Some(per_page);
        self
    }

    /// Sort by an entity field, `asc` or `desc`
    pub fn sort<S: Into<String>>(mut self, sort_by: S, ascending: bool) -> Self {
        self.sort_by = Some(sort_by.into());
        self.order_by = Some(if ascending { "asc" } else { "desc" }.to_string());
        self
    }

    pub fn filter(mut self, filter: SaleFilterParams) -> Self {
        self.filter = filter;
        self
    }

    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![(PARAM_SEARCH_QUERY, self.search_query.clone())];
        if let Some(page_num) = self.page_num {
            pairs.push((PARAM_PAGE_NUM, page_num.to_string()));
        }
        if let Some(per_page) = self.per_page {
            pairs.push((PARAM_PER_PAGE, per_page.to_string()));
        }
        if let Some(sort_by) = &self.sort_by {
            pairs.push((PARAM_SORT_BY, sort_by.clone()));
        }
        if let Some(order_by) = &self.order_by {
            pairs.push((PARAM_ORDER_BY, order_by.clone()));
        }
        pairs.extend(self.filter.pairs());
        pairs
    }

    /// Append the parameters to an endpoint URL such as
    /// `https://example.com/businesses/search`
    pub fn to_url(&self, endpoint: &str) -> Result<Url> {
        let mut url = Url::parse(endpoint)?;
        url.query_pairs_mut().extend_pairs(self.to_query_pairs());
        Ok(url)
    }
}
