use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::{ClientError, Result};

/// Response header carrying the number of matches across all pages
pub static HEADER_TOTAL_LENGTH: &str = "Total-Length";

/// One page of search results as returned by a search endpoint: the JSON
/// array body plus the `Total-Length` header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage<T> {
    pub items: Vec<T>,
    pub total_length: u64,
}

impl<T: DeserializeOwned> SearchPage<T> {
    /// Decode a response from its body and headers. Header names are compared
    /// case-insensitively.
    pub fn from_response<'h, H>(body: &str, headers: H) -> Result<Self>
    where
        H: IntoIterator<Item = (&'h str, &'h str)>,
    {
        let total = headers
            .into_iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(HEADER_TOTAL_LENGTH))
            .map(|(_, value)| value)
            .ok_or(ClientError::MissingHeader(HEADER_TOTAL_LENGTH))?;
        let total_length = total
            .trim()
            .parse::<u64>()
            .map_err(|_| ClientError::InvalidHeader {
                name: HEADER_TOTAL_LENGTH,
                value: total.to_string(),
            })?;
        Ok(SearchPage {
            items: serde_json::from_str(body)?,
            total_length,
        })
    }
}

impl<T> SearchPage<T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn page_count(&self, per_page: u64) -> u64 {
        if per_page == 0 {
            return 0;
        }
        self.total_length.div_ceil(per_page)
    }

    /// Whether a page after `page_num` (1-based) holds any results
    pub fn has_next(&self, page_num: u64, per_page: u64) -> bool {
        page_num < self.page_count(per_page)
    }
}
