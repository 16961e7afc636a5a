use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::{
    data::{address::Address, EntityId, SearchField, Searchable, SortValue},
    search::{CandidateFilter, SearchError},
};

/// Wire format of closing-date filter bounds.
pub static CLOSING_DATE_FORMAT: &str = "%Y-%m-%d";

/// A product put up for sale by a business, flattened with the product,
/// business and address details it is searched and sorted by.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleListing {
    #[serde(rename = "id")]
    pub sale_item_id: EntityId,
    pub product_name: String,
    pub business_name: String,
    pub business_type: String,
    pub address: Address,
    pub price: f64,
    pub quantity: i64,
    pub created: NaiveDateTime,
    pub closes: Option<NaiveDateTime>,
    /// Best-before date of the inventory item being sold
    #[serde(default)]
    pub expires: Option<NaiveDate>,
    #[serde(default)]
    pub sold: bool,
}

impl Searchable for SaleListing {
    const KIND: &'static str = "saleListing";
    const SORT_KEYS: &'static [&'static str] = &[
        "name",
        "seller",
        "suburb",
        "city",
        "country",
        "saleItemId",
        "created",
        "price",
        "expires",
        "quantity",
    ];

    fn id(&self) -> EntityId {
        self.sale_item_id
    }

    fn search_fields(&self) -> Vec<SearchField<'_>> {
        vec![
            SearchField::new("businessName", &self.business_name),
            SearchField::new("productName", &self.product_name),
            SearchField::optional("suburb", self.address.suburb.as_deref()),
            SearchField::optional("city", self.address.city.as_deref()),
            SearchField::optional("region", self.address.region.as_deref()),
            SearchField::new("country", &self.address.country),
        ]
    }

    fn sort_value(&self, key: &str) -> Option<SortValue<'_>> {
        Some(match key {
            "name" => SortValue::Text(&self.product_name),
            "seller" => SortValue::Text(&self.business_name),
            "suburb" => SortValue::text(self.address.suburb.as_deref()),
            "city" => SortValue::text(self.address.city.as_deref()),
            "country" => SortValue::Text(&self.address.country),
            "saleItemId" => SortValue::Integer(self.sale_item_id),
            "created" => SortValue::Timestamp(self.created),
            "price" => SortValue::Decimal(self.price),
            "expires" => self.expires.map_or(SortValue::Absent, SortValue::Date),
            "quantity" => SortValue::Integer(self.quantity),
            _ => return None,
        })
    }
}

/// Narrows sale listings before any text matching happens. All bounds are
/// inclusive and sold listings never pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleListingFilter {
    pub business_type: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub earliest_closing_date: Option<NaiveDateTime>,
    pub latest_closing_date: Option<NaiveDateTime>,
}

impl SaleListingFilter {
    pub fn new() -> SaleListingFilter {
        SaleListingFilter::default()
    }

    pub fn business_type(mut self, business_type: &str) -> SaleListingFilter {
        self.business_type = Some(business_type.to_string());
        self
    }

    pub fn price_between(mut self, min: Option<f64>, max: Option<f64>) -> SaleListingFilter {
        self.min_price = min;
        self.max_price = max;
        self
    }

    /// Sets the closing-date window from `yyyy-MM-dd` strings. Blank bounds
    /// are left open.
    pub fn closing_between(
        mut self,
        earliest: Option<&str>,
        latest: Option<&str>,
    ) -> Result<SaleListingFilter, SearchError> {
        self.earliest_closing_date = parse_closing_date(earliest)?;
        self.latest_closing_date = parse_closing_date(latest)?;
        Ok(self)
    }
}

/// Parses a filter date into the start of that day.
pub fn parse_closing_date(raw: Option<&str>) -> Result<Option<NaiveDateTime>, SearchError> {
    let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return Ok(None);
    };
    NaiveDate::parse_from_str(raw, CLOSING_DATE_FORMAT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(Some)
        .ok_or_else(|| SearchError::InvalidDate(raw.to_string()))
}

impl CandidateFilter<SaleListing> for SaleListingFilter {
    fn validate(&self) -> Result<(), SearchError> {
        if let (Some(earliest), Some(latest)) = (self.earliest_closing_date, self.latest_closing_date) {
            if latest < earliest {
                return Err(SearchError::InvalidDateRange);
            }
        }
        for price in [self.min_price, self.max_price].into_iter().flatten() {
            if price < 0.0 {
                return Err(SearchError::NegativePrice(price));
            }
        }
        if let (Some(min), Some(max)) = (self.min_price, self.max_price) {
            if max < min {
                return Err(SearchError::InvalidPriceRange { min, max });
            }
        }
        Ok(())
    }

    fn accepts(&self, listing: &SaleListing) -> bool {
        if listing.sold {
            return false;
        }
        if let Some(business_type) = &self.business_type {
            if &listing.business_type != business_type {
                return false;
            }
        }
        if self.min_price.is_some_and(|min| listing.price < min)
            || self.max_price.is_some_and(|max| listing.price > max)
        {
            return false;
        }
        if self.earliest_closing_date.is_none() && self.latest_closing_date.is_none() {
            return true;
        }
        // A listing with no closing date cannot satisfy a closing window
        let Some(closes) = listing.closes else {
            return false;
        };
        self.earliest_closing_date.is_none_or(|earliest| closes >= earliest)
            && self.latest_closing_date.is_none_or(|latest| closes <= latest)
    }
}
