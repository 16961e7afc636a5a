use std::cmp::Ordering;

use chrono::{NaiveDate, NaiveDateTime};

pub type EntityId = i64;

/// Sort key that ranks by relevance instead of an entity field.
pub static SORT_DEFAULT: &str = "default";

/// A named text field exposed to the matcher. `None` is an absent value and
/// never matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchField<'a> {
    pub name: &'static str,
    pub text: Option<&'a str>,
}

impl<'a> SearchField<'a> {
    pub fn new(name: &'static str, text: &'a str) -> SearchField<'a> {
        SearchField {
            name,
            text: Some(text),
        }
    }

    pub fn optional(name: &'static str, text: Option<&'a str>) -> SearchField<'a> {
        SearchField { name, text }
    }
}

/// Capability shared by every entity type the engine can search.
///
/// Implementors list their text fields in a stable order and name the keys
/// they can be sorted by. `sort_value` must return `Some` for every key in
/// `SORT_KEYS`; fields with no value report [`SortValue::Absent`].
pub trait Searchable {
    /// Entity kind used in log scopes and error messages
    const KIND: &'static str;
    const SORT_KEYS: &'static [&'static str];

    fn id(&self) -> EntityId;

    fn search_fields(&self) -> Vec<SearchField<'_>>;

    fn sort_value(&self, key: &str) -> Option<SortValue<'_>>;

    fn supports_sort_key(key: &str) -> bool {
        Self::SORT_KEYS.iter().any(|supported| *supported == key)
    }
}

/// Typed value of a sortable field.
///
/// Values of the same kind compare naturally, text by code point and so case
/// sensitively. `Absent` orders before everything else.
#[derive(Debug, Clone, Copy)]
pub enum SortValue<'a> {
    Absent,
    Text(&'a str),
    Integer(i64),
    Decimal(f64),
    Timestamp(NaiveDateTime),
    Date(NaiveDate),
}

impl<'a> SortValue<'a> {
    pub fn text(value: Option<&'a str>) -> SortValue<'a> {
        value.map_or(SortValue::Absent, SortValue::Text)
    }

    pub fn timestamp(value: Option<NaiveDateTime>) -> SortValue<'a> {
        value.map_or(SortValue::Absent, SortValue::Timestamp)
    }

    fn rank(&self) -> u8 {
        match self {
            SortValue::Absent => 0,
            SortValue::Text(_) => 1,
            SortValue::Integer(_) => 2,
            SortValue::Decimal(_) => 3,
            SortValue::Timestamp(_) => 4,
            SortValue::Date(_) => 5,
        }
    }
}

impl Ord for SortValue<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortValue::Text(a), SortValue::Text(b)) => a.cmp(b),
            (SortValue::Integer(a), SortValue::Integer(b)) => a.cmp(b),
            (SortValue::Decimal(a), SortValue::Decimal(b)) => a.total_cmp(b),
            (SortValue::Timestamp(a), SortValue::Timestamp(b)) => a.cmp(b),
            (SortValue::Date(a), SortValue::Date(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for SortValue<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SortValue<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SortValue<'_> {}

pub mod address;
pub mod business;
pub mod card;
pub mod sale_listing;
pub mod user;
