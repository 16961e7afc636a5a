use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::data::{address::Address, EntityId, SearchField, Searchable, SortValue};

/// Business type assumed when none is given.
pub static DEFAULT_BUSINESS_TYPE: &str = "Retail Trade";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Business {
    #[serde(rename = "id")]
    pub business_id: EntityId,
    pub name: String,
    pub description: Option<String>,
    pub business_type: String,
    pub address: Option<Address>,
    pub registration_date: Option<NaiveDateTime>,
}

impl Business {
    pub fn new(business_id: EntityId, name: &str) -> Business {
        Business {
            business_id,
            name: name.to_string(),
            description: None,
            business_type: DEFAULT_BUSINESS_TYPE.to_string(),
            address: None,
            registration_date: None,
        }
    }

    pub fn with_business_type(mut self, business_type: &str) -> Business {
        self.business_type = business_type.to_string();
        self
    }
}

/// Businesses are searched by name only.
impl Searchable for Business {
    const KIND: &'static str = "business";
    const SORT_KEYS: &'static [&'static str] = &["name", "businessType", "registrationDate"];

    fn id(&self) -> EntityId {
        self.business_id
    }

    fn search_fields(&self) -> Vec<SearchField<'_>> {
        vec![SearchField::new("name", &self.name)]
    }

    fn sort_value(&self, key: &str) -> Option<SortValue<'_>> {
        Some(match key {
            "name" => SortValue::Text(&self.name),
            "businessType" => SortValue::Text(&self.business_type),
            "registrationDate" => SortValue::timestamp(self.registration_date),
            _ => return None,
        })
    }
}
