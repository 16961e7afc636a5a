use serde::{Deserialize, Serialize};

/// Postal address shared by users, businesses and the listings they publish.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street_number: Option<String>,
    pub street_name: Option<String>,
    pub suburb: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub country: String,
    pub postcode: Option<String>,
}

impl Address {
    pub fn new(city: &str, country: &str) -> Address {
        Address {
            city: Some(city.to_string()),
            country: country.to_string(),
            ..Default::default()
        }
    }

    pub fn with_suburb(mut self, suburb: &str) -> Address {
        self.suburb = Some(suburb.to_string());
        self
    }

    pub fn with_region(mut self, region: &str) -> Address {
        self.region = Some(region.to_string());
        self
    }
}
