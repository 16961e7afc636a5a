use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::data::{EntityId, SearchField, Searchable, SortValue};

/// Community marketplace board a card is posted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardSection {
    ForSale,
    Wanted,
    Exchange,
}

impl CardSection {
    pub fn as_str(&self) -> &'static str {
        match self {
            CardSection::ForSale => "ForSale",
            CardSection::Wanted => "Wanted",
            CardSection::Exchange => "Exchange",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketplaceCard {
    #[serde(rename = "id")]
    pub card_id: EntityId,
    pub creator_id: EntityId,
    pub section: CardSection,
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub created: NaiveDateTime,
    pub display_period_end: NaiveDateTime,
}

/// Cards match on title, description and each keyword individually, so a
/// quoted phrase equal to one keyword is an exact hit.
impl Searchable for MarketplaceCard {
    const KIND: &'static str = "card";
    const SORT_KEYS: &'static [&'static str] = &["title", "section", "created", "displayPeriodEnd"];

    fn id(&self) -> EntityId {
        self.card_id
    }

    fn search_fields(&self) -> Vec<SearchField<'_>> {
        let mut fields = Vec::with_capacity(2 + self.keywords.len());
        fields.push(SearchField::new("title", &self.title));
        fields.push(SearchField::optional(
            "description",
            self.description.as_deref(),
        ));
        fields.extend(
            self.keywords
                .iter()
                .map(|keyword| SearchField::new("keyword", keyword)),
        );
        fields
    }

    fn sort_value(&self, key: &str) -> Option<SortValue<'_>> {
        Some(match key {
            "title" => SortValue::Text(&self.title),
            "section" => SortValue::Text(self.section.as_str()),
            "created" => SortValue::Timestamp(self.created),
            "displayPeriodEnd" => SortValue::Timestamp(self.display_period_end),
            _ => return None,
        })
    }
}
