use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::data::{address::Address, EntityId, SearchField, Searchable, SortValue};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    #[default]
    User,
    GlobalAdmin,
    DefaultGlobalAdmin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "user",
            UserRole::GlobalAdmin => "global_admin",
            UserRole::DefaultGlobalAdmin => "default_global_admin",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "id")]
    pub user_id: EntityId,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub nickname: Option<String>,
    pub email: String,
    #[serde(default)]
    pub role: UserRole,
    pub home_address: Option<Address>,
    pub created: Option<NaiveDateTime>,
}

impl User {
    pub fn new(user_id: EntityId, first_name: &str, last_name: &str, email: &str) -> User {
        User {
            user_id,
            first_name: first_name.to_string(),
            middle_name: None,
            last_name: last_name.to_string(),
            nickname: None,
            email: email.to_string(),
            role: UserRole::User,
            home_address: None,
            created: None,
        }
    }

    pub fn with_middle_name(mut self, middle_name: &str) -> User {
        self.middle_name = Some(middle_name.to_string());
        self
    }

    pub fn with_nickname(mut self, nickname: &str) -> User {
        self.nickname = Some(nickname.to_string());
        self
    }

    pub fn with_role(mut self, role: UserRole) -> User {
        self.role = role;
        self
    }
}

impl Searchable for User {
    const KIND: &'static str = "user";
    const SORT_KEYS: &'static [&'static str] = &[
        "nickname",
        "firstName",
        "middleName",
        "lastName",
        "email",
        "role",
    ];

    fn id(&self) -> EntityId {
        self.user_id
    }

    fn search_fields(&self) -> Vec<SearchField<'_>> {
        vec![
            SearchField::new("firstName", &self.first_name),
            SearchField::optional("middleName", self.middle_name.as_deref()),
            SearchField::new("lastName", &self.last_name),
            SearchField::optional("nickname", self.nickname.as_deref()),
            SearchField::new("email", &self.email),
        ]
    }

    fn sort_value(&self, key: &str) -> Option<SortValue<'_>> {
        Some(match key {
            "nickname" => SortValue::text(self.nickname.as_deref()),
            "firstName" => SortValue::Text(&self.first_name),
            "middleName" => SortValue::text(self.middle_name.as_deref()),
            "lastName" => SortValue::Text(&self.last_name),
            "email" => SortValue::Text(&self.email),
            "role" => SortValue::Text(self.role.as_str()),
            _ => return None,
        })
    }
}
