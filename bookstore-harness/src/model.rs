//! Wire model for the two bookstore resources. Both round-trip through the
//! API's JSON, which uses camelCase field names (and `idBook` for the
//! author's book reference). An `id` of 0 means "not yet assigned" on
//! creation requests; the service picks the real id.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    #[serde(default)]
    pub id: i32,
    pub title: Option<String>,
    #[serde(default)]
    pub page_count: i32,
    pub description: Option<String>,
    pub excerpt: Option<String>,
    pub publish_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    #[serde(default)]
    pub id: i32,
    #[serde(rename = "idBook", default)]
    pub book_id: i32,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}
