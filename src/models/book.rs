//! Book (lending catalog entry) model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{lenient, Entity};
use crate::models::enums::EntityKind;

/// Book record as listed by `/api/books`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    #[serde(deserialize_with = "lenient::id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub isbn: Option<String>,
    #[serde(default, alias = "languageId", deserialize_with = "lenient::id_list")]
    pub language_ids: Vec<String>,
    #[serde(default, alias = "categoryId", deserialize_with = "lenient::id_list")]
    pub category_ids: Vec<String>,
    /// Kabat shelf classification number
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub kabat_number: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub pages: Option<i64>,
    #[serde(default, alias = "publicationYear", deserialize_with = "lenient::opt_i64")]
    pub year: Option<i64>,
    #[serde(default)]
    pub available: Option<bool>,
    #[serde(default)]
    pub cover_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Book {
    /// Books without an explicit flag are considered on the shelf
    pub fn is_available(&self) -> bool {
        self.available.unwrap_or(true)
    }
}

impl Entity for Book {
    const KIND: EntityKind = EntityKind::Books;
}
