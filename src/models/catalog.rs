//! Reference data and audit records: categories, languages, activity logs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{lenient, Entity};
use crate::models::enums::EntityKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(deserialize_with = "lenient::id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl Entity for Category {
    const KIND: EntityKind = EntityKind::Categories;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Language {
    #[serde(deserialize_with = "lenient::id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// ISO 639 code when the backend stores one
    #[serde(default)]
    pub code: Option<String>,
}

impl Entity for Language {
    const KIND: EntityKind = EntityKind::Languages;
}

/// Audit trail entry written by mutation handlers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLog {
    #[serde(deserialize_with = "lenient::id")]
    pub id: String,
    #[serde(default)]
    pub action: String,
    #[serde(default, alias = "entity")]
    pub entity_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub entity_id: Option<String>,
    #[serde(default, alias = "user")]
    pub actor: Option<String>,
    #[serde(default)]
    pub details: Option<serde_json::Value>,
    #[serde(default, alias = "createdAt", deserialize_with = "lenient::opt_timestamp")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl Entity for ActivityLog {
    const KIND: EntityKind = EntityKind::ActivityLogs;
}
