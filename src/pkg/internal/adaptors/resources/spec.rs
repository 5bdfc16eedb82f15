use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const DEFAULT_PRIORITY: &str = "Medium";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResourceEntry {
    pub id: Uuid,
    pub title: String,
    pub url: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: String,
    pub focus: Option<String>,
    pub value: Option<String>,
    pub priority: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateResourceData {
    pub title: String,
    pub url: String,
    pub kind: String,
    pub focus: String,
    pub value: String,
}
