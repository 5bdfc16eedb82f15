use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A live job with its company reference flattened into display fields.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobListing {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub company_id: Option<Uuid>,
    pub location: Option<String>,
    pub employment_type: Option<String>,
    pub role_type: Option<String>,
    pub apply_link: Option<String>,
    pub salary_range: Option<String>,
    pub experience_level: Option<String>,
    pub remote_work: Option<bool>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub company_name: Option<String>,
    pub company_website: Option<String>,
    pub company_logo: Option<String>,
}
